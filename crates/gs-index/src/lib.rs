//! `gs-index` — spatial index for snapping coordinates onto graph nodes.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`vector`]  | `Vector` — a k-dimensional point tagged with an id          |
//! | [`kdtree`]  | `KdTree` — arena-backed, balanced, immutable k-d tree       |
//!
//! The index is built once and never mutated, so a `&KdTree` can be shared
//! freely across threads running independent searches.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Vector`.               |

pub mod kdtree;
pub mod vector;


pub use kdtree::KdTree;
pub use vector::Vector;
