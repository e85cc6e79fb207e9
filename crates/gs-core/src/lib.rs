//! `gs-core` — foundational types for the `graph_search` routing engine.
//!
//! This crate is a dependency of every other `gs-*` crate.  It has no
//! `gs-*` dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `NodeId`                                                  |
//! | [`geo`]       | `GeoPoint`, haversine distance, Web-Mercator projection   |
//! | [`key`]       | `SpatialKey` — fixed-precision position encoding          |
//! | [`travel`]    | `TravelMode`, `RoadClass`, `Surface`, `SpeedTable`        |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod key;
pub mod travel;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::NodeId;
pub use key::SpatialKey;
pub use travel::{RoadClass, SpeedTable, Surface, TravelMode};
