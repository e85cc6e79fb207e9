//! `gs-graph` — road graph, Dijkstra search, and shortest-path trees.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`graph`]   | `Graph`, `Node`, `Edge`, `EdgeMeta`, `EdgeDirection`        |
//! | [`bitset`]  | `Bitset` — growable visited/source membership               |
//! | [`heap`]    | `PriorityQueue`, `FrontierEntry` — lazy-deletion min-heap   |
//! | [`search`]  | `DijkstraSearch`, `Criteria`, `Costs`, `Response`           |
//! | [`tree`]    | `ShortestPathTree` — predecessor tree + path reconstruction |
//! | [`index`]   | `NodeIndex` — snap coordinates to nodes via a k-d tree      |
//! | [`batch`]   | `search_many` (feature = `"parallel"` only)                 |
//! | [`osm`]     | `load_from_pbf` (feature = `"osm"` only)                    |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                              |
//!
//! # Typical flow
//!
//! ```
//! use gs_core::{GeoPoint, SpatialKey};
//! use gs_graph::{Criteria, DijkstraSearch, EdgeDirection, EdgeMeta, Graph};
//!
//! let mut g = Graph::new();
//! let a = g.add_node(SpatialKey::from_geo(GeoPoint::new(6.20, -75.58)).unwrap());
//! let b = g.add_node(SpatialKey::from_geo(GeoPoint::new(6.21, -75.57)).unwrap());
//! g.relate(a, b, 1_500.0, EdgeDirection::Bidirectional, EdgeMeta::with_distance(1_500.0)).unwrap();
//!
//! let index = g.build_node_index();
//! let (source, _) = index.snap(GeoPoint::new(6.2001, -75.5801)).unwrap();
//! assert_eq!(source, a);
//!
//! let response = DijkstraSearch::new(&Criteria::between(source, b)).run(&g);
//! assert_eq!(response.cost_to(b).unwrap(), 1_500.0);
//! ```
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `osm`      | Enables OSM PBF loading via the `osmpbf` crate.           |
//! | `parallel` | Enables `search_many` via Rayon.                          |
//! | `serde`    | Derives `Serialize`/`Deserialize` on graph types.         |

pub mod bitset;
pub mod error;
pub mod graph;
pub mod heap;
pub mod index;
pub mod search;
pub mod tree;

#[cfg(feature = "parallel")]
pub mod batch;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use bitset::Bitset;
pub use error::{GraphError, GraphResult};
pub use graph::{Edge, EdgeDirection, EdgeMeta, Graph, Node};
pub use heap::{FrontierEntry, PriorityQueue};
pub use index::NodeIndex;
pub use search::{Costs, Criteria, DijkstraSearch, Response, Termination, INFINITE};
pub use tree::ShortestPathTree;

#[cfg(feature = "parallel")]
pub use batch::search_many;
