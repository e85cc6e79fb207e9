//! Concurrent independent searches — enabled with the `parallel` feature.
//!
//! Each [`Criteria`] gets its own [`DijkstraSearch`]; the graph is shared
//! read-only across Rayon workers.

use rayon::prelude::*;

use crate::graph::Graph;
use crate::search::{Criteria, DijkstraSearch, Response};

/// Run one search per `criteria` entry in parallel.
///
/// Responses are returned in the same order as `criteria`.
pub fn search_many(graph: &Graph, criteria: &[Criteria]) -> Vec<Response> {
    criteria
        .par_iter()
        .map(|c| DijkstraSearch::new(c).run(graph))
        .collect()
}
