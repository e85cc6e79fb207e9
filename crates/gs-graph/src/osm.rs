//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use gs_graph::osm::{load_from_pbf, IngestConfig};
//!
//! let graph = load_from_pbf(Path::new("colombia-latest.osm.pbf"), &IngestConfig::default())?;
//! ```
//!
//! # What is loaded
//!
//! Only ways whose `highway=*` class is routable (see
//! [`RoadClass::is_routable`]) become edges, one per consecutive node pair.
//! `oneway=yes` and `junction=roundabout` ways are `LeftToRight`,
//! `oneway=-1` ways are `RightToLeft`, everything else is `Bidirectional`.
//! Only nodes referenced by those ways are added to the graph, in order of
//! first reference.
//!
//! # Memory note
//!
//! All OSM node positions are buffered in a `HashMap<i64, GeoPoint>` during
//! the pass (ways reference nodes by OSM id).  The map is dropped before
//! edges are built.

use std::collections::HashMap;
use std::path::Path;

use osmpbf::{Element, ElementReader};
use tracing::info;

use gs_core::travel::travel_minutes;
use gs_core::{GeoPoint, NodeId, RoadClass, SpatialKey, SpeedTable, Surface, TravelMode};

use crate::graph::{EdgeDirection, EdgeMeta, Graph};
use crate::{GraphError, GraphResult};

// ── Configuration ─────────────────────────────────────────────────────────────

/// What an edge weight measures.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Weighting {
    /// Great-circle length in metres.
    #[default]
    Distance,
    /// Travel time in minutes at the speed-table speed.
    TravelTime,
}

/// Ingestion settings.
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub mode:              TravelMode,
    pub weighting:         Weighting,
    /// Speed used when the table has no entry for a segment, km/h.
    pub default_speed_kmh: f64,
    pub speeds:            SpeedTable,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            mode:              TravelMode::Drive,
            weighting:         Weighting::Distance,
            default_speed_kmh: 50.0,
            speeds:            SpeedTable::default(),
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a road graph from an OSM PBF file.
///
/// # Errors
///
/// Returns [`GraphError::Osm`] on read/parse errors and
/// [`GraphError::Core`] for node coordinates outside the WGS-84 range.
pub fn load_from_pbf(path: &Path, config: &IngestConfig) -> GraphResult<Graph> {
    // ── Phase 1: collect all OSM nodes + road ways in one sequential pass ──
    let reader = ElementReader::from_path(path).map_err(|e| GraphError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                if let Some(way) = OsmWay::from_tags(&tags, w.refs().collect()) {
                    road_ways.push(way);
                }
            }
            _ => {}
        })
        .map_err(|e| GraphError::Osm(e.to_string()))?;

    info!(nodes = all_nodes.len(), ways = road_ways.len(), "OSM pass complete");

    // ── Phase 2: add referenced nodes in first-reference order ────────────
    let mut graph = Graph::new();
    let mut osm_to_gs: HashMap<i64, NodeId> = HashMap::new();

    for osm_id in road_ways.iter().flat_map(|w| w.refs.iter().copied()) {
        if osm_to_gs.contains_key(&osm_id) {
            continue;
        }
        if let Some(&pos) = all_nodes.get(&osm_id) {
            let id = graph.add_node(SpatialKey::from_geo(pos)?);
            osm_to_gs.insert(osm_id, id);
        }
    }
    info!(nodes = graph.node_count(), "road nodes added");

    drop(all_nodes);

    // ── Phase 3: one edge per consecutive node pair ───────────────────────
    for way in &road_ways {
        let speed_kmh = config
            .speeds
            .segment_kmh(config.mode, way.class, way.surface)
            .unwrap_or(config.default_speed_kmh);

        for pair in way.refs.windows(2) {
            let (Some(&a), Some(&b)) = (osm_to_gs.get(&pair[0]), osm_to_gs.get(&pair[1])) else {
                continue;
            };
            let (Some(pa), Some(pb)) = (graph.position(a), graph.position(b)) else {
                continue;
            };
            let distance_m = pa.distance_m(pb);
            let weight = match config.weighting {
                Weighting::Distance => distance_m,
                Weighting::TravelTime => travel_minutes(distance_m, speed_kmh),
            };
            let meta = EdgeMeta {
                speed_kmh:  speed_kmh as f32,
                distance_m: distance_m as f32,
                road:       way.class,
            };
            graph.relate(a, b, weight as f32, way.direction, meta)?;
        }
    }
    info!(edges = graph.edge_count(), "road graph built");

    Ok(graph)
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:      Vec<i64>,
    class:     RoadClass,
    surface:   Option<Surface>,
    direction: EdgeDirection,
}

impl OsmWay {
    /// `None` unless the way's `highway` class is routable.
    fn from_tags(tags: &[(&str, &str)], refs: Vec<i64>) -> Option<Self> {
        let class = RoadClass::from_tag(tag(tags, "highway")?);
        if !class.is_routable() {
            return None;
        }
        let surface = tag(tags, "surface").and_then(|s| s.parse().ok());
        let direction = edge_direction(tag(tags, "oneway"), tag(tags, "junction"));
        Some(Self { refs, class, surface, direction })
    }
}

fn tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Edge direction from the `oneway` and `junction` tags.
fn edge_direction(oneway: Option<&str>, junction: Option<&str>) -> EdgeDirection {
    match (oneway, junction) {
        (Some("yes" | "1" | "true"), _) | (_, Some("roundabout")) => EdgeDirection::LeftToRight,
        (Some("-1" | "reverse"), _) => EdgeDirection::RightToLeft,
        _ => EdgeDirection::Bidirectional,
    }
}
