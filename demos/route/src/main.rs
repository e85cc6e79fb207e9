//! route — end-to-end example for the graph_search routing engine.
//!
//! Builds a small synthetic Medellín network (or, with `--features osm`,
//! loads an OSM PBF file), snaps two coordinates to their nearest routable
//! nodes, runs Dijkstra between them, and prints the result as JSON.
//!
//! ```text
//! route [FROM_LAT,FROM_LON TO_LAT,TO_LON]
//! route --features osm -- colombia.osm.pbf FROM_LAT,FROM_LON TO_LAT,TO_LON
//! ```
//!
//! Set `RUST_LOG=gs_graph=debug` to see per-search statistics on stderr.

mod network;

use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gs_core::{GeoPoint, NodeId};
use gs_graph::{Criteria, DijkstraSearch, Graph, search_many};

use network::{PLACES, build_network, place};

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Bello, north end of the valley.
const DEFAULT_FROM: GeoPoint = GeoPoint { lat: 6.3370, lon: -75.5585 };
/// Envigado, south end.
const DEFAULT_TO: GeoPoint = GeoPoint { lat: 6.1712, lon: -75.5868 };

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gs_graph=info")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    // 1. Graph.
    let t0 = Instant::now();
    let graph = load_graph(&mut args)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "graph ready"
    );

    // 2. Endpoints.
    let (from, to) = match args.as_slice() {
        [] => (DEFAULT_FROM, DEFAULT_TO),
        [a, b] => (parse_point(a)?, parse_point(b)?),
        _ => bail!("expected two coordinates as LAT,LON"),
    };

    // 3. Snap.
    let t1 = Instant::now();
    let index = graph.build_node_index();
    let (source, source_off) = index.snap(from).context("graph has no routable nodes")?;
    let (target, target_off) = index.snap(to).context("graph has no routable nodes")?;
    info!(
        indexed = index.len(),
        %source,
        %target,
        elapsed_ms = t1.elapsed().as_millis() as u64,
        "endpoints snapped"
    );

    // 4. Search.
    let t2 = Instant::now();
    let response = DijkstraSearch::new(&Criteria::between(source, target)).run(&graph);
    let search_ms = t2.elapsed().as_secs_f64() * 1_000.0;

    let cost = response.cost_to(target)?;
    let nodes = response.nodes_to(target)?;
    let path = response.path_to(target, &graph)?;
    let distance_m = response
        .tree
        .tree_id(target)
        .and_then(|t| response.tree.distance(t))
        .unwrap_or_default();

    let report = json!({
        "source":       { "node": source.0, "snap_m": source_off },
        "target":       { "node": target.0, "snap_m": target_off },
        "cost":         cost,
        "distance_m":   distance_m,
        "settled":      response.tree.len(),
        "termination":  format!("{:?}", response.termination),
        "search_ms":    search_ms,
        "nodes":        nodes.iter().map(|n| n.0).collect::<Vec<_>>(),
        "path":         path.iter().map(|p| [p.lat, p.lon]).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    // 5. Everyone to the centre, in parallel (synthetic network only).
    if let Some(centro) = place("centro").filter(|_| graph.node_count() == PLACES.len()) {
        let criteria: Vec<Criteria> = (0..PLACES.len())
            .map(|i| Criteria::between(NodeId(i as u32), centro))
            .collect();
        let responses = search_many(&graph, &criteria);

        println!();
        println!("{:<14} {:>10}", "From", "To centro");
        println!("{}", "-".repeat(25));
        for ((name, _, _), r) in PLACES.iter().zip(&responses) {
            match r.cost_to(centro) {
                Ok(c) => println!("{name:<14} {c:>6.1} min"),
                Err(_) => println!("{name:<14} {:>10}", "-"),
            }
        }
    }

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[cfg(feature = "osm")]
fn load_graph(args: &mut Vec<String>) -> Result<Graph> {
    use gs_graph::osm::{IngestConfig, Weighting, load_from_pbf};

    if args.first().is_some_and(|a| a.ends_with(".pbf")) {
        let path = std::path::PathBuf::from(args.remove(0));
        let config = IngestConfig { weighting: Weighting::TravelTime, ..IngestConfig::default() };
        return load_from_pbf(&path, &config)
            .with_context(|| format!("loading {}", path.display()));
    }
    build_network()
}

#[cfg(not(feature = "osm"))]
fn load_graph(_args: &mut Vec<String>) -> Result<Graph> {
    build_network()
}

/// Parse `"lat,lon"`.
fn parse_point(s: &str) -> Result<GeoPoint> {
    let (lat, lon) = s.split_once(',').with_context(|| format!("`{s}` is not LAT,LON"))?;
    let p = GeoPoint::new(lat.trim().parse()?, lon.trim().parse()?);
    if !p.is_valid() {
        bail!("`{s}` is outside the WGS-84 range");
    }
    Ok(p)
}
