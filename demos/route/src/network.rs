//! Synthetic Medellín road network.
//!
//! Eight intersections loosely placed on the Aburrá valley: the Avenida
//! Regional runs north-south along the river, El Poblado and Laureles sit on
//! either side, and a one-way loop closes the centre.  Edge weights are
//! travel minutes at the default drive speeds; distances are great-circle.

use anyhow::Result;

use gs_core::travel::travel_minutes;
use gs_core::{GeoPoint, NodeId, RoadClass, SpatialKey, SpeedTable, TravelMode};
use gs_graph::{EdgeDirection, EdgeMeta, Graph};

/// Named intersections, in insertion order.
pub const PLACES: [(&str, f64, f64); 8] = [
    ("bello",          6.3373, -75.5580),
    ("caribe",         6.2786, -75.5706),
    ("centro",         6.2518, -75.5636),
    ("laureles",       6.2442, -75.5950),
    ("estadio",        6.2527, -75.5900),
    ("poblado",        6.2100, -75.5700),
    ("industriales",   6.2235, -75.5780),
    ("envigado",       6.1710, -75.5870),
];

/// Build the network.  Node `i` is `PLACES[i]`.
pub fn build_network() -> Result<Graph> {
    let mut g = Graph::with_capacity(PLACES.len());
    let ids: Vec<NodeId> = PLACES
        .iter()
        .map(|&(_, lat, lon)| Ok(g.add_node(SpatialKey::from_geo(GeoPoint::new(lat, lon))?)))
        .collect::<Result<_>>()?;

    use EdgeDirection::{Bidirectional, LeftToRight};
    use RoadClass::{Primary, Residential, Secondary, Trunk};

    let roads = [
        (0, 1, Trunk,       Bidirectional),
        (1, 6, Trunk,       Bidirectional),
        (6, 7, Trunk,       Bidirectional),
        (1, 2, Primary,     Bidirectional),
        (2, 4, Secondary,   Bidirectional),
        (4, 3, Residential, Bidirectional),
        (3, 6, Secondary,   Bidirectional),
        (2, 5, Primary,     LeftToRight),
        (5, 6, Secondary,   Bidirectional),
        (5, 7, Primary,     Bidirectional),
    ];

    let speeds = SpeedTable::default();
    for (a, b, class, dir) in roads {
        let (a, b) = (ids[a], ids[b]);
        let distance_m = position(a).distance_m(position(b));
        let speed_kmh = speeds.segment_kmh(TravelMode::Drive, class, None).unwrap_or(50.0);
        let meta = EdgeMeta {
            speed_kmh:  speed_kmh as f32,
            distance_m: distance_m as f32,
            road:       class,
        };
        g.relate(a, b, travel_minutes(distance_m, speed_kmh) as f32, dir, meta)?;
    }

    Ok(g)
}

/// Node id of the place called `name`.
pub fn place(name: &str) -> Option<NodeId> {
    PLACES.iter().position(|&(n, _, _)| n == name).map(|i| NodeId(i as u32))
}

fn position(id: NodeId) -> GeoPoint {
    let (_, lat, lon) = PLACES[id.index()];
    GeoPoint::new(lat, lon)
}
