//! `SpatialKey` — a fixed-precision, totally ordered encoding of a position.
//!
//! # Layout
//!
//! ```text
//!  63                32 31                 0
//! ┌────────────────────┬────────────────────┐
//! │ (lat + 90)  · 1e7  │ (lon + 180) · 1e7  │
//! └────────────────────┴────────────────────┘
//! ```
//!
//! Both halves fit in a `u32` (max 3.6e9 < 2^32).  Precision is 1e-7 degrees
//! (~1 cm at the equator).  The search core never looks inside a key; only
//! ingestion and path export decode it.

use crate::{CoreError, CoreResult, GeoPoint};

const SCALE: f64 = 1e7;

/// Opaque encoded geographic position stored on every graph node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpatialKey(pub u64);

impl SpatialKey {
    /// Encode `pos`, rejecting coordinates outside the WGS-84 range.
    pub fn from_geo(pos: GeoPoint) -> CoreResult<Self> {
        if !pos.is_valid() {
            return Err(CoreError::InvalidCoordinate { lat: pos.lat, lon: pos.lon });
        }
        let lat = ((pos.lat + 90.0) * SCALE).round() as u64;
        let lon = ((pos.lon + 180.0) * SCALE).round() as u64;
        Ok(SpatialKey((lat << 32) | lon))
    }

    /// Decode back to degrees.  Exact to within 1e-7 of the encoded value.
    pub fn to_geo(self) -> GeoPoint {
        let lat = (self.0 >> 32) as f64 / SCALE - 90.0;
        let lon = (self.0 & 0xFFFF_FFFF) as f64 / SCALE - 180.0;
        GeoPoint::new(lat, lon)
    }
}

impl TryFrom<GeoPoint> for SpatialKey {
    type Error = CoreError;
    fn try_from(pos: GeoPoint) -> CoreResult<Self> {
        Self::from_geo(pos)
    }
}

impl From<SpatialKey> for GeoPoint {
    fn from(key: SpatialKey) -> GeoPoint {
        key.to_geo()
    }
}
