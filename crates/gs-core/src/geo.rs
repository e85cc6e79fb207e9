//! Geographic coordinate type, great-circle distance, and planar projection.
//!
//! `GeoPoint` uses `f64` latitude/longitude so that the Web-Mercator round
//! trip (`to_mercator` → `from_mercator`) is lossless at street scale.  The
//! spatial index works in projected metres; edge weights come from the
//! haversine distance.

/// Mean Earth radius used by the haversine formula, metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Semi-major axis of the WGS-84 ellipsoid used by Web-Mercator, metres.
pub const MERCATOR_RADIUS_M: f64 = 6_378_137.0;

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` if latitude is in `[-90, 90]` and longitude in `[-180, 180]`.
    pub fn is_valid(self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Project onto the Web-Mercator plane.  Returns `(x, y)` in metres.
    ///
    /// Undefined at the poles (`y` diverges); road data never gets there.
    pub fn to_mercator(self) -> (f64, f64) {
        let phi = self.lat.to_radians();
        let lambda = self.lon.to_radians();
        let x = MERCATOR_RADIUS_M * lambda;
        let y = MERCATOR_RADIUS_M * (std::f64::consts::FRAC_PI_4 + phi / 2.0).tan().ln();
        (x, y)
    }

    /// Inverse of [`to_mercator`](Self::to_mercator).
    pub fn from_mercator(x: f64, y: f64) -> Self {
        let lambda = x / MERCATOR_RADIUS_M;
        let phi = 2.0 * (y / MERCATOR_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2;
        Self { lat: phi.to_degrees(), lon: lambda.to_degrees() }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
