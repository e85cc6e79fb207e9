//! Travel modes, OSM road/surface classifications, and the speed table.
//!
//! The [`SpeedTable`] is configuration for the *ingestion* side: it turns a
//! road segment's class (and optionally its surface) into a speed so that
//! edge weights can be expressed as travel time.  The search core never
//! consults it; by the time a `Graph` reaches Dijkstra every edge already
//! carries its final weight.

use std::str::FromStr;

use crate::CoreError;

/// Generate a closed tag enum with `ALL`, `COUNT`, `as_str`, and `FromStr`
/// over the OSM tag spellings.
macro_rules! tag_enum {
    ($(#[$attr:meta])* $vis:vis enum $name:ident ($kind:literal) { $($variant:ident => $tag:literal,)+ }) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];
            pub const COUNT: usize = $name::ALL.len();

            /// The OSM tag value for this variant.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, CoreError> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(CoreError::UnknownTag { kind: $kind, value: s.to_owned() }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// The means of travel a speed table row applies to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TravelMode {
    #[default]
    Drive,
    Bike,
}

impl TravelMode {
    #[inline]
    fn row(self) -> usize {
        match self {
            TravelMode::Drive => 0,
            TravelMode::Bike => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Bike => "bike",
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

tag_enum! {
    /// OSM `highway=*` classification carried on edge metadata.
    pub enum RoadClass ("highway") {
        Motorway      => "motorway",
        MotorwayLink  => "motorway_link",
        Trunk         => "trunk",
        TrunkLink     => "trunk_link",
        Primary       => "primary",
        PrimaryLink   => "primary_link",
        Secondary     => "secondary",
        SecondaryLink => "secondary_link",
        Tertiary      => "tertiary",
        TertiaryLink  => "tertiary_link",
        Residential   => "residential",
        Unclassified  => "unclassified",
        LivingStreet  => "living_street",
        Service       => "service",
        Unknown       => "n/a",
    }
}

impl RoadClass {
    /// `true` for the road classes that ingestion turns into graph edges.
    ///
    /// `service` roads and anything unrecognised are excluded.
    pub fn is_routable(self) -> bool {
        !matches!(self, RoadClass::Service | RoadClass::Unknown)
    }

    /// Parse a tag value, mapping anything unrecognised to `Unknown`.
    pub fn from_tag(tag: &str) -> RoadClass {
        tag.to_ascii_lowercase().parse().unwrap_or(RoadClass::Unknown)
    }

    #[inline]
    fn column(self) -> usize {
        self as usize
    }
}

impl Default for RoadClass {
    fn default() -> Self {
        RoadClass::Unknown
    }
}

tag_enum! {
    /// OSM `surface=*` classification.
    pub enum Surface ("surface") {
        Bricks       => "bricks",
        Cement       => "cement",
        Clay         => "clay",
        Cobblestone  => "cobblestone",
        Compacted    => "compacted",
        Dirt         => "dirt",
        Earth        => "earth",
        FineGravel   => "fine_gravel",
        Grass        => "grass",
        GrassPaver   => "grass_paver",
        Gravel       => "gravel",
        Ground       => "ground",
        Metal        => "metal",
        Mud          => "mud",
        PavingStones => "paving_stones",
        Pebblestone  => "pebblestone",
        Rocky        => "rocky",
        Sand         => "sand",
        Sett         => "sett",
        Stone        => "stone",
        Tartan       => "tartan",
        Unpaved      => "unpaved",
        Wood         => "wood",
    }
}

/// Speed lookup keyed by `(TravelMode, RoadClass)` and `(TravelMode, Surface)`.
///
/// All speeds are km/h.  `None` means "no entry"; callers fall back to their
/// own default (ingestion uses `IngestConfig::default_speed_kmh`).
///
/// # Example
///
/// ```
/// use gs_core::{RoadClass, SpeedTable, TravelMode};
///
/// let mut speeds = SpeedTable::default();
/// assert_eq!(speeds.road_kmh(TravelMode::Drive, RoadClass::Motorway), Some(89.0));
/// speeds.set_road_kmh(TravelMode::Drive, RoadClass::Motorway, 100.0);
/// assert_eq!(speeds.road_kmh(TravelMode::Drive, RoadClass::Motorway), Some(100.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedTable {
    road:    [[Option<f64>; RoadClass::COUNT]; 2],
    surface: [[Option<f64>; Surface::COUNT]; 2],
}

impl SpeedTable {
    /// A table with no entries at all.
    pub fn empty() -> Self {
        Self {
            road:    [[None; RoadClass::COUNT]; 2],
            surface: [[None; Surface::COUNT]; 2],
        }
    }

    pub fn road_kmh(&self, mode: TravelMode, class: RoadClass) -> Option<f64> {
        self.road[mode.row()][class.column()]
    }

    pub fn surface_kmh(&self, mode: TravelMode, surface: Surface) -> Option<f64> {
        self.surface[mode.row()][surface as usize]
    }

    pub fn set_road_kmh(&mut self, mode: TravelMode, class: RoadClass, kmh: f64) {
        self.road[mode.row()][class.column()] = Some(kmh);
    }

    pub fn set_surface_kmh(&mut self, mode: TravelMode, surface: Surface, kmh: f64) {
        self.surface[mode.row()][surface as usize] = Some(kmh);
    }

    /// Effective speed for a segment: the road-class speed capped by the
    /// surface speed when both are known.
    pub fn segment_kmh(
        &self,
        mode: TravelMode,
        class: RoadClass,
        surface: Option<Surface>,
    ) -> Option<f64> {
        let road = self.road_kmh(mode, class);
        let surf = surface.and_then(|s| self.surface_kmh(mode, s));
        match (road, surf) {
            (Some(r), Some(s)) => Some(r.min(s)),
            (r, s) => r.or(s),
        }
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        use RoadClass as R;
        use Surface as S;
        use TravelMode::{Bike, Drive};

        let mut t = Self::empty();

        // (class, drive km/h, bike km/h)
        let roads: [(RoadClass, f64, f64); 14] = [
            (R::LivingStreet,  10.0, 10.0),
            (R::Motorway,      89.0, 60.0),
            (R::MotorwayLink,  45.0, 30.0),
            (R::Primary,       30.0, 30.0),
            (R::PrimaryLink,   30.0, 30.0),
            (R::Residential,   25.0, 20.0),
            (R::Secondary,     49.0, 40.0),
            (R::SecondaryLink, 25.0, 20.0),
            (R::Service,       15.0, 15.0),
            (R::Tertiary,      40.0, 30.0),
            (R::TertiaryLink,  20.0, 20.0),
            (R::Trunk,         73.0, 50.0),
            (R::TrunkLink,     40.0, 30.0),
            (R::Unclassified,  25.0, 20.0),
        ];
        for (class, drive, bike) in roads {
            t.set_road_kmh(Drive, class, drive);
            t.set_road_kmh(Bike, class, bike);
        }

        let surfaces: [(Surface, f64, f64); 23] = [
            (S::Bricks,       60.0, 20.0),
            (S::Cement,       80.0, 30.0),
            (S::Clay,         30.0, 10.0),
            (S::Cobblestone,  30.0, 10.0),
            (S::Compacted,    80.0, 30.0),
            (S::Dirt,         40.0, 15.0),
            (S::Earth,        20.0,  5.0),
            (S::FineGravel,   80.0, 30.0),
            (S::Grass,        40.0, 15.0),
            (S::GrassPaver,   40.0, 15.0),
            (S::Gravel,       40.0, 15.0),
            (S::Ground,       40.0, 15.0),
            (S::Metal,        60.0, 20.0),
            (S::Mud,          10.0,  5.0),
            (S::PavingStones, 60.0, 20.0),
            (S::Pebblestone,  40.0, 15.0),
            (S::Rocky,        20.0,  5.0),
            (S::Sand,         20.0,  5.0),
            (S::Sett,         40.0, 15.0),
            (S::Stone,        20.0,  5.0),
            (S::Tartan,       40.0, 15.0),
            (S::Unpaved,      40.0, 15.0),
            (S::Wood,         40.0, 15.0),
        ];
        for (surface, drive, bike) in surfaces {
            t.set_surface_kmh(Drive, surface, drive);
            t.set_surface_kmh(Bike, surface, bike);
        }

        t
    }
}

/// Travel time in minutes for `distance_m` metres at `speed_kmh`.
#[inline]
pub fn travel_minutes(distance_m: f64, speed_kmh: f64) -> f64 {
    distance_m / 1_000.0 / speed_kmh * 60.0
}
