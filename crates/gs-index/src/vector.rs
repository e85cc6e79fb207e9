//! k-dimensional point type.

use std::ops::Index;

use gs_core::NodeId;

/// A point with `dim()` real coordinates and the id of the graph node it
/// stands for.
///
/// Vectors are built transiently (index construction, queries) and never
/// mutated afterwards.  All vectors inside one [`KdTree`](crate::KdTree)
/// must share the same dimensionality.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub id: NodeId,
    pub components: Vec<f64>,
}

impl Vector {
    pub fn new(id: NodeId, components: Vec<f64>) -> Self {
        Self { id, components }
    }

    /// A 2-D point, the common case for projected map coordinates.
    pub fn planar(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, components: vec![x, y] }
    }

    /// A query point; the id is irrelevant and left `INVALID`.
    pub fn query(components: Vec<f64>) -> Self {
        Self { id: NodeId::INVALID, components }
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.components.len()
    }

    /// Squared Euclidean distance.
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn distance_squared(&self, other: &Vector) -> f64 {
        assert_eq!(
            self.dim(),
            other.dim(),
            "vector dimension mismatch: {} vs {}",
            self.dim(),
            other.dim()
        );
        self.components
            .iter()
            .zip(&other.components)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }

    /// Euclidean distance.
    ///
    /// # Panics
    /// Panics if the dimensions differ.
    pub fn distance(&self, other: &Vector) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, axis: usize) -> &f64 {
        &self.components[axis]
    }
}
