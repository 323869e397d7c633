//! 3D points and axis-aligned bounding boxes.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::ops::Index;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

//==== Point3 =================================================================

/// A point in 3D Euclidean space.
///
/// `Point3` is a plain `Copy` value. Equality and hashing compare the
/// coordinate triple through [`OrderedFloat`], so `-0.0` and `0.0` collapse
/// and `NaN` coordinates compare equal to themselves.
///
/// # Examples
///
/// ```
/// use waygraph::point::Point3;
///
/// let p = Point3::new(3.0, 4.0, 0.0);
///
/// assert_eq!(p[0], 3.0);
/// assert_eq!(p.distance(Point3::new(0.0, 0.0, 0.0)), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point3) -> f64 {
        self.squared_distance(other).sqrt()
    }

    /// Squared Euclidean distance to `other`. Avoids the square root when
    /// only comparisons are needed.
    pub fn squared_distance(self, other: Point3) -> f64 {
        let (dx, dy, dz) = (self.x - other.x, self.y - other.y, self.z - other.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Sum of the per-axis coordinate deltas.
    pub fn manhattan_distance(self, other: Point3) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs() + (self.z - other.z).abs()
    }

    /// Largest per-axis coordinate delta.
    pub fn chebyshev_distance(self, other: Point3) -> f64 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }

    /// Projects this point onto the infinite line through `a` and `b` and
    /// returns the foot of the perpendicular. When `a` and `b` coincide the
    /// line is degenerate and `a` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use waygraph::point::Point3;
    ///
    /// let a = Point3::new(0.0, 0.0, 0.0);
    /// let b = Point3::new(2.0, 0.0, 0.0);
    /// let p = Point3::new(1.0, 3.0, 0.0);
    ///
    /// assert_eq!(p.project_on_line(a, b), Point3::new(1.0, 0.0, 0.0));
    /// ```
    pub fn project_on_line(self, a: Point3, b: Point3) -> Point3 {
        let (dx, dy, dz) = (b.x - a.x, b.y - a.y, b.z - a.z);
        let denom = dx * dx + dy * dy + dz * dz;
        if denom == 0.0 {
            return a;
        }
        let t = ((self.x - a.x) * dx + (self.y - a.y) * dy + (self.z - a.z) * dz) / denom;
        Point3::new(a.x + t * dx, a.y + t * dy, a.z + t * dz)
    }
}

impl Index<usize> for Point3 {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("axis index out of range: {}", axis),
        }
    }
}

impl PartialEq for Point3 {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.x) == OrderedFloat(other.x)
            && OrderedFloat(self.y) == OrderedFloat(other.y)
            && OrderedFloat(self.z) == OrderedFloat(other.z)
    }
}

impl Eq for Point3 {}

impl Hash for Point3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.x).hash(state);
        OrderedFloat(self.y).hash(state);
        OrderedFloat(self.z).hash(state);
    }
}

impl Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

//==== BoundingBox ============================================================

/// An axis-aligned box, produced by the bounding-box operations on nodes
/// and graphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// The box spanning a single point.
    pub fn at(point: Point3) -> Self {
        BoundingBox { min: point, max: point }
    }

    /// Grows the box to contain `point`.
    pub fn expand(&mut self, point: Point3) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// True when `point` lies inside the box or on its boundary.
    pub fn contains(&self, point: Point3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }
}
