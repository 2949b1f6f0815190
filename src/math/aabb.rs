//! Axis-aligned bounding boxes
//!
//! An AABB is a rectangular prism where every face is aligned with one of the
//! coordinate planes. Pickers use them as cheap stand-ins for object geometry.

use std::fmt;

use cgmath::{BaseFloat, Point3, Vector3};

/// A three-dimensional AABB, aka a rectangular prism.
#[derive(Serialize, Deserialize, Copy, Clone, PartialEq)]
pub struct Aabb3<S> {
    /// Minimum point of the AABB
    pub min: Point3<S>,
    /// Maximum point of the AABB
    pub max: Point3<S>,
}

impl<S: BaseFloat> Aabb3<S> {
    /// Construct a new axis-aligned bounding box from two points.
    #[inline]
    pub fn new(p1: Point3<S>, p2: Point3<S>) -> Aabb3<S> {
        Aabb3 {
            min: Point3::new(p1.x.min(p2.x), p1.y.min(p2.y), p1.z.min(p2.z)),
            max: Point3::new(p1.x.max(p2.x), p1.y.max(p2.y), p1.z.max(p2.z)),
        }
    }

    /// Construct a box centered at `center` with half extents `extents`.
    #[inline]
    pub fn from_center(center: Point3<S>, extents: Vector3<S>) -> Aabb3<S> {
        Aabb3::new(center - extents, center + extents)
    }

    /// Return the dimensions of this AABB.
    #[inline]
    pub fn dim(&self) -> Vector3<S> {
        self.max - self.min
    }

    /// Return the center point of this AABB.
    #[inline]
    pub fn center(&self) -> Point3<S> {
        let two = S::one() + S::one();
        self.min + self.dim() / two
    }

    /// Returns true if `p` lies inside or on the boundary of this AABB.
    #[inline]
    pub fn contains(&self, p: Point3<S>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

impl<S: BaseFloat> fmt::Debug for Aabb3<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{:?} - {:?}]", self.min, self.max)
    }
}
