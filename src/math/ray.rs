use cgmath::prelude::*;
use cgmath::{Matrix4, Point3, Vector3};

use super::aabb::Aabb3;

/// A half-line starting at `origin` and heading towards `direction`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray, the direction is normalized. Returns `None` for a
    /// degenerated direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Option<Self> {
        let len = direction.magnitude();
        if !len.is_finite() || len <= ::std::f32::EPSILON {
            return None;
        }

        Some(Ray {
            origin,
            direction: direction / len,
        })
    }

    /// Returns the point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Transforms this ray with an affine matrix. The direction is kept
    /// unnormalized so ray parameters stay comparable between both spaces.
    pub fn transform(&self, m: &Matrix4<f32>) -> Ray {
        Ray {
            origin: m.transform_point(self.origin),
            direction: m.transform_vector(self.direction),
        }
    }

    /// Slab test. Returns the smallest non-negative ray parameter inside
    /// `aabb`, which is zero if the origin is enclosed.
    pub fn intersect(&self, aabb: &Aabb3<f32>) -> Option<f32> {
        let mut near = ::std::f32::NEG_INFINITY;
        let mut far = ::std::f32::INFINITY;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if d.abs() <= ::std::f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let mut t1 = (lo - o) / d;
            let mut t2 = (hi - o) / d;
            if t1 > t2 {
                ::std::mem::swap(&mut t1, &mut t2);
            }

            near = near.max(t1);
            far = far.min(t2);
            if near > far {
                return None;
            }
        }

        if far < 0.0 {
            None
        } else {
            Some(near.max(0.0))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn intersect() {
        let aabb = Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0));

        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 2.0)).unwrap();
        assert_eq!(ray.intersect(&aabb), Some(4.0));

        let ray = Ray::new(Point3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(ray.intersect(&aabb), None);

        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
        assert_eq!(ray.intersect(&aabb), Some(0.0));

        let ray = Ray::new(Point3::new(3.0, 0.0, -5.0), Vector3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(ray.intersect(&aabb), None);
    }

    #[test]
    fn degenerated() {
        assert!(Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0)).is_none());
    }
}
