//! This module contains the math utils that mainly comes from `cgmath`.

pub use cgmath::*;

pub mod aabb;
pub mod ray;

pub mod prelude {
    pub use cgmath::prelude::*;
    pub use cgmath::{Deg, Matrix3, Matrix4, Point3, Quaternion, Rad, Vector3, Vector4};

    pub use super::aabb::Aabb3;
    pub use super::ray::Ray;
}
