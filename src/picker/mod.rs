//! Picking determines which scene objects intersect a controller's ray during
//! the current frame.
//!
//! Any picking backend could feed the sensors by implementing `Picker`, the
//! `BoundsPicker` shipped here tests rays against object-space bounding boxes.

mod bounds;
pub use self::bounds::BoundsPicker;

use crate::controller::ControllerId;
use crate::math::prelude::*;
use crate::spatial::{SceneObjectId, TransformProvider};

/// A single intersection between a controller and a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickedObject {
    /// The object being hit.
    pub target: SceneObjectId,
    /// The hit point in the object's local space.
    pub hit_location: Vector3<f32>,
    /// Distance from the ray origin to the hit point, in world units.
    pub hit_distance: f32,
}

impl PickedObject {
    pub fn new<T>(target: SceneObjectId, hit_location: T) -> Self
    where
        T: Into<Vector3<f32>>,
    {
        PickedObject {
            target,
            hit_location: hit_location.into(),
            hit_distance: 0.0,
        }
    }

    /// Sets the distance along the picking ray.
    #[inline]
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.hit_distance = distance;
        self
    }

    /// Returns true if every coordinate of the hit location is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.hit_location.x.is_finite()
            && self.hit_location.y.is_finite()
            && self.hit_location.z.is_finite()
    }
}

/// The picking service. Sensors never pick by themselves, they only consume
/// what a `Picker` reports for each controller once per frame.
pub trait Picker {
    /// Returns the objects intersected by `controller` in this frame.
    fn pick(&self, controller: ControllerId, transforms: &dyn TransformProvider)
        -> Vec<PickedObject>;
}
