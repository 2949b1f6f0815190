use std::collections::HashMap;

use crate::controller::ControllerId;
use crate::math::prelude::*;
use crate::spatial::{SceneObjectId, TransformProvider};

use super::{PickedObject, Picker};

/// Picks objects by casting each controller's ray against object-space
/// bounding boxes. Results are ordered by `hit_distance`.
#[derive(Debug, Default, Clone)]
pub struct BoundsPicker {
    bounds: HashMap<SceneObjectId, Aabb3<f32>>,
    rays: HashMap<ControllerId, Ray>,
}

impl BoundsPicker {
    pub fn new() -> Self {
        BoundsPicker::default()
    }

    /// Registers the object-space bounds of `object`.
    pub fn add_bounds(&mut self, object: SceneObjectId, bounds: Aabb3<f32>) {
        self.bounds.insert(object, bounds);
    }

    pub fn remove_bounds(&mut self, object: SceneObjectId) -> Option<Aabb3<f32>> {
        self.bounds.remove(&object)
    }

    /// Updates the world-space ray of `controller`, usually once per frame.
    pub fn set_ray(&mut self, controller: ControllerId, ray: Ray) {
        self.rays.insert(controller, ray);
    }

    /// Forgets the ray of `controller`, which picks nothing afterwards.
    pub fn remove_ray(&mut self, controller: ControllerId) -> Option<Ray> {
        self.rays.remove(&controller)
    }
}

impl Picker for BoundsPicker {
    fn pick(
        &self,
        controller: ControllerId,
        transforms: &dyn TransformProvider,
    ) -> Vec<PickedObject> {
        let ray = match self.rays.get(&controller) {
            Some(ray) => *ray,
            None => return Vec::new(),
        };

        let mut picks = Vec::new();
        for (&object, bounds) in &self.bounds {
            let local = match transforms.model_matrix(object) {
                Some(m) => match m.invert() {
                    Some(inv) => ray.transform(&inv),
                    None => continue,
                },
                None => ray,
            };

            if let Some(t) = local.intersect(bounds) {
                let hit = local.at(t);
                picks.push(PickedObject::new(object, hit.to_vec()).with_distance(t));
            }
        }

        picks.sort_by(|lhs, rhs| {
            lhs.hit_distance
                .partial_cmp(&rhs.hit_distance)
                .unwrap_or(::std::cmp::Ordering::Equal)
        });

        picks
    }
}
