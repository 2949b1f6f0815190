//! Scene object identities and their placements in world space.
//!
//! The sensors do not own a scene graph. Whoever does implements
//! `TransformProvider` so hit points could be brought into world space when
//! events are ordered by depth.

pub mod transform;

pub mod prelude {
    pub use super::transform::{IdentityTransforms, SceneTransforms, Transform};
    pub use super::{SceneObjectId, TransformProvider};
}

use crate::math::Matrix4;

impl_handle!(SceneObjectId);

/// Supplies the current model matrix of scene objects.
pub trait TransformProvider {
    /// Returns the local-to-world matrix of `object`, `None` if the object has
    /// no placement, in which case it is treated as sitting at the origin.
    fn model_matrix(&self, object: SceneObjectId) -> Option<Matrix4<f32>>;
}

impl<F> TransformProvider for F
where
    F: Fn(SceneObjectId) -> Option<Matrix4<f32>>,
{
    fn model_matrix(&self, object: SceneObjectId) -> Option<Matrix4<f32>> {
        (self)(object)
    }
}
