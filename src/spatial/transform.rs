use std::collections::HashMap;

use crate::math::prelude::*;

use super::{SceneObjectId, TransformProvider};

/// `Transform` is used to store and manipulate the postiion, rotation and scale
/// of the object.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f32,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            scale: 1.0,
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        }
    }
}

impl Transform {
    /// Creates a transform that only translates.
    #[inline]
    pub fn from_position<T>(position: T) -> Self
    where
        T: Into<Vector3<f32>>,
    {
        Transform {
            position: position.into(),
            ..Default::default()
        }
    }

    /// Transforms points from local space to transform's space.
    #[inline]
    pub fn transform_point<T>(&self, v: T) -> Vector3<f32>
    where
        T: Into<Vector3<f32>>,
    {
        self.rotation * (v.into() * self.scale) + self.position
    }

    /// Returns the matrix representation.
    #[inline]
    pub fn matrix(&self) -> Matrix4<f32> {
        // M = T * R * S
        let m: Matrix3<_> = self.rotation.into();
        let mut m: Matrix4<_> = (m * self.scale).into();
        m.w = self.position.extend(1.0);
        m
    }
}

/// A flat table of world transforms, for callers that do not run a scene graph.
#[derive(Debug, Default, Clone)]
pub struct SceneTransforms {
    transforms: HashMap<SceneObjectId, Transform>,
}

impl SceneTransforms {
    pub fn new() -> Self {
        SceneTransforms::default()
    }

    /// Places `object` in world space, returns the previous placement.
    pub fn set(&mut self, object: SceneObjectId, transform: Transform) -> Option<Transform> {
        self.transforms.insert(object, transform)
    }

    pub fn get(&self, object: SceneObjectId) -> Option<Transform> {
        self.transforms.get(&object).cloned()
    }

    pub fn remove(&mut self, object: SceneObjectId) -> Option<Transform> {
        self.transforms.remove(&object)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl TransformProvider for SceneTransforms {
    fn model_matrix(&self, object: SceneObjectId) -> Option<Matrix4<f32>> {
        self.transforms.get(&object).map(Transform::matrix)
    }
}

/// Places every object at the origin.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransforms;

impl TransformProvider for IdentityTransforms {
    fn model_matrix(&self, _: SceneObjectId) -> Option<Matrix4<f32>> {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::Transform as _;

    #[test]
    fn matrix() {
        let mut transform = Transform::from_position([1.0, 2.0, 3.0]);
        transform.scale = 2.0;
        transform.rotation = Quaternion::from_angle_y(Deg(90.0));

        let v = transform.transform_point([1.0, 0.0, 0.0]);
        let m = transform.matrix().transform_point(Point3::new(1.0, 0.0, 0.0));
        assert!((v - m.to_vec()).magnitude() < 1e-5);
        assert!((v - Vector3::new(1.0, 2.0, 1.0)).magnitude() < 1e-5);
    }

    #[test]
    fn table() {
        let object = SceneObjectId::from_raw(3, 1);
        let mut transforms = SceneTransforms::new();
        assert!(transforms.model_matrix(object).is_none());

        transforms.set(object, Transform::from_position([0.0, 0.0, -2.0]));
        let m = transforms.model_matrix(object).unwrap();
        assert_eq!(m.w, Vector4::new(0.0, 0.0, -2.0, 1.0));

        transforms.remove(object);
        assert!(transforms.is_empty());
    }
}
