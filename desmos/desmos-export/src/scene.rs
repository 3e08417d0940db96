//! In-memory scene collaborator.
//!
//! [`StaticScene`] holds named objects with a mesh and keyframed
//! transforms. It implements both [`MeshSource`] and [`TransformSampler`],
//! so it can drive an export without a host application, and it enforces
//! the same frame discipline a live scene needs: frames increase within a
//! sampling pass and [`TransformSampler::restore`] returns the scene to the
//! frame it started at.

use desmos_types::{
    MeshSource, PolygonMesh, Transform, TransformQuery, TransformSample, TransformSampler,
    TransformSpace,
};
use nalgebra::Vector3;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors reported by [`StaticScene`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// No object with this name.
    #[error("scene has no object named '{name}'")]
    UnknownObject {
        /// Requested name.
        name: String,
    },

    /// A pass asked for a frame at or before the previous one.
    #[error("frame {frame} requested after frame {previous}")]
    FrameOrder {
        /// Requested frame.
        frame: i32,
        /// Last frame sampled in this pass.
        previous: i32,
    },
}

/// Transforms of an object from `frame` onwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keyframe {
    /// Frame the keyframe takes effect.
    pub frame: i32,
    /// Raw channel values.
    pub local: Transform,
    /// Evaluated world transform.
    pub world: Transform,
}

impl Keyframe {
    /// Keyframe whose local and world transforms coincide.
    #[must_use]
    pub const fn unparented(frame: i32, transform: Transform) -> Self {
        Self {
            frame,
            local: transform,
            world: transform,
        }
    }
}

/// A named object of a [`StaticScene`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneObject {
    /// Unique object name.
    pub name: String,
    /// Mesh data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mesh: PolygonMesh,
    /// Keyframes, in any order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub keyframes: Vec<Keyframe>,
}

impl SceneObject {
    /// Object with a mesh and no animation.
    #[must_use]
    pub fn new(name: impl Into<String>, mesh: PolygonMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            keyframes: Vec::new(),
        }
    }

    /// Add a keyframe.
    #[must_use]
    pub fn with_keyframe(mut self, keyframe: Keyframe) -> Self {
        self.keyframes.push(keyframe);
        self
    }

    /// Keyframe in effect at `frame`.
    ///
    /// That is the last keyframe at or before `frame`, the earliest keyframe
    /// if all of them come later, and `None` without keyframes.
    #[must_use]
    pub fn keyframe_at(&self, frame: i32) -> Option<&Keyframe> {
        self.keyframes
            .iter()
            .filter(|k| k.frame <= frame)
            .max_by_key(|k| k.frame)
            .or_else(|| self.keyframes.iter().min_by_key(|k| k.frame))
    }

    /// Sample of `query` at `frame`.
    #[must_use]
    pub fn sample_at(&self, frame: i32, query: &TransformQuery) -> TransformSample {
        let Some(keyframe) = self.keyframe_at(frame) else {
            let rest = Transform::identity();
            return TransformSample {
                location: rest.location,
                rotation: Vector3::zeros(),
                scale: rest.scale,
            };
        };
        let pick = |space: TransformSpace| match space {
            TransformSpace::Local => &keyframe.local,
            TransformSpace::World => &keyframe.world,
        };
        let rotation = match query.rotation {
            TransformSpace::Local => keyframe.local.rotation,
            TransformSpace::World => keyframe.world.rotation_in(query.euler_order),
        };
        TransformSample {
            location: pick(query.location).location,
            rotation,
            scale: pick(query.scale).scale,
        }
    }
}

/// Named objects plus a current frame.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaticScene {
    objects: Vec<SceneObject>,
    #[cfg_attr(feature = "serde", serde(default))]
    current_frame: i32,
    #[cfg_attr(feature = "serde", serde(skip))]
    pass: Option<SamplingState>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SamplingState {
    home_frame: i32,
    last_frame: i32,
}

impl StaticScene {
    /// Empty scene at frame 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, replacing any object with the same name.
    #[must_use]
    pub fn with_object(mut self, object: SceneObject) -> Self {
        self.insert(object);
        self
    }

    /// Add an object, replacing any object with the same name.
    pub fn insert(&mut self, object: SceneObject) {
        match self.objects.iter_mut().find(|o| o.name == object.name) {
            Some(existing) => *existing = object,
            None => self.objects.push(object),
        }
    }

    /// Parse a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` does not describe a scene.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Object named `name`.
    #[must_use]
    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// Object names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.name.as_str())
    }

    /// Frame the scene is at.
    #[must_use]
    pub const fn current_frame(&self) -> i32 {
        self.current_frame
    }

    /// Move the scene to `frame` outside a sampling pass.
    pub const fn set_frame(&mut self, frame: i32) {
        self.current_frame = frame;
    }

    fn require(&self, name: &str) -> Result<&SceneObject, SceneError> {
        self.object(name).ok_or_else(|| SceneError::UnknownObject {
            name: name.to_string(),
        })
    }
}

impl MeshSource for StaticScene {
    type Error = SceneError;

    fn mesh(&self, object: &str, triangulate: bool) -> Result<PolygonMesh, SceneError> {
        let object = self.require(object)?;
        Ok(if triangulate {
            object.mesh.triangulated()
        } else {
            object.mesh.clone()
        })
    }
}

impl TransformSampler for StaticScene {
    type Error = SceneError;

    fn sample(
        &mut self,
        object: &str,
        frame: i32,
        query: &TransformQuery,
    ) -> Result<TransformSample, SceneError> {
        if let Some(pass) = self.pass {
            if frame <= pass.last_frame {
                return Err(SceneError::FrameOrder {
                    frame,
                    previous: pass.last_frame,
                });
            }
        }
        let sample = self.require(object)?.sample_at(frame, query);
        let home_frame = self.pass.map_or(self.current_frame, |p| p.home_frame);
        self.pass = Some(SamplingState {
            home_frame,
            last_frame: frame,
        });
        self.current_frame = frame;
        Ok(sample)
    }

    fn restore(&mut self) {
        if let Some(pass) = self.pass.take() {
            self.current_frame = pass.home_frame;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use desmos_types::{EulerOrder, Point3};

    fn moving(name: &str) -> SceneObject {
        let at = |x: f64| Transform {
            location: Vector3::new(x, 0.0, 0.0),
            ..Transform::identity()
        };
        SceneObject::new(name, PolygonMesh::new())
            .with_keyframe(Keyframe::unparented(10, at(10.0)))
            .with_keyframe(Keyframe::unparented(1, at(1.0)))
    }

    #[test]
    fn test_constant_interpolation() {
        let object = moving("Ball");
        let query = TransformQuery::default();
        assert_relative_eq!(object.sample_at(0, &query).location.x, 1.0);
        assert_relative_eq!(object.sample_at(5, &query).location.x, 1.0);
        assert_relative_eq!(object.sample_at(10, &query).location.x, 10.0);
        assert_relative_eq!(object.sample_at(99, &query).location.x, 10.0);
    }

    #[test]
    fn test_no_keyframes_is_rest_pose() {
        let object = SceneObject::new("Still", PolygonMesh::new());
        let sample = object.sample_at(3, &TransformQuery::default());
        assert_eq!(sample.location, Vector3::zeros());
        assert_eq!(sample.scale, Vector3::repeat(1.0));
    }

    #[test]
    fn test_world_rotation_uses_order() {
        let world = Transform {
            rotation: Vector3::new(0.3, -0.2, 0.9),
            ..Transform::identity()
        };
        let object = SceneObject::new("Arm", PolygonMesh::new()).with_keyframe(Keyframe {
            frame: 1,
            local: Transform::identity(),
            world,
        });
        let query = TransformQuery {
            rotation: TransformSpace::World,
            euler_order: EulerOrder::ZXY,
            ..TransformQuery::default()
        };
        let angles = object.sample_at(1, &query).rotation;
        let expected = EulerOrder::XYZ.compose(&world.rotation);
        let got = EulerOrder::ZXY.compose(&angles);
        assert_relative_eq!(got.matrix(), expected.matrix(), epsilon = 1e-9);

        let local = object.sample_at(1, &TransformQuery::default()).rotation;
        assert_eq!(local, Vector3::zeros());
    }

    #[test]
    fn test_pass_restores_frame() {
        let mut scene = StaticScene::new().with_object(moving("Ball"));
        scene.set_frame(42);
        let query = TransformQuery::default();
        assert!(scene.sample("Ball", 1, &query).is_ok());
        assert!(scene.sample("Ball", 2, &query).is_ok());
        assert_eq!(scene.current_frame(), 2);

        let err = scene.sample("Ball", 2, &query);
        assert_eq!(
            err,
            Err(SceneError::FrameOrder {
                frame: 2,
                previous: 2
            })
        );

        scene.restore();
        assert_eq!(scene.current_frame(), 42);
        assert!(scene.sample("Ball", 1, &query).is_ok());
    }

    #[test]
    fn test_unknown_object() {
        let mut scene = StaticScene::new();
        let err = scene.sample("Ghost", 1, &TransformQuery::default());
        assert!(matches!(err, Err(SceneError::UnknownObject { .. })));
        assert!(scene.mesh("Ghost", false).is_err());
        scene.restore();
        assert_eq!(scene.current_frame(), 0);
    }

    #[test]
    fn test_mesh_triangulation() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ];
        let mesh = PolygonMesh::from_polygons(vertices, vec![vec![0, 1, 2, 3]]).unwrap_or_default();
        let scene = StaticScene::new().with_object(SceneObject::new("Quad", mesh));
        assert_eq!(scene.mesh("Quad", false).map(|m| m.max_corners()), Ok(4));
        assert_eq!(scene.mesh("Quad", true).map(|m| m.polygon_count()), Ok(2));
    }

    #[test]
    fn test_insert_replaces_by_name() {
        let scene = StaticScene::new()
            .with_object(moving("Ball"))
            .with_object(SceneObject::new("Ball", PolygonMesh::new()));
        assert_eq!(scene.names().count(), 1);
        assert!(scene.object("Ball").is_some_and(|o| o.keyframes.is_empty()));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "objects": [
                {
                    "name": "Tri",
                    "mesh": {
                        "vertices": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                        "polygons": []
                    }
                }
            ],
            "current_frame": 7
        }"#;
        let scene = StaticScene::from_json(json);
        assert!(scene.is_ok());
        let scene = scene.unwrap_or_default();
        assert_eq!(scene.current_frame(), 7);
        assert_eq!(scene.object("Tri").map(|o| o.mesh.vertex_count()), Some(3));
    }
}
