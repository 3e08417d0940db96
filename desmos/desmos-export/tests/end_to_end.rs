//! End-to-end export tests through `StaticScene`.
//!
//! Each test builds a small scene, exports it and checks the finished
//! document the way a user pasting it into the calculator would see it.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use desmos_export::{
    AnimationParams, AxisSet, ChannelParams, ExportError, ExportParams, FrameRange, Keyframe,
    MeshSource, NamingMode, Point3, PolygonMesh, Precision, RotationUnit, SceneObject, StaticScene,
    TitleOverride, Transform, TransformQuery, TransformSample, TransformSampler, Vector3,
    export, export_scene,
};

// =============================================================================
// Scene Fixtures
// =============================================================================

fn triangle() -> PolygonMesh {
    PolygonMesh::from_polygons(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.5, 0.0, 0.25),
            Point3::new(0.0, -2.0, 1.0),
        ],
        vec![vec![0, 1, 2]],
    )
    .unwrap()
}

fn pentagon() -> PolygonMesh {
    let vertices = (0..5)
        .map(|i| {
            let angle = f64::from(i) * std::f64::consts::TAU / 5.0;
            Point3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    PolygonMesh::from_polygons(vertices, vec![vec![0, 1, 2, 3, 4]]).unwrap()
}

fn pentagon_with_triangle() -> PolygonMesh {
    let mut mesh = pentagon();
    mesh.add_polygon(vec![0, 1, 2], 1).unwrap();
    mesh
}

fn text_body(contents: &str) -> &str {
    contents.split_once("*/\n\n").map(|(_, body)| body).unwrap()
}

fn line_value<'a>(contents: &'a str, identifier: &str) -> Option<&'a str> {
    contents
        .lines()
        .find_map(|line| line.strip_prefix(identifier)?.strip_prefix('='))
}

// =============================================================================
// Text Documents
// =============================================================================

#[test]
fn vertices_only_xy_sequential_text() {
    let mut scene = StaticScene::new().with_object(SceneObject::new("Tri", triangle()));
    let mut params = ExportParams::default().with_axes(AxisSet::new(true, true, false));
    params.geometry.faces = false;

    let document = export_scene(&mut scene, ["Tri"], &params, None).unwrap();

    assert_eq!(
        text_body(&document.contents),
        "Tri\nx_{1}=\\left[0,1.5,0\\right]\ny_{1}=\\left[0,0,-2\\right]\n\n"
    );
    assert!(!document.contents.contains("z_{"));
    assert!(!document.face_too_large);
}

#[test]
fn large_face_padded_and_flagged() {
    let mut scene = StaticScene::new()
        .with_object(SceneObject::new("Shape", pentagon_with_triangle()))
        .with_object(SceneObject::new("Tri", triangle()));

    let document =
        export_scene(&mut scene, ["Shape", "Tri"], &ExportParams::default(), None).unwrap();
    let contents = &document.contents;

    assert!(document.face_too_large);
    assert!(document.warning().is_some());
    assert_eq!(line_value(contents, "f_{3Faces1}"), Some("\\left[3,3\\right]"));
    assert_eq!(
        line_value(contents, "f_{4Faces1}"),
        Some("\\left[4,\\infty\\right]")
    );
    assert_eq!(
        line_value(contents, "f_{5Faces1}"),
        Some("\\left[5,\\infty\\right]")
    );
    assert_eq!(line_value(contents, "f_{3Faces2}"), Some("\\left[3\\right]"));
    assert!(line_value(contents, "f_{4Faces2}").is_none());
}

#[test]
fn triangulation_clears_warning() {
    let mut scene = StaticScene::new().with_object(SceneObject::new("Pent", pentagon()));
    let mut params = ExportParams::default();
    params.geometry.triangulate = true;

    let document = export_scene(&mut scene, ["Pent"], &params, None).unwrap();

    assert!(!document.face_too_large);
    assert_eq!(document.warning(), None);
    assert_eq!(
        line_value(&document.contents, "f_{1}"),
        Some("\\left[1,1,1\\right]")
    );
    assert!(line_value(&document.contents, "f_{4}").is_none());
}

#[test]
fn by_name_identifiers() {
    let mut scene = StaticScene::new()
        .with_object(SceneObject::new("left wheel", triangle()))
        .with_object(SceneObject::new("Left-Wheel", triangle()));
    let params = ExportParams::default().with_naming(NamingMode::ByName);

    let document =
        export_scene(&mut scene, ["left wheel", "Left-Wheel"], &params, None).unwrap();

    assert!(line_value(&document.contents, "x_{Leftwheel}").is_some());
    assert!(line_value(&document.contents, "x_{LeftWheel}").is_some());
    assert!(line_value(&document.contents, "f_{1Leftwheel}").is_some());
}

#[test]
fn by_name_collision_gets_suffix() {
    let mut scene = StaticScene::new()
        .with_object(SceneObject::new("Cube.001", triangle()))
        .with_object(SceneObject::new("Cube 001", triangle()));
    let params = ExportParams::default().with_naming(NamingMode::ByName);

    let document = export_scene(&mut scene, ["Cube.001", "Cube 001"], &params, None).unwrap();

    assert!(line_value(&document.contents, "x_{Cube001}").is_some());
    assert!(line_value(&document.contents, "x_{Cube0012}").is_some());
}

fn assigned_identifiers(contents: &str) -> Vec<&str> {
    text_body(contents)
        .lines()
        .filter_map(|line| line.split_once('=').map(|(identifier, _)| identifier))
        .collect()
}

fn assert_identifiers_distinct(contents: &str) {
    let identifiers = assigned_identifiers(contents);
    let distinct: HashSet<&str> = identifiers.iter().copied().collect();
    assert_eq!(distinct.len(), identifiers.len(), "{contents}");
}

#[test]
fn by_name_label_overlap_keeps_identifiers_distinct() {
    let mut scene = StaticScene::new()
        .with_object(SceneObject::new("Cube", triangle()))
        .with_object(SceneObject::new("Location Cube", triangle()));
    let params = ExportParams::default()
        .with_naming(NamingMode::ByName)
        .with_animation(AnimationParams::over(FrameRange::new(1, 2, 1)));

    let document = export_scene(&mut scene, ["Cube", "Location Cube"], &params, None).unwrap();
    let contents = &document.contents;

    assert_identifiers_distinct(contents);
    assert_eq!(
        line_value(contents, "x_{LocationCube}"),
        Some("\\left[0,0\\right]")
    );
    assert_eq!(
        line_value(contents, "x_{LocationCube2}"),
        Some("\\left[0,1.5,0\\right]")
    );
}

#[test]
fn by_name_digit_overlap_keeps_face_columns_distinct() {
    let ring = |n: u32| {
        let vertices = (0..n)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::TAU / f64::from(n);
                Point3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();
        PolygonMesh::from_polygons(vertices, vec![(0..n).collect()]).unwrap()
    };
    let mut scene = StaticScene::new()
        .with_object(SceneObject::new("Cube", ring(11)))
        .with_object(SceneObject::new("1 Cube", triangle()));
    let params = ExportParams::default().with_naming(NamingMode::ByName);

    let document = export_scene(&mut scene, ["Cube", "1 Cube"], &params, None).unwrap();
    let contents = &document.contents;

    assert_identifiers_distinct(contents);
    assert_eq!(line_value(contents, "f_{11Cube}"), Some("\\left[11\\right]"));
    assert_eq!(line_value(contents, "f_{11Cube2}"), Some("\\left[1\\right]"));
}

#[test]
fn midpoints_qualify_vertices_and_attach_normals() {
    let mut scene = StaticScene::new().with_object(SceneObject::new("Tri", triangle()));
    let mut params = ExportParams::default().with_precision(Precision::Full);
    params.geometry.midpoints = true;
    params.geometry.normals = true;
    params.geometry.attach_normals = true;
    params.geometry.materials = true;

    let document = export_scene(&mut scene, ["Tri"], &params, None).unwrap();
    let contents = &document.contents;

    assert!(line_value(contents, "x_{1}").is_none());
    assert_eq!(
        line_value(contents, "x_{Vertices1}"),
        Some("\\left[0,1.5,0\\right]")
    );
    assert_eq!(line_value(contents, "x_{Midpoints1}"), Some("\\left[.5\\right]"));
    assert_eq!(line_value(contents, "m_{Materials1}"), Some("\\left[0\\right]"));

    let mesh = scene.mesh("Tri", false).unwrap();
    let polygon = &mesh.polygons[0];
    let attached_z = polygon.normal.z * 0.01 + polygon.center.z;
    let written: f64 = line_value(contents, "z_{Normals1}")
        .and_then(|v| v.strip_prefix("\\left["))
        .and_then(|v| v.strip_suffix("\\right]"))
        .unwrap()
        .parse()
        .unwrap();
    assert_relative_eq!(written, attached_z, epsilon = 1e-12);
}

// =============================================================================
// Structured Documents
// =============================================================================

#[test]
fn structured_title_override() {
    let mut scene = StaticScene::new().with_object(SceneObject::new("Tri", triangle()));
    let stamp = NaiveDate::from_ymd_opt(2026, 10, 14)
        .and_then(|d| d.and_hms_opt(16, 2, 9))
        .unwrap();
    let title = TitleOverride::new("tri.json", stamp);

    let document =
        export_scene(&mut scene, ["Tri"], &ExportParams::structured(), Some(&title)).unwrap();
    let contents = &document.contents;

    assert_eq!(document.extension(), "json");
    assert!(contents.contains(r#""title": "`tri.json`\n(Wed Oct 14 16:02:09 2026)""#));
    assert!(!contents.contains("Blender Import"));
    assert!(!contents.contains("\"Calc.controller.generateId()\""));
    assert!(!contents.contains("\"folderId\": \"folderId\""));
    assert!(!contents.contains('#'));
    assert!(contents.contains(r#""id": folderId"#));
    assert!(contents.contains(r#""folderId": folderId"#));
    assert!(contents.contains(r#""latex": "f_{3}", "values": ["3"]"#));
    assert!(contents.ends_with("Calc.setState(state);"));
}

#[test]
fn structured_face_padding_is_escaped() {
    let mut scene = StaticScene::new()
        .with_object(SceneObject::new("Shape", pentagon_with_triangle()))
        .with_object(SceneObject::new("Tri", triangle()));
    let column = |latex: &str, values: &str| {
        format!(
            concat!(
                r#"{{"latex": "{}", "values": [{}], "hidden": true, "#,
                r#""id": Calc.controller.generateId()}}"#,
            ),
            latex, values
        )
    };

    let document =
        export_scene(&mut scene, ["Shape", "Tri"], &ExportParams::structured(), None).unwrap();
    let contents = &document.contents;

    assert!(document.face_too_large);
    assert!(contents.contains(&column("f_{3Faces1}", r#""3", "3""#)));
    assert!(contents.contains(&column("f_{4Faces1}", r#""4", "\\infty""#)));
    assert!(contents.contains(&column("f_{5Faces1}", r#""5", "\\infty""#)));
    assert!(contents.contains(&column("f_{3Faces2}", r#""3""#)));
    assert!(!contents.contains("f_{4Faces2}"));
    assert!(!contents.contains(r#""\\infty", "#));
}

#[test]
fn structured_names_are_escaped() {
    let mut scene =
        StaticScene::new().with_object(SceneObject::new("say \"hi\"", triangle()));
    let document = export_scene(
        &mut scene,
        ["say \"hi\""],
        &ExportParams::structured(),
        None,
    )
    .unwrap();
    assert!(document.contents.contains(r#""text": "\"say \"hi\"\"""#));
}

// =============================================================================
// Animation
// =============================================================================

fn spinning() -> SceneObject {
    let at = |frame: i32, x: f64, angle: f64| {
        Keyframe::unparented(
            frame,
            Transform {
                location: Vector3::new(x, 0.0, 0.0),
                rotation: Vector3::new(0.0, 0.0, angle),
                scale: Vector3::repeat(2.0),
            },
        )
    };
    SceneObject::new("Spinner", PolygonMesh::new())
        .with_keyframe(at(1, 0.0, 0.0))
        .with_keyframe(at(3, 4.0, std::f64::consts::FRAC_PI_2))
        .with_keyframe(at(5, 8.0, std::f64::consts::PI))
}

#[test]
fn animation_channels_in_degrees() {
    let mut scene = StaticScene::new().with_object(spinning());
    scene.set_frame(17);
    let params = ExportParams::animation_only().with_animation(AnimationParams {
        frames: FrameRange::new(1, 5, 2),
        location: ChannelParams::local(AxisSet::new(true, false, false)),
        rotation: ChannelParams::local(AxisSet::new(false, false, true)),
        scale: ChannelParams::local(AxisSet::new(false, true, false)),
        rotation_unit: RotationUnit::Degrees,
        ..AnimationParams::over(FrameRange::default())
    });

    let document = export_scene(&mut scene, ["Spinner"], &params, None).unwrap();
    let contents = &document.contents;

    assert_eq!(
        text_body(contents),
        "Spinner\n\
         x_{Location1}=\\left[0,4,8\\right]\n\
         z_{Rotation1}=\\left[0,90,180\\right]\n\
         y_{Scale1}=\\left[2,2,2\\right]\n\n"
    );
    assert_eq!(scene.current_frame(), 17);
}

#[test]
fn end_before_start_samples_once() {
    let mut scene = StaticScene::new().with_object(spinning());
    let params = ExportParams::animation_only()
        .with_animation(AnimationParams::over(FrameRange {
            start: 3,
            end: 1,
            step: 0,
        }));

    let document = export_scene(&mut scene, ["Spinner"], &params, None).unwrap();

    assert_eq!(
        line_value(&document.contents, "x_{Location1}"),
        Some("\\left[4\\right]")
    );
}

/// Sampler that fails at one frame and counts restores.
struct FailingSampler {
    fail_at: i32,
    sampled: Vec<i32>,
    restores: usize,
}

#[derive(Debug)]
struct FrameUnavailable(i32);

impl std::fmt::Display for FrameUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame {} cannot be evaluated", self.0)
    }
}

impl std::error::Error for FrameUnavailable {}

impl TransformSampler for FailingSampler {
    type Error = FrameUnavailable;

    fn sample(
        &mut self,
        _object: &str,
        frame: i32,
        _query: &TransformQuery,
    ) -> Result<TransformSample, FrameUnavailable> {
        if frame == self.fail_at {
            return Err(FrameUnavailable(frame));
        }
        self.sampled.push(frame);
        Ok(TransformSample {
            location: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::repeat(1.0),
        })
    }

    fn restore(&mut self) {
        self.restores += 1;
    }
}

#[test]
fn sampler_failure_aborts_and_restores() {
    let meshes = StaticScene::new().with_object(SceneObject::new("Tri", triangle()));
    let mut sampler = FailingSampler {
        fail_at: 4,
        sampled: Vec::new(),
        restores: 0,
    };
    let params = ExportParams::default()
        .with_animation(AnimationParams::over(FrameRange::new(1, 10, 1)));

    let result = export(["Tri"], &meshes, &mut sampler, &params, None);

    match result {
        Err(ExportError::Scene { object, source }) => {
            assert_eq!(object, "Tri");
            assert_eq!(source.to_string(), "frame 4 cannot be evaluated");
        }
        other => panic!("expected a scene error, got {other:?}"),
    }
    assert_eq!(sampler.sampled, vec![1, 2, 3]);
    assert_eq!(sampler.restores, 1);
}

#[test]
fn each_object_gets_its_own_pass() {
    let meshes = StaticScene::new()
        .with_object(SceneObject::new("A", PolygonMesh::new()))
        .with_object(SceneObject::new("B", PolygonMesh::new()));
    let mut sampler = FailingSampler {
        fail_at: i32::MAX,
        sampled: Vec::new(),
        restores: 0,
    };
    let params = ExportParams::animation_only()
        .with_animation(AnimationParams::over(FrameRange::new(1, 3, 1)));

    let document = export(["A", "B"], &meshes, &mut sampler, &params, None).unwrap();

    assert_eq!(document.object_count, 2);
    assert_eq!(sampler.sampled, vec![1, 2, 3, 1, 2, 3]);
    assert_eq!(sampler.restores, 2);
}
