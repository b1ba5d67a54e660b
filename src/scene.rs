use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{ Serialize, Deserialize };

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::consts::{ CANVAS_WIDTH, CANVAS_HEIGHT, FIELD_OF_VIEW,
    SPHERE_CENTER, SPHERE_RADIUS };
use crate::error::SceneError;
use crate::geometry::Sphere;
use crate::parallel::parallel_render;
use crate::render::Palette;
use crate::tuple::Vec3;

/// A validated, ready-to-render scene: one camera looking at one sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub camera: Camera,
    pub sphere: Sphere,
    pub width: usize,
    pub height: usize,
    pub palette: Palette,
}

impl TryFrom<SceneJson> for Scene {
    type Error = SceneError;

    fn try_from(scene_json: SceneJson) -> Result<Scene, SceneError> {
        let camera = Camera::new(
            scene_json.camera_from,
            scene_json.camera_to,
            scene_json.camera_up,
            scene_json.field_of_view,
            scene_json.canvas_width,
            scene_json.canvas_height
        )?;

        let sphere = Sphere::new(
            scene_json.sphere.center,
            scene_json.sphere.radius
        )?;

        Ok(Scene {
            camera,
            sphere,
            width: scene_json.canvas_width as usize,
            height: scene_json.canvas_height as usize,
            palette: scene_json.palette,
        })
    }
}

impl Scene {
    /// Reads, parses and validates a JSON scene description.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        Scene::try_from(SceneJson::load(path)?)
    }

    /// Renders the scene on `threads` worker threads.
    pub fn render(&self, threads: usize) -> Canvas {
        parallel_render(&self.camera, &self.sphere, &self.palette,
            self.width, self.height, threads)
    }
}

/// The on-disk scene description.
///
/// Every field is optional; missing fields take the values of the default
/// scene (see `consts`). Vectors and colors are three-element arrays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneJson {
    pub canvas_width: u32,
    pub canvas_height: u32,

    /// Vertical field of view, in degrees.
    pub field_of_view: f64,

    pub camera_from: Vec3,
    pub camera_to: Vec3,
    pub camera_up: Vec3,

    pub sphere: SphereJson,
    pub palette: Palette,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphereJson {
    pub center: Vec3,
    pub radius: f64,
}

impl Default for SphereJson {
    fn default() -> SphereJson {
        SphereJson {
            center: SPHERE_CENTER.into(),
            radius: SPHERE_RADIUS,
        }
    }
}

impl Default for SceneJson {
    fn default() -> SceneJson {
        SceneJson {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            field_of_view: FIELD_OF_VIEW,
            camera_from: Vec3::new(0.0, 0.0, 0.0),
            camera_to: Vec3::new(0.0, 0.0, -1.0),
            camera_up: Vec3::new(0.0, 1.0, 0.0),
            sphere: Default::default(),
            palette: Default::default(),
        }
    }
}

impl SceneJson {
    pub fn load(path: &Path) -> Result<SceneJson, SceneError> {
        let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("loaded scene description from {}", path.display());
        Ok(serde_json::from_str(&text)?)
    }
}

/* Tests */

#[test]
fn default_scene_is_valid() {
    let scene = Scene::try_from(SceneJson::default()).unwrap();

    assert_eq!((scene.width, scene.height), (480, 200));
    assert!(crate::feq(scene.camera.aspect_ratio(), 2.4));
    assert_eq!(scene.sphere.center(), Vec3::new(0.0, 0.0, -3.0));
    assert_eq!(scene.palette, Palette::default());
}

#[test]
fn partial_json_fills_defaults() {
    let json = r#"{
        "canvas_width": 64,
        "canvas_height": 48,
        "sphere": { "radius": 2.0 }
    }"#;
    let scene_json: SceneJson = serde_json::from_str(json).unwrap();

    assert_eq!(scene_json.canvas_width, 64);
    assert_eq!(scene_json.field_of_view, FIELD_OF_VIEW);
    assert_eq!(scene_json.sphere.center, Vec3::new(0.0, 0.0, -3.0));
    assert_eq!(scene_json.sphere.radius, 2.0);
}

#[test]
fn unknown_fields_are_rejected() {
    let json = r#"{ "light": { "position": [0, 0, 0] } }"#;

    assert!(serde_json::from_str::<SceneJson>(json).is_err());
}

#[test]
fn invalid_scene_reports_cause() {
    use crate::error::{ CameraError, GeometryError };

    let mut scene_json = SceneJson::default();
    scene_json.camera_to = scene_json.camera_from;
    assert!(matches!(
        Scene::try_from(scene_json),
        Err(SceneError::Camera(CameraError::DegenerateBasis(_)))
    ));

    let mut scene_json = SceneJson::default();
    scene_json.sphere.radius = -1.0;
    assert!(matches!(
        Scene::try_from(scene_json),
        Err(SceneError::Geometry(GeometryError::InvalidRadius(_)))
    ));

    let mut scene_json = SceneJson::default();
    scene_json.canvas_height = 0;
    assert!(matches!(
        Scene::try_from(scene_json),
        Err(SceneError::Camera(CameraError::InvalidAspectRatio { .. }))
    ));
}
