//! A ray caster.
//!
//! Rays are cast from a pinhole camera through a grid of pixels and tested
//! against a sphere; each pixel records hit or miss.

pub mod consts;
pub mod error;

pub mod tuple;
pub mod ray;
pub mod camera;
pub mod geometry;

pub mod color;
pub mod canvas;
pub mod render;
pub mod parallel;
pub mod scene;

pub use camera::Camera;
pub use error::{ CameraError, GeometryError, SceneError };
pub use geometry::{ Intersectable, Sphere };
pub use ray::Ray;
pub use tuple::Vec3;

use consts::FEQ_EPSILON;

pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}
