use std::path::PathBuf;

use thiserror::Error;

/// Errors from building geometric values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A vector with zero (or non-finite) length cannot be normalized.
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,

    /// Sphere center must be finite.
    #[error("sphere center must be finite")]
    NonFiniteCenter,

    /// Sphere radius must be finite and strictly positive.
    #[error("invalid sphere radius: {0}")]
    InvalidRadius(f64),
}

/// Errors from constructing a `Camera`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    /// The view direction is zero (`origin == look_at`), or `up` is parallel
    /// to it, so no orthonormal basis exists.
    #[error("degenerate camera basis: {0}")]
    DegenerateBasis(&'static str),

    /// The image has a zero dimension, so the aspect ratio is undefined.
    #[error("invalid aspect ratio for a {width}x{height} image")]
    InvalidAspectRatio { width: u32, height: u32 },

    /// Camera position, target and up vector must be finite.
    #[error("camera vectors must be finite")]
    NonFinite,

    /// Field of view must lie strictly between 0 and 180 degrees.
    #[error("invalid field of view: {0} degrees")]
    InvalidFieldOfView(f64),
}

/// Errors from loading a scene or writing a rendered image.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read or write {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene description")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode image")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
