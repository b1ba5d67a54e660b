use log::debug;

use crate::tuple::Vec3;
use crate::ray::Ray;
use crate::error::{ CameraError, GeometryError };

/// A pinhole camera.
///
/// The camera holds an orthonormal basis `{u, v, w}`: `u` points right, `v`
/// points up and `w` points from the look-at target back toward the camera,
/// so the camera looks along `-w`. The viewport sits one unit in front of the
/// origin along `-w`, sized from the vertical field of view and the image
/// aspect ratio.
///
/// Everything is derived once in `Camera::new`; a camera is never mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    origin: Vec3,

    u: Vec3,
    v: Vec3,
    w: Vec3,

    /// The vertical field of view, in radians.
    fov_radians: f64,

    /// Image width over image height.
    aspect_ratio: f64,

    horizontal: Vec3,
    vertical: Vec3,

    /// The lower-left viewport corner relative to `origin`. Kept relative so
    /// that ray directions never cancel against a large origin.
    lower_left_offset: Vec3,
}

impl Camera {
    /// Creates a camera at `origin` looking at `look_at`.
    ///
    /// `up` is only a hint; it need not be perpendicular to the view
    /// direction, but it must not be parallel to it. The aspect ratio comes
    /// from the target image size so that the render is not distorted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_caster::camera::Camera;
    /// # use ray_caster::tuple::Vec3;
    /// let camera = Camera::new(
    ///     Vec3::new(0.0, 0.0, 0.0),
    ///     Vec3::new(0.0, 0.0, -1.0),
    ///     Vec3::new(0.0, 1.0, 0.0),
    ///     90.0, 4, 3,
    /// ).unwrap();
    ///
    /// let ray = camera.get_ray(0.5, 0.5);
    /// assert_eq!(ray.direction(), Vec3::new(0.0, 0.0, -1.0));
    /// ```
    pub fn new(origin: Vec3, look_at: Vec3, up: Vec3, fov_degrees: f64,
        image_width: u32, image_height: u32) -> Result<Camera, CameraError> {
        if !(fov_degrees.is_finite() && fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(CameraError::InvalidFieldOfView(fov_degrees));
        }

        if !(origin.is_finite() && look_at.is_finite() && up.is_finite()) {
            return Err(CameraError::NonFinite);
        }

        if image_width == 0 || image_height == 0 {
            return Err(CameraError::InvalidAspectRatio {
                width: image_width,
                height: image_height,
            });
        }

        let fov_radians = fov_degrees.to_radians();
        let aspect_ratio = image_width as f64 / image_height as f64;

        let w = (origin - look_at).normalize().map_err(|_: GeometryError|
            CameraError::DegenerateBasis("camera origin equals look-at point")
        )?;
        let u = up.cross(&w).normalize().map_err(|_: GeometryError|
            CameraError::DegenerateBasis("up vector is parallel to view direction")
        )?;
        let v = w.cross(&u);

        let viewport_height = 2.0 * (fov_radians / 2.0).tan();
        let viewport_width = viewport_height * aspect_ratio;

        let horizontal = viewport_width * u;
        let vertical = viewport_height * v;
        let lower_left_offset = -(horizontal / 2.0) - vertical / 2.0 - w;

        debug!("camera basis u={:?} v={:?} w={:?}, viewport {}x{}",
            u, v, w, viewport_width, viewport_height);

        Ok(Camera {
            origin,
            u, v, w,
            fov_radians,
            aspect_ratio,
            horizontal,
            vertical,
            lower_left_offset,
        })
    }

    /// Returns the ray through normalized viewport coordinates `(x, y)`.
    ///
    /// `(0, 0)` is the bottom-left corner of the viewport and `(1, 1)` the
    /// top-right. Coordinates outside `[0, 1]` are not clamped; they produce
    /// rays outside the viewport.
    pub fn get_ray(&self, x: f64, y: f64) -> Ray {
        let direction = self.lower_left_offset
            + x * self.horizontal
            + y * self.vertical;

        // The direction is always `-w` plus a component in the u/v plane, so
        // its length is at least one.
        Ray::from_nonzero(self.origin, direction)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// The camera basis `(u, v, w)`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    pub fn fov_radians(&self) -> f64 {
        self.fov_radians
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }

    pub fn lower_left_corner(&self) -> Vec3 {
        self.origin + self.lower_left_offset
    }
}

/* Tests */

#[cfg(test)]
fn default_camera(width: u32, height: u32) -> Camera {
    Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, width, height
    ).unwrap()
}

#[cfg(test)]
fn assert_orthonormal(c: &Camera) {
    use crate::feq;

    let (u, v, w) = c.basis();

    assert!(feq(u.magnitude(), 1.0));
    assert!(feq(v.magnitude(), 1.0));
    assert!(feq(w.magnitude(), 1.0));

    assert!(feq(u.dot(&v), 0.0));
    assert!(feq(u.dot(&w), 0.0));
    assert!(feq(v.dot(&w), 0.0));

    // Right-handed: u x v = w.
    assert_eq!(u.cross(&v), w);
}

#[test]
fn basis_for_default_view() {
    let c = default_camera(4, 3);
    let (u, v, w) = c.basis();

    assert_eq!(u, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(v, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(w, Vec3::new(0.0, 0.0, 1.0));
    assert_orthonormal(&c);
}

#[test]
fn basis_is_orthonormal_for_oblique_views() {
    let views = [
        (Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.5, 2.0), Vec3::new(0.0, 1.0, 0.0)),
        (Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)),
        (Vec3::new(-3.0, -3.0, 7.0), Vec3::new(2.0, 1.0, -1.0), Vec3::new(0.3, 0.9, 0.1)),
        (Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)),
    ];

    for (origin, look_at, up) in views.iter() {
        let c = Camera::new(*origin, *look_at, *up, 60.0, 640, 480).unwrap();
        assert_orthonormal(&c);
    }
}

#[test]
fn viewport_dimensions() {
    let c = default_camera(4, 3);

    assert!(crate::feq(c.fov_radians(), std::f64::consts::PI / 2.0));
    assert!(crate::feq(c.aspect_ratio(), 4.0 / 3.0));
    assert_eq!(c.horizontal(), Vec3::new(8.0 / 3.0, 0.0, 0.0));
    assert_eq!(c.vertical(), Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(c.lower_left_corner(), Vec3::new(-4.0 / 3.0, -1.0, -1.0));
}

#[test]
fn ray_through_center() {
    let c = default_camera(201, 101);
    let r = c.get_ray(0.5, 0.5);

    assert_eq!(r.origin(), Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(r.direction(), Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = default_camera(2, 1);
    let r = c.get_ray(0.0, 0.0);

    // Corner of a 4x2 viewport at z = -1.
    let e = Vec3::new(-2.0, -1.0, -1.0) / f64::sqrt(6.0);
    assert_eq!(r.direction(), e);
}

#[test]
fn ray_when_camera_moved() {
    let c = Camera::new(
        Vec3::new(0.0, 2.0, -5.0),
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, 100, 100
    ).unwrap();
    let r = c.get_ray(0.5, 0.5);

    assert_eq!(r.origin(), Vec3::new(0.0, 2.0, -5.0));
    assert_eq!(r.direction(), Vec3::new(0.0, 0.0, 1.0));

    // Looking toward +z with +y up, camera-right is -x.
    let (u, _, _) = c.basis();
    assert_eq!(u, Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn rays_are_unit_length() {
    let c = Camera::new(
        Vec3::new(1.0, -2.0, 0.5),
        Vec3::new(3.0, 4.0, -8.0),
        Vec3::new(0.0, 0.0, 1.0),
        75.0, 320, 200
    ).unwrap();

    for &x in [-0.5, 0.0, 0.25, 0.5, 1.0, 1.5].iter() {
        for &y in [-1.0, 0.0, 0.33, 1.0, 2.0].iter() {
            let d = c.get_ray(x, y).direction();
            assert!((d.magnitude() - 1.0).abs() < 1e-12);
        }
    }
}

#[test]
fn ray_far_outside_viewport() {
    let c = default_camera(4, 3);
    let r = c.get_ray(1e155, 0.5);

    assert_eq!(r.direction(), Vec3::new(1.0, 0.0, 0.0));
    assert!((r.direction().magnitude() - 1.0).abs() < 1e-12);

    // Points away from the sphere along +x; must be a clean miss.
    use crate::geometry::{ Intersectable, Sphere };
    let s = Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap();
    assert_eq!(s.intersect(&r), None);
}

#[test]
fn camera_far_from_world_origin() {
    let c = Camera::new(
        Vec3::new(1e200, 0.0, 0.0),
        Vec3::new(-1e200, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, 4, 3
    ).unwrap();

    let (_, _, w) = c.basis();
    assert_eq!(w, Vec3::new(1.0, 0.0, 0.0));
    assert_orthonormal(&c);

    let r = c.get_ray(0.5, 0.5);
    assert_eq!(r.origin(), Vec3::new(1e200, 0.0, 0.0));
    assert_eq!(r.direction(), Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn tiny_view_offset_is_not_degenerate() {
    let c = Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1e-170),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, 4, 3
    ).unwrap();

    assert_eq!(c.get_ray(0.5, 0.5).direction(), Vec3::new(0.0, 0.0, -1.0));
}

#[test]
fn non_finite_camera_vectors_fail() {
    let err = Camera::new(
        Vec3::new(f64::NAN, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, 4, 3
    );
    assert_eq!(err, Err(CameraError::NonFinite));

    let err = Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, f64::INFINITY, 0.0),
        90.0, 4, 3
    );
    assert_eq!(err, Err(CameraError::NonFinite));
}

#[test]
fn get_ray_is_deterministic() {
    let c = default_camera(640, 480);
    let a = c.get_ray(0.123, 0.987).direction();
    let b = c.get_ray(0.123, 0.987).direction();

    assert_eq!(a.x.to_bits(), b.x.to_bits());
    assert_eq!(a.y.to_bits(), b.y.to_bits());
    assert_eq!(a.z.to_bits(), b.z.to_bits());
}

#[test]
fn origin_equal_to_look_at_fails() {
    let p = Vec3::new(1.0, 1.0, 1.0);
    let err = Camera::new(p, p, Vec3::new(0.0, 1.0, 0.0), 90.0, 4, 3);

    assert!(matches!(err, Err(CameraError::DegenerateBasis(_))));
}

#[test]
fn up_parallel_to_view_fails() {
    let err = Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, 4, 3
    );
    assert!(matches!(err, Err(CameraError::DegenerateBasis(_))));

    let err = Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 0.0, 2.0),
        90.0, 4, 3
    );
    assert!(matches!(err, Err(CameraError::DegenerateBasis(_))));
}

#[test]
fn zero_image_dimension_fails() {
    let make = |w, h| Camera::new(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0, w, h
    );

    assert_eq!(make(4, 0), Err(CameraError::InvalidAspectRatio { width: 4, height: 0 }));
    assert_eq!(make(0, 3), Err(CameraError::InvalidAspectRatio { width: 0, height: 3 }));
}

#[test]
fn bad_field_of_view_fails() {
    for &fov in [0.0, -10.0, 180.0, 270.0, f64::NAN].iter() {
        let err = Camera::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, 0.0),
            fov, 4, 3
        );
        assert!(matches!(err, Err(CameraError::InvalidFieldOfView(_))));
    }
}
