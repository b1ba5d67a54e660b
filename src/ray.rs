use crate::tuple::Vec3;
use crate::error::GeometryError;

/// A ray: an origin and a unit-length direction.
///
/// The direction is normalized once, when the ray is built. The fields are
/// private so that a `Ray` can never hold a non-unit direction afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// Fails if `direction` has zero length.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Ray, GeometryError> {
        Ok(Ray { origin, direction: direction.normalize()? })
    }

    /// Builds a ray from a direction already known to be non-zero.
    ///
    /// Used by the camera, whose ray directions always carry a unit
    /// component along the view axis.
    pub(crate) fn from_nonzero(origin: Vec3, direction: Vec3) -> Ray {
        debug_assert!(direction.normalize().is_ok(), "{:?}", direction);

        Ray { origin, direction: direction.normalize_nonzero() }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// The point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + (t * self.direction)
    }
}

/* Tests */

#[test]
fn ray_position() {
    let r = Ray::new(
                Vec3::new(2.0, 3.0, 4.0),
                Vec3::new(1.0, 0.0, 0.0)
            ).unwrap();

    assert_eq!(r.at(0.0), Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(r.at(1.0), Vec3::new(3.0, 3.0, 4.0));
    assert_eq!(r.at(-1.0), Vec3::new(1.0, 3.0, 4.0));
    assert_eq!(r.at(2.5), Vec3::new(4.5, 3.0, 4.0));
}

#[test]
fn ray_direction_is_normalized() {
    let r = Ray::new(Vec3::zero(), Vec3::new(0.0, 3.0, -4.0)).unwrap();

    assert_eq!(r.direction(), Vec3::new(0.0, 0.6, -0.8));
    assert!((r.direction().magnitude() - 1.0).abs() < 1e-12);
    assert_eq!(r.at(5.0), Vec3::new(0.0, 3.0, -4.0));
}

#[test]
fn ray_direction_at_extreme_scales() {
    let r = Ray::new(Vec3::zero(), Vec3::new(3e-170, 4e-170, 0.0)).unwrap();
    assert_eq!(r.direction(), Vec3::new(0.6, 0.8, 0.0));

    let r = Ray::from_nonzero(Vec3::zero(), Vec3::new(1e155, 0.0, -1.0));
    assert_eq!(r.direction(), Vec3::new(1.0, 0.0, 0.0));
    assert!((r.direction().magnitude() - 1.0).abs() < 1e-12);
}

#[test]
fn ray_zero_direction_fails() {
    assert_eq!(
        Ray::new(Vec3::new(1.0, 1.0, 1.0), Vec3::zero()),
        Err(GeometryError::ZeroLength)
    );
}
