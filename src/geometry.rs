use crate::tuple::Vec3;
use crate::ray::Ray;
use crate::error::GeometryError;

/// Anything a ray can be tested against.
///
/// `intersect` returns the distance `t` along the ray to the nearest
/// intersection in front of the ray origin (`t > 0`), or `None` on a miss.
pub trait Intersectable {
    fn intersect(&self, ray: &Ray) -> Option<f64>;
}

/// A sphere, given by its center and a strictly positive radius.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f64) -> Result<Sphere, GeometryError> {
        if !center.is_finite() {
            return Err(GeometryError::NonFiniteCenter);
        }

        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeometryError::InvalidRadius(radius));
        }

        Ok(Sphere { center, radius })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Intersectable for Sphere {
    /// Solves `|origin + t*direction - center|^2 = radius^2` for `t`.
    ///
    /// The nearer root is returned when it lies ahead of the ray origin.
    /// Otherwise the ray starts inside the sphere and the farther (exit) root
    /// is returned, provided it is ahead. A tangent ray has a double root and
    /// yields a single distance.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let direction = ray.direction();
        let oc = ray.origin() - self.center;

        let a = direction.dot(&direction);
        assert!(a > 0.0, "ray direction must be non-zero: {:?}", direction);

        let b = 2.0 * oc.dot(&direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t1 = (-b - sqrt_disc) / (2.0 * a);
        let t2 = (-b + sqrt_disc) / (2.0 * a);

        if t1 > 0.0 {
            Some(t1)
        } else if t2 > 0.0 {
            Some(t2)
        } else {
            None
        }
    }
}

/* Tests */

#[cfg(test)]
fn test_sphere() -> Sphere {
    Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0).unwrap()
}

#[cfg(test)]
fn ray(origin: (f64, f64, f64), direction: (f64, f64, f64)) -> Ray {
    Ray::new(
        Vec3::new(origin.0, origin.1, origin.2),
        Vec3::new(direction.0, direction.1, direction.2)
    ).unwrap()
}

#[test]
fn sphere_rejects_bad_radius() {
    assert_eq!(
        Sphere::new(Vec3::zero(), 0.0),
        Err(GeometryError::InvalidRadius(0.0))
    );
    assert_eq!(
        Sphere::new(Vec3::zero(), -2.0),
        Err(GeometryError::InvalidRadius(-2.0))
    );
    assert!(Sphere::new(Vec3::zero(), f64::NAN).is_err());
    assert!(Sphere::new(Vec3::zero(), f64::INFINITY).is_err());
    assert_eq!(
        Sphere::new(Vec3::new(0.0, f64::NAN, 0.0), 1.0),
        Err(GeometryError::NonFiniteCenter)
    );
}

#[test]
fn ray_hits_sphere_front() {
    let s = test_sphere();
    let r = ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0));

    let t = s.intersect(&r).unwrap();
    assert!(crate::feq(t, 2.0));
    assert_eq!(r.at(t), Vec3::new(0.0, 0.0, -2.0));
}

#[test]
fn unnormalized_direction_gives_same_distance() {
    let s = test_sphere();
    let r = ray((0.0, 0.0, 0.0), (0.0, 0.0, -10.0));

    assert!(crate::feq(s.intersect(&r).unwrap(), 2.0));
}

#[test]
fn perpendicular_ray_misses() {
    let s = test_sphere();
    let r = ray((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn tangent_ray_hits_once() {
    let s = test_sphere();
    // Grazes the top of the sphere at (0, 1, -3).
    let r = ray((0.0, 1.0, 0.0), (0.0, 0.0, -1.0));

    let t = s.intersect(&r).unwrap();
    assert!(crate::feq(t, 3.0));
    assert_eq!(r.at(t), Vec3::new(0.0, 1.0, -3.0));
}

#[test]
fn ray_just_outside_tangent_misses() {
    let s = test_sphere();
    let r = ray((0.0, 1.0001, 0.0), (0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn origin_inside_sphere_returns_exit() {
    let s = test_sphere();
    let r = ray((0.0, 0.0, -3.0), (0.0, 0.0, -1.0));

    let t = s.intersect(&r).unwrap();
    assert!(crate::feq(t, 1.0));

    // Off-center, still inside.
    let r = ray((0.0, 0.0, -2.5), (0.0, 0.0, 1.0));
    let t = s.intersect(&r).unwrap();
    assert!(t > 0.0);
    assert!(crate::feq(t, 0.5));
}

#[test]
fn sphere_behind_ray_misses() {
    let s = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0).unwrap();
    let r = ray((0.0, 0.0, 0.0), (0.0, 0.0, -1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn origin_on_surface_facing_out_misses() {
    let s = test_sphere();
    let r = ray((0.0, 0.0, -2.0), (0.0, 0.0, 1.0));

    assert_eq!(s.intersect(&r), None);
}

#[test]
fn intersect_is_deterministic() {
    let s = test_sphere();
    let r = ray((0.1, -0.2, 0.3), (0.05, 0.02, -1.0));

    let first = s.intersect(&r);
    for _ in 0..16 {
        assert_eq!(s.intersect(&r).map(f64::to_bits), first.map(f64::to_bits));
    }
}
