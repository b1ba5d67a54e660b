use std::ops::{ Add, Sub, Neg, Mul, Div };

use serde::{ Serialize, Deserialize };

use crate::feq;
use crate::error::GeometryError;

/// A three-component vector.
///
/// Used for points (ray origins, sphere centers, camera positions) as well as
/// directions and basis vectors. Unlike a homogeneous tuple, points and
/// vectors share one representation; the caller decides what a `Vec3` means.
#[derive(Debug, Default, Copy, Clone, PartialOrd, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Component-wise equality, accounting for floating point error.
impl PartialEq for Vec3 {
    fn eq(&self, other: &Vec3) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Vec3 {
        Vec3::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> [f64; 3] {
        [v.x, v.y, v.z]
    }
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Vec3 {
        Vec3 { x, y, z }
    }

    pub const fn zero() -> Vec3 {
        Vec3 { x: 0.0, y: 0.0, z: 0.0 }
    }

    /// The Euclidean length, computed without intermediate overflow or
    /// underflow.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Returns this vector scaled to unit length.
    ///
    /// Fails with `GeometryError::ZeroLength` if the vector is zero or has a
    /// non-finite component, rather than producing a vector full of NaNs.
    ///
    /// ```
    /// # use ray_caster::tuple::Vec3;
    /// let v = Vec3::new(4.0, 0.0, 0.0).normalize().unwrap();
    /// assert_eq!(v, Vec3::new(1.0, 0.0, 0.0));
    /// assert!(Vec3::zero().normalize().is_err());
    /// ```
    pub fn normalize(&self) -> Result<Vec3, GeometryError> {
        if !self.is_finite() || self.max_abs() == 0.0 {
            return Err(GeometryError::ZeroLength);
        }

        Ok(self.normalize_nonzero())
    }

    /// Normalizes a finite, non-zero vector.
    ///
    /// Components are first divided by the largest magnitude among them, so
    /// the sum of squares lies in `[1, 3]` whatever the input scale.
    pub(crate) fn normalize_nonzero(&self) -> Vec3 {
        let scaled = *self / self.max_abs();
        scaled / scaled.dot(&scaled).sqrt()
    }

    fn max_abs(&self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Implements scalar right-multiplication for a vector.
///
/// ```
/// use ray_caster::tuple::Vec3;
///
/// let t = Vec3::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(t * 5.0, Vec3::new(5.0, 10.0, 15.0));
/// ```
impl Mul<f64> for Vec3 {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
        }
    }
}

/// Implements scalar left-multiplication for a vector.
///
/// ```rust
/// use ray_caster::tuple::Vec3;
///
/// let t = Vec3::new(1.0, 2.0, 3.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(5.0 * t, Vec3::new(5.0, 10.0, 15.0));
/// ```
impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self * other.x,
            y: self * other.y,
            z: self * other.z,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
        }
    }
}

/* Tests */

#[test]
fn add_vectors() {
    let a1 = Vec3::new(3.0, -2.0, 5.0);
    let a2 = Vec3::new(-2.0, 3.0, 1.0);

    assert_eq!(a1 + a2, Vec3::new(1.0, 1.0, 6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Vec3::new(3.0, 2.0, 1.0);
    let p2 = Vec3::new(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Vec3::new(-2.0, -4.0, -6.0));
}

#[test]
fn neg_vector() {
    let a = Vec3::new(1.0, -2.0, 3.0);

    assert_eq!(-a, Vec3::new(-1.0, 2.0, -3.0));
}

#[test]
fn mul_fraction() {
    let a = Vec3::new(1.0, -2.0, 3.0);

    assert_eq!(a * 0.5, Vec3::new(0.5, -1.0, 1.5));
}

#[test]
fn div_scalar() {
    let a = Vec3::new(1.0, -2.0, 3.0);

    assert_eq!(a / 2.0, Vec3::new(0.5, -1.0, 1.5));
}

#[test]
fn magnitude_neg() {
    let v = Vec3::new(-1.0, -2.0, -3.0);

    assert!(crate::feq(v.magnitude(), f64::sqrt(14.0)));
}

#[test]
fn normalize_dirty() {
    let v = Vec3::new(1.0, 2.0, 3.0);
    let e = Vec3::new(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize().unwrap(), e);
    assert!(crate::feq(e.magnitude(), 1.0));
}

#[test]
fn normalize_zero_fails() {
    assert_eq!(Vec3::zero().normalize(), Err(GeometryError::ZeroLength));
    assert_eq!(
        Vec3::new(f64::NAN, 0.0, 0.0).normalize(),
        Err(GeometryError::ZeroLength)
    );
}

#[test]
fn magnitude_of_extreme_vectors() {
    let big = Vec3::new(3e200, 4e200, 0.0);
    assert!(((big.magnitude() / 5e200) - 1.0).abs() < 1e-12);

    let tiny = Vec3::new(3e-170, 4e-170, 0.0);
    assert!(((tiny.magnitude() / 5e-170) - 1.0).abs() < 1e-12);
}

#[test]
fn normalize_extreme_vectors() {
    assert_eq!(
        Vec3::new(3e200, 4e200, 0.0).normalize().unwrap(),
        Vec3::new(0.6, 0.8, 0.0)
    );
    assert_eq!(
        Vec3::new(1e-170, 0.0, 0.0).normalize().unwrap(),
        Vec3::new(1.0, 0.0, 0.0)
    );
    assert_eq!(
        Vec3::new(f64::MAX, f64::MAX, f64::MAX).normalize().unwrap(),
        Vec3::new(1.0, 1.0, 1.0) / f64::sqrt(3.0)
    );
    assert_eq!(
        Vec3::new(f64::INFINITY, 0.0, 0.0).normalize(),
        Err(GeometryError::ZeroLength)
    );
}

#[test]
fn dot_vectors() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Vec3::new(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Vec3::new(1.0, -2.0, 1.0));
}

#[test]
fn cross_is_right_handed() {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    assert_eq!(x.cross(&y), Vec3::new(0.0, 0.0, 1.0));
}

#[test]
fn vector_from_json_array() {
    let v: Vec3 = serde_json::from_str("[1.0, -2.5, 3]").unwrap();
    assert_eq!(v, Vec3::new(1.0, -2.5, 3.0));

    assert!(serde_json::from_str::<Vec3>("[1.0, 2.0]").is_err());
}
