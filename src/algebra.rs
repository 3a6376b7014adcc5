use serde::Deserialize;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vec3(pub f32, pub f32, pub f32);

/// Points share the vector representation; a point is just a vector
/// anchored at the origin.
pub type Point3 = Vec3;

impl Vec3 {
    pub const ZERO: Vec3 = Vec3(0.0, 0.0, 0.0);
    pub const X: Vec3 = Vec3(1.0, 0.0, 0.0);
    pub const Y: Vec3 = Vec3(0.0, 1.0, 0.0);
    pub const Z: Vec3 = Vec3(0.0, 0.0, 1.0);

    pub fn add(self, v: Self) -> Self { Self(self.0+v.0, self.1+v.1, self.2+v.2) }
    pub fn sub(self, v: Self) -> Self { Self(self.0-v.0, self.1-v.1, self.2-v.2) }
    pub fn scale(self, f: f32) -> Self { Self(self.0*f, self.1*f, self.2*f) }
    pub fn dot(self, v: Self) -> f32 { self.0*v.0 + self.1*v.1 + self.2*v.2 }
    pub fn cross(self, v: Self) -> Self {
        Self(self.1*v.2-self.2*v.1, self.2*v.0-self.0*v.2, self.0*v.1-self.1*v.0)
    }
    pub fn norm(self) -> f32 { self.dot(self).sqrt() }
    pub fn normalize(self) -> Self { self.scale(1.0/self.norm()) }
    pub fn neg(self) -> Self { Self(-self.0,-self.1,-self.2) }
    pub fn distance(self, p: Self) -> f32 { self.sub(p).norm() }

    /// Unit vector along axis `i` (0 = X, 1 = Y, 2 = Z).
    pub fn axis(i: usize) -> Self {
        match i {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }
}

impl Add for Vec3 { type Output = Vec3; fn add(self, v: Vec3) -> Vec3 { Vec3::add(self, v) } }
impl Sub for Vec3 { type Output = Vec3; fn sub(self, v: Vec3) -> Vec3 { Vec3::sub(self, v) } }
impl Mul<f32> for Vec3 { type Output = Vec3; fn mul(self, f: f32) -> Vec3 { self.scale(f) } }
impl Neg for Vec3 { type Output = Vec3; fn neg(self) -> Vec3 { Vec3::neg(self) } }

impl From<[f32; 3]> for Vec3 {
    fn from(a: [f32; 3]) -> Self { Vec3(a[0], a[1], a[2]) }
}

/* Custom helper so Serde turns a JSON array into Vec3 */
pub fn vec3_from_array<'de, D>(d: D) -> Result<Vec3, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let arr = <[f32; 3]>::deserialize(d)?;
    Ok(arr.into())
}

/// Half-line `origin + t·direction`, `t ≥ 0`. The direction is not
/// required to be unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vec3) -> Self { Self { origin, direction } }
    pub fn at(&self, t: f32) -> Point3 { self.origin.add(self.direction.scale(t)) }
}

/// Rodrigues' rotation of `v` about `axis` by `t` radians.
pub fn rotate(v: Vec3, axis: Vec3, t: f32) -> Vec3 {
    let k = axis.normalize();
    let (sin, cos) = t.sin_cos();
    v.scale(cos)
        .add(k.cross(v).scale(sin))
        .add(k.scale(k.dot(v) * (1.0 - cos)))
}

/// Geometry that can be rotated about an axis through the origin.
pub trait Rotate {
    fn rotated(&self, axis: Vec3, t: f32) -> Self;
}

impl Rotate for Vec3 {
    fn rotated(&self, axis: Vec3, t: f32) -> Self { rotate(*self, axis, t) }
}

impl Rotate for Ray {
    fn rotated(&self, axis: Vec3, t: f32) -> Self {
        Ray::new(self.origin.rotated(axis, t), self.direction.rotated(axis, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_abs_diff_eq!(a.0, b.0, epsilon = 1e-5);
        assert_abs_diff_eq!(a.1, b.1, epsilon = 1e-5);
        assert_abs_diff_eq!(a.2, b.2, epsilon = 1e-5);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        assert_vec_eq(rotate(Vec3::X, Vec3::Z, FRAC_PI_2), Vec3::Y);
    }

    #[test]
    fn rotation_preserves_length_and_axis_component() {
        let v = Vec3(3.0, -2.0, 5.0);
        let r = rotate(v, Vec3(0.0, 0.0, 7.0), 1.1);
        assert_abs_diff_eq!(r.norm(), v.norm(), epsilon = 1e-4);
        assert_abs_diff_eq!(r.2, v.2, epsilon = 1e-5);
    }

    #[test]
    fn rotating_a_ray_rotates_both_ends() {
        let ray = Ray::new(Vec3(1.0, 0.0, 0.0), Vec3(0.0, 1.0, 0.0));
        let r = ray.rotated(Vec3::Z, FRAC_PI_2);
        assert_vec_eq(r.origin, Vec3(0.0, 1.0, 0.0));
        assert_vec_eq(r.direction, Vec3(-1.0, 0.0, 0.0));
    }

    #[test]
    fn operators_match_methods() {
        let a = Vec3(1.0, 2.0, 3.0);
        let b = Vec3(-4.0, 0.5, 2.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.sub(b));
        assert_eq!(a * 2.0, a.scale(2.0));
        assert_eq!(-a, a.neg());
        assert_vec_eq(a.cross(b), Vec3(2.0*2.0 - 3.0*0.5, 3.0*-4.0 - 1.0*2.0, 1.0*0.5 - 2.0*-4.0));
    }
}
