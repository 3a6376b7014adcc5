//! src/sphere.rs
//! -------------
//! Solid-colored sphere.

use crate::{
    algebra::{Point3, Ray, Rotate, Vec3},
    error::{Result, TraceError},
    surface::{check_reflectivity, HitResult},
};

#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center      : Point3,
    pub radius      : f32,
    pub color       : Vec3,
    pub reflectivity: f32,
}

impl Sphere {
    pub fn new(center: Point3, radius: f32, color: Vec3, reflectivity: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(TraceError::InvalidArgument(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        check_reflectivity(reflectivity)?;
        Ok(Self { center, radius, color, reflectivity })
    }

    /// Intersect a ray (origin + t·direction, t ≥ 0).
    /// Both roots in front of the origin give the entry/exit segment; a single
    /// one (origin inside, or a grazing ray) gives a point.
    pub fn hit(&self, ray: &Ray) -> HitResult {
        // Analytic quadratic
        let oc   = ray.origin.sub(self.center);
        let a    = ray.direction.dot(ray.direction);
        let b    = 2.0 * oc.dot(ray.direction);
        let c    = oc.dot(oc) - self.radius * self.radius;
        let disc = b*b - 4.0*a*c;
        if a == 0.0 || disc < 0.0 { return HitResult::Miss; }

        let sq = disc.sqrt();
        let t1 = (-b - sq) / (2.0 * a);
        let t2 = (-b + sq) / (2.0 * a);

        match (t1 >= 0.0, t2 >= 0.0) {
            (true, true) if t1 == t2 => HitResult::Point(ray.at(t1)),
            (true, true)             => HitResult::Segment(ray.at(t1), ray.at(t2)),
            (false, true)            => HitResult::Point(ray.at(t2)),
            _                        => HitResult::Miss,
        }
    }

    pub fn normal_at(&self, p: Point3) -> Vec3 {
        p.sub(self.center).normalize()
    }
}

impl PartialEq for Sphere {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center && self.radius == other.radius && self.color == other.color
    }
}

impl Rotate for Sphere {
    fn rotated(&self, axis: Vec3, t: f32) -> Self {
        Self { center: self.center.rotated(axis, t), ..*self }
    }
}
