use crate::algebra::{Point3, Ray, Rotate, Vec3};
use crate::error::{Result, TraceError};
use crate::surface::{check_reflectivity, HitResult};

/// Infinite plane with a two-tone checkerboard laid out along the in-plane
/// basis vectors `u` and `v`.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    pub point       : Point3,
    pub normal      : Vec3,
    pub u           : Vec3,
    pub v           : Vec3,
    pub cell_size   : f32,
    pub color1      : Vec3,
    pub color2      : Vec3,
    pub reflectivity: f32,
}

impl Plane {
    /// Builds the plane spanned by `u` and `v` through `point`; the normal is
    /// `normalize(u × v)`.
    pub fn new(
        point: Point3,
        u: Vec3,
        v: Vec3,
        cell_size: f32,
        colors: (Vec3, Vec3),
        reflectivity: f32,
    ) -> Result<Self> {
        let n = u.cross(v);
        if !(n.norm() > 1e-6) {
            return Err(TraceError::InvalidArgument(
                "plane basis vectors must be non-zero and not parallel".into(),
            ));
        }
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(TraceError::InvalidArgument(format!(
                "checker cell size must be positive, got {cell_size}"
            )));
        }
        check_reflectivity(reflectivity)?;
        Ok(Self {
            point,
            normal: n.normalize(),
            u,
            v,
            cell_size,
            color1: colors.0,
            color2: colors.1,
            reflectivity,
        })
    }

    /// At most one point: rays parallel to the plane or pointing away from it miss.
    pub fn hit(&self, ray: &Ray) -> HitResult {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-6 {            // ray ‖ plane
            return HitResult::Miss;
        }

        let t = self.point.sub(ray.origin).dot(self.normal) / denom;
        if !t.is_finite() || t < 0.0 {
            return HitResult::Miss;
        }
        HitResult::Point(ray.at(t))
    }

    /// Local checker coordinates of `p`, in cells.
    pub fn plane_coords(&self, p: Point3) -> (f32, f32) {
        let d = p.sub(self.point);
        (d.dot(self.u) / self.cell_size, d.dot(self.v) / self.cell_size)
    }

    pub fn color_at(&self, p: Point3) -> Vec3 {
        let (u, v) = self.plane_coords(p);
        let cell = u.floor() as i64 + v.floor() as i64;
        if cell.rem_euclid(2) == 0 { self.color1 } else { self.color2 }
    }

    /// Signed distance of the plane from the origin along its normal.
    pub fn offset(&self) -> f32 { self.normal.dot(self.point) }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.normal == other.normal
            && self.offset() == other.offset()
            && self.cell_size == other.cell_size
            && self.color1 == other.color1
            && self.color2 == other.color2
    }
}

impl Rotate for Plane {
    fn rotated(&self, axis: Vec3, t: f32) -> Self {
        Self {
            point : self.point.rotated(axis, t),
            normal: self.normal.rotated(axis, t),
            u     : self.u.rotated(axis, t),
            v     : self.v.rotated(axis, t),
            ..*self
        }
    }
}
