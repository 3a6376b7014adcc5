use crate::{
    algebra::{Point3, Ray, Rotate, Vec3},
    error::{Result, TraceError},
    plane::Plane,
    sphere::Sphere,
};

/// Outcome of intersecting a ray with a single surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HitResult {
    Miss,
    Point(Point3),
    /// Entry and exit points, in ray order.
    Segment(Point3, Point3),
}

impl HitResult {
    /// How far the hit reaches along the ray: the segment length, or the
    /// distance of a single point from `origin`.
    pub fn extent(&self, origin: Point3) -> Option<f32> {
        match *self {
            Self::Miss => None,
            Self::Point(p) => Some(p.distance(origin)),
            Self::Segment(p1, p2) => Some(p1.distance(p2)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Surface {
    Sphere(Sphere),
    Plane(Plane),
}

impl Surface {
    pub fn intersect(&self, ray: &Ray) -> HitResult {
        match self {
            Self::Sphere(s) => s.hit(ray),
            Self::Plane(p) => p.hit(ray),
        }
    }

    pub fn color_at(&self, p: Point3) -> Vec3 {
        match self {
            Self::Sphere(s) => s.color,
            Self::Plane(pl) => pl.color_at(p),
        }
    }

    pub fn normal_at(&self, p: Point3) -> Vec3 {
        match self {
            Self::Sphere(s) => s.normal_at(p),
            Self::Plane(pl) => pl.normal,
        }
    }

    pub fn reflectivity(&self) -> f32 {
        match self {
            Self::Sphere(s) => s.reflectivity,
            Self::Plane(p) => p.reflectivity,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sphere(_) => "sphere",
            Self::Plane(_) => "plane",
        }
    }
}

impl Rotate for Surface {
    fn rotated(&self, axis: Vec3, t: f32) -> Self {
        match self {
            Self::Sphere(s) => Self::Sphere(s.rotated(axis, t)),
            Self::Plane(p) => Self::Plane(p.rotated(axis, t)),
        }
    }
}

impl From<Sphere> for Surface {
    fn from(s: Sphere) -> Self { Self::Sphere(s) }
}

impl From<Plane> for Surface {
    fn from(p: Plane) -> Self { Self::Plane(p) }
}

pub(crate) fn check_reflectivity(r: f32) -> Result<()> {
    if (0.0..=1.0).contains(&r) {
        Ok(())
    } else {
        Err(TraceError::InvalidArgument(format!(
            "reflectivity must be within [0, 1], got {r}"
        )))
    }
}
