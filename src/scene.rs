//! src/scene.rs
//! ------------
//! The scene owns the surfaces, the light and the background, and traces
//! rays through them: hit selection, hard shadows from a single point light,
//! and mirror reflection off spheres.

use crate::{
    algebra::{Point3, Ray, Vec3},
    color::{blend, RayColor, BLACK},
    error::{Result, TraceError},
    surface::{HitResult, Surface},
};
use serde::Deserialize;

/// Shadow-ray hits on the shading surface itself shorter than this are
/// treated as the surface seeing itself, not as occlusion.
pub const SELF_HIT_EPSILON: f32 = 0.1;

/// Under [`HitRule::Nearest`] a hit must lie at least this far along the ray,
/// so a bounce does not pick up the point it starts from.
pub const MIN_HIT_DISTANCE: f32 = 1e-3;

pub const DEFAULT_BACKGROUND: Vec3 = Vec3(255.0, 0.0, 255.0);

/// Which hit along a primary or reflected ray is the one that gets shaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HitRule {
    /// The hit farthest from the ray origin wins; a sphere crossing resolves
    /// to its exit point.
    #[default]
    Farthest,
    /// Conventional closest-hit selection. Mirrors reflect off the entry
    /// point with `v − 2(n·v)n`.
    Nearest,
}

/// Running statistics on how far shadow rays travel through the surface they
/// start on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowStats {
    pub samples: u64,
    pub total  : f64,
    pub min    : f32,
    pub zeros  : u64,
}

impl Default for ShadowStats {
    fn default() -> Self {
        Self { samples: 0, total: 0.0, min: f32::INFINITY, zeros: 0 }
    }
}

impl ShadowStats {
    pub fn record(&mut self, extent: f32) {
        self.samples += 1;
        self.total += extent as f64;
        self.min = self.min.min(extent);
        if extent == 0.0 {
            self.zeros += 1;
        }
    }

    pub fn merge(self, o: Self) -> Self {
        Self {
            samples: self.samples + o.samples,
            total: self.total + o.total,
            min: self.min.min(o.min),
            zeros: self.zeros + o.zeros,
        }
    }

    pub fn average(&self) -> Option<f64> {
        (self.samples > 0).then(|| self.total / self.samples as f64)
    }
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub objects   : Vec<Surface>,
    pub background: Vec3,
    pub light     : Point3,
    pub hit_rule  : HitRule,
}

impl Scene {
    pub fn new(light: Point3) -> Self {
        Self {
            objects: Vec::new(),
            background: DEFAULT_BACKGROUND,
            light,
            hit_rule: HitRule::default(),
        }
    }

    pub fn with_background(mut self, background: Vec3) -> Self {
        self.background = background;
        self
    }

    pub fn with_hit_rule(mut self, rule: HitRule) -> Self {
        self.hit_rule = rule;
        self
    }

    pub fn push(&mut self, surface: impl Into<Surface>) {
        self.objects.push(surface.into());
    }

    /// The surface a ray is considered to hit, with the hit point.
    pub fn find_nearest_hit(&self, ray: &Ray) -> Option<(Point3, &Surface)> {
        let mut best: Option<(f32, Point3, &Surface)> = None;

        for o in &self.objects {
            let p = match (o.intersect(ray), self.hit_rule) {
                (HitResult::Miss, _) => continue,
                (HitResult::Point(p), _) => p,
                (HitResult::Segment(p1, p2), rule) => {
                    let farther = ray.origin.distance(p1) > ray.origin.distance(p2);
                    match (rule, farther) {
                        (HitRule::Farthest, true) | (HitRule::Nearest, false) => p1,
                        _ => p2,
                    }
                }
            };
            let d = ray.origin.distance(p);
            let better = match (self.hit_rule, best) {
                (HitRule::Farthest, None) => d > 0.0,
                (HitRule::Farthest, Some((bd, ..))) => d > bd,
                (HitRule::Nearest, None) => d > MIN_HIT_DISTANCE,
                (HitRule::Nearest, Some((bd, ..))) => d > MIN_HIT_DISTANCE && d < bd,
            };
            if better {
                best = Some((d, p, o));
            }
        }

        best.map(|(_, p, o)| (p, o))
    }

    /// Direct light at `point` on `surface`, or black if anything blocks the
    /// way to the light.
    pub fn shade(
        &self,
        point: Point3,
        surface: &Surface,
        intensity: f32,
        mut stats: Option<&mut ShadowStats>,
    ) -> RayColor {
        let to_light = self.light - point;
        let shadow_ray = Ray::new(point, to_light);

        for o in &self.objects {
            let hit = o.intersect(&shadow_ray);
            let Some(extent) = hit.extent(point) else { continue };
            if o == surface {
                if let Some(s) = stats.as_deref_mut() {
                    s.record(extent);
                }
                if extent <= SELF_HIT_EPSILON {
                    continue;
                }
            }
            return RayColor::new(intensity, BLACK);
        }

        let strength = to_light.normalize().dot(surface.normal_at(point)).abs();
        RayColor::new(intensity * strength, surface.color_at(point))
    }

    /// Recursive shading with a bounce budget. `depth` is consumed before
    /// anything else, so `depth <= 0` returns the background immediately.
    pub fn trace(&self, ray: &Ray, intensity: f32, depth: i32) -> Result<RayColor> {
        self.trace_with_stats(ray, intensity, depth, None)
    }

    pub fn trace_with_stats(
        &self,
        ray: &Ray,
        intensity: f32,
        depth: i32,
        mut stats: Option<&mut ShadowStats>,
    ) -> Result<RayColor> {
        let depth = depth - 1;
        if depth < 0 {
            return Ok(RayColor::new(intensity, self.background));
        }

        let Some((point, surface)) = self.find_nearest_hit(ray) else {
            return Ok(RayColor::new(intensity, self.background));
        };

        let r = surface.reflectivity();
        if r == 0.0 {
            return Ok(self.shade(point, surface, intensity, stats));
        }

        let direct = self.shade(point, surface, intensity * (1.0 - r), stats.as_deref_mut());
        let bounce = self.reflect(point, surface, ray)?;
        let reflected = self.trace_with_stats(&bounce, intensity * r, depth, stats)?;
        Ok(blend(&[direct, reflected]))
    }

    /// Mirror ray off `point` for this scene's hit rule. The farthest rule
    /// lands on exit points and uses [`reflect`] as is; the nearest rule lands
    /// on entry points, where that formula points back into the sphere, so
    /// the direction is flipped.
    pub fn reflect(&self, point: Point3, surface: &Surface, ray: &Ray) -> Result<Ray> {
        let bounce = reflect(point, surface, ray)?;
        Ok(match self.hit_rule {
            HitRule::Farthest => bounce,
            HitRule::Nearest => Ray::new(bounce.origin, -bounce.direction),
        })
    }
}

/// Mirror ray leaving `point` on a sphere. Other surfaces cannot reflect.
pub fn reflect(point: Point3, surface: &Surface, ray: &Ray) -> Result<Ray> {
    match surface {
        Surface::Sphere(s) => {
            let n = (point - s.center).normalize();
            let v = ray.direction.normalize();
            Ok(Ray::new(point, n * (2.0 * n.dot(v)) - v))
        }
        other => Err(TraceError::UnsupportedOperation(format!(
            "cannot reflect off a {}",
            other.kind()
        ))),
    }
}
