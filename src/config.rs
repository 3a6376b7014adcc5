//! Scene files: JSON description of camera, render settings, light and
//! surfaces, turned into a ready-to-trace [`Camera`] and [`Scene`].

use crate::{
    algebra::{vec3_from_array, Vec3},
    camera::Camera,
    error::{Result, TraceError},
    plane::Plane,
    scene::{HitRule, Scene, DEFAULT_BACKGROUND},
    sphere::Sphere,
    surface::Surface,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

fn default_focus() -> Vec<f32> { vec![1.0, 0.0, 0.0] }
fn default_rotation() -> Vec<f32> { vec![0.0, 0.0, 0.0] }
fn default_fov() -> f32 { 90.0 }
fn default_one() -> f32 { 1.0 }
fn default_depth() -> i32 { 1 }
fn default_background() -> Vec3 { DEFAULT_BACKGROUND }
fn default_sphere_color() -> Vec3 { Vec3(255.0, 255.0, 0.0) }
fn default_plane_color2() -> Vec3 { Vec3(200.0, 200.0, 200.0) }

/// Focus and rotation stay loose arrays here; [`Camera::new`] checks their
/// length so a bad file surfaces as an invalid argument.
#[derive(Deserialize, Debug, Clone)]
pub struct CameraJson {
    #[serde(default = "default_focus")]
    pub focus: Vec<f32>,
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_rotation")]
    pub rotation: Vec<f32>,
    #[serde(default = "default_one")]
    pub zoom: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RenderJson {
    pub width: u32,
    pub height: u32,
    /// Bounce budget handed to the tracer for every primary ray.
    #[serde(default = "default_depth")]
    pub depth: i32,
    #[serde(default)]
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum ObjectJson {
    Sphere { sphere: SphereDesc },
    Plane { plane: PlaneDesc },
}

#[derive(Deserialize, Debug, Clone)]
pub struct SphereDesc {
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "vec3_from_array")]
    pub center: Vec3,
    pub radius: f32,
    #[serde(default = "default_sphere_color", deserialize_with = "vec3_from_array")]
    pub color: Vec3,
    #[serde(default)]
    pub reflectivity: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlaneDesc {
    #[serde(default)]
    pub name: String,
    #[serde(deserialize_with = "vec3_from_array")]
    pub point: Vec3,
    #[serde(deserialize_with = "vec3_from_array")]
    pub u: Vec3,
    #[serde(deserialize_with = "vec3_from_array")]
    pub v: Vec3,
    #[serde(default = "default_one")]
    pub cell_size: f32,
    #[serde(default, deserialize_with = "vec3_from_array")]
    pub color1: Vec3,
    #[serde(default = "default_plane_color2", deserialize_with = "vec3_from_array")]
    pub color2: Vec3,
    #[serde(default)]
    pub reflectivity: f32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SceneFile {
    pub camera: CameraJson,
    pub render: RenderJson,
    #[serde(deserialize_with = "vec3_from_array")]
    pub light: Vec3,
    #[serde(default = "default_background", deserialize_with = "vec3_from_array")]
    pub background: Vec3,
    #[serde(default)]
    pub hit_rule: HitRule,
    #[serde(default)]
    objects: Vec<ObjectJson>,
}

/// Everything the renderer needs besides the camera and the scene. The image
/// size lives on the camera.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    pub depth: i32,
    pub output: Option<PathBuf>,
}

pub fn load(path: impl AsRef<Path>) -> Result<SceneFile> {
    let path = path.as_ref();
    info!("opening scene file at {}", path.display());
    let data = std::fs::read_to_string(path)?;
    parse(&data)
}

pub fn parse(data: &str) -> Result<SceneFile> {
    Ok(serde_json::from_str(data)?)
}

impl SceneFile {
    pub fn build(&self) -> Result<(Camera, Scene, RenderSettings)> {
        let r = &self.render;
        let c = &self.camera;
        let camera = Camera::new(&c.focus, c.fov, r.width, r.height, &c.rotation, c.zoom)?;
        if r.depth < 0 {
            return Err(TraceError::InvalidArgument(format!(
                "render depth must not be negative, got {}",
                r.depth
            )));
        }

        let mut scene = Scene::new(self.light)
            .with_background(self.background)
            .with_hit_rule(self.hit_rule);

        for o in &self.objects {
            let surface: Surface = match o {
                ObjectJson::Sphere { sphere } => {
                    Sphere::new(sphere.center, sphere.radius, sphere.color, sphere.reflectivity)
                        .map_err(|e| named(&sphere.name, e))?
                        .into()
                }
                ObjectJson::Plane { plane } => {
                    // Only spheres know how to reflect.
                    if plane.reflectivity != 0.0 {
                        return Err(named(
                            &plane.name,
                            TraceError::InvalidArgument(format!(
                                "planes cannot be reflective, got reflectivity {}",
                                plane.reflectivity
                            )),
                        ));
                    }
                    Plane::new(
                        plane.point,
                        plane.u,
                        plane.v,
                        plane.cell_size,
                        (plane.color1, plane.color2),
                        plane.reflectivity,
                    )
                    .map_err(|e| named(&plane.name, e))?
                    .into()
                }
            };
            scene.push(surface);
        }

        info!(
            objects = scene.objects.len(),
            light = ?scene.light,
            hit_rule = ?scene.hit_rule,
            "scene assembled"
        );

        let settings = RenderSettings {
            depth: r.depth,
            output: r.output.clone(),
        };
        Ok((camera, scene, settings))
    }
}

fn named(name: &str, e: TraceError) -> TraceError {
    match e {
        TraceError::InvalidArgument(msg) if !name.is_empty() => {
            TraceError::InvalidArgument(format!("object '{name}': {msg}"))
        }
        other => other,
    }
}
