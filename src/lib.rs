//! Whitted-style ray tracer for scenes of spheres and checkerboard planes lit
//! by a single point light.

pub mod algebra;
pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod plane;
pub mod renderer;
pub mod scene;
pub mod sphere;
pub mod surface;

pub use camera::Camera;
pub use color::{blend, RayColor};
pub use error::{Result, TraceError};
pub use scene::{HitRule, Scene};
pub use surface::{HitResult, Surface};
