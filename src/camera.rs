//! src/camera.rs
//! -------------
//! Pinhole camera looking down −X at a flat virtual screen. The screen sits in
//! the plane through the origin; the focus point is the eye. Rotation turns
//! the whole rig (eye and screen) about the world axes.

use crate::{
    algebra::{Point3, Ray, Rotate, Vec3},
    error::{Result, TraceError},
};
use tracing::debug;

#[derive(Clone, Debug)]
pub struct Camera {
    // inputs
    eye      : Point3,
    fov      : f32,       // horizontal, radians
    width    : u32,
    height   : u32,
    zoom     : f32,
    rotation : [f32; 3],  // radians about X, Y, Z

    // derived, see `recompute`
    focus     : Point3,
    left      : Vec3,
    right     : Vec3,
    top       : Vec3,
    bottom    : Vec3,
    direction : Vec3,
    vfov      : f32,
    top_left  : Point3,
    horizontal: Vec3,
    vertical  : Vec3,
}

fn triple(name: &str, v: &[f32]) -> Result<[f32; 3]> {
    <[f32; 3]>::try_from(v).map_err(|_| {
        TraceError::InvalidArgument(format!(
            "'{name}' must have exactly 3 components, got {}",
            v.len()
        ))
    })
}

fn screen_point(
    top_left: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    (x, y): (u32, u32),
    (w, h): (u32, u32),
) -> Point3 {
    top_left + horizontal * (x as f32 / w as f32) + vertical * (y as f32 / h as f32)
}

impl Camera {
    /// `fov_deg` and `rotation_deg` are in degrees. `focus` and
    /// `rotation_deg` must hold exactly three components.
    pub fn new(
        focus: &[f32],
        fov_deg: f32,
        width: u32,
        height: u32,
        rotation_deg: &[f32],
        zoom: f32,
    ) -> Result<Self> {
        let eye = Vec3::from(triple("focus", focus)?);
        let [rx, ry, rz] = triple("rotation", rotation_deg)?;
        if width == 0 || height == 0 {
            return Err(TraceError::InvalidArgument(format!(
                "image size must be non-zero, got {width}x{height}"
            )));
        }
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(TraceError::InvalidArgument(format!(
                "field of view must be within (0, 180) degrees, got {fov_deg}"
            )));
        }
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(TraceError::InvalidArgument(format!("zoom must be positive, got {zoom}")));
        }

        let mut cam = Self {
            eye,
            fov: fov_deg.to_radians(),
            width,
            height,
            zoom,
            rotation: [rx.to_radians(), ry.to_radians(), rz.to_radians()],
            focus: eye,
            left: Vec3::ZERO,
            right: Vec3::ZERO,
            top: Vec3::ZERO,
            bottom: Vec3::ZERO,
            direction: Vec3::ZERO,
            vfov: 0.0,
            top_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
        };
        cam.recompute();
        Ok(cam)
    }

    fn recompute(&mut self) {
        // horizontal extent of the screen
        let ly = -self.zoom * (self.fov / 2.0).tan();
        let ry = -ly;
        self.left = Vec3(0.0, ly, 0.0) - self.eye;
        self.right = Vec3(0.0, ry, 0.0) - self.eye;
        self.direction = Vec3(-1.0, 0.0, 0.0) * self.zoom;

        // vertical angle from the screen's width/height ratio
        let screen_w = ry * 2.0;
        let screen_h = screen_w / self.aspect_ratio();
        self.vfov = (screen_h / 2.0 / self.zoom).atan() * 2.0;
        let tz = self.zoom * (self.vfov / 2.0).tan();
        self.top = Vec3(0.0, 0.0, tz) - self.eye;
        self.bottom = Vec3(0.0, 0.0, -tz) - self.eye;

        self.focus = self.eye;
        for (i, &t) in self.rotation.iter().enumerate() {
            if t == 0.0 {
                continue;
            }
            let axis = Vec3::axis(i);
            self.left = self.left.rotated(axis, t);
            self.right = self.right.rotated(axis, t);
            self.top = self.top.rotated(axis, t);
            self.bottom = self.bottom.rotated(axis, t);
            self.direction = self.direction.rotated(axis, t);
            self.focus = self.focus.rotated(axis, t);
        }

        self.horizontal = self.right - self.left;
        self.vertical = self.bottom - self.top;
        self.top_left = self.focus + self.left - self.vertical * 0.5;

        debug!(
            focus = ?self.focus,
            vfov_deg = self.vfov.to_degrees(),
            top_left = ?self.top_left,
            horizontal = ?self.horizontal,
            vertical = ?self.vertical,
            "camera frame"
        );
    }

    pub fn set_zoom(&mut self, zoom: f32) -> Result<()> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(TraceError::InvalidArgument(format!("zoom must be positive, got {zoom}")));
        }
        self.zoom = zoom;
        self.recompute();
        Ok(())
    }

    /// Rotation in degrees about X, Y and Z, applied in that order.
    pub fn set_rotation(&mut self, rotation_deg: &[f32]) -> Result<()> {
        let r = triple("rotation", rotation_deg)?;
        self.rotation = r.map(f32::to_radians);
        self.recompute();
        Ok(())
    }

    pub fn set_focus(&mut self, focus: &[f32]) -> Result<()> {
        self.eye = Vec3::from(triple("focus", focus)?);
        self.recompute();
        Ok(())
    }

    pub fn aspect_ratio(&self) -> f32 { self.width as f32 / self.height as f32 }
    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn focus(&self) -> Point3 { self.focus }
    pub fn direction(&self) -> Vec3 { self.direction }
    pub fn top_left(&self) -> Point3 { self.top_left }
    pub fn horizontal(&self) -> Vec3 { self.horizontal }
    pub fn vertical(&self) -> Vec3 { self.vertical }
    pub fn vertical_fov(&self) -> f32 { self.vfov }

    /// Point on the screen for pixel (`x`, `y`) of a `w`×`h` grid.
    pub fn world_point(&self, x: u32, y: u32, w: u32, h: u32) -> Point3 {
        screen_point(self.top_left, self.horizontal, self.vertical, (x, y), (w, h))
    }

    /// Ray from the screen point away from the eye.
    pub fn primary_ray(&self, world_point: Point3) -> Ray {
        Ray::new(world_point, world_point - self.focus)
    }

    /// Every pixel of a `w`×`h` grid with its screen point, column by column.
    pub fn pixel_coords(&self, w: u32, h: u32) -> PixelCoords {
        PixelCoords {
            top_left: self.top_left,
            horizontal: self.horizontal,
            vertical: self.vertical,
            w,
            h,
            next: 0,
        }
    }
}

/// Lazy pixel walk returned by [`Camera::pixel_coords`]. Clone it to restart.
#[derive(Clone, Debug)]
pub struct PixelCoords {
    top_left  : Point3,
    horizontal: Vec3,
    vertical  : Vec3,
    w         : u32,
    h         : u32,
    next      : u64,
}

impl PixelCoords {
    fn total(&self) -> u64 { self.w as u64 * self.h as u64 }
}

impl Iterator for PixelCoords {
    type Item = (u32, u32, Point3);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total() {
            return None;
        }
        let x = (self.next / self.h as u64) as u32;
        let y = (self.next % self.h as u64) as u32;
        self.next += 1;
        let p = screen_point(self.top_left, self.horizontal, self.vertical, (x, y), (self.w, self.h));
        Some((x, y, p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total() - self.next.min(self.total())) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for PixelCoords {}
