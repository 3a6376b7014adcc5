use crate::{
    camera::Camera,
    config::RenderSettings,
    error::Result,
    scene::{Scene, ShadowStats},
};
use image::{Rgb, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Intensity every primary ray starts with.
pub const PRIMARY_INTENSITY: f32 = 1.0;

/// What a finished render produced besides the pixels.
#[derive(Debug, Clone, Copy)]
pub struct RenderReport {
    pub shadow: ShadowStats,
    /// Pixels whose blended color had to be clamped into display range.
    pub clamped: u64,
}

pub fn render_image_name(w: u32, h: u32, depth: i32) -> PathBuf {
    let suf: String = rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(6).map(char::from).collect();
    PathBuf::from(format!("renders/render_{w}x{h}_d{depth}_{suf}.png"))
}

/// Trace one primary ray per pixel of the camera's grid across the rayon pool.
///
/// The first pixel that fails to trace aborts the whole render.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    settings: &RenderSettings,
    quiet: bool,
) -> Result<(RgbImage, RenderReport)> {
    let (width, height) = (camera.width(), camera.height());

    let bar = if !quiet {
        let pb = ProgressBar::new(width as u64 * height as u64);
        pb.set_style(ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} px | {elapsed_precise} | ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()));
        Some(pb)
    } else {
        None
    };

    info!(width, height, depth = settings.depth, "rendering");
    let start = Instant::now();

    let traced = camera
        .pixel_coords(width, height)
        .par_bridge()
        .map(|(x, y, point)| -> Result<_> {
            let mut stats = ShadowStats::default();
            let ray = camera.primary_ray(point);
            let color = scene.trace_with_stats(&ray, PRIMARY_INTENSITY, settings.depth, Some(&mut stats))?;
            if let Some(b) = &bar {
                b.inc(1);
            }
            Ok(((x, y), color, stats))
        })
        .collect::<Result<Vec<_>>>()?;

    if let Some(b) = bar {
        b.finish_with_message("Rendering complete");
    }

    let mut img = RgbImage::new(width, height);
    let mut report = RenderReport { shadow: ShadowStats::default(), clamped: 0 };
    for ((x, y), color, stats) in traced {
        img.put_pixel(x, y, Rgb(color.to_rgb()));
        report.shadow = report.shadow.merge(stats);
        report.clamped += color.overflows() as u64;
    }

    info!(elapsed = ?start.elapsed(), "render finished");
    if report.clamped > 0 {
        warn!(pixels = report.clamped, "blended colors exceeded display range and were clamped");
    }
    if let Some(avg) = report.shadow.average() {
        debug!(
            average = avg,
            min = report.shadow.min,
            zeros = report.shadow.zeros,
            samples = report.shadow.samples,
            "self-intersection extents on shadow rays"
        );
    }

    Ok((img, report))
}

/// Write the image, creating parent directories as needed. The format follows
/// the file extension.
pub fn save(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    img.save(path)?;
    Ok(())
}
