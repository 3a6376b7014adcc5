use anyhow::Context;
use clap::Parser;
use mirrorcast::{config, renderer};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mirrorcast", about = "Render a sphere/plane scene with hard shadows and mirror reflections")]
struct Opt {
    /// JSON scene description
    scene: PathBuf,
    /// Output image; overrides `render.output` from the scene file
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,
    /// Log filter, e.g. `debug` or `mirrorcast=trace`; falls back to RUST_LOG
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(l) => EnvFilter::new(l),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let opts = Opt::parse();
    init_logging(opts.log_level.as_deref());

    let file = config::load(&opts.scene)
        .with_context(|| format!("failed to load scene {}", opts.scene.display()))?;
    let (camera, scene, settings) = file.build().context("invalid scene")?;

    info!(
        focus = ?camera.focus(),
        direction = ?camera.direction(),
        aspect = camera.aspect_ratio(),
        vfov_deg = camera.vertical_fov().to_degrees(),
        "camera ready"
    );

    let (img, _report) = renderer::render(&camera, &scene, &settings, opts.quiet)
        .context("render failed")?;

    let name = opts
        .output
        .or_else(|| settings.output.clone())
        .unwrap_or_else(|| renderer::render_image_name(camera.width(), camera.height(), settings.depth));
    renderer::save(&img, &name).with_context(|| format!("failed to write {}", name.display()))?;

    info!("Saved → {}", name.display());
    Ok(())
}
