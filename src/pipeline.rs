use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::Context as _;
use image::{RgbaImage, imageops::FilterType};

use crate::{
    acquire::{acquire_icons, pace},
    assets::loader::load_image,
    config::ShowcaseConfig,
    convert::SvgConverter,
    foundation::core::{Placement, Rgba8, Size},
    foundation::error::{ShowcaseError, ShowcaseResult},
    foundation::math::Rng64,
    net::Transport,
    render::composite::place_image,
};

/// Inclusive range of the numeric suffix in the output file name.
pub const OUTPUT_SUFFIX_RANGE: (u32, u32) = (1, 100);

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub icon_count: usize,
    pub placement_count: usize,
}

/// Acquire, load, lay out, draw, save and (optionally) show one collage.
#[tracing::instrument(skip_all, fields(placements = cfg.placements, layout = cfg.layout.name()))]
pub fn run(
    cfg: &ShowcaseConfig,
    transport: &dyn Transport,
    converter: &dyn SvgConverter,
    rng: &mut Rng64,
) -> ShowcaseResult<RunSummary> {
    cfg.validate()?;

    let paths = acquire_icons(cfg, transport, converter, cfg.refresh)?;
    let icons = load_icons(&paths, cfg, transport, converter)?;
    if icons.is_empty() {
        return Err(ShowcaseError::validation(
            "no icons available to draw; every source failed to convert",
        ));
    }

    let placements = cfg
        .layout
        .plan(cfg.placements, cfg.canvas, cfg.icon_size, rng)?;

    let mut canvas = new_canvas(cfg.canvas, cfg.background);
    draw_placements(&mut canvas, &icons, &placements, cfg.icon_size())?;

    let output_path = output_path(&cfg.output_dir, &cfg.output_prefix, rng)?;
    save_png(&canvas, &output_path)?;
    tracing::info!(path = %output_path.display(), "saved showcase");

    if cfg.show {
        show_image(&output_path);
    }

    Ok(RunSummary {
        output_path,
        icon_count: icons.len(),
        placement_count: placements.len(),
    })
}

fn load_icons(
    paths: &[PathBuf],
    cfg: &ShowcaseConfig,
    transport: &dyn Transport,
    converter: &dyn SvgConverter,
) -> ShowcaseResult<Vec<RgbaImage>> {
    let mut icons = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        if i > 0 {
            pace(cfg.pace());
        }
        let icon = load_image(&path.to_string_lossy(), transport, converter)?;
        tracing::debug!(path = %path.display(), w = icon.width(), h = icon.height(), "loaded icon");
        icons.push(icon);
    }
    tracing::info!(icons = icons.len(), "icons loaded");
    Ok(icons)
}

/// Solid canvas of `size` filled with `background`.
pub fn new_canvas(size: Size, background: Rgba8) -> RgbaImage {
    RgbaImage::from_pixel(size.width, size.height, background.to_pixel())
}

/// Draw `icons` cyclically at `placements`, each resized to `icon_size` first.
pub fn draw_placements(
    canvas: &mut RgbaImage,
    icons: &[RgbaImage],
    placements: &[Placement],
    icon_size: Size,
) -> ShowcaseResult<()> {
    if icons.is_empty() {
        return Err(ShowcaseError::validation("cannot draw placements without icons"));
    }

    // Every placement of the same icon uses the same resized copy.
    let resized: Vec<RgbaImage> = icons
        .iter()
        .map(|icon| {
            image::imageops::resize(
                icon,
                icon_size.width,
                icon_size.height,
                FilterType::CatmullRom,
            )
        })
        .collect();

    for (i, placement) in placements.iter().enumerate() {
        let icon = &resized[i % resized.len()];
        place_image(
            canvas,
            icon,
            placement.position(),
            f64::from(placement.rotation_deg),
            None,
        );
    }
    tracing::debug!(placements = placements.len(), "placements drawn");
    Ok(())
}

/// `<dir>/<prefix>-<n>.png` with `n` drawn from [`OUTPUT_SUFFIX_RANGE`].
pub fn output_path(dir: &Path, prefix: &str, rng: &mut Rng64) -> ShowcaseResult<PathBuf> {
    let (lo, hi) = OUTPUT_SUFFIX_RANGE;
    let n = rng.range_u32(lo, hi)?;
    Ok(dir.join(format!("{prefix}-{n}.png")))
}

/// Write `img` as an RGBA PNG, creating the parent directory. Existing files are overwritten.
pub fn save_png(img: &RgbaImage, path: &Path) -> ShowcaseResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Open `path` in the platform image viewer. Failures are logged, never returned.
pub fn show_image(path: &Path) {
    if launch_detached(viewer_command(path)) {
        tracing::debug!(path = %path.display(), "viewer launched");
    }
}

/// Spawn `cmd` with null stdio and reap it on a background thread.
///
/// Returns whether the process started; a spawn failure is logged at `warn`.
pub(crate) fn launch_detached(mut cmd: Command) -> bool {
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            tracing::warn!(
                program = ?cmd.get_program(),
                error = %err,
                "could not launch image viewer"
            );
            return false;
        }
    };
    std::thread::spawn(move || match child.wait() {
        Ok(status) => tracing::debug!(%status, "viewer exited"),
        Err(err) => tracing::debug!(error = %err, "waiting on viewer failed"),
    });
    true
}

fn viewer_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
