use std::io::Cursor;

use anyhow::Context as _;

use crate::{
    foundation::error::{ShowcaseError, ShowcaseResult},
    net::Transport,
};

/// Public SVG-to-PNG conversion service.
pub const DEFAULT_CONVERT_ENDPOINT: &str = "https://svgtopng.onrender.com/convert";

/// Turns SVG markup into encoded raster bytes (PNG).
pub trait SvgConverter {
    /// Convert `svg`. A rejected conversion is reported as [`ShowcaseError::Conversion`] so
    /// callers can tell it apart from transport failures.
    fn convert(&self, transport: &dyn Transport, svg: &str) -> ShowcaseResult<Vec<u8>>;
}

/// Converter that posts the markup to an HTTP conversion endpoint.
#[derive(Clone, Debug)]
pub struct RemoteConverter {
    endpoint: String,
}

impl RemoteConverter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for RemoteConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERT_ENDPOINT)
    }
}

impl SvgConverter for RemoteConverter {
    fn convert(&self, transport: &dyn Transport, svg: &str) -> ShowcaseResult<Vec<u8>> {
        let response = transport.post_form(&self.endpoint, &[("svg", svg)])?;
        if !response.is_ok() {
            return Err(ShowcaseError::conversion(
                response.status,
                response.text_lossy(),
            ));
        }
        Ok(response.body)
    }
}

/// Offline converter that rasterizes with `resvg`.
///
/// `target_px` scales the longest side of the SVG to that many pixels; `None` keeps the
/// intrinsic size. Markup it cannot parse or rasterize is reported as
/// [`ShowcaseError::Conversion`] with status [`LocalConverter::REJECTED_STATUS`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalConverter {
    pub target_px: Option<u32>,
}

impl LocalConverter {
    /// Status carried by conversions rejected in-process.
    pub const REJECTED_STATUS: u16 = 0;

    pub fn new(target_px: Option<u32>) -> Self {
        Self { target_px }
    }
}

fn rejected(err: impl std::fmt::Display) -> ShowcaseError {
    ShowcaseError::conversion(LocalConverter::REJECTED_STATUS, err.to_string())
}

impl SvgConverter for LocalConverter {
    fn convert(&self, _transport: &dyn Transport, svg: &str) -> ShowcaseResult<Vec<u8>> {
        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_str(svg, &opts)
            .map_err(|e| rejected(format!("parse svg tree: {e}")))?;
        let (width, height) = raster_size(&tree, self.target_px).map_err(rejected)?;
        let rgba = rasterize_svg_to_rgba8(&tree, width, height).map_err(rejected)?;

        let img = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| ShowcaseError::decode("svg raster buffer has unexpected length"))?;
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode svg raster as png")?;
        Ok(buf)
    }
}

fn raster_size(tree: &usvg::Tree, target_px: Option<u32>) -> ShowcaseResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (f64::from(size.width()), f64::from(size.height()));
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(ShowcaseError::decode("svg has invalid width/height"));
    }

    let scale = match target_px {
        Some(px) if px > 0 => f64::from(px) / w.max(h),
        _ => 1.0,
    };
    let width = (w * scale).ceil().max(1.0) as u32;
    let height = (h * scale).ceil().max(1.0) as u32;

    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(ShowcaseError::validation(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((width, height))
}

/// Rasterize into straight (non-premultiplied) RGBA8.
fn rasterize_svg_to_rgba8(tree: &usvg::Tree, width: u32, height: u32) -> ShowcaseResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ShowcaseError::validation("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    Ok(data)
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/convert.rs"]
mod tests;
