use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    assets::decode::{decode_rgba, is_svg_source},
    convert::SvgConverter,
    foundation::error::ShowcaseResult,
    net::{Transport, is_remote},
};

/// Load a local path or `http(s)` URL as an RGBA8 image.
///
/// SVG sources are converted first. Nothing is retried or swallowed: fetch, conversion and
/// decode failures all reach the caller.
#[tracing::instrument(skip(transport, converter))]
pub fn load_image(
    source: &str,
    transport: &dyn Transport,
    converter: &dyn SvgConverter,
) -> ShowcaseResult<RgbaImage> {
    if is_svg_source(source) {
        return load_svg(source, transport, converter);
    }

    let bytes = if is_remote(source) {
        transport.get_bytes(source)?
    } else {
        std::fs::read(source).with_context(|| format!("read image '{source}'"))?
    };
    decode_rgba(&bytes)
}

/// Read SVG markup from `source`, convert it and decode the raster.
pub fn load_svg(
    source: &str,
    transport: &dyn Transport,
    converter: &dyn SvgConverter,
) -> ShowcaseResult<RgbaImage> {
    let svg = read_svg_text(source, transport)?;
    let png = converter.convert(transport, &svg)?;
    decode_rgba(&png)
}

pub(crate) fn read_svg_text(source: &str, transport: &dyn Transport) -> ShowcaseResult<String> {
    if is_remote(source) {
        return transport.get_text(source);
    }
    Ok(std::fs::read_to_string(source).with_context(|| format!("read svg '{source}'"))?)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
