use crate::foundation::error::{ShowcaseError, ShowcaseResult};

/// Decode encoded image bytes and normalize to straight RGBA8.
///
/// Grayscale and RGB sources come back fully opaque.
pub fn decode_rgba(bytes: &[u8]) -> ShowcaseResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ShowcaseError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Whether `source` names an SVG document (by extension, case-insensitive).
pub fn is_svg_source(source: &str) -> bool {
    source.to_ascii_lowercase().ends_with(".svg")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
