use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::{Affine, Point, Rect, Rgba8},
    foundation::math::lerp_u8,
};

/// Mix ratio between an overlay and its tint color.
pub const TINT_MIX: f32 = 0.5;

/// Per-channel linear mix `a + t * (b - a)` of two straight RGBA8 pixels, alpha included.
///
/// The result is truncated toward zero, so mixing either way at `t = 0.5` lands on the same
/// value.
pub fn blend(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 4];
    for (i, o) in out.iter_mut().enumerate() {
        let (from, to) = (f32::from(a[i]), f32::from(b[i]));
        *o = (from + t * (to - from)).clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Blend `overlay` with a solid layer of `color` at [`TINT_MIX`].
pub fn tint(overlay: &RgbaImage, color: Rgba8) -> RgbaImage {
    let solid = color.to_pixel();
    let mut out = overlay.clone();
    for px in out.pixels_mut() {
        *px = blend(*px, solid, TINT_MIX);
    }
    out
}

/// Rotate counter-clockwise by `degrees`, growing the canvas so no corner is clipped.
///
/// Nearest-neighbour sampling; uncovered pixels are transparent. Quarter turns of a square
/// keep its size exactly.
pub fn rotate_expand(src: &RgbaImage, degrees: f64) -> RgbaImage {
    let angle = degrees.rem_euclid(360.0);
    if angle == 0.0 {
        return src.clone();
    }

    let (w, h) = src.dimensions();
    // Screen space has y pointing down, so a counter-clockwise turn is a negative kurbo angle.
    let rad = -angle.to_radians();
    let (s, c) = (snap(rad.sin()), snap(rad.cos()));
    let rot = Affine::new([c, s, -s, c, 0.0, 0.0]);

    let (hw, hh) = (f64::from(w) / 2.0, f64::from(h) / 2.0);
    let bbox = rot.transform_rect_bbox(Rect::new(-hw, -hh, hw, hh));
    let out_w = (snap(bbox.x1).ceil() - snap(bbox.x0).floor()).max(1.0) as u32;
    let out_h = (snap(bbox.y1).ceil() - snap(bbox.y0).floor()).max(1.0) as u32;

    let to_dest = Affine::translate((f64::from(out_w) / 2.0, f64::from(out_h) / 2.0))
        * rot
        * Affine::translate((-hw, -hh));
    let to_src = to_dest.inverse();

    let mut out = RgbaImage::new(out_w, out_h);
    for (dx, dy, px) in out.enumerate_pixels_mut() {
        let p = to_src * Point::new(f64::from(dx) + 0.5, f64::from(dy) + 0.5);
        let (sx, sy) = (snap(p.x).floor(), snap(p.y).floor());
        if sx >= 0.0 && sy >= 0.0 && sx < f64::from(w) && sy < f64::from(h) {
            *px = *src.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

fn snap(v: f64) -> f64 {
    const GRID: f64 = 1e9;
    (v * GRID).round() / GRID
}

/// Paste `overlay` with its top-left corner at `(x, y)`, using its alpha as the mask.
///
/// Every channel of a covered base pixel moves toward the overlay by the overlay's alpha.
/// Anything outside the base is clipped.
pub fn paste_with_alpha(base: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    let (bw, bh) = (i64::from(base.width()), i64::from(base.height()));
    let (ow, oh) = (i64::from(overlay.width()), i64::from(overlay.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + ow).min(bw);
    let y1 = (y + oh).min(bh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    for by in y0..y1 {
        for bx in x0..x1 {
            let src = *overlay.get_pixel((bx - x) as u32, (by - y) as u32);
            let mask = src[3];
            if mask == 0 {
                continue;
            }
            let dst = base.get_pixel_mut(bx as u32, by as u32);
            if mask == 255 {
                *dst = src;
                continue;
            }
            for i in 0..4 {
                dst[i] = lerp_u8(dst[i], src[i], mask);
            }
        }
    }
}

/// Private copy of `overlay` with the optional tint and rotation applied, in that order.
pub fn prepare_overlay(
    overlay: &RgbaImage,
    rotation_deg: f64,
    tint_color: Option<Rgba8>,
) -> RgbaImage {
    let tinted = match tint_color {
        Some(color) => tint(overlay, color),
        None => overlay.clone(),
    };
    if rotation_deg != 0.0 {
        rotate_expand(&tinted, rotation_deg)
    } else {
        tinted
    }
}

/// Draw `overlay` onto `base` at `position`, optionally tinted and rotated.
///
/// The caller's overlay is never modified. Returns `base` for chaining.
pub fn place_image<'a>(
    base: &'a mut RgbaImage,
    overlay: &RgbaImage,
    position: (i64, i64),
    rotation_deg: f64,
    tint_color: Option<Rgba8>,
) -> &'a mut RgbaImage {
    let prepared = prepare_overlay(overlay, rotation_deg, tint_color);
    paste_with_alpha(base, &prepared, position.0, position.1);
    base
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
