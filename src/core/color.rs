// Color helpers
//
// Colors are straight-alpha RGBA in `[0, 1]`, stored as `Vec4` like sprite tints.

use glam::Vec4;
use image::Rgba;

pub const WHITE: Vec4 = Vec4::ONE;
pub const BLACK: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);
pub const TRANSPARENT: Vec4 = Vec4::ZERO;

/// Opaque color from 8-bit channels
pub fn rgb(r: u8, g: u8, b: u8) -> Vec4 {
    rgba(r, g, b, 255)
}

/// Color from 8-bit channels
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Vec4 {
    Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0
}

/// Convert a pixel into a color
pub fn from_pixel(pixel: Rgba<u8>) -> Vec4 {
    let [r, g, b, a] = pixel.0;
    rgba(r, g, b, a)
}

/// Convert a color into a pixel, clamping out-of-range channels
pub fn to_pixel(color: Vec4) -> Rgba<u8> {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    Rgba([c.x as u8, c.y as u8, c.z as u8, c.w as u8])
}

/// Composite `src` over `dst` (straight alpha)
pub fn blend_over(src: Vec4, dst: Vec4) -> Vec4 {
    let out_a = src.w + dst.w * (1.0 - src.w);
    if out_a <= f32::EPSILON {
        return TRANSPARENT;
    }
    let rgb = (src.truncate() * src.w + dst.truncate() * dst.w * (1.0 - src.w)) / out_a;
    rgb.extend(out_a)
}
