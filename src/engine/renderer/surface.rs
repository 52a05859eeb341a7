// CPU render surfaces: frame atlases, per-character frame buffers and the screen target

use crate::core::color;
use crate::core::math::{bounds, rotate_around};
use crate::engine::assets::FrameRegion;
use glam::{Vec2, Vec4};
use image::{Rgba, RgbaImage};
use std::path::Path;

/// Mirroring applied when compositing a surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawFlags {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl DrawFlags {
    pub const NONE: Self = Self {
        flip_horizontal: false,
        flip_vertical: false,
    };
}

/// An RGBA pixel buffer that can be blitted from and composited onto
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    image: RgbaImage,
}

impl Surface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Wrap a decoded image
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Get the pixel at `(x, y)`, panics when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Get the underlying image
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Fill the whole surface with one color
    pub fn clear(&mut self, color: Vec4) {
        let pixel = color::to_pixel(color);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// Replace this surface's top-left corner with `region` of `source`
    ///
    /// Parts of the region outside either surface are skipped.
    pub fn blit_region(&mut self, source: &Surface, region: FrameRegion) {
        let width = region
            .width
            .min(self.width())
            .min(source.width().saturating_sub(region.x));
        let height = region
            .height
            .min(self.height())
            .min(source.height().saturating_sub(region.y));

        for y in 0..height {
            for x in 0..width {
                let pixel = source.pixel(region.x + x, region.y + y);
                self.image.put_pixel(x, y, pixel);
            }
        }
    }

    /// Composite `source` onto this surface
    ///
    /// The point `pivot` of `source` lands on `dest`, and the image is rotated
    /// about it by `angle` radians. Every source pixel is multiplied by `tint`.
    pub fn draw_tinted_rotated(
        &mut self,
        source: &Surface,
        tint: Vec4,
        pivot: Vec2,
        dest: Vec2,
        angle: f32,
        flags: DrawFlags,
    ) {
        let (src_w, src_h) = source.dimensions();
        if src_w == 0 || src_h == 0 || self.width() == 0 || self.height() == 0 {
            return;
        }

        // Destination bounding box of the rotated source rectangle
        let offset = dest - pivot;
        let corners = [
            Vec2::ZERO,
            Vec2::new(src_w as f32, 0.0),
            Vec2::new(0.0, src_h as f32),
            Vec2::new(src_w as f32, src_h as f32),
        ]
        .map(|corner| rotate_around(corner, pivot, angle) + offset);
        let Some((min, max)) = bounds(&corners) else {
            return;
        };

        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().max(0.0) as u32).min(self.width());
        let y1 = (max.y.ceil().max(0.0) as u32).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                // Map the destination pixel center back into source space
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let src = rotate_around(center - offset, pivot, -angle);
                if src.x < 0.0 || src.y < 0.0 {
                    continue;
                }

                let (sx, sy) = (src.x as u32, src.y as u32);
                if sx >= src_w || sy >= src_h {
                    continue;
                }

                let sx = if flags.flip_horizontal { src_w - 1 - sx } else { sx };
                let sy = if flags.flip_vertical { src_h - 1 - sy } else { sy };

                let color = color::from_pixel(source.pixel(sx, sy)) * tint;
                if color.w <= 0.0 {
                    continue;
                }

                let below = color::from_pixel(self.pixel(x, y));
                self.image
                    .put_pixel(x, y, color::to_pixel(color::blend_over(color, below)));
            }
        }
    }

    /// Composite `source` with its top-left corner at `dest`
    pub fn draw(&mut self, source: &Surface, dest: Vec2) {
        self.draw_tinted_rotated(source, color::WHITE, Vec2::ZERO, dest, 0.0, DrawFlags::NONE);
    }

    /// Release the pixel data, leaving an empty surface
    pub fn release(&mut self) {
        self.image = RgbaImage::new(0, 0);
    }

    /// Save the surface as an image file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.image.save(path)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::{rgb, WHITE};
    use std::f32::consts::PI;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    /// 2x1 surface: red on the left, green on the right
    fn red_green() -> Surface {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, RED);
        image.put_pixel(1, 0, GREEN);
        Surface::from_image(image)
    }

    #[test]
    fn test_new_surface_is_transparent() {
        let surface = Surface::new(3, 2);
        assert_eq!(surface.dimensions(), (3, 2));
        assert!(surface.image().pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn test_clear() {
        let mut surface = Surface::new(2, 2);
        surface.clear(rgb(0, 0, 170));
        assert_eq!(surface.pixel(1, 1), Rgba([0, 0, 170, 255]));
    }

    #[test]
    fn test_blit_region_copies_cell() {
        let mut atlas = Surface::new(4, 2);
        atlas.image.put_pixel(2, 1, RED);
        atlas.image.put_pixel(3, 1, GREEN);

        let mut frame = Surface::new(2, 1);
        frame.blit_region(&atlas, FrameRegion { x: 2, y: 1, width: 2, height: 1 });

        assert_eq!(frame.pixel(0, 0), RED);
        assert_eq!(frame.pixel(1, 0), GREEN);
    }

    #[test]
    fn test_blit_region_clips_to_source() {
        let atlas = red_green();
        let mut frame = Surface::new(2, 2);
        frame.blit_region(&atlas, FrameRegion { x: 1, y: 0, width: 2, height: 2 });

        assert_eq!(frame.pixel(0, 0), GREEN);
        assert_eq!(frame.pixel(1, 0), CLEAR);
        assert_eq!(frame.pixel(0, 1), CLEAR);
    }

    #[test]
    fn test_draw_unrotated() {
        let mut target = Surface::new(4, 3);
        target.draw(&red_green(), Vec2::new(1.0, 2.0));

        assert_eq!(target.pixel(1, 2), RED);
        assert_eq!(target.pixel(2, 2), GREEN);
        assert_eq!(target.pixel(0, 2), CLEAR);
        assert_eq!(target.pixel(1, 1), CLEAR);
    }

    #[test]
    fn test_draw_flipped() {
        let mut target = Surface::new(2, 1);
        let flags = DrawFlags {
            flip_horizontal: true,
            ..DrawFlags::NONE
        };
        target.draw_tinted_rotated(&red_green(), WHITE, Vec2::ZERO, Vec2::ZERO, 0.0, flags);

        assert_eq!(target.pixel(0, 0), GREEN);
        assert_eq!(target.pixel(1, 0), RED);
    }

    #[test]
    fn test_draw_half_turn_about_right_edge() {
        // Pivot on the right edge, so a half turn swings the image to the right
        let mut target = Surface::new(4, 1);
        let pivot = Vec2::new(2.0, 0.5);
        target.draw_tinted_rotated(&red_green(), WHITE, pivot, Vec2::new(2.0, 0.5), PI, DrawFlags::NONE);

        assert_eq!(target.pixel(0, 0), CLEAR);
        assert_eq!(target.pixel(1, 0), CLEAR);
        assert_eq!(target.pixel(2, 0), GREEN);
        assert_eq!(target.pixel(3, 0), RED);
    }

    #[test]
    fn test_draw_tinted() {
        let mut target = Surface::new(2, 1);
        target.draw_tinted_rotated(
            &red_green(),
            rgb(128, 255, 255),
            Vec2::ZERO,
            Vec2::ZERO,
            0.0,
            DrawFlags::NONE,
        );

        assert_eq!(target.pixel(0, 0), Rgba([128, 0, 0, 255]));
        assert_eq!(target.pixel(1, 0), GREEN);
    }

    #[test]
    fn test_draw_off_target_is_ignored() {
        let mut target = Surface::new(2, 2);
        target.draw(&red_green(), Vec2::new(-10.0, 50.0));
        assert!(target.image().pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn test_release() {
        let mut surface = red_green();
        surface.release();
        assert_eq!(surface.dimensions(), (0, 0));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        red_green().save(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.get_pixel(1, 0), &GREEN);
    }
}
