use image::RgbaImage;

use crate::glyphs::{DigitMetrics, SpriteSheet};

/// Icon canvas edge length, the standard small tray icon size.
pub const CANVAS_SIZE: u32 = 16;

/// Composites a battery percentage onto a fixed 16x16 canvas using the
/// measured digit glyphs.
///
/// Owns the sprite sheet and its metrics; both are read-only after
/// construction, so one compositor serves every render.
pub struct IconCompositor {
    sheet: SpriteSheet,
    metrics: DigitMetrics,
}

impl IconCompositor {
    pub fn new(sheet: SpriteSheet) -> Self {
        let metrics = DigitMetrics::measure(&sheet);
        Self { sheet, metrics }
    }

    /// Renders `value` onto a fresh transparent canvas.
    ///
    /// Digits are extracted ones-place first and stamped right-to-left:
    /// the cursor starts at the right edge and moves left by each glyph's
    /// trimmed width before the glyph is copied in. A value of 0 leaves
    /// the canvas empty, since the extraction loop never runs.
    pub fn render(&self, value: u32) -> RgbaImage {
        let mut canvas = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
        let digit_width = self.sheet.digit_width();
        let rows = self.sheet.height().min(CANVAS_SIZE);

        let mut cursor = CANVAS_SIZE as i64;
        let mut remaining = value;
        while remaining != 0 {
            let digit = remaining % 10;
            remaining /= 10;

            let offset = self.metrics.offset(digit);
            let draw_width = digit_width - offset;
            cursor -= draw_width as i64;

            self.blit(
                &mut canvas,
                cursor,
                digit * digit_width + offset,
                draw_width,
                rows,
            );
        }

        canvas
    }

    // Copies a sheet sub-rectangle onto the canvas at (dest_x, 0). Columns
    // outside the canvas are dropped, so values wider than 16 px clip
    // silently instead of erroring.
    fn blit(&self, canvas: &mut RgbaImage, dest_x: i64, src_x: u32, width: u32, rows: u32) {
        for col in 0..width {
            let x = dest_x + col as i64;
            if x < 0 || x >= CANVAS_SIZE as i64 {
                continue;
            }
            for row in 0..rows {
                let pixel = *self.sheet.image().get_pixel(src_x + col, row);
                canvas.put_pixel(x as u32, row, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// Sheet with 4 px cells, each cell filled with a color keyed to its
    /// digit and a 1 px transparent left margin (trimmed width 3).
    fn keyed_sheet() -> SpriteSheet {
        let mut image = RgbaImage::new(40, 16);
        for digit in 0..10u32 {
            for x in 1..4 {
                for y in 0..16 {
                    image.put_pixel(digit * 4 + x, y, Rgba([digit as u8 * 20, 0, 0, 255]));
                }
            }
        }
        SpriteSheet::from_image(image).unwrap()
    }

    fn column_alpha(canvas: &RgbaImage, x: u32) -> u8 {
        canvas.get_pixel(x, 0).0[3]
    }

    #[test]
    fn test_render_zero_is_transparent() {
        let compositor = IconCompositor::new(keyed_sheet());
        let canvas = compositor.render(0);
        assert!(canvas.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn test_single_digit_right_aligned() {
        let compositor = IconCompositor::new(keyed_sheet());
        let canvas = compositor.render(7);

        // Trimmed glyph is 3 px wide, flush against the right edge
        for x in 0..13 {
            assert_eq!(column_alpha(&canvas, x), 0, "column {}", x);
        }
        for x in 13..16 {
            assert_eq!(canvas.get_pixel(x, 0).0, [140, 0, 0, 255]);
        }
    }

    #[test]
    fn test_two_digits_right_to_left() {
        let compositor = IconCompositor::new(keyed_sheet());
        let canvas = compositor.render(42);

        // Ones digit (2) at the right edge, tens digit (4) to its left
        for x in 13..16 {
            assert_eq!(canvas.get_pixel(x, 0).0, [40, 0, 0, 255]);
        }
        for x in 10..13 {
            assert_eq!(canvas.get_pixel(x, 0).0, [80, 0, 0, 255]);
        }
        for x in 0..10 {
            assert_eq!(column_alpha(&canvas, x), 0, "column {}", x);
        }
    }

    #[test]
    fn test_drawn_width_is_sum_of_trimmed_widths() {
        let compositor = IconCompositor::new(keyed_sheet());
        for value in [5u32, 42, 99] {
            let canvas = compositor.render(value);
            let drawn = (0..16).filter(|&x| column_alpha(&canvas, x) != 0).count();
            let expected: u32 = {
                let mut v = value;
                let mut sum = 0;
                while v != 0 {
                    sum += 3; // every glyph trims to 3 px
                    v /= 10;
                }
                sum
            };
            assert_eq!(drawn as u32, expected, "value {}", value);
        }
    }

    #[test]
    fn test_wide_value_clips_silently() {
        let compositor = IconCompositor::new(keyed_sheet());
        // 10 digits * 3 px = 30 px, well past the 16 px canvas
        let canvas = compositor.render(u32::MAX);
        assert_eq!(canvas.dimensions(), (16, 16));
        // Right edge still holds the ones digit of 4294967295
        assert_eq!(canvas.get_pixel(15, 0).0, [100, 0, 0, 255]);
    }

    #[test]
    fn test_short_sheet_clips_rows() {
        // 8 px tall sheet fills only the top half of the canvas
        let mut image = RgbaImage::new(40, 8);
        for x in 0..40 {
            for y in 0..8 {
                image.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let compositor = IconCompositor::new(SpriteSheet::from_image(image).unwrap());
        let canvas = compositor.render(7);
        assert_eq!(canvas.get_pixel(15, 7).0[3], 255);
        assert_eq!(canvas.get_pixel(15, 8).0[3], 0);
    }
}
