use super::sheet::{SpriteSheet, DIGIT_COUNT};

/// Per-digit left-trim offsets, in pixels.
///
/// Index = digit value, entry = x offset of the first column in that
/// digit's cell containing a pixel with non-zero alpha. Measured once at
/// startup, immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitMetrics {
    offsets: [u32; DIGIT_COUNT as usize],
}

impl DigitMetrics {
    /// Scans each digit cell column-major (x outer, y inner) and records
    /// the first opaque column. A cell with no opaque pixel keeps offset 0,
    /// so that digit is drawn untrimmed.
    pub fn measure(sheet: &SpriteSheet) -> Self {
        let mut offsets = [0u32; DIGIT_COUNT as usize];
        let image = sheet.image();
        let digit_width = sheet.digit_width();

        for digit in 0..DIGIT_COUNT {
            let base_x = digit * digit_width;
            'cell: for x in 0..digit_width {
                for y in 0..image.height() {
                    if image.get_pixel(base_x + x, y).0[3] != 0 {
                        offsets[digit as usize] = x;
                        break 'cell;
                    }
                }
            }
        }

        Self { offsets }
    }

    /// Left-trim offset for a digit. Callers must pass a value in 0..=9,
    /// as produced by base-10 digit extraction.
    pub fn offset(&self, digit: u32) -> u32 {
        debug_assert!(digit < DIGIT_COUNT, "digit out of range: {}", digit);
        self.offsets[digit as usize]
    }
}
