use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

/// Number of digit glyphs packed side by side in a sheet.
pub const DIGIT_COUNT: u32 = 10;

/// Digit sprite sheet bundled into the binary.
static SHEET_DATA: &[u8] = include_bytes!("../../assets/digits.png");

/// Errors raised while loading a digit sprite sheet.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("failed to read sprite sheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode sprite sheet: {0}")]
    Decode(#[from] image::ImageError),
    /// The sheet is too small for 10 digit cells; scanning it would read
    /// outside its pixel bounds.
    #[error("sprite sheet is {width}x{height} px, too small for 10 digit cells {digit_width} px wide")]
    ResourceBounds {
        width: u32,
        height: u32,
        digit_width: u32,
    },
}

/// A decoded digit sprite sheet: 10 equal-width glyph cells side by side.
///
/// Loaded once at startup and never mutated. Cell geometry is validated
/// here, so measurement and compositing can index pixels freely.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    image: RgbaImage,
    digit_width: u32,
}

impl SpriteSheet {
    /// Wraps an already-decoded image, validating cell geometry.
    ///
    /// `digit_width` = sheet width / 10 rounded half to even; the last
    /// cell must still fit inside the actual pixel width.
    pub fn from_image(image: RgbaImage) -> Result<Self, SheetError> {
        let (width, height) = image.dimensions();
        let digit_width = round_half_to_even(width, DIGIT_COUNT);
        if digit_width == 0 || DIGIT_COUNT * digit_width > width || height == 0 {
            return Err(SheetError::ResourceBounds {
                width,
                height,
                digit_width,
            });
        }
        Ok(Self { image, digit_width })
    }

    /// Decodes a PNG sprite sheet from memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SheetError> {
        Self::from_image(image::load_from_memory(bytes)?.to_rgba8())
    }

    /// Loads a sprite sheet from disk.
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    /// The sheet shipped inside the binary.
    pub fn bundled() -> Result<Self, SheetError> {
        Self::from_bytes(SHEET_DATA)
    }

    pub fn digit_width(&self) -> u32 {
        self.digit_width
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

// value / divisor rounded half to even: an 85 px sheet measures 8 px
// cells, not 9.
fn round_half_to_even(value: u32, divisor: u32) -> u32 {
    let quotient = value / divisor;
    let remainder = value % divisor;
    match (2 * remainder).cmp(&divisor) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}
