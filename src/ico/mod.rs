use anyhow::Result;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, RgbaImage};

/// Byte offset of the image payload: 6-byte header + one 16-byte entry.
const PAYLOAD_OFFSET: u32 = 22;

/// Serializes an image as a single-frame ICO container.
///
/// Layout:
/// ```text
/// offset 0  : u16 LE reserved = 0
/// offset 2  : u16 LE type = 1 (icon)
/// offset 4  : u16 LE image count = 1
/// offset 6  : u8 width  (0 means 256)
/// offset 7  : u8 height (0 means 256)
/// offset 8  : u8 palette colors = 0
/// offset 9  : u8 reserved = 0
/// offset 10 : u16 LE color planes = 0
/// offset 12 : u16 LE bits per pixel = 0
/// offset 14 : u32 LE payload size (back-patched)
/// offset 18 : u32 LE payload offset = 22
/// offset 22 : PNG payload
/// ```
///
/// The payload is PNG rather than the uncompressed BMP the container
/// traditionally carries: PNG keeps the alpha channel intact, where the
/// usual image-to-icon conversion path flattens it.
pub fn encode(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(PAYLOAD_OFFSET as usize + 256);

    // Header
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());

    // Directory entry
    out.push(dimension_byte(image.width()));
    out.push(dimension_byte(image.height()));
    out.push(0); // palette colors
    out.push(0); // reserved
    out.extend_from_slice(&0u16.to_le_bytes()); // color planes
    out.extend_from_slice(&0u16.to_le_bytes()); // bits per pixel

    let size_field = out.len();
    out.extend_from_slice(&0u32.to_le_bytes()); // payload size, patched below
    out.extend_from_slice(&PAYLOAD_OFFSET.to_le_bytes());

    PngEncoder::new(&mut out).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::Rgba8,
    )?;

    let payload_len = (out.len() - PAYLOAD_OFFSET as usize) as u32;
    out[size_field..size_field + 4].copy_from_slice(&payload_len.to_le_bytes());

    Ok(out)
}

// Directory entries store dimensions as one byte, where 0 stands for 256.
fn dimension_byte(px: u32) -> u8 {
    if px >= 256 {
        0
    } else {
        px as u8
    }
}
