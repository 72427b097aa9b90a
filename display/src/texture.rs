use crate::palette::Color;

/// Bytes per texture pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Formats a Chip-8 FrameBuffer as RGBA32 pixels.
///
/// A texture is a 1D array of bytes that represent concatenated rows of RGBA pixels,
/// so every cell of the (already flat) frame becomes four bytes of either colour.
/// Alpha is kept so translucent colours blend over the window background.
///
/// # Arguments
/// * `frame` a row-major Chip-8 FrameBuffer with one byte (0 or 1) per pixel
/// * `out` a buffer of exactly `frame.len() * 4` bytes
pub fn frame_to_rgba32(frame: &[u8], foreground: Color, background: Color, out: &mut [u8]) {
    for (pixel, rgba) in frame.iter().zip(out.chunks_exact_mut(BYTES_PER_PIXEL)) {
        let color = if *pixel == 0 { background } else { foreground };
        rgba.copy_from_slice(&[color.r, color.g, color.b, color.a]);
    }
}

/// Draws a FrameBuffer as lines of text, `#` for lit pixels and `.` for unlit ones
pub fn frame_to_text(frame: &[u8], width: usize) -> String {
    let mut text = String::with_capacity(frame.len() + frame.len() / width.max(1));
    for row in frame.chunks(width.max(1)) {
        text.extend(row.iter().map(|&pixel| if pixel == 0 { '.' } else { '#' }));
        text.push('\n');
    }
    text
}
