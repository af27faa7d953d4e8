//! Frame buffer sizing.
//!
//! Maps a format descriptor plus the names of its width/height options to the
//! number of bytes required for one frame in wire representation, including
//! the fixed frame header. Used independently for the receive and transmit
//! sides, which may carry different geometry options.

use crate::format::{VideoFormat, CIF_HEIGHT, CIF_WIDTH};

/// Size of the fixed per-frame header preceding raw frame payload on the
/// wire (x, y, width, height as 32-bit words).
pub const FRAME_HEADER_LEN: usize = 16;

/// Compute the payload bytes for one frame of `format` at the geometry named
/// by `width_option`/`height_option`, falling back to CIF when either option
/// is absent.
///
/// Returns `None` when the format has no raw pixel representation or the
/// geometry yields an empty frame.
pub fn frame_bytes(format: &VideoFormat, width_option: &str, height_option: &str) -> Option<usize> {
    let pixel_format = format.pixel_format()?;
    let width = format.option_integer(width_option, i64::from(CIF_WIDTH));
    let height = format.option_integer(height_option, i64::from(CIF_HEIGHT));
    if width <= 0 || height <= 0 {
        return None;
    }
    let bytes = pixel_format.frame_bytes(width as u32, height as u32);
    if bytes == 0 {
        return None;
    }
    Some(bytes)
}

/// Recompute a buffer size estimate in place.
///
/// Writes `FRAME_HEADER_LEN` plus the frame payload into `size` only when
/// the computation yields a positive payload; a failed or empty computation
/// leaves the previous estimate untouched, so a transient failure never
/// shrinks or zeroes a valid estimate.
pub fn update_frame_bytes(
    format: &VideoFormat,
    width_option: &str,
    height_option: &str,
    size: &mut usize,
) {
    if let Some(bytes) = frame_bytes(format, width_option, height_option) {
        *size = FRAME_HEADER_LEN + bytes;
    }
}
