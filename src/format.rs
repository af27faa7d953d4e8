//! Media format descriptors and their named options.
//!
//! A [`VideoFormat`] is an immutable description of a media type: name,
//! payload-type binding, nominal geometry, frame rate and bandwidth, plus a
//! set of named integer options read by the sizing and negotiation code.
//! Well-known raw formats are published once as process-wide constants and
//! shared read-only for the process lifetime.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Maximum RTP payload type value, used to bind raw formats that have no
/// assigned payload type.
pub const MAX_PAYLOAD_TYPE: u8 = 127;

/// Nominal width of the shared raw format constants (HD1080).
pub const FRAME_WIDTH: u32 = 1920;
/// Nominal height of the shared raw format constants (HD1080).
pub const FRAME_HEIGHT: u32 = 1080;
/// Nominal frame rate of the shared raw format constants.
pub const FRAME_RATE: u32 = 60;

/// Fallback width when a format does not carry a width option (CIF).
pub const CIF_WIDTH: u32 = 352;
/// Fallback height when a format does not carry a height option (CIF).
pub const CIF_HEIGHT: u32 = 288;

/// Names of the integer options recognized by this layer.
pub mod options {
    /// Transmit-side frame width; bounds output buffer sizing.
    pub const FRAME_WIDTH: &str = "Frame Width";
    /// Transmit-side frame height; bounds output buffer sizing.
    pub const FRAME_HEIGHT: &str = "Frame Height";
    /// Receive-side maximum frame width; bounds input buffer sizing.
    pub const MAX_RX_FRAME_WIDTH: &str = "Max Rx Frame Width";
    /// Receive-side maximum frame height; bounds input buffer sizing.
    pub const MAX_RX_FRAME_HEIGHT: &str = "Max Rx Frame Height";
    /// Declared maximum transmit packet size; clamped during negotiation to
    /// the transport-supplied bound.
    pub const MAX_TX_PACKET_SIZE: &str = "Max Tx Packet Size";
}

/// Raw pixel layout of an uncompressed format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PixelFormat {
    /// Packed 8-bit RGB.
    Rgb24,
    /// Packed 8-bit RGB with padding byte.
    Rgb32,
    /// Planar YUV 4:2:0.
    Yuv420p,
}

impl PixelFormat {
    /// Bits per pixel of this layout.
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            Self::Rgb24 => 24,
            Self::Rgb32 => 32,
            Self::Yuv420p => 12,
        }
    }

    /// Bytes required to hold one frame at the given geometry.
    pub fn frame_bytes(&self, width: u32, height: u32) -> usize {
        let bits = self.bits_per_pixel() as usize * width as usize * height as usize;
        (bits + 7) / 8
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb24 => write!(f, "RGB24"),
            Self::Rgb32 => write!(f, "RGB32"),
            Self::Yuv420p => write!(f, "YUV420P"),
        }
    }
}

/// Named integer options carried by a format.
///
/// Absent options fall back to a caller-supplied default, e.g. the sizer
/// assumes CIF geometry when a format carries no explicit width option.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatOptions {
    values: HashMap<String, i64>,
}

impl FormatOptions {
    /// Create an empty option set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an integer option, falling back to `default` when absent.
    pub fn integer(&self, name: &str, default: i64) -> i64 {
        self.values.get(name).copied().unwrap_or(default)
    }

    /// Set an integer option, replacing any previous value.
    pub fn set_integer(&mut self, name: impl Into<String>, value: i64) {
        self.values.insert(name.into(), value);
    }

    /// Check whether an option is present.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Immutable description of a video media type.
///
/// Constructed once, then shared read-only; negotiation works on clones and
/// never mutates a published descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoFormat {
    name: String,
    payload_type: Option<u8>,
    pixel_format: Option<PixelFormat>,
    width: u32,
    height: u32,
    frame_rate: u32,
    bandwidth: u64,
    options: FormatOptions,
}

impl VideoFormat {
    /// Create a format with the given name and nominal geometry.
    ///
    /// The frame and max-rx geometry options are seeded from the nominal
    /// geometry; `with_option` can override either side independently.
    pub fn new(name: impl Into<String>, width: u32, height: u32, frame_rate: u32) -> Self {
        let mut opts = FormatOptions::new();
        opts.set_integer(options::FRAME_WIDTH, i64::from(width));
        opts.set_integer(options::FRAME_HEIGHT, i64::from(height));
        opts.set_integer(options::MAX_RX_FRAME_WIDTH, i64::from(width));
        opts.set_integer(options::MAX_RX_FRAME_HEIGHT, i64::from(height));
        Self {
            name: name.into(),
            payload_type: None,
            pixel_format: None,
            width,
            height,
            frame_rate,
            bandwidth: 0,
            options: opts,
        }
    }

    /// Set the raw pixel layout and derive the nominal bandwidth from it
    /// (bits per pixel x width x height x frame rate).
    pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
        self.pixel_format = Some(pixel_format);
        self.bandwidth = u64::from(pixel_format.bits_per_pixel())
            * u64::from(self.width)
            * u64::from(self.height)
            * u64::from(self.frame_rate);
        self
    }

    /// Bind a transport payload type.
    pub fn with_payload_type(mut self, payload_type: u8) -> Self {
        self.payload_type = Some(payload_type);
        self
    }

    /// Set the nominal bandwidth explicitly (compressed formats).
    pub fn with_bandwidth(mut self, bandwidth: u64) -> Self {
        self.bandwidth = bandwidth;
        self
    }

    /// Set a named integer option.
    pub fn with_option(mut self, name: impl Into<String>, value: i64) -> Self {
        self.options.set_integer(name, value);
        self
    }

    /// Format name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transport payload type binding, if specified.
    pub fn payload_type(&self) -> Option<u8> {
        self.payload_type
    }

    /// Raw pixel layout, if this is an uncompressed format.
    pub fn pixel_format(&self) -> Option<PixelFormat> {
        self.pixel_format
    }

    /// Nominal frame width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Nominal frame height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Nominal frame rate.
    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// Nominal bandwidth in bits per second.
    pub fn bandwidth(&self) -> u64 {
        self.bandwidth
    }

    /// Get an integer option with a default fallback.
    pub fn option_integer(&self, name: &str, default: i64) -> i64 {
        self.options.integer(name, default)
    }

    /// Set an integer option on this instance.
    pub fn set_option_integer(&mut self, name: impl Into<String>, value: i64) {
        self.options.set_integer(name, value);
    }

    /// Whether this is an uncompressed passthrough format.
    ///
    /// Uncompressed formats have no entropy coding and therefore no
    /// key-frame concept.
    pub fn is_uncompressed(&self) -> bool {
        self.pixel_format.is_some()
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn raw_format(name: &str, pixel_format: PixelFormat) -> VideoFormat {
    VideoFormat::new(name, FRAME_WIDTH, FRAME_HEIGHT, FRAME_RATE)
        .with_payload_type(MAX_PAYLOAD_TYPE)
        .with_pixel_format(pixel_format)
}

/// Shared packed RGB24 format at HD1080/60.
pub fn rgb24() -> &'static VideoFormat {
    static RGB24: OnceLock<VideoFormat> = OnceLock::new();
    RGB24.get_or_init(|| raw_format("RGB24", PixelFormat::Rgb24))
}

/// Shared packed RGB32 format at HD1080/60.
pub fn rgb32() -> &'static VideoFormat {
    static RGB32: OnceLock<VideoFormat> = OnceLock::new();
    RGB32.get_or_init(|| raw_format("RGB32", PixelFormat::Rgb32))
}

/// Shared planar YUV 4:2:0 format at HD1080/60.
pub fn yuv420p() -> &'static VideoFormat {
    static YUV420P: OnceLock<VideoFormat> = OnceLock::new();
    YUV420P.get_or_init(|| raw_format("YUV420P", PixelFormat::Yuv420p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_default_fallback() {
        let opts = FormatOptions::new();
        assert_eq!(opts.integer("absent", 42), 42);
    }

    #[test]
    fn test_format_seeds_geometry_options() {
        let fmt = VideoFormat::new("Test", 640, 480, 30);
        assert_eq!(fmt.option_integer(options::FRAME_WIDTH, 0), 640);
        assert_eq!(fmt.option_integer(options::MAX_RX_FRAME_HEIGHT, 0), 480);
    }

    #[test]
    fn test_bandwidth_formula() {
        // 24 bpp x 1920 x 1080 x 60
        assert_eq!(rgb24().bandwidth(), 24 * 1920 * 1080 * 60);
        assert_eq!(yuv420p().bandwidth(), 12 * 1920 * 1080 * 60);
    }

    #[test]
    fn test_shared_constants_are_singletons() {
        assert!(std::ptr::eq(rgb24(), rgb24()));
        assert_eq!(rgb32().payload_type(), Some(MAX_PAYLOAD_TYPE));
    }

    #[test]
    fn test_uncompressed_detection() {
        assert!(yuv420p().is_uncompressed());
        let h264 = VideoFormat::new("H.264", 1280, 720, 30);
        assert!(!h264.is_uncompressed());
    }

    #[test]
    fn test_yuv420p_frame_bytes() {
        assert_eq!(PixelFormat::Yuv420p.frame_bytes(352, 288), 352 * 288 * 3 / 2);
    }
}
