//! # Transcode Control
//!
//! Control and negotiation layer for a pluggable real-time video transcoder.
//!
//! This crate sits between a network transport delivering fixed-size media
//! packets and a pool of interchangeable codec implementations. It provides:
//! - Format negotiation and buffer sizing between input and output media formats
//! - Output packet size bounding against the transport's capacity
//! - Out-of-band control command routing (key-frame requests, picture loss,
//!   quality trade-offs, vendor control blobs)
//! - Throughput/quality statistics
//!
//! Per-sample conversion itself is delegated to [`CodecCapability`]
//! implementations supplied at construction; this layer only orchestrates.

pub mod codec;
pub mod command;
pub mod error;
pub mod format;
pub mod packet;
pub mod sizing;
pub mod transcoder;

pub use codec::{CodecCapability, NullCodec};
pub use command::{ControlCommand, VendorBlob};
pub use error::{Error, Result};
pub use format::{FormatOptions, PixelFormat, VideoFormat};
pub use packet::{MediaPacket, PacketFlags};
pub use transcoder::{Direction, VideoStatistics, VideoTranscoder};
