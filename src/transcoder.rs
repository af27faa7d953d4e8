//! Transcoder orchestration.
//!
//! [`VideoTranscoder`] holds the negotiated input/output formats, the derived
//! buffer sizes, the pending-key-frame flag and lifetime statistics, and
//! routes negotiation, buffer-size queries, control commands and conversion
//! to the bound [`CodecCapability`].
//!
//! Negotiation and conversion serialize on one lock so per-packet code never
//! observes a half-updated format pair. Buffer-size queries, key-frame
//! dispatch and statistics reads go through atomics and never block on a
//! conversion in flight.

use crate::codec::CodecCapability;
use crate::command::ControlCommand;
use crate::error::Result;
use crate::format::{options, VideoFormat};
use crate::packet::MediaPacket;
use crate::sizing;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tracing::debug;

/// Buffer size estimate used before the first negotiation.
pub const DEFAULT_DATA_SIZE: usize = 10 * 1024;

/// Which side of the transcoder a buffer-size query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Receive side: sized for the worst case the peer might send.
    Input,
    /// Transmit side: bounded by the transport's packet capacity.
    Output,
}

/// Point-in-time snapshot of the lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VideoStatistics {
    /// Total frames produced over the transcoder's lifetime.
    pub total_frames: u64,
    /// Key frames produced over the transcoder's lifetime.
    pub key_frames: u64,
}

struct State {
    input_format: VideoFormat,
    output_format: VideoFormat,
    codec: Box<dyn CodecCapability>,
}

/// The control and negotiation core for one media stream.
///
/// Created per stream and discarded when the stream ends. Designed for a
/// multi-threaded host where one thread converts packets while a signalling
/// thread renegotiates formats or dispatches control commands.
pub struct VideoTranscoder {
    state: Mutex<State>,
    in_data_size: AtomicUsize,
    out_data_size: AtomicUsize,
    max_output_size: AtomicUsize,
    force_key_frame: AtomicBool,
    uncompressed_output: AtomicBool,
    last_frame_was_key: AtomicBool,
    total_frames: AtomicU64,
    key_frames: AtomicU64,
}

impl VideoTranscoder {
    /// Create a transcoder for the given format pair and codec capability.
    ///
    /// Buffer sizes start at [`DEFAULT_DATA_SIZE`] until the first
    /// [`negotiate`](Self::negotiate); the transmit bound is unbounded until
    /// the transport supplies one via
    /// [`set_max_output_size`](Self::set_max_output_size).
    pub fn new(input: VideoFormat, output: VideoFormat, codec: Box<dyn CodecCapability>) -> Self {
        let uncompressed = output.is_uncompressed();
        Self {
            state: Mutex::new(State {
                input_format: input,
                output_format: output,
                codec,
            }),
            in_data_size: AtomicUsize::new(DEFAULT_DATA_SIZE),
            out_data_size: AtomicUsize::new(DEFAULT_DATA_SIZE),
            max_output_size: AtomicUsize::new(usize::MAX),
            force_key_frame: AtomicBool::new(false),
            uncompressed_output: AtomicBool::new(uncompressed),
            last_frame_was_key: AtomicBool::new(false),
            total_frames: AtomicU64::new(0),
            key_frames: AtomicU64::new(0),
        }
    }

    /// (Re)negotiate the input/output format pair.
    ///
    /// Delegates to the codec capability first; on rejection no local state
    /// is mutated. On success, recomputes the input buffer size from the
    /// receive-side maximum geometry, the output buffer size from the
    /// transmit-side geometry, and clamps the output format's declared
    /// `Max Tx Packet Size` down to the transport bound. The clamped value
    /// is observable through [`output_format`](Self::output_format).
    pub fn negotiate(&self, input: &VideoFormat, output: &VideoFormat) -> Result<()> {
        let mut state = self.state.lock();

        state.codec.update_formats(input, output)?;

        let input = input.clone();
        let mut output = output.clone();

        let mut in_size = self.in_data_size.load(Ordering::Relaxed);
        let mut out_size = self.out_data_size.load(Ordering::Relaxed);
        sizing::update_frame_bytes(
            &input,
            options::MAX_RX_FRAME_WIDTH,
            options::MAX_RX_FRAME_HEIGHT,
            &mut in_size,
        );
        sizing::update_frame_bytes(
            &output,
            options::FRAME_WIDTH,
            options::FRAME_HEIGHT,
            &mut out_size,
        );

        let max_output = self.max_output_size.load(Ordering::Relaxed);
        let declared = output.option_integer(options::MAX_TX_PACKET_SIZE, 0);
        if declared > 0 && declared as u128 > max_output as u128 {
            debug!(
                format = %output,
                declared,
                max_output,
                "reducing max tx packet size to transport bound"
            );
            output.set_option_integer(options::MAX_TX_PACKET_SIZE, max_output as i64);
        }

        self.in_data_size.store(in_size, Ordering::Relaxed);
        self.out_data_size.store(out_size, Ordering::Relaxed);
        self.uncompressed_output
            .store(output.is_uncompressed(), Ordering::Relaxed);
        state.input_format = input;
        state.output_format = output;

        Ok(())
    }

    /// Optimal buffer size for the given direction.
    ///
    /// The receive side returns the negotiated worst case unconditionally;
    /// the transmit side never exceeds the transport's packet capacity even
    /// when the codec's natural frame size is larger.
    pub fn optimal_buffer_size(&self, direction: Direction) -> usize {
        match direction {
            Direction::Input => self.in_data_size.load(Ordering::Relaxed),
            Direction::Output => self
                .out_data_size
                .load(Ordering::Relaxed)
                .min(self.max_output_size.load(Ordering::Relaxed)),
        }
    }

    /// Dispatch an out-of-band control command.
    ///
    /// A key-frame request on a compressed output sets the pending flag and
    /// is handled here (idempotent; the flag persists until conversion
    /// produces a key frame). Everything else, including key-frame requests
    /// on an uncompressed passthrough output, is forwarded to the codec
    /// capability, whose return value is propagated unchanged.
    pub fn dispatch(&self, command: &ControlCommand) -> bool {
        match command {
            ControlCommand::ForceKeyFrame if !self.uncompressed_output.load(Ordering::Relaxed) => {
                if !self.force_key_frame.swap(true, Ordering::Relaxed) {
                    debug!("key frame forced in video stream");
                }
                true
            }
            other => self.state.lock().codec.execute_command(other),
        }
    }

    /// Convert one input packet into zero or more output packets.
    ///
    /// Statistics reflect what was actually produced: each output packet
    /// counts as one frame, key frames count separately, and the pending
    /// key-frame flag is cleared only once a key frame is produced. Errors
    /// propagate with no statistics change.
    pub fn convert(&self, input: &MediaPacket) -> Result<Vec<MediaPacket>> {
        let force = self.force_key_frame.load(Ordering::Relaxed)
            && !self.uncompressed_output.load(Ordering::Relaxed);

        let outputs = self.state.lock().codec.convert(input, force)?;

        let frames = outputs.len() as u64;
        let keys = outputs.iter().filter(|p| p.is_keyframe()).count() as u64;
        if frames > 0 {
            self.total_frames.fetch_add(frames, Ordering::Relaxed);
            self.last_frame_was_key.store(keys > 0, Ordering::Relaxed);
        }
        if keys > 0 {
            self.key_frames.fetch_add(keys, Ordering::Relaxed);
            self.force_key_frame.store(false, Ordering::Relaxed);
        }

        Ok(outputs)
    }

    /// Snapshot of the lifetime counters. Non-blocking; no reset exists.
    pub fn statistics(&self) -> VideoStatistics {
        VideoStatistics {
            total_frames: self.total_frames.load(Ordering::Relaxed),
            key_frames: self.key_frames.load(Ordering::Relaxed),
        }
    }

    /// The negotiated input format.
    pub fn input_format(&self) -> VideoFormat {
        self.state.lock().input_format.clone()
    }

    /// The negotiated output format, including any clamp applied to its
    /// `Max Tx Packet Size` option.
    pub fn output_format(&self) -> VideoFormat {
        self.state.lock().output_format.clone()
    }

    /// Whether a key-frame request is pending.
    pub fn is_key_frame_pending(&self) -> bool {
        self.force_key_frame.load(Ordering::Relaxed)
    }

    /// Whether the most recent conversion produced a key frame.
    pub fn last_frame_was_key_frame(&self) -> bool {
        self.last_frame_was_key.load(Ordering::Relaxed)
    }

    /// The transport-supplied output packet size bound.
    pub fn max_output_size(&self) -> usize {
        self.max_output_size.load(Ordering::Relaxed)
    }

    /// Set the transport-supplied output packet size bound.
    ///
    /// Takes effect for subsequent buffer-size queries and negotiations.
    pub fn set_max_output_size(&self, size: usize) {
        self.max_output_size.store(size, Ordering::Relaxed);
    }
}
