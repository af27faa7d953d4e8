//! Codec capability interface.
//!
//! The control layer never converts media itself; it defers to a
//! [`CodecCapability`] supplied at construction. The trait's defaults encode
//! the base behavior: negotiation accepts, commands go unhandled, and
//! conversion fails until a concrete codec is bound.

use crate::command::ControlCommand;
use crate::error::{Error, Result};
use crate::format::VideoFormat;
use crate::packet::MediaPacket;

/// A pluggable encode/decode routine the transcoder defers conversion to.
pub trait CodecCapability: Send {
    /// Codec name for diagnostics.
    fn name(&self) -> &str;

    /// Base negotiation step: validate that this codec can convert between
    /// the two formats.
    ///
    /// Called first during negotiation, before any transcoder state is
    /// touched; an error rejects the negotiation as a whole.
    fn update_formats(&mut self, input: &VideoFormat, output: &VideoFormat) -> Result<()> {
        let _ = (input, output);
        Ok(())
    }

    /// Base command path for variants the control layer does not interpret.
    ///
    /// Returns whether the command was handled; the dispatcher propagates
    /// this value unchanged.
    fn execute_command(&mut self, command: &ControlCommand) -> bool {
        let _ = command;
        false
    }

    /// Consume one input packet and produce zero or more output packets.
    ///
    /// Key frames are marked via [`crate::PacketFlags::KEYFRAME`]. When
    /// `force_key_frame` is set the codec should bias the next produced
    /// frame to be a key frame if it supports the concept.
    ///
    /// The default fails with [`Error::ConversionUnavailable`]; a transcoder
    /// left with this default is a composition error.
    fn convert(&mut self, input: &MediaPacket, force_key_frame: bool) -> Result<Vec<MediaPacket>> {
        let _ = (input, force_key_frame);
        Err(Error::ConversionUnavailable)
    }
}

/// Placeholder capability with no conversion bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCodec;

impl CodecCapability for NullCodec {
    fn name(&self) -> &str {
        "null"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_codec_conversion_unavailable() {
        let mut codec = NullCodec;
        let err = codec.convert(&MediaPacket::empty(), false).unwrap_err();
        assert!(matches!(err, Error::ConversionUnavailable));
    }

    #[test]
    fn test_null_codec_accepts_formats() {
        let mut codec = NullCodec;
        assert!(codec
            .update_formats(crate::format::rgb24(), crate::format::yuv420p())
            .is_ok());
    }

    #[test]
    fn test_null_codec_leaves_commands_unhandled() {
        let mut codec = NullCodec;
        assert!(!codec.execute_command(&ControlCommand::ForceKeyFrame));
    }
}
