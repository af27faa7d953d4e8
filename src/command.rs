//! Out-of-band control commands.
//!
//! Commands are created per event, dispatched synchronously through
//! [`crate::VideoTranscoder::dispatch`], and dropped immediately after. The
//! set is a closed sum type so every dispatcher handles every variant at
//! compile time.

use std::fmt;

/// An opaque vendor control payload.
///
/// Owns a heap copy of the caller's bytes; no aliasing with caller-supplied
/// memory survives construction, and the copy is released on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VendorBlob {
    data: Box<[u8]>,
}

impl VendorBlob {
    /// Copy the given payload into an owned blob.
    pub fn copy_from(payload: &[u8]) -> Self {
        Self {
            data: payload.to_vec().into_boxed_slice(),
        }
    }

    /// The owned payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An out-of-band control request routed to the active codec.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlCommand {
    /// Request that the next produced frame be a key frame.
    ForceKeyFrame,
    /// Receiver feedback that part of the stream could not be reconstructed.
    PictureLoss {
        /// Sequence number of the lost packet.
        sequence_number: u32,
        /// Media timestamp of the loss.
        timestamp: u32,
    },
    /// Quality hint trading motion smoothness against per-frame detail.
    TemporalSpatialTradeOff {
        /// Trade-off level, codec-interpreted.
        level: u32,
    },
    /// Opaque vendor-specific control blob, forwarded to the codec.
    VendorControl(VendorBlob),
}

impl ControlCommand {
    /// Human-readable command name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ForceKeyFrame => "Force Key Frame",
            Self::PictureLoss { .. } => "Picture Loss",
            Self::TemporalSpatialTradeOff { .. } => "Temporal Spatial Trade Off",
            Self::VendorControl(_) => "Vendor Control",
        }
    }

    /// The command's binary payload, if it carries one.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::VendorControl(blob) => Some(blob.as_bytes()),
            _ => None,
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names() {
        assert_eq!(ControlCommand::ForceKeyFrame.name(), "Force Key Frame");
        assert_eq!(
            ControlCommand::PictureLoss {
                sequence_number: 10,
                timestamp: 90_000
            }
            .name(),
            "Picture Loss"
        );
    }

    #[test]
    fn test_vendor_blob_owns_copy() {
        let mut source = vec![1u8, 2, 3, 4];
        let blob = VendorBlob::copy_from(&source);
        source[0] = 0xFF;
        assert_eq!(blob.as_bytes(), &[1, 2, 3, 4]);
        assert_eq!(blob.len(), 4);
    }

    #[test]
    fn test_payload_accessor() {
        let cmd = ControlCommand::VendorControl(VendorBlob::copy_from(&[9, 8]));
        assert_eq!(cmd.payload(), Some(&[9u8, 8][..]));
        assert_eq!(ControlCommand::ForceKeyFrame.payload(), None);
    }
}
