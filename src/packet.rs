//! Media packet abstraction.
//!
//! A [`MediaPacket`] is one fixed-size unit of media data as delivered by
//! (or handed to) the transport, carrying its payload plus the RTP-shaped
//! metadata the control layer cares about. Buffer ownership stays with the
//! caller across conversion; packets own their payload bytes.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Flags for packet properties.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PacketFlags: u32 {
        /// This packet carries a key frame.
        const KEYFRAME = 0x0001;
        /// This packet ends a frame (RTP marker bit).
        const MARKER = 0x0002;
    }
}

/// One media packet.
#[derive(Clone, Default)]
pub struct MediaPacket {
    payload: Vec<u8>,
    /// Transport payload type binding.
    pub payload_type: u8,
    /// Transport sequence number.
    pub sequence_number: u16,
    /// Media timestamp.
    pub timestamp: u32,
    /// Packet flags.
    pub flags: PacketFlags,
}

impl MediaPacket {
    /// Create a packet with the given payload.
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            ..Self::default()
        }
    }

    /// Create an empty packet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The packet payload.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Mutable access to the packet payload.
    pub fn payload_mut(&mut self) -> &mut Vec<u8> {
        &mut self.payload
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    /// Check if this packet carries a key frame.
    pub fn is_keyframe(&self) -> bool {
        self.flags.contains(PacketFlags::KEYFRAME)
    }

    /// Set or clear the key-frame flag.
    pub fn set_keyframe(&mut self, keyframe: bool) {
        if keyframe {
            self.flags.insert(PacketFlags::KEYFRAME);
        } else {
            self.flags.remove(PacketFlags::KEYFRAME);
        }
    }

    /// Builder-style timestamp setter.
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builder-style sequence number setter.
    pub fn with_sequence_number(mut self, sequence_number: u16) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    /// Builder-style payload type setter.
    pub fn with_payload_type(mut self, payload_type: u8) -> Self {
        self.payload_type = payload_type;
        self
    }

    /// Builder-style flags setter.
    pub fn with_flags(mut self, flags: PacketFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl fmt::Debug for MediaPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaPacket")
            .field("len", &self.len())
            .field("payload_type", &self.payload_type)
            .field("sequence_number", &self.sequence_number)
            .field("timestamp", &self.timestamp)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_creation() {
        let packet = MediaPacket::new(vec![0u8; 100]);
        assert_eq!(packet.len(), 100);
        assert!(!packet.is_empty());
    }

    #[test]
    fn test_packet_keyframe_flag() {
        let mut packet = MediaPacket::empty();
        assert!(!packet.is_keyframe());
        packet.set_keyframe(true);
        assert!(packet.is_keyframe());
        packet.set_keyframe(false);
        assert!(!packet.is_keyframe());
    }

    #[test]
    fn test_packet_builders() {
        let packet = MediaPacket::new(vec![1, 2, 3])
            .with_sequence_number(7)
            .with_timestamp(90_000)
            .with_flags(PacketFlags::MARKER);
        assert_eq!(packet.sequence_number, 7);
        assert_eq!(packet.timestamp, 90_000);
        assert!(packet.flags.contains(PacketFlags::MARKER));
    }
}
