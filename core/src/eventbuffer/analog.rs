//! Analog value codec
//!
//! Analog channels (steer, gas) carry a signed magnitude in
//! `[-65536, 65536]` inside the 24-bit payload of an [`Event`](super::Event).
//! The host stores it as a 24-bit offset-binary number: raw `0x800000` is
//! zero, which is the two's complement value with its sign bit flipped.

/// Smallest legal analog magnitude (full left / full brake)
pub const ANALOG_MIN: i32 = -65536;

/// Largest legal analog magnitude (full right / full gas)
pub const ANALOG_MAX: i32 = 65536;

/// Mask of the 24-bit payload
pub const PAYLOAD_MASK: u32 = 0x00FF_FFFF;

const OFFSET: u32 = 0x0080_0000;

/// Conversion between logical analog values and 24-bit payloads.
///
/// Implementations must round-trip every value in
/// [`ANALOG_MIN`]`..=`[`ANALOG_MAX`] and only ever produce payloads that fit
/// in [`PAYLOAD_MASK`].
pub trait AnalogCodec {
    /// Decode the low 24 bits of `raw` into a logical value
    fn decode(&self, raw: u32) -> i32;

    /// Encode a logical value into a 24-bit payload
    fn encode(&self, value: i32) -> u32;
}

/// Codec matching the host's in-memory representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostAnalogCodec;

impl AnalogCodec for HostAnalogCodec {
    fn decode(&self, raw: u32) -> i32 {
        (raw & PAYLOAD_MASK) as i32 - OFFSET as i32
    }

    fn encode(&self, value: i32) -> u32 {
        (value as u32).wrapping_add(OFFSET) & PAYLOAD_MASK
    }
}

/// Whether `value` is a legal analog magnitude
pub fn is_valid_analog(value: i32) -> bool {
    (ANALOG_MIN..=ANALOG_MAX).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_midpoint() {
        assert_eq!(HostAnalogCodec.encode(0), 0x80_0000);
        assert_eq!(HostAnalogCodec.decode(0x80_0000), 0);
    }

    #[test]
    fn test_extremes() {
        let codec = HostAnalogCodec;
        assert_eq!(codec.encode(ANALOG_MAX), 0x81_0000);
        assert_eq!(codec.encode(ANALOG_MIN), 0x7F_0000);
        assert_eq!(codec.decode(0x81_0000), ANALOG_MAX);
        assert_eq!(codec.decode(0x7F_0000), ANALOG_MIN);
    }

    #[test]
    fn test_roundtrip_full_range() {
        let codec = HostAnalogCodec;
        for value in ANALOG_MIN..=ANALOG_MAX {
            let raw = codec.encode(value);
            assert_eq!(raw & !PAYLOAD_MASK, 0);
            assert_eq!(codec.decode(raw), value);
        }
    }

    #[test]
    fn test_decode_ignores_top_byte() {
        let codec = HostAnalogCodec;
        let raw = codec.encode(-1234);
        assert_eq!(codec.decode(raw | 0xAB00_0000), -1234);
    }

    #[test]
    fn test_is_valid_analog() {
        assert!(is_valid_analog(0));
        assert!(is_valid_analog(ANALOG_MIN));
        assert!(is_valid_analog(ANALOG_MAX));
        assert!(!is_valid_analog(ANALOG_MAX + 1));
        assert!(!is_valid_analog(ANALOG_MIN - 1));
    }
}
