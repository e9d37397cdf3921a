//! Bit-level reconstruction of floating point values from raw words.
//!
//! The binary model format stores floats in three shapes:
//! - Standard single precision (`sign | exponent | mantissa`), decoded with
//!   denormals flushed to zero
//! - Standard double precision, split into a high and a low 32-bit word
//! - The compact "rotated" single precision used inside interleaved arrays,
//!   where the exponent sits in the top byte and the sign in bit 0
//!
//! All three are reconstructed arithmetically from their fields rather than
//! by reinterpreting bits, so the results follow the format's own rules
//! (flush-to-zero, legacy denormal doubles) instead of IEEE-754 exactly.

/// 2^23, the implicit scale of a single precision mantissa.
const F32_MANTISSA_SCALE: f64 = 8_388_608.0;

/// 2^32, the weight of the high word's mantissa bits.
const HIGH_WORD_SCALE: f64 = 4_294_967_296.0;

/// 2^52, the implicit scale of a double precision fraction.
const F64_FRACTION_SCALE: f64 = 4_503_599_627_370_496.0;

const F32_EXPONENT_BIAS: i32 = 127;
const F64_EXPONENT_BIAS: i32 = 1023;
const F64_EXPONENT_MAX: u32 = 0x7FF;

#[inline]
fn pow2(exponent: i32) -> f64 {
    2f64.powi(exponent)
}

/// Reconstruct a single precision value from its exponent and mantissa
/// fields. A zero exponent yields exactly `0.0`.
#[inline]
fn compose_single(exponent: u32, mantissa: u32, negative: bool) -> f32 {
    if exponent == 0 {
        return 0.0;
    }
    let value = pow2(exponent as i32 - F32_EXPONENT_BIAS) * (1.0 + mantissa as f64 / F32_MANTISSA_SCALE);
    let value = value as f32;
    if negative {
        -value
    } else {
        value
    }
}

/// Decode a standard 32-bit float word.
///
/// Exponent 0 always decodes to `+0.0` (denormals are flushed). An
/// all-ones exponent overflows to a signed infinity.
///
/// # Examples
/// ```
/// use rbx_bytes::parse_float;
///
/// assert_eq!(parse_float(0x3F80_0000), 1.0);
/// assert_eq!(parse_float(0xC000_0000), -2.0);
/// assert_eq!(parse_float(0x0000_0001), 0.0);
/// ```
#[inline]
pub fn parse_float(word: u32) -> f32 {
    let exponent = (word >> 23) & 0xFF;
    let mantissa = word & 0x7F_FFFF;
    compose_single(exponent, mantissa, word > 0x7FFF_FFFF)
}

/// Decode the compact float layout: exponent in bits 24-31, mantissa in
/// bits 1-23, sign in bit 0.
///
/// # Examples
/// ```
/// use rbx_bytes::parse_vendor_float;
///
/// assert_eq!(parse_vendor_float(0x7F00_0000), 1.0);
/// assert_eq!(parse_vendor_float(0x7F00_0001), -1.0);
/// ```
#[inline]
pub fn parse_vendor_float(word: u32) -> f32 {
    let exponent = word >> 24;
    let mantissa = (word >> 1) & 0x7F_FFFF;
    compose_single(exponent, mantissa, word & 1 == 1)
}

/// Decode a double from its high word (sign, 11-bit exponent, top 20
/// fraction bits) and low word (remaining 32 fraction bits).
///
/// Special cases:
/// - exponent 0, fraction 0: signed zero
/// - exponent 0, fraction != 0: `2^-1023 * fraction`, which is half the
///   IEEE-754 subnormal value. Files in the wild were written against this
///   reconstruction, so it is kept as is.
/// - exponent 2047: signed infinity when the fraction is 0, NaN otherwise
#[inline]
pub fn parse_double(high: u32, low: u32) -> f64 {
    let exponent = (high >> 20) & F64_EXPONENT_MAX;
    let fraction = ((high & 0xF_FFFF) as f64 * HIGH_WORD_SCALE + low as f64) / F64_FRACTION_SCALE;
    let negative = high & 0x8000_0000 != 0;

    let magnitude = match exponent {
        0 if fraction == 0.0 => 0.0,
        0 => pow2(exponent as i32 - F64_EXPONENT_BIAS) * fraction,
        F64_EXPONENT_MAX if fraction == 0.0 => f64::INFINITY,
        F64_EXPONENT_MAX => return f64::NAN,
        _ => pow2(exponent as i32 - F64_EXPONENT_BIAS) * (1.0 + fraction),
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Map a zigzag-encoded word back to a signed integer.
///
/// Even words map to `word / 2`, odd words to `-(word + 1) / 2`:
/// 0 -> 0, 1 -> -1, 2 -> 1, 3 -> -2, ...
#[inline]
pub fn zigzag_decode_u32(word: u32) -> i32 {
    ((word >> 1) as i32) ^ -((word & 1) as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_zero_exponent_is_zero() {
        assert_eq!(parse_float(0), 0.0);
        assert_eq!(parse_float(0x0000_0001), 0.0);
        assert_eq!(parse_float(0x007F_FFFF), 0.0);
        // Sign bit alone still yields positive zero
        let zero = parse_float(0x8000_0000);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
    }

    #[test]
    fn test_parse_float_normal_values_match_ieee() {
        for word in [
            0x3F80_0000u32, // 1.0
            0xBF80_0000,    // -1.0
            0x4049_0FDB,    // pi
            0x0080_0000,    // smallest normal
            0x7F7F_FFFF,    // f32::MAX
            0xC2F6_E979,    // -123.456
        ] {
            assert_eq!(parse_float(word).to_bits(), f32::from_bits(word).to_bits(), "{word:#010x}");
        }
    }

    #[test]
    fn test_parse_float_max_exponent_overflows_to_infinity() {
        assert_eq!(parse_float(0x7F80_0000), f32::INFINITY);
        assert_eq!(parse_float(0xFF80_0000), f32::NEG_INFINITY);
    }

    #[test]
    fn test_parse_vendor_float() {
        assert_eq!(parse_vendor_float(0), 0.0);
        assert_eq!(parse_vendor_float(0x7F00_0000), 1.0);
        assert_eq!(parse_vendor_float(0x7F00_0001), -1.0);
        assert_eq!(parse_vendor_float(0x8000_0000), 2.0);
        // 1.5: mantissa MSB set, which lands in bit 23
        assert_eq!(parse_vendor_float(0x7F80_0000), 1.5);
        // Zero exponent with sign and mantissa set is still zero
        assert_eq!(parse_vendor_float(0x00FF_FFFF), 0.0);
    }

    #[test]
    fn test_vendor_float_is_rotated_standard_float() {
        for word in [0x3F80_0000u32, 0xC049_0FDB, 0x4120_0000, 0x0080_0000] {
            let rotated = word.rotate_left(1);
            assert_eq!(parse_vendor_float(rotated), parse_float(word));
        }
    }

    #[test]
    fn test_parse_double_normal_values_match_ieee() {
        for value in [1.0f64, -1.0, 0.1, std::f64::consts::PI, -2.5e300, 1e-300, f64::MAX] {
            let bits = value.to_bits();
            let decoded = parse_double((bits >> 32) as u32, bits as u32);
            assert_eq!(decoded.to_bits(), bits, "{value}");
        }
    }

    #[test]
    fn test_parse_double_signed_zero() {
        let pos = parse_double(0, 0);
        assert_eq!(pos, 0.0);
        assert!(pos.is_sign_positive());

        let neg = parse_double(0x8000_0000, 0);
        assert_eq!(neg, 0.0);
        assert!(neg.is_sign_negative());
    }

    #[test]
    fn test_parse_double_legacy_denormal() {
        // Smallest denormal: IEEE value is 2^-1074, legacy reconstruction
        // yields half of that, which rounds to zero; use a larger fraction.
        let high = 0x0008_0000; // fraction = 0.5
        let decoded = parse_double(high, 0);
        assert_eq!(decoded, 2f64.powi(-1023) * 0.5);
        assert_eq!(decoded, f64::from_bits((high as u64) << 32) / 2.0);

        let negative = parse_double(high | 0x8000_0000, 0);
        assert_eq!(negative, -decoded);
    }

    #[test]
    fn test_parse_double_infinity_and_nan() {
        assert_eq!(parse_double(0x7FF0_0000, 0), f64::INFINITY);
        assert_eq!(parse_double(0xFFF0_0000, 0), f64::NEG_INFINITY);
        assert!(parse_double(0x7FF8_0000, 0).is_nan());
        assert!(parse_double(0x7FF0_0000, 1).is_nan());
    }

    #[test]
    fn test_zigzag_decode() {
        assert_eq!(zigzag_decode_u32(0), 0);
        assert_eq!(zigzag_decode_u32(1), -1);
        assert_eq!(zigzag_decode_u32(2), 1);
        assert_eq!(zigzag_decode_u32(3), -2);
        assert_eq!(zigzag_decode_u32(4), 2);
        assert_eq!(zigzag_decode_u32(u32::MAX - 1), i32::MAX);
        assert_eq!(zigzag_decode_u32(u32::MAX), i32::MIN);
    }
}
