use crate::ParseError;

/// Number of base36 digits in the canonical textual representation.
pub const ENCODED_LEN: usize = 12;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const NO_VALUE: u8 = 255;

/// Lookup table for base36 decoding, accepting both letter cases.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    while i < 36 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_lowercase() {
            lut[c.to_ascii_uppercase() as usize] = i;
        }
        i += 1;
    }
    lut
};

/// Writes the 12-digit, zero-padded, lower-case base36 form of `value`.
///
/// The caller guarantees `value <= 36^12 - 1`; larger values wrap silently.
#[inline]
pub(crate) fn encode_base36(mut value: u64, buf: &mut [u8; ENCODED_LEN]) {
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(value % 36) as usize];
        value /= 36;
    }
}

/// Decodes a 12-digit base36 string.
///
/// Twelve base36 digits cannot exceed `36^12 - 1`, so any input that passes
/// the length and alphabet checks is a valid ID value.
#[inline]
pub(crate) fn decode_base36(encoded: &[u8]) -> Result<u64, ParseError> {
    if encoded.len() != ENCODED_LEN {
        return Err(ParseError::InvalidLength { len: encoded.len() });
    }

    let mut acc = 0_u64;
    for (index, &byte) in encoded.iter().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(if byte.is_ascii() {
                ParseError::InvalidDigit { byte, index }
            } else {
                ParseError::NonAsciiDigit { index }
            });
        }
        acc = acc * 36 + u64::from(val);
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(val: u64) {
        let mut buf = [0_u8; ENCODED_LEN];
        encode_base36(val, &mut buf);
        let decoded = decode_base36(&buf).unwrap();
        assert_eq!(
            val,
            decoded,
            "roundtrip: input={val}, b36={}",
            core::str::from_utf8(&buf).unwrap()
        );
    }

    #[test]
    fn lookup_covers_exactly_the_alphabet() {
        let accepted = LOOKUP.iter().filter(|&&v| v != NO_VALUE).count();
        // 10 digits + 26 lower + 26 upper
        assert_eq!(accepted, 62);
        assert_eq!(LOOKUP[b'z' as usize], 35);
        assert_eq!(LOOKUP[b'Z' as usize], 35);
        assert_eq!(LOOKUP[b'0' as usize], 0);
        assert_eq!(LOOKUP[b'_' as usize], NO_VALUE);
    }

    #[test]
    fn encodes_zero_padded_lowercase() {
        let mut buf = [0_u8; ENCODED_LEN];
        encode_base36(0, &mut buf);
        assert_eq!(&buf, b"000000000000");
        encode_base36(35, &mut buf);
        assert_eq!(&buf, b"00000000000z");
        encode_base36(36, &mut buf);
        assert_eq!(&buf, b"000000000010");
        encode_base36(0x00ff_ffff, &mut buf);
        assert_eq!(&buf, b"00000009zldr");
    }

    #[test]
    fn roundtrip_edges() {
        for val in [
            0,
            1,
            35,
            36,
            0x00ff_ffff,
            0x0100_0000,
            4_738_381_338_321_616_894,
            4_738_381_338_321_616_895,
        ] {
            roundtrip(val);
        }
    }

    #[test]
    fn decode_is_case_insensitive() {
        assert_eq!(
            decode_base36(b"0U375NXQH5CQ").unwrap(),
            decode_base36(b"0u375nxqh5cq").unwrap()
        );
        assert_eq!(decode_base36(b"ZZZZZZZZZZZZ").unwrap(), 4_738_381_338_321_616_895);
    }

    #[test]
    fn decode_reports_offending_byte() {
        assert_eq!(
            decode_base36(b"0u3w_p5q7ta7"),
            Err(ParseError::InvalidDigit { byte: b'_', index: 4 })
        );
        assert_eq!(
            decode_base36("0u3wrp5q7tà".as_bytes()),
            Err(ParseError::NonAsciiDigit { index: 10 })
        );
        assert_eq!(
            decode_base36(b"0u3wrp5q7ta"),
            Err(ParseError::InvalidLength { len: 11 })
        );
    }
}
