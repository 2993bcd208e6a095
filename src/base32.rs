//! RFC 4648 base32 codec.
//!
//! Shared secrets travel between server and authenticator app in base32
//! form because the alphabet `A-Z2-7` is unambiguous to type. [`decode`]
//! turns that form back into the raw key bytes fed to HMAC; [`encode`] is
//! the padded mirror operation.

use crate::error::DecodeError;

/// The 32-symbol RFC 4648 alphabet. Uppercase only, no case-folding.
pub(crate) const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Characters stripped from the end of the input before decoding:
/// the `=` padding character and ASCII whitespace, including NUL and
/// vertical tab.
const TRAILING: &[char] = &['=', ' ', '\t', '\n', '\r', '\0', '\x0b'];

fn value_of(character: char) -> Option<u32> {
    match character {
        'A'..='Z' => Some(character as u32 - 'A' as u32),
        '2'..='7' => Some(character as u32 - '2' as u32 + 26),
        _ => None,
    }
}

/// Decodes a base32 string into raw bytes.
///
/// Trailing padding and whitespace are stripped first; every remaining
/// character must belong to the alphabet, otherwise the whole decode
/// fails. N alphabet characters produce `5 * N / 8` bytes; leftover bits
/// that do not fill a byte are discarded, so both padded and unpadded
/// input are accepted.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidCharacter`] on the first character
/// outside the alphabet. Nothing is silently dropped or substituted.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    let data = input.trim_end_matches(TRAILING);
    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    let mut buf: u32 = 0;
    let mut bits: u32 = 0;
    for (position, character) in data.chars().enumerate() {
        let value = value_of(character).ok_or(DecodeError::InvalidCharacter {
            character,
            position,
        })?;
        buf = (buf << 5) | value;
        bits += 5;
        if bits > 7 {
            bits -= 8;
            out.push((buf >> bits) as u8);
        }
    }
    Ok(out)
}

/// Encodes raw bytes as base32, padded with `=` to a multiple of 8
/// characters as RFC 4648 requires.
pub fn encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() + 4) / 5 * 8);
    let mut buf: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in data {
        buf = (buf << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buf >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((buf << (5 - bits)) & 0x1f) as usize] as char);
    }
    while out.len() % 8 != 0 {
        out.push('=');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4648 section 10 test vectors.
    const VECTORS: [(&str, &str); 7] = [
        ("", ""),
        ("f", "MY======"),
        ("fo", "MZXQ===="),
        ("foo", "MZXW6==="),
        ("foob", "MZXW6YQ="),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI======"),
    ];

    #[test]
    fn rfc4648_encode() {
        for (raw, encoded) in VECTORS {
            assert_eq!(encode(raw.as_bytes()), encoded);
        }
    }

    #[test]
    fn rfc4648_decode() {
        for (raw, encoded) in VECTORS {
            assert_eq!(decode(encoded).unwrap(), raw.as_bytes());
        }
    }

    #[test]
    fn decode_unpadded() {
        assert_eq!(decode("MZXW6").unwrap(), b"foo");
        assert_eq!(decode("SECRET").unwrap(), [0x91, 0x05, 0x12]);
        assert_eq!(decode("SECRET==").unwrap(), [0x91, 0x05, 0x12]);
    }

    #[test]
    fn decode_strips_trailing_whitespace() {
        assert_eq!(decode("MZXW6YTB \t\r\n").unwrap(), b"fooba");
        assert_eq!(decode("MZXW6===\0\x0b").unwrap(), b"foo");
    }

    #[test]
    fn decode_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode("========").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_invalid_characters() {
        for c in ['0', '1', '8', '9'] {
            let input = format!("MZXW{}", c);
            assert_eq!(
                decode(&input).unwrap_err(),
                DecodeError::InvalidCharacter {
                    character: c,
                    position: 4
                }
            );
        }
    }

    #[test]
    fn decode_rejects_lowercase() {
        assert_eq!(
            decode("mzxw6").unwrap_err(),
            DecodeError::InvalidCharacter {
                character: 'm',
                position: 0
            }
        );
    }

    #[test]
    fn decode_rejects_interior_padding() {
        // Only trailing padding is stripped; '=' in the middle is invalid.
        assert!(decode("MZ=W6YTB").is_err());
    }

    #[test]
    fn round_trip() {
        for len in 1..=80usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            assert_eq!(decode(&encode(&data)).unwrap(), data, "length {}", len);
        }
    }

    #[test]
    fn padding_counts_follow_rfc4648() {
        // Pad character count depends on byte count mod 5.
        let expected = [0usize, 6, 4, 3, 1];
        for len in 0..=10usize {
            let encoded = encode(&vec![0u8; len]);
            let pads = encoded.chars().rev().take_while(|&c| c == '=').count();
            assert_eq!(pads, expected[len % 5], "length {}", len);
        }
    }

    #[test]
    fn matches_reference_implementation() {
        for len in 0..=40usize {
            let data: Vec<u8> = (0..len).map(|i| (i * 73 + 5) as u8).collect();
            let reference = base32::encode(base32::Alphabet::Rfc4648 { padding: true }, &data);
            assert_eq!(encode(&data), reference);
            assert_eq!(decode(&reference).unwrap(), data);
        }
    }
}
