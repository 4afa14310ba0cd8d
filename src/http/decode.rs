//! Strict percent-decoding of request targets.

use thiserror::Error;

/// Reasons a target cannot be percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// `%` at `offset` is not followed by two more characters.
    #[error("truncated percent-escape at offset {offset}")]
    Truncated { offset: usize },
    /// `%` at `offset` is followed by something other than two hex digits.
    #[error("invalid percent-escape at offset {offset}")]
    InvalidHex { offset: usize },
}

/// Decodes `%XX` escapes and `+` into raw bytes.
///
/// Every `%` must be followed by exactly two hexadecimal digits (either case).
/// `+` decodes to a space and every other byte is copied unchanged. The
/// result is a byte sequence because an escape may produce non-UTF-8 bytes.
///
/// # Example
///
/// ```
/// # use warden::http::decode::url_decode;
/// assert_eq!(url_decode("/a%20b+c").unwrap(), b"/a b c".to_vec());
/// assert!(url_decode("/%2").is_err());
/// ```
pub fn url_decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                if i + 2 >= bytes.len() {
                    return Err(DecodeError::Truncated { offset: i });
                }
                let hi = hex_value(bytes[i + 1]);
                let lo = hex_value(bytes[i + 2]);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => return Err(DecodeError::InvalidHex { offset: i }),
                }
                i += 3;
            }
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(out)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
