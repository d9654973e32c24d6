//! Byte-level UTF-8 helpers.
//!
//! Malformed input is never an error: anything that is not a recognised lead
//! byte counts as a one-byte sequence.

/// Length in bytes of the sequence introduced by `lead`.
pub fn char_length(lead: u8) -> usize {
    if lead & 0xF8 == 0xF0 {
        4
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xE0 == 0xC0 {
        2
    } else {
        1
    }
}

/// Returns `true` for `10xxxxxx` continuation bytes.
pub fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Convert raw buffer bytes to a `String`, replacing invalid sequences.
pub fn bytes_to_string(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
