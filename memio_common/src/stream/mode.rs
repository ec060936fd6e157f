//! Stream modes.
//!
//! A mode fixes which [`Chunk`] variant a stream accepts and how stored
//! bytes are handed back to the caller. Text streams store UTF-8 and only
//! ever split it on `\n` or on character boundaries, so the stored bytes
//! stay valid UTF-8.

use super::chunk::Chunk;
use crate::error::{Error, Result};

mod private {
    pub trait Sealed {}
}

/// Element type of a [`MemoryStream`](super::MemoryStream).
pub trait Mode: private::Sealed {
    /// Owned value returned by reads (`String` or `Vec<u8>`).
    type Value: Default + AsRef<[u8]>;

    /// Mode name used in diagnostics.
    const NAME: &'static str;

    /// Extract the payload of `chunk`, or fail with a type error.
    fn accept<'c>(chunk: Chunk<'c>) -> Result<&'c [u8]>;

    /// Convert stored bytes into the owned read value.
    fn to_value(bytes: &[u8]) -> Self::Value;

    /// Number of bytes spanned by the first `count` elements of `rest`.
    fn span(rest: &[u8], count: usize) -> usize;

    /// Returns true if `pos` is a valid cursor position within `bytes`.
    fn is_boundary(bytes: &[u8], pos: usize) -> bool;
}

/// Text mode: accepts `str`, reads return `String`.
#[derive(Debug, Clone, Copy)]
pub enum Text {}

/// Binary mode: accepts bytes, reads return `Vec<u8>`.
#[derive(Debug, Clone, Copy)]
pub enum Binary {}

impl private::Sealed for Text {}
impl private::Sealed for Binary {}

/// Leading byte of a UTF-8 sequence (not a continuation byte).
#[inline]
const fn is_char_start(b: u8) -> bool {
    b & 0xC0 != 0x80
}

impl Mode for Text {
    type Value = String;

    const NAME: &'static str = "text";

    #[track_caller]
    fn accept<'c>(chunk: Chunk<'c>) -> Result<&'c [u8]> {
        match chunk {
            Chunk::Text(s) => Ok(s.as_bytes()),
            Chunk::Bytes(_) => Err(Error::type_error(format!(
                "string argument expected, got '{}'",
                chunk.type_name()
            ))),
        }
    }

    fn to_value(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    fn span(rest: &[u8], count: usize) -> usize {
        let mut chars = 0;
        for (i, &b) in rest.iter().enumerate() {
            if is_char_start(b) {
                if chars == count {
                    return i;
                }
                chars += 1;
            }
        }
        rest.len()
    }

    fn is_boundary(bytes: &[u8], pos: usize) -> bool {
        match bytes.get(pos) {
            Some(&b) => is_char_start(b),
            None => pos == bytes.len(),
        }
    }
}

impl Mode for Binary {
    type Value = Vec<u8>;

    const NAME: &'static str = "binary";

    #[track_caller]
    fn accept<'c>(chunk: Chunk<'c>) -> Result<&'c [u8]> {
        match chunk {
            Chunk::Bytes(b) => Ok(b),
            Chunk::Text(_) => Err(Error::type_error(format!(
                "a bytes-like object is required, not '{}'",
                chunk.type_name()
            ))),
        }
    }

    fn to_value(bytes: &[u8]) -> Vec<u8> {
        bytes.to_vec()
    }

    fn span(rest: &[u8], count: usize) -> usize {
        count.min(rest.len())
    }

    fn is_boundary(bytes: &[u8], pos: usize) -> bool {
        pos <= bytes.len()
    }
}
