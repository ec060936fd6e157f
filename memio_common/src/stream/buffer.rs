//! Growable in-memory stream with a monotonic read cursor.

use super::chunk::Chunk;
use super::mode::{Binary, Mode, Text};
use crate::error::{Error, Result};
use std::fmt;
use std::marker::PhantomData;

/// Message for any operation attempted after [`MemoryStream::close`].
pub const CLOSED_MESSAGE: &str = "I/O operation on closed file";

/// An in-memory stream of text or bytes.
///
/// Writes always append at the end. Reads start at the cursor and move it
/// forward; [`getvalue`](Self::getvalue) ignores the cursor. After
/// [`close`](Self::close) every operation fails with a value error.
pub struct MemoryStream<M: Mode> {
    buf: Vec<u8>,
    pos: usize,
    closed: bool,
    _mode: PhantomData<M>,
}

/// Stream of `str` content, reads return `String`.
pub type TextStream = MemoryStream<Text>;

/// Stream of raw bytes, reads return `Vec<u8>`.
pub type ByteStream = MemoryStream<Binary>;

impl<M: Mode> MemoryStream<M> {
    /// Create an empty stream.
    pub fn new() -> Self {
        Self::from_raw(Vec::new())
    }

    fn from_raw(buf: Vec<u8>) -> Self {
        Self {
            buf,
            pos: 0,
            closed: false,
            _mode: PhantomData,
        }
    }

    #[track_caller]
    pub(super) fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::value(CLOSED_MESSAGE));
        }
        Ok(())
    }

    /// Append `chunk` to the end of the content.
    ///
    /// # Errors
    ///
    /// - Type error if the chunk does not match the stream's mode. The
    ///   content is left unchanged.
    /// - Value error if the stream is closed.
    #[track_caller]
    pub fn write<'c>(&mut self, chunk: impl Into<Chunk<'c>>) -> Result<()> {
        self.ensure_open()?;
        let bytes = M::accept(chunk.into())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// The whole content, independent of the cursor.
    #[track_caller]
    pub fn getvalue(&self) -> Result<M::Value> {
        self.ensure_open()?;
        Ok(M::to_value(&self.buf))
    }

    /// Next line including its `\n`, the trailing content if no terminator
    /// remains, or an empty value at the end of the stream.
    #[track_caller]
    pub fn readline(&mut self) -> Result<M::Value> {
        self.ensure_open()?;
        let rest = self.remaining();
        let end = rest
            .iter()
            .position(|&b| b == b'\n')
            .map_or(rest.len(), |i| i + 1);
        Ok(self.take(end))
    }

    /// Everything from the cursor to the end.
    #[track_caller]
    pub fn read(&mut self) -> Result<M::Value> {
        self.ensure_open()?;
        let end = self.remaining().len();
        Ok(self.take(end))
    }

    /// At most `count` elements (characters or bytes) from the cursor.
    #[track_caller]
    pub fn read_n(&mut self, count: usize) -> Result<M::Value> {
        self.ensure_open()?;
        let end = M::span(self.remaining(), count);
        Ok(self.take(end))
    }

    /// All remaining lines.
    pub fn readlines(&mut self) -> Result<Vec<M::Value>> {
        self.lines().collect()
    }

    /// Iterate over the remaining lines until the end of the stream.
    pub fn lines(&mut self) -> Lines<'_, M> {
        Lines {
            stream: self,
            done: false,
        }
    }

    /// Current cursor position in bytes.
    #[track_caller]
    pub fn tell(&self) -> Result<usize> {
        self.ensure_open()?;
        Ok(self.pos)
    }

    /// Move the cursor to `pos` bytes from the start, clamped to the end.
    ///
    /// # Errors
    ///
    /// Value error if `pos` splits a character of a text stream, or if the
    /// stream is closed.
    #[track_caller]
    pub fn seek(&mut self, pos: usize) -> Result<usize> {
        self.ensure_open()?;
        let pos = pos.min(self.buf.len());
        if !M::is_boundary(&self.buf, pos) {
            return Err(Error::value(format!(
                "position {pos} is not on a character boundary of the {} stream",
                M::NAME
            )));
        }
        self.pos = pos;
        Ok(pos)
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Release the stream. Further operations fail; closing again is a no-op.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.buf = Vec::new();
            self.pos = 0;
        }
    }

    pub(super) fn remaining(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    pub(super) fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }

    pub(super) fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn take(&mut self, n: usize) -> M::Value {
        let value = M::to_value(&self.remaining()[..n]);
        self.advance(n);
        value
    }
}

impl TextStream {
    /// Create a stream seeded with `initial`, cursor at the start.
    pub fn with_initial(initial: impl Into<String>) -> Self {
        Self::from_raw(initial.into().into_bytes())
    }
}

impl ByteStream {
    /// Create a stream seeded with `initial`, cursor at the start.
    pub fn with_initial(initial: impl Into<Vec<u8>>) -> Self {
        Self::from_raw(initial.into())
    }
}

impl<M: Mode> Default for MemoryStream<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Mode> fmt::Debug for MemoryStream<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStream")
            .field("mode", &M::NAME)
            .field("len", &self.buf.len())
            .field("pos", &self.pos)
            .field("closed", &self.closed)
            .finish()
    }
}

/// Iterator returned by [`MemoryStream::lines`].
///
/// Yields each line until the end sentinel. A closed stream yields a
/// single error and then stops.
pub struct Lines<'s, M: Mode> {
    stream: &'s mut MemoryStream<M>,
    done: bool,
}

impl<M: Mode> Iterator for Lines<'_, M> {
    type Item = Result<M::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stream.readline() {
            Ok(line) if line.as_ref().is_empty() => {
                self.done = true;
                None
            }
            Ok(line) => Some(Ok(line)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind;

    #[test]
    fn writes_concatenate() {
        let mut f = TextStream::new();
        f.write("Hello").unwrap();
        f.write(" ").unwrap();
        f.write("world!").unwrap();
        assert_eq!(f.getvalue().unwrap(), "Hello world!");
    }

    #[test]
    fn readline_sequence_then_sentinel() {
        let mut f = TextStream::with_initial("Hello!\nHi!\nGoodbye!");
        assert_eq!(f.readline().unwrap(), "Hello!\n");
        assert_eq!(f.readline().unwrap(), "Hi!\n");
        assert_eq!(f.readline().unwrap(), "Goodbye!");
        assert_eq!(f.readline().unwrap(), "");
        assert_eq!(f.readline().unwrap(), "");
    }

    #[test]
    fn getvalue_ignores_cursor() {
        let mut f = TextStream::with_initial("a\nb\n");
        f.readline().unwrap();
        assert_eq!(f.getvalue().unwrap(), "a\nb\n");
        assert_eq!(f.tell().unwrap(), 2);
    }

    #[test]
    fn write_appends_after_seed_without_moving_cursor() {
        let mut f = TextStream::with_initial("one\n");
        f.write("two\n").unwrap();
        assert_eq!(f.tell().unwrap(), 0);
        assert_eq!(f.read().unwrap(), "one\ntwo\n");
    }

    #[test]
    fn read_returns_remaining_bytes() {
        let mut f = ByteStream::with_initial(b"\xe4\xb8\xad\xe6\x96\x87".to_vec());
        assert_eq!(f.read().unwrap(), "中文".as_bytes());
        assert!(f.read().unwrap().is_empty());
    }

    #[test]
    fn mismatched_write_leaves_content() {
        let mut text = TextStream::with_initial("keep");
        let err = text.write(b"bytes").unwrap_err();
        assert!(err.is(&kind::TYPE));
        assert_eq!(text.getvalue().unwrap(), "keep");

        let mut bin = ByteStream::with_initial(b"keep".to_vec());
        let err = bin.write("text").unwrap_err();
        assert!(err.is(&kind::TYPE));
        assert_eq!(bin.getvalue().unwrap(), b"keep");
    }

    #[test]
    fn read_n_counts_characters_in_text_mode() {
        let mut f = TextStream::with_initial("中文ab");
        assert_eq!(f.read_n(1).unwrap(), "中");
        assert_eq!(f.read_n(2).unwrap(), "文a");
        assert_eq!(f.read_n(10).unwrap(), "b");
        assert_eq!(f.read_n(1).unwrap(), "");
    }

    #[test]
    fn read_n_counts_bytes_in_binary_mode() {
        let mut f = ByteStream::with_initial(vec![1, 2, 3]);
        assert_eq!(f.read_n(2).unwrap(), [1, 2]);
        assert_eq!(f.read_n(2).unwrap(), [3]);
    }

    #[test]
    fn readlines_collects_rest() {
        let mut f = TextStream::with_initial("a\nb\nc");
        f.readline().unwrap();
        assert_eq!(f.readlines().unwrap(), ["b\n", "c"]);
        assert!(f.readlines().unwrap().is_empty());
    }

    #[test]
    fn seek_rewinds_and_clamps() {
        let mut f = TextStream::with_initial("abc");
        f.read().unwrap();
        assert_eq!(f.seek(1).unwrap(), 1);
        assert_eq!(f.read().unwrap(), "bc");
        assert_eq!(f.seek(100).unwrap(), 3);
    }

    #[test]
    fn seek_inside_character_fails() {
        let mut f = TextStream::with_initial("中");
        let err = f.seek(1).unwrap_err();
        assert!(err.is(&kind::VALUE));
        assert_eq!(f.tell().unwrap(), 0);
    }

    #[test]
    fn closed_stream_rejects_operations() {
        let mut f = TextStream::with_initial("x");
        f.close();
        f.close();
        assert!(f.is_closed());
        for err in [
            f.write("y").unwrap_err(),
            f.getvalue().unwrap_err(),
            f.readline().unwrap_err(),
            f.read().unwrap_err(),
            f.tell().unwrap_err(),
        ] {
            assert!(err.is(&kind::VALUE));
            assert_eq!(err.message(), CLOSED_MESSAGE);
        }
    }

    #[test]
    fn lines_on_closed_stream_yields_one_error() {
        let mut f = TextStream::with_initial("a\nb");
        f.close();
        let items: Vec<_> = f.lines().collect();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn debug_shows_mode() {
        let f = ByteStream::new();
        assert!(format!("{f:?}").contains("binary"));
    }
}
