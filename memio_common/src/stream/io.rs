//! Standard I/O trait implementations.
//!
//! `ByteStream` implements [`Read`], [`BufRead`] and [`Write`];
//! `TextStream` implements [`fmt::Write`]. Closed streams surface as
//! `std::io::Error` / `fmt::Error`.

use super::buffer::{ByteStream, TextStream};
use std::fmt;
use std::io::{self, BufRead, Read, Write};

impl Read for ByteStream {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let rest = self.fill_buf()?;
        let n = rest.len().min(out.len());
        out[..n].copy_from_slice(&rest[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for ByteStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.ensure_open()?;
        Ok(self.remaining())
    }

    fn consume(&mut self, amt: usize) {
        self.advance(amt);
    }
}

impl Write for ByteStream {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.ensure_open()?;
        self.append(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Write for TextStream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        TextStream::write(self, s).map_err(|_| fmt::Error)
    }
}
