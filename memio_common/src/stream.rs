//! In-memory streams.
//!
//! This module contains:
//! - `chunk`: The dynamically typed write payload ([`Chunk`]).
//! - `mode`: Text and binary mode markers ([`Text`], [`Binary`]).
//! - `buffer`: The stream itself ([`MemoryStream`]).
//! - `io`: `std::io` / `std::fmt` trait implementations.
//!
//! # Usage
//!
//! ```rust
//! use memio_common::stream::TextStream;
//!
//! let mut f = TextStream::new();
//! f.write("Hello")?;
//! f.write(" ")?;
//! f.write("world!")?;
//! assert_eq!(f.getvalue()?, "Hello world!");
//! f.close();
//! # Ok::<(), memio_common::error::Error>(())
//! ```

pub mod buffer;
pub mod chunk;
pub mod io;
pub mod mode;

pub use buffer::{ByteStream, Lines, MemoryStream, TextStream};
pub use chunk::Chunk;
pub use mode::{Binary, Mode, Text};
