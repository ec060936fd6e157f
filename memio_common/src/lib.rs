//! memio Common Library
//!
//! In-memory text and byte streams, plus a layered error propagation
//! discipline built on an open hierarchy of error kinds.
//!
//! # Module Structure
//!
//! - [`stream`] - In-memory streams with an append write side and a read cursor
//! - [`kind`] - Error kinds and their subsumption hierarchy
//! - [`error`] - The kinded error value and `Result` alias
//! - [`guard`] - Guarded regions with ordered handlers and an always branch
//! - [`report`] - Rendering of errors that reached the top level
//! - [`numeric`] - Parsing and division helpers used by the demonstrations
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use memio_common::prelude::*;
//!
//! let mut f = TextStream::with_initial("Hello!\nHi!\nGoodbye!");
//! let first = Region::new(|| f.readline())
//!     .except(&kind::VALUE, |_| Disposition::Suppress)
//!     .run()?;
//! assert_eq!(first.as_deref(), Some("Hello!\n"));
//! # Ok::<(), Error>(())
//! ```

pub mod config;
pub mod error;
pub mod guard;
pub mod kind;
pub mod numeric;
pub mod prelude;
pub mod report;
pub mod stream;
