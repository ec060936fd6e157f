//! Prelude module for common re-exports.
//!
//! ```rust
//! use memio_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, DemoConfig, LogLevel, SharedConfig};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::error::{Error, Result};
pub use crate::guard::{Disposition, Region, RegionState};
pub use crate::kind::{self, Kind};

// ─── Streams ────────────────────────────────────────────────────────
pub use crate::stream::{ByteStream, Chunk, MemoryStream, TextStream};
