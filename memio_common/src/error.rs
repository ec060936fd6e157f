//! The error value raised by streams, numeric helpers and guarded regions.
//!
//! An [`Error`] carries a [`Kind`], a diagnostic message, the source
//! location where it was constructed and, after a translation, the error
//! that was being handled at the time. Constructors are `#[track_caller]`
//! so the origin points at the raising call site, not at this module.

use crate::kind::{self, Kind};
use std::panic::Location;
use tracing::error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A raised error: kind, message, origin and optional cause.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: &'static Kind,
    message: String,
    origin: &'static Location<'static>,
    #[source]
    cause: Option<Box<Error>>,
}

impl Error {
    /// Raise an error of `kind` at the caller's location.
    #[track_caller]
    pub fn new(kind: &'static Kind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            origin: Location::caller(),
            cause: None,
        }
    }

    /// Shorthand for a [`kind::VALUE`] error.
    #[track_caller]
    pub fn value(message: impl Into<String>) -> Self {
        Self::new(&kind::VALUE, message)
    }

    /// Shorthand for a [`kind::TYPE`] error.
    #[track_caller]
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::new(&kind::TYPE, message)
    }

    /// Shorthand for a [`kind::ARITHMETIC`] error.
    #[track_caller]
    pub fn arithmetic(message: impl Into<String>) -> Self {
        Self::new(&kind::ARITHMETIC, message)
    }

    /// Shorthand for a [`kind::ZERO_DIVISION`] error.
    #[track_caller]
    pub fn zero_division(message: impl Into<String>) -> Self {
        Self::new(&kind::ZERO_DIVISION, message)
    }

    /// Shorthand for a [`kind::OS`] error.
    #[track_caller]
    pub fn os(message: impl Into<String>) -> Self {
        Self::new(&kind::OS, message)
    }

    /// Attach the error that was being handled when this one was raised.
    ///
    /// An existing cause is kept.
    pub fn caused_by(mut self, cause: Error) -> Self {
        if self.cause.is_none() {
            self.cause = Some(Box::new(cause));
        }
        self
    }

    /// Attach `handled` behind the last cause already in this error's chain.
    ///
    /// Used when a handler raises a new error: whatever the new error
    /// already carries stays in place and the handled error ends the chain.
    pub fn with_context(mut self, handled: Error) -> Self {
        self.cause = Some(Box::new(match self.cause.take() {
            Some(cause) => (*cause).with_context(handled),
            None => handled,
        }));
        self
    }

    pub fn kind(&self) -> &'static Kind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the error was constructed.
    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// This error followed by its causes, most recent first.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |e| e.cause())
    }

    /// Returns true if the error's kind equals or descends from `kind`.
    #[inline]
    pub fn is(&self, kind: &Kind) -> bool {
        self.kind.is_a(kind)
    }

    /// Record the error and its causes on the diagnostic log.
    pub fn log(&self) {
        for (depth, e) in self.chain().enumerate() {
            error!(
                kind = e.kind.name(),
                origin = %e.origin,
                depth,
                "{}",
                e.message
            );
        }
    }
}

impl From<std::io::Error> for Error {
    #[track_caller]
    fn from(e: std::io::Error) -> Self {
        Self::os(e.to_string())
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = if e.is(&kind::OS) {
            std::io::ErrorKind::Other
        } else {
            std::io::ErrorKind::InvalidInput
        };
        std::io::Error::new(kind, e)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
