//! Guarded regions: ordered handlers, a no-error branch and an always branch.
//!
//! ## Evaluation
//!
//! 1. The always branch is armed before the body runs.
//! 2. The body runs. On success the no-error branch (if any) sees the value.
//! 3. On error, handlers are tried in declaration order. The first whose
//!    kinds subsume the error's kind decides a [`Disposition`].
//! 4. The always branch fires exactly once when [`Region::run`] returns,
//!    including when the error was not handled or a closure panicked.
//!
//! ## State Machine
//!
//! ```text
//! Running ──► Completed
//!    │
//!    └──► Raised ──► HandledSuppressed
//!                ├──► HandledReraised
//!                └──► Unhandled
//! ```
//!
//! ## Example
//!
//! ```rust
//! use memio_common::guard::{Disposition, Region};
//! use memio_common::kind;
//! use memio_common::numeric::foo;
//!
//! let result = Region::new(|| foo("0"))
//!     .except(&kind::ZERO_DIVISION, |e| {
//!         println!("except: {}", e.message());
//!         Disposition::Suppress
//!     })
//!     .finally(|| println!("finally..."))
//!     .run();
//!
//! assert!(matches!(result, Ok(None)));
//! ```

use crate::error::{Error, Result};
use crate::kind::{self, Kind};
use tracing::{debug, warn};

/// What a handler does with the error it caught.
#[derive(Debug)]
pub enum Disposition {
    /// Swallow the error; the region yields `Ok(None)`.
    Suppress,
    /// Propagate the caught error unchanged.
    Reraise,
    /// Propagate a different error. The caught one becomes its cause.
    Raise(Error),
}

/// Lifecycle of a single region run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionState {
    Running,
    Completed,
    Raised,
    HandledSuppressed,
    HandledReraised,
    Unhandled,
}

impl RegionState {
    /// Returns true for states a finished run can end in.
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::HandledSuppressed | Self::HandledReraised | Self::Unhandled
        )
    }
}

type Body<'a, T> = Box<dyn FnOnce() -> Result<T> + 'a>;
type Handler<'a> = Box<dyn FnOnce(&Error) -> Disposition + 'a>;

struct Matcher<'a> {
    kinds: Vec<&'static Kind>,
    handler: Handler<'a>,
}

impl Matcher<'_> {
    fn matches(&self, err: &Error) -> bool {
        self.kinds.iter().any(|k| err.is(k))
    }
}

/// Runs its action when dropped, at most once.
struct Always<'a> {
    action: Option<Box<dyn FnOnce() + 'a>>,
}

impl Drop for Always<'_> {
    fn drop(&mut self) {
        if let Some(action) = self.action.take() {
            action();
        }
    }
}

/// A block of computation wrapped with handlers and branches.
pub struct Region<'a, T> {
    body: Body<'a, T>,
    matchers: Vec<Matcher<'a>>,
    otherwise: Option<Box<dyn FnOnce(&T) + 'a>>,
    finally: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a, T> Region<'a, T> {
    /// Guard `body`.
    pub fn new(body: impl FnOnce() -> Result<T> + 'a) -> Self {
        Self {
            body: Box::new(body),
            matchers: Vec::new(),
            otherwise: None,
            finally: None,
        }
    }

    /// Handle errors whose kind is `kind` or one of its descendants.
    ///
    /// Handlers are tried in the order they are added. A broader kind
    /// added first shadows a narrower one added later.
    pub fn except(self, kind: &'static Kind, handler: impl FnOnce(&Error) -> Disposition + 'a) -> Self {
        self.except_any(&[kind], handler)
    }

    /// Handle errors matching any of `kinds`.
    pub fn except_any(
        mut self,
        kinds: &[&'static Kind],
        handler: impl FnOnce(&Error) -> Disposition + 'a,
    ) -> Self {
        self.matchers.push(Matcher {
            kinds: kinds.to_vec(),
            handler: Box::new(handler),
        });
        self
    }

    /// Run `f` only if the body completes without error.
    pub fn otherwise(mut self, f: impl FnOnce(&T) + 'a) -> Self {
        self.otherwise = Some(Box::new(f));
        self
    }

    /// Run `f` exactly once on every exit from the region.
    pub fn finally(mut self, f: impl FnOnce() + 'a) -> Self {
        self.finally = Some(Box::new(f));
        self
    }

    /// Run the region.
    ///
    /// Returns `Ok(Some(value))` when the body completed, `Ok(None)` when
    /// a handler suppressed the error, and `Err` when an error left the
    /// region.
    pub fn run(self) -> Result<Option<T>> {
        self.run_with_state().1
    }

    /// Run the region and also report the terminal state it reached.
    pub fn run_with_state(self) -> (RegionState, Result<Option<T>>) {
        let Region {
            body,
            matchers,
            otherwise,
            finally,
        } = self;
        let _always = Always { action: finally };

        let (state, result) = match body() {
            Ok(value) => {
                if let Some(f) = otherwise {
                    f(&value);
                }
                (RegionState::Completed, Ok(Some(value)))
            }
            Err(err) => {
                debug!(kind = err.kind().name(), state = ?RegionState::Raised, "region raised");
                dispatch(matchers, err)
            }
        };

        debug!(state = ?state, "region finished");
        (state, result)
    }
}

fn dispatch<T>(matchers: Vec<Matcher<'_>>, err: Error) -> (RegionState, Result<Option<T>>) {
    let Some(matcher) = matchers.into_iter().find(|m| m.matches(&err)) else {
        return (RegionState::Unhandled, Err(err));
    };

    match (matcher.handler)(&err) {
        Disposition::Suppress => (RegionState::HandledSuppressed, Ok(None)),
        Disposition::Reraise => (RegionState::HandledReraised, Err(err)),
        Disposition::Raise(new) => {
            if is_unrelated_translation(&err, &new) {
                warn!(
                    from = err.kind().name(),
                    to = new.kind().name(),
                    "refusing to translate an OS error into a value error, re-raising original"
                );
                return (RegionState::HandledReraised, Err(err));
            }
            (RegionState::HandledReraised, Err(new.with_context(err)))
        }
    }
}

/// An I/O failure says nothing about the validity of a value.
fn is_unrelated_translation(from: &Error, to: &Error) -> bool {
    from.is(&kind::OS) && to.is(&kind::VALUE)
}

// ─── Tests ──────────────────────────────────────────────────────────
