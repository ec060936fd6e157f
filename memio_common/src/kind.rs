//! Error kinds and their subsumption hierarchy.
//!
//! Every [`Kind`] names its parent, so the kinds form a single-rooted tree
//! with [`EXCEPTION`] at the top. Matching walks the parent chain: a handler
//! declared for [`ARITHMETIC`] also catches [`ZERO_DIVISION`] and
//! [`OVERFLOW`].
//!
//! ```text
//! Exception
//! ├── ArithmeticError
//! │   ├── ZeroDivisionError
//! │   └── OverflowError
//! ├── ValueError
//! │   └── UnicodeError
//! ├── TypeError
//! └── OSError
//! ```
//!
//! Applications refine any node by declaring their own `static`:
//!
//! ```rust
//! use memio_common::kind::{Kind, VALUE};
//!
//! static FOO: Kind = Kind::refine("FooError", &VALUE);
//!
//! assert!(FOO.is_a(&VALUE));
//! assert!(!VALUE.is_a(&FOO));
//! ```

use std::fmt;

/// A node in the error kind tree.
///
/// Kinds are declared as `static` items so that parents can be referenced
/// with a `'static` lifetime. Two kinds are equal when their names and
/// their whole ancestor chains are equal.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Kind {
    name: &'static str,
    parent: Option<&'static Kind>,
}

impl Kind {
    /// Create a root kind (no parent).
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Create a kind that refines `parent`.
    pub const fn refine(name: &'static str, parent: &'static Kind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    /// Display name of the kind (e.g. `"ValueError"`).
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Direct parent, `None` for a root.
    #[inline]
    pub const fn parent(&self) -> Option<&'static Kind> {
        self.parent
    }

    /// Iterate from this kind up to the root, this kind first.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Returns true if this kind equals `ancestor` or descends from it.
    pub fn is_a(&self, ancestor: &Kind) -> bool {
        self.ancestors().any(|k| k == ancestor)
    }

    /// Number of edges between this kind and its root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator over a kind and its ancestors, see [`Kind::ancestors`].
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    next: Option<&'a Kind>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Kind;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent;
        Some(current)
    }
}

// ─── Built-in Kinds ─────────────────────────────────────────────────

/// Root kind. A handler for it catches every error.
pub static EXCEPTION: Kind = Kind::root("Exception");

/// Undefined numeric operation.
pub static ARITHMETIC: Kind = Kind::refine("ArithmeticError", &EXCEPTION);

/// Division or modulo by zero.
pub static ZERO_DIVISION: Kind = Kind::refine("ZeroDivisionError", &ARITHMETIC);

/// Result does not fit the numeric type.
pub static OVERFLOW: Kind = Kind::refine("OverflowError", &ARITHMETIC);

/// Malformed or semantically invalid value.
pub static VALUE: Kind = Kind::refine("ValueError", &EXCEPTION);

/// Text encoding or decoding failure.
pub static UNICODE: Kind = Kind::refine("UnicodeError", &VALUE);

/// Mismatched element type, e.g. bytes written to a text stream.
pub static TYPE: Kind = Kind::refine("TypeError", &EXCEPTION);

/// Operating system or I/O failure.
pub static OS: Kind = Kind::refine("OSError", &EXCEPTION);

// ─── Tests ──────────────────────────────────────────────────────────
