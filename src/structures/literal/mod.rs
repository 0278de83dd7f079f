//! Literals are atoms paired with a (boolean) polarity.
//!
//! Or, rather, anything which has methods for returning an atom and a polarity (and a few other useful things).
//!
//! The 'canonical' implementation of the literal trait is the [CLiteral] structure, a single `u32` *code*:
//! - `2 * atom` for the positive literal of the atom.
//! - `2 * atom + 1` for the negative literal of the atom.
//!
//! Codes of the literals over *n* atoms are dense and contiguous over `[0, 2n)`, and a code is used directly as the index of a literal's list in the [watch array](crate::db::watches::WatchArray).
//!
//! ```rust
//! # use clause_core::structures::literal::{CLiteral, Literal};
//! let literal = CLiteral::new(79, true);
//!
//! assert!(literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert_eq!(literal.code(), 158);
//!
//! assert!(!literal.negate().polarity());
//! assert_eq!(literal.negate().code(), 159);
//! assert_eq!(-literal, literal.negate());
//! ```
//!
//! Implementation of the literal trait requires implementation of two additional traits:
//! - [Ord]
//!   + Literals should be ordered by atom and then polarity.
//!     For [CLiteral] this is the order of codes, and so the positive literal of an atom precedes the negative literal.
//! - [Hash](std::hash::Hash)
//!   + Literals are hashable in order to allow for straightforward use of literals as indicies of maps, etc.
//!
//! The signed integer form used by DIMACS is given by [IntLiteral], where the atom *a* is written as `a + 1`.

mod int_literal;
pub use int_literal::IntLiteral;

use crate::structures::atom::Atom;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal: std::cmp::Ord + std::hash::Hash {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The literal in its canonical form.
    fn canonical(&self) -> CLiteral;

    /// The literal in its integer form, with sign indicating polarity and the atom offset by one.
    fn as_int(&self) -> isize;
}

/// The canonical implementation of a literal, as a dense code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct CLiteral {
    code: u32,
}

impl CLiteral {
    /// The code of the literal, used to index per-literal structures.
    pub const fn code(&self) -> usize {
        self.code as usize
    }

    /// The literal with the given code.
    ///
    /// No check is made that the code is for a literal of some atom in a context.
    pub const fn from_code(code: usize) -> Self {
        CLiteral { code: code as u32 }
    }

    /// The raw code, as stored in the clause arena.
    pub(crate) const fn raw(&self) -> u32 {
        self.code
    }
}

impl Literal for CLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        CLiteral {
            code: (atom << 1) | (!polarity as u32),
        }
    }

    fn negate(&self) -> Self {
        CLiteral {
            code: self.code ^ 1,
        }
    }

    fn atom(&self) -> Atom {
        self.code >> 1
    }

    fn polarity(&self) -> bool {
        self.code & 1 == 0
    }

    fn canonical(&self) -> CLiteral {
        *self
    }

    fn as_int(&self) -> isize {
        let magnitude = self.atom() as isize + 1;
        match self.polarity() {
            true => magnitude,
            false => -magnitude,
        }
    }
}

impl std::ops::Neg for CLiteral {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl std::fmt::Display for CLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_int())
    }
}
