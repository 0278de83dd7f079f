use crate::structures::atom::Atom;

use super::{CLiteral, Literal};

/// The representation of a literal as a signed integer, following DIMACS.
///
/// The atom *a* is written `a + 1`, so the integer is never zero.
///
/// Zero is not a literal. Debug builds panic when asked for the atom of zero, and release builds give the atom 0.
pub type IntLiteral = i32;

impl Literal for IntLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        let magnitude = atom as IntLiteral + 1;
        match polarity {
            true => magnitude,
            false => -magnitude,
        }
    }

    fn negate(&self) -> Self {
        -*self
    }

    fn atom(&self) -> Atom {
        debug_assert!(*self != 0, "Zero is not a literal");
        self.unsigned_abs().checked_sub(1).unwrap_or_default()
    }

    fn polarity(&self) -> bool {
        self.is_positive()
    }

    fn canonical(&self) -> CLiteral {
        CLiteral::new(self.atom(), self.polarity())
    }

    fn as_int(&self) -> isize {
        *self as isize
    }
}

impl From<CLiteral> for IntLiteral {
    fn from(literal: CLiteral) -> Self {
        <IntLiteral as Literal>::new(literal.atom(), literal.polarity())
    }
}
