//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! The canonical representation of a clause is as a vector of literals.
//!
//! ```rust
//! # use clause_core::structures::literal::{CLiteral, Literal};
//! # use clause_core::structures::clause::Clause;
//! let clause = vec![CLiteral::new(23, true),
//!                   CLiteral::new(41, false),
//!                   CLiteral::new(3,  false)];
//!
//! assert_eq!(clause.size(), 3);
//!
//! let mut some_valuation = vec![Some(true); 42];
//! some_valuation[23] = Some(false);
//! some_valuation[3] = Some(true);
//! assert!(!clause.satisfied_on(&some_valuation));
//!
//! some_valuation[41] = Some(false);
//! assert!(clause.satisfied_on(&some_valuation));
//! ```
//!
//! - The empty clause is always false (never true).
//! - Single literals are identified with the clause containing that literal (aka. a 'unit' clause --- where the 'unit' is the literal).

use crate::structures::{
    atom::Atom,
    literal::{CLiteral, Literal},
    valuation::Valuation,
};

/// The clause trait.
pub trait Clause {
    /// Some string representation of the clause.
    fn as_string(&self) -> String;

    /// A string of the clause in DIMACS form, with the terminating `0` as optional.
    ///
    /// The representation uses the numbering of the stored literals, and so inner atoms for any clause read from a database.
    fn as_dimacs(&self, zero: bool) -> String;

    /// An iterator over all literals in the clause, order is not guaranteed.
    fn literals(&self) -> impl Iterator<Item = CLiteral>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;

    /// An iterator over all atoms in the clause, order is not guaranteed.
    fn atoms(&self) -> impl Iterator<Item = Atom> {
        self.literals().map(|literal| literal.atom())
    }

    /// The clause in its canonical form.
    fn canonical(self) -> CClause;

    /// Whether some literal of the clause is true on the given valuation.
    ///
    /// Literals whose atom is unvalued (or outside the valuation) are not true.
    fn satisfied_on(&self, valuation: &impl Valuation) -> bool {
        self.literals()
            .any(|literal| valuation.literal_value(literal) == Some(true))
    }
}

/// The canonical implementation of a clause.
pub type CClause = Vec<CLiteral>;

impl Clause for CClause {
    fn as_string(&self) -> String {
        let mut the_string = String::from("(");
        for literal in self {
            the_string.push_str(format!(" {literal} ").as_str())
        }
        the_string += ")";
        the_string
    }

    fn as_dimacs(&self, zero: bool) -> String {
        self.as_slice().as_dimacs(zero)
    }

    fn literals(&self) -> impl Iterator<Item = CLiteral> {
        self.iter().copied()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn canonical(self) -> CClause {
        self
    }
}

impl Clause for &[CLiteral] {
    fn as_string(&self) -> String {
        self.to_vec().as_string()
    }

    fn as_dimacs(&self, zero: bool) -> String {
        let mut the_string = String::default();
        for literal in self.iter() {
            the_string.push_str(format!("{literal} ").as_str())
        }
        if zero {
            the_string += "0";
        } else {
            the_string.pop();
        }
        the_string
    }

    fn literals(&self) -> impl Iterator<Item = CLiteral> {
        self.iter().copied()
    }

    fn size(&self) -> usize {
        self.len()
    }

    fn canonical(self) -> CClause {
        self.to_vec()
    }
}

impl<const N: usize> Clause for [CLiteral; N] {
    fn as_string(&self) -> String {
        self.to_vec().as_string()
    }

    fn as_dimacs(&self, zero: bool) -> String {
        self.as_slice().as_dimacs(zero)
    }

    fn literals(&self) -> impl Iterator<Item = CLiteral> {
        self.iter().copied()
    }

    fn size(&self) -> usize {
        N
    }

    fn canonical(self) -> CClause {
        self.to_vec()
    }
}

/// A literal is the unit clause containing the literal.
impl Clause for CLiteral {
    fn as_string(&self) -> String {
        format!("( {self} )")
    }

    fn as_dimacs(&self, zero: bool) -> String {
        match zero {
            true => format!("{self} 0"),
            false => format!("{self}"),
        }
    }

    fn literals(&self) -> impl Iterator<Item = CLiteral> {
        std::iter::once(*self)
    }

    fn size(&self) -> usize {
        1
    }

    fn canonical(self) -> CClause {
        vec![self]
    }
}
