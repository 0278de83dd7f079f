use crate::{
    db::arena::ClauseOffset,
    structures::literal::{CLiteral, Literal},
};

/// A key to access a clause stored in the clause database.
///
/// Units, binary, and ternary clauses are not stored outside of the [watch array](crate::db::watches::WatchArray), and so their keys contain the clause.
/// The first two literals of a binary or ternary key are the watched literals of the clause, and for a ternary clause the third literal is unwatched.
///
/// Long clauses (of four or more literals) are stored in the [arena](crate::db::arena::ClauseArena), and the key is the offset of the clause in the arena.
/// Long keys are invalidated by a [consolidation](crate::procedures::consolidate) of the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClauseKey {
    /// The key to a unit clause contains the (unit) clause.
    Unit(CLiteral),

    /// The key to a binary clause.
    Binary {
        literals: [CLiteral; 2],
        redundant: bool,
    },

    /// The key to a ternary clause, with the unwatched literal last.
    Ternary {
        literals: [CLiteral; 3],
        redundant: bool,
    },

    /// The key to a long clause.
    Long(ClauseOffset),
}

impl ClauseKey {
    /// Whether the key is to a binary or ternary clause.
    pub fn is_implicit(&self) -> bool {
        matches!(self, Self::Binary { .. } | Self::Ternary { .. })
    }

    /// The literals of a unit, binary, or ternary key.
    ///
    /// Long keys have no literals, as the literals of a long clause are stored in the arena.
    pub fn implicit_literals(&self) -> &[CLiteral] {
        match self {
            Self::Unit(literal) => std::slice::from_ref(literal),
            Self::Binary { literals, .. } => literals,
            Self::Ternary { literals, .. } => literals,
            Self::Long(_) => &[],
        }
    }
}

impl std::fmt::Display for ClauseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit(literal) => write!(f, "Unit({})", literal.as_int()),
            Self::Binary {
                literals: [a, b],
                redundant,
            } => write!(f, "Binary({a} {b}, redundant: {redundant})"),
            Self::Ternary {
                literals: [a, b, c],
                redundant,
            } => write!(f, "Ternary({a} {b} {c}, redundant: {redundant})"),
            Self::Long(offset) => write!(f, "Long({offset})"),
        }
    }
}
