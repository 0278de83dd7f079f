//! Error types used in the library.
//!
//! - Most of these are very unlikely to occur during use.
//! - Some of these are internally expected --- e.g. BCP errors are used to control the flow of propagation, and a [BuildError] is the expected signal that a clause reduced to the empty clause.
//! - Structural violations are reported by [InvariantError]s from the checking routines, and indicate a bug rather than a recoverable condition.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::{
    db::{arena::ClauseOffset, ClauseKey},
    structures::{atom::Atom, literal::CLiteral},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Arena(ArenaError),
    AtomDB(AtomDBError),
    BCP(BCPError),
    Build(BuildError),
    ClauseDB(ClauseDBError),
    Config(ConfigError),
    Invariant(InvariantError),
}

/// Errors in the clause arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArenaError {
    /// The arena cannot address any further words.
    StorageExhausted,

    /// An offset which is not the start of some record.
    InvalidOffset,
}

impl From<ArenaError> for ErrorKind {
    fn from(e: ArenaError) -> Self {
        ErrorKind::Arena(e)
    }
}

/// Errors in the atom database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AtomDBError {
    /// There are no more fresh atoms.
    AtomsExhausted,
}

impl From<AtomDBError> for ErrorKind {
    fn from(e: AtomDBError) -> Self {
        ErrorKind::AtomDB(e)
    }
}

/// Noted errors during boolean constraint propagation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BCPError {
    /// A conflict was found.
    /// This is expected from time to time, and a learning opportunity.
    Conflict(ClauseKey),

    /// Some corruption in the watched literals of a clause.
    /// This is unexpected.
    CorruptWatch,
}

impl From<BCPError> for ErrorKind {
    fn from(e: BCPError) -> Self {
        ErrorKind::BCP(e)
    }
}

/// Noted errors when building the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// The database is unsatisfiable.
    ///
    /// Either some clause was reduced to the empty clause, or the database was already known to be unsatisfiable.
    Unsatisfiable,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Errors in the clause database.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClauseDBError {
    /// Some attempt was made to store an empty clause.
    EmptyClause,

    /// A clause mentioned an atom the context does not know about.
    UnknownAtom,

    /// A clause is missing, e.g. a key for a removed clause.
    Missing,

    /// A watch list did not contain an entry it was expected to contain.
    CorruptList,

    /// Some storage is exhausted.
    StorageExhausted,

    /// An operation restricted to decision level zero was requested with some decision made.
    DecisionMade,

    /// A unit key was given where a key to a stored clause was expected.
    UnitKey,

    /// The literals given to replace those of a clause were not a strict subset of the clause.
    NotSubset,
}

impl From<ClauseDBError> for ErrorKind {
    fn from(e: ClauseDBError) -> Self {
        ErrorKind::ClauseDB(e)
    }
}

impl From<ArenaError> for ClauseDBError {
    fn from(e: ArenaError) -> Self {
        match e {
            ArenaError::StorageExhausted => ClauseDBError::StorageExhausted,
            ArenaError::InvalidOffset => ClauseDBError::Missing,
        }
    }
}

/// Errors when configuring a context.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// A value outside the bounds of an option.
    OutOfBounds,
}

impl From<ConfigError> for ErrorKind {
    fn from(e: ConfigError) -> Self {
        ErrorKind::Config(e)
    }
}

/// Structural violations of the invariants of the databases.
///
/// Each variant carries enough to identify the offending clause, offset, or literal.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvariantError {
    /// A long clause is watched in a number of lists other than two.
    WatchCount { offset: ClauseOffset, count: usize },

    /// A long clause is watched in a list of a literal other than its first two.
    WrongAttach { offset: ClauseOffset, literal: CLiteral },

    /// A binary or ternary entry has no partner entry.
    Asymmetric { literal: CLiteral, key: ClauseKey },

    /// An entry refers to a record which has been removed, or does not exist.
    DanglingOffset { literal: CLiteral, offset: ClauseOffset },

    /// A running literal count disagrees with a recount.
    LiteralCount { redundant: bool, kept: usize, counted: usize },

    /// A running binary or ternary count disagrees with a recount.
    ImplicitCount { size: usize, redundant: bool, kept: usize, counted: usize },

    /// A catalog holds an offset with the wrong learnt flag, or twice.
    Catalog { offset: ClauseOffset },

    /// The outer and inner maps of an atom are not mutual inverses.
    Numbering { atom: Atom },
}

impl From<InvariantError> for ErrorKind {
    fn from(e: InvariantError) -> Self {
        ErrorKind::Invariant(e)
    }
}

impl std::fmt::Display for InvariantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WatchCount { offset, count } => {
                write!(f, "Clause {offset} is watched {count} times")
            }
            Self::WrongAttach { offset, literal } => {
                write!(f, "Clause {offset} is watched by {literal}, which is not in its watched pair")
            }
            Self::Asymmetric { literal, key } => {
                write!(f, "Clause {key} in the list of {literal} has no partner entry")
            }
            Self::DanglingOffset { literal, offset } => {
                write!(f, "The list of {literal} refers to missing clause {offset}")
            }
            Self::LiteralCount {
                redundant,
                kept,
                counted,
            } => write!(
                f,
                "Literal count (redundant: {redundant}) is {kept}, recounted {counted}"
            ),
            Self::ImplicitCount {
                size,
                redundant,
                kept,
                counted,
            } => write!(
                f,
                "Count of size {size} clauses (redundant: {redundant}) is {kept}, recounted {counted}"
            ),
            Self::Catalog { offset } => write!(f, "Clause {offset} is miscatalogued"),
            Self::Numbering { atom } => {
                write!(f, "Outer and inner numbering of atom {atom} disagree")
            }
        }
    }
}
