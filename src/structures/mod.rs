//! Abstract elements of a clause database: atoms, literals, clauses, and valuations.
//!
//! Each structure is given by a trait together with a canonical implementation, and the canonical implementation is what the databases store.
//! For example, the canonical literal is [CLiteral](literal::CLiteral), a dense code which doubles as an index into the watch array.

pub mod atom;
pub mod clause;
pub mod literal;
pub mod valuation;
