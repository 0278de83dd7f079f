/*!
Databases for holding information relevant to a context.

- The [arena](arena) stores long clauses, addressed by offset.
- The [watch array](watches) holds, for each literal, the clauses watching the literal, and stores binary and ternary clauses inline.
- The [atom database](atom) holds the valuation, the trail, and the numbering of atoms.
- The [catalog](catalog) holds the offsets of long clauses by redundancy, the unit clauses, and running counts of clauses and literals.

The databases are owned by a [context](crate::context::Context), and the invariants which relate the databases (e.g. each long clause in the catalog is watched exactly twice) are maintained by the procedures of a context.
*/

pub mod arena;
pub mod atom;
pub mod catalog;
pub mod watches;

mod keys;
pub use keys::*;

/// The index of a decision level.
pub type LevelIndex = u32;
