/*!
The catalog of clauses held by a context.

Long clauses are catalogued by offset, in two collections: irredundant clauses (those of the formula) and redundant clauses (those learnt, which may be removed without changing the satisfiable assignments of the formula).
Binary and ternary clauses are not catalogued, as they are recovered by a scan of the [watch array](crate::db::watches).
Though, a count of binary and ternary clauses is kept, together with a count of the literals in each attached clause.
*/

use crate::{db::arena::ClauseOffset, structures::literal::CLiteral};

/// Running counts of attached clauses and their literals.
///
/// Each count is updated when a clause is attached or detached, and so counts exactly the attached clauses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClauseCounts {
    /// A count of the literals of attached irredundant binary, ternary, and long clauses.
    pub irredundant_literals: usize,

    /// A count of the literals of attached redundant binary, ternary, and long clauses.
    pub redundant_literals: usize,

    pub irredundant_binaries: usize,
    pub redundant_binaries: usize,
    pub irredundant_ternaries: usize,
    pub redundant_ternaries: usize,
}

impl ClauseCounts {
    /// Records the attachment of a clause.
    pub(crate) fn attach(&mut self, size: usize, redundant: bool) {
        match redundant {
            true => self.redundant_literals += size,
            false => self.irredundant_literals += size,
        }
        match (size, redundant) {
            (2, false) => self.irredundant_binaries += 1,
            (2, true) => self.redundant_binaries += 1,
            (3, false) => self.irredundant_ternaries += 1,
            (3, true) => self.redundant_ternaries += 1,
            _ => {}
        }
    }

    /// Records the detachment of a clause.
    pub(crate) fn detach(&mut self, size: usize, redundant: bool) {
        match redundant {
            true => self.redundant_literals -= size,
            false => self.irredundant_literals -= size,
        }
        match (size, redundant) {
            (2, false) => self.irredundant_binaries -= 1,
            (2, true) => self.redundant_binaries -= 1,
            (3, false) => self.irredundant_ternaries -= 1,
            (3, true) => self.redundant_ternaries -= 1,
            _ => {}
        }
    }

    /// A count of attached binary clauses.
    pub fn binaries(&self) -> usize {
        self.irredundant_binaries + self.redundant_binaries
    }

    /// A count of attached ternary clauses.
    pub fn ternaries(&self) -> usize {
        self.irredundant_ternaries + self.redundant_ternaries
    }
}

/// The catalog of a context.
#[derive(Default)]
pub struct ClauseCatalog {
    /// Unit clauses, as the literals made true at level zero by addition of the clause.
    pub units: Vec<CLiteral>,

    /// Offsets of irredundant long clauses, in order of addition.
    pub long_irredundant: Vec<ClauseOffset>,

    /// Offsets of redundant long clauses, in order of addition.
    pub long_redundant: Vec<ClauseOffset>,

    pub counts: ClauseCounts,
}

impl ClauseCatalog {
    /// The collection of long clauses of the given redundancy.
    pub fn long(&self, redundant: bool) -> &[ClauseOffset] {
        match redundant {
            true => &self.long_redundant,
            false => &self.long_irredundant,
        }
    }

    pub(crate) fn long_mut(&mut self, redundant: bool) -> &mut Vec<ClauseOffset> {
        match redundant {
            true => &mut self.long_redundant,
            false => &mut self.long_irredundant,
        }
    }

    /// Removes the offset from the collection of long clauses of the given redundancy, preserving order.
    pub(crate) fn forget_long(&mut self, offset: ClauseOffset, redundant: bool) -> bool {
        let collection = self.long_mut(redundant);
        match collection.iter().position(|held| *held == offset) {
            Some(index) => {
                collection.remove(index);
                true
            }
            None => false,
        }
    }

    /// A count of long clauses, irredundant and redundant.
    pub fn long_count(&self) -> usize {
        self.long_irredundant.len() + self.long_redundant.len()
    }

    /// The memory (in bytes) held by the catalog.
    pub fn mem_used(&self) -> usize {
        self.units.capacity() * std::mem::size_of::<CLiteral>()
            + (self.long_irredundant.capacity() + self.long_redundant.capacity())
                * std::mem::size_of::<ClauseOffset>()
    }
}
