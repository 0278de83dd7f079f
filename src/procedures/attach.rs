/*!
Attachment and detachment of clauses to and from the watch array.

# Overview

A clause is *attached* when the watch array holds an entry for the clause in the list of each of its two watched literals, and *detached* when the watch array holds no entry for the clause.
Attachment and detachment update the running [counts](crate::db::catalog::ClauseCounts) of clauses and literals, and so the counts are of attached clauses.

Detaching a long clause does not remove the clause from the arena, and a detached clause may be modified (e.g. by reordering or dropping literals) and attached again.
Though, as the watched literals of a long clause are its first two literals, a clause whose literals have been modified while attached must be detached by [detach_modified_clause](Context::detach_modified_clause), given the former watched literals.

# Watch updates

When a watched literal of a long clause becomes false, [update_watch](Context::update_watch) looks for a replacement, and reports the result as a [WatchUpdate].
If a replacement is found, the replacement is swapped into the position of the false literal and the entry for the clause moves to the list of the replacement.
So, the watched literals of a long clause are always the first two literals of the clause, and the new watched pair is returned explicitly.

```rust
# use clause_core::context::Context;
# use clause_core::db::ClauseKey;
# use clause_core::procedures::{add::ClauseOk, attach::WatchUpdate};
let mut the_context = Context::default();
let [p, q, r, s] = *the_context.fresh_or_max_literals(4).as_slice() else {
    panic!("Failed to create fresh literals");
};

let Ok(ClauseOk::Added(ClauseKey::Long(offset))) = the_context.add_clause(vec![p, q, r, s]) else {
    panic!("Failed to add clause");
};

the_context.record_decision(-p);
let update = the_context.update_watch(offset, p).unwrap();

assert_eq!(update, WatchUpdate::Moved { watched: [q, r] });
assert!(the_context.watches().list(p).is_empty());
assert_eq!(the_context.watches().list(r).len(), 1);
```
*/

use crate::{
    context::Context,
    db::{arena::ClauseOffset, watches::Watched, ClauseKey},
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::{self},
};

/// The result of an attempt to replace a false watched literal of a long clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchUpdate {
    /// The other watched literal is true, and so the watches were kept.
    Witness,

    /// The false literal was replaced, with the resulting watched pair.
    Moved { watched: [CLiteral; 2] },

    /// No replacement exists, and the other watched literal is unassigned, and so must be made true.
    Unit(CLiteral),

    /// No replacement exists, and the other watched literal is false.
    Conflict,
}

impl Context {
    /// Attaches a detached clause.
    pub fn attach_clause(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Err(err::ClauseDBError::UnitKey),

            ClauseKey::Binary {
                literals: [a, b],
                redundant,
            } => {
                self.attach_binary(*a, *b, *redundant);
                Ok(())
            }

            ClauseKey::Ternary {
                literals,
                redundant,
            } => {
                self.attach_ternary(*literals, *redundant);
                Ok(())
            }

            ClauseKey::Long(offset) => self.attach_long(*offset),
        }
    }

    /// Attaches the binary clause *a* ∨ *b*.
    pub fn attach_binary(&mut self, a: CLiteral, b: CLiteral, redundant: bool) {
        self.watches.push(
            a,
            Watched::Binary {
                other: b,
                learnt: redundant,
            },
        );
        self.watches.push(
            b,
            Watched::Binary {
                other: a,
                learnt: redundant,
            },
        );
        self.catalog.counts.attach(2, redundant);
    }

    /// Attaches the ternary clause of the given literals, watched by the first two literals.
    pub fn attach_ternary(&mut self, [a, b, c]: [CLiteral; 3], redundant: bool) {
        self.watches.push(
            a,
            Watched::Ternary {
                others: [b, c],
                learnt: redundant,
            },
        );
        self.watches.push(
            b,
            Watched::Ternary {
                others: [a, c],
                learnt: redundant,
            },
        );
        self.catalog.counts.attach(3, redundant);
    }

    /// Attaches the long clause at the offset, watched by its first two literals.
    pub fn attach_long(&mut self, offset: ClauseOffset) -> Result<(), err::ClauseDBError> {
        let header = self.arena.header(offset)?;
        if header.removed {
            log::error!(target: targets::CLAUSE_DB, "Attach of removed clause {offset}");
            return Err(err::ClauseDBError::Missing);
        }

        let literals = self.arena.literals(offset)?;
        let (first, second) = (literals[0], literals[1]);
        self.watches.push(first, Watched::Long { offset });
        self.watches.push(second, Watched::Long { offset });
        self.catalog.counts.attach(header.size, header.learnt);
        Ok(())
    }

    /// Detaches an attached clause.
    pub fn detach_clause(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Err(err::ClauseDBError::UnitKey),

            ClauseKey::Binary {
                literals: [a, b],
                redundant,
            } => self.detach_binary(*a, *b, *redundant),

            ClauseKey::Ternary {
                literals,
                redundant,
            } => self.detach_ternary(*literals, *redundant),

            ClauseKey::Long(offset) => self.detach_long(*offset),
        }
    }

    /// Detaches the binary clause *a* ∨ *b*.
    pub fn detach_binary(
        &mut self,
        a: CLiteral,
        b: CLiteral,
        redundant: bool,
    ) -> Result<(), err::ClauseDBError> {
        self.watches.remove(
            a,
            &Watched::Binary {
                other: b,
                learnt: redundant,
            },
        )?;
        self.watches.remove(
            b,
            &Watched::Binary {
                other: a,
                learnt: redundant,
            },
        )?;
        self.catalog.counts.detach(2, redundant);
        Ok(())
    }

    /// Detaches the ternary clause of the given literals.
    ///
    /// Propagation may move a watch of a ternary clause to its third literal, and so each pair of the literals is tried as the watched pair, starting with the first two literals.
    pub fn detach_ternary(
        &mut self,
        literals: [CLiteral; 3],
        redundant: bool,
    ) -> Result<(), err::ClauseDBError> {
        let [a, b, c] = literals;
        for (first, second, unwatched) in [(a, b, c), (a, c, b), (b, c, a)] {
            let first_entry = Watched::Ternary {
                others: [second, unwatched],
                learnt: redundant,
            };
            let second_entry = Watched::Ternary {
                others: [first, unwatched],
                learnt: redundant,
            };
            if self.watches.list(first).contains(&first_entry)
                && self.watches.list(second).contains(&second_entry)
            {
                self.watches.remove(first, &first_entry)?;
                self.watches.remove(second, &second_entry)?;
                self.catalog.counts.detach(3, redundant);
                return Ok(());
            }
        }

        log::error!(target: targets::CLAUSE_DB, "Ternary clause {a} {b} {c} is not attached");
        Err(err::ClauseDBError::CorruptList)
    }

    /// Detaches the long clause at the offset, watched by its first two literals.
    pub fn detach_long(&mut self, offset: ClauseOffset) -> Result<(), err::ClauseDBError> {
        let header = self.arena.header(offset)?;
        let literals = self.arena.literals(offset)?;
        let (first, second) = (literals[0], literals[1]);
        self.watches.remove(first, &Watched::Long { offset })?;
        self.watches.remove(second, &Watched::Long { offset })?;
        self.catalog.counts.detach(header.size, header.learnt);
        Ok(())
    }

    /// Detaches the long clause at the offset, whose literals were modified while attached.
    ///
    /// The clause was watched by the `former` pair of literals, and was of size `original_size` when attached.
    pub fn detach_modified_clause(
        &mut self,
        former: [CLiteral; 2],
        original_size: usize,
        offset: ClauseOffset,
    ) -> Result<(), err::ClauseDBError> {
        let learnt = self.arena.is_learnt(offset)?;
        self.watches.remove(former[0], &Watched::Long { offset })?;
        self.watches.remove(former[1], &Watched::Long { offset })?;
        self.catalog.counts.detach(original_size, learnt);
        Ok(())
    }

    /// Removes the stored record of a detached clause.
    ///
    /// Binary and ternary clauses have no record outside of the watch array, and so only long clauses are affected.
    pub fn delete_clause(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Err(err::ClauseDBError::UnitKey),

            ClauseKey::Binary { .. } | ClauseKey::Ternary { .. } => Ok(()),

            ClauseKey::Long(offset) => {
                let learnt = self.arena.is_learnt(*offset)?;
                self.arena.remove(*offset)?;
                if !self.catalog.forget_long(*offset, learnt) {
                    log::error!(target: targets::CLAUSE_DB, "Deleted clause {offset} was not catalogued");
                    return Err(err::ClauseDBError::Missing);
                }
                Ok(())
            }
        }
    }

    /// As [delete_clause](Context::delete_clause), though a long clause is only marked as removed in the arena.
    ///
    /// The offset stays in the catalog until [forget_deleted](Context::forget_deleted) is called.
    pub fn delete_clause_deferred(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        match key {
            ClauseKey::Unit(_) => Err(err::ClauseDBError::UnitKey),

            ClauseKey::Binary { .. } | ClauseKey::Ternary { .. } => Ok(()),

            ClauseKey::Long(offset) => {
                self.arena.remove(*offset)?;
                Ok(())
            }
        }
    }

    /// Drops every offset of a removed clause from the catalog, returning a count of the offsets dropped.
    pub fn forget_deleted(&mut self) -> usize {
        let mut forgotten = 0;
        for redundant in [false, true] {
            let arena = &self.arena;
            self.catalog.long_mut(redundant).retain(|offset| {
                let keep = arena.is_removed(*offset) == Ok(false);
                if !keep {
                    forgotten += 1;
                }
                keep
            });
        }
        log::trace!(target: targets::CLAUSE_DB, "Forgot {forgotten} deleted clauses");
        forgotten
    }

    /// Replaces the literals of a detached long clause with a strict subset of at least four literals.
    ///
    /// The words freed by the clause become padding in the arena, reclaimed by [consolidation](crate::procedures::consolidate).
    pub fn shrink_clause(
        &mut self,
        offset: ClauseOffset,
        subset: &[CLiteral],
    ) -> Result<(), err::ClauseDBError> {
        let literals = self.arena.literals_mut(offset)?;
        if subset.len() < 4
            || subset.len() >= literals.len()
            || subset.iter().any(|literal| !literals.contains(literal))
        {
            log::error!(target: targets::CLAUSE_DB, "Shrink of {offset} to a clause which is not a strict long subset");
            return Err(err::ClauseDBError::NotSubset);
        }

        literals[..subset.len()].copy_from_slice(subset);
        self.arena.shrink(offset, subset.len())?;
        log::trace!(target: targets::CLAUSE_DB, "Shrank {offset} to {} literals", subset.len());
        Ok(())
    }

    /// Detaches and deletes an attached clause.
    pub fn remove_clause(&mut self, key: &ClauseKey) -> Result<(), err::ClauseDBError> {
        self.detach_clause(key)?;
        self.delete_clause(key)
    }

    /// Looks for a replacement for a false watched literal of the long clause at the offset, and if found moves the watch.
    ///
    /// The entry of the clause in the list of the false literal is removed if the watch moves.
    pub fn update_watch(
        &mut self,
        offset: ClauseOffset,
        false_literal: CLiteral,
    ) -> Result<WatchUpdate, err::ClauseDBError> {
        let update = self.relocate_watch(offset, false_literal)?;
        if let WatchUpdate::Moved { .. } = update {
            self.watches
                .remove(false_literal, &Watched::Long { offset })?;
        }
        Ok(update)
    }

    /// As [update_watch](Context::update_watch), though the entry in the list of the false literal is left for the caller to remove.
    ///
    /// Used during propagation, where the list of the false literal is held by the caller.
    pub(crate) fn relocate_watch(
        &mut self,
        offset: ClauseOffset,
        false_literal: CLiteral,
    ) -> Result<WatchUpdate, err::ClauseDBError> {
        let literals = self.arena.literals_mut(offset)?;

        if literals[0] == false_literal {
            literals.swap(0, 1);
        } else if literals[1] != false_literal {
            log::error!(target: targets::WATCHES, "{false_literal} does not watch {offset}");
            return Err(err::ClauseDBError::CorruptList);
        }

        let first = literals[0];
        let first_value = self.atom_db.literal_value(first);
        if first_value == Some(true) {
            return Ok(WatchUpdate::Witness);
        }

        for index in 2..literals.len() {
            if self.atom_db.literal_value(literals[index]) != Some(false) {
                literals.swap(1, index);
                let replacement = literals[1];
                self.watches.push(replacement, Watched::Long { offset });
                return Ok(WatchUpdate::Moved {
                    watched: [first, replacement],
                });
            }
        }

        match first_value {
            None => Ok(WatchUpdate::Unit(first)),
            _ => Ok(WatchUpdate::Conflict),
        }
    }
}
