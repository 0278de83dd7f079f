/*!
Boolean constraint propagation over the watch array.

# Overview

Propagates an atom being assigned some value, given as a literal.

This is done by examining the clauses watching the negation of the literal (i.e. the clauses in which the negation has just become false) and, for each clause:
- Keeping the watch, if the clause is satisfied by some other watched literal.
- Moving the watch to some other literal of the clause which is not false, if one exists.
- Otherwise, assigning the remaining watched literal, if unassigned.
- Otherwise, noting the clause conflicts with the current valuation.

Binary clauses never move their watches.
A ternary clause moves a watch to its unwatched literal only when both remaining literals are unassigned, updating the entry held by the other watched literal so the entries continue to identify the watched pair.
Otherwise, the watches of a ternary clause stay where they are.
A long clause moves a watch through [relocate_watch](Context::relocate_watch).

The list being examined is taken from the watch array for the duration of the examination, as watches may move to other lists.
No watch moves to the list being examined, as the literal of the list is false.

# Scope

Propagation here is a minimal interface for a search loop (e.g. to exercise the watch invariants, or to settle units at level zero).
Decisions, conflict analysis, and learning belong to the search loop.

```rust
# use clause_core::context::Context;
# use clause_core::types::err::{self};
let mut the_context = Context::default();
let [p, q, r] = *the_context.fresh_or_max_literals(3).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert!(the_context.add_clause(vec![-p, q]).is_ok());
assert!(the_context.add_clause(vec![-p, -q, r]).is_ok());
assert!(the_context.add_clause(vec![-p, -r]).is_ok());

the_context.record_decision(p);
assert!(matches!(the_context.propagate(), Err(err::BCPError::Conflict(_))));

the_context.backjump(0);
assert_eq!(the_context.atom_db().trail().len(), 0);
```
*/

use crate::{
    context::Context,
    db::{atom::Reason, watches::Watched, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    procedures::attach::WatchUpdate,
    structures::literal::{CLiteral, Literal},
    types::err::{self},
};

impl Context {
    /// Opens a fresh decision level and assigns the (inner) literal as a decision.
    ///
    /// The atom of the literal must be unassigned.
    pub fn record_decision(&mut self, literal: CLiteral) {
        self.atom_db.push_level();
        self.atom_db.assign(literal, None);
        self.counters.decisions += 1;
    }

    /// Clears every assignment made above the given level.
    pub fn backjump(&mut self, level: LevelIndex) {
        log::trace!(target: targets::PROPAGATION, "Backjump from {} to {level}", self.atom_db.decision_level());
        self.atom_db.backjump(level);
    }

    /// Propagates every assignment on the trail which has not been propagated, until a conflict or a fixed point.
    pub fn propagate(&mut self) -> Result<(), err::BCPError> {
        while let Some(literal) = self.atom_db.next_to_propagate() {
            if let Err(e) = self.bcp(literal) {
                self.atom_db.clear_queue();
                return Err(e);
            }
        }
        Ok(())
    }

    /// Propagates the (inner) literal having been made true.
    pub fn bcp(&mut self, literal: CLiteral) -> Result<(), err::BCPError> {
        let false_literal = literal.negate();
        let list = self.watches.take(false_literal);
        let mut kept = Vec::with_capacity(list.len());
        let mut result = Ok(());

        let mut entries = list.into_iter();
        for entry in entries.by_ref() {
            match self.bcp_entry(false_literal, entry) {
                Ok(true) => kept.push(entry),
                Ok(false) => {}
                Err(e) => {
                    kept.push(entry);
                    result = Err(e);
                    break;
                }
            }
        }
        kept.extend(entries);

        self.watches.restore(false_literal, kept);
        result
    }

    /// Examines a single entry of the list of the false literal, returning whether the entry stays in the list.
    fn bcp_entry(&mut self, false_literal: CLiteral, entry: Watched) -> Result<bool, err::BCPError> {
        match entry {
            Watched::Binary { other, learnt } => match self.atom_db.literal_value(other) {
                Some(true) => Ok(true),

                None => {
                    self.propagated(other, Reason::Binary(false_literal));
                    Ok(true)
                }

                Some(false) => {
                    self.counters.conflicts += 1;
                    Err(err::BCPError::Conflict(ClauseKey::Binary {
                        literals: [false_literal, other],
                        redundant: learnt,
                    }))
                }
            },

            Watched::Ternary {
                others: [watched, unwatched],
                learnt,
            } => {
                let watched_value = self.atom_db.literal_value(watched);
                let unwatched_value = self.atom_db.literal_value(unwatched);

                if watched_value == Some(true) || unwatched_value == Some(true) {
                    return Ok(true);
                }

                match (watched_value, unwatched_value) {
                    (None, None) => {
                        let from = Watched::Ternary {
                            others: [false_literal, unwatched],
                            learnt,
                        };
                        let to = Watched::Ternary {
                            others: [unwatched, false_literal],
                            learnt,
                        };
                        self.watches
                            .replace(watched, &from, to)
                            .map_err(|_| err::BCPError::CorruptWatch)?;
                        self.watches.push(
                            unwatched,
                            Watched::Ternary {
                                others: [watched, false_literal],
                                learnt,
                            },
                        );
                        Ok(false)
                    }

                    (None, _) => {
                        self.propagated(watched, Reason::Ternary([false_literal, unwatched]));
                        Ok(true)
                    }

                    (_, None) => {
                        self.propagated(unwatched, Reason::Ternary([false_literal, watched]));
                        Ok(true)
                    }

                    _ => {
                        self.counters.conflicts += 1;
                        Err(err::BCPError::Conflict(ClauseKey::Ternary {
                            literals: [false_literal, watched, unwatched],
                            redundant: learnt,
                        }))
                    }
                }
            }

            Watched::Long { offset } => {
                if self.arena.is_removed(offset).unwrap_or(true) {
                    log::error!(target: targets::PROPAGATION, "Dropped watch of missing clause {offset}");
                    return Ok(false);
                }

                match self.relocate_watch(offset, false_literal) {
                    Ok(WatchUpdate::Witness) => Ok(true),

                    Ok(WatchUpdate::Moved { .. }) => Ok(false),

                    Ok(WatchUpdate::Unit(unit)) => {
                        if let Err(e) = self.arena.bump_propagations(offset) {
                            log::error!(target: targets::PROPAGATION, "Failed to bump propagations of {offset}: {e:?}");
                        }
                        self.propagated(unit, Reason::Long(offset));
                        Ok(true)
                    }

                    Ok(WatchUpdate::Conflict) => {
                        if let Err(e) = self.arena.bump_conflicts(offset) {
                            log::error!(target: targets::PROPAGATION, "Failed to bump conflicts of {offset}: {e:?}");
                        }
                        self.counters.conflicts += 1;
                        Err(err::BCPError::Conflict(ClauseKey::Long(offset)))
                    }

                    Err(_) => Err(err::BCPError::CorruptWatch),
                }
            }
        }
    }

    fn propagated(&mut self, literal: CLiteral, reason: Reason) {
        log::trace!(target: targets::PROPAGATION, "{literal} from {reason:?}");
        self.atom_db.assign(literal, Some(reason));
        self.counters.propagations += 1;
    }
}
