/*!
Addition of clauses to a context.

# Overview

A clause is added by:
1. Translating the literals of the clause to the inner numbering of atoms (for clauses given by external callers).
2. Removing duplicate literals, and noting a tautology (a clause containing some literal and its negation) as a no-op.
3. Simplifying the clause with respect to the valuation at decision level zero:
   - If some literal is true at level zero, the clause is satisfied and is not stored.
   - Each literal false at level zero is dropped.
4. Storing the clause, depending on size:
   - An empty clause marks the context unsatisfiable.
   - A unit clause is an assignment at level zero, noted in the unit catalog.
   - Binary and ternary clauses are stored within the [watch array](crate::db::watches).
   - Long clauses are stored in the [arena](crate::db::arena), and the offset is catalogued.
5. Attaching the clause, by watching its first two literals.

Before storing a clause, the literals are ordered so the first two literals are the best available candidates to watch.
Here, a true literal is preferred to an unassigned literal, which is preferred to a false literal, and of false literals the literal valued at the highest decision level is preferred.
This delays the clause becoming unit for as long as possible, and a learnt clause is watched by its asserting literal and the false literal of the highest level.

# Example

```rust
# use clause_core::context::Context;
# use clause_core::procedures::add::ClauseOk;
# use clause_core::types::err::{self};
let mut the_context = Context::default();
let [p, q] = *the_context.fresh_or_max_literals(2).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert_eq!(the_context.add_clause(vec![p, -p, q]), Ok(ClauseOk::Tautology));
assert!(the_context.add_clause(vec![p, p]).is_ok());
assert_eq!(the_context.add_clause(vec![p, q]), Ok(ClauseOk::Satisfied));
assert_eq!(
    the_context.add_clause(-p),
    Err(err::ErrorKind::Build(err::BuildError::Unsatisfiable))
);
```
*/

use std::cmp::Reverse;

use crate::{
    context::{Context, ContextState},
    db::{arena::ClauseStats, ClauseKey, LevelIndex},
    misc::log::targets::{self},
    preprocessing::{preprocess_clause, PreprocessingOk},
    structures::{
        clause::{CClause, Clause},
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// Ok results of adding a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added, with the given key.
    Added(ClauseKey),

    /// The clause was a tautology, and so was not added.
    Tautology,

    /// The clause was satisfied at decision level zero, and so was not added.
    Satisfied,
}

impl Context {
    /// Adds an irredundant clause, given in outer literals.
    pub fn add_clause(&mut self, clause: impl Clause) -> Result<ClauseOk, err::ErrorKind> {
        let literals = self.internalise(clause)?;
        self.add_clause_int(literals, false, ClauseStats::default(), true)
    }

    /// Adds a redundant clause with the given statistics, given in outer literals.
    pub fn add_learnt_clause(
        &mut self,
        clause: impl Clause,
        stats: ClauseStats,
    ) -> Result<ClauseOk, err::ErrorKind> {
        let literals = self.internalise(clause)?;
        self.add_clause_int(literals, true, stats, true)
    }

    /// The inner literals of a clause given in outer literals.
    fn internalise(&self, clause: impl Clause) -> Result<CClause, err::ClauseDBError> {
        clause
            .literals()
            .map(|literal| {
                self.atom_db
                    .to_inner(literal)
                    .ok_or(err::ClauseDBError::UnknownAtom)
            })
            .collect()
    }

    /// Adds a clause given in inner literals.
    ///
    /// If `attach` is false a stored binary, ternary, or long clause is left detached, and must be [attached](Context::attach_clause) before the next propagation.
    pub fn add_clause_int(
        &mut self,
        mut literals: CClause,
        redundant: bool,
        stats: ClauseStats,
        attach: bool,
    ) -> Result<ClauseOk, err::ErrorKind> {
        if self.state == ContextState::Unsatisfiable {
            return Err(err::BuildError::Unsatisfiable.into());
        }

        if literals.is_empty() {
            return Err(err::ClauseDBError::EmptyClause.into());
        }

        let atom_count = self.atom_db.count();
        if literals
            .iter()
            .any(|literal| literal.atom() as usize >= atom_count)
        {
            return Err(err::ClauseDBError::UnknownAtom.into());
        }

        if preprocess_clause(&mut literals) == PreprocessingOk::Tautology {
            log::trace!(target: targets::CLAUSE_DB, "Tautology {}", literals.as_dimacs(false));
            return Ok(ClauseOk::Tautology);
        }

        let mut index = 0;
        while index < literals.len() {
            match self.atom_db.fixed_value(literals[index]) {
                Some(true) => return Ok(ClauseOk::Satisfied),
                Some(false) => {
                    literals.swap_remove(index);
                }
                None => index += 1,
            }
        }

        match literals.len() {
            0 => {
                log::info!(target: targets::CLAUSE_DB, "Empty clause, the database is unsatisfiable");
                self.state = ContextState::Unsatisfiable;
                Err(err::BuildError::Unsatisfiable.into())
            }

            1 => {
                if self.atom_db.decision_level() != 0 {
                    return Err(err::ClauseDBError::DecisionMade.into());
                }
                let literal = literals[0];
                self.atom_db.assign(literal, None);
                self.catalog.units.push(literal);
                log::trace!(target: targets::CLAUSE_DB, "Unit {literal}");
                Ok(ClauseOk::Added(ClauseKey::Unit(literal)))
            }

            size => {
                self.order_for_watching(&mut literals);

                let key = match size {
                    2 => {
                        self.counters.new_binaries_since_scc += 1;
                        ClauseKey::Binary {
                            literals: [literals[0], literals[1]],
                            redundant,
                        }
                    }

                    3 => ClauseKey::Ternary {
                        literals: [literals[0], literals[1], literals[2]],
                        redundant,
                    },

                    _ => {
                        let offset = self.arena.allocate(&literals, redundant, stats)?;
                        self.catalog.long_mut(redundant).push(offset);
                        ClauseKey::Long(offset)
                    }
                };

                if attach {
                    self.attach_clause(&key)?;
                }

                log::trace!(target: targets::CLAUSE_DB, "Added {key}: {}", literals.as_dimacs(false));
                Ok(ClauseOk::Added(key))
            }
        }
    }

    /// Moves the two best candidates for watching to the front of the clause.
    fn order_for_watching(&self, literals: &mut [CLiteral]) {
        let preference = |literal: &CLiteral| -> (u8, Reverse<LevelIndex>) {
            match self.atom_db.literal_value(*literal) {
                Some(true) => (0, Reverse(0)),
                None => (1, Reverse(0)),
                Some(false) => (2, Reverse(self.atom_db.level_of(literal.atom()).unwrap_or(0))),
            }
        };

        for position in 0..2.min(literals.len()) {
            let best = literals[position..]
                .iter()
                .enumerate()
                .min_by_key(|(_, literal)| preference(*literal))
                .map(|(index, _)| position + index);
            if let Some(best) = best {
                literals.swap(position, best);
            }
        }
    }
}
