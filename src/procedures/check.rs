/*!
Checks of the invariants relating the databases of a context.

Each check recounts or rescans some structure and compares the result with what the context maintains, returning an [InvariantError] identifying the first violation found.
A violation indicates a bug, and so the `assert_*` methods panic with the diagnostic of a violation.

In debug builds [assert_all](Context::assert_all) is called at the end of each pass over the databases (reduction, consolidation, subsumption, renumbering).

The checks are:
- [check_stats](Context::check_stats): the running counts of literals and of binary and ternary clauses match a recount of the attached clauses.
- [check_no_wrong_attach](Context::check_no_wrong_attach): every long entry in the list of a literal is for a live record whose first two literals include the literal.
- [check_watch_symmetry](Context::check_watch_symmetry): every binary and ternary entry has a partner entry, and every catalogued long clause is watched exactly twice.
- [check_catalog](Context::check_catalog): every catalogued offset is of a live record with a matching learnt flag, and no offset is catalogued twice.
*/

use std::collections::{HashMap, HashSet};

use crate::{
    context::Context,
    db::{arena::ClauseOffset, watches::Watched, ClauseKey},
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::InvariantError,
};

/// A recount of the attached clauses, by redundancy.
#[derive(Default)]
struct Recount {
    literals: [usize; 2],
    binaries: [usize; 2],
    ternaries: [usize; 2],
}

impl Context {
    fn recount(&self) -> Recount {
        let mut recount = Recount::default();

        for (literal, list) in self.watches.iter() {
            for entry in list {
                match *entry {
                    Watched::Binary { other, learnt } if literal < other => {
                        recount.binaries[learnt as usize] += 1;
                        recount.literals[learnt as usize] += 2;
                    }

                    Watched::Ternary { others, learnt } if literal < others[0] => {
                        recount.ternaries[learnt as usize] += 1;
                        recount.literals[learnt as usize] += 3;
                    }

                    Watched::Long { offset } => {
                        if let (Ok(header), Ok(literals)) =
                            (self.arena.header(offset), self.arena.literals(offset))
                        {
                            if literals.first() == Some(&literal) {
                                recount.literals[header.learnt as usize] += header.size;
                            }
                        }
                    }

                    _ => {}
                }
            }
        }

        recount
    }

    /// Checks the running counts of literals, binary clauses, and ternary clauses.
    pub fn check_stats(&self) -> Result<(), InvariantError> {
        self.check_literal_count()?;
        self.check_implicit_stats()
    }

    /// Checks the running counts of literals of attached clauses.
    pub fn check_literal_count(&self) -> Result<(), InvariantError> {
        let recount = self.recount();
        let counts = &self.catalog.counts;

        for (redundant, kept) in [
            (false, counts.irredundant_literals),
            (true, counts.redundant_literals),
        ] {
            let counted = recount.literals[redundant as usize];
            if kept != counted {
                return Err(InvariantError::LiteralCount {
                    redundant,
                    kept,
                    counted,
                });
            }
        }
        Ok(())
    }

    /// Checks the running counts of binary and ternary clauses.
    pub fn check_implicit_stats(&self) -> Result<(), InvariantError> {
        let recount = self.recount();
        let counts = &self.catalog.counts;

        let pairs = [
            (2, false, counts.irredundant_binaries, recount.binaries[0]),
            (2, true, counts.redundant_binaries, recount.binaries[1]),
            (3, false, counts.irredundant_ternaries, recount.ternaries[0]),
            (3, true, counts.redundant_ternaries, recount.ternaries[1]),
        ];

        for (size, redundant, kept, counted) in pairs {
            if kept != counted {
                return Err(InvariantError::ImplicitCount {
                    size,
                    redundant,
                    kept,
                    counted,
                });
            }
        }
        Ok(())
    }

    /// Checks every long entry is for a live record, and is in the list of one of the first two literals of the record.
    pub fn check_no_wrong_attach(&self) -> Result<(), InvariantError> {
        for (literal, list) in self.watches.iter() {
            for entry in list {
                let Watched::Long { offset } = *entry else {
                    continue;
                };

                match (self.arena.is_removed(offset), self.arena.literals(offset)) {
                    (Ok(false), Ok(literals)) => {
                        if !literals.iter().take(2).any(|watched| *watched == literal) {
                            return Err(InvariantError::WrongAttach { offset, literal });
                        }
                    }
                    _ => return Err(InvariantError::DanglingOffset { literal, offset }),
                }
            }
        }
        Ok(())
    }

    /// Checks every binary and ternary entry has a partner entry, and every catalogued long clause is watched exactly twice.
    pub fn check_watch_symmetry(&self) -> Result<(), InvariantError> {
        let count_in = |literal: CLiteral, entry: &Watched| {
            self.watches
                .get(literal)
                .map_or(0, |list| list.iter().filter(|e| *e == entry).count())
        };

        let mut long_counts: HashMap<ClauseOffset, usize> = HashMap::default();

        for (literal, list) in self.watches.iter() {
            for entry in list {
                let (partner_literal, partner, key) = match *entry {
                    Watched::Binary { other, learnt } => (
                        other,
                        Watched::Binary {
                            other: literal,
                            learnt,
                        },
                        ClauseKey::Binary {
                            literals: [literal, other],
                            redundant: learnt,
                        },
                    ),

                    Watched::Ternary {
                        others: [watched, unwatched],
                        learnt,
                    } => (
                        watched,
                        Watched::Ternary {
                            others: [literal, unwatched],
                            learnt,
                        },
                        ClauseKey::Ternary {
                            literals: [literal, watched, unwatched],
                            redundant: learnt,
                        },
                    ),

                    Watched::Long { offset } => {
                        *long_counts.entry(offset).or_default() += 1;
                        continue;
                    }
                };

                if count_in(literal, entry) != count_in(partner_literal, &partner) {
                    return Err(InvariantError::Asymmetric { literal, key });
                }
            }
        }

        for offset in self
            .catalog
            .long_irredundant
            .iter()
            .chain(self.catalog.long_redundant.iter())
        {
            let count = long_counts.get(offset).copied().unwrap_or(0);
            if count != 2 {
                return Err(InvariantError::WatchCount {
                    offset: *offset,
                    count,
                });
            }
        }
        Ok(())
    }

    /// Checks every catalogued offset is of a live record with a matching learnt flag, and no offset is catalogued twice.
    pub fn check_catalog(&self) -> Result<(), InvariantError> {
        let mut seen = HashSet::new();
        for redundant in [false, true] {
            for offset in self.catalog.long(redundant) {
                let fine = seen.insert(*offset)
                    && self
                        .arena
                        .header(*offset)
                        .is_ok_and(|header| !header.removed && header.learnt == redundant);
                if !fine {
                    return Err(InvariantError::Catalog { offset: *offset });
                }
            }
        }

        if seen.len() != self.arena.live_count() {
            if let Some(offset) = self.arena.offsets().find(|offset| !seen.contains(offset)) {
                return Err(InvariantError::Catalog { offset });
            }
        }
        Ok(())
    }

    /// The literals in whose list some entry for the long clause at the offset appears.
    pub fn find_all_attach(&self, offset: ClauseOffset) -> Vec<CLiteral> {
        self.watches
            .iter()
            .filter(|(_, list)| list.contains(&Watched::Long { offset }))
            .map(|(literal, _)| literal)
            .collect()
    }

    /// Whether the clause is attached.
    ///
    /// A unit is attached when the unit is valued true at level zero.
    pub fn clause_is_attached(&self, key: &ClauseKey) -> bool {
        match key {
            ClauseKey::Unit(literal) => self.atom_db.fixed_value(*literal) == Some(true),

            ClauseKey::Binary {
                literals: [a, b],
                redundant,
            } => self.watches.get(*a).is_some_and(|list| {
                list.contains(&Watched::Binary {
                    other: *b,
                    learnt: *redundant,
                })
            }),

            ClauseKey::Ternary {
                literals: [a, b, c],
                redundant,
            } => [(a, b, c), (a, c, b), (b, c, a)]
                .into_iter()
                .any(|(first, second, unwatched)| {
                    self.watches.get(*first).is_some_and(|list| {
                        list.contains(&Watched::Ternary {
                            others: [*second, *unwatched],
                            learnt: *redundant,
                        })
                    }) || self.watches.get(*second).is_some_and(|list| {
                        list.contains(&Watched::Ternary {
                            others: [*first, *unwatched],
                            learnt: *redundant,
                        })
                    })
                }),

            ClauseKey::Long(offset) => self.find_all_attach(*offset).len() == 2,
        }
    }

    /// Runs every check.
    pub fn check_all(&self) -> Result<(), InvariantError> {
        self.atom_db.check_numbering()?;
        self.check_stats()?;
        self.check_no_wrong_attach()?;
        self.check_watch_symmetry()?;
        self.check_catalog()
    }

    /// Runs every check, panicking on a violation.
    pub fn assert_all(&self) {
        if let Err(e) = self.check_all() {
            log::error!(target: targets::CLAUSE_DB, "Invariant violated: {e}");
            panic!("Invariant violated: {e}");
        }
    }

    /// Checks the running counts, panicking on a violation.
    pub fn assert_stats(&self) {
        if let Err(e) = self.check_stats() {
            log::error!(target: targets::CLAUSE_DB, "Invariant violated: {e}");
            panic!("Invariant violated: {e}");
        }
    }
}
