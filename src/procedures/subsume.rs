/*!
Subsumption and strengthening of implicit (binary and ternary) clauses, within the watch array.

# Overview

Each watch list is sorted by [implicit_order](Watched::implicit_order), which places entries for the same clause next to each other, with an irredundant entry first if there is one.
Then, the list of each literal *l* is swept twice.

The first sweep is over binary entries:
- Of each run of binary entries for the same clause, the first is kept and the others are removed, together with their partner entries.

The kept binary entries are the *partners* of *l*.

The second sweep is over ternary entries, for a clause *l* ∨ *x* ∨ *y*:
- If the entry is for the same clause as the previous kept ternary entry, the entry is removed as a duplicate.
- If *x* or *y* is a partner, the clause is subsumed by the binary clause, and is removed.
- If ¬*x* is a partner, the clause is strengthened to *l* ∨ *y*, as (*l* ∨ *x* ∨ *y*) ∧ (*l* ∨ ¬*x*) is equivalent to (*l* ∨ *y*) ∧ (*l* ∨ ¬*x*), and likewise for ¬*y*.

A ternary clause is subsumed or strengthened by a binary clause only when the binary clause is irredundant or the ternary clause is redundant, as otherwise the irredundant clauses would not entail the result.

Only ternary clauses watched by *l* are examined from the list of *l*.
A ternary clause is examined from the lists of both its watched literals, and so is affected by binary clauses containing either watched literal.

```rust
# use clause_core::context::Context;
# use clause_core::db::arena::ClauseStats;
let mut the_context = Context::default();
let [p, q, r] = *the_context.fresh_or_max_literals(3).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert!(the_context.add_clause(vec![p, q]).is_ok());
assert!(the_context.add_learnt_clause(vec![p, q], ClauseStats::default()).is_ok());
assert!(the_context.add_clause(vec![p, -q, r]).is_ok());

let stats = the_context.subsume_and_strengthen_implicit().unwrap();
assert_eq!(stats.duplicate_binaries, 1);
assert_eq!(stats.strengthened_ternaries, 1);

assert_eq!(the_context.catalog().counts.irredundant_binaries, 2);
assert_eq!(the_context.catalog().counts.ternaries(), 0);
```
*/

use std::collections::HashMap;

use crate::{
    context::Context,
    db::watches::Watched,
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::{self},
};

/// Statistics of a pass of subsumption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubsumeStats {
    /// A count of binary clauses removed as duplicates.
    pub duplicate_binaries: usize,

    /// A count of ternary clauses removed as duplicates.
    pub duplicate_ternaries: usize,

    /// A count of ternary clauses removed as subsumed by a binary clause.
    pub subsumed_ternaries: usize,

    /// A count of ternary clauses strengthened to a binary clause.
    pub strengthened_ternaries: usize,
}

impl Context {
    /// Removes duplicate implicit clauses, and ternary clauses subsumed by a binary clause, and strengthens ternary clauses to binary clauses where possible.
    pub fn subsume_and_strengthen_implicit(&mut self) -> Result<SubsumeStats, err::ClauseDBError> {
        let mut stats = SubsumeStats::default();

        for code in 0..self.watches.len() {
            let literal = CLiteral::from_code(code);
            let mut list = self.watches.take(literal);
            list.sort_unstable_by(|a, b| a.implicit_order(b));

            let swept = self.sweep_list(literal, list, &mut stats);
            match swept {
                Ok(kept) => self.watches.restore(literal, kept),
                Err((kept, e)) => {
                    self.watches.restore(literal, kept);
                    return Err(e);
                }
            }
        }

        self.counters.subsumed_binaries += stats.duplicate_binaries;
        self.counters.subsumed_ternaries += stats.duplicate_ternaries + stats.subsumed_ternaries;
        self.counters.strengthened_ternaries += stats.strengthened_ternaries;

        log::info!(target: targets::SUBSUMPTION, "Subsumption: {stats:?}");

        #[cfg(debug_assertions)]
        self.assert_all();

        Ok(stats)
    }

    /// Sweeps the sorted list of the literal, returning the kept entries.
    ///
    /// On an error the entries kept so far are returned together with the unexamined entries, so the list may be restored.
    #[allow(clippy::type_complexity)]
    fn sweep_list(
        &mut self,
        literal: CLiteral,
        list: Vec<Watched>,
        stats: &mut SubsumeStats,
    ) -> Result<Vec<Watched>, (Vec<Watched>, err::ClauseDBError)> {
        let mut kept = Vec::with_capacity(list.len());
        let mut partners: HashMap<CLiteral, bool> = HashMap::default();

        let (binaries, others): (Vec<Watched>, Vec<Watched>) =
            list.into_iter().partition(|entry| entry.is_binary());

        let mut binaries = binaries.into_iter();
        while let Some(entry) = binaries.next() {
            let Watched::Binary { other, learnt } = entry else {
                continue;
            };

            if partners.contains_key(&other) {
                let partner = Watched::Binary {
                    other: literal,
                    learnt,
                };
                if let Err(e) = self.watches.remove(other, &partner) {
                    kept.push(entry);
                    kept.extend(binaries);
                    kept.extend(others);
                    return Err((kept, e));
                }
                self.catalog.counts.detach(2, learnt);
                stats.duplicate_binaries += 1;
                log::trace!(target: targets::SUBSUMPTION, "Duplicate binary {literal} {other}");
            } else {
                partners.insert(other, learnt);
                kept.push(entry);
            }
        }

        let mut previous: Option<Watched> = None;
        let mut others = others.into_iter();

        while let Some(entry) = others.next() {
            let Watched::Ternary {
                others: [watched, unwatched],
                learnt,
            } = entry
            else {
                kept.push(entry);
                continue;
            };

            let duplicate = previous.is_some_and(|p| p.same_implicit_clause(&entry));

            // A binary clause over the literal may act on a ternary clause when irredundant, or when the ternary clause is redundant.
            let acts = |other: CLiteral| partners.get(&other).is_some_and(|partner_learnt| !partner_learnt || learnt);

            let subsumed = !duplicate && (acts(watched) || acts(unwatched));

            let remaining = match (duplicate || subsumed, acts(-watched), acts(-unwatched)) {
                (false, true, _) => Some(unwatched),
                (false, false, true) => Some(watched),
                _ => None,
            }
            .filter(|remaining| !partners.contains_key(remaining));

            if !duplicate && !subsumed && remaining.is_none() {
                previous = Some(entry);
                kept.push(entry);
                continue;
            }

            let partner = Watched::Ternary {
                others: [literal, unwatched],
                learnt,
            };
            if let Err(e) = self.watches.remove(watched, &partner) {
                kept.push(entry);
                kept.extend(others);
                return Err((kept, e));
            }
            self.catalog.counts.detach(3, learnt);

            if duplicate {
                stats.duplicate_ternaries += 1;
                log::trace!(target: targets::SUBSUMPTION, "Duplicate ternary {literal} {watched} {unwatched}");
            } else if subsumed {
                stats.subsumed_ternaries += 1;
                log::trace!(target: targets::SUBSUMPTION, "Subsumed ternary {literal} {watched} {unwatched}");
            } else if let Some(remaining) = remaining {
                kept.push(Watched::Binary {
                    other: remaining,
                    learnt,
                });
                self.watches.push(
                    remaining,
                    Watched::Binary {
                        other: literal,
                        learnt,
                    },
                );
                self.catalog.counts.attach(2, learnt);
                partners.insert(remaining, learnt);
                self.counters.new_binaries_since_scc += 1;
                stats.strengthened_ternaries += 1;
                log::trace!(target: targets::SUBSUMPTION, "Strengthened ternary {literal} {watched} {unwatched} to {literal} {remaining}");
            }
        }

        Ok(kept)
    }
}
