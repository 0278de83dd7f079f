/*!
Reduction of the redundant long clauses of a context.

# Overview

Redundant clauses may be removed without changing the satisfiable assignments of a formula, and a reduction removes redundant long clauses which appear to be of little use.

A reduction:
1. Partitions the redundant long clauses into *locked* clauses, *protected* clauses, and *candidates*.
   - A clause is locked when the clause is the reason for the value of some atom on the trail.
   - A clause is protected when its glue is strictly below the configured bound.
2. Ranks the candidates by the configured [ReductionOrder], best first.
3. Removes the lowest ranked candidates, detaching each before the record is removed from the arena.

Locked and protected clauses are never removed.

The count of removed candidates is the greater of the configured fraction of candidates (rounded up) and the count needed to bring the redundant clauses back to the clean limit, though never more than the count of candidates.

A reduction is permitted only when the count of redundant long clauses exceeds the clean limit of the context, and after each reduction the limit grows by an increment which itself grows geometrically.
So, a reduction immediately after a reduction removes nothing.

```rust
# use clause_core::context::Context;
# use clause_core::config::Config;
# use clause_core::db::arena::ClauseStats;
let mut config = Config::default();
config.clause_db.clean_limit_start.set(2).unwrap();
let mut the_context = Context::from_config(config);

let literals = the_context.fresh_or_max_literals(8);
for (glue, window) in literals.windows(4).enumerate() {
    let stats = ClauseStats::with_glue(glue as u8 + 2);
    assert!(the_context.add_learnt_clause(window.to_vec(), stats).is_ok());
}

let stats = the_context.reduce_db().expect("Limit exceeded");
assert_eq!(stats.removed, 3);
assert!(the_context.reduce_db().is_none());
```

A [full reduction](Context::full_reduce) forces a reduction, compacts the arena, resets the usage counters of every surviving redundant clause, and subsumes implicit clauses (if configured).
*/

use std::{cmp::Ordering, collections::HashSet};

use crate::{
    config::ReductionOrder,
    context::Context,
    db::arena::{ClauseHeader, ClauseOffset},
    misc::log::targets::{self},
    procedures::subsume::SubsumeStats,
    types::err::{self},
};

/// Statistics of a reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleaningStats {
    /// A count of redundant long clauses considered for removal.
    pub candidates: usize,

    /// A count of locked clauses.
    pub locked: usize,

    /// A count of clauses protected by their glue.
    pub protected: usize,

    /// A count of clauses removed.
    pub removed: usize,

    /// A count of the literals of removed clauses.
    pub removed_literals: usize,
}

/// Statistics of a full reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullReduceStats {
    pub cleaning: CleaningStats,

    /// A count of clauses whose usage was reset.
    pub reset: usize,

    /// Statistics of subsumption, if performed.
    pub subsumption: Option<SubsumeStats>,
}

/// The ordering of two candidates, best first.
fn compare(order: ReductionOrder, a: &(ClauseOffset, ClauseHeader), b: &(ClauseOffset, ClauseHeader)) -> Ordering {
    let (a_offset, a) = a;
    let (b_offset, b) = b;

    let primary = match order {
        ReductionOrder::Glue => a.stats.glue.cmp(&b.stats.glue),

        ReductionOrder::Size => Ordering::Equal,

        ReductionOrder::PropConfl => {
            let usage = |header: &ClauseHeader| {
                header.stats.propagations as u64 + header.stats.conflicts as u64
            };
            // Descending usage per literal, compared without division.
            let a_score = usage(a) * b.size as u64;
            let b_score = usage(b) * a.size as u64;
            b_score.cmp(&a_score)
        }
    };

    primary
        .then(a.size.cmp(&b.size))
        .then(a_offset.cmp(b_offset))
}

impl Context {
    /// Reduces the redundant long clauses, if the count of redundant long clauses exceeds the clean limit.
    pub fn reduce_db(&mut self) -> Option<CleaningStats> {
        if self.catalog.long_redundant.len() <= self.next_clean_limit {
            return None;
        }
        Some(self.reduce_db_now())
    }

    /// Reduces the redundant long clauses, regardless of the clean limit.
    ///
    /// The clean limit advances after the reduction.
    pub fn reduce_db_now(&mut self) -> CleaningStats {
        let mut stats = CleaningStats::default();

        let locked: HashSet<ClauseOffset> = self.atom_db.locked_offsets().into_iter().collect();
        let protect_below = self.config.clause_db.protect_glue_below.value;

        let mut candidates = Vec::with_capacity(self.catalog.long_redundant.len());
        for offset in &self.catalog.long_redundant {
            let header = match self.arena.header(*offset) {
                Ok(header) => header,
                Err(_) => {
                    log::error!(target: targets::REDUCTION, "Catalogued clause {offset} is missing");
                    continue;
                }
            };

            if locked.contains(offset) {
                stats.locked += 1;
            } else if header.stats.glue < protect_below {
                stats.protected += 1;
            } else {
                candidates.push((*offset, header));
            }
        }
        stats.candidates = candidates.len();

        let order = self.config.clause_db.reduction_order.value;
        candidates.sort_unstable_by(|a, b| compare(order, a, b));

        let by_ratio = (self.config.clause_db.removal_ratio.value * candidates.len() as f64).ceil() as usize;
        let by_limit = self
            .catalog
            .long_redundant
            .len()
            .saturating_sub(self.next_clean_limit);
        let to_remove = by_ratio.max(by_limit).min(candidates.len());

        let mut removed = HashSet::with_capacity(to_remove);
        for (offset, header) in candidates.iter().rev().take(to_remove) {
            if let Err(e) = self.detach_long(*offset) {
                log::error!(target: targets::REDUCTION, "Failed to detach {offset}: {e:?}");
                continue;
            }
            if let Err(e) = self.arena.remove(*offset) {
                log::error!(target: targets::REDUCTION, "Failed to remove {offset}: {e:?}");
                continue;
            }
            log::trace!(target: targets::REDUCTION, "Removed {offset}, glue {}", header.stats.glue);
            removed.insert(*offset);
            stats.removed_literals += header.size;
        }
        stats.removed = removed.len();

        self.catalog
            .long_redundant
            .retain(|offset| !removed.contains(offset));

        self.next_clean_limit += self.next_clean_increment;
        self.next_clean_increment = (self.next_clean_increment as f64
            * self.config.clause_db.clean_limit_increase.value)
            .ceil() as usize;

        self.counters.reductions += 1;
        self.counters.reduced_clauses += stats.removed;

        log::info!(target: targets::REDUCTION, "Reduction removed {} of {} candidates ({} locked, {} protected), next limit {}", stats.removed, stats.candidates, stats.locked, stats.protected, self.next_clean_limit);

        #[cfg(debug_assertions)]
        self.assert_all();

        stats
    }

    /// Forces a reduction, compacts the arena, resets the usage of every surviving redundant clause, and subsumes implicit clauses (if configured).
    pub fn full_reduce(&mut self) -> Result<FullReduceStats, err::ClauseDBError> {
        let cleaning = self.reduce_db_now();
        self.consolidate_memory();

        let mut reset = 0;
        for offset in &self.catalog.long_redundant {
            self.arena.reset_usage(*offset)?;
            reset += 1;
        }

        let subsumption = match self.config.subsume_implicit.value {
            true => Some(self.subsume_and_strengthen_implicit()?),
            false => None,
        };

        self.counters.full_reductions += 1;

        Ok(FullReduceStats {
            cleaning,
            reset,
            subsumption,
        })
    }
}

#[cfg(test)]
mod reduce_tests {
    use super::*;
    use crate::db::arena::ClauseStats;

    fn header(size: usize, glue: u8, propagations: u32, conflicts: u32) -> ClauseHeader {
        ClauseHeader {
            size,
            learnt: true,
            removed: false,
            stats: ClauseStats {
                glue,
                propagations,
                conflicts,
            },
        }
    }

    #[test]
    fn prop_confl_per_literal() {
        let busy = (ClauseOffset::default(), header(10, 2, 20, 0));
        let idle = (ClauseOffset::default(), header(4, 2, 4, 0));

        assert_eq!(compare(ReductionOrder::PropConfl, &busy, &idle), Ordering::Less);
        assert_eq!(compare(ReductionOrder::Glue, &busy, &idle), Ordering::Greater);
        assert_eq!(compare(ReductionOrder::Size, &idle, &busy), Ordering::Less);
    }
}
