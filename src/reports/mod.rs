/*!
Reports on the clauses of a context.

- [dimacs] dumps clauses in DIMACS form.
- [UsageSummary] summarises the recorded usage of the redundant long clauses.
- [size_distribution](crate::context::Context::size_distribution) counts attached clauses by size.
*/

use std::collections::BTreeMap;

use crate::{config::LBD, context::Context};

pub mod dimacs;

/// A summary of the recorded usage of the redundant long clauses of a context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UsageSummary {
    /// A count of redundant long clauses.
    pub clauses: usize,

    /// A count of redundant long clauses with some recorded propagation or conflict.
    pub used: usize,

    /// The sum of recorded propagations.
    pub propagations: u64,

    /// The sum of recorded conflicts.
    pub conflicts: u64,

    /// The least glue, if there are any clauses.
    pub min_glue: Option<LBD>,

    /// The greatest glue, if there are any clauses.
    pub max_glue: Option<LBD>,
}

impl std::fmt::Display for UsageSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} redundant clauses, {} used, {} propagations, {} conflicts",
            self.clauses, self.used, self.propagations, self.conflicts
        )
    }
}

impl Context {
    /// A summary of the recorded usage of the redundant long clauses.
    pub fn usage_summary(&self) -> UsageSummary {
        let mut summary = UsageSummary::default();

        for offset in &self.catalog.long_redundant {
            let Ok(header) = self.arena.header(*offset) else {
                continue;
            };
            let stats = header.stats;

            summary.clauses += 1;
            if stats.propagations > 0 || stats.conflicts > 0 {
                summary.used += 1;
            }
            summary.propagations += stats.propagations as u64;
            summary.conflicts += stats.conflicts as u64;
            summary.min_glue = Some(summary.min_glue.map_or(stats.glue, |glue| glue.min(stats.glue)));
            summary.max_glue = Some(summary.max_glue.map_or(stats.glue, |glue| glue.max(stats.glue)));
        }

        summary
    }

    /// A count of the stored clauses of each size, including units.
    pub fn size_distribution(&self) -> BTreeMap<usize, usize> {
        let mut distribution = BTreeMap::default();

        if !self.catalog.units.is_empty() {
            distribution.insert(1, self.catalog.units.len());
        }

        let counts = &self.catalog.counts;
        if counts.binaries() > 0 {
            distribution.insert(2, counts.binaries());
        }
        if counts.ternaries() > 0 {
            distribution.insert(3, counts.ternaries());
        }

        for offset in self
            .catalog
            .long_irredundant
            .iter()
            .chain(self.catalog.long_redundant.iter())
        {
            if let Ok(size) = self.arena.size(*offset) {
                *distribution.entry(size).or_insert(0) += 1;
            }
        }

        distribution
    }
}
