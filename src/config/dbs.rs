//! Configuration of databases, typically derived from the configuration of a context.

use super::{ConfigOption, ReductionOrder, LBD};

/// Configuration for the clause database.
#[derive(Clone, Debug)]
pub struct ClauseDBConfig {
    /// The order used to rank redundant clauses during a reduction.
    pub reduction_order: ConfigOption<ReductionOrder>,

    /// The fraction of candidate clauses removed by a reduction.
    pub removal_ratio: ConfigOption<f64>,

    /// Redundant clauses with glue strictly below the bound are never removed by a reduction.
    pub protect_glue_below: ConfigOption<LBD>,

    /// The count of redundant long clauses which, when exceeded, triggers the first reduction.
    pub clean_limit_start: ConfigOption<usize>,

    /// The factor by which the increase of the limit grows after each reduction.
    pub clean_limit_increase: ConfigOption<f64>,
}

impl Default for ClauseDBConfig {
    fn default() -> Self {
        ClauseDBConfig {
            reduction_order: ConfigOption {
                name: "reduction_order",
                min: ReductionOrder::MIN,
                max: ReductionOrder::MAX,
                value: ReductionOrder::Glue,
            },

            removal_ratio: ConfigOption {
                name: "removal_ratio",
                min: 0.0,
                max: 1.0,
                value: 0.5,
            },

            protect_glue_below: ConfigOption {
                name: "protect_glue_below",
                min: LBD::MIN,
                max: LBD::MAX,
                value: 0,
            },

            clean_limit_start: ConfigOption {
                name: "clean_limit_start",
                min: 1,
                max: usize::MAX,
                value: 2000,
            },

            clean_limit_increase: ConfigOption {
                name: "clean_limit_increase",
                min: 1.0,
                max: 16.0,
                value: 1.1,
            },
        }
    }
}
