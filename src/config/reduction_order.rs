/*!
Orders on redundant clauses used when choosing which clauses to remove during a [reduction](crate::procedures::reduce).

Each order ranks the most valuable clauses first, and the clauses ranked last are removed.
Ties are broken by size and then by position in the arena (i.e. insertion order), so each order is total.
*/
use std::str::FromStr;

/// Supported reduction orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReductionOrder {
    /// Ascending glue, so clauses with high glue are removed.
    Glue = 0,

    /// Ascending size, so long clauses are removed.
    Size,

    /// Descending (propagations + conflicts) / size, so clauses which have done little per literal are removed.
    PropConfl,
}

impl std::fmt::Display for ReductionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Glue => write!(f, "Glue"),
            Self::Size => write!(f, "Size"),
            Self::PropConfl => write!(f, "PropConfl"),
        }
    }
}

impl ReductionOrder {
    /// The minimum ReductionOrder type.
    pub const MIN: ReductionOrder = ReductionOrder::Glue;

    /// The maximum ReductionOrder type.
    pub const MAX: ReductionOrder = ReductionOrder::PropConfl;
}

impl FromStr for ReductionOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Glue" => Ok(Self::Glue),

            "Size" => Ok(Self::Size),

            "PropConfl" => Ok(Self::PropConfl),

            _unkown_string => Err(()),
        }
    }
}
