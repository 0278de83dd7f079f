use std::cmp::Ordering;

use crate::{db::arena::ClauseOffset, structures::literal::CLiteral};

/// An entry in the watch list of some literal *l*, for a clause containing *l*.
///
/// Binary and ternary clauses are stored entirely within their entries, while an entry for a long clause is an offset into the [arena](crate::db::arena::ClauseArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Watched {
    /// The binary clause *l* ∨ `other`.
    Binary { other: CLiteral, learnt: bool },

    /// The ternary clause *l* ∨ `others[0]` ∨ `others[1]`, where `others[0]` is the other watched literal and `others[1]` is unwatched.
    Ternary {
        others: [CLiteral; 2],
        learnt: bool,
    },

    /// The long clause at `offset`, with *l* as one of the first two literals of the clause.
    Long { offset: ClauseOffset },
}

impl Watched {
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary { .. })
    }

    pub fn is_ternary(&self) -> bool {
        matches!(self, Self::Ternary { .. })
    }

    pub fn is_long(&self) -> bool {
        matches!(self, Self::Long { .. })
    }

    /// Whether the entry is for a binary or ternary clause.
    pub fn is_implicit(&self) -> bool {
        !self.is_long()
    }

    /// The learnt flag of an implicit entry.
    ///
    /// The learnt flag of a long clause is stored in the arena, and so this is `None` for a long entry.
    pub fn learnt(&self) -> Option<bool> {
        match self {
            Self::Binary { learnt, .. } | Self::Ternary { learnt, .. } => Some(*learnt),
            Self::Long { .. } => None,
        }
    }

    /// The other literals of an implicit entry in ascending order, with the second absent for a binary entry.
    fn sorted_others(&self) -> Option<(CLiteral, Option<CLiteral>)> {
        match self {
            Self::Binary { other, .. } => Some((*other, None)),
            Self::Ternary { others: [a, b], .. } => Some((*a.min(b), Some(*a.max(b)))),
            Self::Long { .. } => None,
        }
    }

    /// Whether two implicit entries are for the same clause, ignoring the learnt flag.
    pub fn same_implicit_clause(&self, other: &Watched) -> bool {
        self.is_implicit() && self.sorted_others() == other.sorted_others()
    }

    /// A total order on entries, used to sort watch lists so that duplicate and subsumed implicit clauses are adjacent.
    ///
    /// - Long entries follow every implicit entry, and are ordered by offset.
    /// - Implicit entries are ordered by the least other literal.
    /// - Then, binary entries precede ternary entries.
    /// - Then, ternary entries are ordered by the greater other literal.
    /// - Then, irredundant entries precede redundant entries.
    ///
    /// So, of a run of entries for the same clause the first is irredundant, if any are.
    pub fn implicit_order(&self, other: &Watched) -> Ordering {
        match (self, other) {
            (Self::Long { offset: a }, Self::Long { offset: b }) => a.cmp(b),
            (Self::Long { .. }, _) => Ordering::Greater,
            (_, Self::Long { .. }) => Ordering::Less,
            _ => {
                let key = |watch: &Watched| match watch.sorted_others() {
                    Some((first, second)) => {
                        (Some(first), watch.is_ternary(), second, watch.learnt())
                    }
                    None => (None, false, None, None),
                };
                key(self).cmp(&key(other))
            }
        }
    }
}

