//! Procedures for preprocessing clauses and formulas.
//!
//! - [preprocess_clause] normalises the literals of a single clause before the clause is stored.
//! - [clean] holds collaborators which restructure the stored clauses through an [AttachmentPort](crate::context::AttachmentPort).

pub mod clean;

use crate::structures::{clause::CClause, literal::Literal};

/// The result of preprocessing a clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreprocessingOk {
    /// A tautology.
    Tautology,

    /// Any other clause.
    Clause,
}

/// Removes duplicate literals from a clause, and notes whether the clause is a tautology.
///
/// The literals of the clause are sorted, and so the two literals of an atom are adjacent.
/// On a tautology the clause is left sorted, though may contain duplicates.
pub fn preprocess_clause(clause: &mut CClause) -> PreprocessingOk {
    clause.sort_unstable();
    clause.dedup();

    match clause
        .windows(2)
        .any(|pair| pair[0].atom() == pair[1].atom())
    {
        true => PreprocessingOk::Tautology,
        false => PreprocessingOk::Clause,
    }
}

#[cfg(test)]
mod preprocessing_tests {
    use crate::structures::literal::CLiteral;

    use super::*;

    #[test]
    fn pass() {
        let p = CLiteral::new(1, true);
        let not_q = CLiteral::new(2, false);
        let r = CLiteral::new(3, true);

        let mut clause = vec![r, p, not_q];
        assert_eq!(preprocess_clause(&mut clause), PreprocessingOk::Clause);
        assert_eq!(clause, vec![p, not_q, r]);
    }

    #[test]
    fn duplicate_removal() {
        let p = CLiteral::new(1, true);
        let not_q = CLiteral::new(2, false);
        let r = CLiteral::new(3, true);

        let mut clause = vec![p, not_q, r, r, not_q, p];
        assert_eq!(preprocess_clause(&mut clause), PreprocessingOk::Clause);
        assert_eq!(clause.len(), 3);
    }

    #[test]
    fn tautology() {
        let p = CLiteral::new(1, true);
        let q = CLiteral::new(2, true);

        let mut clause = vec![p, q, -p];
        assert_eq!(preprocess_clause(&mut clause), PreprocessingOk::Tautology);
    }
}
