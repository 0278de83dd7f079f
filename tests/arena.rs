mod common;

use clause_core::{
    context::Context,
    db::{arena::ClauseStats, atom::Reason, ClauseKey},
    procedures::add::ClauseOk,
    structures::literal::{CLiteral, Literal},
};
use common::{context_with_atoms, lits};

/// The outer literals of each catalogued long clause of the given redundancy, in catalog order.
fn catalogued(the_context: &Context, redundant: bool) -> Vec<Vec<CLiteral>> {
    the_context
        .catalog()
        .long(redundant)
        .iter()
        .map(|offset| {
            let mut literals = the_context
                .arena()
                .literals(*offset)
                .unwrap()
                .iter()
                .map(|literal| the_context.atom_db().to_outer(*literal))
                .collect::<Vec<_>>();
            literals.sort();
            literals
        })
        .collect()
}

fn sorted(mut literals: Vec<CLiteral>) -> Vec<CLiteral> {
    literals.sort();
    literals
}

mod consolidation {
    use super::*;

    #[test]
    fn content_is_kept() {
        common::init_logger();
        let mut the_context = context_with_atoms(8);

        let mut keys = Vec::default();
        for clause in [
            vec![1, 2, 3, 4],
            vec![-1, 5, 6, 7, 8],
            vec![2, -3, 4, -5],
            vec![-6, -7, -8, 1, 2, 3],
        ] {
            let Ok(ClauseOk::Added(key)) = the_context.add_clause(lits(&clause)) else {
                panic!("Failed to add clause");
            };
            keys.push(key);
        }
        let Ok(ClauseOk::Added(learnt)) =
            the_context.add_learnt_clause(lits(&[3, 4, 5, 6]), ClauseStats::with_glue(3))
        else {
            panic!("Failed to add clause");
        };

        assert!(the_context.remove_clause(&keys[0]).is_ok());
        assert!(the_context.remove_clause(&keys[2]).is_ok());

        let words_before = the_context.arena().word_count();
        assert!(the_context.arena().garbage_words() > 0);

        the_context.consolidate_memory();

        assert_eq!(the_context.arena().garbage_words(), 0);
        assert!(the_context.arena().word_count() < words_before);
        assert_eq!(the_context.arena().live_count(), 3);
        assert_eq!(the_context.counters.consolidations, 1);

        assert_eq!(
            catalogued(&the_context, false),
            vec![
                sorted(lits(&[-1, 5, 6, 7, 8])),
                sorted(lits(&[-6, -7, -8, 1, 2, 3]))
            ]
        );
        assert_eq!(
            catalogued(&the_context, true),
            vec![sorted(lits(&[3, 4, 5, 6]))]
        );
        assert!(the_context.clause_is_attached(&learnt));

        for offset in the_context.catalog().long(false) {
            assert!(the_context.clause_is_attached(&ClauseKey::Long(*offset)));
        }
        assert!(the_context.check_all().is_ok());
    }

    #[test]
    fn reason_offsets_are_rewritten() {
        let mut the_context = context_with_atoms(8);

        let Ok(ClauseOk::Added(removed)) = the_context.add_clause(lits(&[1, 2, 3, 4])) else {
            panic!("Failed to add clause");
        };
        let Ok(ClauseOk::Added(ClauseKey::Long(reason))) =
            the_context.add_learnt_clause(lits(&[-5, -6, -7, 8]), ClauseStats::with_glue(3))
        else {
            panic!("Failed to add clause");
        };
        assert!(the_context.remove_clause(&removed).is_ok());

        for atom in 4..7 {
            the_context.record_decision(CLiteral::new(atom, true));
            assert!(the_context.propagate().is_ok());
        }
        assert_eq!(the_context.atom_db().reason_of(7), Some(Reason::Long(reason)));

        the_context.consolidate_memory();

        let moved = the_context.catalog().long(true)[0];
        assert_ne!(moved, reason);
        assert_eq!(the_context.atom_db().reason_of(7), Some(Reason::Long(moved)));
        assert_eq!(the_context.atom_db().locked_offsets(), vec![moved]);
        assert!(the_context.arena().header(reason).is_err());
        assert!(the_context
            .arena()
            .literals(moved)
            .unwrap()
            .contains(&CLiteral::new(7, true)));

        // The moved clause is still locked.
        let stats = the_context.reduce_db_now();
        assert_eq!(stats.locked, 1);
        assert_eq!(stats.removed, 0);

        the_context.backjump(0);
        assert!(the_context.atom_db().locked_offsets().is_empty());
        assert!(the_context.check_all().is_ok());
    }

    #[test]
    fn empty_arena() {
        let mut the_context = context_with_atoms(2);
        the_context.consolidate_memory();
        assert_eq!(the_context.arena().word_count(), 0);
        assert!(the_context.check_all().is_ok());
    }
}

mod records {
    use super::*;

    #[test]
    fn usage_is_recorded() {
        let mut the_context = context_with_atoms(4);
        let Ok(ClauseOk::Added(ClauseKey::Long(offset))) =
            the_context.add_learnt_clause(lits(&[-1, -2, -3, 4]), ClauseStats::with_glue(2))
        else {
            panic!("Failed to add clause");
        };

        for atom in 0..3 {
            the_context.record_decision(CLiteral::new(atom, true));
            assert!(the_context.propagate().is_ok());
        }

        let header = the_context.arena().header(offset).unwrap();
        assert_eq!(header.stats.propagations, 1);
        assert_eq!(header.stats.glue, 2);
        assert!(header.learnt);
        assert!(!header.removed);
        assert_eq!(header.size, 4);
        assert_eq!(the_context.counters.propagations, 1);
        assert_eq!(the_context.counters.decisions, 3);
    }

    #[test]
    fn conflict_is_recorded() {
        let mut the_context = context_with_atoms(4);
        let Ok(ClauseOk::Added(ClauseKey::Long(offset))) =
            the_context.add_learnt_clause(lits(&[-1, -2, -3, -4]), ClauseStats::with_glue(2))
        else {
            panic!("Failed to add clause");
        };

        the_context.record_decision(CLiteral::new(0, true));
        the_context.record_decision(CLiteral::new(1, true));
        the_context.record_decision(CLiteral::new(2, true));
        the_context.record_decision(CLiteral::new(3, true));
        assert!(the_context.propagate().is_err());

        let header = the_context.arena().header(offset).unwrap();
        assert_eq!(header.stats.conflicts, 1);
    }
}
