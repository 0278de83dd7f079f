mod common;

use clause_core::{
    config::{Config, ReductionOrder, LBD},
    context::Context,
    db::{
        arena::{ClauseOffset, ClauseStats},
        atom::Reason,
        ClauseKey,
    },
    procedures::add::ClauseOk,
    structures::literal::{CLiteral, Literal},
};
use common::lits;

fn context_from(config: Config, atoms: usize) -> Context {
    let mut the_context = Context::from_config(config);
    for _ in 0..atoms {
        assert!(the_context.fresh_atom().is_ok());
    }
    the_context
}

fn add_learnt(the_context: &mut Context, clause: &[i32], stats: ClauseStats) -> ClauseOffset {
    match the_context.add_learnt_clause(lits(clause), stats) {
        Ok(ClauseOk::Added(ClauseKey::Long(offset))) => offset,
        otherwise => panic!("Failed to add long clause: {otherwise:?}"),
    }
}

fn surviving_glues(the_context: &Context) -> Vec<LBD> {
    let mut glues = the_context
        .catalog()
        .long(true)
        .iter()
        .map(|offset| the_context.arena().header(*offset).unwrap().stats.glue)
        .collect::<Vec<_>>();
    glues.sort();
    glues
}

mod limits {
    use super::*;

    #[test]
    fn locked_clauses_survive() {
        common::init_logger();
        let mut config = Config::default();
        assert!(config.clause_db.clean_limit_start.set(1).is_ok());
        assert!(config.clause_db.removal_ratio.set(1.0).is_ok());
        let mut the_context = context_from(config, 8);

        let reason = add_learnt(&mut the_context, &[-1, -2, -3, 4], ClauseStats::with_glue(9));
        add_learnt(&mut the_context, &[5, 6, 7, 8], ClauseStats::with_glue(3));
        add_learnt(&mut the_context, &[-5, 6, 7, 8], ClauseStats::with_glue(4));

        for atom in 0..3 {
            the_context.record_decision(CLiteral::new(atom, true));
            assert!(the_context.propagate().is_ok());
        }
        assert_eq!(
            the_context.atom_db().reason_of(3),
            Some(Reason::Long(reason))
        );

        let stats = the_context.reduce_db().expect("Limit exceeded");
        assert_eq!(stats.locked, 1);
        assert_eq!(stats.candidates, 2);
        assert_eq!(stats.removed, 2);

        assert_eq!(the_context.catalog().long(true), &[reason]);
        assert_eq!(the_context.arena().is_removed(reason), Ok(false));
        assert!(the_context.clause_is_attached(&ClauseKey::Long(reason)));
        assert!(the_context.check_all().is_ok());
    }

    #[test]
    fn limit_advances() {
        let mut config = Config::default();
        assert!(config.clause_db.clean_limit_start.set(2).is_ok());
        assert!(config.clause_db.clean_limit_increase.set(2.0).is_ok());
        let mut the_context = context_from(config, 8);

        for glue in 2..6 {
            let clause = [1, 2, 3, glue as i32 + 3];
            add_learnt(&mut the_context, &clause, ClauseStats::with_glue(glue));
        }

        assert_eq!(the_context.next_clean_limit(), 2);
        let stats = the_context.reduce_db().expect("Limit exceeded");
        assert_eq!(stats.removed, 2);
        assert_eq!(surviving_glues(&the_context), vec![2, 3]);

        // The limit grows by the start, and the increment doubles.
        assert_eq!(the_context.next_clean_limit(), 4);
        assert!(the_context.reduce_db().is_none());

        let forced = the_context.reduce_db_now();
        assert_eq!(forced.removed, 1);
        assert_eq!(the_context.next_clean_limit(), 8);
        assert_eq!(the_context.counters.reductions, 2);
        assert_eq!(the_context.counters.reduced_clauses, 3);
    }

    #[test]
    fn below_limit_removes_nothing() {
        let mut the_context = context_from(Config::default(), 4);
        add_learnt(&mut the_context, &[1, 2, 3, 4], ClauseStats::with_glue(8));
        assert!(the_context.reduce_db().is_none());
        assert_eq!(the_context.long_clause_count(), 1);
    }

    #[test]
    fn irredundant_clauses_are_untouched() {
        let mut config = Config::default();
        assert!(config.clause_db.removal_ratio.set(1.0).is_ok());
        let mut the_context = context_from(config, 6);

        assert!(the_context.add_clause(lits(&[1, 2, 3, 4])).is_ok());
        add_learnt(&mut the_context, &[3, 4, 5, 6], ClauseStats::with_glue(3));

        let stats = the_context.reduce_db_now();
        assert_eq!(stats.removed, 1);
        assert_eq!(stats.removed_literals, 4);
        assert_eq!(the_context.catalog().long(false).len(), 1);
        assert!(the_context.catalog().long(true).is_empty());
        assert_eq!(the_context.catalog().counts.redundant_literals, 0);
        assert_eq!(the_context.catalog().counts.irredundant_literals, 4);
    }
}

mod orders {
    use super::*;

    #[test]
    fn glue() {
        let mut the_context = context_from(Config::default(), 8);
        for glue in [5, 2, 7, 3] {
            add_learnt(&mut the_context, &[1, 2, 3, 4], ClauseStats::with_glue(glue));
        }

        let stats = the_context.reduce_db_now();
        assert_eq!(stats.removed, 2);
        assert_eq!(surviving_glues(&the_context), vec![2, 3]);
    }

    #[test]
    fn size() {
        let mut config = Config::default();
        assert!(config.clause_db.reduction_order.set(ReductionOrder::Size).is_ok());
        let mut the_context = context_from(config, 8);

        for size in [6, 4, 7, 5] {
            let clause = (1..=size).collect::<Vec<i32>>();
            add_learnt(&mut the_context, &clause, ClauseStats::with_glue(2));
        }

        the_context.reduce_db_now();
        let mut sizes = the_context
            .catalog()
            .long(true)
            .iter()
            .map(|offset| the_context.arena().size(*offset).unwrap())
            .collect::<Vec<_>>();
        sizes.sort();
        assert_eq!(sizes, vec![4, 5]);
    }

    #[test]
    fn prop_confl() {
        let mut config = Config::default();
        assert!(config.clause_db.reduction_order.set(ReductionOrder::PropConfl).is_ok());
        let mut the_context = context_from(config, 8);

        for (glue, propagations, conflicts) in [(1, 0, 0), (2, 10, 0), (3, 0, 3), (4, 1, 0)] {
            let stats = ClauseStats {
                glue,
                propagations,
                conflicts,
            };
            add_learnt(&mut the_context, &[1, 2, 3, 4], stats);
        }

        the_context.reduce_db_now();
        assert_eq!(surviving_glues(&the_context), vec![2, 3]);
    }

    #[test]
    fn protected_glue() {
        let mut config = Config::default();
        assert!(config.clause_db.protect_glue_below.set(3).is_ok());
        assert!(config.clause_db.removal_ratio.set(1.0).is_ok());
        let mut the_context = context_from(config, 8);

        for glue in [1, 5, 2, 6] {
            add_learnt(&mut the_context, &[1, 2, 3, 4], ClauseStats::with_glue(glue));
        }

        let stats = the_context.reduce_db_now();
        assert_eq!(stats.protected, 2);
        assert_eq!(stats.candidates, 2);
        assert_eq!(stats.removed, 2);
        assert_eq!(surviving_glues(&the_context), vec![1, 2]);
    }
}

mod full {
    use super::*;

    #[test]
    fn usage_is_reset() {
        common::init_logger();
        let mut the_context = context_from(Config::default(), 8);

        add_learnt(
            &mut the_context,
            &[1, 2, 3, 4],
            ClauseStats {
                glue: 2,
                propagations: 3,
                conflicts: 0,
            },
        );
        add_learnt(
            &mut the_context,
            &[2, 3, 4, 5],
            ClauseStats {
                glue: 5,
                propagations: 0,
                conflicts: 1,
            },
        );
        add_learnt(&mut the_context, &[3, 4, 5, 6], ClauseStats::with_glue(4));
        add_learnt(&mut the_context, &[4, 5, 6, 7], ClauseStats::with_glue(7));

        let summary = the_context.usage_summary();
        assert_eq!(summary.clauses, 4);
        assert_eq!(summary.used, 2);
        assert_eq!(summary.propagations, 3);
        assert_eq!(summary.conflicts, 1);
        assert_eq!(summary.min_glue, Some(2));
        assert_eq!(summary.max_glue, Some(7));
        assert_eq!(
            summary.to_string(),
            "4 redundant clauses, 2 used, 3 propagations, 1 conflicts"
        );

        let stats = the_context.full_reduce().expect("Full reduction failed");
        assert_eq!(stats.cleaning.removed, 2);
        assert_eq!(stats.reset, 2);
        assert!(stats.subsumption.is_some());

        let summary = the_context.usage_summary();
        assert_eq!(summary.clauses, 2);
        assert_eq!(summary.used, 0);
        assert_eq!(summary.min_glue, Some(2));
        assert_eq!(summary.max_glue, Some(4));

        assert_eq!(the_context.arena().garbage_words(), 0);
        assert_eq!(the_context.counters.full_reductions, 1);
        assert_eq!(the_context.counters.consolidations, 1);
        assert!(the_context.check_all().is_ok());
    }

    #[test]
    fn without_subsumption() {
        let mut config = Config::default();
        assert!(config.subsume_implicit.set(false).is_ok());
        let mut the_context = context_from(config, 3);

        assert!(the_context.add_clause(lits(&[1, 2])).is_ok());
        assert!(the_context.add_clause(lits(&[1, 2, 3])).is_ok());

        let stats = the_context.full_reduce().expect("Full reduction failed");
        assert!(stats.subsumption.is_none());
        assert_eq!(the_context.catalog().counts.ternaries(), 1);
    }

    #[test]
    fn empty_summary() {
        let the_context = context_from(Config::default(), 2);
        let summary = the_context.usage_summary();
        assert_eq!(summary.clauses, 0);
        assert_eq!(summary.min_glue, None);
        assert_eq!(summary.max_glue, None);
    }
}
