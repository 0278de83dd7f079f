mod common;

use clause_core::{
    config::Config,
    context::Context,
    db::arena::ClauseStats,
    structures::literal::{CLiteral, Literal},
};
use common::{context_with_atoms, lits};

fn small_scenario() -> Context {
    let mut the_context = context_with_atoms(3);
    assert!(the_context.add_clause(lits(&[1, -2])).is_ok());
    assert!(the_context.add_clause(lits(&[-1, 2, 3])).is_ok());
    assert!(the_context.add_clause(lits(&[-3])).is_ok());
    the_context
}

mod given_valuations {
    use super::*;

    #[test]
    fn small() {
        let the_context = small_scenario();

        assert!(the_context.verify_model_with(&vec![Some(true), Some(true), Some(false)]));
        assert!(the_context.verify_model_with(&vec![Some(false), Some(false), Some(false)]));

        assert!(!the_context.verify_model_with(&vec![Some(true), Some(true), Some(true)]));
        assert!(!the_context.verify_model_with(&vec![Some(false), Some(true), Some(false)]));
    }

    #[test]
    fn unvalued_is_not_true() {
        let the_context = small_scenario();
        assert!(!the_context.verify_model_with(&vec![Some(true), None, Some(false)]));
        assert!(!the_context.verify_model_with(&vec![Some(true), Some(true)]));
    }

    #[test]
    fn long_and_redundant_clauses() {
        let mut the_context = context_with_atoms(5);
        assert!(the_context
            .add_learnt_clause(lits(&[1, 2, 3, 4]), ClauseStats::with_glue(2))
            .is_ok());
        assert!(the_context.add_clause(lits(&[-2, -3, -4, -5])).is_ok());

        let mut valuation = vec![Some(false); 5];
        assert!(!the_context.verify_model_with(&valuation));

        valuation[3] = Some(true);
        assert!(the_context.verify_model_with(&valuation));

        valuation = vec![Some(true); 5];
        assert!(!the_context.verify_model_with(&valuation));

        let offsets = the_context.catalog().long(true).to_vec();
        assert!(the_context.verify_clauses(&offsets, &valuation));
    }
}

mod current_valuation {
    use super::*;

    #[test]
    fn propagated_model() {
        let mut the_context = small_scenario();
        assert!(the_context.propagate().is_ok());

        the_context.record_decision(CLiteral::new(0, true));
        assert!(the_context.propagate().is_ok());

        assert_eq!(the_context.model(), vec![Some(true), Some(true), Some(false)]);
        assert!(the_context.verify_model());
        assert_eq!(
            the_context.checked_model(),
            Some(vec![Some(true), Some(true), Some(false)])
        );
    }

    #[test]
    fn unpropagated_model_is_refused() {
        let mut the_context = small_scenario();
        the_context.record_decision(CLiteral::new(0, true));
        the_context.record_decision(CLiteral::new(1, false));

        assert!(!the_context.verify_model());
        assert_eq!(the_context.checked_model(), None);
    }

    #[test]
    fn unchecked_model() {
        let mut config = Config::default();
        assert!(config.verify_model.set(false).is_ok());
        let mut the_context = Context::from_config(config);
        let [p, q] = *the_context.fresh_or_max_literals(2).as_slice() else {
            panic!("Failed to create fresh literals");
        };
        assert!(the_context.add_clause(vec![p, q]).is_ok());

        the_context.record_decision(-p);
        the_context.record_decision(-q);

        assert_eq!(the_context.checked_model(), Some(vec![Some(false), Some(false)]));
    }

    #[test]
    fn binary_verification() {
        let mut the_context = small_scenario();
        the_context.record_decision(CLiteral::new(0, false));
        the_context.record_decision(CLiteral::new(1, true));

        let valuation = the_context.atom_db().valuation().clone();
        assert!(!the_context.verify_binary_clauses(&valuation));
        assert!(the_context.verify_units(&valuation));
    }
}
