mod common;

use clause_core::{
    config::Config,
    context::{Context, ContextState},
    db::{arena::ClauseStats, ClauseKey},
    structures::literal::{CLiteral, Literal},
};
use common::{random_clause, MinimalPCG32};
use rand::Rng;
use rand_core::SeedableRng;

const ATOMS: usize = 14;
const STEPS: usize = 400;

fn stress_context() -> Context {
    let mut config = Config::default();
    assert!(config.clause_db.clean_limit_start.set(12).is_ok());
    let mut the_context = Context::from_config(config);
    for _ in 0..ATOMS {
        assert!(the_context.fresh_atom().is_ok());
    }
    the_context
}

/// Decides an unassigned atom, if any, and propagates.
fn decide(the_context: &mut Context, rng: &mut MinimalPCG32) {
    let unassigned = (0..ATOMS as u32)
        .filter(|atom| the_context.atom_db().value_of(*atom).is_none())
        .collect::<Vec<_>>();
    if unassigned.is_empty() {
        return;
    }

    let atom = unassigned[rng.random_range(0..unassigned.len())];
    the_context.record_decision(CLiteral::new(atom, rng.random_bool(0.5)));
    if the_context.propagate().is_err() {
        the_context.backjump(0);
    }
}

/// Runs a random workload from the seed, checking every invariant after each step.
fn workload(seed: u64) {
    let mut rng = MinimalPCG32::seed_from_u64(seed);
    let mut the_context = stress_context();

    for step in 0..STEPS {
        match rng.random_range(0..10) {
            0..=3 => {
                the_context.backjump(0);
                let size = rng.random_range(2..7);
                let clause = random_clause(&mut rng, ATOMS as u32, size);
                let added = match rng.random_bool(0.6) {
                    true => {
                        let stats = ClauseStats::with_glue(rng.random_range(1..10));
                        the_context.add_learnt_clause(clause, stats)
                    }
                    false => the_context.add_clause(clause),
                };
                if added.is_err() {
                    assert_eq!(the_context.state(), ContextState::Unsatisfiable);
                    break;
                }
            }

            4 => {
                if the_context.atom_db().decision_level() == 0 && the_context.propagate().is_err() {
                    break;
                }
                decide(&mut the_context, &mut rng);
            }

            5 => {
                the_context.reduce_db();
            }

            6 => {
                the_context.backjump(0);
                if the_context.propagate().is_err() {
                    break;
                }
                assert!(the_context.renumber_atoms().is_ok());
            }

            7 => {
                the_context.consolidate_memory();
            }

            8 => {
                the_context.backjump(0);
                assert!(the_context.subsume_and_strengthen_implicit().is_ok());
            }

            _ => {
                the_context.backjump(0);
                let locked = the_context.atom_db().locked_offsets();
                let irredundant = the_context.catalog().long(false).to_vec();
                if let Some(offset) = irredundant.iter().find(|offset| !locked.contains(*offset)) {
                    assert!(the_context.remove_clause(&ClauseKey::Long(*offset)).is_ok());
                }
            }
        }

        if let Err(e) = the_context.check_all() {
            panic!("Seed {seed}, step {step}: {e}");
        }
    }

    the_context.backjump(0);
    assert!(the_context.full_reduce().is_ok());
    assert!(the_context.check_all().is_ok());
}

#[test]
fn random_workloads() {
    common::init_logger();
    for seed in 0..8 {
        workload(seed);
    }
}
