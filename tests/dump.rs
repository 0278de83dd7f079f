mod common;

use std::collections::BTreeMap;

use clause_core::{context::Context, db::arena::ClauseStats};
use common::{context_with_atoms, lits};

/// A context with clauses of each kind and redundancy, and a unit.
fn mixed_context() -> Context {
    let mut the_context = context_with_atoms(5);

    assert!(the_context.add_clause(lits(&[1, -2])).is_ok());
    assert!(the_context
        .add_learnt_clause(lits(&[2, 3]), ClauseStats::with_glue(1))
        .is_ok());
    assert!(the_context.add_clause(lits(&[-1, 2, 3])).is_ok());
    assert!(the_context
        .add_learnt_clause(lits(&[1, 2, 3, 4]), ClauseStats::with_glue(2))
        .is_ok());
    assert!(the_context
        .add_learnt_clause(lits(&[1, 2, 3, 4, 5]), ClauseStats::with_glue(3))
        .is_ok());
    assert!(the_context.add_clause(lits(&[-1, -2, -3, -4])).is_ok());
    assert!(the_context.add_clause(lits(&[-5])).is_ok());

    the_context
}

fn dumped(dump: impl FnOnce(&mut Vec<u8>) -> std::io::Result<usize>) -> (String, usize) {
    let mut out = Vec::default();
    let count = dump(&mut out).expect("Failed to write");
    (String::from_utf8(out).expect("Invalid UTF-8"), count)
}

#[test]
fn binary_clauses() {
    let the_context = mixed_context();

    let (every, count) = dumped(|out| the_context.dump_binary_clauses(true, true, out));
    assert_eq!(every, "c binary clauses\n1 -2 0\n2 3 0\n");
    assert_eq!(count, 2);

    let (irredundant, count) = dumped(|out| the_context.dump_binary_clauses(false, true, out));
    assert_eq!(irredundant, "c binary clauses\n1 -2 0\n");
    assert_eq!(count, 1);

    let (learnt, count) = dumped(|out| the_context.dump_binary_clauses(true, false, out));
    assert_eq!(learnt, "c binary clauses\n2 3 0\n");
    assert_eq!(count, 1);
}

#[test]
fn learnt_clauses() {
    let the_context = mixed_context();

    let (short, count) = dumped(|out| the_context.dump_learnts(out, 4));
    assert_eq!(short, "c learnt clauses\n2 3 0\n1 2 3 4 0\n");
    assert_eq!(count, 2);

    let (binary, count) = dumped(|out| the_context.dump_learnts(out, 2));
    assert_eq!(binary, "c learnt clauses\n2 3 0\n");
    assert_eq!(count, 1);

    let (_, count) = dumped(|out| the_context.dump_learnts(out, usize::MAX));
    assert_eq!(count, 3);
}

#[test]
fn irredundant_clauses() {
    let the_context = mixed_context();

    let (irredundant, count) = dumped(|out| the_context.dump_irredundant_clauses(out));
    assert_eq!(
        irredundant,
        "c irredundant clauses\n-5 0\n1 -2 0\n-1 2 3 0\n-1 -2 -3 -4 0\n"
    );
    assert_eq!(count, 4);
}

#[test]
fn dumps_may_share_a_writer() {
    let the_context = mixed_context();

    let mut out = Vec::default();
    assert_eq!(the_context.dump_binary_clauses(false, true, &mut out).ok(), Some(1));
    assert_eq!(the_context.dump_learnts(&mut out, 2).ok(), Some(1));
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "c binary clauses\n1 -2 0\nc learnt clauses\n2 3 0\n"
    );
}

#[test]
fn size_distribution() {
    let the_context = mixed_context();

    let expected = BTreeMap::from([(1, 1), (2, 2), (3, 1), (4, 2), (5, 1)]);
    assert_eq!(the_context.size_distribution(), expected);
}
