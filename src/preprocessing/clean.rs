/*!
Removal of the consequences of level zero assignments from stored clauses.

A clause with some literal true at level zero is satisfied by every extension of the level zero valuation, and so is removed.
A literal false at level zero can never satisfy a clause, and so is dropped from the clause.

The cleaner is a collaborator of a context, and works only through an [AttachmentPort]:
- A satisfied clause is detached and deleted.
- A long clause with at least four remaining literals is detached, shrunk in place, and attached again.
- Any other clause with some false literal is detached and deleted, and the remaining literals are stored as a fresh clause (of the same redundancy and with the same statistics).

Deletions are deferred, and completed together at the end of the pass.

As the fresh clause is stored through the port, a remaining clause of a single literal is a unit at level zero, and an empty remaining clause marks the context unsatisfiable.
So, the cleaner should only be used at decision level zero, after propagation.

```rust
# use clause_core::context::Context;
# use clause_core::preprocessing::clean::remove_satisfied;
let mut the_context = Context::default();
let [p, q, r, s, t] = *the_context.fresh_or_max_literals(5).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert!(the_context.add_clause(vec![p, q, r, s]).is_ok());
assert!(the_context.add_clause(vec![-p, q, r, s, t]).is_ok());
assert!(the_context.add_clause(p).is_ok());

let stats = remove_satisfied(&mut the_context).unwrap();
assert_eq!(stats.satisfied, 1);
assert_eq!(stats.strengthened, 1);
assert_eq!(the_context.long_clause_count(), 1);
```
*/

use crate::{
    context::AttachmentPort,
    db::ClauseKey,
    misc::log::targets::{self},
    structures::clause::CClause,
    types::err::{self},
};

/// Statistics of a pass of the cleaner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// A count of clauses removed as satisfied.
    pub satisfied: usize,

    /// A count of clauses stored again without their false literals.
    pub strengthened: usize,

    /// A count of false literals dropped.
    pub dropped_literals: usize,
}

/// Removes satisfied clauses and false literals, with respect to the level zero valuation.
pub fn remove_satisfied(port: &mut impl AttachmentPort) -> Result<CleanStats, err::ErrorKind> {
    let mut stats = CleanStats::default();

    let mut keys = port.long_clauses();
    keys.extend(port.implicit_clauses());

    let result = keys
        .iter()
        .try_for_each(|key| clean_clause(port, key, &mut stats));
    port.forget_deleted();
    result?;

    log::info!(target: targets::PREPROCESSING, "Cleaning: {stats:?}");
    Ok(stats)
}

fn clean_clause(
    port: &mut impl AttachmentPort,
    key: &ClauseKey,
    stats: &mut CleanStats,
) -> Result<(), err::ErrorKind> {
    let literals = port.clause_literals(key)?;

    if literals
        .iter()
        .any(|literal| port.fixed_value(*literal) == Some(true))
    {
        port.detach(key)?;
        port.delete_deferred(key)?;
        stats.satisfied += 1;
        log::trace!(target: targets::PREPROCESSING, "Removed satisfied {key}");
        return Ok(());
    }

    let remaining: CClause = literals
        .iter()
        .copied()
        .filter(|literal| port.fixed_value(*literal).is_none())
        .collect();

    if remaining.len() == literals.len() {
        return Ok(());
    }

    stats.strengthened += 1;
    stats.dropped_literals += literals.len() - remaining.len();
    log::trace!(target: targets::PREPROCESSING, "Dropped {} literals from {key}", literals.len() - remaining.len());

    match key {
        ClauseKey::Long(_) if remaining.len() > 3 => {
            port.detach(key)?;
            port.shrink(key, &remaining)?;
            port.attach(key)?;
        }

        _ => {
            let (redundant, clause_stats) = port.clause_stats(key)?;
            port.detach(key)?;
            port.delete_deferred(key)?;
            port.store(remaining, redundant, clause_stats)?;
        }
    }

    Ok(())
}
