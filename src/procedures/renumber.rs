/*!
Renumbering of the inner atoms of a context.

# Overview

Renumbering moves every *active* atom (an atom which has not been removed and has no value at level zero) to the front of the inner numbering, so the active atoms are exactly the inner atoms `[0, active)`.
Within the active atoms, and within the inactive atoms, the relative order of atoms is kept.

The renumbering is a permutation `new_of_old` of the inner atoms, and is applied to:
- Every watch list, which moves to the list of the renumbered literal, and the literals held by each binary and ternary entry.
- The literals of every record in the arena.
- The unit catalog.
- Every per-atom structure of the [atom database](crate::db::atom::AtomDB), the trail, and the literals of each reason.
- The map from outer atoms to inner atoms, which is composed with the permutation.

The outer numbering of an atom is never changed, and so any literal held by an external caller remains valid.

Renumbering is only permitted at decision level zero.

```rust
# use clause_core::context::Context;
# use clause_core::structures::literal::{CLiteral, Literal};
let mut the_context = Context::default();
let [p, q, r, s] = *the_context.fresh_or_max_literals(4).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert!(the_context.add_clause(-p).is_ok());
assert!(the_context.add_clause(vec![q, r, s]).is_ok());

let stats = the_context.renumber_atoms().unwrap();
assert_eq!(stats.active, 3);

assert_eq!(the_context.atom_db().to_inner(q), Some(CLiteral::new(0, true)));
assert_eq!(the_context.atom_db().to_inner(p), Some(CLiteral::new(3, true)));
assert_eq!(the_context.model_value(p), Some(false));
```
*/

use crate::{
    context::Context,
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

/// Statistics of a renumbering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenumberStats {
    /// A count of active atoms, which are now the inner atoms `[0, active)`.
    pub active: usize,

    /// A count of all atoms.
    pub total: usize,
}

impl Context {
    /// Renumbers the inner atoms, so the active atoms are the least inner atoms.
    pub fn renumber_atoms(&mut self) -> Result<RenumberStats, err::ClauseDBError> {
        if self.atom_db.decision_level() != 0 {
            log::error!(target: targets::RENUMBER, "Renumbering requested above level zero");
            return Err(err::ClauseDBError::DecisionMade);
        }

        let total = self.atom_db.count();
        let (active, inactive): (Vec<Atom>, Vec<Atom>) =
            (0..total as Atom).partition(|atom| self.atom_db.is_active(*atom));

        let stats = RenumberStats {
            active: active.len(),
            total,
        };

        let mut new_of_old = vec![0; total];
        for (new, old) in active.iter().chain(inactive.iter()).enumerate() {
            new_of_old[*old as usize] = new as Atom;
        }

        if new_of_old
            .iter()
            .enumerate()
            .all(|(old, new)| old == *new as usize)
        {
            log::trace!(target: targets::RENUMBER, "Renumbering is the identity");
            return Ok(stats);
        }

        let map = |literal: CLiteral| {
            CLiteral::new(new_of_old[literal.atom() as usize], literal.polarity())
        };

        self.watches.map_literals(map);
        self.arena.map_literals(map);
        for unit in self.catalog.units.iter_mut() {
            *unit = map(*unit);
        }
        self.atom_db.apply_permutation(&new_of_old);

        self.counters.renumberings += 1;
        log::info!(target: targets::RENUMBER, "Renumbered {} atoms, {} active", stats.total, stats.active);

        #[cfg(debug_assertions)]
        self.assert_all();

        Ok(stats)
    }
}
