/*!
Verification of a valuation against every clause held by a context.

A valuation *verifies* when every clause has some literal true on the valuation, and an unvalued literal is not true.
Verification is not part of propagation, and is intended as a check on a claimed model before the model is returned.

Each clause is examined:
- Units, through the unit catalog.
- Binary clauses, once each, from the list of the lesser literal.
- Ternary clauses, from the list of each watched literal.
- Long clauses, through the catalog of offsets.

Each failure is logged as an error, naming the clause.

```rust
# use clause_core::context::Context;
let mut the_context = Context::default();
let [p, q, r] = *the_context.fresh_or_max_literals(3).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert!(the_context.add_clause(vec![p, -q]).is_ok());
assert!(the_context.add_clause(vec![-p, q, r]).is_ok());
assert!(the_context.add_clause(-r).is_ok());

assert!(the_context.verify_model_with(&vec![Some(true), Some(true), Some(false)]));
assert!(!the_context.verify_model_with(&vec![Some(true), Some(true), Some(true)]));
```
*/

use crate::{
    context::Context,
    db::{arena::ClauseOffset, watches::Watched},
    misc::log::targets::{self},
    structures::{
        atom::Atom,
        clause::Clause,
        valuation::{CValuation, Valuation},
    },
};

impl Context {
    /// Whether the current valuation verifies every clause.
    pub fn verify_model(&self) -> bool {
        self.verify_inner(self.atom_db.valuation())
    }

    /// Whether the given valuation, indexed by outer atoms, verifies every clause.
    pub fn verify_model_with(&self, valuation: &impl Valuation) -> bool {
        let inner: CValuation = (0..self.atom_db.count() as Atom)
            .map(|atom| {
                valuation
                    .value_of(self.atom_db.to_outer_atom(atom))
                    .flatten()
            })
            .collect();
        self.verify_inner(&inner)
    }

    fn verify_inner(&self, valuation: &impl Valuation) -> bool {
        let units = self.verify_units(valuation);
        let implicit = self.verify_binary_clauses(valuation);
        let irredundant = self.verify_clauses(&self.catalog.long_irredundant, valuation);
        let redundant = self.verify_clauses(&self.catalog.long_redundant, valuation);

        let verified = units && implicit && irredundant && redundant;
        log::info!(target: targets::VERIFY, "Verification: {verified}");
        verified
    }

    /// Whether the valuation (over inner atoms) makes every unit true.
    pub fn verify_units(&self, valuation: &impl Valuation) -> bool {
        let mut verified = true;
        for unit in &self.catalog.units {
            if valuation.literal_value(*unit) != Some(true) {
                log::error!(target: targets::VERIFY, "Unit {} is not true", self.atom_db.to_outer(*unit));
                verified = false;
            }
        }
        verified
    }

    /// Whether the valuation (over inner atoms) verifies every binary and ternary clause.
    pub fn verify_binary_clauses(&self, valuation: &impl Valuation) -> bool {
        let mut verified = true;
        for (literal, list) in self.watches.iter() {
            if valuation.literal_value(literal) == Some(true) {
                continue;
            }

            for entry in list {
                match *entry {
                    Watched::Binary { other, learnt } if literal < other => {
                        if valuation.literal_value(other) != Some(true) {
                            log::error!(target: targets::VERIFY, "Binary clause {} {} (learnt: {learnt}) is not satisfied", self.atom_db.to_outer(literal), self.atom_db.to_outer(other));
                            verified = false;
                        }
                    }

                    Watched::Ternary { others, learnt } => {
                        if others
                            .iter()
                            .all(|other| valuation.literal_value(*other) != Some(true))
                        {
                            log::error!(target: targets::VERIFY, "Ternary clause {} {} {} (learnt: {learnt}) is not satisfied", self.atom_db.to_outer(literal), self.atom_db.to_outer(others[0]), self.atom_db.to_outer(others[1]));
                            verified = false;
                        }
                    }

                    _ => {}
                }
            }
        }
        verified
    }

    /// Whether the valuation (over inner atoms) verifies every long clause at the given offsets.
    pub fn verify_clauses(&self, offsets: &[ClauseOffset], valuation: &impl Valuation) -> bool {
        let mut verified = true;
        for offset in offsets {
            match self.arena.literals(*offset) {
                Ok(literals) => {
                    if !literals
                        .iter()
                        .any(|literal| valuation.literal_value(*literal) == Some(true))
                    {
                        let outer = literals
                            .iter()
                            .map(|literal| self.atom_db.to_outer(*literal))
                            .collect::<Vec<_>>();
                        log::error!(target: targets::VERIFY, "Clause {offset} is not satisfied: {}", outer.as_dimacs(false));
                        verified = false;
                    }
                }
                Err(_) => {
                    log::error!(target: targets::VERIFY, "Clause {offset} is missing");
                    verified = false;
                }
            }
        }
        verified
    }
}
