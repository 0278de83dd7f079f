/*!
Dumps of the clauses of a context, in DIMACS form.

Each clause is written on a line of its own, as the (outer) literals of the clause followed by `0`.
Each dump begins with a comment line (starting with `c`) naming the clauses dumped, and so dumps may be written one after another to the same writer.

Each method returns the count of clauses written.

```rust
# use clause_core::context::Context;
let mut the_context = Context::default();
let [p, q, r] = *the_context.fresh_or_max_literals(3).as_slice() else {
    panic!("Failed to create fresh literals");
};

assert!(the_context.add_clause(vec![p, -q]).is_ok());
assert!(the_context.add_clause(-r).is_ok());

let mut out = Vec::default();
assert_eq!(the_context.dump_irredundant_clauses(&mut out).unwrap(), 2);
assert_eq!(String::from_utf8(out).unwrap(), "c irredundant clauses\n-3 0\n1 -2 0\n");
```
*/

use std::io::Write;

use crate::{
    context::Context,
    db::watches::Watched,
    structures::literal::CLiteral,
};

impl Context {
    fn write_clause(&self, out: &mut impl Write, literals: &[CLiteral]) -> std::io::Result<()> {
        for literal in literals {
            write!(out, "{} ", self.atom_db.to_outer(*literal))?;
        }
        writeln!(out, "0")
    }

    /// Writes the binary and ternary clauses, once each, filtered by redundancy.
    fn write_implicit(
        &self,
        out: &mut impl Write,
        keep: impl Fn(&Watched) -> bool,
    ) -> std::io::Result<usize> {
        let mut count = 0;
        for (literal, list) in self.watches.iter() {
            for entry in list.iter().filter(|entry| keep(entry)) {
                match *entry {
                    Watched::Binary { other, .. } if literal < other => {
                        self.write_clause(out, &[literal, other])?;
                        count += 1;
                    }
                    Watched::Ternary { others, .. } if literal < others[0] => {
                        self.write_clause(out, &[literal, others[0], others[1]])?;
                        count += 1;
                    }
                    _ => {}
                }
            }
        }
        Ok(count)
    }

    /// Writes the binary clauses, irredundant and/or redundant.
    pub fn dump_binary_clauses(
        &self,
        also_learnt: bool,
        also_irredundant: bool,
        out: &mut impl Write,
    ) -> std::io::Result<usize> {
        writeln!(out, "c binary clauses")?;
        self.write_implicit(out, |entry| match entry {
            Watched::Binary { learnt, .. } => match learnt {
                true => also_learnt,
                false => also_irredundant,
            },
            _ => false,
        })
    }

    /// Writes the redundant clauses of at most `max_size` literals.
    pub fn dump_learnts(&self, out: &mut impl Write, max_size: usize) -> std::io::Result<usize> {
        writeln!(out, "c learnt clauses")?;
        let mut count = self.write_implicit(out, |entry| match entry {
            Watched::Binary { learnt, .. } => *learnt && max_size >= 2,
            Watched::Ternary { learnt, .. } => *learnt && max_size >= 3,
            Watched::Long { .. } => false,
        })?;

        for offset in &self.catalog.long_redundant {
            if let Ok(literals) = self.arena.literals(*offset) {
                if literals.len() <= max_size {
                    self.write_clause(out, literals)?;
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    /// Writes the irredundant clauses, together with every assignment made at level zero as a unit clause.
    pub fn dump_irredundant_clauses(&self, out: &mut impl Write) -> std::io::Result<usize> {
        writeln!(out, "c irredundant clauses")?;
        let mut count = 0;

        for unit in self.atom_db.level_zero() {
            self.write_clause(out, std::slice::from_ref(unit))?;
            count += 1;
        }

        count += self.write_implicit(out, |entry| entry.learnt() == Some(false))?;

        for offset in &self.catalog.long_irredundant {
            if let Ok(literals) = self.arena.literals(*offset) {
                self.write_clause(out, literals)?;
                count += 1;
            }
        }
        Ok(count)
    }
}
