use crate::{
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
    },
    types::err::{self},
};

use super::{AtomDB, Reason};

impl AtomDB {
    /// The inner atom of an outer atom, if the outer atom is part of the database.
    pub fn to_inner_atom(&self, outer: Atom) -> Option<Atom> {
        self.outer_to_inner.get(outer as usize).copied()
    }

    /// The outer atom of an inner atom.
    pub fn to_outer_atom(&self, inner: Atom) -> Atom {
        self.inner_to_outer[inner as usize]
    }

    /// The inner literal of an outer literal, if the atom of the literal is part of the database.
    pub fn to_inner(&self, outer: CLiteral) -> Option<CLiteral> {
        self.to_inner_atom(outer.atom())
            .map(|atom| CLiteral::new(atom, outer.polarity()))
    }

    /// The outer literal of an inner literal.
    pub fn to_outer(&self, inner: CLiteral) -> CLiteral {
        CLiteral::new(self.to_outer_atom(inner.atom()), inner.polarity())
    }

    /// Checks the outer and inner maps are mutual inverses.
    pub fn check_numbering(&self) -> Result<(), err::InvariantError> {
        for (outer, inner) in self.outer_to_inner.iter().enumerate() {
            if self.inner_to_outer.get(*inner as usize) != Some(&(outer as Atom)) {
                return Err(err::InvariantError::Numbering {
                    atom: outer as Atom,
                });
            }
        }
        Ok(())
    }

    /// Moves every inner atom *a* to `new_of_old[a]`, rewriting every per-atom structure and literal held by the database.
    ///
    /// The given vector must be a permutation of the inner atoms.
    pub(crate) fn apply_permutation(&mut self, new_of_old: &[Atom]) {
        let map = |literal: CLiteral| CLiteral::new(new_of_old[literal.atom() as usize], literal.polarity());

        fn scatter<T: Copy + Default>(values: &mut Vec<T>, new_of_old: &[Atom]) {
            let mut moved = vec![T::default(); values.len()];
            for (old, value) in values.iter().enumerate() {
                moved[new_of_old[old] as usize] = *value;
            }
            *values = moved;
        }

        scatter(&mut self.valuation, new_of_old);
        scatter(&mut self.levels, new_of_old);
        scatter(&mut self.decision, new_of_old);
        scatter(&mut self.removed, new_of_old);
        scatter(&mut self.saved_polarity, new_of_old);
        scatter(&mut self.saved_activity, new_of_old);
        scatter(&mut self.inner_to_outer, new_of_old);
        scatter(&mut self.reasons, new_of_old);

        for reason in self.reasons.iter_mut().flatten() {
            match reason {
                Reason::Binary(other) => *other = map(*other),
                Reason::Ternary(others) => *others = [map(others[0]), map(others[1])],
                Reason::Long(_) => {}
            }
        }

        for literal in self.trail.iter_mut() {
            *literal = map(*literal);
        }

        for inner in self.outer_to_inner.iter_mut() {
            *inner = new_of_old[*inner as usize];
        }
    }
}

#[cfg(test)]
mod numbering_tests {
    use super::*;

    #[test]
    fn permutation_composes() {
        let mut atom_db = AtomDB::default();
        for _ in 0..4 {
            atom_db.fresh_atom().unwrap();
        }
        atom_db.assign(CLiteral::new(1, false), None);
        atom_db.set_saved_activity(3, 17);

        atom_db.apply_permutation(&[2, 3, 0, 1]);

        assert!(atom_db.check_numbering().is_ok());
        assert_eq!(atom_db.to_inner_atom(1), Some(3));
        assert_eq!(atom_db.to_outer_atom(3), 1);
        assert_eq!(atom_db.value_of(3), Some(false));
        assert_eq!(atom_db.trail(), &[CLiteral::new(3, false)]);
        assert_eq!(atom_db.saved_activity(1), 17);
        assert_eq!(atom_db.to_outer(CLiteral::new(1, true)), CLiteral::new(3, true));
    }
}
