/*!
A (partial) function from atoms to truth values.

If all atoms are assigned a value the valuation is 'full', otherwise the valuation is 'partial'.

The canonical representation of a valuation is a vector of optional booleans whose length is the number of atoms, such that:
-  *v*\[a\] = Some(true) *if any only if* 𝐯(a) = true.
-  *v*\[a\] = Some(false) *if any only if* 𝐯(a) = false.
-  *v*\[a\] = None *if any only if* 𝐯(a) is undefined.

The trait is implemented for anything which can be dereferenced to a slice of optional booleans.

```rust
# use clause_core::structures::valuation::Valuation;
# use clause_core::structures::literal::{CLiteral, Literal};
let valuation = vec![Some(true), None, Some(false)];

assert_eq!(valuation.value_of(1), Some(None));
assert_eq!(valuation.value_of(3), None);
assert_eq!(valuation.unvalued_atoms().count(), 1);

assert_eq!(valuation.literal_value(CLiteral::new(2, false)), Some(true));
assert_eq!(valuation.literal_value(CLiteral::new(1, true)), None);
```
*/

mod slice_impl;

use super::{atom::Atom, literal::CLiteral};

/// The canonical representation of a valuation.
pub type CValuation = Vec<Option<bool>>;

/// A valuation is something which stores some value of a atom and/or perhaps the information that the atom has no value.
pub trait Valuation {
    /// Some value of a atom under the valuation, or otherwise nothing if the atom is not part of the valuation.
    fn value_of(&self, atom: Atom) -> Option<Option<bool>>;

    /// The value of a literal under the valuation, with `None` for an unvalued atom or an atom outside the valuation.
    fn literal_value(&self, literal: CLiteral) -> Option<bool>;

    /// An iterator over the values of atoms in the valuation, in strict, contiguous, atom order.
    fn values(&self) -> impl Iterator<Item = Option<bool>>;

    /// An iterator through atoms which have some value.
    fn valued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// An iterator through atoms which do not have some value.
    fn unvalued_atoms(&self) -> impl Iterator<Item = Atom>;

    /// A count of all the atoms in the valuation.
    fn atom_count(&self) -> usize;
}
