/*!
(The internal representation of) an atom (aka. a 'variable').

Atoms are dense: the atoms of a context are exactly the integers in `[0, n)`, where *n* is the number of atoms the context knows about.

Two numberings of the same atoms are maintained by the [atom database](crate::db::atom::AtomDB):
- The *outer* numbering, fixed when an atom is created and used by every external caller (clauses are added, and models are reported, in outer atoms).
- The *inner* numbering, used by every database structure.
  The inner numbering may be revised by [renumbering](crate::procedures::renumber) to keep atoms in active use at the front of the index space.

Immediately after creation the two numberings coincide.
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
///
/// Bounded so the [code](crate::structures::literal::CLiteral::code) of any literal fits below the arena's record marker bit.
pub const ATOM_MAX: Atom = (1 << 30) - 1;
