/*!
A database of 'atom related' things, accessed via fields on an [AtomDB] struct.

Things include:
- A current (partial) valuation, and for each valued atom the decision level at which the atom was valued and the [Reason] for the value.
- The trail of assignments, in order, with the index of the trail at which each decision level begins.
- Per-atom bookkeeping backed up for the search loop: whether the atom is a decision atom, its saved polarity, and its saved activity.
- Whether the atom has been removed (e.g. eliminated by some preprocessing collaborator).
- The maps between the outer and inner [numberings](crate::structures::atom) of atoms.

Every per-atom vector is indexed by inner atoms, and only the [renumbering](crate::procedures::renumber) of a context changes the inner atom of an outer atom.
*/

mod numbering;

use crate::{
    db::{arena::ClauseOffset, LevelIndex},
    structures::{
        atom::{Atom, ATOM_MAX},
        literal::{CLiteral, Literal},
        valuation::{CValuation, Valuation},
    },
    types::err::{self},
};

/// The reason for a value of an atom obtained by propagation, as the remaining literals of the clause which propagated the value.
///
/// Decisions and units at level zero have no reason.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// The other literal of a binary clause.
    Binary(CLiteral),

    /// The other literals of a ternary clause.
    Ternary([CLiteral; 2]),

    /// A long clause.
    Long(ClauseOffset),
}

/// The atom database.
#[derive(Default)]
pub struct AtomDB {
    valuation: CValuation,

    levels: Vec<Option<LevelIndex>>,

    reasons: Vec<Option<Reason>>,

    /// The assignments made, in order.
    trail: Vec<CLiteral>,

    /// The index of the trail at which each decision level (from one) begins.
    level_starts: Vec<usize>,

    /// The index of the first assignment on the trail yet to be propagated.
    pub(crate) q_head: usize,

    decision: Vec<bool>,

    decision_count: usize,

    removed: Vec<bool>,

    saved_polarity: Vec<bool>,

    saved_activity: Vec<u32>,

    outer_to_inner: Vec<Atom>,

    inner_to_outer: Vec<Atom>,
}

impl AtomDB {
    /// A fresh atom, returned in the outer numbering.
    ///
    /// Fresh atoms are decision atoms with no value.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::AtomDBError> {
        let atom = match Atom::try_from(self.valuation.len()) {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(err::AtomDBError::AtomsExhausted),
        };

        self.valuation.push(None);
        self.levels.push(None);
        self.reasons.push(None);
        self.decision.push(true);
        self.decision_count += 1;
        self.removed.push(false);
        self.saved_polarity.push(false);
        self.saved_activity.push(0);
        self.outer_to_inner.push(atom);
        self.inner_to_outer.push(atom);

        Ok(atom)
    }

    /// A count of atoms.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation, over inner atoms.
    pub fn valuation(&self) -> &CValuation {
        &self.valuation
    }

    /// The value of the (inner) atom, if the atom has a value.
    ///
    /// Panics if the atom is not part of the database.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        self.valuation[atom as usize]
    }

    /// The value of the (inner) literal, if the atom of the literal has a value.
    pub fn literal_value(&self, literal: CLiteral) -> Option<bool> {
        self.valuation.literal_value(literal)
    }

    /// The decision level at which the atom was valued, if valued.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.levels[atom as usize]
    }

    /// The reason for the value of the atom, if valued by propagation.
    pub fn reason_of(&self, atom: Atom) -> Option<Reason> {
        self.reasons[atom as usize]
    }

    /// Whether the (inner) literal is valued at decision level zero, and if so its value.
    pub fn fixed_value(&self, literal: CLiteral) -> Option<bool> {
        match self.level_of(literal.atom()) {
            Some(0) => self.literal_value(literal),
            _ => None,
        }
    }

    /// The current decision level.
    pub fn decision_level(&self) -> LevelIndex {
        self.level_starts.len() as LevelIndex
    }

    /// The trail of assignments, in order.
    pub fn trail(&self) -> &[CLiteral] {
        &self.trail
    }

    /// The assignments made at decision level zero.
    pub fn level_zero(&self) -> &[CLiteral] {
        let end = self.level_starts.first().copied().unwrap_or(self.trail.len());
        &self.trail[..end]
    }

    /// Values the atom of the literal so the literal is true, at the current decision level.
    ///
    /// The atom must not have a value.
    pub(crate) fn assign(&mut self, literal: CLiteral, reason: Option<Reason>) {
        let atom = literal.atom() as usize;
        debug_assert!(self.valuation[atom].is_none());
        self.valuation[atom] = Some(literal.polarity());
        self.levels[atom] = Some(self.decision_level());
        self.reasons[atom] = reason;
        self.trail.push(literal);
    }

    /// Opens a fresh decision level.
    pub(crate) fn push_level(&mut self) {
        self.level_starts.push(self.trail.len());
    }

    /// Clears every assignment made above the given level, saving the polarity of each cleared atom.
    pub(crate) fn backjump(&mut self, level: LevelIndex) {
        let Some(&start) = self.level_starts.get(level as usize) else {
            return;
        };

        for literal in self.trail.drain(start..) {
            let atom = literal.atom() as usize;
            self.valuation[atom] = None;
            self.levels[atom] = None;
            self.reasons[atom] = None;
            self.saved_polarity[atom] = literal.polarity();
        }

        self.level_starts.truncate(level as usize);
        self.q_head = self.q_head.min(self.trail.len());
    }

    /// The next assignment to propagate, if any, advancing the propagation queue.
    pub(crate) fn next_to_propagate(&mut self) -> Option<CLiteral> {
        let literal = self.trail.get(self.q_head).copied();
        if literal.is_some() {
            self.q_head += 1;
        }
        literal
    }

    /// Marks the propagation queue as exhausted, e.g. on a conflict.
    pub(crate) fn clear_queue(&mut self) {
        self.q_head = self.trail.len();
    }

    /// Offsets of the long clauses which are the reason for some value, and so may not be removed.
    pub fn locked_offsets(&self) -> Vec<ClauseOffset> {
        self.trail
            .iter()
            .filter_map(|literal| match self.reasons[literal.atom() as usize] {
                Some(Reason::Long(offset)) => Some(offset),
                _ => None,
            })
            .collect()
    }

    /// Rewrites the offset of each long reason, clearing the reason if the offset maps to `None`.
    pub(crate) fn map_reason_offsets(&mut self, f: impl Fn(ClauseOffset) -> Option<ClauseOffset>) {
        for reason in self.reasons.iter_mut() {
            if let Some(Reason::Long(offset)) = reason {
                *reason = f(*offset).map(Reason::Long);
            }
        }
    }

    /// Whether the atom is a candidate for decisions.
    pub fn is_decision_atom(&self, atom: Atom) -> bool {
        self.decision[atom as usize]
    }

    pub fn set_decision_atom(&mut self, atom: Atom) {
        if !self.decision[atom as usize] {
            self.decision[atom as usize] = true;
            self.decision_count += 1;
        }
    }

    pub fn unset_decision_atom(&mut self, atom: Atom) {
        if self.decision[atom as usize] {
            self.decision[atom as usize] = false;
            self.decision_count -= 1;
        }
    }

    /// A count of decision atoms.
    pub fn decision_atom_count(&self) -> usize {
        self.decision_count
    }

    /// A count of atoms which have not been removed and have no value at level zero.
    pub fn free_atom_count(&self) -> usize {
        (0..self.count())
            .filter(|atom| self.is_active(*atom as Atom))
            .count()
    }

    /// Whether the atom has not been removed and has no value at level zero.
    pub fn is_active(&self, atom: Atom) -> bool {
        !self.removed[atom as usize] && self.levels[atom as usize] != Some(0)
    }

    pub fn is_removed(&self, atom: Atom) -> bool {
        self.removed[atom as usize]
    }

    /// Marks the atom as removed, and so not a decision atom.
    ///
    /// Every clause containing the atom should have been removed by the caller.
    pub fn mark_removed(&mut self, atom: Atom) {
        self.removed[atom as usize] = true;
        self.unset_decision_atom(atom);
    }

    pub fn saved_polarity(&self, atom: Atom) -> bool {
        self.saved_polarity[atom as usize]
    }

    pub fn set_saved_polarity(&mut self, atom: Atom, polarity: bool) {
        self.saved_polarity[atom as usize] = polarity;
    }

    pub fn saved_activity(&self, atom: Atom) -> u32 {
        self.saved_activity[atom as usize]
    }

    pub fn set_saved_activity(&mut self, atom: Atom, activity: u32) {
        self.saved_activity[atom as usize] = activity;
    }

    /// The memory (in bytes) held by the database.
    pub fn mem_used(&self) -> usize {
        self.valuation.capacity() * std::mem::size_of::<Option<bool>>()
            + self.levels.capacity() * std::mem::size_of::<Option<LevelIndex>>()
            + self.reasons.capacity() * std::mem::size_of::<Option<Reason>>()
            + self.trail.capacity() * std::mem::size_of::<CLiteral>()
            + (self.decision.capacity() + self.removed.capacity() + self.saved_polarity.capacity())
            + self.saved_activity.capacity() * std::mem::size_of::<u32>()
            + (self.outer_to_inner.capacity() + self.inner_to_outer.capacity())
                * std::mem::size_of::<Atom>()
    }
}

#[cfg(test)]
mod atom_db_tests {
    use super::*;

    #[test]
    fn backjump_saves_polarity() {
        let mut atom_db = AtomDB::default();
        for _ in 0..3 {
            atom_db.fresh_atom().unwrap();
        }

        atom_db.assign(CLiteral::new(0, true), None);
        atom_db.push_level();
        atom_db.assign(CLiteral::new(1, true), None);
        atom_db.assign(CLiteral::new(2, false), Some(Reason::Binary(CLiteral::new(1, false))));

        assert_eq!(atom_db.decision_level(), 1);
        assert_eq!(atom_db.level_zero(), &[CLiteral::new(0, true)]);

        atom_db.backjump(0);

        assert_eq!(atom_db.trail(), &[CLiteral::new(0, true)]);
        assert_eq!(atom_db.value_of(2), None);
        assert!(!atom_db.saved_polarity(2));
        assert!(atom_db.saved_polarity(1));
        assert_eq!(atom_db.free_atom_count(), 2);
    }

    #[test]
    fn decision_atoms() {
        let mut atom_db = AtomDB::default();
        let a = atom_db.fresh_atom().unwrap();
        let b = atom_db.fresh_atom().unwrap();

        atom_db.unset_decision_atom(a);
        atom_db.unset_decision_atom(a);
        assert_eq!(atom_db.decision_atom_count(), 1);

        atom_db.mark_removed(b);
        assert_eq!(atom_db.decision_atom_count(), 0);
        assert!(atom_db.is_removed(b));
    }
}
