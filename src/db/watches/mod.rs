/*!
The watch array: for each literal, a list of the clauses watching the literal.

# Overview

The array has one list for each literal, indexed by the [code](crate::structures::literal::CLiteral::code) of the literal, and so holds 2 × *n* lists for *n* atoms.
An entry in the list of literal *l* is for a clause containing *l* as a watched literal.
So, when *l* is valued false the clauses which may have become unit or falsified are exactly the clauses in the list of *l*, and when a literal *m* is assigned true [propagation](crate::procedures::bcp) visits the list of ¬*m*.

# Invariants

- A binary clause *a* ∨ *b* has exactly one entry in the list of *a* (holding *b*) and exactly one entry in the list of *b* (holding *a*).
- A ternary clause *a* ∨ *b* ∨ *c* watched by *a* and *b* has exactly one entry in the list of *a* (holding \[*b*, *c*\]) and exactly one entry in the list of *b* (holding \[*a*, *c*\]).
- A long clause has exactly one entry in the list of each of its first two literals.

The order of a list is not meaningful, and removal of an entry swaps the last entry of the list into its place.

Entries are only pushed and removed through the [context](crate::context::Context), which maintains the invariants and the counts of clauses.
*/

mod watched;
pub use watched::Watched;

use crate::{
    db::arena::ClauseOffset,
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::{self},
};

/// A list of watch entries for each literal.
#[derive(Default)]
pub struct WatchArray {
    lists: Vec<Vec<Watched>>,
}

impl WatchArray {
    /// Ensures there is a list for each literal of the given count of atoms.
    pub fn resize(&mut self, atom_count: usize) {
        if self.lists.len() < 2 * atom_count {
            self.lists.resize_with(2 * atom_count, Vec::default);
        }
    }

    /// A count of lists, which is twice the count of atoms.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// The list of the literal, if the literal has a list.
    pub fn get(&self, literal: CLiteral) -> Option<&[Watched]> {
        self.lists.get(literal.code()).map(|list| list.as_slice())
    }

    /// The list of the literal.
    ///
    /// Panics if the literal has no list.
    pub fn list(&self, literal: CLiteral) -> &[Watched] {
        &self.lists[literal.code()]
    }

    /// Adds an entry to the list of the literal.
    pub(crate) fn push(&mut self, literal: CLiteral, watch: Watched) {
        self.lists[literal.code()].push(watch)
    }

    /// Removes the first entry of the list of the literal equal to the given entry.
    pub(crate) fn remove(&mut self, literal: CLiteral, watch: &Watched) -> Result<(), err::ClauseDBError> {
        let list = &mut self.lists[literal.code()];
        match list.iter().position(|entry| entry == watch) {
            Some(index) => {
                list.swap_remove(index);
                Ok(())
            }
            None => {
                log::error!(target: targets::WATCHES, "No entry {watch:?} in the list of {literal}");
                Err(err::ClauseDBError::CorruptList)
            }
        }
    }

    /// Replaces the first entry of the list of the literal equal to `from` with `to`.
    pub(crate) fn replace(
        &mut self,
        literal: CLiteral,
        from: &Watched,
        to: Watched,
    ) -> Result<(), err::ClauseDBError> {
        match self.lists[literal.code()].iter_mut().find(|entry| **entry == *from) {
            Some(entry) => {
                *entry = to;
                Ok(())
            }
            None => {
                log::error!(target: targets::WATCHES, "No entry {from:?} in the list of {literal}");
                Err(err::ClauseDBError::CorruptList)
            }
        }
    }

    /// Takes the list of the literal, leaving an empty list in its place.
    pub(crate) fn take(&mut self, literal: CLiteral) -> Vec<Watched> {
        std::mem::take(&mut self.lists[literal.code()])
    }

    /// Restores a list taken by [take](WatchArray::take), keeping any entries pushed in the meantime.
    pub(crate) fn restore(&mut self, literal: CLiteral, mut list: Vec<Watched>) {
        let slot = &mut self.lists[literal.code()];
        list.append(slot);
        *slot = list;
    }

    /// An iterator over each literal paired with its list.
    pub fn iter(&self) -> impl Iterator<Item = (CLiteral, &[Watched])> {
        self.lists
            .iter()
            .enumerate()
            .map(|(code, list)| (CLiteral::from_code(code), list.as_slice()))
    }

    /// A count of entries across all lists.
    pub fn entry_count(&self) -> usize {
        self.lists.iter().map(|list| list.len()).sum()
    }

    /// A count of the lists holding an entry for the long clause at the offset.
    pub fn long_watch_count(&self, offset: ClauseOffset) -> usize {
        self.lists
            .iter()
            .flatten()
            .filter(|entry| **entry == Watched::Long { offset })
            .count()
    }

    /// Rewrites every long entry through the given function, dropping entries mapped to `None`.
    pub(crate) fn map_offsets(&mut self, f: impl Fn(ClauseOffset) -> Option<ClauseOffset>) {
        for (code, list) in self.lists.iter_mut().enumerate() {
            list.retain_mut(|entry| match entry {
                Watched::Long { offset } => match f(*offset) {
                    Some(moved) => {
                        *offset = moved;
                        true
                    }
                    None => {
                        log::error!(target: targets::WATCHES, "Dropped dangling {offset} from the list of {}", CLiteral::from_code(code));
                        false
                    }
                },
                _ => true,
            });
        }
    }

    /// Moves each list to the list of the image of its literal, and rewrites the literals of every implicit entry.
    ///
    /// The function must be a bijection on the literals with lists.
    pub(crate) fn map_literals(&mut self, f: impl Fn(CLiteral) -> CLiteral) {
        let mut lists = Vec::default();
        lists.resize_with(self.lists.len(), Vec::default);

        for (code, mut list) in std::mem::take(&mut self.lists).into_iter().enumerate() {
            for entry in list.iter_mut() {
                match entry {
                    Watched::Binary { other, .. } => *other = f(*other),
                    Watched::Ternary { others, .. } => *others = [f(others[0]), f(others[1])],
                    Watched::Long { .. } => {}
                }
            }
            lists[f(CLiteral::from_code(code)).code()] = list;
        }

        self.lists = lists;
    }

    /// Releases excess capacity of every list.
    pub fn shrink_to_fit(&mut self) {
        for list in &mut self.lists {
            list.shrink_to_fit();
        }
        self.lists.shrink_to_fit();
    }

    /// The memory (in bytes) held by the array.
    pub fn mem_used(&self) -> usize {
        let lists = self.lists.capacity() * std::mem::size_of::<Vec<Watched>>();
        let entries: usize = self
            .lists
            .iter()
            .map(|list| list.capacity() * std::mem::size_of::<Watched>())
            .sum();
        lists + entries
    }
}

#[cfg(test)]
mod watch_tests {
    use crate::structures::literal::Literal;

    use super::*;

    #[test]
    fn remove_one_of_duplicates() {
        let mut watches = WatchArray::default();
        watches.resize(3);

        let p = CLiteral::new(0, true);
        let q = CLiteral::new(1, false);
        let entry = Watched::Binary {
            other: q,
            learnt: false,
        };

        watches.push(p, entry);
        watches.push(p, entry);
        assert!(watches.remove(p, &entry).is_ok());
        assert_eq!(watches.list(p), &[entry]);

        assert!(watches.remove(p, &entry).is_ok());
        assert_eq!(
            watches.remove(p, &entry),
            Err(err::ClauseDBError::CorruptList)
        );
    }

    #[test]
    fn restore_keeps_pushed_entries() {
        let mut watches = WatchArray::default();
        watches.resize(2);

        let p = CLiteral::new(0, true);
        let q = CLiteral::new(1, true);
        watches.push(p, Watched::Binary { other: q, learnt: false });

        let taken = watches.take(p);
        watches.push(p, Watched::Binary { other: -q, learnt: true });
        watches.restore(p, taken);

        assert_eq!(watches.list(p).len(), 2);
        assert_eq!(watches.entry_count(), 2);
    }

    #[test]
    fn map_literals_swaps_lists() {
        let mut watches = WatchArray::default();
        watches.resize(2);

        let p = CLiteral::new(0, true);
        let q = CLiteral::new(1, true);
        watches.push(p, Watched::Binary { other: q, learnt: false });
        watches.push(q, Watched::Binary { other: p, learnt: false });

        let swap = |literal: CLiteral| CLiteral::new(1 - literal.atom(), literal.polarity());
        watches.map_literals(swap);

        assert_eq!(watches.list(q), &[Watched::Binary { other: p, learnt: false }]);
        assert_eq!(watches.list(p), &[Watched::Binary { other: q, learnt: false }]);
        assert!(watches.list(-p).is_empty());
    }
}
