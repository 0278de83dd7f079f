/*!
Compact storage for long clauses (of four or more literals).

# Overview

The arena is a single growable buffer of `u32` words, and each long clause is a *record* within the buffer, addressed by its [ClauseOffset] (the position of the first word of the record).

A record is a fixed header of four words, followed by the (codes of the) literals of the clause:

| word | content |
|------|---------|
| 0 | size, with the most significant bit set as a marker |
| 1 | flags (learnt, removed) and glue |
| 2 | count of propagations |
| 3 | count of conflicts |
| 4.. | literals |

The only words in the buffer with the most significant bit set are the size words of records.
So, the marker is used both to check an offset given to the arena is the offset of some record, and to find the next record when iterating over the buffer.
Literal codes never set the most significant bit, as atoms are bounded by [ATOM_MAX](crate::structures::atom::ATOM_MAX), and counters saturate below the bit.

# Removal and compaction

Removing a clause only sets the removed flag of the record.
The literals of a removed record remain readable until the next compaction, which is useful for diagnostics.

A [compaction](ClauseArena::compact) moves every live record towards the front of the buffer, preserving the order of records, and returns an [OffsetMap] from old offsets to new offsets.
Every offset held outside the arena is invalid after a compaction, and must be rewritten through the map.
See [consolidate_memory](crate::context::Context::consolidate_memory) for the rewrite of the offsets held by a context.

```rust
# use clause_core::db::arena::{ClauseArena, ClauseStats};
# use clause_core::structures::literal::{CLiteral, Literal};
let mut arena = ClauseArena::default();
let clause = |from: u32| (from..from + 4).map(|a| CLiteral::new(a, true)).collect::<Vec<_>>();

let first = arena.allocate(&clause(0), false, ClauseStats::default()).unwrap();
let second = arena.allocate(&clause(10), true, ClauseStats::default()).unwrap();

arena.remove(first).unwrap();
let map = arena.compact();

let moved = map.get(second).unwrap();
assert_eq!(arena.literals(moved).unwrap(), clause(10).as_slice());
assert!(map.get(first).is_none());
```

Shrinking a clause (e.g. when dropping literals false at level zero) leaves padding words without the marker between records, which are reclaimed by compaction.
*/

mod offset_map;
pub use offset_map::OffsetMap;

use crate::{
    config::LBD,
    misc::log::targets::{self},
    structures::literal::CLiteral,
    types::err::{self},
};

/// A word of the arena.
pub type ArenaWord = u32;

const MARKER: ArenaWord = 1 << (ArenaWord::BITS - 1);

const MASK: ArenaWord = !MARKER;

/// The count of header words preceding the literals of a record.
pub const HEADER_LEN: usize = 4;

const SIZE_WORD: usize = 0;
const FLAG_WORD: usize = 1;
const PROPAGATION_WORD: usize = 2;
const CONFLICT_WORD: usize = 3;

const LEARNT_BIT: ArenaWord = 1;
const REMOVED_BIT: ArenaWord = 1 << 1;
const GLUE_SHIFT: u32 = 8;

/// The offset of a record in the arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ClauseOffset(u32);

impl ClauseOffset {
    /// The offset as an index into the words of the arena.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ClauseOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Statistics kept in the header of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClauseStats {
    /// The glue (LBD) of the clause, when learnt.
    pub glue: LBD,

    /// A count of the propagations the clause has been the reason for.
    pub propagations: u32,

    /// A count of the conflicts the clause has been part of.
    pub conflicts: u32,
}

impl ClauseStats {
    /// Statistics for a clause with the given glue and no recorded usage.
    pub fn with_glue(glue: LBD) -> Self {
        ClauseStats {
            glue,
            ..Default::default()
        }
    }
}

/// The header of a record, read from the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClauseHeader {
    pub size: usize,
    pub learnt: bool,
    pub removed: bool,
    pub stats: ClauseStats,
}

/// Compact storage for many clauses of varying length.
#[derive(Default)]
pub struct ClauseArena {
    /// The buffer of records.
    buffer: Vec<ArenaWord>,

    /// A count of words in the buffer belonging to removed records or padding.
    garbage: usize,

    /// A count of records which have not been removed.
    live: usize,
}

impl ClauseArena {
    /// Allocates a record for the given literals, returning the offset of the record.
    pub fn allocate(
        &mut self,
        literals: &[CLiteral],
        learnt: bool,
        stats: ClauseStats,
    ) -> Result<ClauseOffset, err::ArenaError> {
        let offset = self.buffer.len();
        let grow = HEADER_LEN + literals.len();

        if literals.len() > MASK as usize || offset + grow > MASK as usize {
            log::error!(target: targets::ARENA, "Arena exhausted at {offset} words");
            return Err(err::ArenaError::StorageExhausted);
        }

        self.buffer.reserve(grow);
        self.buffer.push(literals.len() as ArenaWord | MARKER);
        self.buffer.push(flag_word(learnt, false, stats.glue));
        self.buffer.push(stats.propagations.min(MASK));
        self.buffer.push(stats.conflicts.min(MASK));
        self.buffer.extend(literals.iter().map(|literal| literal.raw()));

        self.live += 1;
        Ok(ClauseOffset(offset as u32))
    }

    /// Whether the offset is the offset of some record (removed or otherwise).
    pub fn is_record(&self, offset: ClauseOffset) -> bool {
        self.buffer
            .get(offset.index())
            .is_some_and(|word| word & MARKER != 0)
    }

    fn checked(&self, offset: ClauseOffset) -> Result<usize, err::ArenaError> {
        match self.is_record(offset) {
            true => Ok(offset.index()),
            false => {
                log::error!(target: targets::ARENA, "No record at {offset}");
                Err(err::ArenaError::InvalidOffset)
            }
        }
    }

    /// The header of the record at the offset.
    pub fn header(&self, offset: ClauseOffset) -> Result<ClauseHeader, err::ArenaError> {
        let index = self.checked(offset)?;
        let flags = self.buffer[index + FLAG_WORD];
        Ok(ClauseHeader {
            size: (self.buffer[index + SIZE_WORD] & MASK) as usize,
            learnt: flags & LEARNT_BIT != 0,
            removed: flags & REMOVED_BIT != 0,
            stats: ClauseStats {
                glue: (flags >> GLUE_SHIFT) as LBD,
                propagations: self.buffer[index + PROPAGATION_WORD],
                conflicts: self.buffer[index + CONFLICT_WORD],
            },
        })
    }

    /// The literals of the record at the offset.
    pub fn literals(&self, offset: ClauseOffset) -> Result<&[CLiteral], err::ArenaError> {
        self.checked(offset)?;
        Ok(unsafe { self.literals_unchecked(offset) })
    }

    /// The literals of the record at the offset.
    ///
    /// # Safety
    /// The offset must be the offset of some record.
    pub unsafe fn literals_unchecked(&self, offset: ClauseOffset) -> &[CLiteral] {
        let index = offset.index();
        let size = (*self.buffer.get_unchecked(index + SIZE_WORD) & MASK) as usize;
        let start = self.buffer.as_ptr().add(index + HEADER_LEN);
        // CLiteral is a transparent wrapper around the words stored.
        std::slice::from_raw_parts(start as *const CLiteral, size)
    }

    /// The literals of the record at the offset, mutably.
    ///
    /// Literals may be reordered, but replacing a literal with a literal of a different atom requires the clause to be detached.
    pub fn literals_mut(&mut self, offset: ClauseOffset) -> Result<&mut [CLiteral], err::ArenaError> {
        self.checked(offset)?;
        Ok(unsafe { self.literals_unchecked_mut(offset) })
    }

    /// The literals of the record at the offset, mutably.
    ///
    /// # Safety
    /// The offset must be the offset of some record.
    pub unsafe fn literals_unchecked_mut(&mut self, offset: ClauseOffset) -> &mut [CLiteral] {
        let index = offset.index();
        let size = (*self.buffer.get_unchecked(index + SIZE_WORD) & MASK) as usize;
        let start = self.buffer.as_mut_ptr().add(index + HEADER_LEN);
        std::slice::from_raw_parts_mut(start as *mut CLiteral, size)
    }

    /// The size of the clause at the offset.
    pub fn size(&self, offset: ClauseOffset) -> Result<usize, err::ArenaError> {
        let index = self.checked(offset)?;
        Ok((self.buffer[index + SIZE_WORD] & MASK) as usize)
    }

    /// Whether the clause at the offset is learnt.
    pub fn is_learnt(&self, offset: ClauseOffset) -> Result<bool, err::ArenaError> {
        let index = self.checked(offset)?;
        Ok(self.buffer[index + FLAG_WORD] & LEARNT_BIT != 0)
    }

    /// Whether the clause at the offset has been removed.
    pub fn is_removed(&self, offset: ClauseOffset) -> Result<bool, err::ArenaError> {
        let index = self.checked(offset)?;
        Ok(self.buffer[index + FLAG_WORD] & REMOVED_BIT != 0)
    }

    /// Marks the clause at the offset as removed.
    ///
    /// The record remains readable until the next compaction.
    pub fn remove(&mut self, offset: ClauseOffset) -> Result<(), err::ArenaError> {
        let index = self.checked(offset)?;
        if self.buffer[index + FLAG_WORD] & REMOVED_BIT != 0 {
            return Ok(());
        }
        self.buffer[index + FLAG_WORD] |= REMOVED_BIT;
        self.garbage += HEADER_LEN + (self.buffer[index + SIZE_WORD] & MASK) as usize;
        self.live -= 1;
        log::trace!(target: targets::ARENA, "Removed {offset}");
        Ok(())
    }

    /// Increments the count of propagations of the clause at the offset.
    pub fn bump_propagations(&mut self, offset: ClauseOffset) -> Result<(), err::ArenaError> {
        let index = self.checked(offset)?;
        let word = &mut self.buffer[index + PROPAGATION_WORD];
        *word = (*word + 1).min(MASK);
        Ok(())
    }

    /// Increments the count of conflicts of the clause at the offset.
    pub fn bump_conflicts(&mut self, offset: ClauseOffset) -> Result<(), err::ArenaError> {
        let index = self.checked(offset)?;
        let word = &mut self.buffer[index + CONFLICT_WORD];
        *word = (*word + 1).min(MASK);
        Ok(())
    }

    /// Resets the counts of propagations and conflicts of the clause at the offset.
    pub fn reset_usage(&mut self, offset: ClauseOffset) -> Result<(), err::ArenaError> {
        let index = self.checked(offset)?;
        self.buffer[index + PROPAGATION_WORD] = 0;
        self.buffer[index + CONFLICT_WORD] = 0;
        Ok(())
    }

    /// Shrinks the clause at the offset to its first `size` literals.
    ///
    /// The clause must be detached, and the trailing words become padding until the next compaction.
    pub fn shrink(&mut self, offset: ClauseOffset, size: usize) -> Result<(), err::ArenaError> {
        let index = self.checked(offset)?;
        let old_size = (self.buffer[index + SIZE_WORD] & MASK) as usize;
        if size >= old_size {
            return Ok(());
        }
        let start = index + HEADER_LEN;
        self.buffer[start + size..start + old_size].fill(0);
        self.buffer[index + SIZE_WORD] = size as ArenaWord | MARKER;
        self.garbage += old_size - size;
        Ok(())
    }

    /// The offset of the first record at or after the given word.
    fn find_record(&self, mut index: usize) -> Option<ClauseOffset> {
        while let Some(word) = self.buffer.get(index) {
            if word & MARKER != 0 {
                return Some(ClauseOffset(index as u32));
            }
            index += 1;
        }
        None
    }

    /// The offset of the record following the record at the given offset.
    fn next_record(&self, offset: ClauseOffset) -> Option<ClauseOffset> {
        let index = offset.index();
        let size = (self.buffer[index + SIZE_WORD] & MASK) as usize;
        self.find_record(index + HEADER_LEN + size)
    }

    /// An iterator over the offsets of every record which has not been removed, in offset order.
    pub fn offsets(&self) -> impl Iterator<Item = ClauseOffset> + '_ {
        std::iter::successors(self.find_record(0), |offset| self.next_record(*offset))
            .filter(|offset| self.buffer[offset.index() + FLAG_WORD] & REMOVED_BIT == 0)
    }

    /// Moves every live record towards the front of the buffer, returning a map from old to new offsets.
    ///
    /// Every offset held outside of the arena must be rewritten through the map.
    pub fn compact(&mut self) -> OffsetMap {
        let mut map = OffsetMap::default();
        let mut write = 0;
        let mut read = self.find_record(0);

        while let Some(offset) = read {
            let index = offset.index();
            let size = (self.buffer[index + SIZE_WORD] & MASK) as usize;
            let removed = self.buffer[index + FLAG_WORD] & REMOVED_BIT != 0;
            read = self.find_record(index + HEADER_LEN + size);

            if removed {
                continue;
            }

            let length = HEADER_LEN + size;
            self.buffer.copy_within(index..index + length, write);
            map.push(offset, ClauseOffset(write as u32));
            write += length;
        }

        let reclaimed = self.buffer.len() - write;
        self.buffer.truncate(write);
        self.garbage = 0;

        log::info!(target: targets::ARENA, "Compaction reclaimed {reclaimed} words, {} records kept", map.len());
        map
    }

    /// Applies a function to every literal of every record, removed or otherwise.
    pub(crate) fn map_literals(&mut self, f: impl Fn(CLiteral) -> CLiteral) {
        let mut read = self.find_record(0);
        while let Some(offset) = read {
            for literal in unsafe { self.literals_unchecked_mut(offset) } {
                *literal = f(*literal);
            }
            read = self.next_record(offset);
        }
    }

    /// A count of records which have not been removed.
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// A count of words belonging to removed records or padding.
    pub fn garbage_words(&self) -> usize {
        self.garbage
    }

    /// A count of all words in the buffer.
    pub fn word_count(&self) -> usize {
        self.buffer.len()
    }

    /// The memory (in bytes) held by the arena.
    pub fn mem_used(&self) -> usize {
        self.buffer.capacity() * std::mem::size_of::<ArenaWord>()
    }
}

fn flag_word(learnt: bool, removed: bool, glue: LBD) -> ArenaWord {
    let mut word = (glue as ArenaWord) << GLUE_SHIFT;
    if learnt {
        word |= LEARNT_BIT;
    }
    if removed {
        word |= REMOVED_BIT;
    }
    word
}

#[cfg(test)]
mod arena_tests {
    use crate::structures::literal::Literal;

    use super::*;

    fn clause(atoms: &[u32]) -> Vec<CLiteral> {
        atoms
            .iter()
            .map(|atom| CLiteral::new(*atom, atom % 2 == 0))
            .collect()
    }

    #[test]
    fn allocate_and_read() {
        let mut arena = ClauseArena::default();
        let literals = clause(&[1, 2, 3, 4, 5]);
        let offset = arena
            .allocate(&literals, true, ClauseStats::with_glue(3))
            .unwrap();

        let header = arena.header(offset).unwrap();
        assert_eq!(header.size, 5);
        assert!(header.learnt);
        assert!(!header.removed);
        assert_eq!(header.stats.glue, 3);
        assert_eq!(arena.literals(offset).unwrap(), literals.as_slice());
    }

    #[test]
    fn invalid_offset() {
        let mut arena = ClauseArena::default();
        let offset = arena
            .allocate(&clause(&[1, 2, 3, 4]), false, ClauseStats::default())
            .unwrap();
        let inner = ClauseOffset(offset.0 + 2);

        assert_eq!(arena.literals(inner), Err(err::ArenaError::InvalidOffset));
        assert_eq!(
            arena.header(ClauseOffset(900)),
            Err(err::ArenaError::InvalidOffset)
        );
    }

    #[test]
    fn compaction_preserves_content() {
        let mut arena = ClauseArena::default();
        let mut offsets = Vec::default();
        for start in 0..10 {
            let literals = clause(&[start, start + 1, start + 2, start + 3]);
            let stats = ClauseStats {
                glue: start as LBD,
                propagations: start * 2,
                conflicts: start,
            };
            offsets.push(arena.allocate(&literals, start % 2 == 1, stats).unwrap());
        }

        for offset in offsets.iter().step_by(3) {
            arena.remove(*offset).unwrap();
        }
        let before = offsets
            .iter()
            .map(|offset| {
                (
                    arena.header(*offset).unwrap(),
                    arena.literals(*offset).unwrap().to_vec(),
                )
            })
            .collect::<Vec<_>>();

        let map = arena.compact();
        assert_eq!(map.len(), 6);
        assert_eq!(arena.garbage_words(), 0);
        assert_eq!(arena.live_count(), 6);

        for (offset, (header, literals)) in offsets.iter().zip(before) {
            match map.get(*offset) {
                None => assert!(header.removed),
                Some(moved) => {
                    assert_eq!(arena.header(moved).unwrap(), header);
                    assert_eq!(arena.literals(moved).unwrap(), literals.as_slice());
                }
            }
        }
    }

    #[test]
    fn shrink_leaves_iterable_padding() {
        let mut arena = ClauseArena::default();
        let a = arena
            .allocate(&clause(&[1, 2, 3, 4, 5, 6]), false, ClauseStats::default())
            .unwrap();
        let b = arena
            .allocate(&clause(&[7, 8, 9, 10]), false, ClauseStats::default())
            .unwrap();

        arena.shrink(a, 4).unwrap();
        assert_eq!(arena.offsets().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(arena.garbage_words(), 2);

        let map = arena.compact();
        let b_moved = map.get(b).unwrap();
        assert_eq!(b_moved.index(), HEADER_LEN + 4);
        assert_eq!(arena.literals(b_moved).unwrap(), clause(&[7, 8, 9, 10]).as_slice());
    }

    #[test]
    fn counters_saturate() {
        let mut arena = ClauseArena::default();
        let stats = ClauseStats {
            glue: 2,
            propagations: MASK,
            conflicts: 0,
        };
        let offset = arena.allocate(&clause(&[1, 2, 3, 4]), true, stats).unwrap();
        arena.bump_propagations(offset).unwrap();

        assert_eq!(arena.header(offset).unwrap().stats.propagations, MASK);
        assert!(arena.is_record(offset));
    }
}
