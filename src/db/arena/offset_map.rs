use super::ClauseOffset;

/// A map from the offsets of records before a compaction to the offsets of the same records after the compaction.
///
/// Compaction preserves the order of records, so pairs are pushed in increasing order of both old and new offset, and lookup is a binary search.
/// Offsets of removed records have no image.
#[derive(Clone, Debug, Default)]
pub struct OffsetMap {
    pairs: Vec<(ClauseOffset, ClauseOffset)>,
}

impl OffsetMap {
    pub(super) fn push(&mut self, old: ClauseOffset, new: ClauseOffset) {
        debug_assert!(self.pairs.last().map_or(true, |(last, _)| *last < old));
        self.pairs.push((old, new))
    }

    /// The offset after compaction of the record at the given offset before compaction, if the record survived.
    pub fn get(&self, old: ClauseOffset) -> Option<ClauseOffset> {
        self.pairs
            .binary_search_by_key(&old, |(from, _)| *from)
            .ok()
            .map(|index| self.pairs[index].1)
    }

    /// A count of surviving records.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// An iterator over (old, new) pairs, in offset order.
    pub fn iter(&self) -> impl Iterator<Item = (ClauseOffset, ClauseOffset)> + '_ {
        self.pairs.iter().copied()
    }
}
