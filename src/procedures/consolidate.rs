/*!
Consolidation of the arena, and the rewrite of every offset held by a context.

A [compaction](crate::db::arena::ClauseArena::compact) of the arena invalidates every offset held outside the arena.
So, consolidation compacts the arena and then rewrites each offset held by the context through the returned map:
- Each long entry of the watch array.
- Each offset in the catalog.
- Each reason of an atom which is a long clause.

An offset without an image is of a removed record, and is dropped (from the watch array or catalog) with an error logged, as no held offset should be of a removed record.
*/

use crate::{context::Context, misc::log::targets::{self}};

impl Context {
    /// Compacts the arena, and rewrites every offset held by the context.
    pub fn consolidate_memory(&mut self) {
        let before = self.arena.word_count();
        let map = self.arena.compact();

        self.watches.map_offsets(|offset| map.get(offset));

        for redundant in [false, true] {
            self.catalog.long_mut(redundant).retain_mut(|offset| match map.get(*offset) {
                Some(moved) => {
                    *offset = moved;
                    true
                }
                None => {
                    log::error!(target: targets::ARENA, "Dropped catalogued clause {offset}");
                    false
                }
            });
        }

        self.atom_db.map_reason_offsets(|offset| map.get(offset));

        self.watches.shrink_to_fit();
        self.counters.consolidations += 1;

        log::info!(target: targets::ARENA, "Consolidated the arena from {before} to {} words", self.arena.word_count());

        #[cfg(debug_assertions)]
        self.assert_all();
    }
}
