/// Counts for various things which count, roughly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
    /// A count of reductions of the redundant clauses.
    pub reductions: usize,

    /// A count of full reductions.
    pub full_reductions: usize,

    /// A count of redundant long clauses removed by reductions.
    pub reduced_clauses: usize,

    /// A count of binary clauses removed as duplicates.
    pub subsumed_binaries: usize,

    /// A count of ternary clauses removed as duplicates, or as subsumed by a binary clause.
    pub subsumed_ternaries: usize,

    /// A count of ternary clauses strengthened to binary clauses.
    pub strengthened_ternaries: usize,

    /// A count of binary clauses added since the count was last cleared.
    ///
    /// Equivalence detection is worthwhile only when new binary clauses have been added, and may clear the count after each pass.
    pub new_binaries_since_scc: usize,

    /// A count of consolidations of the arena.
    pub consolidations: usize,

    /// A count of renumberings of atoms.
    pub renumberings: usize,

    /// A count of assignments made by propagation.
    pub propagations: usize,

    /// A count of conflicts found by propagation.
    pub conflicts: usize,

    /// A count of decisions recorded.
    pub decisions: usize,
}
