/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

As a rough guide:
- `info` summarises a pass over the database (a reduction, a consolidation, a renumbering, etc.)
- `trace` notes an event for a single clause.
- `error` diagnoses a failed verification or a broken invariant, naming the clause, offset, or literal involved.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [arena](crate::db::arena)
    pub const ARENA: &str = "arena";

    /// Logs related to the [clause database](crate::context::Context), e.g. adding clauses
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to [preprocessing](crate::preprocessing)
    pub const PREPROCESSING: &str = "preprocessing";

    /// Logs related to [BCP](crate::procedures::bcp)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to clause deletion
    pub const REDUCTION: &str = "reduction";

    /// Logs related to [renumbering](crate::procedures::renumber)
    pub const RENUMBER: &str = "renumber";

    /// Logs related to subsumption
    pub const SUBSUMPTION: &str = "subsumption";

    /// Logs related to [verification](crate::procedures::verify)
    pub const VERIFY: &str = "verify";

    /// Logs related to the [watch array](crate::db::watches)
    pub const WATCHES: &str = "watches";
}
