/*!
The context --- to which clauses are added, and which owns every database.

A [Context] exclusively owns the [arena](crate::db::arena), the [watch array](crate::db::watches), the [atom database](crate::db::atom), and the [catalog](crate::db::catalog).
The databases are readable through accessors, and mutated only through the [procedures](crate::procedures) of a context, which maintain the invariants relating the databases.

Collaborators which restructure the clause database (e.g. a [cleaner](crate::preprocessing::clean)) are given a narrower capability, the [AttachmentPort], rather than the context.

# Example
```rust
# use clause_core::context::Context;
# use clause_core::config::Config;
# use clause_core::procedures::add::ClauseOk;
# use clause_core::structures::literal::{CLiteral, Literal};
let mut the_context = Context::from_config(Config::default());

let p = the_context.fresh_or_max_literal();
let q = the_context.fresh_or_max_literal();

assert!(matches!(the_context.add_clause(vec![p, q]), Ok(ClauseOk::Added(_))));
assert!(the_context.add_clause(-p).is_ok());
assert!(the_context.propagate().is_ok());

assert_eq!(the_context.model_value(p), Some(false));
assert_eq!(the_context.model_value(q), Some(true));
assert!(the_context.verify_model());
```
*/

mod counters;
pub use counters::Counters;

mod port;
pub use port::AttachmentPort;

use crate::{
    config::Config,
    db::{arena::ClauseArena, atom::AtomDB, catalog::ClauseCatalog, watches::WatchArray},
    structures::{
        atom::Atom,
        literal::{CLiteral, Literal},
        valuation::CValuation,
    },
    types::err::{self},
};

/// The state of a context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextState {
    /// The context allows input, and the database is not known to be unsatisfiable.
    Input,

    /// The database is known to be unsatisfiable, e.g. with some clause reduced to the empty clause.
    Unsatisfiable,
}

impl std::fmt::Display for ContextState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "Input"),
            Self::Unsatisfiable => write!(f, "Unsatisfiable"),
        }
    }
}

/// A context.
pub struct Context {
    /// The configuration of the context.
    pub config: Config,

    /// Counters of passes over the databases.
    pub counters: Counters,

    pub(crate) atom_db: AtomDB,

    pub(crate) watches: WatchArray,

    pub(crate) arena: ClauseArena,

    pub(crate) catalog: ClauseCatalog,

    pub(crate) state: ContextState,

    /// A count of redundant long clauses which, when exceeded, permits a reduction.
    pub(crate) next_clean_limit: usize,

    /// The increase of the clean limit after the next reduction.
    pub(crate) next_clean_increment: usize,

    interrupt: bool,
}

impl Context {
    /// A context with the given configuration.
    pub fn from_config(config: Config) -> Self {
        let clean_limit = config.clause_db.clean_limit_start.value;
        Context {
            config,
            counters: Counters::default(),
            atom_db: AtomDB::default(),
            watches: WatchArray::default(),
            arena: ClauseArena::default(),
            catalog: ClauseCatalog::default(),
            state: ContextState::Input,
            next_clean_limit: clean_limit,
            next_clean_increment: clean_limit,
            interrupt: false,
        }
    }

    /// The state of the context.
    pub fn state(&self) -> ContextState {
        self.state
    }

    pub fn atom_db(&self) -> &AtomDB {
        &self.atom_db
    }

    /// The watch array, for propagation by a search loop.
    pub fn watches(&self) -> &WatchArray {
        &self.watches
    }

    pub fn arena(&self) -> &ClauseArena {
        &self.arena
    }

    pub fn catalog(&self) -> &ClauseCatalog {
        &self.catalog
    }

    /// A count of long clauses, irredundant and redundant.
    pub fn long_clause_count(&self) -> usize {
        self.catalog.long_count()
    }

    /// The count of redundant long clauses which, when exceeded, permits a [reduction](crate::procedures::reduce).
    pub fn next_clean_limit(&self) -> usize {
        self.next_clean_limit
    }

    /// Requests the search loop stop at the next opportunity.
    pub fn interrupt(&mut self) {
        self.interrupt = true;
    }

    /// Whether an interrupt has been requested since the last [clear](Context::clear_interrupt).
    pub fn interrupt_requested(&self) -> bool {
        self.interrupt
    }

    pub fn clear_interrupt(&mut self) {
        self.interrupt = false;
    }

    /// A fresh atom, in the outer numbering.
    pub fn fresh_atom(&mut self) -> Result<Atom, err::AtomDBError> {
        let atom = self.atom_db.fresh_atom()?;
        self.watches.resize(self.atom_db.count());
        Ok(atom)
    }

    /// A fresh atom, or the maximum atom if no fresh atom is available.
    pub fn fresh_or_max_atom(&mut self) -> Atom {
        match self.fresh_atom() {
            Ok(atom) => atom,
            Err(err::AtomDBError::AtomsExhausted) => {
                let count = self.atom_db.count() as Atom;
                count.saturating_sub(1)
            }
        }
    }

    /// The positive literal of a fresh atom, or of the maximum atom if no fresh atom is available.
    pub fn fresh_or_max_literal(&mut self) -> CLiteral {
        CLiteral::new(self.fresh_or_max_atom(), true)
    }

    /// The positive literals of `count` fresh atoms.
    pub fn fresh_or_max_literals(&mut self, count: usize) -> Vec<CLiteral> {
        (0..count).map(|_| self.fresh_or_max_literal()).collect()
    }

    /// Marks an outer atom as removed (e.g. by elimination), so the atom is inactive for [renumbering](crate::procedures::renumber).
    pub fn mark_removed_atom(&mut self, outer: Atom) {
        if let Some(inner) = self.atom_db.to_inner_atom(outer) {
            self.atom_db.mark_removed(inner);
        }
    }

    /// The value of an outer literal under the current valuation.
    pub fn model_value(&self, outer: CLiteral) -> Option<bool> {
        let inner = self.atom_db.to_inner(outer)?;
        self.atom_db.literal_value(inner)
    }

    /// The current valuation, indexed by outer atoms.
    pub fn model(&self) -> CValuation {
        (0..self.atom_db.count() as Atom)
            .map(|outer| {
                self.atom_db
                    .to_inner_atom(outer)
                    .and_then(|inner| self.atom_db.value_of(inner))
            })
            .collect()
    }

    /// The current valuation indexed by outer atoms, if verification is disabled or the valuation satisfies every stored clause.
    pub fn checked_model(&self) -> Option<CValuation> {
        if self.config.verify_model.value && !self.verify_model() {
            return None;
        }
        Some(self.model())
    }

    /// The memory (in bytes) held by the databases of the context.
    pub fn mem_used(&self) -> usize {
        self.arena.mem_used()
            + self.watches.mem_used()
            + self.atom_db.mem_used()
            + self.catalog.mem_used()
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::from_config(Config::default())
    }
}
