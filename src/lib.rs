//! The clause storage and propagation support of a conflict-driven clause-learning solver.
//!
//! clause_core holds the clauses of a formula, and of clauses learnt from the formula, in a form suited to unit propagation, and maintains the clauses as the clause database grows and shrinks.
//! The search loop of a solver (decisions, conflict analysis, restarts) is not part of the library, and is instead a caller of the library.
//!
//! # Orientation
//!
//! The library is designed around the core structure of a [context].
//!
//! A context owns a handful of databases:
//! - An [arena](db::arena) holding clauses of four or more literals, addressed by offset.
//! - A [watch array](db::watches) holding, for each literal, the clauses in which the literal is watched.
//!   Binary and ternary clauses are stored inline within the watch array.
//! - An [atom database](db::atom) holding the valuation, the trail of assignments, and the numbering of atoms.
//! - A [catalog](db::catalog) of units and long clauses, with running counts of clauses and literals.
//!
//! Clauses are added to a context [programatically](crate::context::Context::add_clause), and the remaining operations are factored into [procedures]:
//! - [Attachment](procedures::attach) and [propagation](procedures::bcp), for a search loop.
//! - [Reduction](procedures::reduce) of redundant clauses, and [consolidation](procedures::consolidate) of the arena.
//! - [Subsumption](procedures::subsume) of binary and ternary clauses.
//! - [Renumbering](procedures::renumber) of atoms.
//! - [Verification](procedures::verify) of a model, and [checks](procedures::check) of invariants.
//!
//! Collaborators which restructure the clause database are given an [AttachmentPort](context::AttachmentPort), see [preprocessing].
//!
//! # Example
//!
//! ```rust
//! # use clause_core::context::Context;
//! # use clause_core::db::arena::ClauseStats;
//! let mut the_context = Context::default();
//! let literals = the_context.fresh_or_max_literals(6);
//!
//! for window in literals.windows(4) {
//!     assert!(the_context.add_clause(window.to_vec()).is_ok());
//! }
//! assert!(the_context.add_learnt_clause(vec![-literals[0], literals[5]], ClauseStats::with_glue(2)).is_ok());
//!
//! assert!(the_context.add_clause(literals[0]).is_ok());
//! assert!(the_context.propagate().is_ok());
//! assert_eq!(the_context.model_value(literals[5]), Some(true));
//!
//! assert!(the_context.full_reduce().is_ok());
//! assert!(the_context.check_all().is_ok());
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, under the targets listed in [misc::log].
//! No logger is installed by the library.
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//!
//! ```sh
//! RUST_LOG=reduction=info,subsumption=trace cargo test
//! ```

pub mod config;
pub mod context;
pub mod db;
pub mod misc;
pub mod preprocessing;
pub mod procedures;
pub mod reports;
pub mod structures;
pub mod types;
