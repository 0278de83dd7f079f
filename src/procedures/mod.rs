//! Various procedures for mutating a context.
//!
//! For the most part these are methods accessed via a context, and primarily placed here for documentation.

pub mod add;
pub mod attach;
pub mod bcp;
pub mod check;
pub mod consolidate;
pub mod reduce;
pub mod renumber;
pub mod subsume;
pub mod verify;
