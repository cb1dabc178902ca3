//! Persistence for calculation history: a delimited text file with a header
//! row, one record per line.
//!
//! # Invariants
//! - Saving then loading reproduces an equal sequence of records.
//! - Loading never partially applies: a malformed record fails the whole load.

pub mod codec;

pub use codec::{PersistenceError, load_history, save_history};
