//! History kernel: the bounded, ordered, undoable log of calculations.
//!
//! # Invariants
//! - The log never exceeds its capacity after any mutating operation.
//! - Every mutating operation runs exactly one observer notification cycle.
//! - Observer failures are contained at the notification boundary and never
//!   reach History callers.

pub mod history;
pub mod observer;
pub mod snapshot;

pub use history::History;
pub use observer::{HistoryEvent, HistoryObserver, ObserverError, ObserverId};
pub use snapshot::SnapshotStore;
