use std::path::Path;

use reckon_common::Calculation;
use uuid::Uuid;

/// Handle returned by [`crate::History::attach`], used to detach later.
///
/// Each attachment gets a fresh id, so detaching one observer never affects
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl ObserverId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// A mutation event emitted by [`crate::History`].
///
/// Undo and redo fire even when the corresponding stack was empty and no
/// state changed; subscribers that care can compare the sequence they are
/// handed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HistoryEvent<'a> {
    /// A calculation was appended to the log.
    CalculationAdded(&'a Calculation),
    /// The log was emptied.
    Cleared,
    /// One undo step was applied.
    Undo,
    /// One redo step was applied.
    Redo,
    /// The log was written to this path.
    Saved(&'a Path),
    /// The log was replaced from this path.
    Loaded(&'a Path),
}

impl HistoryEvent<'_> {
    /// Stable tag for log lines and dispatch tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CalculationAdded(_) => "calculation_added",
            Self::Cleared => "cleared",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Saved(_) => "saved",
            Self::Loaded(_) => "loaded",
        }
    }
}

/// Failure an observer may report. Discarded at the notification boundary
/// after a warning; history integrity never depends on observer correctness.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Subscriber notified synchronously after every history mutation.
///
/// `items` is the post-mutation sequence, so subscribers that persist or
/// mirror the log need no callback into [`crate::History`].
pub trait HistoryObserver {
    fn on_event(
        &mut self,
        event: HistoryEvent<'_>,
        items: &[Calculation],
    ) -> Result<(), ObserverError>;
}
