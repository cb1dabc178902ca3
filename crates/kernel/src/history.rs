use std::path::Path;

use reckon_common::Calculation;
use reckon_persist::{PersistenceError, load_history, save_history};

use crate::observer::{HistoryEvent, HistoryObserver, ObserverId};
use crate::snapshot::SnapshotStore;

/// Bounded, ordered, undoable log of calculations.
///
/// All mutations are synchronous; observers run in-line before the mutating
/// call returns. Eviction is strictly FIFO from the head once the log exceeds
/// its capacity.
pub struct History {
    items: Vec<Calculation>,
    max_size: usize,
    observers: Vec<(ObserverId, Box<dyn HistoryObserver>)>,
    snapshots: SnapshotStore,
}

impl History {
    /// Create an empty history holding at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            items: Vec::new(),
            max_size,
            observers: Vec::new(),
            snapshots: SnapshotStore::new(),
        }
    }

    /// Register an observer. The returned id detaches exactly this
    /// registration; an observer value cannot be attached twice because
    /// attachment takes ownership.
    pub fn attach(&mut self, observer: Box<dyn HistoryObserver>) -> ObserverId {
        let id = ObserverId::new();
        self.observers.push((id, observer));
        id
    }

    /// Remove the observer registered under `id`. Returns whether anything
    /// was removed; detaching an unknown id is a no-op.
    pub fn detach(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Append a calculation: snapshot the prior state, push, evict from the
    /// head past capacity, then notify.
    pub fn add(&mut self, calculation: Calculation) {
        self.snapshots.save(&self.items);
        let added = calculation.clone();
        self.items.push(calculation);
        self.evict_overflow();
        self.notify(HistoryEvent::CalculationAdded(&added));
    }

    /// A copy of the current sequence. Caller mutation cannot affect the log.
    pub fn list(&self) -> Vec<Calculation> {
        self.items.clone()
    }

    /// Read-only view of the current sequence.
    pub fn items(&self) -> &[Calculation] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn can_undo(&self) -> bool {
        self.snapshots.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.snapshots.can_redo()
    }

    /// Snapshot the current state and empty the log.
    pub fn clear(&mut self) {
        self.snapshots.save(&self.items);
        self.items.clear();
        self.notify(HistoryEvent::Cleared);
    }

    /// Restore the previous snapshot. Returns whether state changed; the
    /// event fires either way.
    pub fn undo(&mut self) -> bool {
        let changed = match self.snapshots.undo(&self.items) {
            Some(previous) => {
                self.items = previous;
                true
            }
            None => false,
        };
        self.notify(HistoryEvent::Undo);
        changed
    }

    /// Re-apply the most recently undone snapshot. Returns whether state
    /// changed; the event fires either way.
    pub fn redo(&mut self) -> bool {
        let changed = match self.snapshots.redo(&self.items) {
            Some(next) => {
                self.items = next;
                true
            }
            None => false,
        };
        self.notify(HistoryEvent::Redo);
        changed
    }

    /// Write every entry in order to the history file at `path`.
    pub fn save(&mut self, path: &Path) -> Result<(), PersistenceError> {
        save_history(path, &self.items)?;
        self.notify(HistoryEvent::Saved(path));
        Ok(())
    }

    /// Replace the log with the records at `path`, snapshotting the current
    /// state first so the load can be undone. The loaded sequence is subject
    /// to the same capacity bound as everything else.
    pub fn load(&mut self, path: &Path) -> Result<(), PersistenceError> {
        let items = load_history(path)?;
        self.snapshots.save(&self.items);
        self.items = items;
        self.evict_overflow();
        self.notify(HistoryEvent::Loaded(path));
        Ok(())
    }

    fn evict_overflow(&mut self) {
        if self.items.len() > self.max_size {
            let excess = self.items.len() - self.max_size;
            self.items.drain(..excess);
        }
    }

    /// One notification cycle: every observer sees the event and the
    /// post-mutation sequence. A failing observer is warned about and
    /// skipped; it never aborts the cycle or the mutation.
    fn notify(&mut self, event: HistoryEvent<'_>) {
        let items = &self.items;
        for (id, observer) in self.observers.iter_mut() {
            if let Err(err) = observer.on_event(event, items) {
                tracing::warn!(observer = ?id, event = event.name(), %err, "observer failed");
            }
        }
    }
}
