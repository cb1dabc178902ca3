use reckon_common::Calculation;

/// An independent full copy of the history sequence at one point in time.
///
/// Mementos never alias the live sequence; restoring one hands back an owned
/// state.
#[derive(Debug, Clone, PartialEq)]
pub struct Memento {
    state: Vec<Calculation>,
}

impl Memento {
    fn capture(state: &[Calculation]) -> Self {
        Self {
            state: state.to_vec(),
        }
    }

    fn into_state(self) -> Vec<Calculation> {
        self.state
    }
}

/// Caretaker holding full-state snapshots on two stacks for undo/redo.
///
/// Snapshots copy the whole sequence, which is O(n) per save. At calculator
/// history sizes this is the simplest structure that keeps the undo/redo
/// round-trip exact.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    undo: Vec<Memento>,
    redo: Vec<Memento>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a copy of `state` onto the undo stack. Any redo path branches off
    /// here and is invalidated.
    pub fn save(&mut self, state: &[Calculation]) {
        self.undo.push(Memento::capture(state));
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Pop the previous state, filing `current` for redo.
    ///
    /// Returns `None` when there is nothing to undo; the caller keeps its
    /// current state in that case.
    pub fn undo(&mut self, current: &[Calculation]) -> Option<Vec<Calculation>> {
        let memento = self.undo.pop()?;
        self.redo.push(Memento::capture(current));
        Some(memento.into_state())
    }

    /// Pop the next state, filing `current` for undo. Symmetric to
    /// [`SnapshotStore::undo`].
    pub fn redo(&mut self, current: &[Calculation]) -> Option<Vec<Calculation>> {
        let memento = self.redo.pop()?;
        self.undo.push(Memento::capture(current));
        Some(memento.into_state())
    }
}
