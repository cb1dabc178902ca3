use proptest::prelude::*;

use reckon_common::Calculation;
use reckon_kernel::{History, HistoryEvent, HistoryObserver, ObserverError};

#[derive(Debug, Clone)]
enum Action {
    Add { a: i32, b: i32 },
    Clear,
    Undo,
    Redo,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (-1000i32..1000, -1000i32..1000).prop_map(|(a, b)| Action::Add { a, b }),
        1 => Just(Action::Clear),
        2 => Just(Action::Undo),
        2 => Just(Action::Redo),
    ]
}

fn calc(a: i32, b: i32) -> Calculation {
    let (a, b) = (f64::from(a), f64::from(b));
    Calculation::from_parts("add", vec![a, b], a + b, "2024-05-01T00:00:00Z")
}

fn apply(history: &mut History, action: &Action) {
    match action {
        Action::Add { a, b } => history.add(calc(*a, *b)),
        Action::Clear => history.clear(),
        Action::Undo => {
            history.undo();
        }
        Action::Redo => {
            history.redo();
        }
    }
}

struct AlwaysFails;

impl HistoryObserver for AlwaysFails {
    fn on_event(
        &mut self,
        _event: HistoryEvent<'_>,
        _items: &[Calculation],
    ) -> Result<(), ObserverError> {
        Err("observer exploded".into())
    }
}

proptest! {
    #[test]
    fn retention_is_fifo_and_bounded(capacity in 1usize..12, additions in 0usize..40) {
        let mut history = History::new(capacity);
        for i in 0..additions {
            history.add(calc(i as i32, 0));
        }

        prop_assert_eq!(history.len(), additions.min(capacity));

        // The survivors are the most recent additions, in original order.
        let first_kept = additions.saturating_sub(capacity);
        let expected: Vec<f64> = (first_kept..additions).map(|i| i as f64).collect();
        let actual: Vec<f64> = history.list().iter().map(|c| c.operands[0]).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn capacity_is_never_exceeded_and_roundtrip_restores_state(
        capacity in 1usize..8,
        actions in prop::collection::vec(action_strategy(), 1..120),
    ) {
        let mut history = History::new(capacity);
        for action in &actions {
            apply(&mut history, action);
            prop_assert!(history.len() <= capacity);
        }

        // Walking all the way back and forward again must land on the exact
        // same sequence.
        let target = history.list();
        while history.undo() {}
        while history.redo() {}
        prop_assert_eq!(history.list(), target);
    }

    #[test]
    fn failing_observer_is_invisible_to_state(
        actions in prop::collection::vec(action_strategy(), 1..80),
    ) {
        let mut observed = History::new(6);
        observed.attach(Box::new(AlwaysFails));
        let mut plain = History::new(6);

        for action in &actions {
            apply(&mut observed, action);
            apply(&mut plain, action);
            prop_assert_eq!(observed.list(), plain.list());
        }
    }

    #[test]
    fn save_load_reproduces_every_record(
        entries in prop::collection::vec(
            (-1.0e12f64..1.0e12, -1.0e12f64..1.0e12),
            0..30,
        ),
    ) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history.csv");

        let mut history = History::new(64);
        for (a, b) in &entries {
            history.add(calc_f64(*a, *b));
        }
        history.save(&path).unwrap();

        let mut fresh = History::new(64);
        fresh.load(&path).unwrap();
        prop_assert_eq!(fresh.list(), history.list());
    }
}

fn calc_f64(a: f64, b: f64) -> Calculation {
    Calculation::from_parts("add", vec![a, b], a + b, "2024-05-01T00:00:00Z")
}
