use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use reckon_common::Calculation;
use reckon_kernel::{HistoryEvent, HistoryObserver, ObserverError};
use reckon_persist::save_history;

/// Appends one line per history event to an audit log file.
pub struct LogObserver {
    path: PathBuf,
}

impl LogObserver {
    /// Build the observer, creating the log directory up front.
    pub fn create(path: PathBuf) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }
}

impl HistoryObserver for LogObserver {
    fn on_event(
        &mut self,
        event: HistoryEvent<'_>,
        _items: &[Calculation],
    ) -> Result<(), ObserverError> {
        let line = match event {
            HistoryEvent::CalculationAdded(calc) => format!(
                "{} | {} | {:?} => {}",
                calc.timestamp, calc.operation, calc.operands, calc.result
            ),
            HistoryEvent::Saved(path) | HistoryEvent::Loaded(path) => {
                format!("event={} path={}", event.name(), path.display())
            }
            _ => format!("event={}", event.name()),
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} - {}",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            line
        )?;
        Ok(())
    }
}

/// Rewrites the history file after every added calculation.
pub struct AutoSaveObserver {
    path: PathBuf,
}

impl AutoSaveObserver {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HistoryObserver for AutoSaveObserver {
    fn on_event(
        &mut self,
        event: HistoryEvent<'_>,
        items: &[Calculation],
    ) -> Result<(), ObserverError> {
        if let HistoryEvent::CalculationAdded(_) = event {
            save_history(&self.path, items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon_persist::load_history;

    fn calc(op: &str) -> Calculation {
        Calculation::from_parts(op, vec![1.0, 2.0], 3.0, "2024-05-01T00:00:00Z")
    }

    #[test]
    fn log_observer_appends_one_line_per_event() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs").join("reckon.log");
        let mut observer = LogObserver::create(path.clone()).unwrap();

        let added = calc("add");
        observer
            .on_event(HistoryEvent::CalculationAdded(&added), &[added.clone()])
            .unwrap();
        observer.on_event(HistoryEvent::Cleared, &[]).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("add"));
        assert!(lines[0].contains("=> 3"));
        assert!(lines[1].contains("event=cleared"));
    }

    #[test]
    fn autosave_writes_history_on_add_only() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("history.csv");
        let mut observer = AutoSaveObserver::new(path.clone());

        observer.on_event(HistoryEvent::Cleared, &[]).unwrap();
        assert!(!path.exists());

        let added = calc("add");
        let items = vec![calc("subtract"), added.clone()];
        observer
            .on_event(HistoryEvent::CalculationAdded(&added), &items)
            .unwrap();
        assert_eq!(load_history(&path).unwrap(), items);
    }
}
