use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One recorded application of a named operation to its operands.
///
/// Calculations are immutable once constructed: the record captures the
/// operation name, the operands in call order, the rounded result, and the
/// creation instant as ISO-8601 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    /// Registered operation name (`add`, `divide`, ...).
    pub operation: String,
    /// Operands in call order. Two for every current operation, but stored
    /// generically.
    pub operands: Vec<f64>,
    /// Computed result after precision rounding.
    pub result: f64,
    /// Creation instant, ISO-8601. Empty when a persisted record carried none.
    pub timestamp: String,
}

impl Calculation {
    /// Build a record stamped with the current UTC instant.
    pub fn record(operation: impl Into<String>, operands: Vec<f64>, result: f64) -> Self {
        Self {
            operation: operation.into(),
            operands,
            result,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    /// Rebuild a record from persisted fields, keeping the stored timestamp.
    pub fn from_parts(
        operation: impl Into<String>,
        operands: Vec<f64>,
        result: f64,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            operation: operation.into(),
            operands,
            result,
            timestamp: timestamp.into(),
        }
    }
}

impl std::fmt::Display for Calculation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operands = self
            .operands
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "{} [{}] => {} @ {}",
            self.operation, operands, self.result, self.timestamp
        )
    }
}
