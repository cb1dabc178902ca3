use std::fs;
use std::path::{Path, PathBuf};

use reckon_common::Calculation;

const HEADER_COLUMNS: [&str; 4] = ["operation", "operands", "result", "timestamp"];
const FIELD_DELIMITER: char = ',';
const OPERAND_DELIMITER: char = ';';

/// Errors from saving or loading a history file.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("history file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing column {0:?} in header")]
    MissingColumn(&'static str),
    #[error("malformed record at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Write `items` in order to the delimited format at `path`, creating parent
/// directories as needed.
///
/// The write is not atomic: a failure partway through may leave a truncated
/// file behind.
pub fn save_history(path: &Path, items: &[Calculation]) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut out = String::new();
    out.push_str(&HEADER_COLUMNS.join(","));
    out.push('\n');
    for calc in items {
        let operands = calc
            .operands
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(&OPERAND_DELIMITER.to_string());
        out.push_str(&calc.operation);
        out.push(FIELD_DELIMITER);
        out.push_str(&operands);
        out.push(FIELD_DELIMITER);
        out.push_str(&calc.result.to_string());
        out.push(FIELD_DELIMITER);
        out.push_str(&calc.timestamp);
        out.push('\n');
    }

    fs::write(path, out)?;
    tracing::debug!(path = %path.display(), records = items.len(), "history saved");
    Ok(())
}

/// Read the delimited format at `path` back into records.
///
/// Columns are located by header name, so column order is not significant and
/// the `timestamp` column may be absent or empty. Empty operand segments are
/// dropped.
pub fn load_history(path: &Path) -> Result<Vec<Calculation>, PersistenceError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(PersistenceError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    let mut lines = text.lines();
    let header = lines.next().unwrap_or("");
    let columns: Vec<&str> = header.split(FIELD_DELIMITER).map(str::trim).collect();
    let position = |name: &'static str| {
        columns
            .iter()
            .position(|column| *column == name)
            .ok_or(PersistenceError::MissingColumn(name))
    };
    let operation_at = position("operation")?;
    let operands_at = position("operands")?;
    let result_at = position("result")?;
    let timestamp_at = columns.iter().position(|column| *column == "timestamp");

    let mut items = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        // Header is line 1, so the first record is line 2.
        let line_number = index + 2;
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        let field = |at: usize| fields.get(at).copied().unwrap_or("");

        let operation = field(operation_at).trim();
        if operation.is_empty() {
            return Err(PersistenceError::Malformed {
                line: line_number,
                reason: "empty operation name".to_string(),
            });
        }

        let operands = field(operands_at)
            .split(OPERAND_DELIMITER)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment.trim().parse::<f64>().map_err(|err| {
                    PersistenceError::Malformed {
                        line: line_number,
                        reason: format!("operand {segment:?}: {err}"),
                    }
                })
            })
            .collect::<Result<Vec<f64>, PersistenceError>>()?;

        let result = field(result_at)
            .trim()
            .parse::<f64>()
            .map_err(|err| PersistenceError::Malformed {
                line: line_number,
                reason: format!("result {:?}: {err}", field(result_at)),
            })?;

        let timestamp = timestamp_at.map(|at| field(at).trim()).unwrap_or("");
        items.push(Calculation::from_parts(operation, operands, result, timestamp));
    }

    tracing::debug!(path = %path.display(), records = items.len(), "history loaded");
    Ok(items)
}
