use std::io::{BufRead, Write};
use std::path::PathBuf;

use reckon_common::Calculation;
use reckon_kernel::History;
use reckon_ops::{OPERATIONS, Operation, OperationError, resolve};
use reckon_persist::PersistenceError;

use crate::config::Config;
use crate::validate::{ValidationError, check_magnitude, parse_number};

/// One failed command, tagged by category for presentation.
#[derive(Debug, thiserror::Error)]
pub enum ReplError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("operation error: {0}")]
    Operation(#[from] OperationError),
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive command loop over a [`History`].
///
/// Every error category is printed and the loop keeps running; only `exit`
/// or end of input stop it.
pub struct Repl {
    history: History,
    cfg: Config,
}

impl Repl {
    pub fn new(history: History, cfg: Config) -> Self {
        Self { history, cfg }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Drive the loop until `exit` or end of input.
    pub fn run(&mut self, mut input: impl BufRead, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "reckon calculator. Type 'help' for commands.")?;
        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            if self.handle_line(line.trim(), out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Process one input line, printing its outcome.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> std::io::Result<Flow> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Flow::Continue);
        };
        let command = command.to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        match command.as_str() {
            "exit" => return Ok(Flow::Exit),
            "help" => self.print_help(out)?,
            "history" => {
                for (index, calc) in self.history.list().iter().enumerate() {
                    writeln!(out, "{}. {calc}", index + 1)?;
                }
            }
            "clear" => {
                self.history.clear();
                writeln!(out, "History cleared")?;
            }
            "undo" => {
                self.history.undo();
                writeln!(out, "Undo performed")?;
            }
            "redo" => {
                self.history.redo();
                writeln!(out, "Redo performed")?;
            }
            "save" => {
                let path = self.path_arg(&args);
                match self.history.save(&path) {
                    Ok(()) => writeln!(out, "Saved to {}", path.display())?,
                    Err(err) => writeln!(out, "{}", ReplError::from(err))?,
                }
            }
            "load" => {
                let path = self.path_arg(&args);
                match self.history.load(&path) {
                    Ok(()) => writeln!(out, "Loaded from {}", path.display())?,
                    Err(err) => writeln!(out, "{}", ReplError::from(err))?,
                }
            }
            name => {
                let op = match resolve(name) {
                    Ok(op) => op,
                    Err(OperationError::Unknown(_)) => {
                        writeln!(out, "Unknown command: {name}. Type 'help' for a list.")?;
                        return Ok(Flow::Continue);
                    }
                    Err(err) => {
                        writeln!(out, "{}", ReplError::from(err))?;
                        return Ok(Flow::Continue);
                    }
                };
                if args.len() < 2 {
                    writeln!(out, "Provide two numeric operands")?;
                    return Ok(Flow::Continue);
                }
                match self.evaluate(op, args[0], args[1]) {
                    Ok(result) => writeln!(out, "Result: {result}")?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// Validate operands, run the operation, and record the calculation.
    fn evaluate(&mut self, op: &Operation, a: &str, b: &str) -> Result<f64, ReplError> {
        let a = parse_number(a)?;
        let b = parse_number(b)?;
        check_magnitude(a, self.cfg.max_input_value)?;
        check_magnitude(b, self.cfg.max_input_value)?;
        let result = op.execute(a, b, self.cfg.precision)?;
        self.history
            .add(Calculation::record(op.name, vec![a, b], result));
        Ok(result)
    }

    fn path_arg(&self, args: &[&str]) -> PathBuf {
        args.first()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.cfg.history_path())
    }

    fn print_help(&self, out: &mut impl Write) -> std::io::Result<()> {
        for op in OPERATIONS {
            writeln!(out, "{}: {}", op.name, op.help)?;
        }
        writeln!(
            out,
            "Additional commands: history, clear, undo, redo, save [path], load [path], help, exit"
        )
    }
}
