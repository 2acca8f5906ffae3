//! Adapters for the external language parser
//!
//! The parser is a black box that turns source text into JSON records. A
//! failure here is final: the caller gets the error and nothing is retried
//! beyond the single module-mode fallback of [`CommandParser`].

use super::config::ExtractorConfig;
use super::error::{ExtractError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

/// Something that turns source text into parser records
pub trait SourceParser {
    /// Parse `source` into its root record
    fn parse(&self, source: &str) -> Result<Value>;
}

/// Read one JSON document of parser output
///
/// Parser output for machine-generated code nests far deeper than
/// serde_json's default limit of 128, so the limit is disabled and the stack
/// is grown on demand instead. The tree builder's `max_recursion_depth` is
/// the only depth guard.
pub fn read_parser_output(bytes: &[u8]) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(value)
}

/// Runs an ESTree-emitting command line parser such as `acorn`
///
/// The source is written to the child's stdin and one JSON document is read
/// from its stdout. Script mode (`--compact`) is tried first; if it fails,
/// module mode (`--compact --module`) is tried once. Leading arguments set
/// with [`CommandParser::with_args`] come before the mode flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandParser {
    program: String,
    args: Vec<String>,
}

impl CommandParser {
    /// Create a parser running `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create a parser running the configured program
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self::new(config.parser_program.clone())
    }

    /// Arguments passed before the mode flags, e.g. `["acorn.js"]` for `node`
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Program being run
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Leading arguments
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn run(&self, mode: &[&str], source: &str) -> Result<Value> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .args(mode)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ExtractError::parser(format!("cannot start {}: {}", self.program, e)))?;

        // stdin is fed from its own thread while stdout and stderr drain here
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut pipe) => pipe.write_all(source.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let output =
            output.map_err(|e| ExtractError::parser(format!("{} did not finish: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::parser(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        // A parser that succeeds without consuming all input is fine
        match written {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                return Err(ExtractError::parser(format!("cannot write source: {}", e)));
            }
            _ => {}
        }

        read_parser_output(&output.stdout)
            .map_err(|e| ExtractError::parser(format!("unreadable output: {}", e)))
    }
}

impl SourceParser for CommandParser {
    fn parse(&self, source: &str) -> Result<Value> {
        match self.run(&["--compact"], source) {
            Ok(value) => Ok(value),
            Err(_e) => {
                log_debug!("Script parse failed ({}), retrying as module", _e);
                self.run(&["--compact", "--module"], source)
            }
        }
    }
}

/// Returns parser output that was produced elsewhere
#[derive(Debug, Clone, PartialEq)]
pub struct StaticParser {
    value: Value,
}

impl StaticParser {
    /// Wrap an already parsed root record
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parse a JSON document holding the root record
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(read_parser_output(json.as_bytes())?))
    }
}

impl SourceParser for StaticParser {
    fn parse(&self, _source: &str) -> Result<Value> {
        Ok(self.value.clone())
    }
}
