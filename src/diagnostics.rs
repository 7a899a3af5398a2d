//! Diagnostic collection and rendering.
//!
//! Every stage reports into one shared [`Diagnostics`] sink and keeps going;
//! the pipeline checks the sink between stages. The sink owns a copy of the
//! source text so diagnostics can be rendered with the offending line and a
//! caret under the column.

use std::io;

use thiserror::Error;

/// A single compilation error with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error at line {line}, column {column}: {message}")]
pub struct Diagnostic {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Collector for compilation errors. Never fails; `report` only appends.
#[derive(Debug)]
pub struct Diagnostics {
    source: String,
    errors: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
            errors: Vec::new(),
        }
    }

    pub fn report(&mut self, line: u32, column: u32, message: impl Into<String>) {
        self.errors.push(Diagnostic {
            line,
            column,
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<Diagnostic> {
        self.errors
    }

    /// Render every diagnostic followed by the source line it points at and
    /// a caret under the offending column.
    pub fn render(&self, out: &mut impl io::Write) -> io::Result<()> {
        let lines: Vec<&str> = self.source.split('\n').collect();
        for error in &self.errors {
            writeln!(out, "{}", error)?;
            if let Some(line) = lines.get((error.line as usize).saturating_sub(1)) {
                writeln!(out, "{}", line)?;
                writeln!(out, "{}^", " ".repeat((error.column as usize).saturating_sub(1)))?;
            }
        }
        Ok(())
    }
}
