//! Diagnostic logging capability
//!
//! The mapper does not log through a global logger. Callers hand it a
//! [`DiagnosticSink`] per call, and the mapper records its decisions there.
//! A sink that fails is never allowed to fail the mapping.

use std::fmt;
use std::sync::Mutex;
use thiserror::Error;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// One recorded mapping decision or warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Stable machine-readable code, e.g. `receiver.native`
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(level: Level, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            code,
            message: message.into(),
        }
    }

    pub fn debug(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Level::Debug, code, message)
    }

    pub fn info(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Level::Info, code, message)
    }

    pub fn warn(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(Level::Warn, code, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.code, self.message)
    }
}

/// Failure reported by a sink
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("diagnostic sink failed: {0}")]
pub struct SinkError(pub String);

/// Something that can record diagnostics
pub trait DiagnosticSink {
    /// Record a diagnostic
    ///
    /// # Errors
    ///
    /// Returns an error when the sink cannot store the entry.
    fn record(&self, diagnostic: &Diagnostic) -> Result<(), SinkError>;
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) -> Result<(), SinkError>,
{
    fn record(&self, diagnostic: &Diagnostic) -> Result<(), SinkError> {
        self(diagnostic)
    }
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, diagnostic: &Diagnostic) -> Result<(), SinkError> {
        let code = diagnostic.code;
        let message = diagnostic.message.as_str();
        match diagnostic.level {
            Level::Debug => tracing::debug!(code, "{message}"),
            Level::Info => tracing::info!(code, "{message}"),
            Level::Warn => tracing::warn!(code, "{message}"),
        }
        Ok(())
    }
}

/// Keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    #[must_use]
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Codes of everything recorded so far, in order
    #[must_use]
    pub fn codes(&self) -> Vec<&'static str> {
        self.entries().iter().map(|d| d.code).collect()
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.entries().iter().any(|d| d.code == code)
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, diagnostic: &Diagnostic) -> Result<(), SinkError> {
        self.entries
            .lock()
            .map_err(|_| SinkError("memory sink lock poisoned".to_string()))?
            .push(diagnostic.clone());
        Ok(())
    }
}
