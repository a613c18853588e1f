//! Error types for the Statline system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for Statline operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Pushes a frame onto the context stack, creating the context if needed.
    #[must_use]
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_frame(field));
        self
    }

    /// Creates a malformed document error for a label that was never found.
    #[must_use]
    pub fn malformed_document(label: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedDocument {
            label: label.into(),
        })
    }

    /// Creates a malformed number error.
    #[must_use]
    pub fn malformed_number(token: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedNumber {
            token: token.into(),
        })
    }

    /// Creates a table load error.
    #[must_use]
    pub fn load(table: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LoadError {
            table: table.into(),
            line,
            message: message.into(),
        })
    }

    /// Creates a structural query error.
    #[must_use]
    pub fn structural_query(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StructuralQuery(message.into()))
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }

    /// Returns true if this error aborted a document parse.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MalformedDocument { .. }
                | ErrorKind::MalformedNumber { .. }
                | ErrorKind::StructuralQuery(_)
                | ErrorKind::MalformedJson(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A required label was never found before the token stream ran out.
    #[error("malformed document: label '{label}' not found")]
    MalformedDocument {
        /// The label (or label description) being sought.
        label: String,
    },

    /// A token that should be numeric failed to parse.
    #[error("malformed number: '{token}'")]
    MalformedNumber {
        /// The offending token.
        token: String,
    },

    /// A static table row is malformed.
    #[error("{table}:{line}: {message}")]
    LoadError {
        /// Table name (usually the file name).
        table: String,
        /// Line number (1-indexed).
        line: usize,
        /// What was wrong with the row.
        message: String,
    },

    /// The document query engine rejected or failed a query.
    #[error("structural query failed: {0}")]
    StructuralQuery(String),

    /// The status JSON object is missing a field or has the wrong shape.
    #[error("malformed status json: {0}")]
    MalformedJson(String),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    IoError(String),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Document or table name.
    pub source: Option<String>,
    /// Token index in the stream when the error was raised.
    pub position: Option<usize>,
    /// Field path being parsed, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the token position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Adds a field frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "in {source}")?;
            if let Some(position) = self.position {
                write!(f, " at token {position}")?;
            }
        }
        for frame in &self.stack {
            write!(f, " / {frame}")?;
        }
        Ok(())
    }
}

/// Result type alias for Statline operations.
pub type Result<T> = std::result::Result<T, Error>;
