use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in flowboard operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid
    Config { key: String, message: String },

    /// The mail transport rejected or failed to deliver a message
    Mail { recipient: String, message: String },

    /// A JSON document could not be parsed or produced
    Json {
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* 📖 # Why carry JSON errors as a boxed trait object?

flowboard_base sits below the crates that actually use serde_json. Storing the parse
error as a boxed std error keeps the base crate free of a serde_json dependency while
still preserving the original error (and its line/column) as the source.
*/

/* 📖 # Why separate ErrorKind and Error?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (file paths, config keys, etc.)
- Error: wraps ErrorKind with context strings, an optional cause and a span trace

Users can pattern match on ErrorKind for specific handling, while Error provides
ergonomic context attachment during propagation.
*/

/// Error type wrapping ErrorKind with context, an optional cause and a span trace.
pub struct Error {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<Error>>,
    span_trace: SpanTrace,
}

impl Error {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a configuration error for the given key.
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config {
            key: key.into(),
            message: message.into(),
        })
    }

    /// Creates a mail delivery error for the given recipient.
    pub fn mail(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Mail {
            recipient: recipient.into(),
            message: message.into(),
        })
    }

    /// Wraps a serialization error.
    pub fn json(source: impl StdError + Send + Sync + 'static) -> Self {
        Self::new(ErrorKind::Json {
            source: Box::new(source),
        })
    }

    /// Attaches context to an error.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that caused this one.
    pub fn caused_by(mut self, cause: impl Into<Box<Error>>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings, oldest first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the error that caused this one, if any.
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    /// Returns the span trace captured when the error was created.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_kind(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Config { key, message } => {
                write!(f, "Invalid configuration for '{}': {}", key, message)
            }
            ErrorKind::Mail { recipient, message } => {
                write!(f, "Failed to send mail to {}: {}", recipient, message)
            }
            ErrorKind::Json { source } => write!(f, "JSON error: {}", source),
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }

    /* 📖 # Why render errors as a tree in Debug output?
    Errors are logged with `?error` in request handlers. A tree with the message first,
    then its context and nested causes, reads top-down the way an operator investigates
    a failed request, and keeps the span trace at the end where it does not obscure
    the actual failure.
    */
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        self.fmt_kind(f)?;
        writeln!(f)?;
        let entries = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let branch = if i + 1 == entries { "└─" } else { "├─" };
            writeln!(f, "{}{} {}", indent, branch, ctx)?;
        }
        if let Some(cause) = &self.cause {
            write!(f, "{}└─ cause: ", indent)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        if let Some(cause) = &self.cause {
            return Some(cause.as_ref());
        }
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::Json { source } => Some(source.as_ref()),
            ErrorKind::Config { .. } | ErrorKind::Mail { .. } | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        self.fmt_kind(f)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/* 📖 # Why use Box<Error> in the result type?

Boxing the error reduces the size of the result type, making it more efficient to return in the common case.
*/

/// Standard result type for flowboard operations.
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error. Eager evaluation.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed message error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        ::std::boxed::Box::new($crate::error::Error::message(format!($($arg)*)))
    };
}

/// Returns early with a boxed message error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::err!($($arg)*))
    };
}
