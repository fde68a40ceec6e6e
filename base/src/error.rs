use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/* # Why a custom error type and not anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in pathport operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// Text could not be converted between the portable encoding and the
    /// native path encoding. Carries the underlying platform error code when
    /// the platform reported one.
    Encoding {
        message: String,
        os_code: Option<u32>,
    },

    /// An OS-level file operation failed
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* # Why separate ErrorKind and PathportError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants with specific contexts (paths, OS codes)
- PathportError: wraps ErrorKind with additional runtime context strings

Callers pattern match on ErrorKind (or use the category helpers below) for
specific handling; context attachment stays ergonomic during propagation.
*/

/// Error type wrapping ErrorKind with optional context.
#[derive(Debug)]
pub struct PathportError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl PathportError {
    /// Creates a new error from an ErrorKind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
        }
    }

    /// Creates a message-only error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates an error for a failed OS file operation.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            source,
        })
    }

    /// Creates an encoding-conversion error.
    pub fn encoding(message: impl Into<String>, os_code: Option<u32>) -> Self {
        Self::new(ErrorKind::Encoding {
            message: message.into(),
            os_code,
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    /// Useful to avoid expensive string construction for successful paths.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The raw OS error number for `Io` errors, if the platform reported one.
    ///
    /// Callers distinguish error categories by inspecting this code or the
    /// helpers below, never by matching message strings.
    pub fn os_error(&self) -> Option<i32> {
        match &self.kind {
            ErrorKind::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match &self.kind {
            ErrorKind::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    /// The underlying OS operation failed because the file does not exist.
    pub fn is_not_found(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::NotFound)
    }

    /// The underlying OS operation was denied by permissions.
    pub fn is_access_denied(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::PermissionDenied)
    }

    /// The underlying OS operation failed because the file already exists
    /// (exclusive creation).
    pub fn is_already_exists(&self) -> bool {
        self.io_kind() == Some(std::io::ErrorKind::AlreadyExists)
    }

    /// The error originated in encoding conversion rather than an OS call.
    pub fn is_encoding(&self) -> bool {
        matches!(self.kind, ErrorKind::Encoding { .. })
    }

    /// Returns the innermost error in the chain.
    /// Traverses the error source chain to find the root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for PathportError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for PathportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::Io { source, .. } => Some(source),
            ErrorKind::Encoding { .. } | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for PathportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        // Add a separator if we have context
        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        // Display the underlying error kind
        match &self.kind {
            ErrorKind::Encoding { message, os_code } => match os_code {
                Some(code) => write!(f, "Encoding error: {} (os code {})", message, code),
                None => write!(f, "Encoding error: {}", message),
            },
            ErrorKind::Io { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/* # Why use Box<PathportError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient
to return in the common case.
*/

/// Standard result type for pathport operations.
pub type PathportResult<T> = std::result::Result<T, Box<PathportError>>;

/// Creates a boxed message error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::error::PathportError::message(format!($($arg)*)))
    };
}

/// Extension trait for attaching context to Results.
/// Provides ergonomic error context attachment during error propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> PathportResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> PathportResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for PathportResult<T> {
    fn context(self, context: impl Into<String>) -> PathportResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> PathportResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
