use thiserror::Error;

/// Result type alias using HbcError
pub type Result<T> = std::result::Result<T, HbcError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used in log events and in
/// error responses sent back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Dispatch
    InvalidArgCount,
    Validation,
    NotFound,

    // Transport
    TransportSetup,
    Protocol,

    // Integration/IO
    Persistence,
    Io,
    NoInput,

    // Internal
    Internal,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgCount => "ERR_INVALID_ARG_COUNT",
            ErrorKind::Validation => "ERR_VALIDATION",
            ErrorKind::NotFound => "ERR_NOT_FOUND",
            ErrorKind::TransportSetup => "ERR_TRANSPORT_SETUP",
            ErrorKind::Protocol => "ERR_PROTOCOL",
            ErrorKind::Persistence => "ERR_PERSISTENCE",
            ErrorKind::Io => "ERR_IO",
            ErrorKind::NoInput => "ERR_NO_INPUT",
            ErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Error taxonomy for command dispatch, transport and storage
///
/// The `Display` text of the dispatch variants is user-facing: it is printed
/// verbatim on the console or returned as a response payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HbcError {
    // ===== Dispatch Errors =====
    /// Raw argument count differs from the command's declared count
    #[error("Command {command} expects {expected} argument(s), got {actual}")]
    InvalidNumberOfArgs {
        command: String,
        expected: usize,
        actual: usize,
    },

    /// Argument failed type coercion or a domain predicate
    #[error("{message}")]
    Validation { message: String },

    /// Command name is not present in the dispatch table
    #[error("Command {name} not found. Type \"help\" to see available commands.")]
    CommandNotFound { name: String },

    // ===== Transport Errors =====
    /// Datagram endpoint could not bind its address
    #[error("Cannot bind server socket on {addr}: {reason}")]
    TransportSetup { addr: String, reason: String },

    /// Datagram payload could not be decoded or encoded
    #[error("Datagram rejected: {reason}")]
    Protocol { reason: String },

    // ===== Integration Errors =====
    /// Collection could not be saved or loaded
    #[error("Storage failure: {reason}")]
    Persistence { reason: String },

    /// Underlying I/O failed
    #[error("I/O failure during {op}: {reason}")]
    Io { op: String, reason: String },

    /// Interactive input stream closed while a prompt was waiting
    #[error("No more input available")]
    NoInput,

    /// Broken internal invariant
    #[error("Internal error: {reason}")]
    Internal { reason: String },
}

impl HbcError {
    /// Build a validation error from a user-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        HbcError::Validation {
            message: message.into(),
        }
    }

    /// Build an I/O error tagged with the failing operation
    pub fn io(op: impl Into<String>, err: &std::io::Error) -> Self {
        HbcError::Io {
            op: op.into(),
            reason: err.to_string(),
        }
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            HbcError::InvalidNumberOfArgs { .. } => ErrorKind::InvalidArgCount,
            HbcError::Validation { .. } => ErrorKind::Validation,
            HbcError::CommandNotFound { .. } => ErrorKind::NotFound,
            HbcError::TransportSetup { .. } => ErrorKind::TransportSetup,
            HbcError::Protocol { .. } => ErrorKind::Protocol,
            HbcError::Persistence { .. } => ErrorKind::Persistence,
            HbcError::Io { .. } => ErrorKind::Io,
            HbcError::NoInput => ErrorKind::NoInput,
            HbcError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Whether the process may keep serving after this error
    ///
    /// Only a failed socket bind aborts the server.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, HbcError::TransportSetup { .. })
    }
}

impl From<serde_json::Error> for HbcError {
    fn from(err: serde_json::Error) -> Self {
        HbcError::Protocol {
            reason: err.to_string(),
        }
    }
}
