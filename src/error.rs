/// Error types for the fibber library
use std::fmt;

/// Result type alias for forwarding-table operations
pub type Result<T> = std::result::Result<T, FibError>;

/// Main error type for forwarding-table operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FibError {
    /// Malformed prefix (length out of range, bad address text, ...)
    InvalidPrefix(String),

    /// I/O errors
    Io(String),

    /// Route-table file parsing errors
    Parse(String),

    /// The trie arena ran out of capacity during a build
    ArenaExhausted(String),

    /// The compiled structure violated a build invariant
    InvariantViolation(String),

    /// A stored offset or tag in the compiled trie is inconsistent
    CorruptTrie(String),
}

impl fmt::Display for FibError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FibError::InvalidPrefix(msg) => write!(f, "Invalid prefix: {}", msg),
            FibError::Io(msg) => write!(f, "I/O error: {}", msg),
            FibError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FibError::ArenaExhausted(msg) => write!(f, "Arena exhausted: {}", msg),
            FibError::InvariantViolation(msg) => {
                write!(f, "Build invariant violation: {}", msg)
            }
            FibError::CorruptTrie(msg) => write!(f, "Corrupt trie: {}", msg),
        }
    }
}

impl std::error::Error for FibError {}

impl From<std::io::Error> for FibError {
    fn from(err: std::io::Error) -> Self {
        FibError::Io(err.to_string())
    }
}

impl From<std::net::AddrParseError> for FibError {
    fn from(err: std::net::AddrParseError) -> Self {
        FibError::InvalidPrefix(err.to_string())
    }
}
