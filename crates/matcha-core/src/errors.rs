use thiserror::Error;

/// Result type alias using MatchaError
pub type Result<T> = std::result::Result<T, MatchaError>;

/// Canonical error kind taxonomy
///
/// Matching itself never fails: every mismatch is reported as a
/// [`Record`](crate::record::Record). These kinds only cover problems found
/// while *building* a matcher or parsing its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A regular expression failed to compile
    InvalidPattern,
    /// A string is not a syntactically valid mail address
    InvalidAddress,
}

impl ErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPattern => "ERR_INVALID_PATTERN",
            ErrorKind::InvalidAddress => "ERR_INVALID_ADDRESS",
        }
    }
}

/// Errors raised while constructing matchers
#[derive(Debug, Error)]
pub enum MatchaError {
    /// The pattern handed to [`reg_exp`](crate::matcher::reg_exp) does not compile
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The input is not a mail address (`local@domain` or `Name <local@domain>`)
    #[error("invalid mail address `{input}`: {reason}")]
    InvalidAddress { input: String, reason: &'static str },
}

impl MatchaError {
    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchaError::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            MatchaError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    pub(crate) fn invalid_address(input: &str, reason: &'static str) -> Self {
        MatchaError::InvalidAddress {
            input: input.to_string(),
            reason,
        }
    }
}
