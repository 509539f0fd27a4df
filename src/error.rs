//! Session Errors
//!
//! The two failure kinds a session operation can report.
//! A missing session is never an error: the host surface answers with
//! neutral values instead.

/// Session errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Session storage could not be obtained.
    #[error("Cannot allocate session storage")]
    Allocation,

    /// A value outside an operation's contract.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument or config field.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl SessionError {
    /// Build an `InvalidArgument` error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}
