//! Failure kinds raised by the simulation core
//!
//! Both are terminal for the current run: a physics state that hit one of
//! these is not safely continuable, so the drive loop stops on either.

/// Errors raised by simulation operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// An argument was outside what the operation accepts (non-finite vector, negative dt)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation was called on an actor in the wrong state
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),
}
