//! Common result and error types for the Frost checker.

/// The result type for oracle queries and other fallible internal operations.
///
/// `Ok` carries the answer (usually a legality verdict, which may well be
/// "illegal"). `Err` means the netlist and architecture handed to Frost break
/// an assumption the checker relies on, and no verdict can be trusted.
pub type FrostResult<T> = Result<T, ContractViolation>;

/// A fatal precondition violation between the netlist and the architecture.
///
/// Raised for states that a well-formed upstream flow never produces, such
/// as a global buffer whose output is unconnected or a logic cell offered to
/// an IO site. The message names the offending cell or site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("contract violation: {message}")]
pub struct ContractViolation {
    /// Description of the violated precondition.
    pub message: String,
}

impl ContractViolation {
    /// Creates a new contract violation with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ContractViolation {
    fn from(message: String) -> Self {
        Self { message }
    }
}
