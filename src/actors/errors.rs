use super::address::Address;
use thiserror::Error;

/// Errors surfaced by the actor runtime
///
/// Sending to or cancelling an unknown address is deliberately not an error:
/// the actor model makes no delivery guarantees, so those calls are no-ops.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Encapsulation violation in {operation}: {reason}")]
    EncapsulationViolation {
        operation: &'static str,
        reason: String,
    },

    #[error("Address {address} is already bound to a live actor")]
    AddressInUse { address: Address },

    #[error("Actor manager has shut down")]
    ManagerShutDown,
}

/// Result type alias for actor runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Helper for the re-entrancy guard
pub(crate) fn encapsulation_violation(operation: &'static str) -> RuntimeError {
    RuntimeError::EncapsulationViolation {
        operation,
        reason: "the manager cannot be reached from inside an actor handler, factory or \
                 teardown observer; return effects instead"
            .to_string(),
    }
}

/// A factory returned an actor sealed with a token minted for another spawn
pub(crate) fn foreign_token(expected: &Address, found: &Address) -> RuntimeError {
    RuntimeError::EncapsulationViolation {
        operation: "spawn",
        reason: format!(
            "factory for {expected} sealed its actor with the spawn token for {found}; \
             tokens cannot be carried between spawns"
        ),
    }
}
