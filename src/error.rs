use crate::actors::RuntimeError;
use crate::config::ConfigurationError;
use crate::elevator::ElevatorError;
use thiserror::Error;

/// Top-level error for embedders that drive both subsystems
#[derive(Error, Debug)]
pub enum TroupeError {
    #[error("Actor runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    #[error("Elevator error: {0}")]
    Elevator(#[from] ElevatorError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type Result<T> = std::result::Result<T, TroupeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subsystem_errors_convert() {
        fn fails() -> Result<()> {
            let shut_down: crate::actors::RuntimeResult<()> = Err(RuntimeError::ManagerShutDown);
            shut_down?;
            Ok(())
        }

        let error = fails().unwrap_err();
        assert!(matches!(error, TroupeError::Runtime(RuntimeError::ManagerShutDown)));
        assert_eq!(error.to_string(), "Actor runtime error: Actor manager has shut down");
    }
}
