// Engine error types

use std::fmt;

/// Errors that can occur while constructing or resizing a particle field
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Surface dimensions were zero, negative, or not finite
    InvalidDimensions { width: f32, height: f32 },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid surface dimensions {}x{}: dimensions must be finite and positive",
                    width, height
                )
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
