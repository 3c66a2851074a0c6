// Renderer error types
//
// A missing or unusable surface is a fatal configuration error reported once
// at startup; there is no retry path anywhere in the renderer.

use std::fmt;
use std::io;

/// Errors that can occur while acquiring or drawing to the terminal surface
#[derive(Debug)]
pub enum RenderError {
    /// Stdout is not a terminal, so there is nothing to draw on
    SurfaceUnavailable(String),

    /// The terminal size could not be read or is unusable
    SizeUnavailable(String),

    /// I/O error while writing a frame
    Io(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable(msg) => {
                write!(f, "No drawing surface: {}", msg)
            }
            Self::SizeUnavailable(msg) => {
                write!(f, "Cannot determine terminal size: {}", msg)
            }
            Self::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;
