//! Error types for Flurry.
//!
//! Geometry never fails; these cover container lifecycle misuse, interactor
//! failures, loading and options files.

use std::fmt;

/// Errors reported by container operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerError {
    /// The container was destroyed; only allocating a new one is valid.
    InvalidState {
        /// Id of the container.
        id: String,
        /// Operation that was attempted.
        operation: &'static str,
    },
}

impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerError::InvalidState { id, operation } => write!(
                f,
                "Invalid state: container '{}' is destroyed, cannot {}",
                id, operation
            ),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Errors raised by an interactor during a frame or click dispatch.
///
/// The container logs these and moves on to the next interactor.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractorError {
    /// A container operation requested by the interactor failed.
    Container(ContainerError),
    /// Interactor-specific failure.
    Failed(String),
}

impl fmt::Display for InteractorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractorError::Container(e) => write!(f, "Container error: {}", e),
            InteractorError::Failed(msg) => write!(f, "Interactor failed: {}", msg),
        }
    }
}

impl std::error::Error for InteractorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InteractorError::Container(e) => Some(e),
            InteractorError::Failed(_) => None,
        }
    }
}

impl From<ContainerError> for InteractorError {
    fn from(e: ContainerError) -> Self {
        InteractorError::Container(e)
    }
}

/// Errors that can occur when the loader creates a container.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// An empty options list was given.
    EmptyOptions,
    /// The requested options index is past the end of the list.
    IndexOutOfRange { index: usize, len: usize },
    /// No preset is registered under this name.
    UnknownPreset(String),
    /// The new container could not be started.
    Container(ContainerError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::EmptyOptions => write!(f, "No options provided. Pass at least one options object."),
            LoadError::IndexOutOfRange { index, len } => {
                write!(f, "Options index {} out of range for {} item(s)", index, len)
            }
            LoadError::UnknownPreset(name) => write!(f, "No preset registered as '{}'", name),
            LoadError::Container(e) => write!(f, "Container error: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Container(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContainerError> for LoadError {
    fn from(e: ContainerError) -> Self {
        LoadError::Container(e)
    }
}

/// Errors that can occur while reading or writing an options file.
#[derive(Debug)]
pub enum OptionsError {
    /// Failed to read or write the file.
    Io(std::io::Error),
    /// The file is not valid options JSON.
    Json(serde_json::Error),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::Io(e) => write!(f, "Failed to access options file: {}", e),
            OptionsError::Json(e) => write!(f, "Invalid options JSON: {}", e),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OptionsError::Io(e) => Some(e),
            OptionsError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for OptionsError {
    fn from(e: std::io::Error) -> Self {
        OptionsError::Io(e)
    }
}

impl From<serde_json::Error> for OptionsError {
    fn from(e: serde_json::Error) -> Self {
        OptionsError::Json(e)
    }
}
