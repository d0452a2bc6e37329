use std::io;

use thiserror::Error;

/// Library-wide error type for gsc-curate operations.
///
/// Prompt-level validation failures are handled locally by the prompt loop
/// (see [`crate::domain::ValidationError`]) and never surface here.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Container engine invocation failed.
    #[error("Docker error running '{command}': {details}")]
    Engine { command: String, details: String },

    /// Base image neither present locally nor pullable from the registry.
    #[error(
        "Could not fetch `{0}` from Docker Hub. Please check if the image name is correct and try again."
    )]
    ImageFetch(String),

    /// Detected base-image distro is outside the supported set.
    #[error(
        "Unsupported distro `{0}`. Supported distros: ubuntu:18.04, ubuntu:20.04, debian:10, debian:11"
    )]
    DistroUnsupported(String),

    /// The expected image did not exist after an external build finished.
    #[error("`{image}` creation failed. For more info, look at the log file here: {log_file}")]
    BuildFailed { image: String, log_file: String },

    /// Interactive console failure (terminal went away mid-prompt).
    #[error("Console error: {0}")]
    Console(String),
}

impl AppError {
    /// Provide an `io::ErrorKind`-like view for callers inspecting failures.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::DistroUnsupported(_) => io::ErrorKind::InvalidInput,
            AppError::ImageFetch(_) | AppError::BuildFailed { .. } => io::ErrorKind::NotFound,
            AppError::Engine { .. } | AppError::Console(_) => io::ErrorKind::Other,
        }
    }
}
