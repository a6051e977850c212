//! Helper error type.

use bsnav_container::ContainerError;
use bsnav_view::{PartialError, ServiceError};

/// Error returned when a helper cannot render.
#[derive(Debug, thiserror::Error)]
pub enum HelperError {
    /// Caller contract violation (bad option value or partial shape).
    #[error("{0}")]
    InvalidArgument(String),
    /// Container could not be resolved.
    #[error(transparent)]
    Container(#[from] ContainerError),
    /// A view service failed (accept helper construction or evaluation).
    #[error("{message}")]
    Runtime {
        /// Original message.
        message: String,
        /// Original error code.
        code: i32,
    },
    /// Partial template failed.
    #[error(transparent)]
    Partial(#[from] PartialError),
    /// Partial model could not be serialized.
    #[error("Failed to build partial model: {0}")]
    Model(#[from] serde_json::Error),
}

impl From<ServiceError> for HelperError {
    fn from(e: ServiceError) -> Self {
        Self::Runtime {
            message: e.message,
            code: e.code,
        }
    }
}
