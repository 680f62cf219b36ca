//! Resource operation errors.

use thiserror::Error;

use super::ApiError;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid value for {attribute}: {message}")]
    InvalidAttribute { attribute: String, message: String },

    #[error("Resource type not found: {0}")]
    NotFound(String),

    #[error("Resource has no identity")]
    MissingId,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResourceError {
    pub fn invalid_attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        ResourceError::InvalidAttribute {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// Attribute path the error refers to, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            ResourceError::InvalidAttribute { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}
