/// Convenience result type used across layerkit.
pub type LayerResult<T> = Result<T, LayerError>;

/// Top-level error taxonomy used by store, registry and configuration APIs.
///
/// Every variant is reported through a return value. A failed store mutation
/// never leaves a partially updated tree behind.
#[derive(thiserror::Error, Debug)]
pub enum LayerError {
    /// An id did not resolve to any layer or page.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested mutation would break a tree or store invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid user-provided data (documents, forms, configuration).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerError {
    /// Build a [`LayerError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`LayerError::InvariantViolation`] value.
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    /// Build a [`LayerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for [`LayerError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// `true` for [`LayerError::InvariantViolation`].
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

impl From<serde_json::Error> for LayerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
