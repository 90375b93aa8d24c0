/// Convenience result type used across vistra.
pub type VistraResult<T> = Result<T, VistraError>;

/// Top-level error taxonomy used by the scene-graph APIs.
#[derive(thiserror::Error, Debug)]
pub enum VistraError {
    /// A field write or model construction violates a declared constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// A tree edit would make a node its own ancestor.
    #[error("cycle error: {0}")]
    Cycle(String),

    /// A referenced node, child link or adaptor does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// No backend of the requested kind is registered.
    #[error("unsupported backend: {0}")]
    UnsupportedBackend(String),

    /// A backend adaptor lacks a capability its node kind requires.
    #[error("missing adaptor capability: {0}")]
    MissingAdaptor(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VistraError {
    /// Build a [`VistraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VistraError::Cycle`] value.
    pub fn cycle(msg: impl Into<String>) -> Self {
        Self::Cycle(msg.into())
    }

    /// Build a [`VistraError::NotFound`] value.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Build a [`VistraError::UnsupportedBackend`] value.
    pub fn unsupported_backend(msg: impl Into<String>) -> Self {
        Self::UnsupportedBackend(msg.into())
    }

    /// Build a [`VistraError::MissingAdaptor`] value.
    pub fn missing_adaptor(msg: impl Into<String>) -> Self {
        Self::MissingAdaptor(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
