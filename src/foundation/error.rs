/// Result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error type for keyframe configuration, timeline building, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid option or input value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Keyframe sequence configuration error.
    #[error("animation error: {0}")]
    Animation(String),

    /// Builder operation called in a state that does not allow it.
    #[error("usage error: {0}")]
    Usage(String),

    /// Rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Frame sink failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Reel script (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with context attached by `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Usage`].
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build a [`ReelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
