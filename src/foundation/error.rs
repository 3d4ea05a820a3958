/// Convenience result type used across scrawl.
pub type ScrawlResult<T> = Result<T, ScrawlError>;

/// Top-level error taxonomy used by the compositing and regeneration APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrawlError {
    /// Invalid user-provided layer or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure loading or decoding a fixed resource (background image, font).
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors while rasterizing or encoding a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing the wire payload.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Failure in the exchange between session and regenerator.
    #[error("transport error: {0}")]
    Transport(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrawlError {
    /// Build a [`ScrawlError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrawlError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`ScrawlError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ScrawlError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ScrawlError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
