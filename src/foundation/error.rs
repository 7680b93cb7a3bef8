/// Convenience result type used across backdrop.
pub type BackdropResult<T> = Result<T, BackdropError>;

/// Errors raised at the crate's edges: loading configs, host setup, rasterization and output.
#[derive(thiserror::Error, Debug)]
pub enum BackdropError {
    /// Invalid or unknown data in a background config.
    #[error("config error: {0}")]
    Config(String),

    /// Errors while rasterizing or blurring a mounted layer.
    #[error("render error: {0}")]
    Render(String),

    /// A host capability is missing or unusable (size, device pixel ratio).
    #[error("environment error: {0}")]
    Environment(String),

    /// Errors when serializing or deserializing configs.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BackdropError {
    /// Build a [`BackdropError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`BackdropError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// A host capability the canvas simulation cannot run without is missing or unusable.
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }

    /// Build a [`BackdropError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
