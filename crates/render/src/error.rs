use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering and writing markdown
#[derive(Error, Debug)]
pub enum RenderError {
    /// A style name with no registry entry
    #[error("unknown style {name:?}")]
    UnknownStyle { name: String },

    /// IO error occurred writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Create an unknown style error
    pub fn unknown_style(name: impl Into<String>) -> Self {
        Self::UnknownStyle { name: name.into() }
    }
}
