//! Error type shared by every fallible page helper.

/// Failure raised by a page helper or by the [`UiEnv`](crate::env::UiEnv) it runs against.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// A selector passed by the caller matched nothing.
    #[error("no element matches selector {selector:?}")]
    ElementNotFound { selector: String },

    /// No container was given and the default container is absent.
    #[error("no container given and default container {selector:?} is missing")]
    MissingContainer { selector: String },

    /// The clipboard write was rejected.
    #[error("clipboard write failed: {0}")]
    Clipboard(String),

    /// The page has no clipboard API (insecure context or unsupported browser).
    #[error("clipboard API unavailable")]
    ClipboardUnavailable,

    /// Blob or object URL creation failed.
    #[error("blob creation failed: {0}")]
    Blob(String),

    /// A DOM call threw.
    #[error("DOM operation failed: {0}")]
    Dom(String),

    /// The page configuration could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),
}
