//! Application-level error types.

use std::fmt;

use thiserror::Error;

/// Window-manager features that a platform may not offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowAttribute {
    /// Keep the window stacked above all others.
    Topmost,
    /// A native "maximize" verb.
    Maximize,
}

impl fmt::Display for WindowAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowAttribute::Topmost => f.write_str("topmost"),
            WindowAttribute::Maximize => f.write_str("maximize"),
        }
    }
}

/// Errors that can occur within the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("unknown color name: {0:?}")]
    InvalidColor(String),

    #[error("window attribute not supported on this platform: {0}")]
    Unsupported(WindowAttribute),

    #[error("screen dimensions are not available")]
    ScreenSizeUnknown,
}

impl AppError {
    /// Best-effort window attributes fail with this class only; everything
    /// else is a real error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, AppError::Unsupported(_))
    }
}

/// Convenience alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;
