//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `SirError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `sir-core` and a common base for sub-crates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SirError {
    /// A [`Configuration`](crate::Configuration) failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid plane {width}x{height}: both sides must be finite and positive")]
    InvalidPlane { width: f32, height: f32 },
}

/// Shorthand result type for all `sir-*` crates.
pub type SirResult<T> = Result<T, SirError>;
