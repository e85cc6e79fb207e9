//! Core error type.

use thiserror::Error;

/// Errors produced by `gs-core` primitives.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate ({lat}, {lon}) is outside the WGS-84 range")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("unknown {kind} tag: {value:?}")]
    UnknownTag { kind: &'static str, value: String },
}

/// Shorthand result type for `gs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
