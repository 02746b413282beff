//! Error types for rowpack-layout.

use thiserror::Error;

/// Errors raised while building items or configuring a calculator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Aspect ratio was zero, negative or not finite.
    #[error("Aspect ratio must be positive and greater than zero (got {aspect_ratio}){}", key_suffix(.key))]
    InvalidAspectRatio {
        aspect_ratio: f32,
        key: Option<String>,
    },

    /// Row configuration is unusable.
    #[error("Invalid row configuration: {0}")]
    InvalidConfig(String),
}

fn key_suffix(key: &Option<String>) -> String {
    key.as_ref()
        .map(|k| format!(" for key: {k}"))
        .unwrap_or_default()
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
