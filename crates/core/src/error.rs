/// Result type alias for devtools_core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the utility functions.
///
/// Every variant is a local validation failure that the caller can recover
/// from by fixing its input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub enum Error {
    /// The color text does not start with a recognized prefix, or its
    /// `rgb(...)`/`hsl(...)` body does not match the expected pattern.
    #[error("{0}")]
    InvalidFormat(String),

    /// The color text has a recognized format but does not describe a valid color.
    #[error("{0}")]
    InvalidColor(String),

    /// A caller supplied constraint was violated.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl Error {
    /// Short machine readable name of the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidFormat(_) => "invalid_format",
            Error::InvalidColor(_) => "invalid_color",
            Error::Validation(_) => "validation_error",
            Error::InvalidJson(_) => "invalid_json",
        }
    }
}
