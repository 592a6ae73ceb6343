/// Convenience result type used across the showcase generator.
pub type ShowcaseResult<T> = Result<T, ShowcaseError>;

/// Top-level error taxonomy used by the pipeline stages.
#[derive(thiserror::Error, Debug)]
pub enum ShowcaseError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// A sampling range is empty or inverted.
    #[error("range error: {0}")]
    Range(String),

    /// Network request failed before a response was available.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A server answered with a non-success status.
    #[error("http status {status} for {url}")]
    HttpStatus {
        /// Requested URL.
        url: String,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The SVG conversion step rejected its input.
    #[error("svg conversion failed: {status}: {body}")]
    Conversion {
        /// HTTP status code returned by the conversion endpoint, or 0 for in-process
        /// conversion.
        status: u16,
        /// Response body, usually an error message from the service.
        body: String,
    },

    /// Raster bytes could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShowcaseError {
    /// Build a [`ShowcaseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShowcaseError::Range`] value.
    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    /// Build a [`ShowcaseError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`ShowcaseError::HttpStatus`] value.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Build a [`ShowcaseError::Conversion`] value.
    pub fn conversion(status: u16, body: impl Into<String>) -> Self {
        Self::Conversion {
            status,
            body: body.into(),
        }
    }

    /// Build a [`ShowcaseError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ShowcaseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
