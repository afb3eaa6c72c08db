/// Convenience result type used across the builder.
pub type PibResult<T> = Result<T, PibError>;

/// Top-level error taxonomy used by the cache, the compositor and the orchestrator.
#[derive(thiserror::Error, Debug)]
pub enum PibError {
    /// Malformed snapshot or side-store record.
    #[error("validation error: {0}")]
    Validation(String),

    /// Snapshot produced by a capture script older than the supported floor.
    #[error("snapshot version {found} is outdated (minimum {floor}), update the bookmark")]
    Outdated {
        /// Version marker found in the snapshot.
        found: f64,
        /// Lowest supported version marker.
        floor: f64,
    },

    /// Component access outside of a fixed-length value.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the indexed value.
        len: usize,
    },

    /// Argument with the wrong shape (crop arity, empty resize, mismatched canvases).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Encoded bytes could not be turned into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// Remote answered with anything but 200.
    #[error("HTTP Error code {status} for url: {url}")]
    Http {
        /// Status code returned by the server.
        status: u16,
        /// Fully qualified URL that was requested.
        url: String,
    },

    /// A section builder failed; `report` holds the rendered cause chain.
    #[error("section '{section}' failed:\n{report}")]
    Section {
        /// Section identifier (`party`, `summon`, ...).
        section: String,
        /// Human readable cause chain.
        report: String,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PibError {
    /// Build a [`PibError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PibError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`PibError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`PibError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Render this error and every `source()` below it, one cause per line.
    pub fn report(&self) -> String {
        let mut out = self.to_string();
        let mut cur = std::error::Error::source(self);
        while let Some(cause) = cur {
            let line = cause.to_string();
            if !out.ends_with(&line) {
                out.push_str("\ncaused by: ");
                out.push_str(&line);
            }
            cur = cause.source();
        }
        out
    }
}

impl From<serde_json::Error> for PibError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
