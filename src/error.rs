/// Crate-level error type for the skylark feature-extraction library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid configuration or parameter value.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A required dimension is zero or invalid.
    #[error("invalid size for `{name}`: {value} ({reason})")]
    InvalidSize {
        name: &'static str,
        value: usize,
        reason: &'static str,
    },

    /// Audio data is empty when a non-empty signal was required.
    #[error("audio data is empty")]
    EmptyAudio,

    /// Audio data contains non-finite values (NaN or Inf).
    #[error("audio data contains non-finite values")]
    NonFiniteAudio,

    /// A chunk is too short for a feature producer to operate on.
    ///
    /// This aborts the whole extraction call: skipping chunks would break
    /// the row/onset alignment guarantee of the output table.
    #[error("chunk too short: {len} samples, need at least {needed}")]
    InsufficientChunk { len: usize, needed: usize },

    /// WAV file I/O errors (hound wraps the underlying `std::io` failure).
    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}

/// Convenience Result type for skylark operations.
pub type Result<T> = std::result::Result<T, Error>;
