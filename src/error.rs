//! Error types shared by both tools.
//!
//! Every variant's `Display` text is what the calling application sees in the
//! `{"error": ...}` output, so the messages are part of the external contract.

/// Result type for caption-scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Error types for caption-scout operations
#[derive(thiserror::Error, Debug)]
pub enum ScoutError {
    #[error("No query")]
    MissingQuery,

    #[error("No URL provided")]
    MissingUrl,

    #[error("Invalid Video ID")]
    InvalidVideoId,

    /// The video exposes no caption data at all.
    #[error("Subtitles are disabled for this video")]
    CaptionsDisabled,

    /// Caption data exists but lists no usable tracks.
    #[error("No transcript available for this video")]
    NoTranscript,

    /// None of the selection strategies (manual, generated, translated)
    /// produced a track.
    #[error("No adaptable transcript found.")]
    NoAdaptableTranscript,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered, but not in a shape we can use.
    #[error("unexpected provider response: {0}")]
    Provider(String),
}
