//! Caption Scout
//!
//! Small command-line tools for a desktop application that embeds video
//! content: search YouTube for candidate videos with verified caption
//! availability, and fetch a video's caption track as flat text. Each tool
//! prints a single JSON value on stdout and exits 0; all diagnostics go to
//! stderr.

pub mod config;
pub mod error;
pub mod output;
pub mod scoring;
pub mod search;
pub mod transcript;
pub mod video_id;

// Re-export main types for easy access
pub use crate::config::Config;
pub use crate::error::{Result, ScoutError};
pub use crate::output::ErrorReport;
pub use crate::search::{find_candidates, Candidate, SearchClient, SearchResult};
pub use crate::transcript::{
    CaptionAvailability, CaptionTrack, TranscriptClient, TranscriptResult,
};
pub use crate::video_id::extract_video_id;
