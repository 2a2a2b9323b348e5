//! Transcript provider client.
//!
//! Talks to the unauthenticated player endpoint to list caption tracks,
//! picks the best track (manual before auto-generated, translation as a
//! last resort), and fetches its timed text in `json3` form. When the
//! player endpoint gives nothing usable the watch page is scraped for the
//! same object.

pub mod captions;
mod watch_page;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, ScoutError};

pub use captions::Segment;

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";
const WATCH_URL: &str = "https://www.youtube.com/watch";

/// One caption track as listed by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Timed-text URL; format and translation are appended as query params
    pub base_url: String,
    /// Human-readable track name, when the provider sends one
    pub name: Option<String>,
    pub language_code: String,
    /// Speech-to-text track rather than human-authored captions
    pub is_generated: bool,
    /// Whether the provider offers machine translation for this track
    pub is_translatable: bool,
}

/// Typed outcome of a caption-availability probe. The finder only branches
/// on `Available`, but the distinction is kept for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionAvailability {
    Available,
    /// The video exposes no caption data at all
    Disabled,
    /// Caption data exists but no track is listed
    NotFound,
    /// Transport-level failure; availability unknown
    TransientError,
}

impl CaptionAvailability {
    fn from_outcome<T>(outcome: &Result<T>) -> Self {
        match outcome {
            Ok(_) => CaptionAvailability::Available,
            Err(ScoutError::CaptionsDisabled) => CaptionAvailability::Disabled,
            Err(ScoutError::NoTranscript) => CaptionAvailability::NotFound,
            Err(ScoutError::Http(_)) => CaptionAvailability::TransientError,
            Err(_) => CaptionAvailability::NotFound,
        }
    }
}

/// Fetcher output: the flattened transcript plus track metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub video_id: String,
    pub text: String,
    pub language: String,
    pub is_generated: bool,
}

/// A chosen track, possibly slated for machine translation.
#[derive(Debug, Clone)]
struct SelectedTrack {
    track: CaptionTrack,
    translate_to: Option<String>,
}

/// Client for the transcript provider
#[derive(Clone)]
pub struct TranscriptClient {
    client: Client,
    config: Config,
}

impl TranscriptClient {
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .user_agent(&config.http.user_agent)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// List the caption tracks available for a video.
    pub async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let player = match self.player_response(video_id).await {
            Ok(player) => player,
            Err(e) => {
                debug!("player endpoint failed for {}: {}, trying watch page", video_id, e);
                self.watch_page_player(video_id).await?
            }
        };
        captions::tracks_from_player(&player)
    }

    /// Probe whether any caption track exists. Never fails: every error is
    /// folded into the availability enum.
    pub async fn probe(&self, video_id: &str) -> CaptionAvailability {
        let outcome = self.list_tracks(video_id).await;
        let availability = CaptionAvailability::from_outcome(&outcome);
        if availability != CaptionAvailability::Available {
            debug!("no usable captions for {}: {:?}", video_id, availability);
        }
        availability
    }

    /// Fetch and flatten the best available transcript for a video.
    ///
    /// `preferred_lang` is tried first, ahead of the configured language
    /// list; manual tracks beat generated ones within each language; the
    /// first track is machine-translated when nothing matches directly.
    pub async fn transcript(&self, video_id: &str, preferred_lang: &str) -> Result<TranscriptResult> {
        let tracks = self.list_tracks(video_id).await?;
        let selected = self.select_track(&tracks, preferred_lang)?;
        let segments = self
            .fetch_segments(&selected.track, selected.translate_to.as_deref())
            .await?;
        let text = captions::flatten_segments(&segments);

        Ok(TranscriptResult {
            video_id: video_id.to_string(),
            text,
            language: selected
                .translate_to
                .unwrap_or_else(|| selected.track.language_code.clone()),
            is_generated: selected.track.is_generated,
        })
    }

    /// Selection ladder: manual track in a preferred language, else a
    /// generated one, else translate whatever the provider lists first.
    fn select_track(&self, tracks: &[CaptionTrack], preferred_lang: &str) -> Result<SelectedTrack> {
        let mut languages: Vec<&str> = vec![preferred_lang];
        for lang in &self.config.transcript.preferred_languages {
            if !languages.contains(&lang.as_str()) {
                languages.push(lang);
            }
        }

        for lang in &languages {
            if let Some(track) = tracks
                .iter()
                .find(|t| !t.is_generated && t.language_code == *lang)
            {
                return Ok(SelectedTrack {
                    track: track.clone(),
                    translate_to: None,
                });
            }
        }

        for lang in &languages {
            if let Some(track) = tracks
                .iter()
                .find(|t| t.is_generated && t.language_code == *lang)
            {
                return Ok(SelectedTrack {
                    track: track.clone(),
                    translate_to: None,
                });
            }
        }

        if let Some(track) = tracks.first() {
            if track.is_translatable {
                warn!(
                    "no {} captions, translating {} track",
                    preferred_lang, track.language_code
                );
                return Ok(SelectedTrack {
                    track: track.clone(),
                    translate_to: Some(self.config.transcript.translation_target.clone()),
                });
            }
        }

        Err(ScoutError::NoAdaptableTranscript)
    }

    /// Fetch a track's timed text, optionally machine-translated.
    async fn fetch_segments(
        &self,
        track: &CaptionTrack,
        translate_to: Option<&str>,
    ) -> Result<Vec<Segment>> {
        let mut request = self
            .client
            .get(&track.base_url)
            .query(&[("fmt", "json3")]);
        if let Some(lang) = translate_to {
            request = request.query(&[("tlang", lang)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ScoutError::Provider(format!(
                "caption fetch returned HTTP {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        Ok(captions::parse_json3(&data))
    }

    async fn player_response(&self, video_id: &str) -> Result<Value> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": "en",
                    "clientName": "WEB",
                    "clientVersion": self.config.http.client_version,
                }
            },
            "videoId": video_id,
        });

        let response = self
            .client
            .post(PLAYER_ENDPOINT)
            .query(&[
                ("key", self.config.http.api_key.as_str()),
                ("prettyPrint", "false"),
            ])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ScoutError::Provider(format!(
                "player endpoint returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    async fn watch_page_player(&self, video_id: &str) -> Result<Value> {
        let response = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id), ("hl", "en")])
            .send()
            .await?;
        let html = response.text().await?;

        watch_page::extract_player_response(&html).ok_or_else(|| {
            ScoutError::Provider("player response missing from watch page".to_string())
        })
    }
}
