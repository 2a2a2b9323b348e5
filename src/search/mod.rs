//! Video search client and the finder pipeline.

pub mod response;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, ScoutError};
use crate::scoring::{parse_age_days, parse_view_count, popularity_score};
use crate::transcript::{CaptionAvailability, TranscriptClient};

const SEARCH_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/search";

/// Raw record from the search provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub channel: Option<String>,
    /// Display text, e.g. "1.2M views"
    pub views: Option<String>,
    /// Display text, e.g. "3 days ago"
    pub published: Option<String>,
    pub url: String,
}

/// One finder output entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    pub channel: Option<String>,
    pub views: Option<String>,
    pub published: Option<String>,
    pub score: f64,
    pub url: String,
}

/// Client for the search provider
#[derive(Clone)]
pub struct SearchClient {
    client: Client,
    config: Config,
}

impl SearchClient {
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds))
            .user_agent(&config.http.user_agent)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Run a free-text search, returning up to the configured number of
    /// video results in the provider's ranking order.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let body = serde_json::json!({
            "context": {
                "client": {
                    "hl": "en",
                    "gl": "US",
                    "clientName": "WEB",
                    "clientVersion": self.config.http.client_version,
                }
            },
            "query": query,
        });

        let http_response = self
            .client
            .post(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.config.http.api_key.as_str()),
                ("prettyPrint", "false"),
            ])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !http_response.status().is_success() {
            return Err(ScoutError::Provider(format!(
                "search returned HTTP {}",
                http_response.status()
            )));
        }

        let root: Value = http_response.json().await?;
        let results = response::parse_search_results(&root, self.config.search.request_size);
        debug!("search for '{}' returned {} video results", query, results.len());
        Ok(results)
    }
}

/// Find up to five caption-verified candidate videos for a query.
///
/// Each search result is probed for caption availability in ranking order;
/// survivors are scored but never re-sorted, so the provider's ranking is
/// what the caller sees. When nothing survives the probe, the top raw
/// results are returned marked unverified so the caller always sees
/// something.
pub async fn find_candidates(query: &str, config: &Config) -> Result<Vec<Candidate>> {
    let search = SearchClient::new(config.clone());
    let transcripts = TranscriptClient::new(config.clone());

    info!("🔍 Searching for candidate videos: {}", query);
    let results = search.search(query).await?;

    let mut candidates = Vec::new();
    for result in &results {
        match transcripts.probe(&result.id).await {
            CaptionAvailability::Available => candidates.push(verified_candidate(result)),
            availability => {
                debug!("skipping {} ({:?})", result.id, availability);
            }
        }
        if candidates.len() >= config.search.max_candidates {
            break;
        }
    }

    if candidates.is_empty() {
        warn!(
            "⚠️ No caption-verified results for '{}', returning unverified search order",
            query
        );
        candidates = unverified_candidates(&results, config.search.max_candidates);
    }

    candidates.truncate(config.search.max_candidates);
    info!("returning {} candidates for '{}'", candidates.len(), query);
    Ok(candidates)
}

fn verified_candidate(result: &SearchResult) -> Candidate {
    let views = parse_view_count(result.views.as_deref().unwrap_or(""));
    let age_days = parse_age_days(result.published.as_deref().unwrap_or(""));

    Candidate {
        id: result.id.clone(),
        title: result.title.clone(),
        channel: result.channel.clone(),
        views: result.views.clone(),
        published: result.published.clone(),
        score: popularity_score(views, age_days),
        url: result.url.clone(),
    }
}

/// Fallback shape: raw top results, flagged in the title, score 0.
fn unverified_candidates(results: &[SearchResult], cap: usize) -> Vec<Candidate> {
    results
        .iter()
        .take(cap)
        .map(|result| Candidate {
            id: result.id.clone(),
            title: format!("{} (Unverified)", result.title),
            channel: result.channel.clone(),
            views: result.views.clone(),
            published: result.published.clone(),
            score: 0.0,
            url: result.url.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: &str, title: &str, views: Option<&str>, published: Option<&str>) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: title.to_string(),
            channel: Some("Channel".to_string()),
            views: views.map(str::to_string),
            published: published.map(str::to_string),
            url: format!("https://www.youtube.com/watch?v={}", id),
        }
    }

    #[test]
    fn verified_candidates_are_scored() {
        let candidate = verified_candidate(&result(
            "AAAAAAAAAAA",
            "Scored",
            Some("1.2M views"),
            Some("3 days ago"),
        ));
        assert_eq!(candidate.title, "Scored");
        assert_eq!(candidate.score, 1_200_000.0 / 4.0);
        assert_eq!(candidate.views.as_deref(), Some("1.2M views"));
    }

    #[test]
    fn missing_metadata_scores_zero() {
        let candidate = verified_candidate(&result("AAAAAAAAAAA", "Bare", None, None));
        assert_eq!(candidate.score, 0.0);
    }

    #[test]
    fn unverified_fallback_flags_titles_and_zeroes_scores() {
        let results: Vec<SearchResult> = (0..8)
            .map(|i| {
                result(
                    &format!("{:011}", i),
                    &format!("Video {}", i),
                    Some("10 views"),
                    Some("1 week ago"),
                )
            })
            .collect();

        let candidates = unverified_candidates(&results, 5);
        assert_eq!(candidates.len(), 5);
        for (i, candidate) in candidates.iter().enumerate() {
            assert_eq!(candidate.title, format!("Video {} (Unverified)", i));
            assert_eq!(candidate.score, 0.0);
        }
    }

    #[test]
    fn unverified_fallback_handles_short_result_lists() {
        let results = vec![result("AAAAAAAAAAA", "Only", None, None)];
        let candidates = unverified_candidates(&results, 5);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].title, "Only (Unverified)");
    }

    #[test]
    fn candidate_serializes_to_the_expected_shape() {
        let candidate = verified_candidate(&result(
            "dQw4w9WgXcQ",
            "Shape",
            Some("10 views"),
            Some("2 days ago"),
        ));
        let json = serde_json::to_value(&candidate).unwrap();
        for key in ["id", "title", "channel", "views", "published", "score", "url"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert!(json["score"].as_f64().unwrap() > 0.0);
    }
}
