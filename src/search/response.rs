//! Navigation of the search endpoint's response JSON.
//!
//! The provider wraps results in several renderer layers and mixes video
//! items with ads, shelves, and "did you mean" cells. Everything here is a
//! pure function over `serde_json::Value` so fixtures can drive it in tests.

use serde_json::Value;
use tracing::debug;

use super::SearchResult;

const RESULTS_POINTER: &str =
    "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";

/// Collect up to `limit` video results from a raw search response, in the
/// provider's ranking order. Non-video items are skipped silently.
pub fn parse_search_results(root: &Value, limit: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    let Some(sections) = root.pointer(RESULTS_POINTER).and_then(Value::as_array) else {
        debug!("search response carried no result sections");
        return results;
    };

    for section in sections {
        let Some(items) = section
            .pointer("/itemSectionRenderer/contents")
            .and_then(Value::as_array)
        else {
            continue;
        };
        for item in items {
            if results.len() >= limit {
                return results;
            }
            if let Some(result) = video_result(item) {
                results.push(result);
            }
        }
    }

    results
}

fn video_result(item: &Value) -> Option<SearchResult> {
    let renderer = item.get("videoRenderer")?;
    let id = renderer.get("videoId").and_then(Value::as_str)?.to_string();
    let title = text_of(renderer.get("title")?)?;

    // Short form ("1.2M views") is preferred; live and very new videos only
    // carry the long form.
    let views = renderer
        .get("shortViewCountText")
        .and_then(text_of)
        .or_else(|| renderer.get("viewCountText").and_then(text_of));

    Some(SearchResult {
        url: format!("https://www.youtube.com/watch?v={}", id),
        id,
        title,
        channel: renderer.get("ownerText").and_then(text_of),
        views,
        published: renderer.get("publishedTimeText").and_then(text_of),
    })
}

/// Renderer text nodes are either `{"simpleText": ...}` or `{"runs": [...]}`.
fn text_of(node: &Value) -> Option<String> {
    if let Some(simple) = node.get("simpleText").and_then(Value::as_str) {
        return Some(simple.to_string());
    }
    let runs = node.get("runs").and_then(Value::as_array)?;
    let joined: String = runs
        .iter()
        .filter_map(|run| run.get("text").and_then(Value::as_str))
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
