//! Watch-page fallback for the player response.
//!
//! When the player endpoint yields nothing usable, the same object is
//! available embedded in the watch page as `ytInitialPlayerResponse`. The
//! page is parsed for script tags and the first complete JSON value after
//! the assignment is taken, which sidesteps brace-counting around string
//! literals.

use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse";

/// Extract the embedded player response object from watch-page HTML.
pub fn extract_player_response(html: &str) -> Option<Value> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").ok()?;

    for script in document.select(&selector) {
        let text: String = script.text().collect();
        if let Some(player) = player_json_from_script(&text) {
            return Some(player);
        }
    }

    debug!("no script tag carried {}", PLAYER_RESPONSE_MARKER);
    None
}

fn player_json_from_script(text: &str) -> Option<Value> {
    let marker = text.find(PLAYER_RESPONSE_MARKER)?;
    let rest = &text[marker..];
    let brace = rest.find('{')?;

    // The stream deserializer stops at the end of the first complete JSON
    // value, leaving the trailing ";" and whatever else the script holds.
    let mut stream = serde_json::Deserializer::from_str(&rest[brace..]).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) if value.is_object() => Some(value),
        _ => None,
    }
}
