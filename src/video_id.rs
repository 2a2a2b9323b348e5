//! Video ID resolution from URLs and bare tokens.

use url::Url;

use crate::error::{Result, ScoutError};

/// Resolve an 11-character video ID from a watch URL, short link, shorts or
/// embed URL, or a bare ID token. Anything else is `InvalidVideoId`.
pub fn extract_video_id(input: &str) -> Result<String> {
    let raw = input.trim();
    if is_bare_id(raw) {
        return Ok(raw.to_string());
    }
    Url::parse(raw)
        .ok()
        .and_then(|parsed| id_from_url(&parsed))
        .ok_or(ScoutError::InvalidVideoId)
}

/// Exactly 11 characters from the video-ID alphabet.
fn is_bare_id(token: &str) -> bool {
    token.len() == 11
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn id_from_url(u: &Url) -> Option<String> {
    let host = u.host_str()?.to_ascii_lowercase();

    // youtu.be/<id>
    if host == "youtu.be" || host == "www.youtu.be" {
        let seg = u.path_segments()?.find(|s| !s.is_empty())?;
        return Some(seg.to_string());
    }

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        // youtube.com/watch?v=<id>
        if u.path() == "/watch" {
            for (k, v) in u.query_pairs() {
                if k == "v" && !v.trim().is_empty() {
                    return Some(v.trim().to_string());
                }
            }
            return None;
        }

        // youtube.com/shorts/<id>, /embed/<id>
        let mut segs = u.path_segments()?;
        let prefix = segs.next()?;
        if prefix == "shorts" || prefix == "embed" {
            let id = segs.next()?.trim();
            if !id.is_empty() {
                return Some(id.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_all_supported_shapes() {
        for input in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "dQw4w9WgXcQ",
        ] {
            assert_eq!(
                extract_video_id(input).unwrap(),
                "dQw4w9WgXcQ",
                "failed for {input}"
            );
        }
    }

    #[test]
    fn rejects_wrong_length_bare_tokens() {
        assert!(extract_video_id("AAAAAAAAAA").is_err()); // 10 chars
        assert!(extract_video_id("AAAAAAAAAAAA").is_err()); // 12 chars
    }

    #[test]
    fn rejects_unrelated_input() {
        assert!(extract_video_id("").is_err());
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_video_id("https://www.youtube.com/playlist?list=PL123").is_err());
        assert!(extract_video_id("not a url at all").is_err());
    }

    #[test]
    fn eleven_char_constraint_applies_to_bare_input_only() {
        // URLs carry the ID verbatim, the bare-token rule is what enforces
        // the alphabet and length.
        assert!(is_bare_id("abc-DEF_123"));
        assert!(!is_bare_id("abc DEF 123"));
        assert!(!is_bare_id("abcdef"));
    }
}
