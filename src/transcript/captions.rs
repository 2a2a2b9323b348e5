//! Caption-track listing and timed-text parsing.
//!
//! Pure functions over the player response and the `json3` timed-text
//! payload, kept free of I/O so fixture JSON can exercise them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ScoutError};

use super::CaptionTrack;

/// One timed caption segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    /// Start time in seconds
    pub start: f64,
    /// Duration in seconds
    pub duration: f64,
    /// Segment text with embedded newlines already flattened to spaces
    pub text: String,
}

/// Pull the caption track list out of a player response, distinguishing
/// "captions are disabled" from "no tracks listed" and from an unplayable
/// video.
pub fn tracks_from_player(player: &Value) -> Result<Vec<CaptionTrack>> {
    match player
        .pointer("/playabilityStatus/status")
        .and_then(Value::as_str)
    {
        Some("OK") | None => {}
        Some(status) => {
            let reason = player
                .pointer("/playabilityStatus/reason")
                .and_then(Value::as_str)
                .unwrap_or(status);
            return Err(ScoutError::Provider(format!(
                "video is not playable: {}",
                reason
            )));
        }
    }

    let Some(renderer) = player.pointer("/captions/playerCaptionsTracklistRenderer") else {
        return Err(ScoutError::CaptionsDisabled);
    };

    let tracks: Vec<CaptionTrack> = renderer
        .get("captionTracks")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(caption_track).collect())
        .unwrap_or_default();

    if tracks.is_empty() {
        return Err(ScoutError::NoTranscript);
    }
    Ok(tracks)
}

fn caption_track(value: &Value) -> Option<CaptionTrack> {
    Some(CaptionTrack {
        base_url: value.get("baseUrl").and_then(Value::as_str)?.to_string(),
        name: value
            .pointer("/name/simpleText")
            .and_then(Value::as_str)
            .or_else(|| value.pointer("/name/runs/0/text").and_then(Value::as_str))
            .map(str::to_string),
        language_code: value
            .get("languageCode")
            .and_then(Value::as_str)
            .unwrap_or("und")
            .to_string(),
        // "asr" marks speech-to-text tracks; anything else is human-made
        is_generated: value
            .get("kind")
            .and_then(Value::as_str)
            .map(|kind| kind == "asr")
            .unwrap_or(false),
        is_translatable: value
            .get("isTranslatable")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

/// Parse a `json3` timed-text payload into segments. Events without text
/// (window definitions, metadata) are skipped.
pub fn parse_json3(data: &Value) -> Vec<Segment> {
    let mut segments = Vec::new();

    let Some(events) = data.get("events").and_then(Value::as_array) else {
        return segments;
    };

    for event in events {
        let Some(segs) = event.get("segs").and_then(Value::as_array) else {
            continue;
        };

        let start_ms = event.get("tStartMs").and_then(Value::as_u64).unwrap_or(0);
        let duration_ms = event
            .get("dDurationMs")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        let text = segs
            .iter()
            .filter_map(|seg| seg.get("utf8").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("")
            .replace('\n', " ")
            .trim()
            .to_string();

        if !text.is_empty() {
            segments.push(Segment {
                start: start_ms as f64 / 1000.0,
                duration: duration_ms as f64 / 1000.0,
                text,
            });
        }
    }

    segments
}

/// Join segment texts into the flat transcript string the caller receives:
/// single spaces between segments, no embedded newlines.
pub fn flatten_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.trim())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(lang: &str, kind: Option<&str>, translatable: bool) -> Value {
        let mut t = json!({
            "baseUrl": format!("https://example.invalid/api/timedtext?lang={}", lang),
            "name": { "simpleText": format!("{} track", lang) },
            "languageCode": lang,
            "isTranslatable": translatable
        });
        if let Some(kind) = kind {
            t.as_object_mut()
                .unwrap()
                .insert("kind".to_string(), json!(kind));
        }
        t
    }

    #[test]
    fn lists_tracks_with_metadata() {
        let player = json!({
            "playabilityStatus": { "status": "OK" },
            "captions": {
                "playerCaptionsTracklistRenderer": {
                    "captionTracks": [
                        track("en", None, true),
                        track("de", Some("asr"), false)
                    ]
                }
            }
        });
        let tracks = tracks_from_player(&player).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code, "en");
        assert!(!tracks[0].is_generated);
        assert!(tracks[0].is_translatable);
        assert!(tracks[1].is_generated);
    }

    #[test]
    fn missing_captions_means_disabled() {
        let player = json!({ "playabilityStatus": { "status": "OK" } });
        assert!(matches!(
            tracks_from_player(&player),
            Err(ScoutError::CaptionsDisabled)
        ));
    }

    #[test]
    fn empty_track_list_means_no_transcript() {
        let player = json!({
            "playabilityStatus": { "status": "OK" },
            "captions": { "playerCaptionsTracklistRenderer": { "captionTracks": [] } }
        });
        assert!(matches!(
            tracks_from_player(&player),
            Err(ScoutError::NoTranscript)
        ));
    }

    #[test]
    fn unplayable_video_reports_the_reason() {
        let player = json!({
            "playabilityStatus": { "status": "ERROR", "reason": "Video unavailable" }
        });
        let err = tracks_from_player(&player).unwrap_err();
        assert!(err.to_string().contains("Video unavailable"));
    }

    #[test]
    fn parses_json3_events() {
        let data = json!({
            "events": [
                { "tStartMs": 0, "dDurationMs": 1500, "segs": [{ "utf8": "line one\n" }] },
                { "tStartMs": 1500, "aAppend": 1 },
                { "tStartMs": 2000, "dDurationMs": 900, "segs": [{ "utf8": "line " }, { "utf8": "two" }] },
                { "tStartMs": 3000, "dDurationMs": 100, "segs": [{ "utf8": "\n" }] }
            ]
        });
        let segments = parse_json3(&data);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "line one");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].duration, 1.5);
        assert_eq!(segments[1].text, "line two");
    }

    #[test]
    fn flattens_segments_with_single_spaces() {
        let segments = vec![
            Segment {
                start: 0.0,
                duration: 1.0,
                text: "line one".to_string(),
            },
            Segment {
                start: 1.0,
                duration: 1.0,
                text: "line two".to_string(),
            },
        ];
        assert_eq!(flatten_segments(&segments), "line one line two");
    }

    #[test]
    fn flatten_drops_empty_segments() {
        let segments = vec![
            Segment {
                start: 0.0,
                duration: 1.0,
                text: "  ".to_string(),
            },
            Segment {
                start: 1.0,
                duration: 1.0,
                text: "hello".to_string(),
            },
        ];
        assert_eq!(flatten_segments(&segments), "hello");
    }

    #[test]
    fn empty_payload_parses_to_nothing() {
        assert!(parse_json3(&json!({})).is_empty());
        assert_eq!(flatten_segments(&[]), "");
    }
}
