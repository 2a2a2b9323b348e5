use anyhow::Result;
use clap::{Arg, Command};
use tracing::debug;

use caption_scout::{extract_video_id, output, Config, ScoutError, TranscriptClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging goes to stderr; stdout carries the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("caption_scout=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("get-transcript")
        .version("0.1.0")
        .about("Fetch a video's caption track as flat text")
        .arg(
            Arg::new("url")
                .value_name("URL_OR_ID")
                .help("Watch URL, short link, shorts/embed URL, or bare 11-character video ID")
                .required(false),
        )
        .arg(
            Arg::new("lang")
                .value_name("LANG")
                .help("Preferred caption language code")
                .required(false),
        )
        .get_matches();

    let Some(input) = matches.get_one::<String>("url") else {
        output::emit_error(ScoutError::MissingUrl);
        return Ok(());
    };
    let lang = matches
        .get_one::<String>("lang")
        .map(String::as_str)
        .unwrap_or("en");

    let video_id = match extract_video_id(input) {
        Ok(id) => id,
        Err(e) => {
            output::emit_error(e);
            return Ok(());
        }
    };

    debug!("fetching transcript for {} (preferred: {})", video_id, lang);

    let client = TranscriptClient::new(Config::default());
    match client.transcript(&video_id, lang).await {
        Ok(result) => output::emit(&result),
        Err(e) => output::emit_error(e),
    }

    Ok(())
}
