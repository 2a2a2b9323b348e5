use anyhow::Result;
use clap::{Arg, Command};
use tracing::debug;

use caption_scout::{find_candidates, output, Config, ScoutError};

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

    let matches = Command::new("find-videos")
        .version("0.1.0")
        .about("Search YouTube for caption-verified candidate videos")
        .arg(
            Arg::new("query")
                .value_name("QUERY")
                .help("Free-text search query")
                .required(false),
        )
        .get_matches();

    let Some(query) = matches.get_one::<String>("query") else {
        output::emit_error(ScoutError::MissingQuery);
        return Ok(());
    };

    debug!("searching for '{}'", query);

    let config = Config::default();
    match find_candidates(query, &config).await {
        Ok(candidates) => output::emit(&candidates),
        Err(e) => output::emit_error(e),
    }

    Ok(())
}
