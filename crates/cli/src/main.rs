//! tweetrank CLI: one search over a CSV corpus, then exit.
//!
//! ```text
//! tweetrank --corpus tweets.csv [--config tweetrank.toml] [--init-config] \
//!           [--algorithm tfidf|bm25|composite] [--top N] [--search-id ID] [--json] QUERY
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

mod commands;
mod format;

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::ArgMatches;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tweetrank_core::Algorithm;
use tweetrank_search::{load_corpus, CorpusIndex, EngineConfig, SearchEngine, CONFIG_FILE_NAME};

use commands::build_cli;
use format::{format_error, format_results, OutputMode};

fn main() {
    let matches = build_cli().get_matches();
    init_tracing();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    if let Err(e) = run(&matches, output_mode) {
        eprintln!("{}", format_error(&e, output_mode));
        process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(matches: &ArgMatches, output_mode: OutputMode) -> anyhow::Result<()> {
    let corpus_path = PathBuf::from(
        matches
            .get_one::<String>("corpus")
            .context("--corpus is required")?,
    );
    let query = matches
        .get_one::<String>("query")
        .context("a query is required")?;

    let config = load_config(
        matches.get_one::<String>("config").map(Path::new),
        &corpus_path,
        matches.get_flag("init-config"),
    )?;

    let documents = load_corpus(&corpus_path)
        .with_context(|| format!("Failed to load corpus '{}'", corpus_path.display()))?;
    let corpus = CorpusIndex::new(documents).context("Failed to index corpus")?;
    let engine = SearchEngine::new(Arc::new(corpus)).with_config(config)?;

    let algorithm = match matches.get_one::<String>("algorithm") {
        Some(name) => name.parse::<Algorithm>()?,
        None => engine.default_algorithm(),
    };
    let top_n = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or_else(|| engine.default_top_n());
    let search_id = matches
        .get_one::<String>("search-id")
        .cloned()
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    info!(%algorithm, top_n, %search_id, "Searching");
    let results = engine.search_with(query, &search_id, algorithm, top_n)?;

    println!("{}", format_results(&search_id, &results, output_mode));
    Ok(())
}

/// `--config` if given; otherwise `tweetrank.toml` beside the corpus when it
/// exists; otherwise defaults.
///
/// With `init`, the default file is written to that path first unless
/// something is already there.
fn load_config(
    explicit: Option<&Path>,
    corpus_path: &Path,
    init: bool,
) -> anyhow::Result<EngineConfig> {
    let path = match (explicit, corpus_path.parent()) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(dir)) => dir.join(CONFIG_FILE_NAME),
        (None, None) => return Ok(EngineConfig::default()),
    };

    if init && !path.exists() {
        EngineConfig::write_default_if_missing(&path)
            .with_context(|| format!("Failed to write config '{}'", path.display()))?;
        info!(path = %path.display(), "Wrote default config");
    }

    if explicit.is_none() && !path.exists() {
        return Ok(EngineConfig::default());
    }

    info!(path = %path.display(), "Using config");
    EngineConfig::from_file(&path)
        .with_context(|| format!("Failed to load config '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_config_file_means_defaults() {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("tweets.csv");

        let config = load_config(None, &corpus, false).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert!(!dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn init_config_writes_beside_corpus() {
        let dir = TempDir::new().unwrap();
        let corpus = dir.path().join("tweets.csv");

        let config = load_config(None, &corpus, true).unwrap();
        assert_eq!(config, EngineConfig::default());

        let written = std::fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(written, EngineConfig::default_toml());
    }

    #[test]
    fn init_config_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "default_top_n = 3\n").unwrap();

        let corpus = dir.path().join("tweets.csv");

        let config = load_config(Some(path.as_path()), &corpus, true).unwrap();
        assert_eq!(config.default_top_n, 3);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");
        let corpus = dir.path().join("tweets.csv");

        assert!(load_config(Some(path.as_path()), &corpus, false).is_err());
        assert!(load_config(Some(path.as_path()), &corpus, true).is_ok());
        assert!(path.exists());
    }
}
