//! Clap command definition.

use clap::{value_parser, Arg, ArgAction, Command};
use tweetrank_core::Algorithm;

/// Build the `tweetrank` command.
pub fn build_cli() -> Command {
    let algorithms: Vec<&'static str> = Algorithm::all().iter().map(|a| a.id()).collect();

    Command::new("tweetrank")
        .about("Rank a tweet corpus against a free-text query")
        .arg(
            Arg::new("query")
                .help("Search query")
                .required(true),
        )
        .arg(
            Arg::new("corpus")
                .long("corpus")
                .short('c')
                .help("CSV corpus file")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Config file (default: tweetrank.toml next to the corpus, if present)"),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .help("Write a commented default config file first if none exists")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('a')
                .help("Ranking algorithm (default from config)")
                .value_parser(algorithms),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .short('n')
                .help("Number of results (default from config)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("search-id")
                .long("search-id")
                .help("Identifier the results are stored under (default: random UUID)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue),
        )
}
