use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use deriv_regex::{matches, MatchConfig, Matcher, RegexStorage, Rewrite};

/// Match strings against regular expressions using Brzozowski derivatives
#[derive(Parser, Debug)]
#[command(name = "deriv-regex", version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Derive exactly by the derivative rules, without simplifying
    #[arg(long, global = true)]
    exact: bool,

    /// Reject inputs longer than this many characters
    #[arg(long, global = true, value_name = "CHARS")]
    max_input: Option<usize>,

    /// Give up when a derivative grows past this many nodes
    #[arg(long, global = true, value_name = "NODES")]
    max_nodes: Option<usize>,

    /// Give up when a regex nests deeper than this (defaults to 512 with --exact)
    #[arg(long, global = true, value_name = "LEVELS")]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print whether each input matches the pattern, one per line
    Match {
        pattern: String,

        #[arg(required = true)]
        inputs: Vec<String>,

        /// Exit with status 1 if any input does not match
        #[arg(long)]
        fail_on_mismatch: bool,
    },

    /// Print the parsed pattern and whether it accepts the empty string
    Parse { pattern: String },

    /// Print the derivative after each character of the input
    Explain { pattern: String, input: String },

    /// Match a few sample inputs
    Demo,
}

impl Cli {
    fn config(&self) -> MatchConfig {
        let mut config = MatchConfig::new();
        if self.exact {
            config = config.rewrite(Rewrite::Exact);
        }
        if let Some(limit) = self.max_input {
            config = config.max_input_len(limit);
        }
        if let Some(limit) = self.max_nodes {
            config = config.max_nodes(limit);
        }
        if let Some(limit) = self.max_depth {
            config = config.max_depth(limit);
        }
        config
    }
}

const SAMPLES: [(&str, &str); 4] = [
    ("abc", "abc"),
    ("abc", "def"),
    ("abc", "a.c"),
    ("abc", "a.*c"),
];

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

/// Returns false when the command should exit unsuccessfully without an error.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let matcher = Matcher::new(cli.config());

    match cli.command {
        Command::Match {
            pattern,
            inputs,
            fail_on_mismatch,
        } => {
            let storage = RegexStorage::new();
            let regex = storage
                .parse(&pattern)
                .with_context(|| format!("invalid pattern {:?}", pattern))?;

            let mut all_matched = true;
            for input in &inputs {
                let matched = matcher
                    .is_match(regex, input)
                    .with_context(|| format!("matching {:?}", input))?;
                println!("{}", matched);
                all_matched &= matched;
            }
            Ok(all_matched || !fail_on_mismatch)
        }
        Command::Parse { pattern } => {
            let storage = RegexStorage::new();
            let regex = storage
                .parse(&pattern)
                .with_context(|| format!("invalid pattern {:?}", pattern))?;
            println!("{}", regex);
            println!("nullable: {}", regex.is_nullable());
            Ok(true)
        }
        Command::Explain { pattern, input } => {
            let storage = RegexStorage::new();
            let regex = storage
                .parse(&pattern)
                .with_context(|| format!("invalid pattern {:?}", pattern))?;
            let steps = matcher
                .explain(&storage, regex, &input)
                .with_context(|| format!("matching {:?}", input))?;

            println!("{}", regex);
            let mut last = regex;
            for (c, derived) in &steps {
                println!("{:?} => {}", c, derived);
                last = *derived;
            }
            if steps.len() < input.chars().count() {
                info!("stopped after {} characters: nothing can match", steps.len());
            }
            println!("matched: {}", last.is_nullable());
            Ok(true)
        }
        Command::Demo => {
            for (input, pattern) in SAMPLES {
                println!("{}", matches(input, pattern)?);
            }
            Ok(true)
        }
    }
}
