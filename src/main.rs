// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use wikindex::build::{run_build, run_full_text, run_links, Corpus};
use wikindex::clean::run_clean;
use wikindex::config::{Config, IndexPaths};
use wikindex::{
    build_titles, inspect_index, open_index, open_text_index, query_backlinks, query_fulltext,
    query_titles, random_title,
};

mod cli;
use cli::{display, Cli, Commands, SearchMode};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so query results on stdout stay pipeable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Build {
            corpus,
            index,
            with_links,
        } => {
            let (corpus, index) = corpus_and_index(&config, corpus, index)?;
            let summary = run_build(&corpus, &index, with_links).map_err(|e| e.to_string())?;
            display::print_build_summary(&summary);
        }
        Commands::FullText { corpus, index } => {
            let (corpus, index) = corpus_and_index(&config, corpus, index)?;
            let summary = run_full_text(&corpus, &index).map_err(|e| e.to_string())?;
            display::print_build_summary(&summary);
        }
        Commands::Links { corpus, index } => {
            let (corpus, index) = corpus_and_index(&config, corpus, index)?;
            let summary = run_links(&corpus, &index).map_err(|e| e.to_string())?;
            display::print_build_summary(&summary);
        }
        Commands::Search {
            index,
            query,
            corpus,
            mode,
            json,
        } => {
            let results = match mode {
                SearchMode::Text => {
                    let handle = open_text_index(&index).map_err(|e| e.to_string())?;
                    query_fulltext(&handle, &query).map_err(|e| e.to_string())?
                }
                SearchMode::Backlinks => {
                    let handle = open_index(&index).map_err(|e| e.to_string())?;
                    query_backlinks(&handle, &query).map_err(|e| e.to_string())?
                }
                SearchMode::Titles => {
                    let corpus = pick_dir(corpus, &config.corpus_dir, "corpus")
                        .map_err(|_| "title search needs --corpus".to_string())?;
                    let titles = build_titles(&open_corpus(&config, corpus))
                        .map_err(|e| e.to_string())?;
                    query_titles(&titles, &query)
                }
            };

            if json {
                let out = serde_json::to_string(&results).map_err(|e| e.to_string())?;
                println!("{}", out);
            } else {
                display::print_results(&results);
            }
        }
        Commands::Random { corpus, seed } => {
            let corpus = pick_dir(corpus, &config.corpus_dir, "corpus")?;
            let titles = build_titles(&open_corpus(&config, corpus)).map_err(|e| e.to_string())?;
            let pick = match seed {
                Some(seed) => random_title(&titles, &mut StdRng::seed_from_u64(seed)),
                None => random_title(&titles, &mut rand::rng()),
            };
            let title = pick.ok_or_else(|| "corpus has no titles".to_string())?;
            println!("{}", title);
        }
        Commands::Inspect { index } => {
            let index = pick_dir(index, &config.index_dir, "index")?;
            let tables = inspect_index(&index).map_err(|e| e.to_string())?;
            display::print_tables(&index.display().to_string(), &tables);
        }
        Commands::Clean { src, dest } => {
            let summary = run_clean(&src, &dest).map_err(|e| e.to_string())?;
            display::print_clean_summary(&summary);
        }
    }

    Ok(())
}

/// Explicit argument, else the config file's value.
fn pick_dir(arg: Option<PathBuf>, fallback: &Option<PathBuf>, what: &str) -> Result<PathBuf, String> {
    arg.or_else(|| fallback.clone()).ok_or_else(|| {
        format!(
            "no {} directory given; pass one or set {}_dir in --config",
            what, what
        )
    })
}

fn open_corpus(config: &Config, dir: impl AsRef<Path>) -> Corpus {
    Corpus::new(dir.as_ref()).with_extension(config.page_extension.as_str())
}

fn corpus_and_index(
    config: &Config,
    corpus: Option<PathBuf>,
    index: Option<PathBuf>,
) -> Result<(Corpus, IndexPaths), String> {
    let corpus = pick_dir(corpus, &config.corpus_dir, "corpus")?;
    let index = pick_dir(index, &config.index_dir, "index")?;
    Ok((open_corpus(config, corpus), IndexPaths::new(index)))
}
