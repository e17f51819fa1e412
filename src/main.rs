mod cli;
mod dictionary;
mod repl;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use dlb_complete::AutoComplete;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

use crate::cli::Cli;

fn main() -> Result<()> {
    // Logging setup. Logs go to stderr so they never interleave with prompts.
    let fmt_layer = fmt::layer().with_writer(io::stderr);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env()
        .context("error reading logging directives")?;
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let args = Cli::parse();

    let mut ac = AutoComplete::new();
    let loaded = dictionary::load_file(&mut ac, &args.dictionary)?;
    ac.shrink_to_fit();
    info!(loaded, path = %args.dictionary.display(), "dictionary loaded");

    if args.dump {
        print!("{}", ac.trie().dump());
    }

    let options = repl::Options {
        show_all: args.all,
    };
    let mut editor = rustyline::DefaultEditor::new().context("error starting line editor")?;
    repl::run(&mut ac, &mut editor, io::stdout(), &options)
}
