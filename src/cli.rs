use std::path::PathBuf;

use clap::Parser;

/// Interactive autocomplete over a word list.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Dictionary file, one word per line.
    pub dictionary: PathBuf,
    /// Show every prediction instead of only the first.
    #[arg(long)]
    pub all: bool,
    /// Print the trie structure after loading the dictionary.
    #[arg(long)]
    pub dump: bool,
}
