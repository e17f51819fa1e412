use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use dlb_complete::AutoComplete;
use tracing::{debug, warn};

/// Adds every line of `path` as a word. Returns the number of new words.
pub fn load_file(ac: &mut AutoComplete, path: &Path) -> Result<usize> {
    let file = File::open(path)
        .with_context(|| format!("error opening dictionary file {}", path.display()))?;
    load(ac, BufReader::new(file))
}

pub fn load<R: BufRead>(ac: &mut AutoComplete, reader: R) -> Result<usize> {
    let mut added = 0usize;
    for (idx, line) in reader.lines().enumerate() {
        let line = line.context("error reading dictionary")?;
        let word = line.trim_end_matches('\r');
        if word.is_empty() {
            warn!(line = idx + 1, "skipping blank dictionary line");
            continue;
        }
        if ac.add(word)? {
            added += 1;
        } else {
            debug!(line = idx + 1, word, "duplicate dictionary word");
        }
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load() {
        let mut ac = AutoComplete::new();
        let input = "cat\r\ncar\n\ncard\ncat\n";
        assert_eq!(load(&mut ac, input.as_bytes()).unwrap(), 3);
        assert_eq!(ac.len(), 3);
        assert!(ac.trie().contains("car"));
        assert!(!ac.trie().contains("car\r"));
    }

    #[test]
    fn test_load_missing_file() {
        let mut ac = AutoComplete::new();
        let err = load_file(&mut ac, Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("error opening dictionary file"));
    }
}
