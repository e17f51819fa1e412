//! The interactive keystroke loop.

use std::io::Write;

use anyhow::{Context, Result};
use dlb_complete::AutoComplete;
use rustyline::error::ReadlineError;

const PROMPT: &str = "Enter one letter then press enter to get auto-complete suggestions \
                      (enter < to delete last character and . to stop) ...";
const LINE_PROMPT: &str = "> ";

#[derive(Debug, Default)]
pub struct Options {
    /// List every prediction instead of only the first.
    pub show_all: bool,
}

/// One read from a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Line(String),
    /// Ctrl-C.
    Interrupted,
    Eof,
}

/// Where the loop gets its lines from.
pub trait LineSource {
    fn read_line(&mut self, prompt: &str) -> Result<Input>;
}

impl LineSource for rustyline::DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Input> {
        match self.readline(prompt) {
            Ok(line) => Ok(Input::Line(line)),
            Err(ReadlineError::Eof) => Ok(Input::Eof),
            Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
            Err(err) => Err(err).context("error reading input"),
        }
    }
}

/// Reads one character per line from `source` until the user stops.
///
/// `<` retreats, `.` ends the current word, anything else advances by its
/// first character. Ctrl-C abandons the current word and starts over. End of
/// input ends the session.
pub fn run<S: LineSource, W: Write>(
    ac: &mut AutoComplete,
    source: &mut S,
    mut out: W,
    options: &Options,
) -> Result<()> {
    writeln!(out, "Testing autocomplete:")?;

    'word: loop {
        writeln!(out, "{PROMPT}")?;
        loop {
            let line = match source.read_line(LINE_PROMPT)? {
                Input::Line(line) => line,
                Input::Interrupted => {
                    writeln!(out, "^C")?;
                    ac.reset();
                    continue 'word;
                }
                Input::Eof => return Ok(()),
            };
            let Some(c) = line.chars().next() else {
                writeln!(out, "{PROMPT}")?;
                continue;
            };

            match c {
                '.' => break,
                '<' => {
                    if let Err(err) = ac.retreat() {
                        writeln!(out, "Nothing to delete ({err})")?;
                        continue;
                    }
                }
                _ => {
                    ac.advance(c);
                }
            }
            report(ac, &mut out, options)?;
        }

        if !ac.prefix().is_empty() && !ac.is_word() {
            writeln!(out, "Do you want to add {}? (y/n)", ac.prefix())?;
            if confirm(source)? {
                ac.add_prefix()?;
            }
        }

        writeln!(out, "Do you want to continue? (y/n)")?;
        let again = confirm(source)?;
        ac.reset();
        if !again {
            return Ok(());
        }
    }
}

fn report<W: Write>(ac: &AutoComplete, out: &mut W, options: &Options) -> Result<()> {
    let total = ac.number_of_predictions();
    let shown = if options.show_all {
        ac.retrieve_predictions().map(|all| all.join(", "))
    } else {
        ac.retrieve_prediction()
    };

    match shown {
        Some(shown) if total > 0 => writeln!(
            out,
            "{} --> {shown} ({total} predictions total)",
            ac.prefix()
        )?,
        _ => writeln!(out, "No predictions found for {}", ac.prefix())?,
    }
    Ok(())
}

/// Anything but an answer starting with `y` (Ctrl-C and end of input
/// included) means no.
fn confirm<S: LineSource>(source: &mut S) -> Result<bool> {
    match source.read_line(LINE_PROMPT)? {
        Input::Line(line) => Ok(line
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))),
        Input::Interrupted | Input::Eof => Ok(false),
    }
}
