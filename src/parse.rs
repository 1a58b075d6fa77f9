//! Parser for the plain text report printed by `xrandr`

use thiserror::Error;

use crate::types::{Mode, ParseModeError, Screen};

/// A line of the listing did not match the expected format
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected line {line_number} in xrandr output: `{line}`")]
pub struct FormatError {
    /// 1-based line number within the listing
    pub line_number: usize,
    /// The offending line, verbatim
    pub line: String,
    #[source]
    pub source: ParseModeError,
}

/// Classifies a header line, returns `Some(connected)` for headers
fn header_state(line: &str) -> Option<bool> {
    if line.contains(" connected ") {
        Some(true)
    } else if line.contains(" disconnected ") {
        Some(false)
    } else {
        None
    }
}

/// Lazily yields the screens of an xrandr listing in the order they are reported
///
/// The iterator stops after the first [`FormatError`].
pub struct Screens<I> {
    lines: I,
    line_number: usize,
    current: Option<Screen>,
    failed: bool,
}

impl<I, S> Iterator for Screens<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Screen, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line.as_ref();

            if let Some(connected) = header_state(line) {
                let name = line.split_whitespace().next().unwrap_or_default();
                let screen = Screen::new(name, connected);
                log::trace!("Header on line {}: {}", self.line_number, screen);

                if let Some(finished) = self.current.replace(screen) {
                    return Some(Ok(finished));
                }
            } else if let Some(screen) = self.current.as_mut() {
                match line.parse::<Mode>() {
                    Ok(mode) => screen.modes.push(mode),
                    Err(source) => {
                        self.failed = true;
                        self.current = None;
                        return Some(Err(FormatError {
                            line_number: self.line_number,
                            line: line.to_string(),
                            source,
                        }));
                    }
                }
            }
        }

        self.current.take().map(Ok)
    }
}

/// Parses the lines of an xrandr listing into screens
///
/// Lines before the first header are ignored. Every other line must be a header or a mode line.
pub fn parse_screens<I>(lines: I) -> Screens<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Screens {
        lines: lines.into_iter(),
        line_number: 0,
        current: None,
        failed: false,
    }
}
