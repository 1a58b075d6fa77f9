//! Selecting, ordering and placing screens

use regex::Regex;
use thiserror::Error;

use crate::types::{Mode, Screen};

/// Sort key of screens that are left out of the layout
pub const EXCLUDED: isize = -1;

/// Error type for the layout module
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid screen pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Internal error: connected screen {0} has no mode to activate")]
    NoMode(String),
    #[error("Screen {0} does not fit: the layout is wider than {max} pixels", max = u32::MAX)]
    OffsetOverflow(String),
}

type Result<T = ()> = std::result::Result<T, LayoutError>;

/// The ordered list of name patterns a user wants active
///
/// A pattern matches a screen if it matches a prefix of the screen's name.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    patterns: Vec<Regex>,
}

impl Selection {
    /// Compiles the given patterns, in the order the screens should be placed
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&format!("^(?:{})", pattern)).map_err(|source| {
                    LayoutError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Whether no patterns were given
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the sort key of `screen`, turning it off if it is connected but unmatched
    ///
    /// Connected screens get the index of the first matching pattern, or `0` if there are no
    /// patterns at all. Everything else gets [`EXCLUDED`].
    pub fn position(&self, screen: &mut Screen) -> isize {
        if screen.connected {
            if self.is_empty() {
                return 0;
            }

            if let Some(index) = self.patterns.iter().position(|p| p.is_match(&screen.name)) {
                return index as isize;
            }

            log::warn!("No pattern matches {}, turning it off", screen.name);
            screen.connected = false;
        }

        EXCLUDED
    }

    /// Stable sorts `screens` by their [`position`](Self::position)
    pub fn arrange(&self, screens: Vec<Screen>) -> Vec<Screen> {
        let mut keyed = screens
            .into_iter()
            .map(|mut screen| (self.position(&mut screen), screen))
            .collect::<Vec<_>>();

        keyed.sort_by_key(|(key, _)| *key);

        keyed.into_iter().map(|(_, screen)| screen).collect()
    }
}

/// What to do with one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement<'a> {
    Off {
        name: &'a str,
    },
    On {
        name: &'a str,
        mode: &'a Mode,
        x: u32,
    },
}

impl Placement<'_> {
    /// The xrandr output name
    pub fn name(&self) -> &str {
        match self {
            Placement::Off { name } | Placement::On { name, .. } => name,
        }
    }

    /// The xrandr argument groups for this output
    pub fn groups(&self) -> [Vec<String>; 2] {
        let output = vec!["--output".to_string(), self.name().to_string()];
        match self {
            Placement::Off { .. } => [output, vec!["--off".to_string()]],
            Placement::On { mode, x, .. } => [
                output,
                vec![
                    "--mode".to_string(),
                    mode.resolution(),
                    "--pos".to_string(),
                    format!("{}x0", x),
                    "--rotate".to_string(),
                    "normal".to_string(),
                ],
            ],
        }
    }
}

/// Lazily places screens left to right in the order given
pub struct Layout<I> {
    screens: I,
    x: u32,
}

impl<'a, I> Iterator for Layout<I>
where
    I: Iterator<Item = &'a Screen>,
{
    type Item = Result<Placement<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let screen = self.screens.next()?;

        if !screen.connected {
            return Some(Ok(Placement::Off { name: &screen.name }));
        }

        let Some(mode) = screen.preferred_mode() else {
            return Some(Err(LayoutError::NoMode(screen.name.clone())));
        };

        log::debug!("Placing {} at {}x0 with mode {}", screen.name, self.x, mode);
        if let Some(current) = screen.current_mode().filter(|current| *current != mode) {
            log::debug!("{} currently uses {}", screen.name, current);
        }

        let x = self.x;
        let Some(next) = x.checked_add(mode.width) else {
            return Some(Err(LayoutError::OffsetOverflow(screen.name.clone())));
        };
        self.x = next;

        Some(Ok(Placement::On {
            name: &screen.name,
            mode,
            x,
        }))
    }
}

/// Places the (already arranged) screens next to each other, starting at x = 0
pub fn assemble<'a, I>(screens: I) -> Layout<I::IntoIter>
where
    I: IntoIterator<Item = &'a Screen>,
{
    Layout {
        screens: screens.into_iter(),
        x: 0,
    }
}

/// Returns the full command line: `program` followed by the arguments of every placement
pub fn command_line<'a, I>(program: &str, screens: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = &'a Screen>,
{
    let mut command = vec![program.to_string()];
    for placement in assemble(screens) {
        command.extend(placement?.groups().into_iter().flatten());
    }
    Ok(command)
}
