use core::fmt;
use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `<width>x<height>[i] <rate>...`, with arbitrary leading and trailing whitespace
static MODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)x(\d+)(i?)((?:\s+\d+\.\d+ ?\*?\+?)+)\s*$")
        .expect("mode grammar is a valid regex")
});

/// A single refresh rate token, e.g. `60.00*+` or `59.94 +`
static RATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+\.\d+) ?(\*?)(\+?)").expect("refresh rate grammar is a valid regex")
});

/// Errors that occur while parsing a mode or a refresh rate from a string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseModeError {
    #[error("Expected `<width>x<height>[i] <rate>...`")]
    Grammar,
    #[error("Expected a refresh rate like `60.00*+`")]
    RefreshRate,
    #[error("Error parsing integer")]
    IntError(#[from] std::num::ParseIntError),
    #[error("Error parsing refresh rate")]
    FloatError(#[from] std::num::ParseFloatError),
}

/// One refresh rate advertised for a mode
///
/// `is_current` corresponds to the `*` marker, `is_preferred` to the `+` marker.
#[derive(Debug, Clone, Copy)]
pub struct RefreshRate {
    pub value: f64,
    pub is_current: bool,
    pub is_preferred: bool,
}

impl RefreshRate {
    /// Creates a refresh rate
    pub fn new(value: f64, is_current: bool, is_preferred: bool) -> Self {
        Self {
            value,
            is_current,
            is_preferred,
        }
    }
}

impl PartialEq for RefreshRate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RefreshRate {}

impl PartialOrd for RefreshRate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RefreshRate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .total_cmp(&other.value)
            .then(self.is_current.cmp(&other.is_current))
            .then(self.is_preferred.cmp(&other.is_preferred))
    }
}

impl fmt::Display for RefreshRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.value)?;
        if self.is_current {
            write!(f, "*")?;
        }
        if self.is_preferred {
            write!(f, "+")?;
        }
        Ok(())
    }
}

impl FromStr for RefreshRate {
    type Err = ParseModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let captures = RATE_PATTERN
            .captures(s)
            .filter(|c| c.get(0).is_some_and(|m| m.as_str() == s))
            .ok_or(ParseModeError::RefreshRate)?;

        Ok(Self::new(
            captures[1].parse()?,
            !captures[2].is_empty(),
            !captures[3].is_empty(),
        ))
    }
}

/// One resolution/timing option advertised by a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub width: u32,
    pub height: u32,
    pub interlaced: bool,
    /// Never empty; kept in listing order
    pub refresh_rates: Vec<RefreshRate>,
}

impl Mode {
    /// Number of pixels
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Whether the mode is not interlaced
    pub fn is_progressive(&self) -> bool {
        !self.interlaced
    }

    /// The resolution in the `<width>x<height>` form xrandr expects
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }

    /// Whether one of the rates carries the `*` marker
    pub fn is_current(&self) -> bool {
        self.refresh_rates.iter().any(|rate| rate.is_current)
    }
}

impl PartialOrd for Mode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Modes order by area, then width, then height, then their refresh rates
/// compared position by position, and finally progressive above interlaced.
impl Ord for Mode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.area()
            .cmp(&other.area())
            .then(self.width.cmp(&other.width))
            .then(self.height.cmp(&other.height))
            .then_with(|| self.refresh_rates.cmp(&other.refresh_rates))
            .then(self.is_progressive().cmp(&other.is_progressive()))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.resolution())?;
        if self.interlaced {
            write!(f, "i")?;
        }
        for rate in &self.refresh_rates {
            write!(f, " {}", rate)?;
        }
        Ok(())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let captures = MODE_PATTERN.captures(s).ok_or(ParseModeError::Grammar)?;

        let refresh_rates = RATE_PATTERN
            .captures_iter(&captures[4])
            .map(|rate| -> std::result::Result<_, ParseModeError> {
                Ok(RefreshRate::new(
                    rate[1].parse()?,
                    !rate[2].is_empty(),
                    !rate[3].is_empty(),
                ))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            width: captures[1].parse()?,
            height: captures[2].parse()?,
            interlaced: !captures[3].is_empty(),
            refresh_rates,
        })
    }
}

/// An output reported by xrandr together with the modes it advertises
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub name: String,
    pub connected: bool,
    /// Kept in listing order
    pub modes: Vec<Mode>,
}

impl Screen {
    /// Creates a screen without modes
    pub fn new(name: impl Into<String>, connected: bool) -> Self {
        Self {
            name: name.into(),
            connected,
            modes: Vec::new(),
        }
    }

    /// Returns the best mode, or `None` if the screen advertises no modes
    ///
    /// When several modes compare equal the first one listed wins.
    pub fn preferred_mode(&self) -> Option<&Mode> {
        self.modes
            .iter()
            .reduce(|best, mode| if mode > best { mode } else { best })
    }

    /// Returns the mode xrandr marked as currently in use, if any
    pub fn current_mode(&self) -> Option<&Mode> {
        self.modes.iter().find(|mode| mode.is_current())
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} modes)",
            self.name,
            if self.connected {
                "connected"
            } else {
                "disconnected"
            },
            self.modes.len()
        )
    }
}
