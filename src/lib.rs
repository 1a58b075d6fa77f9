//! A library to arrange the outputs reported by `xrandr`.
//!
//! The listing printed by `xrandr` is parsed into [`Screen`]s, ordered and filtered by a
//! [`Selection`] of name patterns, placed side by side by [`assemble`] and turned back into an
//! `xrandr` command line.

mod format;
mod layout;
mod parse;
mod types;
mod xrandr;

pub use format::*;
pub use layout::*;
pub use parse::*;
pub use types::*;
pub use xrandr::*;
