//! Terminal styling switch
//!
//! Styling is off until [`init_from_env`] turns it on, so output written to a
//! pipe or an in-memory buffer stays plain text.

use std::fmt::Display;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

use crossterm::style::StyledContent;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enables styling when stdout is a terminal and `NO_COLOR` is unset or empty
pub fn init_from_env() {
    let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
    ENABLED.store(std::io::stdout().is_terminal() && !no_color, Ordering::Relaxed);
}

/// Whether escape codes are emitted
pub fn enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Renders `content` with its style, or as its plain text when styling is off
pub fn paint<D: Display>(content: StyledContent<D>) -> String {
    paint_if(enabled(), content)
}

fn paint_if<D: Display>(enabled: bool, content: StyledContent<D>) -> String {
    if enabled {
        content.to_string()
    } else {
        content.content().to_string()
    }
}
