// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help and usage-error styling.

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use std::io::IsTerminal;

pub mod codes {
    /// Headings and the usage line: steel blue
    pub const HEADING: u8 = 74;
    /// Flags and the `--`/`++` markers: light grey
    pub const FLAG: u8 = 250;
    /// Value names such as `<MS>`: medium grey
    pub const VALUE: u8 = 245;
    /// Accepted values in error messages: green
    pub const VALID: u8 = 114;
    /// Rejected values and the `error:` prefix: soft red
    pub const INVALID: u8 = 174;
}

/// `NO_COLOR=1` disables, `COLOR=1` forces, otherwise color follows whether
/// stderr is a terminal.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stderr().is_terminal()
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// Clap styles for `--help` and argument errors.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(fg(codes::HEADING).bold())
        .usage(fg(codes::HEADING).bold())
        .literal(fg(codes::FLAG))
        .placeholder(fg(codes::VALUE))
        .valid(fg(codes::VALID))
        .invalid(fg(codes::INVALID).bold())
        .error(fg(codes::INVALID).bold())
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
