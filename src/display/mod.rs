//! Terminal presentation
//!
//! This module renders the history table, the statistics screen, the banner and
//! the help text. All output goes through a caller-supplied writer.

pub mod charts;
pub mod report;
pub mod table;
pub mod theme;

use crate::config::DisplaySettings;
use crate::ladder::RankLadder;
use crossterm::style::Color;
use std::io::{self, Write};

// Re-export commonly used types
pub use theme::Theme;

/// Width of the history table separators
pub const TABLE_WIDTH: usize = 120;
/// Width of the statistics screen separators
pub const REPORT_WIDTH: usize = 60;

/// Renders every view with one theme and ladder
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'a> {
    pub theme: &'a Theme,
    pub ladder: &'a RankLadder,
    pub settings: &'a DisplaySettings,
}

impl<'a> Renderer<'a> {
    pub fn new(theme: &'a Theme, ladder: &'a RankLadder, settings: &'a DisplaySettings) -> Self {
        Self {
            theme,
            ladder,
            settings,
        }
    }

    pub fn banner(&self, out: &mut impl Write) -> io::Result<()> {
        let banner = [
            "╔══════════════════════════════════════╗",
            "║          🎮 Rank Tracker 🎮          ║",
            "╚══════════════════════════════════════╝",
        ];
        writeln!(out)?;
        for line in banner {
            writeln!(out, "{}", self.theme.bold_paint(line, Color::Magenta))?;
        }
        Ok(())
    }

    pub fn help(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.theme.bold("🎮 AVAILABLE COMMANDS"))?;
        writeln!(out, "{}", "─".repeat(29))?;
        for (key, description) in [
            ("a", "➕ Add an entry"),
            ("p", "📊 Show history"),
            ("s", "📈 Statistics"),
            ("h", "❓ This help"),
            ("q", "👋 Save and quit"),
        ] {
            writeln!(out, "{} - {}", self.theme.bold(key), description)?;
        }
        Ok(())
    }
}

/// Pad already-styled text to `width` visible columns, given its plain form
pub fn pad_styled(styled: &str, plain: &str, width: usize) -> String {
    let visible = plain.chars().count();
    if visible >= width {
        return styled.to_string();
    }
    format!("{}{}", styled, " ".repeat(width - visible))
}
