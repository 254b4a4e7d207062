//! Terminal color tables
//!
//! A [`Theme`] is built once at startup and handed to the renderer. When colors
//! are disabled every helper returns the plain text.

use crate::types::{Grade, Kda};
use crossterm::style::{Attribute, Color, ContentStyle};

/// Foreground and optional background for a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStyle {
    pub foreground: Color,
    pub background: Option<Color>,
}

impl TierStyle {
    const fn fg(foreground: Color) -> Self {
        Self {
            foreground,
            background: None,
        }
    }
}

/// Immutable color configuration for every rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    enabled: bool,
    tiers: Vec<(String, TierStyle)>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Theme {
    pub fn new(enabled: bool) -> Self {
        let tiers = [
            ("Iron", TierStyle::fg(Color::DarkGrey)),
            ("Bronze", TierStyle::fg(Color::DarkYellow)),
            ("Silver", TierStyle::fg(Color::Grey)),
            ("Gold", TierStyle::fg(Color::Yellow)),
            ("Platinum", TierStyle::fg(Color::Cyan)),
            ("Emerald", TierStyle::fg(Color::Green)),
            ("Diamond", TierStyle::fg(Color::Blue)),
            ("Master", TierStyle::fg(Color::Magenta)),
            ("Grandmaster", TierStyle::fg(Color::Red)),
            (
                "Challenger",
                TierStyle {
                    foreground: Color::White,
                    background: Some(Color::DarkRed),
                },
            ),
        ]
        .into_iter()
        .map(|(tier, style)| (tier.to_string(), style))
        .collect();

        Self { enabled, tiers }
    }

    /// Theme that never emits escape codes
    pub fn plain() -> Self {
        Self::new(false)
    }

    fn apply(&self, text: &str, style: ContentStyle) -> String {
        if !self.enabled {
            return text.to_string();
        }
        style.apply(text).to_string()
    }

    fn style(foreground: Option<Color>, bold: bool) -> ContentStyle {
        let mut style = ContentStyle {
            foreground_color: foreground,
            ..ContentStyle::default()
        };
        if bold {
            style.attributes.set(Attribute::Bold);
        }
        style
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        self.apply(text, Self::style(Some(color), false))
    }

    pub fn bold(&self, text: &str) -> String {
        self.apply(text, Self::style(None, true))
    }

    pub fn bold_paint(&self, text: &str, color: Color) -> String {
        self.apply(text, Self::style(Some(color), true))
    }

    pub fn heading(&self, text: &str) -> String {
        let mut style = Self::style(None, true);
        style.attributes.set(Attribute::Underlined);
        self.apply(text, style)
    }

    /// Color a rank label by the longest tier name it starts with
    pub fn rank(&self, rank: &str) -> String {
        let style = self
            .tiers
            .iter()
            .filter(|(tier, _)| rank.starts_with(tier.as_str()))
            .max_by_key(|(tier, _)| tier.len())
            .map(|(_, style)| *style);

        match style {
            Some(tier) => {
                let mut style = Self::style(Some(tier.foreground), false);
                style.background_color = tier.background;
                self.apply(rank, style)
            }
            None => rank.to_string(),
        }
    }

    pub fn grade_color(grade: Grade) -> Color {
        match grade.letter() {
            'S' => Color::Magenta,
            'A' => Color::Yellow,
            'B' => Color::Green,
            'C' => Color::Cyan,
            _ => Color::Red,
        }
    }

    pub fn grade(&self, grade: Grade) -> String {
        self.paint(grade.label(), Self::grade_color(grade))
    }

    pub fn kda_color(ratio: f64) -> Color {
        if ratio >= 4.0 {
            Color::Magenta
        } else if ratio >= 3.0 {
            Color::Yellow
        } else if ratio >= 2.5 {
            Color::Green
        } else if ratio >= 2.0 {
            Color::Cyan
        } else if ratio >= 1.5 {
            Color::White
        } else if ratio >= 1.0 {
            Color::DarkYellow
        } else {
            Color::Red
        }
    }

    /// `kills/deaths/assists` colored by the game's ratio
    pub fn kda(&self, kda: Kda) -> String {
        let text = format!("{}/{}/{}", kda.kills, kda.deaths, kda.assists);
        self.paint(&text, Self::kda_color(kda.ratio()))
    }

    /// `+N LP`, `-N LP` or `±0 LP`
    pub fn lp_change(&self, lp_change: i64) -> String {
        let (text, color) = lp_change_parts(lp_change);
        self.bold_paint(&text, color)
    }

    pub fn progress_color(percentage: u32) -> Color {
        match percentage {
            p if p >= 80 => Color::Green,
            p if p >= 60 => Color::Yellow,
            p if p >= 40 => Color::Cyan,
            _ => Color::Red,
        }
    }
}

/// Plain text and color for an LP change
pub fn lp_change_parts(lp_change: i64) -> (String, Color) {
    match lp_change {
        change if change > 0 => (format!("+{} LP", change), Color::Green),
        change if change < 0 => (format!("{} LP", change), Color::Red),
        _ => ("±0 LP".to_string(), Color::Yellow),
    }
}
