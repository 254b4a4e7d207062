//! Statistics screen

use crate::display::charts::{bar, lp_trend, winrate_bar, Trend};
use crate::display::{pad_styled, Renderer, Theme, REPORT_WIDTH};
use crate::stats::{Form, StatsReport, StreakKind};
use crate::types::{Grade, MatchLog};
use crossterm::style::Color;
use std::cmp::Ordering;
use std::io::{self, Write};

/// Cells in a rank distribution bar
const RANK_BAR_WIDTH: usize = 20;
/// Cells in a grade distribution bar
const GRADE_BAR_WIDTH: usize = 15;

impl Renderer<'_> {
    fn section(&self, out: &mut impl Write, title: &str) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", self.theme.bold(title))?;
        writeln!(out, "{}", "═".repeat(REPORT_WIDTH))
    }

    /// Winrate bar with its color and icon
    pub fn winrate_chart(&self, winrate: f64) -> String {
        let (color, icon) = if winrate >= 70.0 {
            (Color::Green, "🔥")
        } else if winrate >= 60.0 {
            (Color::Yellow, "⚡")
        } else if winrate >= 50.0 {
            (Color::Cyan, "⚖️")
        } else {
            (Color::Red, "💀")
        };
        let text = format!("[{}] {:.1}% {}", winrate_bar(winrate), winrate, icon);
        self.theme.paint(&text, color)
    }

    /// LP trend plot as printable lines
    pub fn trend_lines(&self, log: &MatchLog) -> Vec<String> {
        let totals: Vec<i64> = log.iter().map(|record| record.lp_total).collect();

        match lp_trend(&totals, self.settings.trend_points) {
            Trend::NotEnoughData => vec!["Not enough data".to_string()],
            Trend::Flat { width } => vec![format!("LP stable {}", "─".repeat(width))],
            Trend::Chart(chart) => {
                let (color, arrow) = match chart.direction {
                    Ordering::Greater => (Color::Green, "📈"),
                    Ordering::Less => (Color::Red, "📉"),
                    Ordering::Equal => (Color::Yellow, "➡️"),
                };

                let mut lines = Vec::with_capacity(chart.rows.len() + 2);
                lines.push(format!("{} LP trend (last {} games):", arrow, chart.width));
                for row in &chart.rows {
                    lines.push(format!("    {}", self.theme.paint(row, color)));
                }
                lines.push(format!("    {}", chart.axis()));
                lines
            }
        }
    }

    /// Print the full statistics screen
    pub fn stats(&self, out: &mut impl Write, log: &MatchLog) -> io::Result<()> {
        if log.is_empty() {
            writeln!(out, "📊 No statistics available")?;
            return Ok(());
        }

        let report = StatsReport::build(log, self.settings.recent_games);
        let theme = self.theme;

        writeln!(out)?;
        writeln!(out, "{}", theme.bold("╔══════════════════════════════════════════════════════════════╗"))?;
        writeln!(out, "{}", theme.bold("║                    📊 DETAILED STATISTICS                    ║"))?;
        writeln!(out, "{}", theme.bold("╚══════════════════════════════════════════════════════════════╝"))?;

        let overview = &report.overview;
        self.section(out, "🎮 GENERAL")?;
        writeln!(out, "  Games played      │ {}", theme.bold(&format!("{:>10}", overview.total_games)))?;
        writeln!(out, "  Wins              │ {}", theme.bold_paint(&format!("{:>10}", overview.wins), Color::Green))?;
        writeln!(out, "  Losses            │ {}", theme.bold_paint(&format!("{:>10}", overview.losses), Color::Red))?;
        writeln!(out, "  Total LP          │ {:>18}", theme.lp_change(overview.total_lp))?;
        writeln!(out, "  Average LP/game   │ {}", theme.bold(&format!("{:>+7.1} LP", overview.avg_lp)))?;
        writeln!(out, "  Promotions        │ {}", theme.bold_paint(&format!("{:>10}", overview.promotions), Color::Green))?;
        writeln!(out, "  Demotions         │ {}", theme.bold_paint(&format!("{:>10}", overview.demotions), Color::Red))?;

        self.section(out, "📈 WINRATE")?;
        writeln!(out, "  {}", self.winrate_chart(overview.winrate))?;
        writeln!(out, "  Average LP (win)  │ {}", theme.bold_paint(&format!("{:>+7.1} LP", overview.avg_lp_win), Color::Green))?;
        writeln!(out, "  Average LP (loss) │ {}", theme.bold_paint(&format!("{:>+7.1} LP", overview.avg_lp_loss), Color::Red))?;

        let streaks = &report.streaks;
        self.section(out, "🔥 STREAKS")?;
        let current = match (streaks.current, streaks.kind) {
            (0, _) | (_, StreakKind::None) => "None".to_string(),
            (count, StreakKind::Win) => theme.paint(&format!("{} wins 🔥", count), Color::Green),
            (count, StreakKind::Lose) => theme.paint(&format!("{} losses 💀", count), Color::Red),
        };
        writeln!(out, "  Current streak    │ {}", current)?;
        writeln!(out, "  Best streak       │ {}", theme.bold_paint(&format!("{} wins 🏆", streaks.best_win), Color::Green))?;
        writeln!(out, "  Worst streak      │ {}", theme.bold_paint(&format!("{} losses 😵", streaks.worst_lose), Color::Red))?;

        self.section(out, "📊 LP TREND")?;
        for line in self.trend_lines(log) {
            writeln!(out, "  {}", line)?;
        }

        self.section(out, "🏅 RANK DISTRIBUTION")?;
        for (rank, count) in report.ranks.iter().take(self.settings.distribution_top) {
            let share = *count as f64 / overview.total_games as f64 * 100.0;
            let rank_cell = pad_styled(&theme.rank(rank), rank, 20);
            writeln!(
                out,
                "  {} │ {} {:>5.1}% ({} games)",
                rank_cell,
                bar(share / 100.0, RANK_BAR_WIDTH),
                share,
                count
            )?;
        }

        let recent = &report.recent;
        self.section(out, &format!("🎯 RECENT FORM (last {} games)", self.settings.recent_games))?;
        let form = match recent.form {
            Form::Excellent => theme.paint("EXCELLENT 🔥", Color::Green),
            Form::Good => theme.paint("GOOD ⚡", Color::Yellow),
            Form::Average => theme.paint("AVERAGE ⚖️", Color::Cyan),
            Form::Poor => theme.paint("POOR 💀", Color::Red),
        };
        writeln!(out, "  Recent winrate    │ {:>6.1}% ({}W/{}L)", recent.winrate, recent.wins, recent.losses)?;
        writeln!(out, "  Recent LP         │ {:>18}", theme.lp_change(recent.lp))?;
        writeln!(out, "  Form              │ {}", form)?;

        if let Some(kda) = &report.kda {
            self.section(out, "⚔️  KDA")?;
            let average_line = format!("{:.1}/{:.1}/{:.1}", kda.avg_kills, kda.avg_deaths, kda.avg_assists);
            writeln!(out, "  Games with KDA    │ {}", theme.bold(&format!("{:>10}", kda.games)))?;
            writeln!(out, "  Average KDA       │ {}", theme.paint(&average_line, Theme::kda_color(kda.avg_ratio)))?;
            writeln!(out, "  KDA ratio         │ {}", theme.bold(&format!("{:>7.2}", kda.avg_ratio)))?;
            writeln!(out, "  Total kills       │ {}", theme.bold_paint(&format!("{:>10}", kda.total_kills), Color::Red))?;
            writeln!(out, "  Total deaths      │ {}", theme.bold_paint(&format!("{:>10}", kda.total_deaths), Color::DarkGrey))?;
            writeln!(out, "  Total assists     │ {}", theme.bold_paint(&format!("{:>10}", kda.total_assists), Color::Cyan))?;
            writeln!(out, "  Best KDA          │ {}", theme.bold_paint(&format!("{:>7.2} 🔥", kda.best_ratio), Color::Yellow))?;
            writeln!(out, "  Worst KDA         │ {}", theme.bold_paint(&format!("{:>7.2} 💀", kda.worst_ratio), Color::Red))?;
            if kda.exceptional_games > 0 {
                writeln!(
                    out,
                    "  Exceptional games │ {}",
                    theme.bold_paint(&format!("{} (15+ kills) ⭐", kda.exceptional_games), Color::Yellow)
                )?;
            }
        }

        if let Some(grades) = &report.grades {
            self.section(out, "🏆 GRADES")?;
            writeln!(out, "  Games with grade  │ {}", theme.bold(&format!("{:>10}", grades.games)))?;
            writeln!(out, "  Average grade     │ {}", theme.grade(grades.average))?;

            self.section(out, "📊 GRADE DISTRIBUTION")?;
            for grade in Grade::ALL {
                let Some(count) = grades.counts.get(&grade) else {
                    continue;
                };
                let share = *count as f64 / grades.games as f64 * 100.0;
                writeln!(
                    out,
                    "  {} │ {} {:>5.1}% ({:>2})",
                    pad_styled(&theme.grade(grade), grade.label(), 12),
                    bar(share / 100.0, GRADE_BAR_WIDTH),
                    share,
                    count
                )?;
            }
        }

        writeln!(out, "{}", "═".repeat(REPORT_WIDTH))?;
        Ok(())
    }
}
