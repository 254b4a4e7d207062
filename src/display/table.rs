//! History table and current status

use crate::display::charts::progress;
use crate::display::theme::lp_change_parts;
use crate::display::{pad_styled, Renderer, Theme, TABLE_WIDTH};
use crate::types::{MatchLog, MatchRecord, Transition};
use std::io::{self, Write};

const DATE_WIDTH: usize = 20;
const RANK_WIDTH: usize = 20;
const LP_CHANGE_WIDTH: usize = 15;
const LP_TOTAL_WIDTH: usize = 12;
const KDA_WIDTH: usize = 15;
const GRADE_WIDTH: usize = 8;

/// Notes column: the user's note followed by any transition marker
pub fn notes(record: &MatchRecord) -> String {
    let marker = match &record.transition {
        Some(Transition::Promotion(marker)) => Some(format!("🚀 → {}", marker.to)),
        Some(Transition::Demotion(marker)) => Some(format!("📉 → {}", marker.to)),
        None => None,
    };

    match (record.note.as_deref(), marker) {
        (Some(note), Some(marker)) => format!("{} {}", note, marker),
        (Some(note), None) => note.to_string(),
        (None, Some(marker)) => marker,
        (None, None) => String::new(),
    }
}

impl Renderer<'_> {
    /// One fixed-width row of the history table
    pub fn row(&self, record: &MatchRecord) -> String {
        let date = record.timestamp.format("%Y-%m-%d %H:%M").to_string();

        let rank = pad_styled(&self.theme.rank(&record.rank), &record.rank, RANK_WIDTH);

        let (lp_plain, _) = lp_change_parts(record.lp_change);
        let lp_change = pad_styled(&self.theme.lp_change(record.lp_change), &lp_plain, LP_CHANGE_WIDTH);

        let lp_total = format!("{} LP", record.lp_total);

        let kda = match record.kda() {
            Some(kda) => {
                let plain = format!("{}/{}/{}", kda.kills, kda.deaths, kda.assists);
                pad_styled(&self.theme.kda(kda), &plain, KDA_WIDTH)
            }
            None => format!("{:<width$}", "N/A", width = KDA_WIDTH),
        };

        let grade = match record.grade {
            Some(grade) => pad_styled(&self.theme.grade(grade), grade.label(), GRADE_WIDTH),
            None => format!("{:<width$}", "N/A", width = GRADE_WIDTH),
        };

        format!(
            "{:<date_width$} {} {} {:<total_width$} {} {} {}",
            date,
            rank,
            lp_change,
            lp_total,
            kda,
            grade,
            notes(record),
            date_width = DATE_WIDTH,
            total_width = LP_TOTAL_WIDTH,
        )
        .trim_end()
        .to_string()
    }

    /// Print the most recent records followed by the current status
    pub fn history(&self, out: &mut impl Write, log: &MatchLog) -> io::Result<()> {
        if log.is_empty() {
            writeln!(out, "{}", self.theme.bold("📊 No data to display"))?;
            return Ok(());
        }

        writeln!(out)?;
        writeln!(out, "{}", self.theme.heading("📈 PROGRESSION HISTORY"))?;
        writeln!(out, "Games played: {}", self.theme.heading(&log.len().to_string()))?;
        writeln!(out, "{}", "─".repeat(TABLE_WIDTH))?;
        writeln!(
            out,
            "{:<20} {:<20} {:<15} {:<12} {:<15} {:<8} {}",
            "Date", "Rank", "LP Change", "LP Total", "KDA", "Grade", "Notes"
        )?;
        writeln!(out, "{}", "─".repeat(TABLE_WIDTH))?;

        for record in log.recent(self.settings.history_limit) {
            writeln!(out, "{}", self.row(record))?;
        }

        self.current_status(out, log)
    }

    fn current_status(&self, out: &mut impl Write, log: &MatchLog) -> io::Result<()> {
        let Some(standing) = log.standing() else {
            return Ok(());
        };

        writeln!(out)?;
        writeln!(out, "{}", "═".repeat(TABLE_WIDTH))?;
        writeln!(out, "{}", self.theme.bold("🎯 CURRENT STATUS"))?;
        writeln!(out, "Rank: {}", self.theme.rank(&standing.rank))?;
        writeln!(out, "LP: {}", self.theme.bold(&standing.lp.to_string()))?;

        if !self.ladder.is_apex(&standing.rank) {
            let per_division = self.ladder.lp_per_division();
            if let Some(progress) = progress(standing.lp.rem_euclid(per_division), per_division) {
                let text = format!("[{}] {}%", progress.bar, progress.percentage);
                writeln!(
                    out,
                    "Progress: {}",
                    self.theme.paint(&text, Theme::progress_color(progress.percentage))
                )?;
            }
        }

        writeln!(out, "{}", "═".repeat(TABLE_WIDTH))?;
        Ok(())
    }
}
