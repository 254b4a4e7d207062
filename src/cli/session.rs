//! Interactive session loop
//!
//! The session owns the console and shares the match log with whoever else
//! needs to save it (the interrupt handler in `main`). The log lock is only
//! held between prompts, never while waiting for input.

use crate::cli::commands::Command;
use crate::cli::prompt::{is_input_closed, Console};
use crate::config::DisplaySettings;
use crate::display::{Renderer, Theme};
use crate::error::{Result, TrackerError};
use crate::ladder::{Decision, PromotionEngine, RankLadder, TransitionKind, MAX_LP_INPUT};
use crate::storage::MatchStorage;
use crate::types::{Grade, Kda, MatchLog, Transition};
use crate::utils::current_timestamp;
use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info};

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Lock the shared log
pub fn lock_log(log: &Mutex<MatchLog>) -> Result<MutexGuard<'_, MatchLog>> {
    log.lock().map_err(|_| {
        TrackerError::InternalError {
            message: "Failed to acquire match log lock".to_string(),
        }
        .into()
    })
}

/// Save the shared log, returning the number of records written
pub fn save_shared(storage: &dyn MatchStorage, log: &Mutex<MatchLog>) -> Result<usize> {
    let log = lock_log(log)?;
    storage.save(&log)?;
    info!("Saved {} entries to {}", log.len(), storage.location());
    Ok(log.len())
}

pub struct Session<R, W> {
    console: Console<R, W>,
    log: Arc<Mutex<MatchLog>>,
    storage: Arc<dyn MatchStorage>,
    ladder: RankLadder,
    theme: Theme,
    settings: DisplaySettings,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(
        console: Console<R, W>,
        log: Arc<Mutex<MatchLog>>,
        storage: Arc<dyn MatchStorage>,
        ladder: RankLadder,
        theme: Theme,
        settings: DisplaySettings,
    ) -> Self {
        Self {
            console,
            log,
            storage,
            ladder,
            theme,
            settings,
        }
    }

    pub fn into_output(self) -> W {
        self.console.into_output()
    }

    /// Banner and command list
    pub fn greet(&mut self) -> Result<()> {
        let renderer = Renderer::new(&self.theme, &self.ladder, &self.settings);
        renderer.banner(self.console.output())?;
        renderer.help(self.console.output())?;
        Ok(())
    }

    /// Read and execute commands until quit or end of input
    pub fn run(&mut self) -> Result<()> {
        let prompt = format!("\n{} >> ", self.theme.bold("🎮 Command"));

        loop {
            let line = match self.console.read_line(&prompt) {
                Ok(line) => line,
                Err(e) if is_input_closed(&e) => {
                    debug!("Input closed, quitting");
                    writeln!(self.console.output())?;
                    self.execute(Command::Quit)?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            if self.execute(Command::parse(&line))? == Flow::Quit {
                return Ok(());
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Add => match self.add_entry() {
                Ok(()) => {}
                Err(e) if is_input_closed(&e) => {
                    debug!("Input closed during entry, discarding it");
                    writeln!(self.console.output())?;
                    return self.execute(Command::Quit);
                }
                Err(e) => return Err(e),
            },
            Command::Print => {
                let log = lock_log(&self.log)?;
                let renderer = Renderer::new(&self.theme, &self.ladder, &self.settings);
                renderer.history(self.console.output(), &log)?;
            }
            Command::Stats => {
                let log = lock_log(&self.log)?;
                let renderer = Renderer::new(&self.theme, &self.ladder, &self.settings);
                renderer.stats(self.console.output(), &log)?;
            }
            Command::Help => {
                let renderer = Renderer::new(&self.theme, &self.ladder, &self.settings);
                renderer.help(self.console.output())?;
            }
            Command::Quit => {
                self.save_and_say_goodbye()?;
                return Ok(Flow::Quit);
            }
            Command::Noop => {}
            Command::Unknown(input) => {
                writeln!(
                    self.console.output(),
                    "❓ Unknown command '{}'. Type 'h' for help.",
                    input
                )?;
            }
        }

        Ok(Flow::Continue)
    }

    // A failed save is reported and the session still ends
    fn save_and_say_goodbye(&mut self) -> Result<()> {
        match save_shared(&*self.storage, &self.log) {
            Ok(count) => {
                writeln!(
                    self.console.output(),
                    "💾 Saved {} entries to {}",
                    count,
                    self.storage.location()
                )?;
                writeln!(self.console.output(), "{}", self.theme.bold("👋 Thanks for using Rank Tracker!"))?;
            }
            Err(e) => {
                error!("Save failed: {:#}", e);
                writeln!(self.console.output(), "❌ Could not save: {:#}", e)?;
            }
        }
        Ok(())
    }

    /// Prompt for one game and append it to the log
    pub fn add_entry(&mut self) -> Result<()> {
        writeln!(self.console.output())?;
        writeln!(self.console.output(), "{}", self.theme.bold("➕ ADD A NEW ENTRY"))?;
        writeln!(self.console.output(), "{}", "─".repeat(40))?;

        let standing = lock_log(&self.log)?.standing();
        let (current_rank, current_lp) = match standing {
            Some(standing) => {
                writeln!(
                    self.console.output(),
                    "Current status: {} - {} LP",
                    self.theme.rank(&standing.rank),
                    standing.lp
                )?;
                (standing.rank, standing.lp)
            }
            None => {
                writeln!(self.console.output(), "🆕 First entry! Let's set your starting rank.")?;
                let rank = self.console.ask_text("Starting rank (e.g. Silver II)")?;
                let lp = self
                    .console
                    .ask("Starting LP", |lp: &i64| (0..=MAX_LP_INPUT).contains(lp))?;
                (rank, lp)
            }
        };

        let lp_change: i64 = self
            .console
            .ask("LP change (+/-)", |change: &i64| {
                (-MAX_LP_INPUT..=MAX_LP_INPUT).contains(change)
            })?;
        let grade: Grade = self
            .console
            .ask("Grade (S+, S, S-, A+, A, A-, B+, B, B-, C+, C, C-, D+, D, D-)", |_| true)?;
        let kills: u32 = self.console.ask("Kills", |_| true)?;
        let deaths: u32 = self.console.ask("Deaths", |_| true)?;
        let assists: u32 = self.console.ask("Assists", |_| true)?;
        let note = self.console.ask_optional("Optional note (Enter to skip)")?;

        let engine = PromotionEngine::new(&self.ladder);
        let evaluation = engine.evaluate(&current_rank, current_lp, lp_change);

        let decision = match &evaluation.offer {
            None => Decision::Declined,
            Some(offer) => {
                let question = match offer.kind {
                    TransitionKind::Promotion => format!(
                        "🚀 {} LP - Promote to {}?",
                        evaluation.new_lp_total,
                        self.theme.rank(&offer.to)
                    ),
                    TransitionKind::Demotion => format!(
                        "📉 {} LP - Demote to {}?",
                        evaluation.new_lp_total,
                        self.theme.rank(&offer.to)
                    ),
                };

                if self.console.confirm(&question)? {
                    let max = self.ladder.lp_per_division();
                    let start_lp = self.console.ask(
                        &format!("Starting LP in {}", offer.to),
                        |lp: &i64| (0..=max).contains(lp),
                    )?;
                    Decision::Confirmed { start_lp }
                } else {
                    Decision::Declined
                }
            }
        };

        let outcome = engine.resolve(&evaluation, decision)?;
        match &outcome.transition {
            Some(Transition::Promotion(marker)) => writeln!(
                self.console.output(),
                "🎉 Congratulations on your promotion to {}!",
                self.theme.rank(&marker.to)
            )?,
            Some(Transition::Demotion(marker)) => writeln!(
                self.console.output(),
                "💪 No worries, climbing back from {}!",
                self.theme.rank(&marker.to)
            )?,
            None => {}
        }

        let mut record = outcome
            .into_record(current_timestamp())
            .with_kda(Kda::new(kills, deaths, assists))
            .with_grade(grade);
        if let Some(note) = note {
            record = record.with_note(note);
        }

        writeln!(
            self.console.output(),
            "\n✅ Entry added: {} - {} LP",
            self.theme.rank(&record.rank),
            record.lp_total
        )?;
        info!(
            "Recorded {} LP at {} ({} LP total)",
            record.lp_change, record.rank, record.lp_total
        );

        lock_log(&self.log)?.append(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use crate::types::MatchRecord;
    use std::io::Cursor;

    struct Harness {
        storage: Arc<InMemoryStorage>,
        log: Arc<Mutex<MatchLog>>,
        output: String,
    }

    fn run_script(initial: MatchLog, script: &str) -> Harness {
        let storage = Arc::new(InMemoryStorage::new());
        run_with_storage(initial, script, storage)
    }

    fn run_with_storage(initial: MatchLog, script: &str, storage: Arc<InMemoryStorage>) -> Harness {
        let log = Arc::new(Mutex::new(initial));
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        let mut session = Session::new(
            console,
            Arc::clone(&log),
            storage.clone(),
            RankLadder::standard(),
            Theme::plain(),
            DisplaySettings::default(),
        );
        session.run().unwrap();

        Harness {
            storage,
            log,
            output: String::from_utf8(session.into_output()).unwrap(),
        }
    }

    fn standing(rank: &str, lp: i64) -> MatchLog {
        MatchLog::from(vec![MatchRecord::new(current_timestamp(), rank, 0, lp)])
    }

    fn last(harness: &Harness) -> MatchRecord {
        harness.log.lock().unwrap().last().cloned().unwrap()
    }

    #[test]
    fn test_first_entry_asks_for_starting_rank() {
        let harness = run_script(MatchLog::new(), "a\nGold IV\n50\n20\nA\n5\n2\n8\n\nq\n");

        let record = last(&harness);
        assert_eq!(record.rank, "Gold IV");
        assert_eq!(record.lp_change, 20);
        assert_eq!(record.lp_total, 70);
        assert_eq!(record.kda(), Some(Kda::new(5, 2, 8)));
        assert_eq!(record.grade, Some(Grade::A));
        assert_eq!(record.note, None);
        assert!(record.transition.is_none());

        assert!(harness.output.contains("First entry!"));
        assert!(harness.output.contains("✅ Entry added: Gold IV - 70 LP"));
        assert_eq!(harness.storage.get_save_calls().len(), 1);
    }

    #[test]
    fn test_confirmed_promotion() {
        let harness = run_script(standing("Gold II", 80), "a\n30\nS\n1\n1\n1\nnice\ny\n10\nq\n");

        let record = last(&harness);
        assert_eq!(record.rank, "Gold I");
        assert_eq!(record.lp_change, 30);
        assert_eq!(record.lp_total, 10);
        assert_eq!(record.note.as_deref(), Some("nice"));
        let marker = record.promotion().unwrap();
        assert_eq!(marker.to, "Gold I");
        assert_eq!(marker.start_lp, 10);
        assert!(harness.output.contains("🚀 110 LP - Promote to Gold I? (y/N): "));
        assert!(harness.output.contains("Congratulations"));
    }

    #[test]
    fn test_declined_promotion_keeps_raw_total() {
        let harness = run_script(standing("Gold II", 80), "a\n30\nS\n1\n1\n1\n\nn\nq\n");

        let record = last(&harness);
        assert_eq!(record.rank, "Gold II");
        assert_eq!(record.lp_total, 110);
        assert!(record.transition.is_none());
    }

    #[test]
    fn test_confirmed_demotion_keeps_negative_change() {
        let harness = run_script(standing("Silver III", 10), "a\n-25\nC\n2\n9\n3\n\no\n150\n70\nq\n");

        let record = last(&harness);
        assert_eq!(record.rank, "Silver IV");
        assert_eq!(record.lp_change, -25);
        assert_eq!(record.lp_total, 70);
        assert_eq!(record.demotion().unwrap().start_lp, 70);
        assert!(harness.output.contains("❌ Invalid value, try again."));
        assert!(harness.output.contains("climbing back from Silver IV"));
    }

    #[test]
    fn test_apex_rank_never_offers() {
        let harness = run_script(standing("Master", 350), "a\n-400\nB\n3\n3\n3\n\nq\n");

        let record = last(&harness);
        assert_eq!(record.rank, "Master");
        assert_eq!(record.lp_total, -50);
        assert!(!harness.output.contains("(y/N)"));
    }

    #[test]
    fn test_reprompts_on_bad_values() {
        let harness = run_script(
            standing("Iron I", 40),
            "a\nten\n5\nZ\nb+\n-1\n0\n0\n0\n\nq\n",
        );

        let record = last(&harness);
        assert_eq!(record.lp_change, 5);
        assert_eq!(record.grade, Some(Grade::BPlus));
        assert_eq!(record.kda(), Some(Kda::new(0, 0, 0)));
        assert!(harness.output.contains("Could not read 'ten'"));
        assert!(harness.output.contains("Could not read '-1'"));
    }

    #[test]
    fn test_rejects_out_of_range_lp() {
        let harness = run_script(
            MatchLog::new(),
            "a\nGold IV\n9223372036854775807\n30\n9223372036854775807\n-9223372036854775808\n-1000001\n12\nA\n1\n1\n1\n\nq\n",
        );

        let record = last(&harness);
        assert_eq!(record.rank, "Gold IV");
        assert_eq!(record.lp_change, 12);
        assert_eq!(record.lp_total, 42);
        assert_eq!(harness.output.matches("Invalid value").count(), 4);
    }

    #[test]
    fn test_end_of_input_saves_and_discards_partial_entry() {
        let harness = run_script(standing("Gold IV", 20), "a\n15\nA\n");

        assert_eq!(harness.log.lock().unwrap().len(), 1);
        let saves = harness.storage.get_save_calls();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].len(), 1);
    }

    #[test]
    fn test_end_of_input_at_command_prompt_saves() {
        let harness = run_script(standing("Gold IV", 20), "p\n");
        assert!(harness.output.contains("PROGRESSION HISTORY"));
        assert_eq!(harness.storage.get_save_calls().len(), 1);
    }

    #[test]
    fn test_unknown_and_blank_commands() {
        let harness = run_script(MatchLog::new(), "\nzz\nH\nq\n");
        assert!(harness.output.contains("❓ Unknown command 'zz'. Type 'h' for help."));
        assert!(harness.output.contains("AVAILABLE COMMANDS"));
        assert!(harness.output.contains("💾 Saved 0 entries to memory"));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let storage = Arc::new(InMemoryStorage::new());
        storage.fail_saves(true);
        let harness = run_with_storage(standing("Gold IV", 20), "q\n", storage);

        assert!(harness.output.contains("❌ Could not save"));
        assert_eq!(harness.storage.get_save_calls().len(), 1);
    }

    #[test]
    fn test_stats_command_renders_report() {
        let harness = run_script(standing("Gold IV", 20), "s\nq\n");
        assert!(harness.output.contains("DETAILED STATISTICS"));
    }

    #[test]
    fn test_save_shared_writes_current_log() {
        let storage = InMemoryStorage::new();
        let log = Mutex::new(standing("Gold IV", 20));
        assert_eq!(save_shared(&storage, &log).unwrap(), 1);
        assert_eq!(storage.load().unwrap().len(), 1);
    }
}
