//! Promotion and demotion accounting
//!
//! Crossing a division boundary is never automatic: [`PromotionEngine::evaluate`]
//! reports whether a transition is on offer, and [`PromotionEngine::resolve`]
//! turns the player's answer into the final record fields.

use crate::error::TrackerError;
use crate::ladder::catalog::RankLadder;
use crate::types::{MatchRecord, RankName, Transition, TransitionMarker};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Largest LP magnitude accepted for a starting LP or an LP change
pub const MAX_LP_INPUT: i64 = 1_000_000;

/// Direction of a ladder transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Promotion,
    Demotion,
}

/// A transition the player may accept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOffer {
    pub kind: TransitionKind,
    pub to: RankName,
}

/// Result of applying an LP change before the player answers any offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub current_rank: RankName,
    pub current_lp: i64,
    pub lp_change: i64,
    pub new_lp_total: i64,
    pub offer: Option<TransitionOffer>,
}

/// The player's answer to an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Declined,
    Confirmed { start_lp: i64 },
}

/// Final rank and LP accounting for a new record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub rank: RankName,
    pub lp_change: i64,
    pub lp_total: i64,
    pub transition: Option<Transition>,
}

impl Outcome {
    /// Start a record carrying this outcome
    pub fn into_record(self, timestamp: NaiveDateTime) -> MatchRecord {
        MatchRecord::new(timestamp, self.rank, self.lp_change, self.lp_total)
            .with_transition(self.transition)
    }
}

/// Decides when a division boundary is crossed and fixes up the LP accounting
#[derive(Debug, Clone, Copy)]
pub struct PromotionEngine<'a> {
    ladder: &'a RankLadder,
}

impl<'a> PromotionEngine<'a> {
    pub fn new(ladder: &'a RankLadder) -> Self {
        Self { ladder }
    }

    /// Apply `lp_change` to the current standing and report any offered transition
    ///
    /// Totals saturate at the `i64` bounds.
    pub fn evaluate(&self, current_rank: &str, current_lp: i64, lp_change: i64) -> Evaluation {
        let new_lp_total = current_lp.saturating_add(lp_change);
        let threshold = self.ladder.lp_per_division();

        let offer = if self.ladder.is_apex(current_rank) {
            None
        } else if new_lp_total >= threshold {
            let next = self.ladder.successor(current_rank);
            (next != current_rank).then(|| TransitionOffer {
                kind: TransitionKind::Promotion,
                to: next.to_string(),
            })
        } else if new_lp_total < 0 {
            let previous = self.ladder.predecessor(current_rank);
            (previous != current_rank).then(|| TransitionOffer {
                kind: TransitionKind::Demotion,
                to: previous.to_string(),
            })
        } else {
            None
        };

        if let Some(offer) = &offer {
            debug!(
                "{} -> {} offered at {} LP ({:?})",
                current_rank, offer.to, new_lp_total, offer.kind
            );
        }

        Evaluation {
            current_rank: current_rank.to_string(),
            current_lp,
            lp_change,
            new_lp_total,
            offer,
        }
    }

    /// Turn an evaluation and the player's decision into the record fields
    ///
    /// A confirmed promotion rewrites `lp_change` as the LP needed to finish the
    /// division plus the starting LP. A confirmed demotion keeps the original
    /// negative change. A declined offer stores the raw total, even out of range.
    pub fn resolve(&self, evaluation: &Evaluation, decision: Decision) -> crate::error::Result<Outcome> {
        let declined = Outcome {
            rank: evaluation.current_rank.clone(),
            lp_change: evaluation.lp_change,
            lp_total: evaluation.new_lp_total,
            transition: None,
        };

        let start_lp = match decision {
            Decision::Declined => return Ok(declined),
            Decision::Confirmed { start_lp } => start_lp,
        };

        let offer = evaluation
            .offer
            .as_ref()
            .ok_or_else(|| TrackerError::InvalidInput {
                reason: format!(
                    "no transition is available from {} at {} LP",
                    evaluation.current_rank, evaluation.new_lp_total
                ),
            })?;

        let max = self.ladder.lp_per_division();
        if !(0..=max).contains(&start_lp) {
            return Err(TrackerError::InvalidStartLp { start_lp, max }.into());
        }

        let marker = TransitionMarker {
            to: offer.to.clone(),
            start_lp,
        };

        let outcome = match offer.kind {
            TransitionKind::Promotion => Outcome {
                rank: offer.to.clone(),
                lp_change: max
                    .saturating_sub(evaluation.current_lp)
                    .saturating_add(start_lp),
                lp_total: start_lp,
                transition: Some(Transition::Promotion(marker)),
            },
            TransitionKind::Demotion => Outcome {
                rank: offer.to.clone(),
                lp_change: evaluation.lp_change,
                lp_total: start_lp,
                transition: Some(Transition::Demotion(marker)),
            },
        };

        Ok(outcome)
    }
}
