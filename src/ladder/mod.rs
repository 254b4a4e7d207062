//! Ranked ladder arithmetic
//!
//! This module provides the ordered rank catalog and the promotion engine that
//! handles LP carry-over across division boundaries.

pub mod catalog;
pub mod promotion;

// Re-export commonly used types
pub use catalog::RankLadder;
pub use promotion::{
    Decision, Evaluation, Outcome, PromotionEngine, TransitionKind, TransitionOffer, MAX_LP_INPUT,
};
