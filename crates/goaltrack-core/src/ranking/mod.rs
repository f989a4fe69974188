//! Slot ranking.
//!
//! A [`SlotRanker`] renders the free slots into a prompt, asks a pluggable
//! [`RankingOracle`] to pick one and parses the answer. When the oracle is
//! unavailable or its answer cannot be used, a deterministic rule picks the
//! first High-energy slot, or else the first slot.

pub mod cohere;
mod heuristic;
mod oracle;
mod prompt;
mod ranker;
mod response;

pub use cohere::CohereOracle;
pub use heuristic::HeuristicOracle;
pub use oracle::{DisabledOracle, RankingOracle};
pub use prompt::{parse_prompt_priority, parse_prompt_slots, PromptSlot, RankingPrompt};
pub use ranker::{
    RankSource, SlotRanker, SlotRecommendation, Suggestion, FIRST_AVAILABLE_REASON,
    HIGH_ENERGY_REASON, UNEXPLAINED_REASON,
};
pub use response::{parse_answer, OracleAnswer};
