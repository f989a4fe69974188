//! Slot ranking with a deterministic fallback.

use serde::{Deserialize, Serialize};

use super::oracle::RankingOracle;
use super::prompt::RankingPrompt;
use super::response::{parse_answer, OracleAnswer};
use crate::energy::{EnergyLevel, EnergyModel};
use crate::profile::UserProfile;
use crate::task::Priority;
use crate::timeline::FreeSlot;

/// Reason reported when the fallback picks the first High-energy slot.
pub const HIGH_ENERGY_REASON: &str = "High energy period";
/// Reason reported when the fallback picks the first slot.
pub const FIRST_AVAILABLE_REASON: &str = "First available";
/// Reason used when the oracle chose a slot without explaining why.
pub const UNEXPLAINED_REASON: &str = "Selected by ranking model";

/// Which strategy produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankSource {
    Oracle,
    HighEnergyFallback,
    FirstAvailableFallback,
}

impl RankSource {
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Oracle)
    }
}

/// The chosen slot plus the candidates it was chosen from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRecommendation {
    pub slot: FreeSlot,
    pub reason: String,
    pub source: RankSource,
    pub all_slots: Vec<FreeSlot>,
}

/// Result of a ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Suggestion {
    Recommended(SlotRecommendation),
    /// There was nothing to rank. Not an error.
    NoSlotsAvailable,
}

impl Suggestion {
    pub fn recommendation(&self) -> Option<&SlotRecommendation> {
        match self {
            Self::Recommended(rec) => Some(rec),
            Self::NoSlotsAvailable => None,
        }
    }
}

/// Picks one free slot for an activity.
pub struct SlotRanker<'a> {
    energy: EnergyModel<'a>,
    oracle: &'a dyn RankingOracle,
}

impl<'a> SlotRanker<'a> {
    pub fn new(profile: &'a UserProfile, oracle: &'a dyn RankingOracle) -> Self {
        Self {
            energy: EnergyModel::from_profile(profile),
            oracle,
        }
    }

    /// Ask the oracle for the best of `slots`, falling back to a fixed rule
    /// when it fails, answers unreadably or names a slot that does not exist.
    pub fn suggest_optimal_slot(
        &self,
        activity: &str,
        duration_minutes: u32,
        slots: &[FreeSlot],
        priority: Priority,
    ) -> Suggestion {
        if slots.is_empty() {
            return Suggestion::NoSlotsAvailable;
        }

        let prompt = RankingPrompt {
            activity,
            duration_minutes,
            priority,
            slots,
            energy: self.energy,
        }
        .render();
        tracing::debug!(oracle = self.oracle.name(), prompt_len = prompt.len(), "ranking slots");

        let recommendation = match self.oracle.rank(&prompt) {
            Ok(text) => self.recommendation_from(&parse_answer(&text), slots),
            Err(e) => {
                tracing::warn!(oracle = self.oracle.name(), error = %e, "ranking oracle failed");
                None
            }
        }
        .unwrap_or_else(|| fallback(slots));

        tracing::info!(
            start = %recommendation.slot.start,
            source = ?recommendation.source,
            "recommended slot"
        );
        Suggestion::Recommended(recommendation)
    }

    fn recommendation_from(
        &self,
        answer: &OracleAnswer,
        slots: &[FreeSlot],
    ) -> Option<SlotRecommendation> {
        let Some(index) = answer.index_within(slots.len()) else {
            tracing::warn!(oracle = self.oracle.name(), answer = ?answer, "unusable oracle answer");
            return None;
        };
        let reason = match answer {
            OracleAnswer::Choice { reason: Some(r), .. } => r.clone(),
            _ => UNEXPLAINED_REASON.to_string(),
        };
        Some(SlotRecommendation {
            slot: slots[index].clone(),
            reason,
            source: RankSource::Oracle,
            all_slots: slots.to_vec(),
        })
    }
}

/// First High-energy slot, otherwise the first slot. `slots` must not be empty.
fn fallback(slots: &[FreeSlot]) -> SlotRecommendation {
    let (slot, reason, source) = match slots.iter().find(|s| s.energy == EnergyLevel::High) {
        Some(high) => (high, HIGH_ENERGY_REASON, RankSource::HighEnergyFallback),
        None => (&slots[0], FIRST_AVAILABLE_REASON, RankSource::FirstAvailableFallback),
    };
    SlotRecommendation {
        slot: slot.clone(),
        reason: reason.to_string(),
        source,
        all_slots: slots.to_vec(),
    }
}
