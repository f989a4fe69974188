//! Local ranking oracle for offline use.

use super::oracle::RankingOracle;
use super::prompt::{parse_prompt_priority, parse_prompt_slots, PromptSlot};
use crate::energy::EnergyLevel;
use crate::error::OracleError;
use crate::task::Priority;

/// Answers ranking prompts with a fixed energy-matching rule.
///
/// - high priority: first High-energy slot
/// - low priority: first Low- or Medium-energy slot
/// - medium priority: first slot that is not Low
///
/// When no slot matches, slot 1 is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicOracle;

impl HeuristicOracle {
    pub fn new() -> Self {
        Self
    }

    fn choose(slots: &[PromptSlot], priority: Priority) -> (usize, &'static str) {
        let matched = match priority {
            Priority::High => first_matching(slots, |e| e == EnergyLevel::High)
                .map(|n| (n, "High priority activity placed in a high energy period")),
            Priority::Medium => first_matching(slots, |e| e != EnergyLevel::Low)
                .map(|n| (n, "Earliest slot outside a low energy period")),
            Priority::Low => first_matching(slots, |e| e != EnergyLevel::High)
                .map(|n| (n, "Low priority activity keeps high energy time free")),
        };

        matched.unwrap_or((slots[0].number, "Earliest slot that fits"))
    }
}

fn first_matching(slots: &[PromptSlot], wanted: impl Fn(EnergyLevel) -> bool) -> Option<usize> {
    slots.iter().find(|s| wanted(s.energy)).map(|s| s.number)
}

impl RankingOracle for HeuristicOracle {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn rank(&self, prompt: &str) -> Result<String, OracleError> {
        let slots = parse_prompt_slots(prompt);
        if slots.is_empty() {
            return Err(OracleError::EmptyResponse);
        }
        let priority = parse_prompt_priority(prompt).unwrap_or_default();
        let (number, reason) = Self::choose(&slots, priority);
        Ok(format!("SLOT: {number}\nREASON: {reason}"))
    }
}
