//! Ranking prompt construction.
//!
//! The slot lines written here are also read back by [`parse_prompt_slots`],
//! which lets a local oracle answer the same prompt a hosted model gets.

use indoc::formatdoc;

use crate::energy::{EnergyLevel, EnergyModel};
use crate::profile::ClockRange;
use crate::task::Priority;
use crate::timeline::FreeSlot;

/// Everything the oracle is told about one ranking request.
#[derive(Debug, Clone)]
pub struct RankingPrompt<'a> {
    pub activity: &'a str,
    pub duration_minutes: u32,
    pub priority: Priority,
    pub slots: &'a [FreeSlot],
    pub energy: EnergyModel<'a>,
}

impl RankingPrompt<'_> {
    pub fn render(&self) -> String {
        let slots = self
            .slots
            .iter()
            .enumerate()
            .map(|(i, slot)| format!("{}. {}", i + 1, slot.describe()))
            .collect::<Vec<_>>()
            .join("\n");

        formatdoc! {"
            Suggest the BEST time slot for this activity.

            Activity: {activity}
            Required Duration: {duration} minutes
            Priority: {priority}

            Available Slots:
            {slots}

            High Energy: {high}
            Low Energy: {low}

            Respond with:
            SLOT: [number]
            REASON: [brief explanation]",
            activity = self.activity,
            duration = self.duration_minutes,
            priority = self.priority,
            slots = slots,
            high = ranges(self.energy.high_periods()),
            low = ranges(self.energy.low_periods()),
        }
    }
}

fn ranges(periods: &[ClockRange]) -> String {
    if periods.is_empty() {
        return "none".to_string();
    }
    periods.iter().map(ClockRange::label).collect::<Vec<_>>().join(", ")
}

/// A slot line recovered from a rendered prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSlot {
    /// 1-based, as numbered in the prompt.
    pub number: usize,
    pub energy: EnergyLevel,
}

/// Read the numbered slot lines back out of a prompt.
pub fn parse_prompt_slots(prompt: &str) -> Vec<PromptSlot> {
    prompt
        .lines()
        .filter_map(|line| {
            let (number, rest) = line.trim().split_once(". ")?;
            let number = number.parse::<usize>().ok()?;
            let energy = rest.rsplit_once("Energy:")?.1.parse::<EnergyLevel>().ok()?;
            Some(PromptSlot { number, energy })
        })
        .collect()
}

/// Read the `Priority:` line back out of a prompt.
pub fn parse_prompt_priority(prompt: &str) -> Option<Priority> {
    prompt
        .lines()
        .find_map(|line| line.trim().strip_prefix("Priority:"))
        .and_then(|p| p.parse().ok())
}
