//! # Goaltrack Core Library
//!
//! This library provides the scheduling core of goaltrack: given the user's
//! daily routine and the tasks already on a day, it finds the free time left
//! and recommends one slot for a new activity. The `goaltrack` CLI is a thin
//! layer over the same library.
//!
//! ## Architecture
//!
//! - **Energy model**: labels any clock time High, Medium or Low from the
//!   profile's energy periods
//! - **Timeline**: sweeps busy intervals (work block, existing tasks) across
//!   the schedulable day to produce free slots
//! - **Ranking**: asks a pluggable oracle to pick a slot and falls back to a
//!   deterministic rule when it cannot
//! - **Integrations**: task stores (Notion, local JSON file) and credentials
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`SlotFinder`]: free-slot detection
//! - [`SlotRanker`]: slot recommendation with fallback
//! - [`Scheduler`]: plan, commit and overview against a [`TaskStore`]
//! - [`Config`]: application configuration management

pub mod clock;
pub mod energy;
pub mod error;
pub mod integrations;
pub mod profile;
pub mod ranking;
pub mod scheduler;
pub mod storage;
pub mod task;
pub mod timeline;

pub use energy::{EnergyLevel, EnergyModel};
pub use error::{ConfigError, CoreError, OracleError, StoreError, ValidationError};
pub use integrations::{Credential, JsonFileTaskStore, NotionTaskStore, TaskStore};
pub use profile::{ClockRange, UserProfile};
pub use ranking::{
    CohereOracle, DisabledOracle, HeuristicOracle, RankSource, RankingOracle, SlotRanker,
    SlotRecommendation, Suggestion,
};
pub use scheduler::{ActivityRequest, DayOverview, Scheduler};
pub use storage::{Config, OracleProvider, StoreProvider};
pub use task::{ExistingTask, NewTask, Priority, TaskCategory};
pub use timeline::{find_free_slots, FreeSlot, SlotFinder};
