//! Day timeline: busy intervals and the free slots between them.
//!
//! This module provides:
//! - The work + commute block and task intervals for a date
//! - Free-slot detection between wake-up and sleep

mod busy;
mod gap;

pub use busy::{collect_busy_intervals, BusyInterval, BusySource};
pub use gap::{find_free_slots, FreeSlot, SlotFinder};
