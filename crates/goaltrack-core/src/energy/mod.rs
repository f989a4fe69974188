//! Energy model.
//!
//! Maps a clock time to a qualitative energy label using the high/low energy
//! periods configured in the user's profile.

mod level;

pub use level::{EnergyLevel, EnergyModel};
