pub mod config;
pub mod erase;
pub mod goal;
pub mod log;
pub mod onboarding;
pub mod share;
pub mod status;

use zeroscreen_core::{Database, ProgressState};

/// Open progress backed by the state database in the data directory.
pub fn open_state() -> Result<ProgressState<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    Ok(ProgressState::new(db)?)
}

/// Clap parser for the hour wheel.
pub fn hours_arg() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(zeroscreen_core::duration::MAX_HOURS))
}

/// Clap parser for the minute wheel.
pub fn minutes_arg() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(zeroscreen_core::duration::MAX_MINUTES))
}
