//! Hour/minute duration input.
//!
//! Goals and logged time are entered as whole hours (0-23) and minutes
//! (0-59), so every valid duration is a multiple of 60 seconds no larger
//! than [`MAX_DURATION_SECONDS`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

pub const MAX_HOURS: u32 = 23;
pub const MAX_MINUTES: u32 = 59;

/// Largest duration the picker can produce: 23h 59m.
pub const MAX_DURATION_SECONDS: u64 = (MAX_HOURS as u64) * 3600 + (MAX_MINUTES as u64) * 60;

/// A duration as picked on the hour and minute wheels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoursMinutes {
    hours: u32,
    minutes: u32,
}

impl HoursMinutes {
    /// Build a duration, rejecting hours above 23 or minutes above 59.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, ValidationError> {
        if hours > MAX_HOURS {
            return Err(ValidationError::InvalidValue {
                field: "hours".into(),
                message: format!("{hours} is outside 0..={MAX_HOURS}"),
            });
        }
        if minutes > MAX_MINUTES {
            return Err(ValidationError::InvalidValue {
                field: "minutes".into(),
                message: format!("{minutes} is outside 0..={MAX_MINUTES}"),
            });
        }
        Ok(Self { hours, minutes })
    }

    /// Split a seconds count back into picker values.
    ///
    /// Leftover seconds below a full minute are dropped, the same way the
    /// goal is displayed.
    pub fn from_seconds(seconds: u64) -> Result<Self, ValidationError> {
        validate_seconds("duration", seconds)?;
        let hours = (seconds / 3600) as u32;
        let minutes = ((seconds % 3600) / 60) as u32;
        Ok(Self { hours, minutes })
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn as_seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours, self.minutes)
    }
}

/// Check that `seconds` is a duration the picker could have produced.
pub fn validate_seconds(field: &'static str, seconds: u64) -> Result<u64, ValidationError> {
    if seconds > MAX_DURATION_SECONDS {
        return Err(ValidationError::DurationOutOfRange {
            field,
            seconds,
            max: MAX_DURATION_SECONDS,
        });
    }
    Ok(seconds)
}
