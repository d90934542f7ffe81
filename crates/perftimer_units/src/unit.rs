//! Reporting units for timer readings
//!
//! Every duration a timer hands out is a plain `f64` in one of these units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Unit in which a timer reports its intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    #[default]
    Nanoseconds,
}

impl TimeUnit {
    /// All units, largest first
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Seconds,
        TimeUnit::Milliseconds,
        TimeUnit::Microseconds,
        TimeUnit::Nanoseconds,
    ];

    /// Short display label ("s", "ms", "μs", "ns")
    pub fn label(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "μs",
            TimeUnit::Nanoseconds => "ns",
        }
    }

    /// Long lowercase name, matching the serde representation
    pub fn name(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Nanoseconds => "nanoseconds",
        }
    }

    /// How many nanoseconds make up one of this unit
    pub fn nanos_per_unit(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1_000_000_000.0,
            TimeUnit::Milliseconds => 1_000_000.0,
            TimeUnit::Microseconds => 1_000.0,
            TimeUnit::Nanoseconds => 1.0,
        }
    }

    /// Convert a signed nanosecond distance into this unit.
    ///
    /// Defined for every `i64`, including negative distances.
    pub fn convert(self, duration_nanos: i64) -> f64 {
        duration_nanos as f64 / self.nanos_per_unit()
    }

    /// Convert a `Duration` into this unit
    pub fn convert_duration(self, duration: Duration) -> f64 {
        duration.as_nanos() as f64 / self.nanos_per_unit()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time unit `{input}` (expected one of s, ms, us, ns)")]
pub struct ParseTimeUnitError {
    input: String,
}

impl ParseTimeUnitError {
    /// The string that failed to parse
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for TimeUnit {
    type Err = ParseTimeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "ms" | "milli" | "millis" | "millisecond" | "milliseconds" => {
                Ok(TimeUnit::Milliseconds)
            }
            // "µ" (micro sign) and "μ" (greek mu) are distinct code points
            "us" | "μs" | "µs" | "micro" | "micros" | "microsecond" | "microseconds" => {
                Ok(TimeUnit::Microseconds)
            }
            "ns" | "nano" | "nanos" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            _ => Err(ParseTimeUnitError {
                input: s.to_string(),
            }),
        }
    }
}
