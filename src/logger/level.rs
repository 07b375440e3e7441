//! Log severity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Severity of a log record.
///
/// Named levels are spaced four apart so custom levels fit in between.
/// Higher is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(pub i32);

impl Level {
    pub const DEBUG: Level = Level(-4);
    pub const INFO: Level = Level(0);
    pub const WARN: Level = Level(4);
    pub const ERROR: Level = Level(8);

    /// The `tracing` level events at this severity are emitted at.
    pub fn as_tracing(self) -> tracing::Level {
        if self < Level::DEBUG {
            tracing::Level::TRACE
        } else if self < Level::INFO {
            tracing::Level::DEBUG
        } else if self < Level::WARN {
            tracing::Level::INFO
        } else if self < Level::ERROR {
            tracing::Level::WARN
        } else {
            tracing::Level::ERROR
        }
    }

    fn base(self) -> (&'static str, Level) {
        if self < Level::INFO {
            ("DEBUG", Level::DEBUG)
        } else if self < Level::WARN {
            ("INFO", Level::INFO)
        } else if self < Level::ERROR {
            ("WARN", Level::WARN)
        } else {
            ("ERROR", Level::ERROR)
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, base) = self.base();
        let offset = self.0 - base.0;
        if offset == 0 {
            write!(f, "{}", name)
        } else {
            write!(f, "{}{:+}", name, offset)
        }
    }
}

/// Error returned when a level name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {0:?}")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseLevelError(s.to_string());
        let trimmed = s.trim();
        let split = trimmed.find(['+', '-']).unwrap_or(trimmed.len());
        let (name, offset) = trimmed.split_at(split);

        let base = match name.to_ascii_uppercase().as_str() {
            "DEBUG" => Level::DEBUG,
            "INFO" => Level::INFO,
            "WARN" => Level::WARN,
            "ERROR" => Level::ERROR,
            _ => return Err(err()),
        };
        let offset = if offset.is_empty() {
            0
        } else {
            offset.parse::<i32>().map_err(|_| err())?
        };

        base.0.checked_add(offset).map(Level).ok_or_else(err)
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
