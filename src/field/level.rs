//! Severity levels

use crate::core::{AnyContext, Flow, LoggerError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    #[default]
    Unset = 0,
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
    /// Turns logging off when used as a minimum
    Off = 6,
}

impl Level {
    /// Lowercase level name
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Unset => "unset",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Off => "off",
        }
    }

    /// Terminal color used for this level, if any
    #[cfg(feature = "color")]
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            Level::Debug => Some(BrightBlue),
            Level::Info => Some(BrightMagenta),
            Level::Warning => Some(BrightYellow),
            Level::Error | Level::Fatal => Some(BrightRed),
            Level::Unset | Level::Off => None,
        }
    }

    /// Level name in bold color for terminals; `unset` and `off` stay plain
    #[cfg(feature = "color")]
    pub fn colored(&self) -> String {
        use colored::Colorize;
        match self.color_code() {
            Some(color) => self.as_str().color(color).bold().to_string(),
            None => self.as_str().to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unset" => Ok(Level::Unset),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "off" => Ok(Level::Off),
            _ => Err(LoggerError::UnknownLevel(s.to_string())),
        }
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether a record at `level` passes the `min` threshold
pub fn is_active(min: Level, level: Level) -> bool {
    level >= min
}

/// Read/write access to a context's severity
pub trait Leveler {
    /// Lowest level that is written
    fn level_min(&self) -> Level;
    /// Level of the record being written
    fn level(&self) -> Level;
    fn set_level(&mut self, level: Level);
}

/// Level fields to embed in a context type
///
/// Only the current level is serialized: `{"level":"info"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WithLevel {
    #[serde(skip_serializing)]
    level_min: Level,
    level: Level,
}

impl WithLevel {
    /// Level fields writing records at `level_min` and above
    pub fn new(level_min: Level) -> Self {
        Self {
            level_min,
            level: Level::Unset,
        }
    }

    /// Set the level of the current record
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl Leveler for WithLevel {
    fn level_min(&self) -> Level {
        self.level_min
    }

    fn level(&self) -> Level {
        self.level
    }

    fn set_level(&mut self, level: Level) {
        self.level = level;
    }
}

/// Hook that drops records whose level is below the context's minimum
pub fn hook_level_skip<C: Leveler>(context: C, message: String) -> Flow<C> {
    if !is_active(context.level_min(), context.level()) {
        return Flow::Skip;
    }
    Flow::Continue(context, message)
}

/// [`hook_level_skip`] for type-erased contexts holding a [`WithLevel`]
pub fn hook_any_level_skip(context: AnyContext, message: String) -> Flow<AnyContext> {
    let level = match context.downcast_ref::<WithLevel>() {
        Ok(level) => *level,
        Err(_) => return Flow::Fail(LoggerError::capability(context.type_name(), "Leveler")),
    };

    if !is_active(level.level_min(), level.level()) {
        return Flow::Skip;
    }
    Flow::Continue(context, message)
}
