//! Timestamps

use crate::core::Flow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read/write access to a context's timestamp
pub trait Timer {
    /// Time of the current record
    fn time(&self) -> DateTime<Utc>;
    fn set_time(&mut self, time: DateTime<Utc>);
}

/// Timestamp field to embed in a context type
///
/// Serializes as `{"time":"2022-02-01T12:30:00Z"}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithTime {
    time: DateTime<Utc>,
}

impl WithTime {
    /// Time fields set to `time`
    pub fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }

    /// Time fields set to the current time
    pub fn now() -> Self {
        Self::new(Utc::now())
    }
}

impl Timer for WithTime {
    fn time(&self) -> DateTime<Utc> {
        self.time
    }

    fn set_time(&mut self, time: DateTime<Utc>) {
        self.time = time;
    }
}

/// Hook that stamps the current time on each record's context
pub fn hook_update_time<C: Timer>(mut context: C, message: String) -> Flow<C> {
    context.set_time(Utc::now());
    Flow::Continue(context, message)
}
