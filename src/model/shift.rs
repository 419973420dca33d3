use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::temporal;

/// Named, reusable time-of-day template. start_time >= end_time means the
/// window wraps past midnight (e.g. 22:00-06:00).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Shift {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Night")]
    pub name: String,
    #[schema(example = "22:00:00", value_type = String)]
    pub start_time: NaiveTime,
    #[schema(example = "06:00:00", value_type = String)]
    pub end_time: NaiveTime,
    #[schema(example = 10)]
    pub grace_period_minutes: u32,
}

impl Shift {
    /// Raw window containment; the grace period never affects this.
    pub fn contains(&self, time: NaiveTime) -> bool {
        temporal::time_within_window(self.start_time, self.end_time, time)
    }
}
