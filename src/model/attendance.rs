use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::temporal;

/// One employee's presence on one calendar day. (employee_id, attendance_date)
/// is unique; `row_version` is the optimistic-concurrency token bumped by the
/// store on every successful update.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: u64,
    pub employee_id: u64,
    pub attendance_date: NaiveDate,
    pub clock_in_at_utc: Option<DateTime<Utc>>,
    pub clock_out_at_utc: Option<DateTime<Utc>>,
    pub hours_worked: f64,
    pub notes: Option<String>,
    pub row_version: u64,
}

impl AttendanceRecord {
    /// Worked hours derived from the two clock events, unrounded. Zero when
    /// either event is missing.
    pub fn calculated_hours_worked(&self) -> f64 {
        match (self.clock_in_at_utc, self.clock_out_at_utc) {
            (Some(clock_in), Some(clock_out)) => temporal::hours_between(clock_in, clock_out),
            _ => 0.0,
        }
    }

    pub fn is_late(&self) -> bool {
        self.clock_in_at_utc.is_some_and(temporal::is_late)
    }
}

/// Read model with the employee display name denormalized in. The name is
/// `None` when the related employee row is gone, which is distinct from an
/// employee whose stored name is blank.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceWithName {
    #[sqlx(flatten)]
    pub record: AttendanceRecord,
    pub employee_name: Option<String>,
}
