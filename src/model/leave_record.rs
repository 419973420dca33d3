use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive leave interval [start_date, end_date] for one employee.
/// approved = false covers both pending and rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRecord {
    pub id: u64,
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub approved: bool,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaveWithName {
    #[sqlx(flatten)]
    pub record: LeaveRecord,
    pub employee_name: Option<String>,
}
