use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Binds one employee to one shift on one calendar day.
/// (employee_id, assigned_date) is unique.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeShift {
    pub id: u64,
    pub employee_id: u64,
    pub shift_id: u64,
    pub assigned_date: NaiveDate,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeShiftWithNames {
    #[sqlx(flatten)]
    pub assignment: EmployeeShift,
    pub employee_name: Option<String>,
    pub shift_name: Option<String>,
}
