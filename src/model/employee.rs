use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: u64,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub job_title: String,
    /// Unique token encoded into the employee's check-in credential.
    /// Generated once at onboarding, never regenerated.
    pub presence_token: String,
    pub hire_date: NaiveDate,
    pub is_active: bool,
    pub created_at_utc: DateTime<Utc>,
}
