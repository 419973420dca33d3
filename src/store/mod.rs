//! Record store adapter. Services depend on these narrow traits, never on a
//! concrete backend; the durable implementation is [`mysql::MySqlStore`].
//!
//! The store owns the authoritative uniqueness guards (unique indexes,
//! compare-and-swap on the attendance row version). Service-level pre-checks
//! are a fast path only; a race that slips past one is still rejected here
//! and surfaces as the same typed error.

pub mod mysql;

#[cfg(test)]
pub mod memory;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ServiceResult;
use crate::model::attendance::{AttendanceRecord, AttendanceWithName};
use crate::model::employee::Employee;
use crate::model::employee_shift::EmployeeShiftWithNames;
use crate::model::leave_record::{LeaveRecord, LeaveWithName};
use crate::model::shift::Shift;

#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub job_title: String,
    pub presence_token: String,
    pub hire_date: NaiveDate,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub employee_id: u64,
    pub attendance_date: NaiveDate,
    pub clock_in_at_utc: Option<DateTime<Utc>>,
    pub clock_out_at_utc: Option<DateTime<Utc>>,
    pub hours_worked: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewShift {
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub grace_period_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct NewEmployeeShift {
    pub employee_id: u64,
    pub shift_id: u64,
    pub assigned_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewLeaveRecord {
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub approved: bool,
}

#[allow(async_fn_in_trait)]
pub trait EmployeeStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Employee>>;
    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Employee>>;
    async fn find_by_presence_token(&self, token: &str) -> ServiceResult<Option<Employee>>;
    async fn find_all(&self) -> ServiceResult<Vec<Employee>>;
    async fn insert(&self, data: NewEmployee) -> ServiceResult<()>;
    /// Full-row overwrite; the presence token column is never part of it.
    async fn update(&self, employee: &Employee) -> ServiceResult<()>;
    /// Removal cascades to attendance, assignments and leave.
    async fn delete(&self, id: u64) -> ServiceResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait AttendanceStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<AttendanceWithName>>;
    async fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Option<AttendanceWithName>>;
    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<AttendanceWithName>>;
    /// Rejected with `Duplicate` when a record for the same
    /// (employee, date) already exists, racing callers included.
    async fn insert(&self, data: NewAttendance) -> ServiceResult<()>;
    /// Compare-and-swap on `row_version`: the write only lands when the
    /// stored version still equals `record.row_version`, and it bumps the
    /// version. A stale version is rejected with `Conflict`.
    async fn update(&self, record: &AttendanceRecord) -> ServiceResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait ShiftStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Shift>>;
    /// Lookup under trimmed, case-insensitive comparison.
    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Shift>>;
    async fn find_all(&self) -> ServiceResult<Vec<Shift>>;
    async fn exists(&self, id: u64) -> ServiceResult<bool>;
    async fn insert(&self, data: NewShift) -> ServiceResult<()>;
    async fn update(&self, shift: &Shift) -> ServiceResult<()>;
    /// Removal cascades to assignments referencing the shift.
    async fn delete(&self, id: u64) -> ServiceResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait EmployeeShiftStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<EmployeeShiftWithNames>>;
    async fn find_by_employee(&self, employee_id: u64)
        -> ServiceResult<Vec<EmployeeShiftWithNames>>;
    async fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Vec<EmployeeShiftWithNames>>;
    async fn find_by_date(&self, date: NaiveDate) -> ServiceResult<Vec<EmployeeShiftWithNames>>;
    async fn exists_for_employee_on(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<bool>;
    /// Rejected with `Duplicate` when the employee already holds an
    /// assignment on the date, racing callers included.
    async fn insert(&self, data: NewEmployeeShift) -> ServiceResult<()>;
    async fn delete(&self, id: u64) -> ServiceResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait LeaveStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<LeaveWithName>>;
    async fn find_by_employee(&self, employee_id: u64) -> ServiceResult<Vec<LeaveWithName>>;
    /// Every record whose interval overlaps [start, end], not only those
    /// contained in it.
    async fn find_overlapping_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<LeaveWithName>>;
    async fn find_pending(&self) -> ServiceResult<Vec<LeaveWithName>>;
    /// Overlap existence test for one employee; `exclude_id` lets an update
    /// ignore the record being edited.
    async fn has_overlapping(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<u64>,
    ) -> ServiceResult<bool>;
    async fn insert(&self, data: NewLeaveRecord) -> ServiceResult<()>;
    async fn update(&self, record: &LeaveRecord) -> ServiceResult<()>;
    async fn set_approved(&self, id: u64, approved: bool) -> ServiceResult<()>;
    async fn delete(&self, id: u64) -> ServiceResult<()>;
}
