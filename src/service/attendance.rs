use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::{ServiceError, ServiceResult};
use crate::model::attendance::AttendanceWithName;
use crate::store::{AttendanceStore, NewAttendance};
use crate::temporal;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateAttendanceRecord {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub attendance_date: NaiveDate,
    #[schema(example = "2026-01-05T08:55:00Z", format = "date-time", value_type = Option<String>)]
    pub clock_in_at_utc: Option<DateTime<Utc>>,
    #[schema(example = "2026-01-05T17:05:00Z", format = "date-time", value_type = Option<String>)]
    pub clock_out_at_utc: Option<DateTime<Utc>>,
    #[schema(example = 8.0)]
    pub hours_worked: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateAttendanceRecord {
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub attendance_date: NaiveDate,
    #[schema(example = "2026-01-05T08:55:00Z", format = "date-time", value_type = Option<String>)]
    pub clock_in_at_utc: Option<DateTime<Utc>>,
    #[schema(example = "2026-01-05T17:05:00Z", format = "date-time", value_type = Option<String>)]
    pub clock_out_at_utc: Option<DateTime<Utc>>,
    #[schema(example = 8.0)]
    pub hours_worked: f64,
    pub notes: Option<String>,
    /// Concurrency token read with the record; a stale value is rejected
    /// with a conflict.
    #[schema(example = 0)]
    pub row_version: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceRecordDto {
    pub id: u64,
    pub employee_id: u64,
    /// None when the related employee row no longer exists; a blank stored
    /// name stays Some("").
    pub employee_name: Option<String>,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub attendance_date: NaiveDate,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub clock_in_at_utc: Option<DateTime<Utc>>,
    #[schema(format = "date-time", value_type = Option<String>)]
    pub clock_out_at_utc: Option<DateTime<Utc>>,
    pub hours_worked: f64,
    pub calculated_hours_worked: f64,
    pub is_late: bool,
    pub notes: Option<String>,
    pub row_version: u64,
}

impl From<AttendanceWithName> for AttendanceRecordDto {
    fn from(row: AttendanceWithName) -> Self {
        let calculated_hours_worked = row.record.calculated_hours_worked();
        let is_late = row.record.is_late();
        Self {
            id: row.record.id,
            employee_id: row.record.employee_id,
            employee_name: row.employee_name,
            attendance_date: row.record.attendance_date,
            clock_in_at_utc: row.record.clock_in_at_utc,
            clock_out_at_utc: row.record.clock_out_at_utc,
            hours_worked: row.record.hours_worked,
            calculated_hours_worked,
            is_late,
            notes: row.record.notes,
            row_version: row.record.row_version,
        }
    }
}

/// Enforces the one-record-per-employee-per-day rule and keeps stored worked
/// hours consistent with the clock events under concurrent updates.
pub struct AttendanceService<S> {
    store: S,
}

impl<S: AttendanceStore> AttendanceService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_record(&self, cmd: CreateAttendanceRecord) -> ServiceResult<()> {
        info!(
            employee_id = cmd.employee_id,
            date = %cmd.attendance_date,
            "Creating attendance record"
        );

        // Fast path; the unique index still rejects racing inserts.
        if self
            .store
            .find_by_employee_and_date(cmd.employee_id, cmd.attendance_date)
            .await?
            .is_some()
        {
            warn!(
                employee_id = cmd.employee_id,
                date = %cmd.attendance_date,
                "Attendance record already exists"
            );
            return Err(ServiceError::Duplicate(format!(
                "Attendance record already exists for employee {} on {}",
                cmd.employee_id, cmd.attendance_date
            )));
        }

        self.store
            .insert(NewAttendance {
                employee_id: cmd.employee_id,
                attendance_date: cmd.attendance_date,
                clock_in_at_utc: cmd.clock_in_at_utc,
                clock_out_at_utc: cmd.clock_out_at_utc,
                hours_worked: cmd.hours_worked,
                notes: cmd.notes,
            })
            .await?;

        info!(employee_id = cmd.employee_id, date = %cmd.attendance_date, "Attendance record created");
        Ok(())
    }

    pub async fn update_record(&self, id: u64, cmd: UpdateAttendanceRecord) -> ServiceResult<()> {
        info!(id, "Updating attendance record");

        let Some(existing) = self.store.find_by_id(id).await? else {
            warn!(id, "Attendance record not found");
            return Err(ServiceError::NotFound(format!(
                "Attendance record with id {id} not found"
            )));
        };

        let mut record = existing.record;
        record.attendance_date = cmd.attendance_date;
        record.clock_in_at_utc = cmd.clock_in_at_utc;
        record.clock_out_at_utc = cmd.clock_out_at_utc;
        record.notes = cmd.notes;
        // With both clock events present the stored hours are derived from
        // them and the caller-supplied value is ignored.
        record.hours_worked = match (cmd.clock_in_at_utc, cmd.clock_out_at_utc) {
            (Some(clock_in), Some(clock_out)) => {
                temporal::round_hours(temporal::hours_between(clock_in, clock_out))
            }
            _ => cmd.hours_worked,
        };
        // The token the caller read; the store rejects it if it went stale.
        record.row_version = cmd.row_version;

        self.store.update(&record).await?;

        info!(id, "Attendance record updated");
        Ok(())
    }

    pub async fn get_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<AttendanceRecordDto> {
        let record = self
            .store
            .find_by_employee_and_date(employee_id, date)
            .await?;

        match record {
            Some(row) => Ok(row.into()),
            None => Err(ServiceError::NotFound(format!(
                "Attendance record not found for employee {employee_id} on {date}"
            ))),
        }
    }

    /// Range read consumed by reporting; an empty window is reportable, not a
    /// silent empty success.
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<AttendanceRecordDto>> {
        let records = self.store.find_by_date_range(start, end).await?;
        if records.is_empty() {
            warn!(%start, %end, "No attendance records found in range");
            return Err(ServiceError::NotFound(format!(
                "No attendance records found between {start} and {end}"
            )));
        }
        info!(%start, %end, count = records.len(), "Attendance records retrieved");
        Ok(records.into_iter().map(Into::into).collect())
    }
}
