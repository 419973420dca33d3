use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::{ServiceError, ServiceResult};
use crate::model::leave_record::LeaveWithName;
use crate::store::{LeaveStore, NewLeaveRecord};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateLeaveRecord {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2026-02-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family travel")]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLeaveRecord {
    #[schema(example = "2026-02-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Family travel")]
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ApproveLeave {
    /// Desired approval flag. false covers both "still pending" and
    /// "rejected"; there is no third stored state.
    pub approved: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LeaveRecordDto {
    pub id: u64,
    pub employee_id: u64,
    /// None when the related employee row no longer exists.
    pub employee_name: Option<String>,
    #[schema(example = "2026-02-10", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-02-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    pub reason: String,
    pub approved: bool,
}

impl From<LeaveWithName> for LeaveRecordDto {
    fn from(row: LeaveWithName) -> Self {
        Self {
            id: row.record.id,
            employee_id: row.record.employee_id,
            employee_name: row.employee_name,
            start_date: row.record.start_date,
            end_date: row.record.end_date,
            reason: row.record.reason,
            approved: row.record.approved,
        }
    }
}

/// Keeps each employee's leave intervals disjoint and runs the two-state
/// approval flag (approved = false doubles as pending and rejected).
pub struct LeaveRecordService<S> {
    store: S,
}

impl<S: LeaveStore> LeaveRecordService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_record(&self, cmd: CreateLeaveRecord) -> ServiceResult<()> {
        info!(
            employee_id = cmd.employee_id,
            start = %cmd.start_date,
            end = %cmd.end_date,
            "Creating leave record"
        );

        if cmd.start_date > cmd.end_date {
            return Err(ServiceError::BadRequest(
                "start_date cannot be after end_date".to_string(),
            ));
        }

        if self
            .store
            .has_overlapping(cmd.employee_id, cmd.start_date, cmd.end_date, None)
            .await?
        {
            warn!(employee_id = cmd.employee_id, "Overlapping leave detected");
            return Err(ServiceError::Duplicate(
                "Employee already has leave in the given period.".to_string(),
            ));
        }

        self.store
            .insert(NewLeaveRecord {
                employee_id: cmd.employee_id,
                start_date: cmd.start_date,
                end_date: cmd.end_date,
                reason: cmd.reason,
                approved: false,
            })
            .await?;

        info!(employee_id = cmd.employee_id, "Leave record created");
        Ok(())
    }

    pub async fn update_record(&self, id: u64, cmd: UpdateLeaveRecord) -> ServiceResult<()> {
        info!(id, "Updating leave record");

        let Some(existing) = self.store.find_by_id(id).await? else {
            warn!(id, "Leave record not found");
            return Err(ServiceError::NotFound("Leave record not found".to_string()));
        };

        if cmd.start_date > cmd.end_date {
            return Err(ServiceError::BadRequest(
                "start_date cannot be after end_date".to_string(),
            ));
        }

        // The new interval gets the same overlap check a create would,
        // ignoring the record being edited.
        if self
            .store
            .has_overlapping(
                existing.record.employee_id,
                cmd.start_date,
                cmd.end_date,
                Some(id),
            )
            .await?
        {
            warn!(id, "Updated interval overlaps existing leave");
            return Err(ServiceError::Duplicate(
                "Employee already has leave in the given period.".to_string(),
            ));
        }

        let mut record = existing.record;
        record.start_date = cmd.start_date;
        record.end_date = cmd.end_date;
        record.reason = cmd.reason;
        // The approval flag is owned by the approval command.
        self.store.update(&record).await?;

        info!(id, "Leave record updated");
        Ok(())
    }

    pub async fn delete_record(&self, id: u64) -> ServiceResult<()> {
        info!(id, "Deleting leave record");

        if self.store.find_by_id(id).await?.is_none() {
            warn!(id, "Leave record not found");
            return Err(ServiceError::NotFound("Leave record not found".to_string()));
        }

        self.store.delete(id).await?;

        info!(id, "Leave record deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<LeaveRecordDto> {
        match self.store.find_by_id(id).await? {
            Some(row) => Ok(row.into()),
            None => Err(ServiceError::NotFound("Leave record not found".to_string())),
        }
    }

    pub async fn get_by_employee(&self, employee_id: u64) -> ServiceResult<Vec<LeaveRecordDto>> {
        let rows = self.store.find_by_employee(employee_id).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(
                "Leave records not found".to_string(),
            ));
        }
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Overlap semantics, not containment: a leave that merely touches the
    /// query range is included.
    pub async fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<LeaveRecordDto>> {
        let rows = self.store.find_overlapping_range(start, end).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No leave records found between {start} and {end}"
            )));
        }
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_pending_approval(&self) -> ServiceResult<Vec<LeaveRecordDto>> {
        let rows = self.store.find_pending().await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(
                "No leave records pending approval".to_string(),
            ));
        }
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Pure existence check; always a boolean.
    pub async fn has_overlapping_leave(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<bool> {
        self.store
            .has_overlapping(employee_id, start, end, None)
            .await
    }

    /// Flips the approval flag. Asking for the state the record is already in
    /// is rejected, not treated as a no-op success.
    pub async fn approve(&self, id: u64, approved: bool) -> ServiceResult<()> {
        info!(id, approved, "Setting leave approval");

        let Some(existing) = self.store.find_by_id(id).await? else {
            warn!(id, "Leave record not found");
            return Err(ServiceError::NotFound("Leave record not found".to_string()));
        };

        if existing.record.approved == approved {
            warn!(id, approved, "Leave record already in desired state");
            return Err(ServiceError::Duplicate(
                "Leave record is already in the desired approval state".to_string(),
            ));
        }

        self.store.set_approved(id, approved).await?;

        info!(id, approved, "Leave approval updated");
        Ok(())
    }
}
