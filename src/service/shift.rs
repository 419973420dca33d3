use chrono::NaiveTime;
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::{ServiceError, ServiceResult};
use crate::model::shift::Shift;
use crate::store::{NewShift, ShiftStore};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateShift {
    #[schema(example = "Night")]
    pub name: String,
    #[schema(example = "22:00:00", value_type = String)]
    pub start_time: NaiveTime,
    #[schema(example = "06:00:00", value_type = String)]
    pub end_time: NaiveTime,
    /// Late allowance in minutes; range checks are the front-end validator's
    /// contract.
    #[schema(example = 10)]
    #[serde(default = "default_grace_period")]
    pub grace_period_minutes: u32,
}

fn default_grace_period() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateShift {
    /// Omitted keeps the current name.
    #[schema(example = "Night")]
    pub name: Option<String>,
    #[schema(example = "22:00:00", value_type = String)]
    pub start_time: NaiveTime,
    #[schema(example = "06:00:00", value_type = String)]
    pub end_time: NaiveTime,
    #[schema(example = 10)]
    pub grace_period_minutes: u32,
}

/// Owns the shift catalog and answers time-of-day containment queries,
/// wrap-around windows included. Shift writes are last-writer-wins; only
/// attendance carries a concurrency token.
pub struct ShiftService<S> {
    store: S,
}

impl<S: ShiftStore> ShiftService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create_shift(&self, cmd: CreateShift) -> ServiceResult<()> {
        let name = cmd.name.trim();
        info!(shift_name = name, "Creating shift");

        if name.is_empty() {
            warn!("Shift name is empty");
            return Err(ServiceError::BadRequest(
                "Shift name cannot be empty.".to_string(),
            ));
        }

        if self.store.find_by_name(name).await?.is_some() {
            warn!(shift_name = name, "Shift name already exists");
            return Err(ServiceError::Duplicate(format!(
                "Shift with name {name} already exists"
            )));
        }

        self.store
            .insert(NewShift {
                name: name.to_string(),
                start_time: cmd.start_time,
                end_time: cmd.end_time,
                grace_period_minutes: cmd.grace_period_minutes,
            })
            .await?;

        info!(shift_name = name, "Shift created");
        Ok(())
    }

    pub async fn update_shift(&self, id: u64, cmd: UpdateShift) -> ServiceResult<()> {
        info!(id, "Updating shift");

        let Some(mut shift) = self.store.find_by_id(id).await? else {
            warn!(id, "Shift not found");
            return Err(ServiceError::NotFound("Shift not found".to_string()));
        };

        if let Some(name) = cmd.name.as_deref() {
            let name = name.trim();
            if name.is_empty() {
                return Err(ServiceError::BadRequest(
                    "Shift name cannot be empty.".to_string(),
                ));
            }
            if let Some(other) = self.store.find_by_name(name).await? {
                if other.id != id {
                    warn!(id, shift_name = name, "Shift name already taken");
                    return Err(ServiceError::Duplicate(format!(
                        "Shift with name {name} already exists"
                    )));
                }
            }
            shift.name = name.to_string();
        }
        shift.start_time = cmd.start_time;
        shift.end_time = cmd.end_time;
        shift.grace_period_minutes = cmd.grace_period_minutes;

        self.store.update(&shift).await?;

        info!(id, "Shift updated");
        Ok(())
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<Shift> {
        match self.store.find_by_id(id).await? {
            Some(shift) => Ok(shift),
            None => Err(ServiceError::NotFound("Shift not found".to_string())),
        }
    }

    pub async fn get_by_name(&self, name: &str) -> ServiceResult<Shift> {
        match self.store.find_by_name(name).await? {
            Some(shift) => Ok(shift),
            None => Err(ServiceError::NotFound("Shift not found".to_string())),
        }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<Shift>> {
        let shifts = self.store.find_all().await?;
        if shifts.is_empty() {
            return Err(ServiceError::NotFound("No shifts found".to_string()));
        }
        Ok(shifts)
    }

    pub async fn delete_shift(&self, id: u64) -> ServiceResult<()> {
        info!(id, "Deleting shift");

        if !self.store.exists(id).await? {
            warn!(id, "Shift not found");
            return Err(ServiceError::NotFound("Shift not found".to_string()));
        }

        // Assignment cleanup rides on the store's cascade.
        self.store.delete(id).await?;

        info!(id, "Shift deleted");
        Ok(())
    }

    /// Raw window containment against start/end; the stored grace period
    /// never bends this answer.
    pub async fn is_time_within_shift(&self, id: u64, time: NaiveTime) -> ServiceResult<bool> {
        let Some(shift) = self.store.find_by_id(id).await? else {
            warn!(id, "Shift not found");
            return Err(ServiceError::NotFound("Shift not found".to_string()));
        };

        let within = shift.contains(time);
        info!(id, %time, within, "Shift containment checked");
        Ok(within)
    }
}
