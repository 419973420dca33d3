use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::{ServiceError, ServiceResult};
use crate::model::employee_shift::EmployeeShiftWithNames;
use crate::store::{EmployeeShiftStore, NewEmployeeShift};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignShift {
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = 2)]
    pub shift_id: u64,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub assigned_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeShiftDto {
    pub id: u64,
    pub employee_id: u64,
    /// None when the related employee row no longer exists.
    pub employee_name: Option<String>,
    pub shift_id: u64,
    /// None when the related shift row no longer exists.
    pub shift_name: Option<String>,
    #[schema(example = "2026-01-05", format = "date", value_type = String)]
    pub assigned_date: NaiveDate,
}

impl From<EmployeeShiftWithNames> for EmployeeShiftDto {
    fn from(row: EmployeeShiftWithNames) -> Self {
        Self {
            id: row.assignment.id,
            employee_id: row.assignment.employee_id,
            employee_name: row.employee_name,
            shift_id: row.assignment.shift_id,
            shift_name: row.shift_name,
            assigned_date: row.assignment.assigned_date,
        }
    }
}

/// Enforces one shift assignment per employee per day. Uniqueness is keyed on
/// (employee, date) alone: a second shift the same day is rejected even when
/// it differs from the first.
pub struct EmployeeShiftService<S> {
    store: S,
}

impl<S: EmployeeShiftStore> EmployeeShiftService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn assign(&self, cmd: AssignShift) -> ServiceResult<()> {
        info!(
            employee_id = cmd.employee_id,
            shift_id = cmd.shift_id,
            date = %cmd.assigned_date,
            "Assigning shift"
        );

        if self
            .store
            .exists_for_employee_on(cmd.employee_id, cmd.assigned_date)
            .await?
        {
            warn!(
                employee_id = cmd.employee_id,
                date = %cmd.assigned_date,
                "Employee already assigned on this date"
            );
            return Err(ServiceError::Duplicate(
                "Employee is already assigned to a shift on the specified date".to_string(),
            ));
        }

        self.store
            .insert(NewEmployeeShift {
                employee_id: cmd.employee_id,
                shift_id: cmd.shift_id,
                assigned_date: cmd.assigned_date,
            })
            .await?;

        info!(
            employee_id = cmd.employee_id,
            shift_id = cmd.shift_id,
            date = %cmd.assigned_date,
            "Shift assigned"
        );
        Ok(())
    }

    pub async fn unassign(&self, id: u64) -> ServiceResult<()> {
        info!(id, "Unassigning shift");

        if self.store.find_by_id(id).await?.is_none() {
            warn!(id, "Shift assignment not found");
            return Err(ServiceError::NotFound(
                "Shift assignment not found".to_string(),
            ));
        }

        self.store.delete(id).await?;

        info!(id, "Shift assignment removed");
        Ok(())
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<EmployeeShiftDto> {
        match self.store.find_by_id(id).await? {
            Some(row) => Ok(row.into()),
            None => Err(ServiceError::NotFound(
                "Shift assignment not found".to_string(),
            )),
        }
    }

    pub async fn get_for_employee(&self, employee_id: u64) -> ServiceResult<Vec<EmployeeShiftDto>> {
        let rows = self.store.find_by_employee(employee_id).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No shift assignments found for employee {employee_id}"
            )));
        }
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_for_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Vec<EmployeeShiftDto>> {
        let rows = self
            .store
            .find_by_employee_and_date(employee_id, date)
            .await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No shift assignments found for employee {employee_id} on {date}"
            )));
        }
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get_for_date(&self, date: NaiveDate) -> ServiceResult<Vec<EmployeeShiftDto>> {
        let rows = self.store.find_by_date(date).await?;
        if rows.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "No shift assignments found on {date}"
            )));
        }
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Plain existence check; an unassigned employee is `false`, never an
    /// error.
    pub async fn is_employee_on_shift(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<bool> {
        self.store.exists_for_employee_on(employee_id, date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::store::{EmployeeStore, NewEmployee, NewShift, ShiftStore};
    use chrono::NaiveTime;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn seed(store: &InMemoryStore) -> (u64, u64, u64) {
        EmployeeStore::insert(
            store,
            NewEmployee {
                employee_code: "E-200".to_string(),
                full_name: "Hana Saito".to_string(),
                email: "hana@example.com".to_string(),
                department: Some("Ops".to_string()),
                job_title: "Operator".to_string(),
                presence_token: "EMP-hana".to_string(),
                hire_date: d("2025-03-01"),
                is_active: true,
            },
        )
        .await
        .unwrap();
        let employee_id = EmployeeStore::find_by_code(store, "E-200")
            .await
            .unwrap()
            .unwrap()
            .id;

        for (name, start, end) in [("Morning", 6, 14), ("Evening", 14, 22)] {
            ShiftStore::insert(
                store,
                NewShift {
                    name: name.to_string(),
                    start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                    end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
                    grace_period_minutes: 10,
                },
            )
            .await
            .unwrap();
        }
        let morning = ShiftStore::find_by_name(store, "Morning")
            .await
            .unwrap()
            .unwrap()
            .id;
        let evening = ShiftStore::find_by_name(store, "Evening")
            .await
            .unwrap()
            .unwrap()
            .id;
        (employee_id, morning, evening)
    }

    #[tokio::test]
    async fn a_second_shift_on_the_same_day_is_a_duplicate_even_if_different() {
        let store = InMemoryStore::new();
        let (employee_id, morning, evening) = seed(&store).await;
        let service = EmployeeShiftService::new(store);

        service
            .assign(AssignShift {
                employee_id,
                shift_id: morning,
                assigned_date: d("2026-01-05"),
            })
            .await
            .unwrap();

        let err = service
            .assign(AssignShift {
                employee_id,
                shift_id: evening,
                assigned_date: d("2026-01-05"),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Duplicate(_)));

        // The next day is free.
        service
            .assign(AssignShift {
                employee_id,
                shift_id: evening,
                assigned_date: d("2026-01-06"),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn assignment_reads_denormalize_both_names() {
        let store = InMemoryStore::new();
        let (employee_id, morning, _) = seed(&store).await;
        let service = EmployeeShiftService::new(store);

        service
            .assign(AssignShift {
                employee_id,
                shift_id: morning,
                assigned_date: d("2026-01-05"),
            })
            .await
            .unwrap();

        let rows = service.get_for_employee(employee_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name.as_deref(), Some("Hana Saito"));
        assert_eq!(rows[0].shift_name.as_deref(), Some("Morning"));

        let by_date = service.get_for_date(d("2026-01-05")).await.unwrap();
        assert_eq!(by_date.len(), 1);
        let by_both = service
            .get_for_employee_and_date(employee_id, d("2026-01-05"))
            .await
            .unwrap();
        assert_eq!(by_both.len(), 1);
    }

    #[tokio::test]
    async fn empty_assignment_queries_are_not_found() {
        let store = InMemoryStore::new();
        let service = EmployeeShiftService::new(store);

        assert!(matches!(
            service.get_for_employee(1).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.get_for_date(d("2026-01-05")).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service
                .get_for_employee_and_date(1, d("2026-01-05"))
                .await
                .unwrap_err(),
            ServiceError::NotFound(_)
        ));
        assert!(matches!(
            service.get_by_id(1).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn on_shift_check_is_a_boolean_not_an_error() {
        let store = InMemoryStore::new();
        let (employee_id, morning, _) = seed(&store).await;
        let service = EmployeeShiftService::new(store);

        assert!(
            !service
                .is_employee_on_shift(employee_id, d("2026-01-05"))
                .await
                .unwrap()
        );

        service
            .assign(AssignShift {
                employee_id,
                shift_id: morning,
                assigned_date: d("2026-01-05"),
            })
            .await
            .unwrap();

        assert!(
            service
                .is_employee_on_shift(employee_id, d("2026-01-05"))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn unassign_removes_and_rejects_unknown_ids() {
        let store = InMemoryStore::new();
        let (employee_id, morning, _) = seed(&store).await;
        let service = EmployeeShiftService::new(store);

        service
            .assign(AssignShift {
                employee_id,
                shift_id: morning,
                assigned_date: d("2026-01-05"),
            })
            .await
            .unwrap();
        let id = service.get_for_employee(employee_id).await.unwrap()[0].id;

        service.unassign(id).await.unwrap();
        assert!(matches!(
            service.unassign(id).await.unwrap_err(),
            ServiceError::NotFound(_)
        ));
    }
}
