use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::model::employee::Employee;
use crate::store::{EmployeeStore, NewEmployee};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering")]
    pub department: Option<String>,
    #[schema(example = "Engineer")]
    pub job_title: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateEmployee {
    #[schema(example = "John Doe")]
    pub full_name: String,
    #[schema(example = "john.doe@company.com", format = "email", value_type = String)]
    pub email: String,
    pub department: Option<String>,
    #[schema(example = "Engineer")]
    pub job_title: String,
    pub is_active: bool,
}

/// The presence token stays internal; badges are minted elsewhere from it.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeDto {
    pub id: u64,
    pub employee_code: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    pub job_title: String,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub hire_date: NaiveDate,
    pub is_active: bool,
    #[schema(format = "date-time", value_type = String)]
    pub created_at_utc: DateTime<Utc>,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            employee_code: employee.employee_code,
            full_name: employee.full_name,
            email: employee.email,
            department: employee.department,
            job_title: employee.job_title,
            hire_date: employee.hire_date,
            is_active: employee.is_active,
            created_at_utc: employee.created_at_utc,
        }
    }
}

/// Onboarding, profile edits and removal. The presence token is generated
/// exactly once here; no other operation can touch it.
pub struct EmployeeService<S> {
    store: S,
}

impl<S: EmployeeStore> EmployeeService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn create(&self, cmd: CreateEmployee) -> ServiceResult<()> {
        info!(employee_code = %cmd.employee_code, "Creating employee");

        if self.store.find_by_code(&cmd.employee_code).await?.is_some() {
            warn!(employee_code = %cmd.employee_code, "Duplicate employee code");
            return Err(ServiceError::Duplicate(format!(
                "An employee with employee code {} already exists",
                cmd.employee_code
            )));
        }

        let presence_token = generate_presence_token();

        self.store
            .insert(NewEmployee {
                employee_code: cmd.employee_code.clone(),
                full_name: cmd.full_name,
                email: cmd.email,
                department: cmd.department,
                job_title: cmd.job_title,
                presence_token,
                hire_date: cmd.hire_date,
                is_active: true,
            })
            .await?;

        info!(employee_code = %cmd.employee_code, "Employee created");
        Ok(())
    }

    pub async fn update(&self, id: u64, cmd: UpdateEmployee) -> ServiceResult<()> {
        info!(id, "Updating employee");

        let Some(mut employee) = self.store.find_by_id(id).await? else {
            warn!(id, "Employee not found");
            return Err(ServiceError::NotFound("Employee not found".to_string()));
        };

        employee.full_name = cmd.full_name;
        employee.email = cmd.email;
        employee.department = cmd.department;
        employee.job_title = cmd.job_title;
        employee.is_active = cmd.is_active;
        // presence_token deliberately untouched

        self.store.update(&employee).await?;

        info!(id, "Employee updated");
        Ok(())
    }

    pub async fn delete(&self, id: u64) -> ServiceResult<()> {
        info!(id, "Deleting employee");

        if self.store.find_by_id(id).await?.is_none() {
            warn!(id, "Employee not found");
            return Err(ServiceError::NotFound("Employee not found".to_string()));
        }

        self.store.delete(id).await?;

        info!(id, "Employee deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, id: u64) -> ServiceResult<EmployeeDto> {
        match self.store.find_by_id(id).await? {
            Some(employee) => Ok(employee.into()),
            None => Err(ServiceError::NotFound("Employee not found".to_string())),
        }
    }

    pub async fn get_by_code(&self, code: &str) -> ServiceResult<EmployeeDto> {
        match self.store.find_by_code(code).await? {
            Some(employee) => Ok(employee.into()),
            None => Err(ServiceError::NotFound("Employee not found".to_string())),
        }
    }

    /// Check-in credential lookup.
    pub async fn get_by_presence_token(&self, token: &str) -> ServiceResult<EmployeeDto> {
        match self.store.find_by_presence_token(token).await? {
            Some(employee) => Ok(employee.into()),
            None => Err(ServiceError::NotFound("Employee not found".to_string())),
        }
    }

    pub async fn get_all(&self) -> ServiceResult<Vec<EmployeeDto>> {
        let employees = self.store.find_all().await?;
        if employees.is_empty() {
            return Err(ServiceError::NotFound("No employees found".to_string()));
        }
        Ok(employees.into_iter().map(Into::into).collect())
    }
}

fn generate_presence_token() -> String {
    format!("EMP-{}", Uuid::new_v4().to_simple())
}
