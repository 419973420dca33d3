use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::api::EmployeeSvc;
use crate::service::employee::{CreateEmployee, EmployeeDto, UpdateEmployee};

/// Onboard an employee (issues the presence token)
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee created successfully."
        })),
        (status = 409, description = "Employee code already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    service: web::Data<EmployeeSvc>,
    payload: web::Json<CreateEmployee>,
) -> actix_web::Result<impl Responder> {
    service.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Employee created successfully."
    })))
}

/// Update an employee profile (never touches the presence token)
#[utoipa::path(
    put,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    service: web::Data<EmployeeSvc>,
    path: web::Path<u64>,
    payload: web::Json<UpdateEmployee>,
) -> actix_web::Result<impl Responder> {
    service
        .update(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully."
    })))
}

/// Remove an employee and everything they own
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted"),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    service: web::Data<EmployeeSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully."
    })))
}

/// Get an employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDto),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    service: web::Data<EmployeeSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee = service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Get an employee by employee code
#[utoipa::path(
    get,
    path = "/api/v1/employees/by-code/{code}",
    params(("code" = String, Path, description = "Employee code")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDto),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee_by_code(
    service: web::Data<EmployeeSvc>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee = service.get_by_code(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Resolve a scanned presence token to an employee
#[utoipa::path(
    get,
    path = "/api/v1/employees/by-token/{token}",
    params(("token" = String, Path, description = "Presence token")),
    responses(
        (status = 200, description = "Employee found", body = EmployeeDto),
        (status = 404, description = "Employee not found")
    ),
    tag = "Employee"
)]
pub async fn get_employee_by_token(
    service: web::Data<EmployeeSvc>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let employee = service.get_by_presence_token(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// List all employees
#[utoipa::path(
    get,
    path = "/api/v1/employees",
    responses(
        (status = 200, description = "Employees found", body = [EmployeeDto]),
        (status = 404, description = "No employees found")
    ),
    tag = "Employee"
)]
pub async fn list_employees(service: web::Data<EmployeeSvc>) -> actix_web::Result<impl Responder> {
    let employees = service.get_all().await?;
    Ok(HttpResponse::Ok().json(employees))
}
