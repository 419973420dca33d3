use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::EmployeeShiftSvc;
use crate::service::employee_shift::{AssignShift, EmployeeShiftDto};

#[derive(Deserialize, IntoParams)]
pub struct OnShiftQuery {
    pub employee_id: u64,
    /// Calendar day, YYYY-MM-DD
    #[param(value_type = String)]
    pub date: NaiveDate,
}

/// Assign an employee to a shift on a date (one assignment per day)
#[utoipa::path(
    post,
    path = "/api/v1/shift-assignments",
    request_body = AssignShift,
    responses(
        (status = 201, description = "Shift assigned", body = Object, example = json!({
            "message": "Shift assigned successfully."
        })),
        (status = 409, description = "Employee already assigned on this date"),
        (status = 500, description = "Internal server error")
    ),
    tag = "ShiftAssignment"
)]
pub async fn assign_shift(
    service: web::Data<EmployeeShiftSvc>,
    payload: web::Json<AssignShift>,
) -> actix_web::Result<impl Responder> {
    service.assign(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Shift assigned successfully."
    })))
}

/// Remove a shift assignment
#[utoipa::path(
    delete,
    path = "/api/v1/shift-assignments/{id}",
    params(("id" = u64, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment removed"),
        (status = 404, description = "Assignment not found")
    ),
    tag = "ShiftAssignment"
)]
pub async fn unassign_shift(
    service: web::Data<EmployeeShiftSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service.unassign(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Shift assignment removed successfully."
    })))
}

/// Get an assignment by ID
#[utoipa::path(
    get,
    path = "/api/v1/shift-assignments/{id}",
    params(("id" = u64, Path, description = "Assignment ID")),
    responses(
        (status = 200, description = "Assignment found", body = EmployeeShiftDto),
        (status = 404, description = "Assignment not found")
    ),
    tag = "ShiftAssignment"
)]
pub async fn get_assignment(
    service: web::Data<EmployeeShiftSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let assignment = service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(assignment))
}

/// All assignments held by an employee
#[utoipa::path(
    get,
    path = "/api/v1/shift-assignments/employee/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Assignments found", body = [EmployeeShiftDto]),
        (status = 404, description = "No assignments for this employee")
    ),
    tag = "ShiftAssignment"
)]
pub async fn get_assignments_for_employee(
    service: web::Data<EmployeeShiftSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let assignments = service.get_for_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(assignments))
}

/// An employee's assignments on a specific date
#[utoipa::path(
    get,
    path = "/api/v1/shift-assignments/employee/{employee_id}/date/{date}",
    params(
        ("employee_id" = u64, Path, description = "Employee ID"),
        ("date" = String, Path, description = "Calendar day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Assignments found", body = [EmployeeShiftDto]),
        (status = 404, description = "No assignments for this employee and date")
    ),
    tag = "ShiftAssignment"
)]
pub async fn get_assignments_for_employee_and_date(
    service: web::Data<EmployeeShiftSvc>,
    path: web::Path<(u64, NaiveDate)>,
) -> actix_web::Result<impl Responder> {
    let (employee_id, date) = path.into_inner();
    let assignments = service
        .get_for_employee_and_date(employee_id, date)
        .await?;
    Ok(HttpResponse::Ok().json(assignments))
}

/// Everyone assigned to any shift on a date
#[utoipa::path(
    get,
    path = "/api/v1/shift-assignments/date/{date}",
    params(("date" = String, Path, description = "Calendar day, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Assignments found", body = [EmployeeShiftDto]),
        (status = 404, description = "No assignments on this date")
    ),
    tag = "ShiftAssignment"
)]
pub async fn get_assignments_for_date(
    service: web::Data<EmployeeShiftSvc>,
    path: web::Path<NaiveDate>,
) -> actix_web::Result<impl Responder> {
    let assignments = service.get_for_date(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(assignments))
}

/// Whether an employee holds any assignment on a date (always a boolean)
#[utoipa::path(
    get,
    path = "/api/v1/shift-assignments/on-shift",
    params(OnShiftQuery),
    responses(
        (status = 200, description = "Check completed", body = Object, example = json!({
            "on_shift": false
        }))
    ),
    tag = "ShiftAssignment"
)]
pub async fn is_employee_on_shift(
    service: web::Data<EmployeeShiftSvc>,
    query: web::Query<OnShiftQuery>,
) -> actix_web::Result<impl Responder> {
    let on_shift = service
        .is_employee_on_shift(query.employee_id, query.date)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "on_shift": on_shift })))
}
