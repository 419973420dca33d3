use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::LeaveSvc;
use crate::service::leave_record::{
    ApproveLeave, CreateLeaveRecord, LeaveRecordDto, UpdateLeaveRecord,
};

#[derive(Deserialize, IntoParams)]
pub struct LeaveRangeQuery {
    /// Inclusive range start, YYYY-MM-DD
    #[param(value_type = String)]
    pub start: NaiveDate,
    /// Inclusive range end, YYYY-MM-DD
    #[param(value_type = String)]
    pub end: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct OverlapQuery {
    pub employee_id: u64,
    #[param(value_type = String)]
    pub start: NaiveDate,
    #[param(value_type = String)]
    pub end: NaiveDate,
}

/// Submit a leave request (rejected when it overlaps existing leave)
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body = CreateLeaveRecord,
    responses(
        (status = 201, description = "Leave record created", body = Object, example = json!({
            "message": "Leave record created successfully.",
            "status": "pending"
        })),
        (status = 400, description = "start_date after end_date"),
        (status = 409, description = "Employee already has leave in the given period"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    service: web::Data<LeaveSvc>,
    payload: web::Json<CreateLeaveRecord>,
) -> actix_web::Result<impl Responder> {
    service.create_record(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Leave record created successfully.",
        "status": "pending"
    })))
}

/// Update a leave record's interval and reason
#[utoipa::path(
    put,
    path = "/api/v1/leave/{id}",
    params(("id" = u64, Path, description = "Leave record ID")),
    request_body = UpdateLeaveRecord,
    responses(
        (status = 200, description = "Leave record updated"),
        (status = 404, description = "Leave record not found"),
        (status = 409, description = "New interval overlaps existing leave"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Leave"
)]
pub async fn update_leave(
    service: web::Data<LeaveSvc>,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeaveRecord>,
) -> actix_web::Result<impl Responder> {
    service
        .update_record(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave record updated successfully."
    })))
}

/// Delete a leave record
#[utoipa::path(
    delete,
    path = "/api/v1/leave/{id}",
    params(("id" = u64, Path, description = "Leave record ID")),
    responses(
        (status = 200, description = "Leave record deleted"),
        (status = 404, description = "Leave record not found")
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    service: web::Data<LeaveSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service.delete_record(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave record deleted successfully."
    })))
}

/// Get a leave record by ID
#[utoipa::path(
    get,
    path = "/api/v1/leave/{id}",
    params(("id" = u64, Path, description = "Leave record ID")),
    responses(
        (status = 200, description = "Leave record found", body = LeaveRecordDto),
        (status = 404, description = "Leave record not found")
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    service: web::Data<LeaveSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let record = service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// All leave records for one employee
#[utoipa::path(
    get,
    path = "/api/v1/leave/employee/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Leave records found", body = [LeaveRecordDto]),
        (status = 404, description = "No leave records for this employee")
    ),
    tag = "Leave"
)]
pub async fn get_leave_by_employee(
    service: web::Data<LeaveSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let records = service.get_by_employee(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Leave records whose interval overlaps the queried range
#[utoipa::path(
    get,
    path = "/api/v1/leave/range",
    params(LeaveRangeQuery),
    responses(
        (status = 200, description = "Leave records found", body = [LeaveRecordDto]),
        (status = 404, description = "No leave records in this range")
    ),
    tag = "Leave"
)]
pub async fn get_leave_by_date_range(
    service: web::Data<LeaveSvc>,
    query: web::Query<LeaveRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let records = service.get_by_date_range(query.start, query.end).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Leave records still waiting for approval
#[utoipa::path(
    get,
    path = "/api/v1/leave/pending",
    responses(
        (status = 200, description = "Pending leave records", body = [LeaveRecordDto]),
        (status = 404, description = "Nothing pending")
    ),
    tag = "Leave"
)]
pub async fn get_pending_leave(service: web::Data<LeaveSvc>) -> actix_web::Result<impl Responder> {
    let records = service.get_pending_approval().await?;
    Ok(HttpResponse::Ok().json(records))
}

/// Whether an employee has leave overlapping a range (always a boolean)
#[utoipa::path(
    get,
    path = "/api/v1/leave/overlaps",
    params(OverlapQuery),
    responses(
        (status = 200, description = "Check completed", body = Object, example = json!({
            "overlapping": false
        }))
    ),
    tag = "Leave"
)]
pub async fn has_overlapping_leave(
    service: web::Data<LeaveSvc>,
    query: web::Query<OverlapQuery>,
) -> actix_web::Result<impl Responder> {
    let overlapping = service
        .has_overlapping_leave(query.employee_id, query.start, query.end)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "overlapping": overlapping })))
}

/// Approve or send back a leave request. Requesting the state the record is
/// already in is rejected with 409.
#[utoipa::path(
    put,
    path = "/api/v1/leave/{id}/approve",
    params(("id" = u64, Path, description = "Leave record ID")),
    request_body = ApproveLeave,
    responses(
        (status = 200, description = "Approval flag updated"),
        (status = 404, description = "Leave record not found"),
        (status = 409, description = "Already in the desired state")
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    service: web::Data<LeaveSvc>,
    path: web::Path<u64>,
    payload: web::Json<ApproveLeave>,
) -> actix_web::Result<impl Responder> {
    service.approve(path.into_inner(), payload.approved).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave approval updated successfully."
    })))
}
