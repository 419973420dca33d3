use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::AttendanceSvc;
use crate::service::attendance::{
    AttendanceRecordDto, CreateAttendanceRecord, UpdateAttendanceRecord,
};

#[derive(Deserialize, IntoParams)]
pub struct EmployeeDateQuery {
    /// Employee to look up
    pub employee_id: u64,
    /// Calendar day, YYYY-MM-DD
    #[param(value_type = String)]
    pub date: NaiveDate,
}

#[derive(Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// Inclusive range start, YYYY-MM-DD
    #[param(value_type = String)]
    pub start: NaiveDate,
    /// Inclusive range end, YYYY-MM-DD
    #[param(value_type = String)]
    pub end: NaiveDate,
}

/// Create an attendance record (one per employee per day)
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CreateAttendanceRecord,
    responses(
        (status = 201, description = "Attendance record created", body = Object, example = json!({
            "message": "Attendance record created successfully."
        })),
        (status = 409, description = "Record already exists for this employee and day"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    service: web::Data<AttendanceSvc>,
    payload: web::Json<CreateAttendanceRecord>,
) -> actix_web::Result<impl Responder> {
    service.create_record(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Attendance record created successfully."
    })))
}

/// Update an attendance record (optimistic concurrency)
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    params(("id" = u64, Path, description = "Attendance record ID")),
    request_body = UpdateAttendanceRecord,
    responses(
        (status = 200, description = "Attendance record updated", body = Object, example = json!({
            "message": "Attendance record updated successfully."
        })),
        (status = 404, description = "Attendance record not found"),
        (status = 409, description = "Stale concurrency token; refetch and retry"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn update_attendance(
    service: web::Data<AttendanceSvc>,
    path: web::Path<u64>,
    payload: web::Json<UpdateAttendanceRecord>,
) -> actix_web::Result<impl Responder> {
    service
        .update_record(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Attendance record updated successfully."
    })))
}

/// Get one employee's attendance on one day
#[utoipa::path(
    get,
    path = "/api/v1/attendance/by-employee",
    params(EmployeeDateQuery),
    responses(
        (status = 200, description = "Attendance record found", body = AttendanceRecordDto),
        (status = 404, description = "No record for this employee and day"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance_by_employee_and_date(
    service: web::Data<AttendanceSvc>,
    query: web::Query<EmployeeDateQuery>,
) -> actix_web::Result<impl Responder> {
    let record = service
        .get_by_employee_and_date(query.employee_id, query.date)
        .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Get all attendance records inside a date range
#[utoipa::path(
    get,
    path = "/api/v1/attendance/range",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "Attendance records found", body = [AttendanceRecordDto]),
        (status = 404, description = "No records in this range"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance_by_date_range(
    service: web::Data<AttendanceSvc>,
    query: web::Query<DateRangeQuery>,
) -> actix_web::Result<impl Responder> {
    let records = service.get_by_date_range(query.start, query.end).await?;
    Ok(HttpResponse::Ok().json(records))
}
