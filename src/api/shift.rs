use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveTime;
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

use crate::api::ShiftSvc;
use crate::model::shift::Shift;
use crate::service::shift::{CreateShift, UpdateShift};

#[derive(Deserialize, IntoParams)]
pub struct TimeQuery {
    /// Time of day, HH:MM:SS
    #[param(value_type = String)]
    pub time: NaiveTime,
}

/// Create a shift template
#[utoipa::path(
    post,
    path = "/api/v1/shifts",
    request_body = CreateShift,
    responses(
        (status = 201, description = "Shift created", body = Object, example = json!({
            "message": "Shift created successfully."
        })),
        (status = 400, description = "Shift name is empty"),
        (status = 409, description = "Shift name already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Shift"
)]
pub async fn create_shift(
    service: web::Data<ShiftSvc>,
    payload: web::Json<CreateShift>,
) -> actix_web::Result<impl Responder> {
    service.create_shift(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Shift created successfully."
    })))
}

/// Update a shift template
#[utoipa::path(
    put,
    path = "/api/v1/shifts/{id}",
    params(("id" = u64, Path, description = "Shift ID")),
    request_body = UpdateShift,
    responses(
        (status = 200, description = "Shift updated"),
        (status = 404, description = "Shift not found"),
        (status = 409, description = "Shift name already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Shift"
)]
pub async fn update_shift(
    service: web::Data<ShiftSvc>,
    path: web::Path<u64>,
    payload: web::Json<UpdateShift>,
) -> actix_web::Result<impl Responder> {
    service
        .update_shift(path.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Shift updated successfully."
    })))
}

/// Get a shift by ID
#[utoipa::path(
    get,
    path = "/api/v1/shifts/{id}",
    params(("id" = u64, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift found", body = Shift),
        (status = 404, description = "Shift not found")
    ),
    tag = "Shift"
)]
pub async fn get_shift(
    service: web::Data<ShiftSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let shift = service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shift))
}

/// Get a shift by name
#[utoipa::path(
    get,
    path = "/api/v1/shifts/by-name/{name}",
    params(("name" = String, Path, description = "Shift name")),
    responses(
        (status = 200, description = "Shift found", body = Shift),
        (status = 404, description = "Shift not found")
    ),
    tag = "Shift"
)]
pub async fn get_shift_by_name(
    service: web::Data<ShiftSvc>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let shift = service.get_by_name(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(shift))
}

/// List all shifts
#[utoipa::path(
    get,
    path = "/api/v1/shifts",
    responses(
        (status = 200, description = "Shifts found", body = [Shift]),
        (status = 404, description = "No shifts found")
    ),
    tag = "Shift"
)]
pub async fn list_shifts(service: web::Data<ShiftSvc>) -> actix_web::Result<impl Responder> {
    let shifts = service.get_all().await?;
    Ok(HttpResponse::Ok().json(shifts))
}

/// Delete a shift (assignments referencing it go with it)
#[utoipa::path(
    delete,
    path = "/api/v1/shifts/{id}",
    params(("id" = u64, Path, description = "Shift ID")),
    responses(
        (status = 200, description = "Shift deleted"),
        (status = 404, description = "Shift not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Shift"
)]
pub async fn delete_shift(
    service: web::Data<ShiftSvc>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service.delete_shift(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Shift deleted successfully."
    })))
}

/// Check whether a time of day falls inside a shift's window.
/// Overnight windows (start >= end) wrap past midnight.
#[utoipa::path(
    get,
    path = "/api/v1/shifts/{id}/contains",
    params(
        ("id" = u64, Path, description = "Shift ID"),
        TimeQuery
    ),
    responses(
        (status = 200, description = "Containment checked", body = Object, example = json!({
            "within": true
        })),
        (status = 404, description = "Shift not found")
    ),
    tag = "Shift"
)]
pub async fn is_time_within_shift(
    service: web::Data<ShiftSvc>,
    path: web::Path<u64>,
    query: web::Query<TimeQuery>,
) -> actix_web::Result<impl Responder> {
    let within = service
        .is_time_within_shift(path.into_inner(), query.time)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "within": within })))
}
