use crate::api::{attendance, employee, employee_shift, leave_record, shift};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, api_prefix: &str) {
    cfg.service(
        web::scope(api_prefix)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // Fixed segments before /{id}
                    .service(
                        web::resource("/by-code/{code}")
                            .route(web::get().to(employee::get_employee_by_code)),
                    )
                    .service(
                        web::resource("/by-token/{token}")
                            .route(web::get().to(employee::get_employee_by_token)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::create_attendance)),
                    )
                    .service(
                        web::resource("/by-employee")
                            .route(web::get().to(attendance::get_attendance_by_employee_and_date)),
                    )
                    .service(
                        web::resource("/range")
                            .route(web::get().to(attendance::get_attendance_by_date_range)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(attendance::update_attendance)),
                    ),
            )
            .service(
                web::scope("/shifts")
                    .service(
                        web::resource("")
                            .route(web::post().to(shift::create_shift))
                            .route(web::get().to(shift::list_shifts)),
                    )
                    .service(
                        web::resource("/by-name/{name}")
                            .route(web::get().to(shift::get_shift_by_name)),
                    )
                    .service(
                        web::resource("/{id}/contains")
                            .route(web::get().to(shift::is_time_within_shift)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(shift::get_shift))
                            .route(web::put().to(shift::update_shift))
                            .route(web::delete().to(shift::delete_shift)),
                    ),
            )
            .service(
                web::scope("/shift-assignments")
                    .service(
                        web::resource("")
                            .route(web::post().to(employee_shift::assign_shift)),
                    )
                    .service(
                        web::resource("/on-shift")
                            .route(web::get().to(employee_shift::is_employee_on_shift)),
                    )
                    .service(
                        web::resource("/employee/{employee_id}/date/{date}").route(
                            web::get().to(employee_shift::get_assignments_for_employee_and_date),
                        ),
                    )
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(employee_shift::get_assignments_for_employee)),
                    )
                    .service(
                        web::resource("/date/{date}")
                            .route(web::get().to(employee_shift::get_assignments_for_date)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee_shift::get_assignment))
                            .route(web::delete().to(employee_shift::unassign_shift)),
                    ),
            )
            .service(
                web::scope("/leave")
                    .service(
                        web::resource("")
                            .route(web::post().to(leave_record::create_leave)),
                    )
                    .service(
                        web::resource("/pending")
                            .route(web::get().to(leave_record::get_pending_leave)),
                    )
                    .service(
                        web::resource("/range")
                            .route(web::get().to(leave_record::get_leave_by_date_range)),
                    )
                    .service(
                        web::resource("/overlaps")
                            .route(web::get().to(leave_record::has_overlapping_leave)),
                    )
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(leave_record::get_leave_by_employee)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leave_record::approve_leave)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(leave_record::get_leave))
                            .route(web::put().to(leave_record::update_leave))
                            .route(web::delete().to(leave_record::delete_leave)),
                    ),
            ),
    );
}
