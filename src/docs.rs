use crate::model::shift::Shift;
use crate::service::attendance::{
    AttendanceRecordDto, CreateAttendanceRecord, UpdateAttendanceRecord,
};
use crate::service::employee::{CreateEmployee, EmployeeDto, UpdateEmployee};
use crate::service::employee_shift::{AssignShift, EmployeeShiftDto};
use crate::service::leave_record::{
    ApproveLeave, CreateLeaveRecord, LeaveRecordDto, UpdateLeaveRecord,
};
use crate::service::shift::{CreateShift, UpdateShift};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Attendance Service API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Service

Records employee presence and leave over calendar time and answers temporal
consistency questions.

### Key Guarantees
- **Attendance**: at most one record per employee per day; updates carry an
  optimistic-concurrency token
- **Shifts**: reusable time-of-day windows, overnight (wrap-around) windows
  included
- **Shift Assignments**: at most one assignment per employee per day
- **Leave**: no overlapping leave intervals per employee; pending/approved
  workflow

### Response Format
JSON throughout. Invariant violations return 409, missing entities and empty
result sets return 404, structurally invalid input returns 400.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::create_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::get_attendance_by_employee_and_date,
        crate::api::attendance::get_attendance_by_date_range,

        crate::api::shift::create_shift,
        crate::api::shift::update_shift,
        crate::api::shift::get_shift,
        crate::api::shift::get_shift_by_name,
        crate::api::shift::list_shifts,
        crate::api::shift::delete_shift,
        crate::api::shift::is_time_within_shift,

        crate::api::employee_shift::assign_shift,
        crate::api::employee_shift::unassign_shift,
        crate::api::employee_shift::get_assignment,
        crate::api::employee_shift::get_assignments_for_employee,
        crate::api::employee_shift::get_assignments_for_employee_and_date,
        crate::api::employee_shift::get_assignments_for_date,
        crate::api::employee_shift::is_employee_on_shift,

        crate::api::leave_record::create_leave,
        crate::api::leave_record::update_leave,
        crate::api::leave_record::delete_leave,
        crate::api::leave_record::get_leave,
        crate::api::leave_record::get_leave_by_employee,
        crate::api::leave_record::get_leave_by_date_range,
        crate::api::leave_record::get_pending_leave,
        crate::api::leave_record::has_overlapping_leave,
        crate::api::leave_record::approve_leave,

        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::get_employee,
        crate::api::employee::get_employee_by_code,
        crate::api::employee::get_employee_by_token,
        crate::api::employee::list_employees
    ),
    components(
        schemas(
            CreateAttendanceRecord,
            UpdateAttendanceRecord,
            AttendanceRecordDto,
            CreateShift,
            UpdateShift,
            Shift,
            AssignShift,
            EmployeeShiftDto,
            CreateLeaveRecord,
            UpdateLeaveRecord,
            ApproveLeave,
            LeaveRecordDto,
            CreateEmployee,
            UpdateEmployee,
            EmployeeDto
        )
    ),
    tags(
        (name = "Attendance", description = "Daily attendance records"),
        (name = "Shift", description = "Shift catalog and window queries"),
        (name = "ShiftAssignment", description = "Per-day shift assignments"),
        (name = "Leave", description = "Leave intervals and approval"),
        (name = "Employee", description = "Employee onboarding and profiles"),
    )
)]
pub struct ApiDoc;
