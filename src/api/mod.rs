pub mod attendance;
pub mod employee;
pub mod employee_shift;
pub mod leave_record;
pub mod shift;

use crate::service::attendance::AttendanceService;
use crate::service::employee::EmployeeService;
use crate::service::employee_shift::EmployeeShiftService;
use crate::service::leave_record::LeaveRecordService;
use crate::service::shift::ShiftService;
use crate::store::mysql::MySqlStore;

// Concrete service types the handlers pull out of app data.
pub type AttendanceSvc = AttendanceService<MySqlStore>;
pub type EmployeeSvc = EmployeeService<MySqlStore>;
pub type EmployeeShiftSvc = EmployeeShiftService<MySqlStore>;
pub type LeaveSvc = LeaveRecordService<MySqlStore>;
pub type ShiftSvc = ShiftService<MySqlStore>;
