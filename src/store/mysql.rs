//! Durable store on MySQL. Uniqueness lives in the schema (`schema.sql`):
//! unique indexes on (employee_id, attendance_date), (employee_id,
//! assigned_date), employee_code, email, presence_token and shift name.
//! Violations come back as SQLSTATE 23000 and are translated to `Duplicate`
//! by the `From<sqlx::Error>` conversion.

use sqlx::MySqlPool;

use chrono::NaiveDate;

use super::{
    AttendanceStore, EmployeeShiftStore, EmployeeStore, LeaveStore, NewAttendance, NewEmployee,
    NewEmployeeShift, NewLeaveRecord, NewShift, ShiftStore,
};
use crate::error::{ServiceError, ServiceResult};
use crate::model::attendance::{AttendanceRecord, AttendanceWithName};
use crate::model::employee::Employee;
use crate::model::employee_shift::EmployeeShiftWithNames;
use crate::model::leave_record::{LeaveRecord, LeaveWithName};
use crate::model::shift::Shift;

const ATTENDANCE_WITH_NAME: &str = r#"
    SELECT a.id, a.employee_id, a.attendance_date,
           a.clock_in_at_utc, a.clock_out_at_utc,
           a.hours_worked, a.notes, a.row_version,
           e.full_name AS employee_name
    FROM attendance_records a
    LEFT JOIN employees e ON e.id = a.employee_id
"#;

const EMPLOYEE_SHIFT_WITH_NAMES: &str = r#"
    SELECT es.id, es.employee_id, es.shift_id, es.assigned_date,
           e.full_name AS employee_name,
           s.name AS shift_name
    FROM employee_shifts es
    LEFT JOIN employees e ON e.id = es.employee_id
    LEFT JOIN shifts s ON s.id = es.shift_id
"#;

const LEAVE_WITH_NAME: &str = r#"
    SELECT l.id, l.employee_id, l.start_date, l.end_date, l.reason, l.approved,
           e.full_name AS employee_name
    FROM leave_records l
    LEFT JOIN employees e ON e.id = l.employee_id
"#;

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl EmployeeStore for MySqlStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(employee)
    }

    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Employee>> {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_code = ?")
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;
        Ok(employee)
    }

    async fn find_by_presence_token(&self, token: &str) -> ServiceResult<Option<Employee>> {
        let employee =
            sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE presence_token = ?")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        Ok(employee)
    }

    async fn find_all(&self) -> ServiceResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(employees)
    }

    async fn insert(&self, data: NewEmployee) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO employees
                (employee_code, full_name, email, department, job_title,
                 presence_token, hire_date, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.employee_code)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.department)
        .bind(&data.job_title)
        .bind(&data.presence_token)
        .bind(data.hire_date)
        .bind(data.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE employees
            SET full_name = ?, email = ?, department = ?, job_title = ?,
                hire_date = ?, is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.full_name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.job_title)
        .bind(employee.hire_date)
        .bind(employee.is_active)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        // Dependent attendance, assignments and leave go with the FK cascade.
        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl AttendanceStore for MySqlStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<AttendanceWithName>> {
        let sql = format!("{ATTENDANCE_WITH_NAME} WHERE a.id = ?");
        let record = sqlx::query_as::<_, AttendanceWithName>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Option<AttendanceWithName>> {
        let sql = format!("{ATTENDANCE_WITH_NAME} WHERE a.employee_id = ? AND a.attendance_date = ?");
        let record = sqlx::query_as::<_, AttendanceWithName>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<AttendanceWithName>> {
        let sql = format!(
            "{ATTENDANCE_WITH_NAME} WHERE a.attendance_date >= ? AND a.attendance_date <= ? \
             ORDER BY a.attendance_date, a.employee_id"
        );
        let records = sqlx::query_as::<_, AttendanceWithName>(&sql)
            .bind(start)
            .bind(end)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn insert(&self, data: NewAttendance) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO attendance_records
                (employee_id, attendance_date, clock_in_at_utc, clock_out_at_utc,
                 hours_worked, notes)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.employee_id)
        .bind(data.attendance_date)
        .bind(data.clock_in_at_utc)
        .bind(data.clock_out_at_utc)
        .bind(data.hours_worked)
        .bind(&data.notes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, record: &AttendanceRecord) -> ServiceResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE attendance_records
            SET attendance_date = ?, clock_in_at_utc = ?, clock_out_at_utc = ?,
                hours_worked = ?, notes = ?, row_version = row_version + 1
            WHERE id = ? AND row_version = ?
            "#,
        )
        .bind(record.attendance_date)
        .bind(record.clock_in_at_utc)
        .bind(record.clock_out_at_utc)
        .bind(record.hours_worked)
        .bind(&record.notes)
        .bind(record.id)
        .bind(record.row_version)
        .execute(&self.pool)
        .await?;

        // Attendance rows are never hard-deleted, so zero rows means the
        // version moved on under us.
        if result.rows_affected() == 0 {
            return Err(ServiceError::Conflict(format!(
                "Attendance record {} was changed by another update; refresh and retry",
                record.id
            )));
        }
        Ok(())
    }
}

impl ShiftStore for MySqlStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Shift>> {
        let shift = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(shift)
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Shift>> {
        let shift =
            sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE LOWER(name) = LOWER(TRIM(?))")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
        Ok(shift)
    }

    async fn find_all(&self) -> ServiceResult<Vec<Shift>> {
        let shifts = sqlx::query_as::<_, Shift>("SELECT * FROM shifts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(shifts)
    }

    async fn exists(&self, id: u64) -> ServiceResult<bool> {
        let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shifts WHERE id = ?)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found != 0)
    }

    async fn insert(&self, data: NewShift) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO shifts (name, start_time, end_time, grace_period_minutes)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&data.name)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.grace_period_minutes)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, shift: &Shift) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE shifts
            SET name = ?, start_time = ?, end_time = ?, grace_period_minutes = ?
            WHERE id = ?
            "#,
        )
        .bind(&shift.name)
        .bind(shift.start_time)
        .bind(shift.end_time)
        .bind(shift.grace_period_minutes)
        .bind(shift.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        // Assignments referencing the shift go with the FK cascade.
        sqlx::query("DELETE FROM shifts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl EmployeeShiftStore for MySqlStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<EmployeeShiftWithNames>> {
        let sql = format!("{EMPLOYEE_SHIFT_WITH_NAMES} WHERE es.id = ?");
        let assignment = sqlx::query_as::<_, EmployeeShiftWithNames>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(assignment)
    }

    async fn find_by_employee(
        &self,
        employee_id: u64,
    ) -> ServiceResult<Vec<EmployeeShiftWithNames>> {
        let sql = format!(
            "{EMPLOYEE_SHIFT_WITH_NAMES} WHERE es.employee_id = ? ORDER BY es.assigned_date, es.id"
        );
        let assignments = sqlx::query_as::<_, EmployeeShiftWithNames>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(assignments)
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Vec<EmployeeShiftWithNames>> {
        let sql = format!(
            "{EMPLOYEE_SHIFT_WITH_NAMES} WHERE es.employee_id = ? AND es.assigned_date = ? \
             ORDER BY es.id"
        );
        let assignments = sqlx::query_as::<_, EmployeeShiftWithNames>(&sql)
            .bind(employee_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(assignments)
    }

    async fn find_by_date(&self, date: NaiveDate) -> ServiceResult<Vec<EmployeeShiftWithNames>> {
        let sql = format!(
            "{EMPLOYEE_SHIFT_WITH_NAMES} WHERE es.assigned_date = ? ORDER BY es.employee_id, es.id"
        );
        let assignments = sqlx::query_as::<_, EmployeeShiftWithNames>(&sql)
            .bind(date)
            .fetch_all(&self.pool)
            .await?;
        Ok(assignments)
    }

    async fn exists_for_employee_on(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<bool> {
        let found: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM employee_shifts WHERE employee_id = ? AND assigned_date = ?)",
        )
        .bind(employee_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(found != 0)
    }

    async fn insert(&self, data: NewEmployeeShift) -> ServiceResult<()> {
        sqlx::query(
            "INSERT INTO employee_shifts (employee_id, shift_id, assigned_date) VALUES (?, ?, ?)",
        )
        .bind(data.employee_id)
        .bind(data.shift_id)
        .bind(data.assigned_date)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        sqlx::query("DELETE FROM employee_shifts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl LeaveStore for MySqlStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<LeaveWithName>> {
        let sql = format!("{LEAVE_WITH_NAME} WHERE l.id = ?");
        let record = sqlx::query_as::<_, LeaveWithName>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn find_by_employee(&self, employee_id: u64) -> ServiceResult<Vec<LeaveWithName>> {
        let sql = format!("{LEAVE_WITH_NAME} WHERE l.employee_id = ? ORDER BY l.start_date, l.id");
        let records = sqlx::query_as::<_, LeaveWithName>(&sql)
            .bind(employee_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_overlapping_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<LeaveWithName>> {
        let sql = format!(
            "{LEAVE_WITH_NAME} WHERE l.start_date <= ? AND l.end_date >= ? \
             ORDER BY l.start_date, l.id"
        );
        let records = sqlx::query_as::<_, LeaveWithName>(&sql)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn find_pending(&self) -> ServiceResult<Vec<LeaveWithName>> {
        let sql = format!("{LEAVE_WITH_NAME} WHERE l.approved = FALSE ORDER BY l.start_date, l.id");
        let records = sqlx::query_as::<_, LeaveWithName>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn has_overlapping(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<u64>,
    ) -> ServiceResult<bool> {
        let found: i64 = match exclude_id {
            Some(exclude) => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM leave_records \
                     WHERE employee_id = ? AND start_date <= ? AND end_date >= ? AND id <> ?)",
                )
                .bind(employee_id)
                .bind(end)
                .bind(start)
                .bind(exclude)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM leave_records \
                     WHERE employee_id = ? AND start_date <= ? AND end_date >= ?)",
                )
                .bind(employee_id)
                .bind(end)
                .bind(start)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(found != 0)
    }

    async fn insert(&self, data: NewLeaveRecord) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO leave_records (employee_id, start_date, end_date, reason, approved)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.employee_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(&data.reason)
        .bind(data.approved)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update(&self, record: &LeaveRecord) -> ServiceResult<()> {
        sqlx::query(
            "UPDATE leave_records SET start_date = ?, end_date = ?, reason = ? WHERE id = ?",
        )
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(&record.reason)
        .bind(record.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn set_approved(&self, id: u64, approved: bool) -> ServiceResult<()> {
        sqlx::query("UPDATE leave_records SET approved = ? WHERE id = ?")
            .bind(approved)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        sqlx::query("DELETE FROM leave_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
