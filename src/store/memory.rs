//! In-memory store used by the service unit tests. Each trait method runs its
//! whole check-then-act sequence under one mutex acquisition, so it gives the
//! same atomic uniqueness guarantees the MySQL schema does.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use super::{
    AttendanceStore, EmployeeShiftStore, EmployeeStore, LeaveStore, NewAttendance, NewEmployee,
    NewEmployeeShift, NewLeaveRecord, NewShift, ShiftStore,
};
use crate::error::{ServiceError, ServiceResult};
use crate::model::attendance::{AttendanceRecord, AttendanceWithName};
use crate::model::employee::Employee;
use crate::model::employee_shift::{EmployeeShift, EmployeeShiftWithNames};
use crate::model::leave_record::{LeaveRecord, LeaveWithName};
use crate::model::shift::Shift;
use crate::temporal;

#[derive(Default)]
struct Inner {
    next_id: u64,
    employees: BTreeMap<u64, Employee>,
    attendance: BTreeMap<u64, AttendanceRecord>,
    shifts: BTreeMap<u64, Shift>,
    employee_shifts: BTreeMap<u64, EmployeeShift>,
    leave_records: BTreeMap<u64, LeaveRecord>,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn employee_name(&self, employee_id: u64) -> Option<String> {
        self.employees.get(&employee_id).map(|e| e.full_name.clone())
    }

    fn shift_name(&self, shift_id: u64) -> Option<String> {
        self.shifts.get(&shift_id).map(|s| s.name.clone())
    }

    fn hydrate_attendance(&self, record: &AttendanceRecord) -> AttendanceWithName {
        AttendanceWithName {
            record: record.clone(),
            employee_name: self.employee_name(record.employee_id),
        }
    }

    fn hydrate_assignment(&self, assignment: &EmployeeShift) -> EmployeeShiftWithNames {
        EmployeeShiftWithNames {
            assignment: assignment.clone(),
            employee_name: self.employee_name(assignment.employee_id),
            shift_name: self.shift_name(assignment.shift_id),
        }
    }

    fn hydrate_leave(&self, record: &LeaveRecord) -> LeaveWithName {
        LeaveWithName {
            record: record.clone(),
            employee_name: self.employee_name(record.employee_id),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }
}

impl EmployeeStore for InMemoryStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Employee>> {
        Ok(self.lock().employees.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> ServiceResult<Option<Employee>> {
        Ok(self
            .lock()
            .employees
            .values()
            .find(|e| e.employee_code == code)
            .cloned())
    }

    async fn find_by_presence_token(&self, token: &str) -> ServiceResult<Option<Employee>> {
        Ok(self
            .lock()
            .employees
            .values()
            .find(|e| e.presence_token == token)
            .cloned())
    }

    async fn find_all(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.lock().employees.values().cloned().collect())
    }

    async fn insert(&self, data: NewEmployee) -> ServiceResult<()> {
        let mut inner = self.lock();
        if inner.employees.values().any(|e| {
            e.employee_code == data.employee_code
                || e.email == data.email
                || e.presence_token == data.presence_token
        }) {
            return Err(ServiceError::Duplicate(
                "A record with the same key already exists".to_string(),
            ));
        }
        let id = inner.next_id();
        inner.employees.insert(
            id,
            Employee {
                id,
                employee_code: data.employee_code,
                full_name: data.full_name,
                email: data.email,
                department: data.department,
                job_title: data.job_title,
                presence_token: data.presence_token,
                hire_date: data.hire_date,
                is_active: data.is_active,
                created_at_utc: chrono::Utc::now(),
            },
        );
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> ServiceResult<()> {
        let mut inner = self.lock();
        if let Some(stored) = inner.employees.get_mut(&employee.id) {
            let token = stored.presence_token.clone();
            let created = stored.created_at_utc;
            *stored = employee.clone();
            // The token and creation stamp are immutable no matter what the
            // caller handed in.
            stored.presence_token = token;
            stored.created_at_utc = created;
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        let mut inner = self.lock();
        inner.employees.remove(&id);
        inner.attendance.retain(|_, a| a.employee_id != id);
        inner.employee_shifts.retain(|_, es| es.employee_id != id);
        inner.leave_records.retain(|_, l| l.employee_id != id);
        Ok(())
    }
}

impl AttendanceStore for InMemoryStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<AttendanceWithName>> {
        let inner = self.lock();
        Ok(inner.attendance.get(&id).map(|r| inner.hydrate_attendance(r)))
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Option<AttendanceWithName>> {
        let inner = self.lock();
        Ok(inner
            .attendance
            .values()
            .find(|r| r.employee_id == employee_id && r.attendance_date == date)
            .map(|r| inner.hydrate_attendance(r)))
    }

    async fn find_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<AttendanceWithName>> {
        let inner = self.lock();
        let mut records: Vec<_> = inner
            .attendance
            .values()
            .filter(|r| r.attendance_date >= start && r.attendance_date <= end)
            .map(|r| inner.hydrate_attendance(r))
            .collect();
        records.sort_by_key(|r| (r.record.attendance_date, r.record.employee_id));
        Ok(records)
    }

    async fn insert(&self, data: NewAttendance) -> ServiceResult<()> {
        let mut inner = self.lock();
        if inner
            .attendance
            .values()
            .any(|r| r.employee_id == data.employee_id && r.attendance_date == data.attendance_date)
        {
            return Err(ServiceError::Duplicate(
                "A record with the same key already exists".to_string(),
            ));
        }
        let id = inner.next_id();
        inner.attendance.insert(
            id,
            AttendanceRecord {
                id,
                employee_id: data.employee_id,
                attendance_date: data.attendance_date,
                clock_in_at_utc: data.clock_in_at_utc,
                clock_out_at_utc: data.clock_out_at_utc,
                hours_worked: data.hours_worked,
                notes: data.notes,
                row_version: 0,
            },
        );
        Ok(())
    }

    async fn update(&self, record: &AttendanceRecord) -> ServiceResult<()> {
        let mut inner = self.lock();
        let Some(stored) = inner.attendance.get_mut(&record.id) else {
            return Err(ServiceError::NotFound(format!(
                "Attendance record with id {} not found",
                record.id
            )));
        };
        if stored.row_version != record.row_version {
            return Err(ServiceError::Conflict(format!(
                "Attendance record {} was changed by another update; refresh and retry",
                record.id
            )));
        }
        *stored = record.clone();
        stored.row_version = record.row_version + 1;
        Ok(())
    }
}

impl ShiftStore for InMemoryStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Shift>> {
        Ok(self.lock().shifts.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ServiceResult<Option<Shift>> {
        let wanted = name.trim().to_lowercase();
        Ok(self
            .lock()
            .shifts
            .values()
            .find(|s| s.name.trim().to_lowercase() == wanted)
            .cloned())
    }

    async fn find_all(&self) -> ServiceResult<Vec<Shift>> {
        Ok(self.lock().shifts.values().cloned().collect())
    }

    async fn exists(&self, id: u64) -> ServiceResult<bool> {
        Ok(self.lock().shifts.contains_key(&id))
    }

    async fn insert(&self, data: NewShift) -> ServiceResult<()> {
        let mut inner = self.lock();
        let wanted = data.name.trim().to_lowercase();
        if inner
            .shifts
            .values()
            .any(|s| s.name.trim().to_lowercase() == wanted)
        {
            return Err(ServiceError::Duplicate(
                "A record with the same key already exists".to_string(),
            ));
        }
        let id = inner.next_id();
        inner.shifts.insert(
            id,
            Shift {
                id,
                name: data.name,
                start_time: data.start_time,
                end_time: data.end_time,
                grace_period_minutes: data.grace_period_minutes,
            },
        );
        Ok(())
    }

    async fn update(&self, shift: &Shift) -> ServiceResult<()> {
        let mut inner = self.lock();
        if let Some(stored) = inner.shifts.get_mut(&shift.id) {
            *stored = shift.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        let mut inner = self.lock();
        inner.shifts.remove(&id);
        inner.employee_shifts.retain(|_, es| es.shift_id != id);
        Ok(())
    }
}

impl EmployeeShiftStore for InMemoryStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<EmployeeShiftWithNames>> {
        let inner = self.lock();
        Ok(inner
            .employee_shifts
            .get(&id)
            .map(|es| inner.hydrate_assignment(es)))
    }

    async fn find_by_employee(
        &self,
        employee_id: u64,
    ) -> ServiceResult<Vec<EmployeeShiftWithNames>> {
        let inner = self.lock();
        Ok(inner
            .employee_shifts
            .values()
            .filter(|es| es.employee_id == employee_id)
            .map(|es| inner.hydrate_assignment(es))
            .collect())
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<Vec<EmployeeShiftWithNames>> {
        let inner = self.lock();
        Ok(inner
            .employee_shifts
            .values()
            .filter(|es| es.employee_id == employee_id && es.assigned_date == date)
            .map(|es| inner.hydrate_assignment(es))
            .collect())
    }

    async fn find_by_date(&self, date: NaiveDate) -> ServiceResult<Vec<EmployeeShiftWithNames>> {
        let inner = self.lock();
        Ok(inner
            .employee_shifts
            .values()
            .filter(|es| es.assigned_date == date)
            .map(|es| inner.hydrate_assignment(es))
            .collect())
    }

    async fn exists_for_employee_on(
        &self,
        employee_id: u64,
        date: NaiveDate,
    ) -> ServiceResult<bool> {
        Ok(self
            .lock()
            .employee_shifts
            .values()
            .any(|es| es.employee_id == employee_id && es.assigned_date == date))
    }

    async fn insert(&self, data: NewEmployeeShift) -> ServiceResult<()> {
        let mut inner = self.lock();
        if inner
            .employee_shifts
            .values()
            .any(|es| es.employee_id == data.employee_id && es.assigned_date == data.assigned_date)
        {
            return Err(ServiceError::Duplicate(
                "A record with the same key already exists".to_string(),
            ));
        }
        let id = inner.next_id();
        inner.employee_shifts.insert(
            id,
            EmployeeShift {
                id,
                employee_id: data.employee_id,
                shift_id: data.shift_id,
                assigned_date: data.assigned_date,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        self.lock().employee_shifts.remove(&id);
        Ok(())
    }
}

impl LeaveStore for InMemoryStore {
    async fn find_by_id(&self, id: u64) -> ServiceResult<Option<LeaveWithName>> {
        let inner = self.lock();
        Ok(inner.leave_records.get(&id).map(|l| inner.hydrate_leave(l)))
    }

    async fn find_by_employee(&self, employee_id: u64) -> ServiceResult<Vec<LeaveWithName>> {
        let inner = self.lock();
        Ok(inner
            .leave_records
            .values()
            .filter(|l| l.employee_id == employee_id)
            .map(|l| inner.hydrate_leave(l))
            .collect())
    }

    async fn find_overlapping_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<LeaveWithName>> {
        let inner = self.lock();
        Ok(inner
            .leave_records
            .values()
            .filter(|l| temporal::date_ranges_overlap(l.start_date, l.end_date, start, end))
            .map(|l| inner.hydrate_leave(l))
            .collect())
    }

    async fn find_pending(&self) -> ServiceResult<Vec<LeaveWithName>> {
        let inner = self.lock();
        Ok(inner
            .leave_records
            .values()
            .filter(|l| !l.approved)
            .map(|l| inner.hydrate_leave(l))
            .collect())
    }

    async fn has_overlapping(
        &self,
        employee_id: u64,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<u64>,
    ) -> ServiceResult<bool> {
        Ok(self.lock().leave_records.values().any(|l| {
            l.employee_id == employee_id
                && Some(l.id) != exclude_id
                && temporal::date_ranges_overlap(l.start_date, l.end_date, start, end)
        }))
    }

    async fn insert(&self, data: NewLeaveRecord) -> ServiceResult<()> {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.leave_records.insert(
            id,
            LeaveRecord {
                id,
                employee_id: data.employee_id,
                start_date: data.start_date,
                end_date: data.end_date,
                reason: data.reason,
                approved: data.approved,
            },
        );
        Ok(())
    }

    async fn update(&self, record: &LeaveRecord) -> ServiceResult<()> {
        let mut inner = self.lock();
        if let Some(stored) = inner.leave_records.get_mut(&record.id) {
            stored.start_date = record.start_date;
            stored.end_date = record.end_date;
            stored.reason = record.reason.clone();
        }
        Ok(())
    }

    async fn set_approved(&self, id: u64, approved: bool) -> ServiceResult<()> {
        let mut inner = self.lock();
        if let Some(stored) = inner.leave_records.get_mut(&id) {
            stored.approved = approved;
        }
        Ok(())
    }

    async fn delete(&self, id: u64) -> ServiceResult<()> {
        self.lock().leave_records.remove(&id);
        Ok(())
    }
}
