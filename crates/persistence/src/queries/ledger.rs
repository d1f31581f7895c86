// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift catalog and schedule ledger queries.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::{Schedule, ScheduleStatus, Shift, ShiftListing, UpcomingShift};
use tracing::debug;

use crate::data_models::{ScheduleRow, ShiftRow};
use crate::diesel_schema::{employees, schedules, shifts};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a shift by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the shift does not exist.
pub fn get_shift(conn: &mut _, shift_id: i64) -> Result<Option<Shift>, PersistenceError> {
    let row: Option<ShiftRow> = shifts::table
        .filter(shifts::shift_id.eq(shift_id))
        .select(ShiftRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Shift::from))
}
}

backend_fn! {
/// Lists every shift with the employee on its most recent `scheduled` row.
///
/// Shifts with no `scheduled` row report no assigned employee.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_shifts(conn: &mut _) -> Result<Vec<ShiftListing>, PersistenceError> {
    let shift_rows: Vec<ShiftRow> = shifts::table
        .select(ShiftRow::as_select())
        .order(shifts::shift_id.asc())
        .load(conn)?;

    let active_rows: Vec<(i64, Option<i64>)> = schedules::table
        .filter(schedules::status.eq(ScheduleStatus::Scheduled.as_str()))
        .select((schedules::shift_id, schedules::employee_id))
        .order(schedules::schedule_id.asc())
        .load(conn)?;

    // Later rows overwrite earlier ones: the newest assignment wins
    let assigned: HashMap<i64, Option<i64>> = active_rows.into_iter().collect();

    debug!(count = shift_rows.len(), "Loaded shift catalog");

    Ok(shift_rows
        .into_iter()
        .map(|row| {
            let assigned_employee_id: Option<i64> =
                assigned.get(&row.shift_id).copied().flatten();
            ShiftListing {
                shift: Shift::from(row),
                assigned_employee_id,
            }
        })
        .collect())
}
}

backend_fn! {
/// Retrieves a schedule row by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is invalid.
/// Returns `Ok(None)` if the schedule row does not exist.
pub fn get_schedule(conn: &mut _, schedule_id: i64) -> Result<Option<Schedule>, PersistenceError> {
    let row: Option<ScheduleRow> = schedules::table
        .filter(schedules::schedule_id.eq(schedule_id))
        .select(ScheduleRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Schedule::try_from).transpose()
}
}

backend_fn! {
/// Retrieves a schedule row together with the user ID of its assigned employee.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is invalid.
/// Returns `Ok(None)` if the schedule row does not exist.
pub fn get_schedule_with_user(
    conn: &mut _,
    schedule_id: i64,
) -> Result<Option<(Schedule, Option<i64>)>, PersistenceError> {
    let row: Option<(ScheduleRow, Option<i64>)> = schedules::table
        .left_join(employees::table)
        .filter(schedules::schedule_id.eq(schedule_id))
        .select((ScheduleRow::as_select(), employees::user_id.nullable()))
        .first(conn)
        .optional()?;

    row.map(|(schedule, user_id)| Ok((Schedule::try_from(schedule)?, user_id)))
        .transpose()
}
}

backend_fn! {
/// Retrieves the most recent `scheduled` row for a shift.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is invalid.
pub fn get_active_assignment(
    conn: &mut _,
    shift_id: i64,
) -> Result<Option<Schedule>, PersistenceError> {
    let row: Option<ScheduleRow> = schedules::table
        .filter(schedules::shift_id.eq(shift_id))
        .filter(schedules::status.eq(ScheduleStatus::Scheduled.as_str()))
        .select(ScheduleRow::as_select())
        .order(schedules::schedule_id.desc())
        .first(conn)
        .optional()?;

    row.map(Schedule::try_from).transpose()
}
}

backend_fn! {
/// Lists an employee's schedule rows whose shift falls in `[from, until)`.
///
/// Results are ordered by shift date, then start time.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The employee
/// * `from` - First date included (`YYYY-MM-DD`)
/// * `until` - First date excluded (`YYYY-MM-DD`)
///
/// # Errors
///
/// Returns an error if the database query fails or a stored status is invalid.
pub fn list_upcoming_for_employee(
    conn: &mut _,
    employee_id: i64,
    from: &str,
    until: &str,
) -> Result<Vec<UpcomingShift>, PersistenceError> {
    let rows: Vec<(i64, String, String, String, String)> = schedules::table
        .inner_join(shifts::table)
        .filter(schedules::employee_id.eq(employee_id))
        .filter(shifts::shift_date.ge(from))
        .filter(shifts::shift_date.lt(until))
        .select((
            schedules::schedule_id,
            shifts::shift_date,
            shifts::start_time,
            shifts::end_time,
            schedules::status,
        ))
        .order((
            shifts::shift_date.asc(),
            shifts::start_time.asc(),
            schedules::schedule_id.asc(),
        ))
        .load(conn)?;

    debug!(employee_id, count = rows.len(), "Loaded upcoming schedule");

    rows.into_iter()
        .map(|(schedule_id, shift_date, start_time, end_time, status)| {
            Ok(UpcomingShift {
                schedule_id,
                shift_date,
                start_time,
                end_time,
                status: status.parse()?,
            })
        })
        .collect()
}
}
