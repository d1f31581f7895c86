// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User, session, and employee directory queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::{Employee, EmployeeSummary};
use tracing::debug;

use crate::data_models::{EmployeeRow, SessionData, SessionRow, UserData, UserRow};
use crate::diesel_schema::{employees, sessions, users};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a user by email.
///
/// The email is lowercased for case-insensitive lookup.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The email to search for
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_email(conn: &mut _, email: &str) -> Result<Option<UserData>, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    debug!("Looking up user by email");

    let row: Option<UserRow> = users::table
        .filter(users::email.eq(&normalized_email))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserData::try_from).transpose()
}
}

backend_fn! {
/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user_by_id(conn: &mut _, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
    debug!(user_id, "Looking up user by ID");

    let row: Option<UserRow> = users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;

    row.map(UserData::try_from).transpose()
}
}

backend_fn! {
/// Retrieves a session by token.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The session token
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the session is not found.
pub fn get_session_by_token(
    conn: &mut _,
    session_token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Option<SessionRow> = sessions::table
        .filter(sessions::session_token.eq(session_token))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(SessionData::from))
}
}

backend_fn! {
/// Retrieves the employee profile belonging to a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user has no profile.
pub fn get_employee_by_user(
    conn: &mut _,
    user_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    let row: Option<EmployeeRow> = employees::table
        .filter(employees::user_id.eq(user_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Employee::from))
}
}

backend_fn! {
/// Retrieves an employee profile by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no such employee exists.
pub fn get_employee(conn: &mut _, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Employee::from))
}
}

backend_fn! {
/// Lists every employee with the email of its user as display name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_employees(conn: &mut _) -> Result<Vec<EmployeeSummary>, PersistenceError> {
    let rows: Vec<(i64, String)> = employees::table
        .inner_join(users::table)
        .select((employees::employee_id, users::email))
        .order(employees::employee_id.asc())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded employee directory");

    Ok(rows
        .into_iter()
        .map(|(id, name)| EmployeeSummary { id, name })
        .collect())
}
}
