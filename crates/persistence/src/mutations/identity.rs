// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User, employee profile, and session mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::{Employee, Role, User};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{employees, sessions, users};
use crate::error::PersistenceError;
use crate::mutations::current_timestamp;

/// Hashes a plain-text password with bcrypt.
fn hash_password(password: &str) -> Result<String, PersistenceError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

backend_fn! {
/// Creates a user account and, for employees, the paired employee profile.
///
/// Both rows are written in one atomic unit. Employee profiles start with
/// the default phone and position.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `email` - The login email (already normalized)
/// * `password` - The plain-text password (will be hashed)
/// * `role` - The account role
///
/// # Errors
///
/// Returns an error if:
/// - The email is already registered (`UniqueViolation`)
/// - The password cannot be hashed
/// - The database write fails
pub fn create_user(
    conn: &mut _,
    email: &str,
    password: &str,
    role: Role,
) -> Result<(User, Option<Employee>), PersistenceError> {
    info!(role = role.as_str(), "Creating user");

    let password_hash: String = hash_password(password)?;

    conn.atomic(|conn| {
        let existing: i64 = users::table
            .filter(users::email.eq(email))
            .count()
            .get_result(conn)?;
        if existing > 0 {
            return Err(PersistenceError::UniqueViolation(String::from(
                "User already exists",
            )));
        }

        let created_at: String = current_timestamp()?;
        diesel::insert_into(users::table)
            .values((
                users::email.eq(email),
                users::password_hash.eq(&password_hash),
                users::role.eq(role.as_str()),
                users::created_at.eq(&created_at),
            ))
            .execute(conn)?;
        let user_id: i64 = conn.get_last_insert_rowid()?;

        let employee: Option<Employee> = if role == Role::Employee {
            diesel::insert_into(employees::table)
                .values((
                    employees::user_id.eq(user_id),
                    employees::phone.eq(Employee::DEFAULT_PHONE),
                    employees::position.eq(Employee::DEFAULT_POSITION),
                ))
                .execute(conn)?;
            let employee_id: i64 = conn.get_last_insert_rowid()?;
            Some(Employee {
                id: employee_id,
                user_id,
                phone: Employee::DEFAULT_PHONE.to_string(),
                position: Employee::DEFAULT_POSITION.to_string(),
            })
        } else {
            None
        };

        info!(user_id, "User created");

        Ok((
            User {
                id: user_id,
                email: email.to_string(),
                role,
                created_at,
            },
            employee,
        ))
    })
}
}

backend_fn! {
/// Creates an employee profile for an existing user.
///
/// # Errors
///
/// Returns an error if:
/// - The user does not exist (`ForeignKeyViolation`)
/// - The user already has a profile (`UniqueViolation`)
/// - The database write fails
pub fn create_employee(
    conn: &mut _,
    user_id: i64,
    phone: &str,
    position: &str,
) -> Result<Employee, PersistenceError> {
    info!(user_id, "Creating employee profile");

    conn.atomic(|conn| {
        diesel::insert_into(employees::table)
            .values((
                employees::user_id.eq(user_id),
                employees::phone.eq(phone),
                employees::position.eq(position),
            ))
            .execute(conn)?;
        let employee_id: i64 = conn.get_last_insert_rowid()?;

        Ok(Employee {
            id: employee_id,
            user_id,
            phone: phone.to_string(),
            position: position.to_string(),
        })
    })
}
}

backend_fn! {
/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `user_id` - The user
/// * `expires_at` - The expiration timestamp (ISO 8601 format)
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut _,
    session_token: &str,
    user_id: i64,
    expires_at: &str,
) -> Result<i64, PersistenceError> {
    debug!(user_id, expires_at, "Creating session");

    let created_at: String = current_timestamp()?;
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id),
            sessions::created_at.eq(&created_at),
            sessions::expires_at.eq(expires_at),
        ))
        .execute(conn)?;

    let session_id: i64 = conn.get_last_insert_rowid()?;

    debug!(session_id, user_id, "Session created");
    Ok(session_id)
}
}

backend_fn! {
/// Deletes a session by token.
///
/// This is used for logout and for discarding expired sessions.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(conn: &mut _, session_token: &str) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}
}
