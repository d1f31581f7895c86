// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and their conversion into domain values.

use diesel::prelude::*;
use rota_domain::{
    Availability, DayOfWeek, Employee, Notification, RequestStatus, Role, Schedule,
    ScheduleStatus, Shift, ShiftRequest, User,
};

use crate::diesel_schema::{
    availability, employees, notifications, schedules, sessions, shift_requests, shifts, users,
};
use crate::error::PersistenceError;

/// A user account including its password hash.
///
/// Only the identity adapter should ever see this; everything else works
/// with [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

impl UserData {
    /// Drops the credential.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.user_id,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: String,
}

impl TryFrom<UserRow> for UserData {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: row.user_id,
            email: row.email,
            password_hash: row.password_hash,
            role: row.role.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = sessions)]
pub(crate) struct SessionRow {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

impl From<SessionRow> for SessionData {
    fn from(row: SessionRow) -> Self {
        Self {
            session_id: row.session_id,
            session_token: row.session_token,
            user_id: row.user_id,
            created_at: row.created_at,
            expires_at: row.expires_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeRow {
    pub employee_id: i64,
    pub user_id: i64,
    pub phone: String,
    pub position: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Self {
            id: row.employee_id,
            user_id: row.user_id,
            phone: row.phone,
            position: row.position,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shifts)]
pub(crate) struct ShiftRow {
    pub shift_id: i64,
    pub shift_date: String,
    pub start_time: String,
    pub end_time: String,
    pub position: String,
}

impl From<ShiftRow> for Shift {
    fn from(row: ShiftRow) -> Self {
        Self {
            id: row.shift_id,
            shift_date: row.shift_date,
            start_time: row.start_time,
            end_time: row.end_time,
            position: row.position,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = schedules)]
pub(crate) struct ScheduleRow {
    pub schedule_id: i64,
    pub employee_id: Option<i64>,
    pub shift_id: i64,
    pub status: String,
    pub notes: Option<String>,
}

impl TryFrom<ScheduleRow> for Schedule {
    type Error = PersistenceError;

    fn try_from(row: ScheduleRow) -> Result<Self, Self::Error> {
        let status: ScheduleStatus = row.status.parse()?;
        Ok(Self {
            id: row.schedule_id,
            employee_id: row.employee_id,
            shift_id: row.shift_id,
            status,
            notes: row.notes,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = shift_requests)]
pub(crate) struct ShiftRequestRow {
    pub request_id: i64,
    pub requester_id: i64,
    pub target_employee_id: i64,
    pub schedule_id: i64,
    pub status: String,
    pub created_at: String,
}

impl TryFrom<ShiftRequestRow> for ShiftRequest {
    type Error = PersistenceError;

    fn try_from(row: ShiftRequestRow) -> Result<Self, Self::Error> {
        let status: RequestStatus = row.status.parse()?;
        Ok(Self {
            id: row.request_id,
            requester_id: row.requester_id,
            target_employee_id: row.target_employee_id,
            schedule_id: row.schedule_id,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
pub(crate) struct NotificationRow {
    pub notification_id: i64,
    pub user_id: i64,
    pub message: String,
    pub is_read: i32,
    pub created_at: String,
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: row.notification_id,
            user_id: row.user_id,
            message: row.message,
            read: row.is_read != 0,
            created_at: row.created_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = availability)]
pub(crate) struct AvailabilityRow {
    pub availability_id: i64,
    pub employee_id: i64,
    pub day_of_week: i32,
    pub period: String,
    pub is_available: i32,
}

impl TryFrom<AvailabilityRow> for Availability {
    type Error = PersistenceError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        let day_of_week: DayOfWeek = DayOfWeek::from_index(row.day_of_week)?;
        Ok(Self {
            id: row.availability_id,
            employee_id: row.employee_id,
            day_of_week,
            period: row.period,
            available: row.is_available != 0,
        })
    }
}

/// Converts a stored `0`/`1` flag.
pub(crate) fn flag(value: bool) -> i32 {
    i32::from(value)
}
