// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification inbox queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::Notification;

use crate::data_models::NotificationRow;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

backend_fn! {
/// Lists a user's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_notifications_for_user(
    conn: &mut _,
    user_id: i64,
) -> Result<Vec<Notification>, PersistenceError> {
    let rows: Vec<NotificationRow> = notifications::table
        .filter(notifications::user_id.eq(user_id))
        .select(NotificationRow::as_select())
        .order((
            notifications::created_at.desc(),
            notifications::notification_id.desc(),
        ))
        .load(conn)?;

    Ok(rows.into_iter().map(Notification::from).collect())
}
}

backend_fn! {
#[cfg(test)]
/// Retrieves a notification by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the notification does not exist.
pub fn get_notification(
    conn: &mut _,
    notification_id: i64,
) -> Result<Option<Notification>, PersistenceError> {
    let row: Option<NotificationRow> = notifications::table
        .filter(notifications::notification_id.eq(notification_id))
        .select(NotificationRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Notification::from))
}
}
