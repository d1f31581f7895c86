// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Direct notification writes.
//!
//! Notifications produced by workflow transitions are written by
//! `transitions::persist_transition` inside the same atomic unit as the
//! change; the functions here cover standalone appends and read receipts.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::{Notification, validate_notification_message};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{NotificationRow, flag};
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;
use crate::mutations::current_timestamp;

backend_fn! {
/// Appends a message to a user's inbox.
///
/// # Errors
///
/// Returns `Rejected` if the message is blank, `ForeignKeyViolation` if the
/// user does not exist, or an error if the database write fails.
pub fn insert_notification(
    conn: &mut _,
    user_id: i64,
    message: &str,
) -> Result<Notification, PersistenceError> {
    validate_notification_message(message).map_err(PersistenceError::Rejected)?;
    let created_at: String = current_timestamp()?;

    diesel::insert_into(notifications::table)
        .values((
            notifications::user_id.eq(user_id),
            notifications::message.eq(message),
            notifications::is_read.eq(flag(false)),
            notifications::created_at.eq(&created_at),
        ))
        .execute(conn)?;
    let notification_id: i64 = conn.get_last_insert_rowid()?;

    info!(notification_id, user_id, "Notification created");

    Ok(Notification {
        id: notification_id,
        user_id,
        message: message.to_string(),
        read: false,
        created_at,
    })
}
}

backend_fn! {
/// Marks a notification read on behalf of its owner.
///
/// The update is filtered by both the notification and the owner, so a
/// caller can never touch another user's inbox.
///
/// # Errors
///
/// Returns `NotFound` if no notification with that ID belongs to `user_id`.
pub fn mark_notification_read(
    conn: &mut _,
    notification_id: i64,
    user_id: i64,
) -> Result<Notification, PersistenceError> {
    debug!(notification_id, user_id, "Marking notification read");

    conn.atomic(|conn| {
        let rows_affected: usize = diesel::update(notifications::table)
            .filter(notifications::notification_id.eq(notification_id))
            .filter(notifications::user_id.eq(user_id))
            .set(notifications::is_read.eq(flag(true)))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(String::from(
                "Notification not found or does not belong to user",
            )));
        }

        let row: NotificationRow = notifications::table
            .filter(notifications::notification_id.eq(notification_id))
            .select(NotificationRow::as_select())
            .first(conn)?;

        Ok(Notification::from(row))
    })
}
}
