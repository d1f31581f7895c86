// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift trade request queries.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::{PendingShiftRequest, RequestStatus, ShiftRequest};
use tracing::debug;

use crate::data_models::ShiftRequestRow;
use crate::diesel_schema::{employees, schedules, shift_requests};
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a trade request by ID, whatever its status.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is invalid.
/// Returns `Ok(None)` if the request does not exist.
pub fn get_shift_request(
    conn: &mut _,
    request_id: i64,
) -> Result<Option<ShiftRequest>, PersistenceError> {
    let row: Option<ShiftRequestRow> = shift_requests::table
        .filter(shift_requests::request_id.eq(request_id))
        .select(ShiftRequestRow::as_select())
        .first(conn)
        .optional()?;

    row.map(ShiftRequest::try_from).transpose()
}
}

backend_fn! {
/// Retrieves a pending trade request together with the requester's user ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is invalid.
/// Returns `Ok(None)` if no pending request with that ID exists.
pub fn get_pending_request_with_user(
    conn: &mut _,
    request_id: i64,
) -> Result<Option<(ShiftRequest, i64)>, PersistenceError> {
    let row: Option<(ShiftRequestRow, i64)> = shift_requests::table
        .inner_join(employees::table.on(employees::employee_id.eq(shift_requests::requester_id)))
        .filter(shift_requests::request_id.eq(request_id))
        .filter(shift_requests::status.eq(RequestStatus::Pending.as_str()))
        .select((ShiftRequestRow::as_select(), employees::user_id))
        .first(conn)
        .optional()?;

    row.map(|(request, user_id)| Ok((ShiftRequest::try_from(request)?, user_id)))
        .transpose()
}
}

backend_fn! {
/// Lists pending trade requests, most recent first.
///
/// Each request is enriched with the shift behind the traded schedule row
/// and the positions of both employees.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored status is invalid.
/// Returns `CorruptRow` if a request names an employee with no stored profile.
pub fn list_pending_requests(conn: &mut _) -> Result<Vec<PendingShiftRequest>, PersistenceError> {
    let rows: Vec<(ShiftRequestRow, i64)> = shift_requests::table
        .inner_join(schedules::table)
        .filter(shift_requests::status.eq(RequestStatus::Pending.as_str()))
        .select((ShiftRequestRow::as_select(), schedules::shift_id))
        .order((
            shift_requests::created_at.desc(),
            shift_requests::request_id.desc(),
        ))
        .load(conn)?;

    let employee_ids: Vec<i64> = rows
        .iter()
        .flat_map(|(row, _)| [row.requester_id, row.target_employee_id])
        .collect();

    let positions: HashMap<i64, String> = employees::table
        .filter(employees::employee_id.eq_any(&employee_ids))
        .select((employees::employee_id, employees::position))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    debug!(count = rows.len(), "Loaded pending shift requests");

    rows.into_iter()
        .map(|(row, shift_id)| {
            let request: ShiftRequest = ShiftRequest::try_from(row)?;
            let requester_position: String = position_of(&positions, request.requester_id)?;
            let target_position: String = position_of(&positions, request.target_employee_id)?;
            Ok(PendingShiftRequest {
                request,
                shift_id,
                requester_position,
                target_position,
            })
        })
        .collect()
}
}

/// Looks up an employee's position among the profiles loaded for a listing.
///
/// # Errors
///
/// Returns `CorruptRow` if the employee was not loaded.
pub(crate) fn position_of(
    positions: &HashMap<i64, String>,
    employee_id: i64,
) -> Result<String, PersistenceError> {
    positions.get(&employee_id).cloned().ok_or_else(|| {
        PersistenceError::CorruptRow(format!(
            "Shift request references employee {employee_id} with no profile"
        ))
    })
}
