// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability register queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota_domain::{Availability, AvailabilityEntry};

use crate::data_models::AvailabilityRow;
use crate::diesel_schema::{availability, employees, users};
use crate::error::PersistenceError;

backend_fn! {
#[cfg(test)]
/// Retrieves the availability entry for one employee, day, and period.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored day is invalid.
/// Returns `Ok(None)` if no entry exists.
pub fn get_availability(
    conn: &mut _,
    employee_id: i64,
    day_of_week: rota_domain::DayOfWeek,
    period: &str,
) -> Result<Option<Availability>, PersistenceError> {
    let row: Option<AvailabilityRow> = availability::table
        .filter(availability::employee_id.eq(employee_id))
        .filter(availability::day_of_week.eq(day_of_week.index()))
        .filter(availability::period.eq(period))
        .select(AvailabilityRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Availability::try_from).transpose()
}
}

backend_fn! {
/// Lists every availability entry with the employee's display name.
///
/// Ordered by employee, then Sunday through Saturday, then period.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored day is invalid.
pub fn list_all_availability(conn: &mut _) -> Result<Vec<AvailabilityEntry>, PersistenceError> {
    let rows: Vec<(AvailabilityRow, String)> = availability::table
        .inner_join(employees::table.inner_join(users::table))
        .select((AvailabilityRow::as_select(), users::email))
        .order((
            availability::employee_id.asc(),
            availability::day_of_week.asc(),
            availability::period.asc(),
        ))
        .load(conn)?;

    rows.into_iter()
        .map(|(row, employee_name)| {
            let entry: Availability = Availability::try_from(row)?;
            Ok(AvailabilityEntry {
                employee_id: entry.employee_id,
                employee_name,
                day_of_week: entry.day_of_week,
                period: entry.period,
                available: entry.available,
            })
        })
        .collect()
}
}
