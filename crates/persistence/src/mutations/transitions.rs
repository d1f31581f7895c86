// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applying workflow transitions.
//!
//! A [`Transition`] is written as one atomic unit: its state change and
//! every notification it carries commit together or not at all.
//!
//! Trade resolution is arbitrated by a single conditional update on the
//! request's status. Of several racing resolutions exactly one matches a
//! `pending` row; the rest match nothing and roll back with `NotFound`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use rota::{StateChange, Transition};
use rota_domain::{
    Availability, RequestStatus, Schedule, ScheduleStatus, Shift, ShiftRequest,
    validate_notification_message,
};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::{ScheduleRow, flag};
use crate::diesel_schema::{availability, notifications, schedules, shift_requests, shifts};
use crate::error::PersistenceError;
use crate::mutations::current_timestamp;

/// The stored outcome of a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistedChange {
    /// A shift was created, with its first schedule row when one was requested.
    Shift {
        /// The new shift.
        shift: Shift,
        /// The paired schedule row.
        schedule: Option<Schedule>,
    },
    /// A schedule row was created or updated.
    Schedule(Schedule),
    /// A trade request was opened.
    ShiftRequest(ShiftRequest),
    /// A trade request reached a terminal status.
    TradeResolved {
        /// The trade request.
        request_id: i64,
        /// Its new status.
        status: RequestStatus,
    },
    /// An availability entry was inserted or overwritten.
    Availability(Availability),
}

/// The result of persisting a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// What the state change stored.
    pub change: PersistedChange,
    /// IDs of the notifications written with it.
    pub notification_ids: Vec<i64>,
}

backend_fn! {
/// Persists a transition as one atomic unit.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `transition` - The transition produced by the workflow engine
///
/// # Errors
///
/// Returns an error if:
/// - The targeted schedule row does not exist (`NotFound`)
/// - A notification message is blank (`Rejected`)
/// - A call-off's schedule row no longer belongs to the expected employee (`Transient`)
/// - The trade request is no longer pending (`NotFound`)
/// - A referenced employee, shift, schedule, or user does not exist (`ForeignKeyViolation`)
/// - The store is busy past its timeout (`Transient`)
/// - Any other write fails
///
/// On error nothing is committed.
#[allow(clippy::too_many_lines)]
pub fn persist_transition(
    conn: &mut _,
    transition: &Transition,
) -> Result<PersistTransitionResult, PersistenceError> {
    for draft in &transition.notifications {
        validate_notification_message(&draft.message).map_err(PersistenceError::Rejected)?;
    }

    conn.atomic(|conn| {
        let created_at: String = current_timestamp()?;

        let change: PersistedChange = match &transition.change {
            StateChange::CreateShift {
                shift_date,
                start_time,
                end_time,
                position,
                assign_to,
            } => {
                diesel::insert_into(shifts::table)
                    .values((
                        shifts::shift_date.eq(shift_date),
                        shifts::start_time.eq(start_time),
                        shifts::end_time.eq(end_time),
                        shifts::position.eq(position),
                    ))
                    .execute(conn)?;
                let shift_id: i64 = conn.get_last_insert_rowid()?;

                let schedule: Option<Schedule> = match assign_to {
                    Some(employee_id) => {
                        diesel::insert_into(schedules::table)
                            .values((
                                schedules::employee_id.eq(Some(*employee_id)),
                                schedules::shift_id.eq(shift_id),
                                schedules::status.eq(ScheduleStatus::Scheduled.as_str()),
                            ))
                            .execute(conn)?;
                        let schedule_id: i64 = conn.get_last_insert_rowid()?;
                        Some(Schedule {
                            id: schedule_id,
                            employee_id: Some(*employee_id),
                            shift_id,
                            status: ScheduleStatus::Scheduled,
                            notes: None,
                        })
                    }
                    None => None,
                };

                info!(shift_id, assigned = schedule.is_some(), "Created shift");

                PersistedChange::Shift {
                    shift: Shift {
                        id: shift_id,
                        shift_date: shift_date.clone(),
                        start_time: start_time.clone(),
                        end_time: end_time.clone(),
                        position: position.clone(),
                    },
                    schedule,
                }
            }
            StateChange::Assign {
                employee_id,
                shift_id,
            } => {
                diesel::insert_into(schedules::table)
                    .values((
                        schedules::employee_id.eq(Some(*employee_id)),
                        schedules::shift_id.eq(*shift_id),
                        schedules::status.eq(ScheduleStatus::Scheduled.as_str()),
                    ))
                    .execute(conn)?;
                let schedule_id: i64 = conn.get_last_insert_rowid()?;

                info!(schedule_id, employee_id, shift_id, "Assigned employee to shift");

                PersistedChange::Schedule(Schedule {
                    id: schedule_id,
                    employee_id: Some(*employee_id),
                    shift_id: *shift_id,
                    status: ScheduleStatus::Scheduled,
                    notes: None,
                })
            }
            StateChange::CallOff {
                schedule_id,
                employee_id,
            } => {
                let rows_affected: usize = diesel::update(schedules::table)
                    .filter(schedules::schedule_id.eq(*schedule_id))
                    .filter(schedules::employee_id.eq(*employee_id))
                    .set(schedules::status.eq(ScheduleStatus::CalledOff.as_str()))
                    .execute(conn)?;
                if rows_affected == 0 {
                    let exists: Option<i64> = schedules::table
                        .filter(schedules::schedule_id.eq(*schedule_id))
                        .select(schedules::schedule_id)
                        .first(conn)
                        .optional()?;
                    return Err(match exists {
                        Some(_) => PersistenceError::Transient(String::from(
                            "Schedule was reassigned before the call-off was stored",
                        )),
                        None => PersistenceError::NotFound(String::from("Schedule not found")),
                    });
                }

                info!(schedule_id, "Called off schedule");

                let row: ScheduleRow = schedules::table
                    .filter(schedules::schedule_id.eq(*schedule_id))
                    .select(ScheduleRow::as_select())
                    .first(conn)?;
                PersistedChange::Schedule(Schedule::try_from(row)?)
            }
            StateChange::SetNotes { schedule_id, notes } => {
                let rows_affected: usize = diesel::update(schedules::table)
                    .filter(schedules::schedule_id.eq(*schedule_id))
                    .set(schedules::notes.eq(Some(notes)))
                    .execute(conn)?;
                if rows_affected == 0 {
                    return Err(PersistenceError::NotFound(String::from(
                        "Schedule not found",
                    )));
                }

                debug!(schedule_id, "Updated schedule notes");

                let row: ScheduleRow = schedules::table
                    .filter(schedules::schedule_id.eq(*schedule_id))
                    .select(ScheduleRow::as_select())
                    .first(conn)?;
                PersistedChange::Schedule(Schedule::try_from(row)?)
            }
            StateChange::OpenTrade {
                requester_id,
                target_employee_id,
                schedule_id,
            } => {
                diesel::insert_into(shift_requests::table)
                    .values((
                        shift_requests::requester_id.eq(*requester_id),
                        shift_requests::target_employee_id.eq(*target_employee_id),
                        shift_requests::schedule_id.eq(*schedule_id),
                        shift_requests::status.eq(RequestStatus::Pending.as_str()),
                        shift_requests::created_at.eq(&created_at),
                    ))
                    .execute(conn)?;
                let request_id: i64 = conn.get_last_insert_rowid()?;

                info!(request_id, requester_id, target_employee_id, schedule_id, "Opened trade request");

                PersistedChange::ShiftRequest(ShiftRequest {
                    id: request_id,
                    requester_id: *requester_id,
                    target_employee_id: *target_employee_id,
                    schedule_id: *schedule_id,
                    status: RequestStatus::Pending,
                    created_at: created_at.clone(),
                })
            }
            StateChange::ResolveTrade {
                request_id,
                schedule_id,
                outcome,
                reassign_to,
            } => {
                // The conditional update is the sole arbiter between racing resolutions
                let rows_affected: usize = diesel::update(shift_requests::table)
                    .filter(shift_requests::request_id.eq(*request_id))
                    .filter(shift_requests::status.eq(RequestStatus::Pending.as_str()))
                    .set(shift_requests::status.eq(outcome.as_str()))
                    .execute(conn)?;
                if rows_affected == 0 {
                    return Err(PersistenceError::NotFound(String::from(
                        "Pending request not found",
                    )));
                }

                if let Some(target_employee_id) = reassign_to {
                    let rows_affected: usize = diesel::update(schedules::table)
                        .filter(schedules::schedule_id.eq(*schedule_id))
                        .set(schedules::employee_id.eq(Some(*target_employee_id)))
                        .execute(conn)?;
                    if rows_affected == 0 {
                        return Err(PersistenceError::NotFound(String::from(
                            "Schedule not found",
                        )));
                    }
                }

                info!(request_id, schedule_id, outcome = outcome.as_str(), "Resolved trade request");

                PersistedChange::TradeResolved {
                    request_id: *request_id,
                    status: *outcome,
                }
            }
            StateChange::UpsertAvailability {
                employee_id,
                day_of_week,
                period,
                available,
            } => {
                conn.upsert_availability(
                    *employee_id,
                    day_of_week.index(),
                    period,
                    flag(*available),
                )?;

                let availability_id: i64 = availability::table
                    .filter(availability::employee_id.eq(*employee_id))
                    .filter(availability::day_of_week.eq(day_of_week.index()))
                    .filter(availability::period.eq(period))
                    .select(availability::availability_id)
                    .first(conn)?;

                debug!(employee_id, day = day_of_week.as_str(), period, available, "Stored availability");

                PersistedChange::Availability(Availability {
                    id: availability_id,
                    employee_id: *employee_id,
                    day_of_week: *day_of_week,
                    period: period.clone(),
                    available: *available,
                })
            }
        };

        let mut notification_ids: Vec<i64> = Vec::with_capacity(transition.notifications.len());
        for draft in &transition.notifications {
            diesel::insert_into(notifications::table)
                .values((
                    notifications::user_id.eq(draft.user_id),
                    notifications::message.eq(&draft.message),
                    notifications::is_read.eq(flag(false)),
                    notifications::created_at.eq(&created_at),
                ))
                .execute(conn)?;
            let notification_id: i64 = conn.get_last_insert_rowid()?;
            debug!(notification_id, user_id = draft.user_id, "Queued notification");
            notification_ids.push(notification_id);
        }

        Ok(PersistTransitionResult {
            change,
            notification_ids,
        })
    })
}
}
