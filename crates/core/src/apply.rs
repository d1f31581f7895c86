// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::policy::StrictnessPolicy;
use crate::state::{RequestView, ScheduleView, State, StateChange, Transition};
use rota_domain::{
    DomainError, RequestStatus, ScheduleStatus, ShiftWindow, validate_period, validate_position,
    validate_shift_window,
};
use tracing::debug;

/// Message sent to an employee whose shift was called off.
pub const CALL_OFF_MESSAGE: &str = "You have been called off for your shift.";

/// Message sent to a requester whose trade was approved.
pub const TRADE_APPROVED_MESSAGE: &str = "Your shift trade request was approved.";

/// Message sent to a requester whose trade was rejected.
pub const TRADE_REJECTED_MESSAGE: &str = "Your shift trade request was rejected.";

/// Applies a command to the current state, producing the transition to persist.
///
/// This function is pure: it performs no I/O and never mutates `state`.
///
/// # Arguments
///
/// * `state` - The stored state the command targets
/// * `command` - The command to apply
/// * `policy` - Optional strictness checks
///
/// # Returns
///
/// * `Ok(Transition)` containing the change and the notifications it produces
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A field fails validation (dates, times, position, period)
/// - The targeted schedule row or pending request is not in `state`
/// - A call-off targets a schedule row with no employee
/// - An enabled strictness check fails
pub fn apply(
    state: &State,
    command: Command,
    policy: StrictnessPolicy,
) -> Result<Transition, CoreError> {
    debug!(command = command.name(), "Applying command");

    match command {
        Command::CreateShift {
            shift_date,
            start_time,
            end_time,
            position,
            employee_id,
        } => {
            let window: ShiftWindow = validate_shift_window(&shift_date, &start_time, &end_time)?;
            let position: String = validate_position(&position)?;

            Ok(Transition::silent(StateChange::CreateShift {
                shift_date: window.date_string(),
                start_time: window.start_string(),
                end_time: window.end_string(),
                position,
                assign_to: employee_id,
            }))
        }
        Command::Assign {
            employee_id,
            shift_id,
        } => {
            if policy.reject_double_booking
                && let Some(existing) = state
                    .active_assignment
                    .as_ref()
                    .filter(|s| s.shift_id == shift_id && s.status == ScheduleStatus::Scheduled)
            {
                return Err(CoreError::DomainViolation(
                    DomainError::ShiftAlreadyAssigned {
                        shift_id,
                        schedule_id: existing.id,
                    },
                ));
            }

            Ok(Transition::silent(StateChange::Assign {
                employee_id,
                shift_id,
            }))
        }
        Command::CallOff { schedule_id } => {
            let view: &ScheduleView = target_schedule(state, schedule_id)?;

            // Rule: a call-off always notifies the affected employee
            let (Some(employee_id), Some(user_id)) =
                (view.schedule.employee_id, view.employee_user_id)
            else {
                return Err(CoreError::DomainViolation(
                    DomainError::ScheduleUnassigned(schedule_id),
                ));
            };

            Ok(Transition::notifying(
                StateChange::CallOff {
                    schedule_id,
                    employee_id,
                },
                user_id,
                CALL_OFF_MESSAGE,
            ))
        }
        Command::SetNotes { schedule_id, notes } => {
            target_schedule(state, schedule_id)?;
            Ok(Transition::silent(StateChange::SetNotes { schedule_id, notes }))
        }
        Command::ProposeTrade {
            requester_id,
            target_employee_id,
            schedule_id,
        } => {
            let view: &ScheduleView = target_schedule(state, schedule_id)?;

            if policy.require_requester_holds_slot
                && view.schedule.employee_id != Some(requester_id)
            {
                return Err(CoreError::DomainViolation(
                    DomainError::RequesterDoesNotHoldSlot {
                        schedule_id,
                        requester_id,
                    },
                ));
            }

            Ok(Transition::silent(StateChange::OpenTrade {
                requester_id,
                target_employee_id,
                schedule_id,
            }))
        }
        Command::ApproveTrade { request_id } => {
            let view: &RequestView = pending_request(state, request_id, RequestStatus::Approved)?;

            Ok(Transition::notifying(
                StateChange::ResolveTrade {
                    request_id,
                    schedule_id: view.request.schedule_id,
                    outcome: RequestStatus::Approved,
                    reassign_to: Some(view.request.target_employee_id),
                },
                view.requester_user_id,
                TRADE_APPROVED_MESSAGE,
            ))
        }
        Command::RejectTrade { request_id } => {
            let view: &RequestView = pending_request(state, request_id, RequestStatus::Rejected)?;

            Ok(Transition::notifying(
                StateChange::ResolveTrade {
                    request_id,
                    schedule_id: view.request.schedule_id,
                    outcome: RequestStatus::Rejected,
                    reassign_to: None,
                },
                view.requester_user_id,
                TRADE_REJECTED_MESSAGE,
            ))
        }
        Command::SetAvailability {
            employee_id,
            day_of_week,
            period,
            available,
        } => {
            let period: String = validate_period(&period)?;

            Ok(Transition::silent(StateChange::UpsertAvailability {
                employee_id,
                day_of_week,
                period,
                available,
            }))
        }
    }
}

fn target_schedule(state: &State, schedule_id: i64) -> Result<&ScheduleView, CoreError> {
    state
        .schedule
        .as_ref()
        .filter(|view| view.schedule.id == schedule_id)
        .ok_or(CoreError::ScheduleNotFound(schedule_id))
}

fn pending_request(
    state: &State,
    request_id: i64,
    outcome: RequestStatus,
) -> Result<&RequestView, CoreError> {
    state
        .request
        .as_ref()
        .filter(|view| view.request.id == request_id)
        .filter(|view| view.request.status.can_transition_to(outcome))
        .ok_or(CoreError::RequestNotPending(request_id))
}
