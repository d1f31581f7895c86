// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    EMPLOYEE_ONE, EMPLOYEE_TWO, create_test_schedule, state_with_assigned_schedule,
};
use crate::{Command, CoreError, State, StateChange, StrictnessPolicy, Transition, apply};
use rota_domain::{DomainError, ScheduleStatus};

fn propose_as(requester_id: i64) -> Command {
    Command::ProposeTrade {
        requester_id,
        target_employee_id: 3,
        schedule_id: 7,
    }
}

#[test]
fn test_default_policy_is_lenient() {
    assert_eq!(StrictnessPolicy::default(), StrictnessPolicy::lenient());
}

#[test]
fn test_lenient_policy_allows_non_holder_proposal() {
    let transition: Transition = apply(
        &state_with_assigned_schedule(7),
        propose_as(EMPLOYEE_TWO),
        StrictnessPolicy::lenient(),
    )
    .unwrap();

    assert_eq!(
        transition.change,
        StateChange::OpenTrade {
            requester_id: EMPLOYEE_TWO,
            target_employee_id: 3,
            schedule_id: 7,
        }
    );
}

#[test]
fn test_strict_policy_rejects_non_holder_proposal() {
    let result: Result<Transition, CoreError> = apply(
        &state_with_assigned_schedule(7),
        propose_as(EMPLOYEE_TWO),
        StrictnessPolicy::strict(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::RequesterDoesNotHoldSlot {
                schedule_id: 7,
                requester_id: EMPLOYEE_TWO,
            }
        ))
    );
}

#[test]
fn test_strict_policy_allows_holder_proposal() {
    let result: Result<Transition, CoreError> = apply(
        &state_with_assigned_schedule(7),
        propose_as(EMPLOYEE_ONE),
        StrictnessPolicy::strict(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_proposal_for_unknown_schedule_fails() {
    let result: Result<Transition, CoreError> =
        apply(&State::new(), propose_as(EMPLOYEE_ONE), StrictnessPolicy::lenient());

    assert_eq!(result, Err(CoreError::ScheduleNotFound(7)));
}

#[test]
fn test_lenient_policy_allows_double_booking() {
    let state: State =
        State::new().with_active_assignment(Some(create_test_schedule(7, Some(EMPLOYEE_ONE))));

    let result: Result<Transition, CoreError> = apply(
        &state,
        Command::Assign {
            employee_id: EMPLOYEE_TWO,
            shift_id: 100,
        },
        StrictnessPolicy::lenient(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_strict_policy_rejects_double_booking() {
    let state: State =
        State::new().with_active_assignment(Some(create_test_schedule(7, Some(EMPLOYEE_ONE))));

    let result: Result<Transition, CoreError> = apply(
        &state,
        Command::Assign {
            employee_id: EMPLOYEE_TWO,
            shift_id: 100,
        },
        StrictnessPolicy::strict(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ShiftAlreadyAssigned {
            shift_id: 100,
            schedule_id: 7,
        }))
    );
}

#[test]
fn test_strict_policy_ignores_called_off_assignment() {
    let mut schedule = create_test_schedule(7, Some(EMPLOYEE_ONE));
    schedule.status = ScheduleStatus::CalledOff;
    let state: State = State::new().with_active_assignment(Some(schedule));

    let result: Result<Transition, CoreError> = apply(
        &state,
        Command::Assign {
            employee_id: EMPLOYEE_TWO,
            shift_id: 100,
        },
        StrictnessPolicy::strict(),
    );

    assert!(result.is_ok());
}
