// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod backend_validation_tests;
mod initialization_tests;
mod notification_tests;
mod availability_tests;

use rota::{StateChange, Transition};
use rota_domain::{Employee, Role, Schedule, Shift, User};

use crate::{PersistedChange, Persistence};

pub const TEST_PASSWORD: &str = "correct-horse-battery";

pub fn seed_manager(persistence: &mut Persistence) -> User {
    let (user, employee) = persistence
        .create_user("boss@example.com", TEST_PASSWORD, Role::Manager)
        .expect("manager should be created");
    assert!(employee.is_none());
    user
}

pub fn seed_employee(persistence: &mut Persistence, email: &str) -> (User, Employee) {
    let (user, employee) = persistence
        .create_user(email, TEST_PASSWORD, Role::Employee)
        .expect("employee should be created");
    (user, employee.expect("employees get a profile"))
}

pub fn create_shift_change(shift_date: &str, assign_to: Option<i64>) -> StateChange {
    StateChange::CreateShift {
        shift_date: shift_date.to_string(),
        start_time: String::from("09:00:00"),
        end_time: String::from("17:00:00"),
        position: String::from("Server"),
        assign_to,
    }
}

/// Creates a shift assigned to `employee_id` and returns both rows.
pub fn seed_assigned_shift(
    persistence: &mut Persistence,
    shift_date: &str,
    employee_id: i64,
) -> (Shift, Schedule) {
    let result = persistence
        .persist_transition(&Transition::silent(create_shift_change(
            shift_date,
            Some(employee_id),
        )))
        .expect("shift should be created");
    match result.change {
        PersistedChange::Shift {
            shift,
            schedule: Some(schedule),
        } => (shift, schedule),
        other => panic!("unexpected change: {other:?}"),
    }
}

/// Opens a pending trade and returns its request ID.
pub fn seed_trade(
    persistence: &mut Persistence,
    requester_id: i64,
    target_employee_id: i64,
    schedule_id: i64,
) -> i64 {
    let result = persistence
        .persist_transition(&Transition::silent(StateChange::OpenTrade {
            requester_id,
            target_employee_id,
            schedule_id,
        }))
        .expect("trade should be opened");
    match result.change {
        PersistedChange::ShiftRequest(request) => request.id,
        other => panic!("unexpected change: {other:?}"),
    }
}
