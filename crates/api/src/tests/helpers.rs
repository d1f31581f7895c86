// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rota::StrictnessPolicy;
use rota_domain::{Role, Schedule, Shift, User};
use rota_persistence::Persistence;
use time::{Date, Month};

use crate::{
    CreateShiftRequest, CreateShiftResponse, Identity, RegisterRequest, create_manager,
    create_shift, register, resolve_employee,
};

pub const TEST_PASSWORD: &str = "Password123";

pub fn setup_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// Creates the manager account and returns its identity.
pub fn create_test_manager(persistence: &mut Persistence) -> Identity {
    let user: User = create_manager(persistence, "boss@example.com", TEST_PASSWORD)
        .expect("Failed to create manager");
    Identity::new(user.id, Role::Manager)
}

/// Registers an employee and returns their identity and employee ID.
pub fn create_test_employee(persistence: &mut Persistence, email: &str) -> (Identity, i64) {
    let response = register(
        persistence,
        &RegisterRequest {
            email: email.to_string(),
            password: String::from(TEST_PASSWORD),
        },
    )
    .expect("Failed to register employee");
    let employee_id: i64 = resolve_employee(persistence, response.user.id)
        .expect("Employee profile missing")
        .id;
    (Identity::new(response.user.id, Role::Employee), employee_id)
}

pub fn shift_request(shift_date: &str, employee_id: Option<i64>) -> CreateShiftRequest {
    CreateShiftRequest {
        shift_date: shift_date.to_string(),
        start_time: String::from("09:00"),
        end_time: String::from("17:00"),
        position: String::from("Server"),
        employee_id,
    }
}

/// Creates a shift on `shift_date` assigned to `employee_id`.
pub fn create_assigned_shift(
    persistence: &mut Persistence,
    manager: &Identity,
    shift_date: &str,
    employee_id: i64,
) -> (Shift, Schedule) {
    let response: CreateShiftResponse = create_shift(
        persistence,
        manager,
        &shift_request(shift_date, Some(employee_id)),
        StrictnessPolicy::default(),
    )
    .expect("Failed to create shift");
    (
        response.shift,
        response.schedule.expect("Schedule row missing"),
    )
}

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}
