// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use rota_domain::{RequestStatus, Schedule, ScheduleStatus, ShiftRequest};

pub const EMPLOYEE_ONE: i64 = 1;
pub const EMPLOYEE_ONE_USER: i64 = 11;
pub const EMPLOYEE_TWO: i64 = 2;

pub fn create_test_schedule(id: i64, employee_id: Option<i64>) -> Schedule {
    Schedule {
        id,
        employee_id,
        shift_id: 100,
        status: ScheduleStatus::Scheduled,
        notes: None,
    }
}

pub fn create_test_request(id: i64, status: RequestStatus) -> ShiftRequest {
    ShiftRequest {
        id,
        requester_id: EMPLOYEE_ONE,
        target_employee_id: EMPLOYEE_TWO,
        schedule_id: 7,
        status,
        created_at: String::from("2024-05-30 12:00:00"),
    }
}

pub fn state_with_assigned_schedule(schedule_id: i64) -> State {
    State::new().with_schedule(
        create_test_schedule(schedule_id, Some(EMPLOYEE_ONE)),
        Some(EMPLOYEE_ONE_USER),
    )
}

pub fn state_with_request(request_id: i64, status: RequestStatus) -> State {
    State::new().with_request(create_test_request(request_id, status), EMPLOYEE_ONE_USER)
}
