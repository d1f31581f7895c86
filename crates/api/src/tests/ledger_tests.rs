// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shift catalog and schedule ledger handler tests.

use rota::{CALL_OFF_MESSAGE, StrictnessPolicy};
use rota_domain::ScheduleStatus;
use time::Month;

use crate::{
    ApiError, AssignRequest, CreateShiftRequest, SetNotesRequest, assign, call_off, create_shift,
    list_shifts, my_schedule, set_notes,
};

use super::helpers::{
    create_assigned_shift, create_test_employee, create_test_manager, date, setup_test_persistence,
    shift_request,
};

#[test]
fn test_create_shift_normalizes_times() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);

    let response = create_shift(
        &mut persistence,
        &boss,
        &shift_request("2024-06-01", None),
        StrictnessPolicy::default(),
    )
    .unwrap();

    assert_eq!(response.message, "Shift created");
    assert_eq!(response.shift.shift_date, "2024-06-01");
    assert_eq!(response.shift.start_time, "09:00:00");
    assert_eq!(response.shift.end_time, "17:00:00");
    assert_eq!(response.schedule, None);

    let listing = list_shifts(&mut persistence).unwrap();
    assert_eq!(listing.shifts.len(), 1);
    assert_eq!(listing.shifts[0].assigned_employee_id, None);
}

#[test]
fn test_create_shift_with_assignment_pairs_schedule_row() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (_, alice_id) = create_test_employee(&mut persistence, "alice@example.com");

    let (shift, schedule) = create_assigned_shift(&mut persistence, &boss, "2024-06-01", alice_id);

    assert_eq!(schedule.shift_id, shift.id);
    assert_eq!(schedule.employee_id, Some(alice_id));
    assert_eq!(schedule.status, ScheduleStatus::Scheduled);

    let listing = list_shifts(&mut persistence).unwrap();
    assert_eq!(listing.shifts[0].assigned_employee_id, Some(alice_id));
}

#[test]
fn test_create_shift_rejects_inverted_times() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);

    let result = create_shift(
        &mut persistence,
        &boss,
        &CreateShiftRequest {
            shift_date: String::from("2024-06-01"),
            start_time: String::from("17:00"),
            end_time: String::from("09:00"),
            position: String::from("Server"),
            employee_id: None,
        },
        StrictnessPolicy::default(),
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "end_time"),
        other => panic!("Expected InvalidInput, got {other:?}"),
    }
    assert!(persistence.list_shifts().unwrap().is_empty());
}

#[test]
fn test_create_shift_for_unknown_employee_inserts_nothing() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);

    let result = create_shift(
        &mut persistence,
        &boss,
        &shift_request("2024-06-01", Some(42)),
        StrictnessPolicy::default(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert!(persistence.list_shifts().unwrap().is_empty());
}

#[test]
fn test_assign_allows_double_booking_by_default() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (_, alice_id) = create_test_employee(&mut persistence, "alice@example.com");
    let (_, bob_id) = create_test_employee(&mut persistence, "bob@example.com");
    let (shift, _) = create_assigned_shift(&mut persistence, &boss, "2024-06-01", alice_id);

    let response = assign(
        &mut persistence,
        &boss,
        &AssignRequest {
            employee_id: bob_id,
            shift_id: shift.id,
        },
        StrictnessPolicy::default(),
    )
    .unwrap();

    assert_eq!(response.message, "Employee assigned to shift");
    assert_eq!(response.schedule.employee_id, Some(bob_id));
}

#[test]
fn test_assign_rejects_double_booking_when_strict() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (_, alice_id) = create_test_employee(&mut persistence, "alice@example.com");
    let (_, bob_id) = create_test_employee(&mut persistence, "bob@example.com");
    let (shift, _) = create_assigned_shift(&mut persistence, &boss, "2024-06-01", alice_id);

    let result = assign(
        &mut persistence,
        &boss,
        &AssignRequest {
            employee_id: bob_id,
            shift_id: shift.id,
        },
        StrictnessPolicy::strict(),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "single_active_assignment");
        }
        other => panic!("Expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_assign_to_missing_shift_is_not_found() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (_, alice_id) = create_test_employee(&mut persistence, "alice@example.com");

    let result = assign(
        &mut persistence,
        &boss,
        &AssignRequest {
            employee_id: alice_id,
            shift_id: 77,
        },
        StrictnessPolicy::default(),
    );

    match result {
        Err(ApiError::ResourceNotFound { message, .. }) => assert_eq!(message, "Shift not found"),
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_each_call_off_notifies_again() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (alice, alice_id) = create_test_employee(&mut persistence, "alice@example.com");
    let (_, schedule) = create_assigned_shift(&mut persistence, &boss, "2024-06-01", alice_id);

    for _ in 0..3 {
        let response = call_off(
            &mut persistence,
            &boss,
            schedule.id,
            StrictnessPolicy::default(),
        )
        .unwrap();
        assert_eq!(response.message, "Employee called off and notified");
    }

    let stored = persistence.get_schedule(schedule.id).unwrap().unwrap();
    assert_eq!(stored.status, ScheduleStatus::CalledOff);

    let inbox = persistence
        .list_notifications_for_user(alice.user_id)
        .unwrap();
    assert_eq!(inbox.len(), 3);
    assert!(inbox.iter().all(|n| n.message == CALL_OFF_MESSAGE));
}

#[test]
fn test_call_off_missing_schedule_is_not_found() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);

    let result = call_off(&mut persistence, &boss, 404, StrictnessPolicy::default());

    match result {
        Err(ApiError::ResourceNotFound { message, .. }) => {
            assert_eq!(message, "Schedule not found");
        }
        other => panic!("Expected ResourceNotFound, got {other:?}"),
    }
}

#[test]
fn test_set_notes_overwrites() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (_, alice_id) = create_test_employee(&mut persistence, "alice@example.com");
    let (_, schedule) = create_assigned_shift(&mut persistence, &boss, "2024-06-01", alice_id);

    set_notes(
        &mut persistence,
        &boss,
        schedule.id,
        &SetNotesRequest {
            notes: String::from("Bring keys"),
        },
        StrictnessPolicy::default(),
    )
    .unwrap();
    let response = set_notes(
        &mut persistence,
        &boss,
        schedule.id,
        &SetNotesRequest {
            notes: String::from("Open at 8"),
        },
        StrictnessPolicy::default(),
    )
    .unwrap();

    assert_eq!(response.schedule.notes.as_deref(), Some("Open at 8"));
}

#[test]
fn test_my_schedule_covers_fourteen_days_in_order() {
    let mut persistence = setup_test_persistence();
    let boss = create_test_manager(&mut persistence);
    let (alice, alice_id) = create_test_employee(&mut persistence, "alice@example.com");
    create_assigned_shift(&mut persistence, &boss, "2024-06-05", alice_id);
    create_assigned_shift(&mut persistence, &boss, "2024-06-01", alice_id);
    create_assigned_shift(&mut persistence, &boss, "2024-05-29", alice_id);
    create_assigned_shift(&mut persistence, &boss, "2024-06-13", alice_id);

    let response = my_schedule(&mut persistence, &alice, date(2024, Month::May, 30)).unwrap();

    let dates: Vec<&str> = response
        .schedule
        .iter()
        .map(|s| s.shift_date.as_str())
        .collect();
    assert_eq!(dates, vec!["2024-06-01", "2024-06-05"]);
}
