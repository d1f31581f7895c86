// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the availability register.

use rota::{StateChange, Transition};
use rota_domain::DayOfWeek;

use super::seed_employee;
use crate::{PersistedChange, Persistence};

fn upsert(employee_id: i64, day_of_week: DayOfWeek, period: &str, available: bool) -> Transition {
    Transition::silent(StateChange::UpsertAvailability {
        employee_id,
        day_of_week,
        period: period.to_string(),
        available,
    })
}

#[test]
fn test_upsert_keeps_one_row_with_latest_value() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, alice) = seed_employee(&mut persistence, "alice@example.com");

    let first = persistence
        .persist_transition(&upsert(alice.id, DayOfWeek::Monday, "AM", true))
        .unwrap();
    let second = persistence
        .persist_transition(&upsert(alice.id, DayOfWeek::Monday, "AM", false))
        .unwrap();

    let (PersistedChange::Availability(first), PersistedChange::Availability(second)) =
        (first.change, second.change)
    else {
        panic!("expected availability");
    };
    assert_eq!(first.id, second.id);
    assert!(!second.available);

    let all = persistence.list_all_availability().unwrap();
    assert_eq!(all.len(), 1);
    assert!(!all[0].available);
    assert_eq!(
        persistence
            .get_availability(alice.id, DayOfWeek::Monday, "AM")
            .unwrap(),
        Some(second)
    );
}

#[test]
fn test_list_all_orders_by_employee_day_then_period() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, alice) = seed_employee(&mut persistence, "alice@example.com");
    let (_, bob) = seed_employee(&mut persistence, "bob@example.com");

    for transition in [
        upsert(bob.id, DayOfWeek::Sunday, "AM", true),
        upsert(alice.id, DayOfWeek::Tuesday, "AM", true),
        upsert(alice.id, DayOfWeek::Monday, "PM", false),
        upsert(alice.id, DayOfWeek::Monday, "AM", true),
        upsert(alice.id, DayOfWeek::Sunday, "PM", true),
    ] {
        persistence.persist_transition(&transition).unwrap();
    }

    let all = persistence.list_all_availability().unwrap();
    let keys: Vec<(i64, DayOfWeek, &str)> = all
        .iter()
        .map(|e| (e.employee_id, e.day_of_week, e.period.as_str()))
        .collect();

    assert_eq!(
        keys,
        vec![
            (alice.id, DayOfWeek::Sunday, "PM"),
            (alice.id, DayOfWeek::Monday, "AM"),
            (alice.id, DayOfWeek::Monday, "PM"),
            (alice.id, DayOfWeek::Tuesday, "AM"),
            (bob.id, DayOfWeek::Sunday, "AM"),
        ]
    );
    assert_eq!(all[0].employee_name, "alice@example.com");
    assert_eq!(all[4].employee_name, "bob@example.com");
}

#[test]
fn test_missing_entry_reads_as_none() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, alice) = seed_employee(&mut persistence, "alice@example.com");

    assert!(
        persistence
            .get_availability(alice.id, DayOfWeek::Friday, "PM")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_upsert_touches_only_its_own_slot() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let (_, alice) = seed_employee(&mut persistence, "alice@example.com");
    let (_, bob) = seed_employee(&mut persistence, "bob@example.com");

    for transition in [
        upsert(alice.id, DayOfWeek::Monday, "AM", true),
        upsert(alice.id, DayOfWeek::Monday, "PM", true),
        upsert(bob.id, DayOfWeek::Monday, "AM", true),
        upsert(alice.id, DayOfWeek::Monday, "AM", false),
    ] {
        persistence.persist_transition(&transition).unwrap();
    }

    let monday = |persistence: &mut Persistence, employee_id: i64, period: &str| {
        persistence
            .get_availability(employee_id, DayOfWeek::Monday, period)
            .unwrap()
            .unwrap()
            .available
    };
    assert!(!monday(&mut persistence, alice.id, "AM"));
    assert!(monday(&mut persistence, alice.id, "PM"));
    assert!(monday(&mut persistence, bob.id, "AM"));
    assert_eq!(persistence.list_all_availability().unwrap().len(), 3);
}
