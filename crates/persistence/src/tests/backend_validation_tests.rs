// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly
//! across different database backends (`SQLite`, MariaDB/MySQL).
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `ROTA_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! Schema creation, constraint enforcement (FK, UNIQUE, CHECK), and the
//! atomic-unit semantics `persist_transition` relies on. Business rules are
//! covered by the standard suite running against `SQLite`.
//!
//! All tests share one database, so every row they create uses a unique
//! email suffix.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use rota::{StateChange, Transition};
use rota_domain::{RequestStatus, Role};

use super::{TEST_PASSWORD, create_shift_change};
use crate::backend::{DEFAULT_BUSY_TIMEOUT_MS, mysql};
use crate::{PersistedChange, Persistence, PersistenceError};

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `ROTA_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("ROTA_TEST_BACKEND").expect(
        "ROTA_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "ROTA_TEST_BACKEND must be 'mariadb'");
}

fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}@example.com")
}

fn open() -> Persistence {
    verify_mariadb_test_environment();
    Persistence::new_with_mysql(&get_mariadb_url(), DEFAULT_BUSY_TIMEOUT_MS)
        .expect("Failed to initialize MariaDB database")
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_apply_cleanly() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = mysql::initialize_database(&url, DEFAULT_BUSY_TIMEOUT_MS);
    assert!(
        result.is_ok(),
        "Failed to initialize MariaDB and run migrations: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_foreign_key_enforcement() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let mut conn = mysql::initialize_database(&url, DEFAULT_BUSY_TIMEOUT_MS)
        .expect("Failed to initialize MariaDB database");

    assert!(mysql::verify_foreign_key_enforcement(&mut conn).is_ok());

    let orphan = diesel::sql_query(
        "INSERT INTO schedules (employee_id, shift_id, status) VALUES (NULL, 999999999, 'scheduled')",
    )
    .execute(&mut conn);
    assert!(
        orphan.is_err(),
        "Schedule for a missing shift should fail due to foreign key constraint"
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_email_unique_constraint() {
    let mut persistence = open();
    let email = unique_email("dup");

    persistence
        .create_user(&email, TEST_PASSWORD, Role::Employee)
        .expect("first registration should succeed");
    let result = persistence.create_user(&email, TEST_PASSWORD, Role::Employee);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_failed_assignment_rolls_back_shift() {
    let mut persistence = open();
    let before = persistence.list_shifts().unwrap().len();

    let result = persistence.persist_transition(&Transition::silent(create_shift_change(
        "2031-01-01",
        Some(999_999_999),
    )));

    assert!(matches!(
        result,
        Err(PersistenceError::ForeignKeyViolation(_))
    ));
    assert_eq!(persistence.list_shifts().unwrap().len(), before);
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_trade_resolves_once() {
    let mut persistence = open();
    let (alice_user, alice) = persistence
        .create_user(&unique_email("alice"), TEST_PASSWORD, Role::Employee)
        .unwrap();
    let alice = alice.unwrap();
    let (_, bob) = persistence
        .create_user(&unique_email("bob"), TEST_PASSWORD, Role::Employee)
        .unwrap();
    let bob = bob.unwrap();

    let created = persistence
        .persist_transition(&Transition::silent(create_shift_change(
            "2031-01-02",
            Some(alice.id),
        )))
        .unwrap();
    let PersistedChange::Shift {
        schedule: Some(schedule),
        ..
    } = created.change
    else {
        panic!("expected an assigned shift");
    };

    let opened = persistence
        .persist_transition(&Transition::silent(StateChange::OpenTrade {
            requester_id: alice.id,
            target_employee_id: bob.id,
            schedule_id: schedule.id,
        }))
        .unwrap();
    let PersistedChange::ShiftRequest(request) = opened.change else {
        panic!("expected a request");
    };

    let approve = Transition::notifying(
        StateChange::ResolveTrade {
            request_id: request.id,
            schedule_id: schedule.id,
            outcome: RequestStatus::Approved,
            reassign_to: Some(bob.id),
        },
        alice_user.id,
        "approved",
    );

    assert!(persistence.persist_transition(&approve).is_ok());
    assert!(matches!(
        persistence.persist_transition(&approve),
        Err(PersistenceError::NotFound(_))
    ));
    assert_eq!(
        persistence
            .list_notifications_for_user(alice_user.id)
            .unwrap()
            .len(),
        1
    );
    assert_eq!(
        persistence.get_schedule(schedule.id).unwrap().unwrap().employee_id,
        Some(bob.id)
    );
}
