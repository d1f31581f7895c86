// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.
//!
//! Every other test module exercises migrations and foreign key enforcement
//! implicitly through `Persistence::new_in_memory()`; these cover the
//! constructors themselves.

use tempfile::TempDir;

use super::seed_employee;
use crate::{DEFAULT_BUSY_TIMEOUT_MS, Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_active() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    seed_employee(&mut db1, "alice@example.com");

    assert_eq!(db1.list_employees().unwrap().len(), 1);
    assert!(db2.list_employees().unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rota.db");

    {
        let mut persistence = Persistence::new_with_file(&path, DEFAULT_BUSY_TIMEOUT_MS).unwrap();
        seed_employee(&mut persistence, "alice@example.com");
    }

    let mut reopened = Persistence::new_with_file(&path, DEFAULT_BUSY_TIMEOUT_MS).unwrap();
    let employees = reopened.list_employees().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name, "alice@example.com");
}
