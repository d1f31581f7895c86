// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates backend-specific initialization, migration,
//! and helper functions that cannot be expressed in backend-agnostic
//! Diesel DSL.
//!
//! ## Backend Support
//!
//! - `sqlite` — `SQLite` backend (default for development and testing)
//! - `mysql` — MySQL/MariaDB backend (validated via opt-in tests)
//!
//! ## Backend-Agnostic Code
//!
//! Backend-specific code is limited to:
//!
//! - Connection initialization
//! - Migration execution
//! - Backend-specific configuration (PRAGMA, session variables)
//! - Opening an atomic unit of work
//! - Backend-specific workarounds for missing Diesel DSL features
//!
//! All domain queries and mutations live in `queries/` and `mutations/`
//! modules and must work across all supported backends.

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Default bound on how long a statement waits for a competing writer.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Trait for backend-specific operations.
///
/// This trait provides a unified interface for operations that cannot be
/// expressed in backend-agnostic Diesel DSL, such as retrieving the last
/// inserted row ID, verifying foreign key enforcement, or opening a
/// write transaction.
pub trait PersistenceBackend: Connection {
    /// Retrieves the last inserted row ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Inserts or overwrites the availability entry keyed on
    /// `(employee_id, day_of_week, period)` in a single statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails.
    fn upsert_availability(
        &mut self,
        employee_id: i64,
        day_of_week: i32,
        period: &str,
        is_available: i32,
    ) -> Result<(), PersistenceError>;

    /// Runs `work` as one atomic unit.
    ///
    /// Every statement inside `work` commits together or not at all. On
    /// `SQLite` the write lock is taken up front so that two writers can
    /// never both read a row and then race to update it.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a storage error if the
    /// unit cannot be opened or committed. Either way nothing is committed.
    fn atomic<T, F>(&mut self, work: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn upsert_availability(
        &mut self,
        employee_id: i64,
        day_of_week: i32,
        period: &str,
        is_available: i32,
    ) -> Result<(), PersistenceError> {
        sqlite::upsert_availability(self, employee_id, day_of_week, period, is_available)
    }

    fn atomic<T, F>(&mut self, work: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>,
    {
        self.immediate_transaction(work)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn upsert_availability(
        &mut self,
        employee_id: i64,
        day_of_week: i32,
        period: &str,
        is_available: i32,
    ) -> Result<(), PersistenceError> {
        mysql::upsert_availability(self, employee_id, day_of_week, period, is_available)
    }

    fn atomic<T, F>(&mut self, work: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut Self) -> Result<T, PersistenceError>,
    {
        self.transaction(work)
    }
}
