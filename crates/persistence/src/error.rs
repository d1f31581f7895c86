// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Caller-facing text for a unique constraint hit with no curated message.
///
/// The backend's own text names tables and columns, so it is only logged.
pub const DUPLICATE_RECORD_MESSAGE: &str = "Record already exists";

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found, or was not in the required state.
    NotFound(String),
    /// A write referenced a row that does not exist.
    ForeignKeyViolation(String),
    /// A write collided with a unique constraint.
    UniqueViolation(String),
    /// The store was busy, locked, or unreachable. The caller may retry.
    Transient(String),
    /// A stored value could not be converted into a domain value.
    CorruptRow(String),
    /// A value was refused before anything was written.
    Rejected(rota_domain::DomainError),
    /// A general error occurred.
    Other(String),
}

impl PersistenceError {
    /// Returns whether retrying the same operation may succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::ForeignKeyViolation(msg) => write!(f, "Foreign key violation: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violation: {msg}"),
            Self::Transient(msg) => write!(f, "Storage temporarily unavailable: {msg}"),
            Self::CorruptRow(msg) => write!(f, "Corrupt row: {msg}"),
            Self::Rejected(err) => write!(f, "Rejected: {err}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(kind, info) => {
                let message: String = info.message().to_string();
                match kind {
                    DatabaseErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(message),
                    DatabaseErrorKind::UniqueViolation => {
                        tracing::debug!(detail = %message, "Unique constraint rejected write");
                        Self::UniqueViolation(String::from(DUPLICATE_RECORD_MESSAGE))
                    }
                    DatabaseErrorKind::SerializationFailure
                    | DatabaseErrorKind::ClosedConnection
                    | DatabaseErrorKind::UnableToSendCommand => Self::Transient(message),
                    _ if is_lock_contention(&message) => Self::Transient(message),
                    _ => Self::DatabaseError(message),
                }
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<rota_domain::DomainError> for PersistenceError {
    fn from(err: rota_domain::DomainError) -> Self {
        Self::CorruptRow(err.to_string())
    }
}

/// `SQLite` reports busy and locked databases, and `MySQL` lock wait
/// timeouts and deadlocks, as unclassified errors.
fn is_lock_contention(message: &str) -> bool {
    let lowered: String = message.to_lowercase();
    lowered.contains("database is locked")
        || lowered.contains("database is busy")
        || lowered.contains("lock wait timeout")
        || lowered.contains("deadlock")
}
