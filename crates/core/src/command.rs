// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::DayOfWeek;

/// A command represents caller intent as data only.
///
/// Commands are the only way to request a workflow state change. Role
/// gating happens before a command is built; the engine only enforces
/// workflow rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a shift, optionally assigning an employee to it at once.
    CreateShift {
        /// Calendar date (`YYYY-MM-DD`).
        shift_date: String,
        /// Start time (`HH:MM` or `HH:MM:SS`).
        start_time: String,
        /// End time (`HH:MM` or `HH:MM:SS`).
        end_time: String,
        /// Position the shift is staffed for.
        position: String,
        /// Employee to schedule on the new shift.
        employee_id: Option<i64>,
    },
    /// Assign an employee to an existing shift.
    Assign {
        /// The employee.
        employee_id: i64,
        /// The shift.
        shift_id: i64,
    },
    /// Remove the assigned employee from a schedule row.
    CallOff {
        /// The schedule row.
        schedule_id: i64,
    },
    /// Replace the notes on a schedule row.
    SetNotes {
        /// The schedule row.
        schedule_id: i64,
        /// New free-text notes.
        notes: String,
    },
    /// Propose handing a schedule row to another employee.
    ProposeTrade {
        /// Employee giving the shift away.
        requester_id: i64,
        /// Employee taking the shift.
        target_employee_id: i64,
        /// Schedule row being traded.
        schedule_id: i64,
    },
    /// Approve a pending trade.
    ApproveTrade {
        /// The trade request.
        request_id: i64,
    },
    /// Reject a pending trade.
    RejectTrade {
        /// The trade request.
        request_id: i64,
    },
    /// Record whether an employee can work a day and period.
    SetAvailability {
        /// The employee.
        employee_id: i64,
        /// Day of week.
        day_of_week: DayOfWeek,
        /// Period label (e.g. "AM").
        period: String,
        /// Whether the employee is available.
        available: bool,
    },
}

impl Command {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateShift { .. } => "CreateShift",
            Self::Assign { .. } => "Assign",
            Self::CallOff { .. } => "CallOff",
            Self::SetNotes { .. } => "SetNotes",
            Self::ProposeTrade { .. } => "ProposeTrade",
            Self::ApproveTrade { .. } => "ApproveTrade",
            Self::RejectTrade { .. } => "RejectTrade",
            Self::SetAvailability { .. } => "SetAvailability",
        }
    }
}
