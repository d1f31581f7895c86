// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rota_domain::{DayOfWeek, RequestStatus, Schedule, ShiftRequest};

/// A schedule row together with the user behind its assigned employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleView {
    /// The schedule row.
    pub schedule: Schedule,
    /// User id of the assigned employee, when one is assigned.
    pub employee_user_id: Option<i64>,
}

/// A trade request together with the user behind its requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestView {
    /// The trade request.
    pub request: ShiftRequest,
    /// User id of the requesting employee.
    pub requester_user_id: i64,
}

/// The slice of stored state a command is evaluated against.
///
/// The caller loads only what the command touches. Commands whose target
/// is missing from the state fail with a not-found error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// The schedule row targeted by the command.
    pub schedule: Option<ScheduleView>,
    /// The active assignment on the shift targeted by an `Assign` command.
    pub active_assignment: Option<Schedule>,
    /// The trade request targeted by the command.
    pub request: Option<RequestView>,
}

impl State {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns this state with the targeted schedule row set.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule, employee_user_id: Option<i64>) -> Self {
        self.schedule = Some(ScheduleView {
            schedule,
            employee_user_id,
        });
        self
    }

    /// Returns this state with the shift's active assignment set.
    #[must_use]
    pub fn with_active_assignment(mut self, schedule: Option<Schedule>) -> Self {
        self.active_assignment = schedule;
        self
    }

    /// Returns this state with the targeted trade request set.
    #[must_use]
    pub fn with_request(mut self, request: ShiftRequest, requester_user_id: i64) -> Self {
        self.request = Some(RequestView {
            request,
            requester_user_id,
        });
        self
    }
}

/// A message that must be appended to a user's inbox alongside a change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    /// Recipient.
    pub user_id: i64,
    /// Message text.
    pub message: String,
}

/// The storage mutation a transition calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Insert a shift and, optionally, its first schedule row.
    CreateShift {
        /// Normalized `YYYY-MM-DD` date.
        shift_date: String,
        /// Normalized `HH:MM:SS` start.
        start_time: String,
        /// Normalized `HH:MM:SS` end.
        end_time: String,
        /// Trimmed position label.
        position: String,
        /// Employee for the paired schedule row.
        assign_to: Option<i64>,
    },
    /// Insert a `scheduled` row binding an employee to a shift.
    Assign {
        /// The employee.
        employee_id: i64,
        /// The shift.
        shift_id: i64,
    },
    /// Mark a schedule row `called_off`.
    ///
    /// Storage must match the row only while `employee_id` still holds it,
    /// so the notification cannot reach a previous holder.
    CallOff {
        /// The schedule row.
        schedule_id: i64,
        /// The employee the notification is addressed to.
        employee_id: i64,
    },
    /// Overwrite the notes on a schedule row.
    SetNotes {
        /// The schedule row.
        schedule_id: i64,
        /// New notes.
        notes: String,
    },
    /// Insert a pending trade request.
    OpenTrade {
        /// Employee giving the shift away.
        requester_id: i64,
        /// Employee taking the shift.
        target_employee_id: i64,
        /// Schedule row being traded.
        schedule_id: i64,
    },
    /// Move a pending trade to a terminal status.
    ///
    /// The status update is conditional on the request still being
    /// pending; storage must abort the whole unit when no row matches.
    ResolveTrade {
        /// The trade request.
        request_id: i64,
        /// The schedule row being traded.
        schedule_id: i64,
        /// `Approved` or `Rejected`.
        outcome: RequestStatus,
        /// New employee for the schedule row, set only on approval.
        reassign_to: Option<i64>,
    },
    /// Insert or overwrite an availability entry.
    UpsertAvailability {
        /// The employee.
        employee_id: i64,
        /// Day of week.
        day_of_week: DayOfWeek,
        /// Trimmed period label.
        period: String,
        /// Whether the employee is available.
        available: bool,
    },
}

/// The result of a successful state transition.
///
/// A transition carries its notifications with it. Storage applies the
/// change and every notification as one atomic unit or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The mutation to apply.
    pub change: StateChange,
    /// Inbox messages that must be written with the mutation.
    pub notifications: Vec<NotificationDraft>,
}

impl Transition {
    /// Creates a transition with no notifications.
    #[must_use]
    pub const fn silent(change: StateChange) -> Self {
        Self {
            change,
            notifications: Vec::new(),
        }
    }

    /// Creates a transition that notifies one user.
    #[must_use]
    pub fn notifying(change: StateChange, user_id: i64, message: &str) -> Self {
        Self {
            change,
            notifications: vec![NotificationDraft {
                user_id,
                message: message.to_string(),
            }],
        }
    }
}
