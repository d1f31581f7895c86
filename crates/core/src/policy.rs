// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Optional workflow checks that are off unless an operator enables them.
///
/// With both flags off, trades may be proposed by any employee for any
/// schedule row and a shift may carry several `scheduled` rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictnessPolicy {
    /// Reject trade proposals from an employee who is not the current
    /// holder of the schedule row.
    pub require_requester_holds_slot: bool,
    /// Reject assignments to a shift that already has a `scheduled` row.
    pub reject_double_booking: bool,
}

impl StrictnessPolicy {
    /// The permissive policy.
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            require_requester_holds_slot: false,
            reject_double_booking: false,
        }
    }

    /// Both checks enabled.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            require_requester_holds_slot: true,
            reject_double_booking: true,
        }
    }
}
