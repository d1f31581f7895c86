// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar primitives: days of the week and the upcoming-schedule window.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Duration};

/// Number of days, starting today, covered by an employee's upcoming schedule.
pub const UPCOMING_WINDOW_DAYS: i64 = 14;

/// A day of the week in canonical Sunday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All days in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// Returns the canonical index (Sunday = 0 … Saturday = 6).
    #[must_use]
    pub const fn index(&self) -> i32 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    /// Converts a canonical index back into a day.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is outside `0..=6`.
    pub fn from_index(index: i32) -> Result<Self, DomainError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| DomainError::InvalidDayOfWeek(index.to_string()))
    }

    /// Returns the capitalized English name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().to_lowercase() == wanted)
            .ok_or_else(|| DomainError::InvalidDayOfWeek(s.to_string()))
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the half-open date range `[today, today + 14 days)` used for
/// an employee's upcoming schedule.
///
/// # Errors
///
/// Returns an error if the end of the window is not representable.
pub fn upcoming_window(today: Date) -> Result<(Date, Date), DomainError> {
    let end: Date = today
        .checked_add(Duration::days(UPCOMING_WINDOW_DAYS))
        .ok_or_else(|| DomainError::InvalidDate {
            value: today.to_string(),
            error: String::from("upcoming window end is out of range"),
        })?;
    Ok((today, end))
}
