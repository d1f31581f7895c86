// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use time::macros::format_description;
use time::{Date, Time};

/// Maximum length of a position label.
const MAX_POSITION_LEN: usize = 100;

/// Maximum length of an availability period label.
const MAX_PERIOD_LEN: usize = 32;

/// A validated, normalized shift time slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftWindow {
    /// The parsed calendar date.
    pub date: Date,
    /// Parsed start time.
    pub start: Time,
    /// Parsed end time.
    pub end: Time,
}

impl ShiftWindow {
    /// Returns the date in `YYYY-MM-DD` form.
    #[must_use]
    pub fn date_string(&self) -> String {
        format_date(self.date)
    }

    /// Returns the start time in `HH:MM:SS` form.
    #[must_use]
    pub fn start_string(&self) -> String {
        format_time(self.start)
    }

    /// Returns the end time in `HH:MM:SS` form.
    #[must_use]
    pub fn end_string(&self) -> String {
        format_time(self.end)
    }
}

/// Parses a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the input is malformed or not a real date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::InvalidDate {
            value: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses a time of day given as `HH:MM` or `HH:MM:SS`.
///
/// # Errors
///
/// Returns `DomainError::InvalidTime` if neither form matches.
pub fn parse_time(value: &str) -> Result<Time, DomainError> {
    let trimmed: &str = value.trim();
    Time::parse(trimmed, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(trimmed, format_description!("[hour]:[minute]")))
        .map_err(|e| DomainError::InvalidTime {
            value: value.to_string(),
            error: e.to_string(),
        })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Formats a time as `HH:MM:SS`.
#[must_use]
pub fn format_time(time: Time) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}

/// Validates the date and time bounds of a shift.
///
/// # Arguments
///
/// * `date` - The shift date (`YYYY-MM-DD`)
/// * `start` - The start time (`HH:MM` or `HH:MM:SS`)
/// * `end` - The end time (`HH:MM` or `HH:MM:SS`)
///
/// # Errors
///
/// Returns an error if:
/// - The date or either time is malformed
/// - The end time is not strictly after the start time
pub fn validate_shift_window(date: &str, start: &str, end: &str) -> Result<ShiftWindow, DomainError> {
    let date: Date = parse_date(date)?;
    let start: Time = parse_time(start)?;
    let end: Time = parse_time(end)?;

    // Rule: shifts do not cross midnight
    if end <= start {
        return Err(DomainError::InvalidTimeRange {
            start: format_time(start),
            end: format_time(end),
        });
    }

    Ok(ShiftWindow { date, start, end })
}

/// Validates and trims a position label.
///
/// # Errors
///
/// Returns an error if the position is empty or longer than 100 characters.
pub fn validate_position(position: &str) -> Result<String, DomainError> {
    let trimmed: &str = position.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidPosition(String::from(
            "Position cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_POSITION_LEN {
        return Err(DomainError::InvalidPosition(format!(
            "Position must be at most {MAX_POSITION_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validates and trims an availability period label.
///
/// # Errors
///
/// Returns an error if the period is empty or longer than 32 characters.
pub fn validate_period(period: &str) -> Result<String, DomainError> {
    let trimmed: &str = period.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidPeriod(String::from(
            "Period cannot be empty",
        )));
    }
    if trimmed.chars().count() > MAX_PERIOD_LEN {
        return Err(DomainError::InvalidPeriod(format!(
            "Period must be at most {MAX_PERIOD_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalizes and checks an email address.
///
/// Emails are lowercased so that lookups are case-insensitive.
///
/// # Errors
///
/// Returns an error if the address is empty or lacks a local part and domain.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let normalized: String = email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }
    match normalized.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(normalized)
        }
        _ => Err(DomainError::InvalidEmail(format!(
            "'{email}' is not a valid email address"
        ))),
    }
}

/// Checks that a notification carries a message.
///
/// # Errors
///
/// Returns an error if the message is blank.
pub fn validate_notification_message(message: &str) -> Result<(), DomainError> {
    if message.trim().is_empty() {
        return Err(DomainError::EmptyNotificationMessage);
    }
    Ok(())
}
