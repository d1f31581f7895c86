// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces password requirements at registration.

use thiserror::Error;

/// Longest password bcrypt hashes without truncation.
const BCRYPT_MAX_BYTES: usize = 72;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password would be truncated by the hash function.
    #[error("Password must be at most {max_bytes} bytes long")]
    TooLong { max_bytes: usize },

    /// Password does not meet complexity requirements.
    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password matches a forbidden value.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },
}

/// Password policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_complexity: 2,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `email` - The account email (password must not match it or its local part)
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet policy requirements.
    pub fn validate(&self, password: &str, email: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        if password.len() > BCRYPT_MAX_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max_bytes: BCRYPT_MAX_BYTES,
            });
        }

        let complexity: usize = Self::calculate_complexity(password);
        if complexity < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found: complexity,
            });
        }

        // Case-insensitive
        let password_lower: String = password.to_lowercase();
        let email_lower: String = email.trim().to_lowercase();

        if password_lower == email_lower {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email"),
            });
        }

        if let Some((local, _)) = email_lower.split_once('@')
            && password_lower == local
        {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("email name"),
            });
        }

        Ok(())
    }

    /// Counts the character classes present in a password.
    ///
    /// Classes are uppercase letters, lowercase letters, digits, and symbols.
    fn calculate_complexity(password: &str) -> usize {
        let has_uppercase: bool = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lowercase: bool = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit: bool = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol: bool = password
            .chars()
            .any(|c| c.is_ascii_punctuation() || (!c.is_ascii() && !c.is_alphanumeric()));

        [has_uppercase, has_lowercase, has_digit, has_symbol]
            .into_iter()
            .filter(|present| *present)
            .count()
    }
}
