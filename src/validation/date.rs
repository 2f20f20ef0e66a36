use std::{fmt, str::FromStr};

use chrono::NaiveDate;

use super::ValidationError;

/// A calendar date in canonical `yyyy-MM-dd` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Parses `YYYY-M-D` with a four digit year and one or two digit month and
    /// day. The date has to exist in the calendar.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let mut parts = value.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ValidationError::InvalidDate);
        };

        let year = digits(year, 4, 4).ok_or(ValidationError::InvalidDate)?;
        let month = digits(month, 1, 2).ok_or(ValidationError::InvalidDate)?;
        let day = digits(day, 1, 2).ok_or(ValidationError::InvalidDate)?;

        NaiveDate::from_ymd_opt(year as i32, month, day)
            .map(Self)
            .ok_or(ValidationError::InvalidDate)
    }
}

fn digits(part: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if part.len() < min_len || part.len() > max_len {
        return None;
    }
    if !part.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Validates a client supplied date and returns it in canonical form.
pub fn validate_date(value: &str) -> Result<DueDate, ValidationError> {
    DueDate::parse(value)
}

impl FromStr for DueDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
