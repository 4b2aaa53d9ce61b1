//! Five-field cron schedule validation.
//!
//! Each field accepts `*`, a step `*/n` with `n > 0`, a range `a-b`, a list
//! `a,b,c`, or a bare integer, all within the field's bounds.

use std::fmt;

/// One position in a cron schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CronField {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl CronField {
    /// Fields in schedule order.
    pub const ALL: [CronField; 5] = [
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
    ];

    /// Inclusive bounds. Day-of-week allows 7 as an alias for Sunday.
    pub fn bounds(&self) -> (i64, i64) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day",
            Self::Month => "month",
            Self::DayOfWeek => "day of week",
        }
    }

    /// Check one field expression against this position's bounds.
    pub fn accepts(&self, expr: &str) -> bool {
        let (min, max) = self.bounds();
        let in_bounds = |v: i64| (min..=max).contains(&v);

        if expr == "*" {
            return true;
        }

        if let Some(step) = expr.strip_prefix("*/") {
            return step.parse::<i64>().is_ok_and(|n| n > 0);
        }

        if let Some((start, end)) = expr.split_once('-') {
            return match (start.parse::<i64>(), end.parse::<i64>()) {
                (Ok(start), Ok(end)) => min <= start && start <= end && end <= max,
                _ => false,
            };
        }

        if expr.contains(',') {
            return expr
                .split(',')
                .all(|v| v.trim().parse::<i64>().is_ok_and(in_bounds));
        }

        expr.parse::<i64>().is_ok_and(in_bounds)
    }
}

impl fmt::Display for CronField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a schedule was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CronError {
    #[error("Cron schedule cannot be empty")]
    Empty,
    #[error("Invalid cron schedule format: {schedule}. Expected 5 fields, got {found}")]
    FieldCount { schedule: String, found: usize },
    #[error("Invalid {field} field: {value}")]
    InvalidField { field: CronField, value: String },
}

/// Validate a five-field cron schedule.
pub fn validate_cron_schedule(schedule: &str) -> Result<(), CronError> {
    let schedule = schedule.trim();
    if schedule.is_empty() {
        return Err(CronError::Empty);
    }

    let parts: Vec<&str> = schedule.split_whitespace().collect();
    if parts.len() != CronField::ALL.len() {
        return Err(CronError::FieldCount {
            schedule: schedule.to_string(),
            found: parts.len(),
        });
    }

    for (field, expr) in CronField::ALL.iter().zip(parts) {
        if !field.accepts(expr) {
            return Err(CronError::InvalidField {
                field: *field,
                value: expr.to_string(),
            });
        }
    }

    Ok(())
}
