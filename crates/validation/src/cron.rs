//! Restricted cron expressions (6-field: sec min hour dom month dow).
//!
//! Only the shape is checked. Seconds must be `*` since sub-minute schedules
//! are not supported, and exactly one of day-of-month / day-of-week must be
//! the `?` marker. Minute, hour, dom, month and dow are otherwise accepted
//! verbatim, so ranges, lists and steps pass through unchecked.

/// Marker for "no specific value" in the day-of-month / day-of-week fields.
pub const UNSPECIFIED: &str = "?";

const FIELD_COUNT: usize = 6;

/// Why an expression was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CronError {
    #[error("cron expression is empty")]
    Empty,
    #[error("expected 6 fields (sec min hour dom month dow), got {found}")]
    TooFewFields { found: usize },
    #[error("seconds field must be '*', got '{0}'")]
    SubMinuteSeconds(String),
    #[error("one of day-of-month or day-of-week must be '?'")]
    NoUnspecifiedDay,
    #[error("day-of-month and day-of-week cannot both be '?'")]
    BothDaysUnspecified,
}

/// The six fields of an accepted expression, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CronFields<'a> {
    pub seconds: &'a str,
    pub minute: &'a str,
    pub hour: &'a str,
    pub day_of_month: &'a str,
    pub month: &'a str,
    pub day_of_week: &'a str,
}

impl CronFields<'_> {
    /// True when the day is picked by day-of-month (dow is `?`).
    pub fn uses_day_of_month(&self) -> bool {
        self.day_of_week == UNSPECIFIED
    }
}

/// Check an expression and return its fields, or the first rule it breaks.
///
/// Tokens past the sixth (e.g. a quartz year field) are ignored.
pub fn check_cron_expression(expression: &str) -> Result<CronFields<'_>, CronError> {
    let tokens: Vec<&str> = expression.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(CronError::Empty);
    }
    if tokens.len() < FIELD_COUNT {
        return Err(CronError::TooFewFields {
            found: tokens.len(),
        });
    }

    let fields = CronFields {
        seconds: tokens[0],
        minute: tokens[1],
        hour: tokens[2],
        day_of_month: tokens[3],
        month: tokens[4],
        day_of_week: tokens[5],
    };

    if fields.seconds != "*" {
        return Err(CronError::SubMinuteSeconds(fields.seconds.to_string()));
    }

    match (
        fields.day_of_month == UNSPECIFIED,
        fields.day_of_week == UNSPECIFIED,
    ) {
        (true, true) => Err(CronError::BothDaysUnspecified),
        (false, false) => Err(CronError::NoUnspecifiedDay),
        _ => Ok(fields),
    }
}

/// Whether `expression` is a supported cron expression.
pub fn validate_cron_expression(expression: &str) -> bool {
    match check_cron_expression(expression) {
        Ok(_) => true,
        Err(e) => {
            tracing::trace!(expression, error = %e, "cron expression rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_exactly_one_unspecified_day() {
        assert!(validate_cron_expression("* * * ? * *"));
        assert!(validate_cron_expression("* * * * * ?"));
        assert!(validate_cron_expression("* 0 9 ? * MON-FRI"));
        assert!(validate_cron_expression("* 30 8 1,15 * ?"));
    }

    #[test]
    fn rejects_both_or_neither_unspecified() {
        assert_eq!(
            check_cron_expression("* * * ? * ?"),
            Err(CronError::BothDaysUnspecified)
        );
        assert_eq!(
            check_cron_expression("* * * 1 * 2"),
            Err(CronError::NoUnspecifiedDay)
        );
    }

    #[test]
    fn rejects_sub_minute_seconds() {
        assert_eq!(
            check_cron_expression("1 * * ? * *"),
            Err(CronError::SubMinuteSeconds("1".into()))
        );
        assert!(!validate_cron_expression("0 * * ? * *"));
    }

    #[test]
    fn rejects_short_expressions() {
        assert_eq!(check_cron_expression(""), Err(CronError::Empty));
        assert_eq!(check_cron_expression("   \t "), Err(CronError::Empty));
        assert_eq!(
            check_cron_expression("* * * ?"),
            Err(CronError::TooFewFields { found: 4 })
        );
        // A standard 5-field unix expression is one field short.
        assert!(!validate_cron_expression("0 9 * * 1"));
        for short in ["*", "* *", "* * *", "* * * ?", "* * * ? *"] {
            assert!(!validate_cron_expression(short), "{short:?} should be rejected");
        }
    }

    #[test]
    fn splits_on_any_whitespace_run() {
        let fields = check_cron_expression("  *\t0   9 ?  *\n MON ").unwrap();
        assert_eq!(fields.minute, "0");
        assert_eq!(fields.hour, "9");
        assert_eq!(fields.day_of_week, "MON");
        assert!(!fields.uses_day_of_month());
    }

    #[test]
    fn ignores_trailing_year_field() {
        let fields = check_cron_expression("* 0 12 15 * ? 2027").unwrap();
        assert_eq!(fields.day_of_month, "15");
        assert!(fields.uses_day_of_month());
    }

    #[test]
    fn field_contents_are_not_parsed() {
        assert!(validate_cron_expression("* banana 99 ? jan-dec *"));
    }
}
