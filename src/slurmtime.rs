// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

//! Conversion between Slurm time strings (see the `--time` option of
//! `sbatch`) and [`std::time::Duration`].
//!
//! Slurm has two basic time formats:
//! 1. `days-hours(:minutes(:seconds)?)?`, which always has days and hours
//! 2. `(hours:)?minutes(:seconds)?`, which always has minutes
//!
//! The day form is tried first, then the short form. A duration of zero is
//! used by callers as the "no limit" sentinel, so a failed parse is a hard
//! error and never degrades to zero.

use std::time::Duration;

use crate::errors::PlanError;

/// Parse a Slurm time string into a `Duration`.
///
/// Acceptable formats include "minutes", "minutes:seconds",
/// "hours:minutes:seconds", "days-hours", "days-hours:minutes" and
/// "days-hours:minutes:seconds". A lone numeral is minutes, not hours or
/// seconds: `parse("25")` is 25 minutes.
pub fn parse(text: &str) -> Result<Duration, PlanError> {
    let trimmed = text.trim();
    parse_day_form(trimmed)
        .or_else(|| parse_short_form(trimmed))
        .ok_or_else(|| PlanError::MalformedDuration(text.to_string()))
}

/// Render a `Duration` in the canonical form Slurm accepts back:
/// `D-H:MM:SS` when there are whole days, `H:MM:SS` otherwise.
///
/// Sub-second remainders are not representable; round first with
/// [`round_to_second`]. Re-parsing the output always reproduces the same
/// whole-second total.
pub fn format(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3_600;
    let minutes = total % 3_600 / 60;
    let seconds = total % 60;
    if days > 0 {
        format!("{days}-{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours}:{minutes:02}:{seconds:02}")
    }
}

/// Round a `Duration` to whole seconds.
///
/// A remainder strictly greater than 500 000 µs rounds up; a remainder of
/// exactly 500 000 µs or less truncates.
pub fn round_to_second(duration: Duration) -> Duration {
    let carry = u64::from(duration.subsec_nanos() > 500_000_000);
    Duration::from_secs(duration.as_secs().saturating_add(carry))
}

/// `D-H`, `D-H:M` or `D-H:M:S`. Days are unbounded digits, hours 0-23 in one
/// or two digits, minutes and seconds exactly two digits in 00-59.
fn parse_day_form(s: &str) -> Option<Duration> {
    let (days, hms) = s.split_once('-')?;
    let days = digits(days)?;

    let mut it = hms.split(':');
    let hours = bounded(it.next()?, 2, 23)?;
    let minutes = match it.next() {
        Some(field) => two_digit(field, 59)?,
        None => 0,
    };
    let seconds = match it.next() {
        Some(field) => two_digit(field, 59)?,
        None => 0,
    };
    if it.next().is_some() {
        return None; // too many components
    }

    Some(from_fields(days, hours, minutes, seconds))
}

/// `M`, `M:S`, `H:M` or `H:M:S`. Hours are unbounded digits, minutes one or
/// two digits, seconds exactly two digits in 00-59.
///
/// A two-component string is ambiguous between `M:S` and `H:M`; `M:S` wins
/// whenever the trailing field is a valid two-digit seconds value, so "2:03"
/// is 2 minutes 3 seconds while "2:3" is 2 hours 3 minutes.
fn parse_short_form(s: &str) -> Option<Duration> {
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [m] => Some(from_fields(0, 0, bounded(m, 2, 99)?, 0)),
        [a, b] => {
            if let (Some(minutes), Some(seconds)) = (bounded(a, 2, 99), two_digit(b, 59)) {
                return Some(from_fields(0, 0, minutes, seconds));
            }
            Some(from_fields(0, digits(a)?, bounded(b, 2, 99)?, 0))
        }
        [h, m, sec] => Some(from_fields(
            0,
            digits(h)?,
            bounded(m, 2, 99)?,
            two_digit(sec, 59)?,
        )),
        _ => None,
    }
}

fn from_fields(days: u64, hours: u64, minutes: u64, seconds: u64) -> Duration {
    let total = days
        .saturating_mul(86_400)
        .saturating_add(hours.saturating_mul(3_600))
        .saturating_add(minutes * 60)
        .saturating_add(seconds);
    Duration::from_secs(total)
}

fn digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn bounded(s: &str, max_len: usize, max: u64) -> Option<u64> {
    if s.len() > max_len {
        return None;
    }
    digits(s).filter(|v| *v <= max)
}

fn two_digit(s: &str, max: u64) -> Option<u64> {
    if s.len() != 2 {
        return None;
    }
    digits(s).filter(|v| *v <= max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: &str) -> u64 {
        parse(s).unwrap().as_secs()
    }

    #[test]
    fn parses_day_forms() {
        assert_eq!(secs("2-8"), 2 * 86_400 + 8 * 3_600);
        assert_eq!(secs("2-8:05"), 2 * 86_400 + 8 * 3_600 + 5 * 60);
        assert_eq!(secs("2-8:05:20"), 2 * 86_400 + 8 * 3_600 + 5 * 60 + 20);
        assert_eq!(secs("10-23:59:59"), 10 * 86_400 + 23 * 3_600 + 59 * 60 + 59);
        assert_eq!(secs("1-08"), 86_400 + 8 * 3_600);
    }

    #[test]
    fn parses_short_forms() {
        assert_eq!(secs("2"), 120);
        assert_eq!(secs("90"), 5_400);
        assert_eq!(secs("2:03"), 123);
        assert_eq!(secs("1:02:03"), 3_723);
        assert_eq!(secs("0:19:30"), 19 * 60 + 30);
        assert_eq!(secs("100:30:00"), 100 * 3_600 + 30 * 60);
    }

    #[test]
    fn lone_numeral_is_minutes_not_hours() {
        assert_eq!(secs("25"), 25 * 60);
    }

    #[test]
    fn two_components_prefer_minutes_seconds() {
        // "2:03" is M:S; "2:3" cannot be (seconds need two digits) so it
        // falls through to H:M.
        assert_eq!(secs("2:03"), 123);
        assert_eq!(secs("2:3"), 2 * 3_600 + 3 * 60);
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "", "abc", "1:2:3:4", "2-24", "2-8:5", "2-8:05:5", "2-8:61", "-8", "2-", "1:02:60",
            "1::02", "120", "2:130",
        ] {
            assert_eq!(
                parse(bad),
                Err(PlanError::MalformedDuration(bad.to_string())),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn formats_canonically() {
        assert_eq!(format(Duration::from_secs(1_170)), "0:19:30");
        assert_eq!(format(Duration::from_secs(3_892)), "1:04:52");
        assert_eq!(format(Duration::from_secs(0)), "0:00:00");
        assert_eq!(
            format(Duration::from_secs(2 * 86_400 + 8 * 3_600 + 5 * 60 + 20)),
            "2-8:05:20"
        );
    }

    #[test]
    fn format_round_trips_total_seconds() {
        for total in [0, 59, 60, 3_599, 3_600, 86_399, 86_400, 90_061, 777_777] {
            let rendered = format(Duration::from_secs(total));
            assert_eq!(parse(&rendered).unwrap().as_secs(), total, "via '{rendered}'");
        }
    }

    #[test]
    fn rounds_half_second_down_and_above_up() {
        let half = Duration::new(10, 500_000_000);
        assert_eq!(round_to_second(half), Duration::from_secs(10));

        let above = Duration::new(10, 500_000_001);
        assert_eq!(round_to_second(above), Duration::from_secs(11));

        let below = Duration::new(10, 499_999_999);
        assert_eq!(round_to_second(below), Duration::from_secs(10));
    }
}
