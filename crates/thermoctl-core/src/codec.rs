//! Wire codec: pure conversions between domain values and their textual
//! form/wire representations.
//!
//! Conventions:
//!
//! - **Clock times** are seconds since local midnight, rendered as
//!   zero-padded 24-hour `HH:MM`. The valid domain is `0..=86_399`.
//! - **Weekday masks** use bit *i* for weekday *i* counted from Sunday:
//!   Sunday = `0b000_0001`, Monday = `0b000_0010`, ..., Saturday =
//!   `0b100_0000`. Bits above bit 6 carry no weekday and are ignored.
//! - **Dates** travel as UTC instants. Form controls show them as local
//!   wall-clock `YYYY-MM-DDTHH:MM`; read views show `M/D/YYYY HH:MM`.
//!
//! Every timezone-dependent function has an `_in` variant taking an explicit
//! [`TimeZone`]; the plain variant uses [`Local`].

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SECONDS_PER_DAY: u32 = 86_400;

/// Value format of a `datetime-local` form control.
const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
const INPUT_DATE_ONLY: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%-m/%-d/%Y %H:%M";

/// Single-letter weekday markers, Sunday first.
pub const WEEKDAY_LETTERS: [char; 7] = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("expected HH:MM, got {0:?}")]
    InvalidClock(String),

    #[error("invalid date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },
}

// ── Clock times ─────────────────────────────────────────────────────

/// Render seconds-since-midnight as `HH:MM`.
///
/// Seconds within a minute are truncated. Input above 86 399 is outside the
/// domain and is *not* wrapped: the hour simply keeps counting, so 86 400
/// renders as `24:00` and 90 000 as `25:00`.
pub fn seconds_to_clock(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}

/// Parse `HH:MM` (24-hour) into seconds since midnight.
pub fn clock_to_seconds(clock: &str) -> Result<u32, CodecError> {
    let invalid = || CodecError::InvalidClock(clock.to_owned());

    let (h, m) = clock.trim().split_once(':').ok_or_else(invalid)?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return Err(invalid());
    }
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(hours * 3600 + minutes * 60)
}

// ── Weekday masks ───────────────────────────────────────────────────

/// One weekday marker in a schedule listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayGlyph {
    pub letter: char,
    pub selected: bool,
}

/// Expand a weekday mask into seven markers, Sunday first.
pub fn mask_to_weekday_glyphs(mask: u8) -> [DayGlyph; 7] {
    std::array::from_fn(|i| DayGlyph {
        letter: WEEKDAY_LETTERS[i],
        selected: mask & (1 << i) != 0,
    })
}

/// Fold seven per-day flags (Sunday first) into a weekday mask.
pub fn weekday_flags_to_mask(flags: &[bool; 7]) -> u8 {
    flags
        .iter()
        .enumerate()
        .filter(|&(_, &on)| on)
        .fold(0, |mask, (i, _)| mask | (1 << i))
}

/// The selected flags of a glyph row, for feeding back into
/// [`weekday_flags_to_mask`].
pub fn glyph_flags(glyphs: &[DayGlyph; 7]) -> [bool; 7] {
    std::array::from_fn(|i| glyphs[i].selected)
}

/// Per-day flags with the given weekdays set.
pub fn weekday_flags_from(days: &[Weekday]) -> [bool; 7] {
    let mut flags = [false; 7];
    for day in days {
        if let Some(flag) = flags.get_mut(day.num_days_from_sunday() as usize) {
            *flag = true;
        }
    }
    flags
}

// ── Dates ───────────────────────────────────────────────────────────

/// Render an instant as a local `YYYY-MM-DDTHH:MM` form value.
///
/// Shifted by the local UTC offset so the control shows the wall-clock
/// time the user originally picked.
pub fn date_to_local_input_value(date: DateTime<Utc>) -> String {
    date_to_input_value_in(date, &Local)
}

pub fn date_to_input_value_in<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.with_timezone(tz).format(INPUT_FORMAT).to_string()
}

/// Parse a local form value back into a UTC instant.
///
/// Accepts `YYYY-MM-DDTHH:MM` or a bare `YYYY-MM-DD` (local midnight).
/// Ambiguous wall-clock times (DST fall-back) resolve to the earlier
/// instant; nonexistent ones (spring-forward gap) are rejected.
pub fn local_input_value_to_date(value: &str) -> Result<DateTime<Utc>, CodecError> {
    input_value_to_date_in(value, &Local)
}

pub fn input_value_to_date_in<Tz: TimeZone>(
    value: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, CodecError> {
    let invalid = |reason: String| CodecError::InvalidDate {
        value: value.to_owned(),
        reason,
    };

    let trimmed = value.trim();
    let naive = match NaiveDateTime::parse_from_str(trimmed, INPUT_FORMAT) {
        Ok(naive) => naive,
        Err(e) => NaiveDate::parse_from_str(trimmed, INPUT_DATE_ONLY)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(|| invalid(e.to_string()))?,
    };

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| invalid("time does not exist in the local time zone".into()))
}

/// Render an ISO-8601 timestamp as `M/D/YYYY HH:MM` local time.
pub fn format_display_date(iso: &str) -> Result<String, CodecError> {
    format_display_date_in(iso, &Local)
}

pub fn format_display_date_in<Tz>(iso: &str, tz: &Tz) -> Result<String, CodecError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let parsed = DateTime::parse_from_rfc3339(iso.trim()).map_err(|e| CodecError::InvalidDate {
        value: iso.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(display_date_in(parsed.with_timezone(&Utc), tz))
}

/// [`format_display_date`] for an already-parsed instant.
pub fn display_date_in<Tz>(date: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    date.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

// ── Temperatures ────────────────────────────────────────────────────

/// Round to one decimal place.
pub fn round_temp(value: f64) -> f64 {
    // `+ 0.0` turns a rounded -0.0 into 0.0
    (value * 10.0).round() / 10.0 + 0.0
}

/// Shortest display form of a rounded temperature (`70`, `70.3`).
pub fn format_temp(value: f64) -> String {
    round_temp(value).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn est() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    // ── Clock ───────────────────────────────────────────────────────

    #[test]
    fn clock_round_trips_every_minute_of_the_day() {
        for seconds in (0..SECONDS_PER_DAY).step_by(60) {
            let clock = seconds_to_clock(seconds);
            assert_eq!(clock_to_seconds(&clock).unwrap(), seconds, "{clock}");
        }
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(seconds_to_clock(0), "00:00");
        assert_eq!(seconds_to_clock(52_200), "14:30");
        assert_eq!(seconds_to_clock(3_660), "01:01");
        assert_eq!(seconds_to_clock(86_399), "23:59");
    }

    #[test]
    fn clock_truncates_seconds_and_does_not_wrap() {
        assert_eq!(seconds_to_clock(59), "00:00");
        assert_eq!(seconds_to_clock(86_400), "24:00");
        assert_eq!(seconds_to_clock(90_000), "25:00");
    }

    #[test]
    fn clock_parse_rejects_garbage() {
        for bad in ["", "14", "14 30", "24:00", "12:60", "1:5", "ab:cd", "123:00", "-1:00"] {
            assert!(clock_to_seconds(bad).is_err(), "{bad:?} should be rejected");
        }
        assert_eq!(clock_to_seconds("9:05").unwrap(), 32_700);
        assert_eq!(clock_to_seconds(" 15:00 ").unwrap(), 54_000);
    }

    // ── Weekdays ────────────────────────────────────────────────────

    #[test]
    fn mask_round_trips_through_glyphs() {
        for mask in 0..=127u8 {
            let glyphs = mask_to_weekday_glyphs(mask);
            assert_eq!(weekday_flags_to_mask(&glyph_flags(&glyphs)), mask);
        }
    }

    #[test]
    fn monday_is_bit_one() {
        let flags = [false, true, false, false, false, false, false];
        assert_eq!(weekday_flags_to_mask(&flags), 2);
        assert_eq!(weekday_flags_from(&[Weekday::Mon]), flags);
    }

    #[test]
    fn glyphs_are_sunday_first() {
        let glyphs = mask_to_weekday_glyphs(0b100_0001);
        let letters: String = glyphs.iter().map(|g| g.letter).collect();
        assert_eq!(letters, "SMTWTFS");
        assert!(glyphs[0].selected);
        assert!(glyphs[6].selected);
        assert!(glyphs[1..6].iter().all(|g| !g.selected));
    }

    #[test]
    fn high_bit_is_ignored() {
        assert_eq!(
            glyph_flags(&mask_to_weekday_glyphs(0b1000_0010)),
            glyph_flags(&mask_to_weekday_glyphs(0b0000_0010))
        );
    }

    // ── Dates ───────────────────────────────────────────────────────

    #[test]
    fn input_value_shows_local_wall_clock() {
        let date = utc(2024, 6, 1, 12, 0);
        assert_eq!(date_to_input_value_in(date, &Utc), "2024-06-01T12:00");
        assert_eq!(date_to_input_value_in(date, &est()), "2024-06-01T07:00");
    }

    #[test]
    fn input_value_crosses_midnight_backwards() {
        let date = utc(2024, 6, 1, 3, 15);
        assert_eq!(date_to_input_value_in(date, &est()), "2024-05-31T22:15");
    }

    #[test]
    fn input_value_parses_back_to_the_same_instant() {
        let date = utc(2024, 1, 15, 18, 45);
        let shown = date_to_input_value_in(date, &est());
        assert_eq!(input_value_to_date_in(&shown, &est()).unwrap(), date);
    }

    #[test]
    fn input_value_accepts_bare_date_as_local_midnight() {
        assert_eq!(
            input_value_to_date_in("2024-06-01", &est()).unwrap(),
            utc(2024, 6, 1, 5, 0)
        );
        assert!(input_value_to_date_in("June 1st", &est()).is_err());
    }

    #[test]
    fn local_variant_round_trips() {
        let date = utc(2024, 1, 15, 12, 0);
        let shown = date_to_local_input_value(date);
        assert_eq!(local_input_value_to_date(&shown).unwrap(), date);
    }

    #[test]
    fn display_date_is_unpadded_month_and_day() {
        assert_eq!(
            format_display_date_in("2024-06-01T00:00:00Z", &Utc).unwrap(),
            "6/1/2024 00:00"
        );
        assert_eq!(
            format_display_date_in("2024-12-25T18:30:00Z", &est()).unwrap(),
            "12/25/2024 13:30"
        );
        assert!(format_display_date_in("yesterday", &Utc).is_err());
    }

    // ── Temperatures ────────────────────────────────────────────────

    #[test]
    fn temperatures_round_to_one_decimal() {
        assert_eq!(format_temp(70.0), "70");
        assert_eq!(format_temp(70.26), "70.3");
        assert_eq!(format_temp(-0.04), "0");
    }
}
