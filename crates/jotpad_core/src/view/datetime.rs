//! Viewer-local date/time conversions for note timestamps.
//!
//! # Invariants
//! - Labels and date-time field values are rendered in the caller's zone.
//! - Field values have minute precision; parsing accepts optional seconds.

use super::controller::ViewError;
use chrono::{Duration, Locale, NaiveDateTime, TimeZone};
use std::fmt::Display;

/// Short weekday, short month, 2-digit day, 24-hour 2-digit hour/minute.
pub const DATE_LABEL_FORMAT: &str = "%a, %b %d, %H:%M";
/// Value shape of the editable date-time field.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";
pub const INVALID_DATE_LABEL: &str = "Invalid Date";
pub const DEFAULT_LOCALE: Locale = Locale::en_US;

const DATETIME_LOCAL_PARSE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", DATETIME_LOCAL_FORMAT];
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_TIME", "LANG"];

/// Formats a timestamp as the list header label, e.g. `Tue, Nov 14, 22:13`.
pub fn format_date_label<Tz>(epoch_ms: i64, zone: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match zone.timestamp_millis_opt(epoch_ms).single() {
        Some(at) => at.format_localized(DATE_LABEL_FORMAT, locale).to_string(),
        None => INVALID_DATE_LABEL.to_string(),
    }
}

/// Converts a timestamp into a date-time field value.
///
/// Out-of-range timestamps give an empty field.
pub fn to_datetime_local<Tz>(epoch_ms: i64, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    zone.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|at| at.format(DATETIME_LOCAL_FORMAT).to_string())
        .unwrap_or_default()
}

/// Converts a date-time field value back into epoch milliseconds.
///
/// Ambiguous local times resolve to the earlier instant. Local times skipped
/// by a forward clock change move one hour later.
pub fn parse_datetime_local<Tz: TimeZone>(value: &str, zone: &Tz) -> Result<i64, ViewError> {
    let trimmed = value.trim();
    let naive = DATETIME_LOCAL_PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| ViewError::InvalidDateTime(value.to_string()))?;

    let resolve = |local: NaiveDateTime| zone.from_local_datetime(&local).earliest();
    resolve(naive)
        .or_else(|| naive.checked_add_signed(Duration::hours(1)).and_then(resolve))
        .map(|at| at.timestamp_millis())
        .ok_or_else(|| ViewError::InvalidDateTime(value.to_string()))
}

/// Picks the viewer's locale from `LC_ALL`, `LC_TIME` or `LANG`.
pub fn resolve_locale() -> Locale {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
        .and_then(|value| locale_from_tag(&value))
        .unwrap_or(DEFAULT_LOCALE)
}

/// Maps `en_US.UTF-8`, `de-DE` or `fr_FR@euro` style tags to a `Locale`.
pub fn locale_from_tag(tag: &str) -> Option<Locale> {
    let base = tag
        .trim()
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .replace('-', "_");
    match base.as_str() {
        "" => None,
        "C" | "POSIX" => Some(DEFAULT_LOCALE),
        other => Locale::try_from(other).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        format_date_label, locale_from_tag, parse_datetime_local, to_datetime_local,
        DEFAULT_LOCALE, INVALID_DATE_LABEL,
    };
    use chrono::{
        Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
    };

    const BUY_MILK_AT: i64 = 1_700_000_000_000;

    /// UTC+0 until 2024-03-10 02:00 local, then UTC+1; 02:00..03:00 never
    /// happens on the wall clock.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch_at() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_time(NaiveTime::from_hms_opt(2, 0, 0).unwrap())
        }

        fn standard() -> FixedOffset {
            FixedOffset::east_opt(0).unwrap()
        }

        fn summer() -> FixedOffset {
            FixedOffset::east_opt(3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _local: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(Self::standard())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch_at();
            if *local < switch {
                LocalResult::Single(Self::standard())
            } else if *local >= switch + Duration::hours(1) {
                LocalResult::Single(Self::summer())
            } else {
                LocalResult::None
            }
        }

        fn offset_from_utc_date(&self, _utc: &NaiveDate) -> FixedOffset {
            Self::standard()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_at() {
                Self::standard()
            } else {
                Self::summer()
            }
        }
    }

    #[test]
    fn label_uses_short_names_and_24_hour_clock() {
        assert_eq!(
            format_date_label(BUY_MILK_AT, &Utc, DEFAULT_LOCALE),
            "Tue, Nov 14, 22:13"
        );
    }

    #[test]
    fn label_follows_viewer_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(
            format_date_label(BUY_MILK_AT, &tokyo, DEFAULT_LOCALE),
            "Wed, Nov 15, 07:13"
        );
    }

    #[test]
    fn label_for_out_of_range_timestamp_is_invalid_date() {
        assert_eq!(
            format_date_label(i64::MAX, &Utc, DEFAULT_LOCALE),
            INVALID_DATE_LABEL
        );
    }

    #[test]
    fn datetime_local_round_trip_drops_seconds() {
        let field = to_datetime_local(BUY_MILK_AT, &Utc);
        assert_eq!(field, "2023-11-14T22:13");
        assert_eq!(
            parse_datetime_local(&field, &Utc).unwrap(),
            1_699_999_980_000
        );
    }

    #[test]
    fn parse_reads_field_in_viewer_zone() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(
            parse_datetime_local("2023-11-14T17:13:20", &minus_five).unwrap(),
            BUY_MILK_AT
        );
    }

    #[test]
    fn skipped_local_time_moves_one_hour_later() {
        let at = parse_datetime_local("2024-03-10T02:30", &SpringForward).unwrap();
        assert_eq!(at, 1_710_037_800_000);
        assert_eq!(to_datetime_local(at, &SpringForward), "2024-03-10T03:30");

        assert_eq!(
            parse_datetime_local("2024-03-10T01:30", &SpringForward).unwrap(),
            1_710_034_200_000
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_datetime_local("next tuesday", &Utc).is_err());
        assert!(parse_datetime_local("", &Utc).is_err());
    }

    #[test]
    fn locale_tags_are_normalized() {
        assert!(locale_from_tag("fr-FR").is_some());
        assert!(locale_from_tag("C").is_some());
        assert!(locale_from_tag("xx_NOPE").is_none());
        assert!(locale_from_tag("").is_none());
    }

    #[test]
    fn label_uses_locale_names() {
        let german = locale_from_tag("de_DE.UTF-8").expect("de_DE should be known");
        assert_eq!(
            format_date_label(BUY_MILK_AT, &Utc, german),
            "Di, Nov 14, 22:13"
        );
    }
}
