//! Event timestamp parsing and calendar features.
//!
//! Source exports use either `MM/DD/YYYY hh:mm:ss AM|PM` or
//! `YYYY-MM-DD HH:MM:SS`. One format is chosen per column and every value is
//! rewritten to the canonical 24-hour form; values that do not parse become
//! null.

use std::collections::HashSet;
use std::time::Instant;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};
use tracing::{debug, info, info_span};

use shelter_common::{bool_column, i32_column, text_column, text_values};
use shelter_model::columns::{
    ANIMAL_ID, DATETIME, DAY, DAY_OF_WEEK, HOUR, IS_WEEKEND, ISO_YEAR, LINE_ID, MINUTE, MONTH,
    QUARTER, SEASON, SHIFT, WEEK, WEEKDAY, YEAR, YEAR_QUARTER,
};
use shelter_model::{Season, Shift, TableKind};

use crate::error::Result;
use crate::frame::require_identity;

/// Canonical timestamp layout carried by every output table.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TWELVE_HOUR_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// `line_id` timestamp part for events without a timestamp.
pub const MISSING_TIMESTAMP: &str = "nan";

/// Textual layout of a timestamp column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `MM/DD/YYYY hh:mm:ss AM|PM`
    TwelveHour,
    /// `YYYY-MM-DD HH:MM:SS`
    TwentyFourHour,
}

impl TimestampFormat {
    /// Twelve-hour when any value mentions AM or PM, in any case.
    pub fn detect<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let twelve_hour = values.into_iter().flatten().any(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("am") || value.contains("pm")
        });
        if twelve_hour {
            TimestampFormat::TwelveHour
        } else {
            TimestampFormat::TwentyFourHour
        }
    }

    /// Parses one value strictly in this format.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        match self {
            TimestampFormat::TwelveHour => {
                NaiveDateTime::parse_from_str(&value.to_ascii_uppercase(), TWELVE_HOUR_FORMAT).ok()
            }
            TimestampFormat::TwentyFourHour => {
                NaiveDateTime::parse_from_str(value, CANONICAL_FORMAT).ok()
            }
        }
    }
}

/// Parses a canonical timestamp produced by [`parse_event_datetimes`].
pub fn parse_canonical(value: &str) -> Option<NaiveDateTime> {
    TimestampFormat::TwentyFourHour.parse(value)
}

/// Builds the event key: `animal_id` and the canonical timestamp joined by `_`.
pub fn line_id(animal_id: Option<&str>, canonical: Option<&str>) -> String {
    format!(
        "{}_{}",
        animal_id.unwrap_or(MISSING_TIMESTAMP),
        canonical.unwrap_or(MISSING_TIMESTAMP)
    )
}

/// Rewrites `datetime` to the canonical layout and derives `line_id`.
///
/// Events sharing a `line_id` are collapsed to the first occurrence, so the
/// key is unique within the returned table.
pub fn parse_event_datetimes(df: DataFrame, table: TableKind) -> Result<DataFrame> {
    let span = info_span!("parse_event_datetimes", table = %table);
    let _guard = span.enter();
    let start = Instant::now();
    require_identity(&df, table, &[ANIMAL_ID, DATETIME])?;

    let raw = text_values(&df, DATETIME).unwrap_or_default();
    let ids = text_values(&df, ANIMAL_ID).unwrap_or_default();
    let format = TimestampFormat::detect(raw.iter().map(|v| v.as_deref()));
    debug!(table = %table, ?format, "timestamp format detected");

    let canonical: Vec<Option<String>> = raw
        .iter()
        .map(|value| {
            value
                .as_deref()
                .and_then(|v| format.parse(v))
                .map(|dt| dt.format(CANONICAL_FORMAT).to_string())
        })
        .collect();
    let unparsed = raw
        .iter()
        .zip(&canonical)
        .filter(|(raw, parsed)| raw.is_some() && parsed.is_none())
        .count();

    let line_ids: Vec<String> = ids
        .iter()
        .zip(&canonical)
        .map(|(id, ts)| line_id(id.as_deref(), ts.as_deref()))
        .collect();

    let mut seen = HashSet::with_capacity(line_ids.len());
    let keep: Vec<bool> = line_ids.iter().map(|id| seen.insert(id.clone())).collect();

    let mut df = df;
    df.with_column(text_column(DATETIME, canonical))?;
    df.with_column(text_column(
        LINE_ID,
        line_ids.into_iter().map(Some).collect(),
    ))?;
    let rows_in = df.height();
    let mask = BooleanChunked::from_slice("line_id_dedupe".into(), &keep);
    let df = df.filter(&mask)?;

    info!(
        table = %table,
        rows_in,
        rows_out = df.height(),
        unparsed,
        duration_ms = start.elapsed().as_millis(),
        "event timestamps parsed"
    );
    Ok(df)
}

/// Calendar fields of one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarFeatures {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub iso_week: u32,
    pub iso_year: i32,
    /// Monday = 0
    pub day_of_week: u32,
    pub weekday: &'static str,
    pub is_weekend: bool,
    pub quarter: u32,
    pub year_quarter: String,
    pub season: Season,
    pub shift: Shift,
}

impl CalendarFeatures {
    pub fn from_datetime(dt: &NaiveDateTime) -> Self {
        let weekday = dt.weekday();
        let quarter = (dt.month() - 1) / 3 + 1;
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            iso_week: dt.iso_week().week(),
            iso_year: dt.iso_week().year(),
            day_of_week: weekday.num_days_from_monday(),
            weekday: weekday_name(weekday),
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            quarter,
            year_quarter: format!("{}-Q{}", dt.year(), quarter),
            season: Season::from_month(dt.month()),
            shift: Shift::from_hour(dt.hour()),
        }
    }
}

/// Lowercase English day name.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Adds the calendar, season and shift columns derived from `datetime`.
///
/// Rows without a timestamp get null numeric fields, `is_weekend = false`
/// and `"unknown"` season and shift.
pub fn add_calendar_features(df: DataFrame, table: TableKind) -> Result<DataFrame> {
    let span = info_span!("add_calendar_features", table = %table);
    let _guard = span.enter();
    let start = Instant::now();
    require_identity(&df, table, &[DATETIME])?;

    let features: Vec<Option<CalendarFeatures>> = text_values(&df, DATETIME)
        .unwrap_or_default()
        .iter()
        .map(|value| {
            value
                .as_deref()
                .and_then(parse_canonical)
                .map(|dt| CalendarFeatures::from_datetime(&dt))
        })
        .collect();

    let int_field = |f: fn(&CalendarFeatures) -> i32| -> Vec<Option<i32>> {
        features.iter().map(|c| c.as_ref().map(f)).collect()
    };
    let text_field = |f: fn(&CalendarFeatures) -> String| -> Vec<Option<String>> {
        features.iter().map(|c| c.as_ref().map(f)).collect()
    };

    let mut df = df;
    df.with_column(i32_column(YEAR, int_field(|c| c.year)))?;
    df.with_column(i32_column(MONTH, int_field(|c| c.month as i32)))?;
    df.with_column(i32_column(DAY, int_field(|c| c.day as i32)))?;
    df.with_column(i32_column(HOUR, int_field(|c| c.hour as i32)))?;
    df.with_column(i32_column(MINUTE, int_field(|c| c.minute as i32)))?;
    df.with_column(i32_column(WEEK, int_field(|c| c.iso_week as i32)))?;
    df.with_column(i32_column(ISO_YEAR, int_field(|c| c.iso_year)))?;
    df.with_column(i32_column(DAY_OF_WEEK, int_field(|c| c.day_of_week as i32)))?;
    df.with_column(text_column(WEEKDAY, text_field(|c| c.weekday.to_string())))?;
    df.with_column(bool_column(
        IS_WEEKEND,
        features
            .iter()
            .map(|c| c.as_ref().is_some_and(|c| c.is_weekend))
            .collect(),
    ))?;
    df.with_column(i32_column(QUARTER, int_field(|c| c.quarter as i32)))?;
    df.with_column(text_column(YEAR_QUARTER, text_field(|c| c.year_quarter.clone())))?;
    df.with_column(text_column(
        SEASON,
        features
            .iter()
            .map(|c| Some(c.as_ref().map_or(Season::Unknown, |c| c.season).to_string()))
            .collect(),
    ))?;
    df.with_column(text_column(
        SHIFT,
        features
            .iter()
            .map(|c| Some(c.as_ref().map_or(Shift::Unknown, |c| c.shift).to_string()))
            .collect(),
    ))?;

    info!(
        table = %table,
        rows = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "calendar features added"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn detects_twelve_hour_columns_case_insensitively() {
        let values = [Some("2021-01-01 08:00:00"), None, Some("12/07/2017 02:07:00 pm")];
        assert_eq!(
            TimestampFormat::detect(values),
            TimestampFormat::TwelveHour
        );
        assert_eq!(
            TimestampFormat::detect([Some("2021-01-01 08:00:00")]),
            TimestampFormat::TwentyFourHour
        );
    }

    #[test]
    fn parses_both_layouts() {
        assert_eq!(
            TimestampFormat::TwelveHour.parse("12/07/2017 02:07:00 pm"),
            Some(at(2017, 12, 7, 14, 7))
        );
        assert_eq!(
            TimestampFormat::TwelveHour.parse("01/01/2021 12:30:00 AM"),
            Some(at(2021, 1, 1, 0, 30))
        );
        assert_eq!(
            TimestampFormat::TwentyFourHour.parse("2021-01-01 08:00:00"),
            Some(at(2021, 1, 1, 8, 0))
        );
    }

    #[test]
    fn wrong_layout_is_not_parsed() {
        assert_eq!(TimestampFormat::TwelveHour.parse("2021-01-01 08:00:00"), None);
        assert_eq!(TimestampFormat::TwentyFourHour.parse("yesterday"), None);
    }

    #[test]
    fn line_id_falls_back_to_nan() {
        assert_eq!(
            line_id(Some("a1"), Some("2021-01-01 08:00:00")),
            "a1_2021-01-01 08:00:00"
        );
        assert_eq!(line_id(Some("a1"), None), "a1_nan");
    }

    #[test]
    fn calendar_features_of_a_saturday_evening() {
        let c = CalendarFeatures::from_datetime(&at(2021, 1, 2, 18, 45));
        assert_eq!(c.year, 2021);
        assert_eq!(c.day_of_week, 5);
        assert_eq!(c.weekday, "saturday");
        assert!(c.is_weekend);
        assert_eq!(c.quarter, 1);
        assert_eq!(c.year_quarter, "2021-Q1");
        // 2021-01-02 belongs to ISO week 53 of 2020
        assert_eq!(c.iso_week, 53);
        assert_eq!(c.iso_year, 2020);
        assert_eq!(c.season, Season::Winter);
        assert_eq!(c.shift, Shift::Swing);
    }

    #[test]
    fn canonicalizes_and_dedupes_on_line_id() {
        let df = DataFrame::new(vec![
            text_column(
                ANIMAL_ID,
                vec![
                    Some("a1".to_string()),
                    Some("a1".to_string()),
                    Some("a2".to_string()),
                ],
            ),
            text_column(
                DATETIME,
                vec![
                    Some("01/01/2021 08:00:00 am".to_string()),
                    Some("01/01/2021 08:00:00 AM".to_string()),
                    Some("not a date".to_string()),
                ],
            ),
        ])
        .unwrap();
        let df = parse_event_datetimes(df, TableKind::Intake).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            text_values(&df, DATETIME),
            Some(vec![Some("2021-01-01 08:00:00".to_string()), None])
        );
        assert_eq!(
            text_values(&df, LINE_ID),
            Some(vec![
                Some("a1_2021-01-01 08:00:00".to_string()),
                Some("a2_nan".to_string())
            ])
        );
    }

    #[test]
    fn events_without_a_timestamp_collapse_per_animal() {
        let df = DataFrame::new(vec![
            text_column(
                ANIMAL_ID,
                vec![
                    Some("a1".to_string()),
                    Some("a1".to_string()),
                    Some("a1".to_string()),
                    Some("a2".to_string()),
                ],
            ),
            text_column(
                DATETIME,
                vec![
                    None,
                    Some("2021-13-45 99:00:00".to_string()),
                    Some("2021-01-01 08:00:00".to_string()),
                    None,
                ],
            ),
        ])
        .unwrap();
        let df = parse_event_datetimes(df, TableKind::Outcome).unwrap();
        assert_eq!(
            text_values(&df, LINE_ID),
            Some(vec![
                Some("a1_nan".to_string()),
                Some("a1_2021-01-01 08:00:00".to_string()),
                Some("a2_nan".to_string()),
            ])
        );
        assert_eq!(
            text_values(&df, DATETIME),
            Some(vec![None, Some("2021-01-01 08:00:00".to_string()), None])
        );
    }

    #[test]
    fn missing_timestamps_get_unknown_season_and_shift() {
        let df = DataFrame::new(vec![text_column(
            DATETIME,
            vec![Some("2021-07-04 06:59:00".to_string()), None],
        )])
        .unwrap();
        let df = add_calendar_features(df, TableKind::Outcome).unwrap();
        assert_eq!(
            text_values(&df, SEASON),
            Some(vec![Some("summer".to_string()), Some("unknown".to_string())])
        );
        assert_eq!(
            text_values(&df, SHIFT),
            Some(vec![Some("overnight".to_string()), Some("unknown".to_string())])
        );
        assert_eq!(
            text_values(&df, YEAR_QUARTER),
            Some(vec![Some("2021-Q3".to_string()), None])
        );
        assert_eq!(
            text_values(&df, IS_WEEKEND),
            Some(vec![Some("true".to_string()), Some("false".to_string())])
        );
    }
}
