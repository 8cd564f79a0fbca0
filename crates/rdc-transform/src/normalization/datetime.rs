//! Tolerant date parsing for inconsistently formatted extracts.
//!
//! Parsing is a three-step cascade. A standard parse accepts ISO 8601, RFC 3339
//! and RFC 2822 values plus a few unambiguous named-month layouts. Values that
//! fail it are matched by shape against an ordered list of explicit layouts,
//! each with exactly one format string. Values that match no shape get one
//! lenient attempt after whitespace and punctuation cleanup. Anything left is
//! null; parsing never fails a run.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, DataType, PolarsResult};
use regex::Regex;

use super::ColumnChange;
use crate::data_utils::column_values;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

const STANDARD_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const STANDARD_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
];

const LENIENT_DATE_FORMATS: &[&str] = &[
    "%Y %m %d",
    "%d %m %Y",
    "%Y-%m-%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d %Y",
    "%Y %B %d",
    "%B %Y %d",
];

static ISO_DASHED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid dashed date regex"));

static ISO_SLASHED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}/\d{2}/\d{2}$").expect("Invalid slashed date regex"));

static DAY_MONTH_YEAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}/\d{2}/\d{4}$").expect("Invalid day-month-year regex")
});

static MONTH_SHORT_YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("Invalid month/year regex"));

static MONTH_NAME_YEAR_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+ \d{4} \d{2}$").expect("Invalid month-name-year-day regex")
});

static YEAR_MONTH_NAME_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4} \w+ \d{2}$").expect("Invalid year-month-name-day regex")
});

/// Explicit layouts tried, in order, on values the standard parse rejects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePattern {
    /// `YYYY-MM-DD`
    IsoDashed,
    /// `YYYY/MM/DD`
    IsoSlashed,
    /// `DD/MM/YYYY`
    DayMonthYear,
    /// `MM/YY`, resolved to the first of the month
    MonthShortYear,
    /// `Month YYYY DD`
    MonthNameYearDay,
    /// `YYYY Month DD`
    YearMonthNameDay,
}

impl DatePattern {
    pub const ORDERED: [DatePattern; 6] = [
        DatePattern::IsoDashed,
        DatePattern::IsoSlashed,
        DatePattern::DayMonthYear,
        DatePattern::MonthShortYear,
        DatePattern::MonthNameYearDay,
        DatePattern::YearMonthNameDay,
    ];

    /// The single chrono format used for this layout.
    pub fn format(self) -> &'static str {
        match self {
            DatePattern::IsoDashed => "%Y-%m-%d",
            DatePattern::IsoSlashed => "%Y/%m/%d",
            DatePattern::DayMonthYear => "%d/%m/%Y",
            DatePattern::MonthShortYear => "%d/%m/%y",
            DatePattern::MonthNameYearDay => "%B %Y %d",
            DatePattern::YearMonthNameDay => "%Y %B %d",
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            DatePattern::IsoDashed => &*ISO_DASHED_REGEX,
            DatePattern::IsoSlashed => &*ISO_SLASHED_REGEX,
            DatePattern::DayMonthYear => &*DAY_MONTH_YEAR_REGEX,
            DatePattern::MonthShortYear => &*MONTH_SHORT_YEAR_REGEX,
            DatePattern::MonthNameYearDay => &*MONTH_NAME_YEAR_DAY_REGEX,
            DatePattern::YearMonthNameDay => &*YEAR_MONTH_NAME_DAY_REGEX,
        }
    }

    /// Whether `value` has this layout's shape.
    pub fn matches(self, value: &str) -> bool {
        self.regex().is_match(value)
    }

    fn parse(self, value: &str) -> Option<NaiveDate> {
        match self {
            DatePattern::MonthShortYear => {
                NaiveDate::parse_from_str(&format!("01/{value}"), self.format()).ok()
            }
            _ => NaiveDate::parse_from_str(value, self.format()).ok(),
        }
    }
}

/// Which cascade step produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Standard(NaiveDate),
    Pattern(DatePattern, NaiveDate),
    Lenient(NaiveDate),
    /// A shape matched but its format rejected the value.
    Rejected(DatePattern),
    Unparsed,
}

impl ParsedDate {
    pub fn date(self) -> Option<NaiveDate> {
        match self {
            ParsedDate::Standard(d) | ParsedDate::Pattern(_, d) | ParsedDate::Lenient(d) => {
                Some(d)
            }
            ParsedDate::Rejected(_) | ParsedDate::Unparsed => None,
        }
    }
}

/// The date parsing cascade.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateParser;

impl DateParser {
    pub fn parse(&self, value: &str) -> ParsedDate {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return ParsedDate::Unparsed;
        }
        if let Some(date) = parse_standard(trimmed) {
            return ParsedDate::Standard(date);
        }
        if let Some(pattern) = DatePattern::ORDERED.iter().find(|p| p.matches(trimmed)) {
            return match pattern.parse(trimmed) {
                Some(date) => ParsedDate::Pattern(*pattern, date),
                None => ParsedDate::Rejected(*pattern),
            };
        }
        match parse_lenient(trimmed) {
            Some(date) => ParsedDate::Lenient(date),
            None => ParsedDate::Unparsed,
        }
    }
}

/// Parse a single date value; `None` when every step fails.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DateParser.parse(value).date()
}

/// Days since the Unix epoch, the physical value of a `Date` column.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Parse each named column into a `Date` column.
///
/// Columns already typed as dates are skipped.
pub fn parse_date_columns(df: &mut DataFrame, columns: &[&str]) -> PolarsResult<ColumnChange> {
    let parser = DateParser;
    let mut change = ColumnChange::default();
    for name in columns {
        if df.column(name)?.dtype() == &DataType::Date {
            continue;
        }
        let Some(values) = column_values(df, name) else {
            continue;
        };
        let days: Vec<Option<i32>> = values
            .iter()
            .map(|value| {
                let value = value.as_deref()?;
                let parsed = parser.parse(value).date();
                match parsed {
                    Some(_) => change.changed += 1,
                    None => change.nulled += 1,
                }
                parsed.map(epoch_days)
            })
            .collect();
        let column = Column::new((*name).into(), days).cast(&DataType::Date)?;
        df.with_column(column)?;
    }
    Ok(change)
}

fn parse_standard(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    for format in STANDARD_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    STANDARD_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_lenient(value: &str) -> Option<NaiveDate> {
    let cleaned = lenient_cleanup(value);
    if cleaned.is_empty() {
        return None;
    }
    parse_standard(&cleaned).or_else(|| {
        LENIENT_DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
    })
}

/// Collapse runs of whitespace, turn `.` and `,` separators into spaces and
/// drop trailing punctuation.
fn lenient_cleanup(value: &str) -> String {
    let spaced: String = value
        .chars()
        .map(|c| if c == '.' || c == ',' || c == '_' { ' ' } else { c })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
