//! Freeform date entry → canonical `YYYY-MM-DD`.
//!
//! Scans get dated by hand, and people type dates however they like:
//! `2024-01-15`, `1/15/2024`, `15 Jan 2024`, `3/4/05`, `052096`. The parser
//! tries two strategies in order.
//!
//! ## 1. Strict templates
//!
//! A fixed, ordered list of calendar templates. The first template that
//! matches the *whole* input and names a real calendar day wins:
//!
//! | Template | Example |
//! |---|---|
//! | `Y-M-D` | `2024-01-15` |
//! | `Y/M/D` | `2024/01/15` |
//! | `M-D-Y` | `01-15-2024` |
//! | `M/D/Y` | `01/15/2024` |
//! | `D-M-Y` | `15-01-2024` |
//! | `D/M/Y` | `15/01/2024` |
//! | `YYYYMMDD` | `20240115` |
//! | `MMDDYYYY` | `01152024` |
//! | `Month D, Y` | `January 15, 2024` |
//! | `Mon D, Y` | `Jan 15, 2024` |
//! | `D Month Y` | `15 January 2024` |
//! | `D Mon Y` | `15 Jan 2024` |
//!
//! Years are always four digits. Month and day accept one or two digits,
//! except in the two compact 8-digit forms. Month names are case-insensitive.
//!
//! ## 2. Digit heuristics
//!
//! When no template matches, the digit runs are pulled out of the input.
//!
//! - **Exactly three runs** `a b c`: `a > 31` means `a` is the year (`a-b-c`);
//!   otherwise `c >= 100` means `c` is the year, and `a > 12` forces day-first
//!   (`b` is the month), else month-first; otherwise `c` is a two-digit year
//!   and `a-b` is month-day.
//! - **Anything else**: all digits are joined. A joined run of 4–6 digits ends
//!   with a two-digit year; the 2–4 digits before it are `MDD`/`MD` (one month
//!   digit) or `MMDD`.
//!
//! Two-digit years above 50 land in the 1900s, the rest in the 2000s.
//! Heuristic results are range-checked (`1..=12`, `1..=31`) but not checked
//! against the calendar, so `4/31/05` becomes `2005-04-31`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("no date entered")]
    Empty,
    #[error("could not parse date: {0}")]
    Unrecognized(String),
}

/// A calendar date in canonical form. Displays as `YYYY-MM-DD`.
///
/// Only the range bounds are guaranteed (`month` in 1–12, `day` in 1–31,
/// `year` ≤ 9999); heuristic parses may carry days the month doesn't have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate {
    year: u32,
    month: u32,
    day: u32,
}

impl CanonicalDate {
    /// Build a date, enforcing the range bounds.
    pub fn new(year: u32, month: u32, day: u32) -> Option<Self> {
        let in_range = year <= 9999 && (1..=12).contains(&month) && (1..=31).contains(&day);
        in_range.then_some(Self { year, month, day })
    }

    pub fn year(self) -> u32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn day(self) -> u32 {
        self.day
    }

    /// EXIF `DateTime*` value for this date. Time of day is unknown for
    /// scans, so noon is written.
    pub fn to_exif_datetime(self) -> String {
        format!(
            "{:04}:{:02}:{:02} 12:00:00",
            self.year, self.month, self.day
        )
    }

    /// Read the date part of an EXIF `YYYY:MM:DD HH:MM:SS` value.
    ///
    /// The time is ignored. Blank or malformed values (`0000:00:00`,
    /// `    :  :  `) yield `None`.
    pub fn from_exif(value: &str) -> Option<Self> {
        let date = value.trim().get(..10)?;
        let mut parts = date.split(':');
        let year = parse_fixed(parts.next()?, 4)?;
        let month = parse_fixed(parts.next()?, 2)?;
        let day = parse_fixed(parts.next()?, 2)?;
        if parts.next().is_some() {
            return None;
        }
        Self::new(year, month, day)
    }
}

fn parse_fixed(part: &str, width: usize) -> Option<u32> {
    if part.len() != width || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Parses the canonical `YYYY-MM-DD` form only. Use [`parse_date`] for
/// user input.
impl FromStr for CanonicalDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unrecognized = || DateParseError::Unrecognized(s.to_string());
        let mut parts = s.split('-');
        let (Some(y), Some(m), Some(d), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unrecognized());
        };
        let year = parse_fixed(y, 4).ok_or_else(unrecognized)?;
        let month = parse_fixed(m, 2).ok_or_else(unrecognized)?;
        let day = parse_fixed(d, 2).ok_or_else(unrecognized)?;
        Self::new(year, month, day).ok_or_else(unrecognized)
    }
}

// ---------------------------------------------------------------------------
// Strict templates
// ---------------------------------------------------------------------------

const YEAR: &str = "(?P<year>[0-9]{4})";
const MONTH: &str = "(?P<month>1[0-2]|0[1-9]|[1-9])";
// Single-digit days may carry a leading space ("Jan  5, 2024").
const DAY: &str = "(?P<day>3[01]|[12][0-9]|0[1-9]|[1-9]| [1-9])";
const MONTH_FULL: &str = "(?P<month_name>September|February|November|December|January|October|August|March|April|June|July|May)";
const MONTH_ABBR: &str =
    "(?P<month_name>Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)";

const MONTH_NAMES: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Template bodies in priority order. Compiled case-insensitive and anchored
/// at the start; a match must also consume the whole input.
static TEMPLATES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let bodies = [
        format!("{YEAR}-{MONTH}-{DAY}"),
        format!("{YEAR}/{MONTH}/{DAY}"),
        format!("{MONTH}-{DAY}-{YEAR}"),
        format!("{MONTH}/{DAY}/{YEAR}"),
        format!("{DAY}-{MONTH}-{YEAR}"),
        format!("{DAY}/{MONTH}/{YEAR}"),
        "(?P<year>[0-9]{4})(?P<month>[0-9]{2})(?P<day>[0-9]{2})".to_string(),
        "(?P<month>[0-9]{2})(?P<day>[0-9]{2})(?P<year>[0-9]{4})".to_string(),
        format!(r"{MONTH_FULL}\s+{DAY},\s+{YEAR}"),
        format!(r"{MONTH_ABBR}\s+{DAY},\s+{YEAR}"),
        format!(r"{DAY}\s+{MONTH_FULL}\s+{YEAR}"),
        format!(r"{DAY}\s+{MONTH_ABBR}\s+{YEAR}"),
    ];
    bodies
        .iter()
        .map(|body| Regex::new(&format!("(?i)^(?:{body})")).expect("date template regex"))
        .collect()
});

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]+").expect("digit run regex"));

fn match_template(template: &Regex, input: &str) -> Option<CanonicalDate> {
    let caps = template.captures(input)?;
    if caps.get(0)?.end() != input.len() {
        return None;
    }
    let year: u32 = caps.name("year")?.as_str().parse().ok()?;
    let month = template_month(&caps)?;
    let day: u32 = caps.name("day")?.as_str().trim().parse().ok()?;

    // Templates describe real calendar days only; year 0 is not one.
    if year == 0 || NaiveDate::from_ymd_opt(year as i32, month, day).is_none() {
        return None;
    }
    CanonicalDate::new(year, month, day)
}

fn template_month(caps: &Captures<'_>) -> Option<u32> {
    if let Some(m) = caps.name("month") {
        return m.as_str().parse().ok();
    }
    let name = caps.name("month_name")?.as_str().to_ascii_lowercase();
    MONTH_NAMES
        .iter()
        .position(|abbr| name.starts_with(abbr))
        .map(|i| i as u32 + 1)
}

// ---------------------------------------------------------------------------
// Digit heuristics
// ---------------------------------------------------------------------------

fn two_digit_year(yy: u64) -> u64 {
    if yy > 50 { 1900 + yy } else { 2000 + yy }
}

fn checked(year: u64, month: u64, day: u64) -> Option<CanonicalDate> {
    CanonicalDate::new(
        u32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn from_three_groups(a: u64, b: u64, c: u64) -> Option<CanonicalDate> {
    if a > 31 {
        checked(a, b, c)
    } else if c >= 100 {
        if a > 12 {
            checked(c, b, a)
        } else {
            checked(c, a, b)
        }
    } else {
        checked(two_digit_year(c), a, b)
    }
}

fn from_compact_digits(digits: &str) -> Option<CanonicalDate> {
    if !(4..=6).contains(&digits.len()) {
        return None;
    }
    let (rest, yy) = digits.split_at(digits.len() - 2);
    let year = two_digit_year(yy.parse().ok()?);
    let (mm, dd) = match rest.len() {
        4 => rest.split_at(2),
        2 | 3 => rest.split_at(1),
        _ => return None,
    };
    checked(year, mm.parse().ok()?, dd.parse().ok()?)
}

fn from_digit_runs(input: &str) -> Option<CanonicalDate> {
    // Runs are digits only, so the only parse failure is overflow; saturating
    // pushes those into the range check.
    let groups: Vec<u64> = DIGIT_RUN
        .find_iter(input)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
        .collect();

    if let [a, b, c] = groups[..] {
        return from_three_groups(a, b, c);
    }

    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    from_compact_digits(&digits)
}

/// Interpret a user-typed date.
///
/// Leading and trailing whitespace is ignored. See the [module docs](self)
/// for the accepted forms and the fallback heuristics.
pub fn parse_date(raw: &str) -> Result<CanonicalDate, DateParseError> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(DateParseError::Empty);
    }

    TEMPLATES
        .iter()
        .find_map(|t| match_template(t, input))
        .or_else(|| from_digit_runs(input))
        .ok_or_else(|| DateParseError::Unrecognized(raw.to_string()))
}
