//! Date and time-of-day resolution.
//!
//! Dates and times are resolved independently and then combined. Each side
//! reports whether it came from an explicit cue in the text; when neither
//! did, the request has no temporal reference and must be clarified rather
//! than silently scheduled at the default time.

use std::ops::Range;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use raincheck_domain::constants::DEFAULT_START_HOUR;
use regex::Regex;

use super::entities::{contains_phrase, trim_word, WEEKDAYS};

static ISO_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{4})[-/](\d{1,2})[-/](\d{1,2})\b")
        .expect("ISO_DATE_PATTERN should compile - this is a bug")
});

static MONTH_DAY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?P<month_a>january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec)\.?\s+(?P<day_a>\d{1,2})(?:st|nd|rd|th)?|(?P<day_b>\d{1,2})(?:st|nd|rd|th)?\s+(?P<month_b>january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec))\b",
    )
    .expect("MONTH_DAY_PATTERN should compile - this is a bug")
});

static CLOCK_TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(am|pm)?\b")
        .expect("CLOCK_TIME_PATTERN should compile - this is a bug")
});

/// Keyword map for coarse times of day.
const TIME_KEYWORDS: [(&str, u32); 4] =
    [("morning", 9), ("afternoon", 14), ("evening", 18), ("tonight", 20)];

/// Why a datetime could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DateTimeIssue {
    /// No date word, weekday, calendar date or clock time in the text
    NoTemporalCue,
    InvalidDate(String),
    InvalidTime(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved<T> {
    value: T,
    explicit: bool,
    span: Option<Range<usize>>,
}

/// Resolve the start datetime from free text.
///
/// `masked` lists byte ranges of `text.to_lowercase()` (such as the duration
/// phrase) that must not be read as a clock time.
pub(crate) fn resolve_start(
    text: &str,
    now: NaiveDateTime,
    masked: &[Range<usize>],
) -> Result<NaiveDateTime, DateTimeIssue> {
    let lower = text.to_lowercase();
    let words: Vec<String> = lower.split_whitespace().map(|w| trim_word(w).to_string()).collect();

    let date = resolve_date(&lower, &words, now.date())?;

    let mut hidden: Vec<Range<usize>> = masked.to_vec();
    hidden.extend(date.span.clone());
    let time = resolve_time(&mask(&lower, &hidden), &words)?;

    if !date.explicit && !time.explicit {
        return Err(DateTimeIssue::NoTemporalCue);
    }

    Ok(date.value.and_time(time.value))
}

fn resolve_date(
    lower: &str,
    words: &[String],
    today: NaiveDate,
) -> Result<Resolved<NaiveDate>, DateTimeIssue> {
    let has = |word: &str| words.iter().any(|w| w == word);
    let next_week = contains_phrase(lower, "next week");

    if has("today") || has("tonight") {
        return Ok(explicit(today));
    }
    if has("tomorrow") {
        return Ok(explicit(today + Duration::days(1)));
    }

    if let Some(weekday) = words.iter().find_map(|w| weekday_from_name(w)) {
        // "next week Friday" looks for the Friday after the coming week
        let anchor = if next_week { today + Duration::days(7) } else { today };
        return Ok(explicit(next_weekday(anchor, weekday)));
    }
    if next_week {
        return Ok(explicit(today + Duration::days(7)));
    }

    if let Some(captures) = ISO_DATE_PATTERN.captures(lower) {
        let span = captures.get(0).map(|m| m.range());
        let number = |idx: usize| captures.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
        let (Some(year), Some(month), Some(day)) = (number(1), number(2), number(3)) else {
            return Err(DateTimeIssue::InvalidDate("Unreadable calendar date".to_string()));
        };
        let year = i32::try_from(year)
            .map_err(|_| DateTimeIssue::InvalidDate(format!("Year {year} is out of range")))?;
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DateTimeIssue::InvalidDate(format!("{year}-{month:02}-{day:02} is not a real date"))
        })?;
        return Ok(Resolved { value: date, explicit: true, span });
    }

    if let Some(captures) = MONTH_DAY_PATTERN.captures(lower) {
        let span = captures.get(0).map(|m| m.range());
        let month_name = captures.name("month_a").or_else(|| captures.name("month_b"));
        let day = captures
            .name("day_a")
            .or_else(|| captures.name("day_b"))
            .and_then(|m| m.as_str().parse::<u32>().ok());
        let (Some(month), Some(day)) = (month_name.and_then(|m| month_number(m.as_str())), day)
        else {
            return Err(DateTimeIssue::InvalidDate("Unreadable calendar date".to_string()));
        };
        let date = NaiveDate::from_ymd_opt(today.year(), month, day).ok_or_else(|| {
            DateTimeIssue::InvalidDate(format!("Day {day} does not exist in month {month}"))
        })?;
        return Ok(Resolved { value: date, explicit: true, span });
    }

    Ok(Resolved { value: today, explicit: false, span: None })
}

fn resolve_time(
    masked_lower: &str,
    words: &[String],
) -> Result<Resolved<NaiveTime>, DateTimeIssue> {
    let keyword = TIME_KEYWORDS.iter().find(|(word, _)| words.iter().any(|w| w == word));
    if let Some((_, hour)) = keyword {
        return Ok(explicit(hms(*hour, 0)?));
    }

    if let Some(captures) = CLOCK_TIME_PATTERN.captures(masked_lower) {
        let mut hour: u32 = captures
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| DateTimeIssue::InvalidTime("Unreadable time of day".to_string()))?;
        let minute: u32 = match captures.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| DateTimeIssue::InvalidTime("Unreadable minutes".to_string()))?,
            None => 0,
        };

        match captures.get(3).map(|m| m.as_str()) {
            Some(meridiem) if hour == 0 || hour > 12 => {
                return Err(DateTimeIssue::InvalidTime(format!(
                    "{hour}{meridiem} is not a valid time of day"
                )));
            }
            Some("pm") if hour != 12 => hour += 12,
            Some("am") if hour == 12 => hour = 0,
            _ => {}
        }

        return Ok(explicit(hms(hour, minute)?));
    }

    Ok(Resolved { value: hms(DEFAULT_START_HOUR, 0)?, explicit: false, span: None })
}

const fn explicit<T>(value: T) -> Resolved<T> {
    Resolved { value, explicit: true, span: None }
}

fn hms(hour: u32, minute: u32) -> Result<NaiveTime, DateTimeIssue> {
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        DateTimeIssue::InvalidTime(format!("{hour:02}:{minute:02} is not a valid time of day"))
    })
}

/// Next occurrence of `weekday` strictly after `from`.
pub(crate) fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = from.weekday().num_days_from_monday();
    let target = weekday.num_days_from_monday();
    let mut days_ahead = (7 + target - current) % 7;
    if days_ahead == 0 {
        days_ahead = 7;
    }
    from + Duration::days(i64::from(days_ahead))
}

fn weekday_from_name(word: &str) -> Option<Weekday> {
    let days = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];
    WEEKDAYS.iter().position(|name| *name == word).map(|idx| days[idx])
}

fn month_number(name: &str) -> Option<u32> {
    let month = match name.get(..3)?.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Blank out byte ranges while keeping offsets stable.
fn mask(text: &str, ranges: &[Range<usize>]) -> String {
    text.char_indices()
        .map(|(idx, c)| if ranges.iter().any(|r| r.contains(&idx)) { ' ' } else { c })
        .collect()
}
