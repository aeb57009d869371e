//! City, attendee, duration and description extraction.

use std::ops::Range;

use once_cell::sync::Lazy;
use raincheck_domain::constants::{DEFAULT_DESCRIPTION, UNKNOWN_ATTENDEE};
use regex::Regex;

/// Multi-word names first so "New York" wins over a capitalized-word guess.
const KNOWN_CITIES: [&str; 7] =
    ["New York", "Taipei", "Tokyo", "London", "Paris", "Berlin", "Sydney"];

const ATTENDEE_KEYWORDS: [&str; 2] = ["meet", "with"];

pub(crate) const WEEKDAYS: [&str; 7] =
    ["monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday"];

const TEMPORAL_WORDS: [&str; 9] = [
    "today",
    "tomorrow",
    "tonight",
    "next",
    "this",
    "morning",
    "afternoon",
    "evening",
    "night",
];

/// Words that end an attendee phrase.
const ATTENDEE_TERMINATORS: [&str; 7] = ["for", "in", "at", "on", "about", "from", "to"];

/// Capitalized words that are never a city.
const NON_CITY_WORDS: [&str; 4] = ["meet", "meeting", "with", "and"];

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+(?:\.\d+)?)\s*(minutes|minute|mins|min|hours|hour|hrs|hr|h)\b")
        .expect("DURATION_PATTERN should compile - this is a bug")
});

/// A duration phrase and where it sits in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DurationMatch {
    pub minutes: u32,
    pub span: Range<usize>,
}

pub(crate) fn extract_duration(text: &str) -> Option<DurationMatch> {
    let captures = DURATION_PATTERN.captures(text)?;
    let whole = captures.get(0)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();

    let minutes = if unit.starts_with('h') { amount * 60.0 } else { amount };
    // Saturating float-to-int cast; absurd values are caught by validation.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let minutes = minutes.round() as u32;

    Some(DurationMatch { minutes, span: whole.range() })
}

/// Resolve the city: a known name anywhere in the text, else the first
/// capitalized word that is not an attendee, keyword or date word.
pub(crate) fn extract_city(text: &str, attendees: &[String]) -> Option<String> {
    let lower = text.to_lowercase();
    let known = KNOWN_CITIES.iter().find(|city| contains_phrase(&lower, &city.to_lowercase()));
    if let Some(city) = known {
        return Some((*city).to_string());
    }

    text.split_whitespace().map(trim_word).find_map(|word| {
        let lowered = word.to_lowercase();
        let is_candidate = word.chars().count() > 2
            && is_capitalized_word(word)
            && !NON_CITY_WORDS.contains(&lowered.as_str())
            && !WEEKDAYS.contains(&lowered.as_str())
            && !TEMPORAL_WORDS.contains(&lowered.as_str())
            && !attendees.iter().any(|name| name.eq_ignore_ascii_case(word));
        is_candidate.then(|| word.to_string())
    })
}

/// Names following "meet" or "with", split on "and" and commas.
///
/// A phrase only counts when something (a number, a date word, a preposition)
/// closes it. An unterminated phrase falls back to the run of capitalized
/// words after the keyword, and no names at all yields `["Unknown"]`.
pub(crate) fn extract_attendees(text: &str) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();

    let keyword_positions: Vec<usize> = words
        .iter()
        .enumerate()
        .filter(|(_, word)| ATTENDEE_KEYWORDS.contains(&trim_word(word).to_lowercase().as_str()))
        .map(|(idx, _)| idx)
        .collect();

    for &position in &keyword_positions {
        if let Some(names) = terminated_phrase(&words[position + 1..]) {
            if !names.is_empty() {
                return names;
            }
        }
    }

    for &position in &keyword_positions {
        let run: Vec<String> = words[position + 1..]
            .iter()
            .map(|word| trim_word(word))
            .take_while(|word| is_capitalized_word(word) && !is_known_city(word))
            .map(str::to_string)
            .collect();
        if !run.is_empty() {
            return run;
        }
    }

    vec![UNKNOWN_ATTENDEE.to_string()]
}

/// Short label for the kind of gathering.
pub(crate) fn describe(text: &str) -> String {
    let lower = text.to_lowercase();
    let label = if lower.contains("meet") {
        "meeting"
    } else if lower.contains("coffee") {
        "coffee"
    } else if lower.contains("lunch") {
        "lunch"
    } else if lower.contains("sync") {
        "sync"
    } else {
        DEFAULT_DESCRIPTION
    };
    label.to_string()
}

fn terminated_phrase(words: &[&str]) -> Option<Vec<String>> {
    let mut names = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for raw in words {
        let word = trim_word(raw);
        if word.is_empty() {
            continue;
        }
        if is_terminator(word) {
            flush_name(&mut current, &mut names);
            return Some(names);
        }
        if word.eq_ignore_ascii_case("and") {
            flush_name(&mut current, &mut names);
            continue;
        }
        current.push(word);
        if raw.ends_with(',') {
            flush_name(&mut current, &mut names);
        }
    }

    None
}

fn flush_name(current: &mut Vec<&str>, names: &mut Vec<String>) {
    if !current.is_empty() {
        names.push(current.join(" "));
        current.clear();
    }
}

fn is_terminator(word: &str) -> bool {
    let lowered = word.to_lowercase();
    word.starts_with(|c: char| c.is_ascii_digit())
        || ATTENDEE_TERMINATORS.contains(&lowered.as_str())
        || WEEKDAYS.contains(&lowered.as_str())
        || TEMPORAL_WORDS.contains(&lowered.as_str())
        || is_known_city(word)
}

fn is_known_city(word: &str) -> bool {
    KNOWN_CITIES.iter().any(|city| city.eq_ignore_ascii_case(word))
}

fn is_capitalized_word(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase) && word.chars().all(char::is_alphabetic)
}

/// Strip surrounding punctuation, keeping inner characters like ':'.
pub(crate) fn trim_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Whole-word, already-lowercased phrase search.
pub(crate) fn contains_phrase(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(start, matched)| {
        let end = start + matched.len();
        let before_ok =
            haystack[..start].chars().next_back().map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..].chars().next().map_or(true, |c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn duration_units_convert_to_minutes() {
        assert_eq!(extract_duration("meet Alice 60min").map(|d| d.minutes), Some(60));
        assert_eq!(extract_duration("for 2 hours").map(|d| d.minutes), Some(120));
        assert_eq!(extract_duration("for 1.5h").map(|d| d.minutes), Some(90));
        assert_eq!(extract_duration("45 MINS sync").map(|d| d.minutes), Some(45));
        assert_eq!(extract_duration("Friday 2pm Taipei"), None);
    }

    #[test]
    fn duration_span_covers_the_phrase() {
        let text = "Friday 2pm 90 minutes";
        let found = extract_duration(text).unwrap();
        assert_eq!(&text[found.span], "90 minutes");
    }

    #[test]
    fn known_cities_match_whole_words_in_any_case() {
        assert_eq!(extract_city("friday 2pm new york", &[]), Some("New York".to_string()));
        assert_eq!(extract_city("Lunch in TOKYO", &[]), Some("Tokyo".to_string()));
        assert_eq!(extract_city("Friday 2pm Parisian cafe", &[]), Some("Parisian".to_string()));
    }

    #[test]
    fn unknown_city_falls_back_to_capitalized_word() {
        let attendees = names(&["Alice"]);
        assert_eq!(
            extract_city("Friday 2pm Kaohsiung meet Alice", &attendees),
            Some("Kaohsiung".to_string())
        );
    }

    #[test]
    fn city_fallback_skips_attendees_and_date_words() {
        let attendees = names(&["Alice"]);
        assert_eq!(extract_city("Friday Meet Alice Tomorrow", &attendees), None);
        assert_eq!(extract_city("meet bob at 3pm", &[]), None);
    }

    #[test]
    fn attendees_split_on_and_and_commas() {
        assert_eq!(extract_attendees("meet Alice and Bob tomorrow"), names(&["Alice", "Bob"]));
        assert_eq!(
            extract_attendees("Friday 2pm meet Alice, Bob and Carol 30min"),
            names(&["Alice", "Bob", "Carol"])
        );
    }

    #[test]
    fn attendee_phrase_stops_at_city() {
        assert_eq!(extract_attendees("meet Alice Taipei Friday"), names(&["Alice"]));
    }

    #[test]
    fn unterminated_phrase_uses_capitalized_run() {
        assert_eq!(extract_attendees("Friday 2pm Taipei meet Alice"), names(&["Alice"]));
        assert_eq!(extract_attendees("Friday 2pm Taipei meet the team"), names(&["Unknown"]));
    }

    #[test]
    fn lowercase_names_are_accepted_when_terminated() {
        assert_eq!(extract_attendees("meet bob at 3pm"), names(&["bob"]));
        assert_eq!(extract_attendees("coffee with Dana 10am"), names(&["Dana"]));
    }

    #[test]
    fn missing_attendees_yield_sentinel() {
        assert_eq!(extract_attendees("Friday 15:00 Taipei meeting 60min"), names(&["Unknown"]));
    }

    #[test]
    fn description_prefers_meeting_keyword() {
        assert_eq!(describe("meet Alice for coffee"), "meeting");
        assert_eq!(describe("Coffee with Dana"), "coffee");
        assert_eq!(describe("team lunch"), "lunch");
        assert_eq!(describe("weekly sync"), "sync");
        assert_eq!(describe("Friday 2pm Taipei"), "event");
    }

    #[test]
    fn phrase_search_respects_word_boundaries() {
        assert!(contains_phrase("see you in new york friday", "new york"));
        assert!(!contains_phrase("brainstorm", "rain"));
        assert!(contains_phrase("rain, maybe", "rain"));
    }
}
