//! Field Classifier — decides which profile attribute a control expects, or
//! that it wants generated free text.
//!
//! Rules are tried in order and the first matching rule wins, even when the
//! profile has no value for it (the control is then skipped). Specific rules
//! must precede generic ones: "first name" before the bare "name" rule.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::form::control::{ControlKind, FormControl};
use crate::models::profile::{Profile, ProfileAttribute};

/// Label/placeholder words that mark an open-ended question.
pub const LONG_ANSWER_CUES: &[&str] = &[
    "why",
    "about",
    "experience",
    "motivation",
    "describe",
    "summary",
    "cover",
    "statement",
    "bio",
    "yourself",
    "comments",
    "details",
];

/// Declared row counts above this mark a long-answer control.
const LONG_ANSWER_MIN_ROWS: u32 = 3;

const DOB_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Empty long-answer control: route to the generation client.
    Generate,
    /// Structured match. `value` may be empty when the profile lacks the attribute.
    Profile {
        attribute: ProfileAttribute,
        value: String,
    },
    NoMatch,
}

struct FieldRule {
    attribute: ProfileAttribute,
    pattern: Regex,
}

static FIELD_RULES: LazyLock<Vec<FieldRule>> = LazyLock::new(|| {
    use ProfileAttribute::*;
    [
        (Email, r"\bemail\b|e[-\s]?mail"),
        (FirstName, r"\bfirst.*name"),
        (LastName, r"\blast.*name"),
        (FullName, r"\bfull.*name|name\b"),
        (Phone, r"\bphone\b|mobile|tel|contact"),
        (Address, r"\baddress|street|location"),
        (City, r"\bcity|town"),
        (State, r"\bstate|region|province"),
        (Zip, r"\bzip|postal|pincode"),
        (Company, r"\bcompany|organization|organisation|employer"),
        (Role, r"\brole|position|title|job"),
        (Linkedin, r"\blinkedin"),
        (Github, r"\bgithub|portfolio|website"),
        (Gender, r"\bgender\b|sex\b"),
        (ShortBio, r"\bbio|about|summary|motivation"),
        (BirthDay, r"\b(day|dd)\b"),
        (BirthMonth, r"\b(month|mm)\b"),
        (BirthYear, r"\b(year|yyyy)\b"),
    ]
    .into_iter()
    .map(|(attribute, pattern)| FieldRule {
        attribute,
        pattern: Regex::new(pattern).expect("static field rule pattern"),
    })
    .collect()
});

/// Classifies one control against the profile.
pub fn classify(control: &FormControl, profile: &Profile) -> Classification {
    if is_long_answer(control) && control.is_blank() {
        return Classification::Generate;
    }
    match_profile(control, profile)
}

/// Structured pattern match only, ignoring the long-answer route.
pub fn match_profile(control: &FormControl, profile: &Profile) -> Classification {
    let haystack = haystack(control);
    FIELD_RULES
        .iter()
        .filter(|rule| rule.pattern.is_match(&haystack))
        .find_map(|rule| {
            resolve(rule.attribute, profile).map(|value| Classification::Profile {
                attribute: rule.attribute,
                value,
            })
        })
        .unwrap_or(Classification::NoMatch)
}

/// True for text areas, controls declaring more than three rows, and controls
/// whose label or placeholder reads like an open-ended question.
pub fn is_long_answer(control: &FormControl) -> bool {
    if control.kind == ControlKind::TextArea {
        return true;
    }
    if control.rows.is_some_and(|r| r > LONG_ANSWER_MIN_ROWS) {
        return true;
    }
    let text = format!("{} {}", control.label_text(), control.placeholder_text()).to_lowercase();
    LONG_ANSWER_CUES.iter().any(|cue| text.contains(cue))
}

/// Normalized text describing a control: name, id, placeholder, label and
/// accessible name, lower-cased, with everything outside `[a-z0-9\s]` blanked.
pub fn haystack(control: &FormControl) -> String {
    let parts = [
        control.name.as_deref().unwrap_or(""),
        control.id.as_deref().unwrap_or(""),
        control.placeholder_text(),
        control.label_text(),
        control.aria_label.as_deref().unwrap_or(""),
    ];
    parts
        .join(" ")
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// `None` means the rule does not apply (date parts without a usable dob).
fn resolve(attribute: ProfileAttribute, profile: &Profile) -> Option<String> {
    match attribute {
        ProfileAttribute::FullName => Some(profile.full_name()),
        ProfileAttribute::BirthDay => birth_date(profile).map(|d| d.day().to_string()),
        ProfileAttribute::BirthMonth => birth_date(profile).map(|d| d.format("%B").to_string()),
        ProfileAttribute::BirthYear => birth_date(profile).map(|d| format!("{:04}", d.year())),
        other => Some(profile.value_of(other).to_string()),
    }
}

fn birth_date(profile: &Profile) -> Option<NaiveDate> {
    let dob = profile.dob.trim();
    if dob.is_empty() {
        return None;
    }
    DOB_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(dob, fmt).ok())
}
