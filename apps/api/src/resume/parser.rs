//! Résumé text parser — best-effort extraction of profile attributes from OCR text.
//!
//! Pure pattern matching; nothing here calls out. Attributes that cannot be
//! found are left empty (address, city, state, zip, gender and dob always are).

use std::sync::LazyLock;

use regex::Regex;

use crate::models::profile::Profile;

/// Characters kept for the fallback bio starting at "summary".
const FALLBACK_BIO_CHARS: usize = 300;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-z]{2,}").expect("email pattern"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\d[\d\s\-]{7,15}").expect("phone pattern"));

static LINKEDIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"linkedin\.com/in/[A-Za-z0-9_-]+").expect("linkedin pattern"));

static GITHUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/[A-Za-z0-9_-]+").expect("github pattern"));

static ROLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(Engineer|Developer|Manager|Intern|Designer|Analyst|Consultant|Architect|Lead|Director)\b",
    )
    .expect("role pattern")
});

static COMPANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:at|@)\s+([A-Z][A-Za-z0-9&\s]+)").expect("company pattern"));

static SUMMARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:summary|about|objective|profile)\s*[:\-]?\s*([\s\S]{10,300}?)(?:\n\n|\n[A-Z])",
    )
    .expect("summary pattern")
});

pub fn parse_resume_text(text: &str) -> Profile {
    let mut profile = Profile {
        email: first_match(&EMAIL, text),
        phone: first_match(&PHONE, text).trim().to_string(),
        linkedin: first_match(&LINKEDIN, text),
        github: first_match(&GITHUB, text),
        role: first_match(&ROLE, text),
        ..Default::default()
    };

    // First non-empty line is taken to be the candidate's name.
    let name_line = text
        .split(['\n', '\r'])
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let mut parts = name_line.split_whitespace();
    profile.first_name = parts.next().unwrap_or("").to_string();
    profile.last_name = parts.collect::<Vec<_>>().join(" ");

    profile.company = COMPANY
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    profile.short_bio = extract_bio(text);
    profile
}

fn first_match(pattern: &Regex, text: &str) -> String {
    pattern
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_bio(text: &str) -> String {
    if let Some(section) = SUMMARY.captures(text).and_then(|c| c.get(1)) {
        return section.as_str().trim().to_string();
    }
    // ASCII lower-casing keeps byte offsets aligned with `text`.
    match text.to_ascii_lowercase().find("summary") {
        Some(start) => text[start..]
            .chars()
            .take(FALLBACK_BIO_CHARS)
            .collect::<String>()
            .trim()
            .to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Ada King Lovelace\n\
        ada.lovelace@example.com | +44 20 7946 0958\n\
        linkedin.com/in/ada-lovelace | github.com/adal\n\
        Summary: Mathematician writing programs for the Analytical Engine since 1843.\n\
        Experience\n\
        Lead Programmer at Analytical Engines Ltd\n";

    #[test]
    fn test_contact_details() {
        let p = parse_resume_text(SAMPLE_RESUME);
        assert_eq!(p.email, "ada.lovelace@example.com");
        assert_eq!(p.phone, "+44 20 7946 0958");
        assert_eq!(p.linkedin, "linkedin.com/in/ada-lovelace");
        assert_eq!(p.github, "github.com/adal");
    }

    #[test]
    fn test_name_from_first_line() {
        let p = parse_resume_text(SAMPLE_RESUME);
        assert_eq!(p.first_name, "Ada");
        assert_eq!(p.last_name, "King Lovelace");
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let p = parse_resume_text("\r\n   \nGrace Hopper\nAdmiral");
        assert_eq!(p.first_name, "Grace");
        assert_eq!(p.last_name, "Hopper");
    }

    #[test]
    fn test_role_and_company() {
        let p = parse_resume_text(SAMPLE_RESUME);
        assert_eq!(p.role, "Lead");
        assert_eq!(p.company, "Analytical Engines Ltd");
    }

    #[test]
    fn test_role_is_case_insensitive() {
        let p = parse_resume_text("Jo Bloggs\nsenior software engineer");
        assert_eq!(p.role, "engineer");
    }

    #[test]
    fn test_summary_section() {
        let p = parse_resume_text(SAMPLE_RESUME);
        assert_eq!(
            p.short_bio,
            "Mathematician writing programs for the Analytical Engine since 1843."
        );
    }

    #[test]
    fn test_summary_fallback_slice() {
        // No terminating line break, so only the fallback applies.
        let text = "Jo Bloggs\nsummary of things I have done";
        let p = parse_resume_text(text);
        assert_eq!(p.short_bio, "summary of things I have done");
    }

    #[test]
    fn test_unknown_fields_stay_empty() {
        let p = parse_resume_text(SAMPLE_RESUME);
        assert!(p.address.is_empty());
        assert!(p.city.is_empty());
        assert!(p.state.is_empty());
        assert!(p.zip.is_empty());
        assert!(p.gender.is_empty());
        assert!(p.dob.is_empty());
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_resume_text("").is_empty());
    }
}
