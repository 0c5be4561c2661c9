//! Value Filler — writes a resolved value into a control and records the
//! notifications host page code would observe.

use tracing::debug;

use crate::form::control::{ControlKind, DomEvent, FormControl};

const MALE_SYNONYMS: &[&str] = &["m", "man", "male"];
const FEMALE_SYNONYMS: &[&str] = &["f", "woman", "female"];
const OTHER_SYNONYMS: &[&str] = &[
    "other",
    "others",
    "prefer not to say",
    "non-binary",
    "not specified",
    "not willing to disclose",
];

/// Writes `value` into `control`. Returns true iff a value was actually written.
pub fn fill(control: &mut FormControl, value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    match control.kind {
        ControlKind::Select => fill_select(control, value),
        ControlKind::Input | ControlKind::TextArea => {
            if !control.is_fillable_type() {
                debug!(
                    "Skipping control #{} of type '{}'",
                    control.index, control.input_type
                );
                return false;
            }
            control.focused = true;
            control.value = value.to_string();
            control.emit(&[DomEvent::Focus, DomEvent::Input, DomEvent::Change, DomEvent::Blur]);
            true
        }
        ControlKind::ContentEditable => {
            control.focused = true;
            control.value = value.to_string();
            control.emit(&[DomEvent::Focus, DomEvent::Input, DomEvent::Change]);
            true
        }
    }
}

/// Selects the option matching `value`: exact option value, then gender
/// synonyms (gender dropdowns only), then a substring of the option text.
fn fill_select(control: &mut FormControl, value: &str) -> bool {
    let wanted = value.to_lowercase();

    let by_value = || {
        control
            .options
            .iter()
            .position(|o| !o.value.is_empty() && o.value.to_lowercase() == wanted)
    };
    let by_gender = || {
        if !is_gender_select(control) {
            return None;
        }
        control
            .options
            .iter()
            .position(|o| matches_gender_option(&o.text, value) || matches_gender_option(&o.value, value))
    };
    let by_text = || {
        control
            .options
            .iter()
            .position(|o| !o.text.is_empty() && o.text.to_lowercase().contains(&wanted))
    };

    let Some(matched) = by_value().or_else(by_gender).or_else(by_text) else {
        return false;
    };

    // Assigning by value selects the first option carrying that value.
    let chosen_value = control.options[matched].value.clone();
    let index = control
        .options
        .iter()
        .position(|o| o.value == chosen_value)
        .unwrap_or(matched);

    control.selected = Some(index);
    control.value = chosen_value;
    control.emit(&[DomEvent::Input, DomEvent::Change, DomEvent::Blur]);
    true
}

fn is_gender_select(control: &FormControl) -> bool {
    let contains_gender = |s: &str| s.to_lowercase().contains("gender");
    control.name.as_deref().is_some_and(contains_gender)
        || control.id.as_deref().is_some_and(contains_gender)
        || contains_gender(control.label_text())
}

/// Whether an option's text (or value) stands for the profile's gender.
pub fn matches_gender_option(option_text: &str, gender: &str) -> bool {
    let text = option_text.trim().to_lowercase();
    let gender = gender.trim().to_lowercase();

    if text == gender {
        return true;
    }
    let synonyms = match gender.as_str() {
        "male" => MALE_SYNONYMS,
        "female" => FEMALE_SYNONYMS,
        "other" => OTHER_SYNONYMS,
        _ => return false,
    };
    synonyms.contains(&text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::control::{LabelSource, SelectOption};

    fn text_input(input_type: &str) -> FormControl {
        let mut c = FormControl::new(0, ControlKind::Input);
        c.input_type = input_type.to_string();
        c.value = "original".to_string();
        c
    }

    fn select(name: &str, options: &[(&str, &str)]) -> FormControl {
        let mut c = FormControl::new(0, ControlKind::Select);
        c.name = Some(name.to_string());
        c.options = options
            .iter()
            .map(|(value, text)| SelectOption {
                value: value.to_string(),
                text: text.to_string(),
            })
            .collect();
        c.selected = Some(0);
        c
    }

    #[test]
    fn test_empty_value_is_noop() {
        let mut c = text_input("text");
        assert!(!fill(&mut c, ""));
        assert_eq!(c.value, "original");
        assert!(c.events.is_empty());
    }

    #[test]
    fn test_never_fills_excluded_types() {
        for t in ["hidden", "submit", "button", "reset", "file", "password"] {
            let mut c = text_input(t);
            assert!(!fill(&mut c, "secret"), "type {t}");
            assert_eq!(c.value, "original");
            assert!(c.events.is_empty());
        }
    }

    #[test]
    fn test_text_input_events_in_order() {
        let mut c = text_input("email");
        assert!(fill(&mut c, "ada@example.com"));
        assert_eq!(c.value, "ada@example.com");
        assert!(c.focused);
        assert_eq!(
            c.events,
            vec![DomEvent::Focus, DomEvent::Input, DomEvent::Change, DomEvent::Blur]
        );
    }

    #[test]
    fn test_textarea_overwrites_verbatim() {
        let mut c = FormControl::new(0, ControlKind::TextArea);
        c.value = "old".to_string();
        assert!(fill(&mut c, "  new text  "));
        assert_eq!(c.value, "  new text  ");
    }

    #[test]
    fn test_content_editable_has_no_blur() {
        let mut c = FormControl::new(0, ControlKind::ContentEditable);
        assert!(fill(&mut c, "Hello"));
        assert_eq!(c.current_value(), "Hello");
        assert_eq!(
            c.events,
            vec![DomEvent::Focus, DomEvent::Input, DomEvent::Change]
        );
    }

    #[test]
    fn test_select_exact_value_case_insensitive() {
        let mut c = select("state", &[("", "Pick"), ("ca", "California"), ("ny", "New York")]);
        assert!(fill(&mut c, "NY"));
        assert_eq!(c.selected, Some(2));
        assert_eq!(c.current_value(), "ny");
        assert_eq!(c.events, vec![DomEvent::Input, DomEvent::Change, DomEvent::Blur]);
    }

    #[test]
    fn test_select_text_substring() {
        let mut c = select("birth_month", &[("", "Month"), ("6", "June"), ("7", "July")]);
        assert!(fill(&mut c, "July"));
        assert_eq!(c.current_value(), "7");
    }

    #[test]
    fn test_select_no_match_leaves_selection() {
        let mut c = select("country", &[("fr", "France"), ("de", "Germany")]);
        assert!(!fill(&mut c, "Atlantis"));
        assert_eq!(c.selected, Some(0));
        assert!(c.events.is_empty());
    }

    #[test]
    fn test_gender_synonyms_for_every_profile_value() {
        let cases = [
            (" MALE ", "Man", "m"),
            ("female", "Woman", "w"),
            ("Female", "F", "x"),
            ("other", "Prefer not to say", "pns"),
            ("OTHER ", "Non-binary", "nb"),
        ];
        for (gender, option_text, option_value) in cases {
            let mut c = select(
                "applicant_gender",
                &[("", "Select"), ("zz", "Unrelated"), (option_value, option_text)],
            );
            assert!(fill(&mut c, gender), "gender {gender:?}");
            assert_eq!(c.selected, Some(2), "gender {gender:?}");
        }
    }

    #[test]
    fn test_gender_matches_option_value() {
        let mut c = select("gender", &[("", "Select"), ("male", "Option A"), ("female", "Option B")]);
        assert!(fill(&mut c, "Female"));
        assert_eq!(c.current_value(), "female");
    }

    #[test]
    fn test_gender_select_detected_through_label() {
        let mut c = select("q7", &[("", "Select"), ("1", "M"), ("2", "F")]);
        c.label = LabelSource::Ancestor("Gender identity".to_string());
        assert!(fill(&mut c, "male"));
        assert_eq!(c.current_value(), "1");
    }

    #[test]
    fn test_non_gender_select_uses_substring_only() {
        // Without the gender hint, "male" is found inside "Female".
        let mut c = select("sex", &[("", "Select"), ("f", "Female"), ("m", "Male")]);
        assert!(fill(&mut c, "male"));
        assert_eq!(c.current_value(), "f");
    }

    #[test]
    fn test_matches_gender_option_table() {
        assert!(matches_gender_option("M", "male"));
        assert!(matches_gender_option(" not specified ", "Other"));
        assert!(matches_gender_option("Agender", "agender"));
        assert!(!matches_gender_option("woman", "male"));
        assert!(!matches_gender_option("m", "unknown"));
    }
}
