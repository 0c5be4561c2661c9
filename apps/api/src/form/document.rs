//! Page snapshot: parses form markup into an owned list of fillable controls.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::form::control::{ControlKind, FormControl, SelectOption};
use crate::form::labels::{resolve_label, text_of};

/// Every element the fill pass considers, in document order.
const CANDIDATE_SELECTOR: &str = r#"input, textarea, select, [contenteditable="true"][role="textbox"], [aria-label][contenteditable="true"]"#;

static CANDIDATES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CANDIDATE_SELECTOR).expect("static candidate selector"));

static OPTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("option").expect("static option selector"));

#[derive(Debug, Clone, Default)]
pub struct FormPage {
    pub controls: Vec<FormControl>,
}

impl FormPage {
    /// Parses `html` and captures every candidate control.
    /// The parsed DOM is dropped before returning so the page can cross await points.
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);
        let controls: Vec<FormControl> = document
            .root_element()
            .select(&CANDIDATES)
            .enumerate()
            .map(|(index, element)| capture_control(index, element, &document))
            .collect();

        debug!("Captured {} candidate controls", controls.len());
        Self { controls }
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

fn capture_control(index: usize, element: ElementRef<'_>, document: &Html) -> FormControl {
    let el = element.value();
    let kind = match el.name() {
        "input" => ControlKind::Input,
        "textarea" => ControlKind::TextArea,
        "select" => ControlKind::Select,
        _ => ControlKind::ContentEditable,
    };

    let mut control = FormControl::new(index, kind);
    control.name = el.attr("name").map(String::from);
    control.id = el.attr("id").map(String::from);
    control.placeholder = el.attr("placeholder").map(String::from);
    control.aria_label = el.attr("aria-label").map(String::from);
    control.rows = el.attr("rows").and_then(|r| r.trim().parse().ok());
    control.label = resolve_label(element, document);

    match kind {
        ControlKind::Input => {
            if let Some(t) = el.attr("type").map(|t| t.trim().to_lowercase()) {
                if !t.is_empty() {
                    control.input_type = t;
                }
            }
            control.value = el.attr("value").unwrap_or_default().to_string();
        }
        ControlKind::TextArea | ControlKind::ContentEditable => {
            control.value = text_of(element);
        }
        ControlKind::Select => {
            let mut selected = None;
            for (i, option) in element.select(&OPTIONS).enumerate() {
                let text = collapse_whitespace(&text_of(option));
                let value = option
                    .value()
                    .attr("value")
                    .map(String::from)
                    .unwrap_or_else(|| text.clone());
                if option.value().attr("selected").is_some() {
                    selected = Some(i);
                }
                control.options.push(SelectOption { value, text });
            }
            control.selected = selected.or(if control.options.is_empty() {
                None
            } else {
                Some(0)
            });
        }
    }

    control
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
