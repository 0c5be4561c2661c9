//! Label-text resolution for a form control.
//!
//! Rules, first satisfied wins: `label[for=<id>]`, nearest enclosing `label`,
//! a text-bearing previous sibling, the placeholder, nothing.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::form::control::LabelSource;

/// Previous-sibling tags whose text is taken as a label.
const SIBLING_LABEL_TAGS: &[&str] = &["label", "div", "span", "p", "strong"];

static LABEL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("label").expect("static label selector"));

pub fn resolve_label(element: ElementRef<'_>, document: &Html) -> LabelSource {
    by_for_attribute(element, document)
        .map(LabelSource::ForAttribute)
        .or_else(|| by_ancestor(element).map(LabelSource::Ancestor))
        .or_else(|| by_sibling(element).map(LabelSource::Sibling))
        .or_else(|| by_placeholder(element).map(LabelSource::Placeholder))
        .unwrap_or(LabelSource::None)
}

fn by_for_attribute(element: ElementRef<'_>, document: &Html) -> Option<String> {
    let id = element.value().attr("id").filter(|id| !id.is_empty())?;
    // Only the first associated label is consulted, as a `querySelector` lookup would.
    let label = document
        .select(&LABEL_SELECTOR)
        .find(|label| label.value().attr("for") == Some(id))?;
    non_empty_text(label)
}

fn by_ancestor(element: ElementRef<'_>) -> Option<String> {
    // `closest` semantics: the element itself counts.
    let label = std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|el| el.value().name() == "label")?;
    non_empty_text(label)
}

fn by_sibling(element: ElementRef<'_>) -> Option<String> {
    let prev = element.prev_siblings().find_map(ElementRef::wrap)?;
    if SIBLING_LABEL_TAGS.contains(&prev.value().name()) {
        Some(text_of(prev).trim().to_string())
    } else {
        None
    }
}

fn by_placeholder(element: ElementRef<'_>) -> Option<String> {
    element
        .value()
        .attr("placeholder")
        .filter(|p| !p.is_empty())
        .map(|p| p.trim().to_string())
}

fn non_empty_text(element: ElementRef<'_>) -> Option<String> {
    let text = text_of(element);
    if text.is_empty() {
        None
    } else {
        Some(text.trim().to_string())
    }
}

pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
