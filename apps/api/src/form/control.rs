/// Input types that are never autofilled.
pub const NON_FILLABLE_TYPES: &[&str] = &["hidden", "submit", "button", "reset", "file", "password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Input,
    TextArea,
    Select,
    /// Element with `contenteditable="true"`.
    ContentEditable,
}

/// Notifications a control emits when written, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    Focus,
    Input,
    Change,
    Blur,
}

/// Where a control's label text came from. Only the first satisfied rule applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSource {
    ForAttribute(String),
    Ancestor(String),
    Sibling(String),
    Placeholder(String),
    None,
}

impl LabelSource {
    pub fn text(&self) -> &str {
        match self {
            LabelSource::ForAttribute(t)
            | LabelSource::Ancestor(t)
            | LabelSource::Sibling(t)
            | LabelSource::Placeholder(t) => t,
            LabelSource::None => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
}

/// One fillable element captured from a page snapshot.
#[derive(Debug, Clone)]
pub struct FormControl {
    /// Position in document order among the page's candidate controls.
    pub index: usize,
    pub kind: ControlKind,
    /// Lower-cased type: `text` for untyped inputs, `textarea`, `select-one`, or empty for editable regions.
    pub input_type: String,
    pub name: Option<String>,
    pub id: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub rows: Option<u32>,
    pub label: LabelSource,
    pub value: String,
    pub options: Vec<SelectOption>,
    pub selected: Option<usize>,
    pub focused: bool,
    pub events: Vec<DomEvent>,
}

impl FormControl {
    pub fn new(index: usize, kind: ControlKind) -> Self {
        let input_type = match kind {
            ControlKind::Input => "text",
            ControlKind::TextArea => "textarea",
            ControlKind::Select => "select-one",
            ControlKind::ContentEditable => "",
        };
        Self {
            index,
            kind,
            input_type: input_type.to_string(),
            name: None,
            id: None,
            placeholder: None,
            aria_label: None,
            rows: None,
            label: LabelSource::None,
            value: String::new(),
            options: Vec::new(),
            selected: None,
            focused: false,
            events: Vec::new(),
        }
    }

    pub fn label_text(&self) -> &str {
        self.label.text()
    }

    pub fn placeholder_text(&self) -> &str {
        self.placeholder.as_deref().unwrap_or("")
    }

    /// The control's current value: the selected option's value for selects.
    pub fn current_value(&self) -> &str {
        match self.kind {
            ControlKind::Select => self
                .selected
                .and_then(|i| self.options.get(i))
                .map(|o| o.value.as_str())
                .unwrap_or(""),
            _ => &self.value,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.current_value().trim().is_empty()
    }

    pub fn is_fillable_type(&self) -> bool {
        !NON_FILLABLE_TYPES.contains(&self.input_type.as_str())
    }

    pub(crate) fn emit(&mut self, events: &[DomEvent]) {
        self.events.extend_from_slice(events);
    }
}
