//! Fill Orchestrator — one sequential pass over a page's controls.
//!
//! Empty long-answer controls are answered by the text generator, one request
//! at a time. Everything else goes through the classifier and the filler.
//! Only structured fills count toward `FillReport::filled`.

use serde::Serialize;
use tracing::{error, info};

use crate::form::classifier::{classify, Classification};
use crate::form::control::FormControl;
use crate::form::document::FormPage;
use crate::form::filler::fill;
use crate::form::prompts::{build_long_answer_prompt, FALLBACK_QUESTION};
use crate::llm_client::{TextGenerator, NO_RESPONSE};
use crate::models::profile::{Profile, ProfileAttribute};

/// Written into a long-answer control while its answer is being generated.
pub const GENERATING_PLACEHOLDER: &str = "⏳ Generating answer with AI...";
/// Written when the generator could not be reached at all.
pub const GENERATION_FAILED: &str = "⚠️ AI generation failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FillSource {
    Profile,
    Generated,
}

/// One control the pass wrote, with its final value.
#[derive(Debug, Clone, Serialize)]
pub struct FilledField {
    pub index: usize,
    pub name: Option<String>,
    pub id: Option<String>,
    pub value: String,
    pub source: FillSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<ProfileAttribute>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct FillReport {
    /// Controls filled from the profile. Generated answers are not counted.
    pub filled: usize,
    pub fields: Vec<FilledField>,
}

/// Fills every control on `page` from `profile`, visiting each control once.
pub async fn fill_with_profile(
    page: &mut FormPage,
    profile: &Profile,
    generator: &dyn TextGenerator,
) -> FillReport {
    let mut report = FillReport::default();

    for control in page.controls.iter_mut() {
        match classify(control, profile) {
            Classification::Generate => {
                if answer_long_question(control, profile, generator).await {
                    report.fields.push(filled_field(control, FillSource::Generated, None));
                }
            }
            Classification::Profile { attribute, value } => {
                if fill(control, &value) {
                    report.filled += 1;
                    report
                        .fields
                        .push(filled_field(control, FillSource::Profile, Some(attribute)));
                }
            }
            Classification::NoMatch => {}
        }
    }

    info!(
        "Fill pass complete: {} structured, {} total written",
        report.filled,
        report.fields.len()
    );
    report
}

/// Writes the placeholder, awaits the generator, then overwrites with the answer.
async fn answer_long_question(
    control: &mut FormControl,
    profile: &Profile,
    generator: &dyn TextGenerator,
) -> bool {
    let question = question_for(control).to_string();
    let prompt = build_long_answer_prompt(&question, profile);

    fill(control, GENERATING_PLACEHOLDER);
    let answer = match generator.generate_text(&prompt).await {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => NO_RESPONSE.to_string(),
        Err(e) => {
            error!("Generation failed for '{question}': {e:?}");
            GENERATION_FAILED.to_string()
        }
    };

    let written = fill(control, &answer);
    if written {
        info!("Generated answer written for '{question}'");
    }
    written
}

fn question_for(control: &FormControl) -> &str {
    [control.label_text(), control.placeholder_text()]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or(FALLBACK_QUESTION)
}

fn filled_field(
    control: &FormControl,
    source: FillSource,
    attribute: Option<ProfileAttribute>,
) -> FilledField {
    FilledField {
        index: control.index,
        name: control.name.clone(),
        id: control.id.clone(),
        value: control.current_value().to_string(),
        source,
        attribute,
    }
}
