// Prompt template for long-answer form fields.

use crate::models::profile::Profile;

/// Question text used when a control has neither label nor placeholder.
pub const FALLBACK_QUESTION: &str = "Write a professional answer";

pub const LONG_ANSWER_PROMPT_TEMPLATE: &str = r#"
You are a helpful AI assistant writing short, natural, professional answers for form fields.
Question: "{question}"
User profile: {profile}
Write a short professional response."#;

pub fn build_long_answer_prompt(question: &str, profile: &Profile) -> String {
    LONG_ANSWER_PROMPT_TEMPLATE
        .replace("{profile}", &profile.to_prompt_json())
        .replace("{question}", question)
}
