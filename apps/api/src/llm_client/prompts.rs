// Shared prompt constants for the generation client.
// The fill pass builds its per-field prompts in form::prompts.

/// System instruction sent with every completion request.
pub const FORM_FIELD_SYSTEM: &str = "You are a helpful assistant that writes concise, \
natural, professional responses for form fields.";
