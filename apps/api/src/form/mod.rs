// Form filling engine: page snapshot → classification → fill, plus the HTTP
// handlers for the "fill this page" and "generate text" messages.
// All generation goes through llm_client::TextGenerator.

pub mod classifier;
pub mod control;
pub mod document;
pub mod filler;
pub mod handlers;
pub mod labels;
pub mod orchestrator;
pub mod prompts;
