// Interview question generation.
// Prompt building, settings profiles, completion mapping, response parsing.
// All completion calls go through llm_client — no direct HTTP calls here.

pub mod adapter;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod random;
pub mod settings;
pub mod shuffle;
