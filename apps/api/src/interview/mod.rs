// Interview answer analysis: one provider call per answer, JSON output
// checked against a fixed schema before it is returned.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;
