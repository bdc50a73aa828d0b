// Interview question generation: one free-text completion, split line by line.

pub mod generator;
pub mod handlers;
pub mod prompts;
