// Résumé feedback: three chained completions (feedback → rewrite → persona
// rewrite), then an optional insert into `resume_feedback`.

pub mod handlers;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod store;
