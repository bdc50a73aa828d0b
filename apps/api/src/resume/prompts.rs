// Prompt text for the résumé feedback pipeline.
//
// Stage 2 and 3 prompts embed the stage 1 feedback verbatim, followed by the
// original résumé.

use crate::resume::models::Persona;

pub const FEEDBACK_SYSTEM: &str = "You are a senior recruiter and career coach who reviews résumés. \
    Give specific, actionable feedback: what works, what is missing, \
    which claims need numbers, and how the layout and wording can improve. \
    Organize the feedback under short headings. Do not rewrite the résumé.";

pub const REWRITE_SYSTEM: &str = "You are a professional résumé writer. \
    Rewrite the résumé so that it addresses every point of the feedback. \
    Keep every fact from the original; never invent employers, dates, degrees, or numbers. \
    Return only the rewritten résumé text.";

pub const PERSONA_SYSTEM: &str = "You are a professional résumé writer who tailors résumés \
    to a specific organization's culture. \
    Rewrite the résumé so that it addresses the feedback and foregrounds the experience \
    that reflects the organization's stated values. \
    Keep every fact from the original; never invent employers, dates, degrees, or numbers. \
    Return only the rewritten résumé text.";

pub fn feedback_prompt(resume: &str) -> String {
    format!("Here is the résumé submitted by the user:\n\n{resume}")
}

pub fn rewrite_prompt(feedback: &str, resume: &str) -> String {
    format!(
        "--- Feedback ---\n{feedback}\n--- Feedback ---\n\n\
        --- Original résumé ---\n{resume}\n--- Original résumé ---\n\n\
        Rewrite the résumé applying the feedback."
    )
}

pub fn persona_prompt(feedback: &str, resume: &str, persona: &Persona) -> String {
    let values = match &persona.values {
        Some(values) => format!("{}'s stated values: {values}", persona.company),
        None => format!(
            "Use the publicly stated values and talent profile of {}.",
            persona.company
        ),
    };
    format!(
        "Target organization: {company}\n{values}\n\n\
        --- Feedback ---\n{feedback}\n--- Feedback ---\n\n\
        --- Original résumé ---\n{resume}\n--- Original résumé ---\n\n\
        Rewrite the résumé for {company}, applying the feedback.",
        company = persona.company,
    )
}
