// Prompt text for interview question generation.

use crate::llm_client::prompts::ONE_PER_LINE_INSTRUCTION;

pub const QUESTION_SYSTEM: &str =
    "You are an AI that writes interview questions from a candidate's major, \
    target job, and cover letter.";

/// Questions requested when a cover letter is supplied: deep-dive + competency.
pub const COVER_LETTER_QUESTIONS: usize = 4;
pub const COMPETENCY_QUESTIONS: usize = 3;
/// Questions requested without a cover letter.
pub const GENERAL_QUESTIONS: usize = 5;

pub fn question_prompt(major: &str, job_title: &str, cover_letter: Option<&str>) -> String {
    let mut prompt = format!(
        "You are a professional interviewer. Assume the candidate graduated in **{major}** \
        and is applying for the **{job_title}** position.\n"
    );

    match cover_letter.map(str::trim).filter(|c| !c.is_empty()) {
        Some(cover_letter) => prompt.push_str(&format!(
            "Using the cover letter below, write {COVER_LETTER_QUESTIONS} in-depth questions about \
            the cover letter plus {COMPETENCY_QUESTIONS} job-competency questions, {total} questions in total.\n\n\
            --- Cover letter ---\n{cover_letter}\n--- Cover letter ---\n",
            total = COVER_LETTER_QUESTIONS + COMPETENCY_QUESTIONS,
        )),
        None => prompt.push_str(&format!(
            "Write {GENERAL_QUESTIONS} professional interview questions to evaluate this candidate.\n"
        )),
    }

    prompt.push('\n');
    prompt.push_str(ONE_PER_LINE_INSTRUCTION);
    prompt
}
