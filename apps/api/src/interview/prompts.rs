// Prompt text for interview answer analysis.

use crate::interview::models::AnswerDispatch;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// Output contract described to the model. Mirrors `validation::RawAnalysis`.
pub const ANALYSIS_SCHEMA: &str = r#"{
  "score": integer 0-100,
  "timeMs": integer >= 0 (answer duration in milliseconds, 0 if unknown),
  "fluency": integer 1-5,
  "contentDepth": integer 1-5,
  "structure": integer 1-5,
  "fillerCount": integer >= 0 (number of filler words such as "um", "uh"),
  "improvements": [string, ...],
  "strengths": [string, ...],
  "risks": [string, ...]
}"#;

pub fn analysis_system_prompt(dispatch: &AnswerDispatch) -> String {
    format!(
        "You are an interview evaluation expert for the '{job}' role. \
        Evaluate the candidate's answer using the question, the answer transcript, \
        and the candidate's original résumé text. \
        The result MUST follow this JSON schema exactly:\n{ANALYSIS_SCHEMA}\n\n{JSON_ONLY_INSTRUCTION}",
        job = dispatch.meta.job_applied,
    )
}

pub fn analysis_user_prompt(dispatch: &AnswerDispatch) -> String {
    let mut prompt = format!(
        "--- Evaluation request ---\n\
        Résumé (original): {resume}\n\
        Question: {question}\n\
        Answer (transcript): {transcript}\n",
        resume = dispatch.resume_content,
        question = dispatch.question_text,
        transcript = dispatch.transcript,
    );
    if let Some(duration_ms) = dispatch.duration_ms {
        prompt.push_str(&format!("Elapsed time (ms): {duration_ms}\n"));
    }
    prompt.push_str(
        "\nEvaluate the answer above and output the result as JSON only, matching the schema.",
    );
    prompt
}
