//! Résumé feedback pipeline.
//!
//! Flow: feedback(resume) → rewrite(feedback, resume) → persona(feedback, resume).
//!
//! Stages run strictly in sequence. Stages 2 and 3 consume stage 1's output,
//! so neither is issued until the feedback text exists. Any stage failing
//! aborts the pipeline; later stages are not attempted.

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{ChatCompletion, ChatMessage, ChatRequest};
use crate::resume::models::{Persona, ResumeFeedback};
use crate::resume::prompts::{
    feedback_prompt, persona_prompt, rewrite_prompt, FEEDBACK_SYSTEM, PERSONA_SYSTEM,
    REWRITE_SYSTEM,
};

const RESUME_TEMPERATURE: f32 = 0.7;

fn request(system: &str, user: String) -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        temperature: RESUME_TEMPERATURE,
        response_format: None,
    }
}

pub fn feedback_request(resume: &str) -> ChatRequest {
    request(FEEDBACK_SYSTEM, feedback_prompt(resume))
}

pub fn rewrite_request(feedback: &str, resume: &str) -> ChatRequest {
    request(REWRITE_SYSTEM, rewrite_prompt(feedback, resume))
}

pub fn persona_request(feedback: &str, resume: &str, persona: &Persona) -> ChatRequest {
    request(PERSONA_SYSTEM, persona_prompt(feedback, resume, persona))
}

pub async fn run_feedback_pipeline(
    llm: &dyn ChatCompletion,
    resume: &str,
    persona: &Persona,
) -> Result<ResumeFeedback, AppError> {
    let feedback = llm.complete(&feedback_request(resume)).await?;
    info!("Résumé stage 1/3 (feedback) complete");

    let rewritten_resume = llm.complete(&rewrite_request(&feedback, resume)).await?;
    info!("Résumé stage 2/3 (rewrite) complete");

    let persona_resume = llm
        .complete(&persona_request(&feedback, resume, persona))
        .await?;
    info!(company = %persona.company, "Résumé stage 3/3 (persona rewrite) complete");

    Ok(ResumeFeedback {
        feedback,
        rewritten_resume,
        persona_resume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubChat;

    const RESUME: &str = "Jane Doe\nBackend Engineer, Acme (2021-2024)\n- Built billing service";

    fn persona() -> Persona {
        Persona {
            company: "Acme".to_string(),
            values: Some("Customer first; bias for action.".to_string()),
        }
    }

    fn stub() -> StubChat {
        StubChat::replying([
            "FEEDBACK: add metrics to the billing bullet",
            "REWRITE: Built billing service processing $3M/month",
            "PERSONA: Customer-first billing service",
        ])
    }

    #[tokio::test]
    async fn test_stages_run_in_order_and_chain_feedback() {
        let llm = stub();
        let result = run_feedback_pipeline(&llm, RESUME, &persona()).await.unwrap();

        assert_eq!(
            result.feedback,
            "FEEDBACK: add metrics to the billing bullet"
        );
        assert_eq!(
            result.rewritten_resume,
            "REWRITE: Built billing service processing $3M/month"
        );
        assert_eq!(
            result.persona_resume,
            "PERSONA: Customer-first billing service"
        );

        let requests = llm.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], feedback_request(RESUME));
        assert!(!requests[0].messages[1].content.contains("FEEDBACK:"));
        for later in &requests[1..] {
            let user = &later.messages[1].content;
            assert!(user.contains("FEEDBACK: add metrics to the billing bullet"));
            assert!(user.contains(RESUME));
        }
        assert!(requests[2].messages[1].content.contains("bias for action"));
    }

    #[tokio::test]
    async fn test_chaining_is_identical_across_runs() {
        let first = stub();
        let second = stub();
        run_feedback_pipeline(&first, RESUME, &persona()).await.unwrap();
        run_feedback_pipeline(&second, RESUME, &persona()).await.unwrap();
        assert_eq!(first.requests(), second.requests());
    }

    #[tokio::test]
    async fn test_failed_feedback_stops_pipeline() {
        let llm = StubChat::failing();
        let err = run_feedback_pipeline(&llm, RESUME, &persona())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProviderCallFailed(_)));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_rewrite_skips_persona_stage() {
        // Only one scripted reply: the second call fails
        let llm = StubChat::replying(["FEEDBACK: tighten the summary"]);
        let err = run_feedback_pipeline(&llm, RESUME, &persona())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProviderCallFailed(_)));
        assert_eq!(llm.call_count(), 2);
    }

    #[test]
    fn test_persona_without_values_uses_generic_instruction() {
        let persona = Persona {
            company: "Globex".to_string(),
            values: None,
        };
        let request = persona_request("fb", RESUME, &persona);
        assert!(request.messages[1]
            .content
            .contains("publicly stated values and talent profile of Globex"));
    }
}
