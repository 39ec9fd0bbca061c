use crate::{
    constants::prompts::{render, ANSWER_QUESTION_PROMPT},
    errors::AppResult,
    models::dto::artifacts::AnswerOutput,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

const ANSWER_QUESTION_FLOW: FlowDefinition = FlowDefinition {
    name: "answerQuestion",
    safety: SafetyProfile::BlockOnlyHigh,
    temperature: None,
    empty_output_message: "Failed to generate answer. The AI model returned no output.",
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerQuestionInput {
    pub subject: String,
    pub question: String,
}

pub fn build_prompt(input: &AnswerQuestionInput) -> String {
    render(
        ANSWER_QUESTION_PROMPT,
        &[("subject", &input.subject), ("question", &input.question)],
    )
}

impl FlowRunner {
    pub async fn answer_question(&self, input: AnswerQuestionInput) -> AppResult<AnswerOutput> {
        self.run(&ANSWER_QUESTION_FLOW, build_prompt(&input), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_subject_and_question() {
        let prompt = build_prompt(&AnswerQuestionInput {
            subject: "Économie Générale".to_string(),
            question: "Qu'est-ce que l'inflation ?".to_string(),
        });

        assert!(prompt.contains("Subject: Économie Générale"));
        assert!(prompt.contains("Question: Qu'est-ce que l'inflation ?"));
    }
}
