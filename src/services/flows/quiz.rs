use crate::{
    constants::prompts::{render, QUIZ_PROMPT},
    errors::AppResult,
    models::dto::artifacts::QuizOutput,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

pub const DEFAULT_QUESTION_COUNT: u8 = 5;
pub const MAX_QUESTION_COUNT: u8 = 20;

const QUIZ_FLOW: FlowDefinition = FlowDefinition {
    name: "generateQuiz",
    safety: SafetyProfile::BlockOnlyHigh,
    temperature: None,
    empty_output_message: "Failed to generate quiz. The AI model returned no output.",
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateQuizInput {
    pub subject: String,
    pub topic: String,
    pub student_level: String,
    pub question_count: u8,
}

pub fn build_prompt(input: &GenerateQuizInput) -> String {
    let question_count = input.question_count.to_string();
    render(
        QUIZ_PROMPT,
        &[
            ("studentLevel", &input.student_level),
            ("questionCount", &question_count),
            ("subject", &input.subject),
            ("topic", &input.topic),
        ],
    )
}

impl FlowRunner {
    pub async fn generate_quiz(&self, input: GenerateQuizInput) -> AppResult<QuizOutput> {
        let quiz: QuizOutput = self.run(&QUIZ_FLOW, build_prompt(&input), None).await?;
        if quiz.questions.len() != usize::from(input.question_count) {
            log::warn!(
                "Quiz on '{}' returned {} questions, {} requested",
                input.topic,
                quiz.questions.len(),
                input.question_count
            );
        }
        Ok(quiz)
    }
}
