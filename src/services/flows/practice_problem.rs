use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    constants::prompts::{render, PRACTICE_PROBLEM_PROMPT},
    errors::{AppError, AppResult},
    models::dto::artifacts::PracticeProblemOutput,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

const PRACTICE_PROBLEM_FLOW: FlowDefinition = FlowDefinition {
    name: "generatePracticeProblem",
    safety: SafetyProfile::BlockOnlyHigh,
    temperature: None,
    empty_output_message: "Failed to generate problem. The AI model returned no output.",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(AppError::ValidationError(
                "Please choose a difficulty: easy, medium or hard.".to_string(),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeProblemInput {
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub student_level: String,
}

pub fn build_prompt(input: &PracticeProblemInput) -> String {
    render(
        PRACTICE_PROBLEM_PROMPT,
        &[
            ("studentLevel", &input.student_level),
            ("subject", &input.subject),
            ("topic", &input.topic),
            ("difficulty", input.difficulty.as_str()),
        ],
    )
}

impl FlowRunner {
    pub async fn generate_practice_problem(
        &self,
        input: PracticeProblemInput,
    ) -> AppResult<PracticeProblemOutput> {
        self.run(&PRACTICE_PROBLEM_FLOW, build_prompt(&input), None)
            .await
    }
}
