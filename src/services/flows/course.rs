use crate::{
    constants::prompts::{render, COURSE_PROMPT},
    errors::AppResult,
    models::dto::artifacts::CourseOutput,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

const COURSE_FLOW: FlowDefinition = FlowDefinition {
    name: "generateCourse",
    safety: SafetyProfile::ProviderDefault,
    temperature: None,
    empty_output_message: "Failed to generate course. The AI model returned no output.",
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CourseInput {
    pub subject: String,
    pub chapter: String,
}

pub fn build_prompt(input: &CourseInput) -> String {
    render(
        COURSE_PROMPT,
        &[("subject", &input.subject), ("chapter", &input.chapter)],
    )
}

impl FlowRunner {
    pub async fn generate_course(&self, input: CourseInput) -> AppResult<CourseOutput> {
        self.run(&COURSE_FLOW, build_prompt(&input), None).await
    }
}
