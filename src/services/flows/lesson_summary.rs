use crate::{
    constants::prompts::{
        render, LESSON_IMAGE_OCR_INSTRUCTION, LESSON_SUMMARY_PROMPT, TUTORIAL_PROMPT,
    },
    errors::AppResult,
    models::dto::artifacts::LessonSummaryOutput,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

/// Subjects for which a tutorial is generated instead of a summary. Matched exactly.
pub const TUTORIAL_SUBJECTS: [&str; 2] = ["Initiation à l'IA", "Informatique"];

pub const SUMMARY_WORD_LIMIT: usize = 500;

const TUTORIAL_FLOW: FlowDefinition = FlowDefinition {
    name: "generateTutorial",
    safety: SafetyProfile::ProviderDefault,
    temperature: None,
    empty_output_message: "Failed to generate summary. The AI model returned no output.",
};

const SUMMARY_FLOW: FlowDefinition = FlowDefinition {
    name: "summarizeLesson",
    safety: SafetyProfile::BlockOnlyHigh,
    temperature: None,
    empty_output_message: "Failed to generate summary. The AI model returned no output.",
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SummarizeLessonInput {
    pub subject: Option<String>,
    pub lesson_content: Option<String>,
    /// Data URI of a photographed lesson.
    pub lesson_image: Option<String>,
}

impl SummarizeLessonInput {
    pub fn is_tutorial(&self) -> bool {
        self.subject
            .as_deref()
            .is_some_and(|subject| TUTORIAL_SUBJECTS.contains(&subject))
    }
}

/// Keeps the first `limit` space-separated words.
pub fn truncate_words(content: &str, limit: usize) -> String {
    content.split(' ').take(limit).collect::<Vec<_>>().join(" ")
}

pub fn build_tutorial_prompt(input: &SummarizeLessonInput) -> String {
    render(
        TUTORIAL_PROMPT,
        &[
            ("subject", input.subject.as_deref().unwrap_or_default()),
            ("lessonContent", input.lesson_content.as_deref().unwrap_or_default()),
        ],
    )
}

pub fn build_summary_prompt(input: &SummarizeLessonInput) -> String {
    let mut prompt = LESSON_SUMMARY_PROMPT.to_string();
    if input.lesson_image.is_some() {
        prompt.push('\n');
        prompt.push_str(LESSON_IMAGE_OCR_INSTRUCTION);
    }
    if let Some(content) = input.lesson_content.as_deref() {
        prompt.push_str("\n\nLesson Content:\n");
        prompt.push_str(&truncate_words(content, SUMMARY_WORD_LIMIT));
    }
    if input.lesson_image.is_some() {
        prompt.push_str("\n\nLesson Image: see the attached image.");
    }
    prompt
}

impl FlowRunner {
    pub async fn summarize_lesson(
        &self,
        input: SummarizeLessonInput,
    ) -> AppResult<LessonSummaryOutput> {
        if input.is_tutorial() {
            let prompt = build_tutorial_prompt(&input);
            self.run(&TUTORIAL_FLOW, prompt, None).await
        } else {
            let prompt = build_summary_prompt(&input);
            self.run(&SUMMARY_FLOW, prompt, input.lesson_image).await
        }
    }
}
