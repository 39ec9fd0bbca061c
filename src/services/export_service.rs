//! Turns generated artifacts into downloadable documents.

use std::str::FromStr;

use serde::Deserialize;

use crate::{
    errors::AppError,
    models::dto::artifacts::{
        CourseOutput, LessonSummaryOutput, PracticeProblemOutput, PresentationPlan, QuizOutput,
    },
};

const DEFAULT_FILE_STEM: &str = "tuteur-export";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    PlainText,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::PlainText => "txt",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::PlainText => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            "txt" | "text" => Ok(ExportFormat::PlainText),
            other => Err(AppError::NotFound(format!("Unknown export format '{}'", other))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, text: String },
    Paragraph(String),
    Bullets(Vec<String>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    fn heading(mut self, level: u8, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Heading {
            level,
            text: text.into(),
        });
        self
    }

    fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Paragraph(text.into()));
        self
    }

    fn bullets(mut self, items: Vec<String>) -> Self {
        if !items.is_empty() {
            self.blocks.push(Block::Bullets(items));
        }
        self
    }

    pub fn to_markdown(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Heading { level, text } => {
                    format!("{} {}", "#".repeat(usize::from(*level).clamp(1, 6)), text)
                }
                Block::Paragraph(text) => text.clone(),
                Block::Bullets(items) => items
                    .iter()
                    .map(|item| format!("- {}", item))
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n"
    }

    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|block| match block {
                Block::Heading { level: 1, text } => format!("{}\n{}", text, "=".repeat(text.chars().count())),
                Block::Heading { text, .. } => text.clone(),
                Block::Paragraph(text) => text.clone(),
                Block::Bullets(items) => items
                    .iter()
                    .map(|item| format!("- {}", item))
                    .collect::<Vec<_>>()
                    .join("\n"),
            })
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n"
    }

    pub fn render(&self, format: ExportFormat) -> String {
        match format {
            ExportFormat::Markdown => self.to_markdown(),
            ExportFormat::PlainText => self.to_plain_text(),
        }
    }
}

/// An artifact previously returned by an action, sent back for export.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "camelCase")]
pub enum ExportArtifact {
    Problem(PracticeProblemOutput),
    Summary(LessonSummaryOutput),
    Quiz(QuizOutput),
    Course(CourseOutput),
    Presentation(PresentationPlan),
}

#[derive(Clone, Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub filename: Option<String>,
    pub artifact: ExportArtifact,
}

impl From<&ExportArtifact> for Document {
    fn from(artifact: &ExportArtifact) -> Self {
        match artifact {
            ExportArtifact::Problem(problem) => problem_document(problem),
            ExportArtifact::Summary(summary) => Document::default().paragraph(&summary.summary),
            ExportArtifact::Quiz(quiz) => quiz_document(quiz),
            ExportArtifact::Course(course) => course_document(course),
            ExportArtifact::Presentation(plan) => presentation_document(plan),
        }
    }
}

fn problem_document(problem: &PracticeProblemOutput) -> Document {
    let mut document = Document::default()
        .heading(1, "Énoncé du problème")
        .paragraph(&problem.problem);
    if !problem.key_concepts.is_empty() {
        document = document
            .heading(2, "Rappels (concepts à maîtriser):")
            .bullets(problem.key_concepts.clone());
    }
    document.heading(1, "Solution:").paragraph(&problem.solution)
}

fn quiz_document(quiz: &QuizOutput) -> Document {
    quiz.questions
        .iter()
        .enumerate()
        .fold(Document::default().heading(1, "Quiz"), |doc, (i, q)| {
            doc.heading(2, format!("Question {}: {}", i + 1, q.question))
                .bullets(q.options.clone())
                .paragraph(format!("Réponse: {}", q.correct_answer))
                .paragraph(&q.explanation)
        })
}

fn course_document(course: &CourseOutput) -> Document {
    let mut document = Document::default()
        .heading(1, &course.title)
        .paragraph(&course.introduction);

    for section in &course.sections {
        document = document.heading(2, &section.title).paragraph(&section.content);
        for subsection in section.subsections.iter().flatten() {
            document = document
                .heading(3, &subsection.title)
                .paragraph(&subsection.content);
        }
    }

    document = document.heading(2, "Résumé").paragraph(&course.summary);
    if !course.quiz.is_empty() {
        document = document.heading(2, "Quiz d'auto-évaluation");
        for question in &course.quiz {
            document = document
                .paragraph(&question.question)
                .bullets(question.options.clone());
        }
    }
    document
}

fn presentation_document(plan: &PresentationPlan) -> Document {
    let mut document = Document::default()
        .heading(1, &plan.title)
        .heading(2, "Problématique")
        .paragraph(&plan.problematique)
        .heading(2, "Introduction")
        .paragraph(&plan.introduction)
        .heading(2, "Plan");

    for part in &plan.plan {
        document = document.heading(3, &part.part).bullets(part.subparts.clone());
    }

    document = document.heading(2, "Conclusion").paragraph(&plan.conclusion);
    if !plan.sources.trim().is_empty() {
        document = document.heading(2, "Pistes de recherche").paragraph(&plan.sources);
    }
    document
}

/// File name for the `Content-Disposition` header, restricted to a safe charset.
pub fn attachment_name(filename: Option<&str>, format: ExportFormat) -> String {
    let stem: String = filename
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect();
    let stem = if stem.is_empty() {
        DEFAULT_FILE_STEM
    } else {
        stem.as_str()
    };
    format!("{}.{}", stem, format.extension())
}

pub struct ExportedFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub body: String,
}

pub fn export(request: &ExportRequest, format: ExportFormat) -> ExportedFile {
    let document = Document::from(&request.artifact);
    ExportedFile {
        file_name: attachment_name(request.filename.as_deref(), format),
        content_type: format.content_type(),
        body: document.render(format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> PracticeProblemOutput {
        PracticeProblemOutput {
            problem: "Calculer l'intérêt simple de 100 000 FCFA à 5% sur 2 ans.".to_string(),
            solution: "I = C x t x n = 10 000 FCFA".to_string(),
            key_concepts: vec!["Intérêt simple: I = C x t x n".to_string()],
        }
    }

    #[test]
    fn problem_markdown_has_expected_sections() {
        let markdown = Document::from(&ExportArtifact::Problem(problem())).to_markdown();

        assert!(markdown.starts_with("# Énoncé du problème\n\n"));
        assert!(markdown.contains("## Rappels (concepts à maîtriser):\n\n- Intérêt simple"));
        assert!(markdown.contains("# Solution:\n\nI = C x t x n = 10 000 FCFA"));
    }

    #[test]
    fn problem_without_concepts_skips_reminders() {
        let mut problem = problem();
        problem.key_concepts.clear();
        let text = Document::from(&ExportArtifact::Problem(problem)).to_plain_text();

        assert!(!text.contains("Rappels"));
        assert!(text.contains("Solution:\n========="));
    }

    #[test]
    fn artifact_is_tagged_by_kind() {
        let json = r#"{"filename":"resume droit","artifact":{"kind":"summary","data":{"summary":"Le contrat."}}}"#;
        let request: ExportRequest = serde_json::from_str(json).expect("request should parse");

        let file = export(&request, ExportFormat::PlainText);
        assert_eq!(file.file_name, "resumedroit.txt");
        assert_eq!(file.body, "Le contrat.\n");
    }

    #[test]
    fn format_parsing_and_default_name() {
        assert_eq!("md".parse::<ExportFormat>().ok(), Some(ExportFormat::Markdown));
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(attachment_name(None, ExportFormat::Markdown), "tuteur-export.md");
        assert_eq!(attachment_name(Some("../../etc"), ExportFormat::Markdown), "etc.md");
    }
}
