//! Structured outputs expected from the model, one per feature.
//!
//! The JSON schema sent to the provider is derived from these types with `schemars`
//! (field doc comments become the schema descriptions), and the same types are
//! re-checked with `validator` once the reply has been deserialized.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummaryOutput {
    /// A concise, structured summary (or tutorial) of the lesson content, in French.
    #[validate(custom(function = "non_blank"))]
    pub summary: String,
}

/// Shared by the practice problem generator and both exercise solvers.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PracticeProblemOutput {
    /// The full problem statement.
    #[validate(custom(function = "non_blank"))]
    pub problem: String,
    /// The detailed, step-by-step solution to the problem.
    #[validate(custom(function = "non_blank"))]
    pub solution: String,
    /// Key concepts, formulas or lesson parts the student needs to master, each with a brief explanation.
    #[serde(default)]
    pub key_concepts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOutput {
    /// A clear and pedagogical answer to the question.
    #[validate(custom(function = "non_blank"))]
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_quiz_answer"))]
pub struct QuizQuestion {
    /// The quiz question.
    #[validate(custom(function = "non_blank"))]
    pub question: String,
    /// A list of possible answers for the question.
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    /// The correct answer, copied verbatim from the options.
    pub correct_answer: String,
    /// A brief explanation for the correct answer.
    #[serde(default)]
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizOutput {
    /// The list of generated quiz questions.
    #[validate(length(min = 1), nested)]
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSubsection {
    pub title: String,
    pub content: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseSection {
    /// Section title, e.g. "Le Bilan Comptable".
    #[validate(custom(function = "non_blank"))]
    pub title: String,
    /// Detailed, simple and pedagogical content with concrete examples.
    #[validate(custom(function = "non_blank"))]
    pub content: String,
    /// Optional subsections splitting a complex section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsections: Option<Vec<CourseSubsection>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_course_quiz_answer"))]
pub struct CourseQuizQuestion {
    /// A multiple-choice question testing understanding.
    #[validate(custom(function = "non_blank"))]
    pub question: String,
    /// Four possible answers.
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    /// The correct answer among the options.
    pub correct_answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseOutput {
    /// Main course title, e.g. "Introduction à la Comptabilité Générale".
    #[validate(custom(function = "non_blank"))]
    pub title: String,
    /// Short introduction presenting the chapter and its learning goals.
    #[validate(custom(function = "non_blank"))]
    pub introduction: String,
    /// Sections structuring the course.
    #[validate(length(min = 1), nested)]
    pub sections: Vec<CourseSection>,
    /// Summary of the key points of the chapter.
    #[validate(custom(function = "non_blank"))]
    pub summary: String,
    /// Self-assessment mini quiz of 3 to 5 questions.
    #[serde(default)]
    #[validate(nested)]
    pub quiz: Vec<CourseQuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresentationPart {
    /// Heading of the part, e.g. "I. Les sources du droit".
    #[validate(custom(function = "non_blank"))]
    pub part: String,
    /// Sub-parts (A, B, C...) each followed by a sentence on what to put there.
    #[serde(default)]
    pub subparts: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresentationPlan {
    /// Reformulated title of the presentation.
    #[validate(custom(function = "non_blank"))]
    pub title: String,
    /// Two or three candidate research questions.
    #[validate(custom(function = "non_blank"))]
    pub problematique: String,
    /// Proposed introduction: hook, research question, plan announcement.
    #[validate(custom(function = "non_blank"))]
    pub introduction: String,
    /// Detailed plan in two or three parts.
    #[validate(length(min = 1), nested)]
    pub plan: Vec<PresentationPart>,
    /// Proposed conclusion: summary, answer, opening.
    #[validate(custom(function = "non_blank"))]
    pub conclusion: String,
    /// Research leads and sources to consult.
    #[serde(default)]
    pub sources: String,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("The field must not be blank.".into()))
    } else {
        Ok(())
    }
}

/// Answer comparison shared by validation and scoring. Surrounding whitespace is ignored.
pub fn same_answer(left: &str, right: &str) -> bool {
    left.trim() == right.trim()
}

fn answer_among_options(options: &[String], correct_answer: &str) -> Result<(), ValidationError> {
    if options.iter().any(|option| same_answer(option, correct_answer)) {
        Ok(())
    } else {
        Err(ValidationError::new("correct_answer_not_in_options")
            .with_message("The correct answer must be one of the options.".into()))
    }
}

fn validate_quiz_answer(question: &QuizQuestion) -> Result<(), ValidationError> {
    answer_among_options(&question.options, &question.correct_answer)
}

fn validate_course_quiz_answer(question: &CourseQuizQuestion) -> Result<(), ValidationError> {
    answer_among_options(&question.options, &question.correct_answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: "Quel document présente le patrimoine de l'entreprise ?".to_string(),
            options: vec![
                "Le bilan".to_string(),
                "Le compte de résultat".to_string(),
                "Le journal".to_string(),
            ],
            correct_answer: correct.to_string(),
            explanation: "Le bilan est une photographie du patrimoine.".to_string(),
        }
    }

    #[test]
    fn quiz_accepts_answer_listed_in_options() {
        let quiz = QuizOutput {
            questions: vec![question("Le bilan")],
        };
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn quiz_rejects_answer_missing_from_options() {
        let quiz = QuizOutput {
            questions: vec![question("La balance")],
        };
        assert!(quiz.validate().is_err());
    }

    #[test]
    fn quiz_rejects_empty_question_list() {
        let quiz = QuizOutput { questions: vec![] };
        assert!(quiz.validate().is_err());
    }

    #[test]
    fn practice_problem_uses_camel_case_keys() {
        let json = r#"{"problem":"P","solution":"S","keyConcepts":["Intérêt simple"]}"#;
        let parsed: PracticeProblemOutput = serde_json::from_str(json).expect("should parse");

        assert_eq!(parsed.key_concepts, vec!["Intérêt simple".to_string()]);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn blank_summary_fails_validation() {
        let output = LessonSummaryOutput {
            summary: String::new(),
        };
        assert!(output.validate().is_err());
    }

    #[test]
    fn whitespace_only_fields_fail_validation() {
        let summary = LessonSummaryOutput {
            summary: "   \n\t".to_string(),
        };
        assert!(summary.validate().is_err());

        let problem = PracticeProblemOutput {
            problem: "Calculez la TVA.".to_string(),
            solution: "  ".to_string(),
            key_concepts: vec![],
        };
        let errors = problem.validate().expect_err("blank solution should fail");
        assert!(errors.field_errors().contains_key("solution"));
    }

    #[test]
    fn schema_exposes_field_descriptions() {
        let schema = serde_json::to_value(schemars::schema_for!(QuizOutput))
            .expect("schema should serialize");
        let text = schema.to_string();

        assert!(text.contains("correctAnswer"));
        assert!(text.contains("The list of generated quiz questions."));
    }
}
