//! Request DTOs: one validated form per action, plus the JSON bodies of the
//! auth, scoring and export endpoints.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        artifacts::QuizQuestion,
        form::{SubmittedForm, UploadedFile},
    },
    services::{
        data_uri::image_to_data_uri,
        flows::{
            course::CourseInput,
            exercise_solver::{ExerciseContent, SolveAnyExerciseInput, SolveImageExerciseInput},
            lesson_summary::SummarizeLessonInput,
            practice_problem::{Difficulty, PracticeProblemInput},
            presentation::PresentationInput,
            question_answer::AnswerQuestionInput,
            quiz::{GenerateQuizInput, DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT},
            DEFAULT_STUDENT_LEVEL,
        },
    },
};

/// Struct-level (`schema`) failures are reported under this key.
const SCHEMA_ERRORS: &str = "__all__";

/// A form submitted to one of the actions, turned into a flow input once valid.
pub trait ActionForm: Validate + Sized {
    type Input;

    /// Fields in the order their messages should be reported.
    const FIELD_ORDER: &'static [&'static str];

    fn from_form(form: &SubmittedForm) -> Self;

    fn into_input(self) -> AppResult<Self::Input>;

    fn parse(form: &SubmittedForm) -> AppResult<Self::Input> {
        let parsed = Self::from_form(form);
        parsed
            .validate()
            .map_err(|errors| AppError::from_validation(&errors, Self::FIELD_ORDER))?;
        parsed.into_input()
    }
}

fn student_level(form: &SubmittedForm) -> String {
    form.optional_text("studentLevel")
        .unwrap_or_else(|| DEFAULT_STUDENT_LEVEL.to_string())
}

fn trimmed(form: &SubmittedForm, name: &str) -> String {
    form.optional_text(name).unwrap_or_default()
}

fn validate_image(file: &UploadedFile) -> Result<(), ValidationError> {
    if file.is_image() {
        Ok(())
    } else {
        Err(ValidationError::new("image").with_message("Please provide a valid image.".into()))
    }
}

fn validate_difficulty(value: &str) -> Result<(), ValidationError> {
    value.parse::<Difficulty>().map(|_| ()).map_err(|_| {
        ValidationError::new("difficulty")
            .with_message("Please choose a difficulty: easy, medium or hard.".into())
    })
}

fn validate_question_count(value: &str) -> Result<(), ValidationError> {
    match value.parse::<u8>() {
        Ok(count) if (1..=MAX_QUESTION_COUNT).contains(&count) => Ok(()),
        _ => Err(ValidationError::new("question_count").with_message(
            format!("The number of questions must be between 1 and {}.", MAX_QUESTION_COUNT).into(),
        )),
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ProblemForm {
    #[validate(length(min = 1, message = "Please select a subject."))]
    pub subject: String,

    #[validate(length(min = 3, message = "The exercise topic is too short."))]
    pub topic: String,

    #[validate(custom(function = "validate_difficulty"))]
    pub difficulty: String,

    pub student_level: String,
}

impl ActionForm for ProblemForm {
    type Input = PracticeProblemInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "topic", "difficulty"];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            topic: trimmed(form, "topic"),
            difficulty: trimmed(form, "difficulty"),
            student_level: student_level(form),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        Ok(PracticeProblemInput {
            difficulty: self.difficulty.parse()?,
            subject: self.subject,
            topic: self.topic,
            student_level: self.student_level,
        })
    }
}

#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_lesson_source"))]
pub struct LessonForm {
    pub subject: Option<String>,

    pub lesson_content: Option<String>,

    #[validate(custom(function = "validate_image"))]
    pub lesson_image: Option<UploadedFile>,
}

fn validate_lesson_source(form: &LessonForm) -> Result<(), ValidationError> {
    if form.lesson_content.is_none() && form.lesson_image.is_none() {
        return Err(ValidationError::new("lesson_source")
            .with_message("Please provide the lesson content or an image.".into()));
    }
    Ok(())
}

impl ActionForm for LessonForm {
    type Input = SummarizeLessonInput;
    const FIELD_ORDER: &'static [&'static str] = &["lesson_image", SCHEMA_ERRORS];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: form.optional_text("subject"),
            lesson_content: form.optional_text("lessonContent"),
            lesson_image: form.file("lessonImage").cloned(),
        }
    }

    /// A submitted image takes precedence over the text content.
    fn into_input(self) -> AppResult<Self::Input> {
        match self.lesson_image {
            Some(image) => Ok(SummarizeLessonInput {
                subject: self.subject,
                lesson_content: None,
                lesson_image: Some(image_to_data_uri(&image)?),
            }),
            None => Ok(SummarizeLessonInput {
                subject: self.subject,
                lesson_content: self.lesson_content,
                lesson_image: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct QuestionForm {
    #[validate(length(min = 1, message = "Please select a subject."))]
    pub subject: String,

    #[validate(length(min = 5, message = "Your question is too short."))]
    pub question: String,
}

impl ActionForm for QuestionForm {
    type Input = AnswerQuestionInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "question"];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            question: trimmed(form, "question"),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        Ok(AnswerQuestionInput {
            subject: self.subject,
            question: self.question,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct QuizForm {
    #[validate(length(min = 1, message = "Please select a subject."))]
    pub subject: String,

    #[validate(length(min = 3, message = "The topic is too short."))]
    pub topic: String,

    #[validate(custom(function = "validate_question_count"))]
    pub question_count: Option<String>,

    pub student_level: String,
}

impl ActionForm for QuizForm {
    type Input = GenerateQuizInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "topic", "question_count"];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            topic: trimmed(form, "topic"),
            question_count: form.optional_text("questionCount"),
            student_level: student_level(form),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        let question_count = match self.question_count.as_deref() {
            Some(raw) => raw.parse::<u8>().map_err(|_| {
                AppError::ValidationError("The number of questions is not a number.".to_string())
            })?,
            None => DEFAULT_QUESTION_COUNT,
        };

        Ok(GenerateQuizInput {
            subject: self.subject,
            topic: self.topic,
            student_level: self.student_level,
            question_count,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct ImageExerciseForm {
    #[validate(length(min = 1, message = "Please select a subject."))]
    pub subject: String,

    #[validate(
        required(message = "Please provide a valid image."),
        custom(function = "validate_image")
    )]
    pub exercise_image: Option<UploadedFile>,

    pub student_level: String,
}

impl ActionForm for ImageExerciseForm {
    type Input = SolveImageExerciseInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "exercise_image"];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            exercise_image: form.file("exerciseImage").cloned(),
            student_level: student_level(form),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        let image = self
            .exercise_image
            .ok_or_else(|| AppError::ValidationError("Please provide a valid image.".to_string()))?;

        Ok(SolveImageExerciseInput {
            subject: self.subject,
            student_level: self.student_level,
            exercise_image: image_to_data_uri(&image)?,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseInputType {
    Text,
    Image,
}

#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_exercise_source"))]
pub struct ExerciseForm {
    #[validate(length(min = 1, message = "Please select a subject."))]
    pub subject: String,

    pub input_type: Option<String>,

    pub exercise_text: Option<String>,

    #[validate(custom(function = "validate_image"))]
    pub exercise_image: Option<UploadedFile>,

    pub student_level: String,
}

const MISSING_EXERCISE: &str = "Please provide the exercise text or image.";

impl ExerciseForm {
    fn input_type(&self) -> Result<Option<ExerciseInputType>, ValidationError> {
        match self.input_type.as_deref() {
            None => Ok(None),
            Some("text") => Ok(Some(ExerciseInputType::Text)),
            Some("image") => Ok(Some(ExerciseInputType::Image)),
            Some(_) => Err(ValidationError::new("input_type")
                .with_message("Please choose an input type: text or image.".into())),
        }
    }

    /// Picks the single source the flow receives.
    fn source(&self) -> Result<ExerciseInputType, ValidationError> {
        let missing =
            || ValidationError::new("exercise_source").with_message(MISSING_EXERCISE.into());

        match self.input_type()? {
            Some(ExerciseInputType::Text) if self.exercise_text.is_some() => {
                Ok(ExerciseInputType::Text)
            }
            Some(ExerciseInputType::Image) if self.exercise_image.is_some() => {
                Ok(ExerciseInputType::Image)
            }
            Some(_) => Err(missing()),
            None => match (&self.exercise_text, &self.exercise_image) {
                (Some(_), None) => Ok(ExerciseInputType::Text),
                (None, Some(_)) => Ok(ExerciseInputType::Image),
                (None, None) => Err(missing()),
                (Some(_), Some(_)) => Err(ValidationError::new("exercise_source").with_message(
                    "Please provide either the exercise text or an image, not both.".into(),
                )),
            },
        }
    }
}

fn validate_exercise_source(form: &ExerciseForm) -> Result<(), ValidationError> {
    form.source().map(|_| ())
}

impl ActionForm for ExerciseForm {
    type Input = SolveAnyExerciseInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "exercise_image", SCHEMA_ERRORS];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            input_type: form.optional_text("inputType"),
            exercise_text: form.optional_text("exerciseText"),
            exercise_image: form.file("exerciseImage").cloned(),
            student_level: student_level(form),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        let source = self.source().map_err(|e| {
            AppError::ValidationError(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| MISSING_EXERCISE.to_string()),
            )
        })?;

        let exercise = match (source, self.exercise_text, self.exercise_image) {
            (ExerciseInputType::Text, Some(text), _) => ExerciseContent::Text(text),
            (ExerciseInputType::Image, _, Some(image)) => {
                ExerciseContent::Image(image_to_data_uri(&image)?)
            }
            _ => return Err(AppError::ValidationError(MISSING_EXERCISE.to_string())),
        };

        Ok(SolveAnyExerciseInput {
            subject: self.subject,
            student_level: self.student_level,
            exercise,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct CourseForm {
    #[validate(length(min = 1, message = "Veuillez sélectionner une matière."))]
    pub subject: String,

    #[validate(length(
        min = 3,
        message = "Veuillez décrire le chapitre que vous souhaitez générer."
    ))]
    pub chapter: String,
}

impl ActionForm for CourseForm {
    type Input = CourseInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "chapter"];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            chapter: trimmed(form, "chapter"),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        Ok(CourseInput {
            subject: self.subject,
            chapter: self.chapter,
        })
    }
}

#[derive(Debug, Clone, Validate)]
pub struct PresentationForm {
    #[validate(length(min = 1, message = "Veuillez sélectionner une matière."))]
    pub subject: String,

    #[validate(length(min = 5, message = "Veuillez décrire le thème de votre exposé."))]
    pub topic: String,
}

impl ActionForm for PresentationForm {
    type Input = PresentationInput;
    const FIELD_ORDER: &'static [&'static str] = &["subject", "topic"];

    fn from_form(form: &SubmittedForm) -> Self {
        Self {
            subject: trimmed(form, "subject"),
            topic: trimmed(form, "topic"),
        }
    }

    fn into_input(self) -> AppResult<Self::Input> {
        Ok(PresentationInput {
            subject: self.subject,
            topic: self.topic,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Please enter your password."))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScoreQuizRequest {
    #[validate(nested)]
    pub questions: Vec<QuizQuestion>,

    /// One entry per answered question, `None` for a skipped one.
    #[serde(default)]
    pub answers: Vec<Option<String>>,
}
