//! Entry points behind the action endpoints. Every action validates its form,
//! runs one flow and always answers with an `ActionResponse`, never an error.

use std::{future::Future, panic::AssertUnwindSafe};

use futures::FutureExt;
use serde_json::Value;

use crate::{
    models::{
        domain::Conversation,
        dto::{
            artifacts::{
                AnswerOutput, CourseOutput, LessonSummaryOutput, PracticeProblemOutput,
                PresentationPlan, QuizOutput,
            },
            form::SubmittedForm,
            request::{
                ActionForm, CourseForm, ExerciseForm, ImageExerciseForm, LessonForm, PresentationForm,
                ProblemForm, QuestionForm, QuizForm,
            },
            response::{ActionOutcome, ActionResponse, UNEXPECTED_ERROR},
        },
    },
    errors::AppResult,
    services::flows::FlowRunner,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    GenerateProblem,
    SummarizeLesson,
    AskQuestion,
    GenerateQuiz,
    SolveImageExercise,
    SolveExercise,
    GenerateCourse,
    PresentationPlan,
}

impl ActionKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "generate-problem" => Some(ActionKind::GenerateProblem),
            "summarize-lesson" => Some(ActionKind::SummarizeLesson),
            "ask-question" => Some(ActionKind::AskQuestion),
            "generate-quiz" => Some(ActionKind::GenerateQuiz),
            "solve-image-exercise" => Some(ActionKind::SolveImageExercise),
            "solve-exercise" => Some(ActionKind::SolveExercise),
            "generate-course" => Some(ActionKind::GenerateCourse),
            "presentation-plan" => Some(ActionKind::PresentationPlan),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::GenerateProblem => "generate-problem",
            ActionKind::SummarizeLesson => "summarize-lesson",
            ActionKind::AskQuestion => "ask-question",
            ActionKind::GenerateQuiz => "generate-quiz",
            ActionKind::SolveImageExercise => "solve-image-exercise",
            ActionKind::SolveExercise => "solve-exercise",
            ActionKind::GenerateCourse => "generate-course",
            ActionKind::PresentationPlan => "presentation-plan",
        }
    }

    /// Prepended to downstream failures shown to the student.
    pub fn error_prefix(self) -> &'static str {
        match self {
            ActionKind::GenerateProblem => "Failed to generate problem",
            ActionKind::SummarizeLesson => "Summarization failed",
            ActionKind::AskQuestion => "Could not get an answer",
            ActionKind::GenerateQuiz => "Failed to generate quiz",
            ActionKind::SolveImageExercise | ActionKind::SolveExercise => "Failed to solve exercise",
            ActionKind::GenerateCourse => "Une erreur est survenue lors de la génération du cours",
            ActionKind::PresentationPlan => "Une erreur est survenue lors de la génération du plan",
        }
    }
}

pub struct ActionService {
    flows: FlowRunner,
}

impl ActionService {
    pub fn new(flows: FlowRunner) -> Self {
        Self { flows }
    }

    pub async fn dispatch(&self, kind: ActionKind, form: &SubmittedForm) -> ActionResponse<Value> {
        match kind {
            ActionKind::GenerateProblem => self.generate_problem(form).await.into_json(),
            ActionKind::SummarizeLesson => self.summarize_lesson(form).await.into_json(),
            ActionKind::AskQuestion => self.ask_question(form).await.into_json(),
            ActionKind::GenerateQuiz => self.generate_quiz(form).await.into_json(),
            ActionKind::SolveImageExercise => self.solve_image_exercise(form).await.into_json(),
            ActionKind::SolveExercise => self.solve_exercise(form).await.into_json(),
            ActionKind::GenerateCourse => self.generate_course(form).await.into_json(),
            ActionKind::PresentationPlan => self.presentation_plan(form).await.into_json(),
        }
    }

    pub async fn generate_problem(&self, form: &SubmittedForm) -> ActionResponse<PracticeProblemOutput> {
        self.perform::<ProblemForm, _, _>(ActionKind::GenerateProblem, form, |input| {
            self.flows.generate_practice_problem(input)
        })
        .await
    }

    pub async fn summarize_lesson(&self, form: &SubmittedForm) -> ActionResponse<LessonSummaryOutput> {
        self.perform::<LessonForm, _, _>(ActionKind::SummarizeLesson, form, |input| {
            self.flows.summarize_lesson(input)
        })
        .await
    }

    pub async fn ask_question(&self, form: &SubmittedForm) -> ActionResponse<AnswerOutput> {
        self.perform::<QuestionForm, _, _>(ActionKind::AskQuestion, form, |input| {
            self.flows.answer_question(input)
        })
        .await
    }

    /// Asks a question and records both sides of the exchange.
    pub async fn ask_in_conversation(
        &self,
        conversation: &mut Conversation,
        form: &SubmittedForm,
    ) -> ActionResponse<AnswerOutput> {
        conversation.push_user(form.text("question"));
        let reply = self.ask_question(form).await;
        conversation.record_reply(&reply);
        reply
    }

    pub async fn generate_quiz(&self, form: &SubmittedForm) -> ActionResponse<QuizOutput> {
        self.perform::<QuizForm, _, _>(ActionKind::GenerateQuiz, form, |input| {
            self.flows.generate_quiz(input)
        })
        .await
    }

    pub async fn solve_image_exercise(
        &self,
        form: &SubmittedForm,
    ) -> ActionResponse<PracticeProblemOutput> {
        self.perform::<ImageExerciseForm, _, _>(ActionKind::SolveImageExercise, form, |input| {
            self.flows.solve_image_exercise(input)
        })
        .await
    }

    pub async fn solve_exercise(&self, form: &SubmittedForm) -> ActionResponse<PracticeProblemOutput> {
        self.perform::<ExerciseForm, _, _>(ActionKind::SolveExercise, form, |input| {
            self.flows.solve_any_exercise(input)
        })
        .await
    }

    pub async fn generate_course(&self, form: &SubmittedForm) -> ActionResponse<CourseOutput> {
        self.perform::<CourseForm, _, _>(ActionKind::GenerateCourse, form, |input| {
            self.flows.generate_course(input)
        })
        .await
    }

    pub async fn presentation_plan(&self, form: &SubmittedForm) -> ActionResponse<PresentationPlan> {
        self.perform::<PresentationForm, _, _>(ActionKind::PresentationPlan, form, |input| {
            self.flows.plan_presentation(input)
        })
        .await
    }

    async fn perform<F, T, Fut>(
        &self,
        kind: ActionKind,
        form: &SubmittedForm,
        run: impl FnOnce(F::Input) -> Fut,
    ) -> ActionResponse<T>
    where
        F: ActionForm,
        Fut: Future<Output = AppResult<T>>,
    {
        let attempt = AssertUnwindSafe(async move {
            let input = match F::parse(form) {
                Ok(input) => input,
                Err(err) => {
                    log::warn!("Rejected {} submission: {}", kind.name(), err);
                    return ActionResponse::failure(ActionOutcome::from(&err), err.public_message());
                }
            };

            match run(input).await {
                Ok(data) => {
                    log::info!("Action {} succeeded", kind.name());
                    ActionResponse::success(data)
                }
                Err(err) => {
                    log::error!("Action {} failed: {}", kind.name(), err);
                    ActionResponse::failure(
                        ActionOutcome::from(&err),
                        format!("{}: {}", kind.error_prefix(), err.public_message()),
                    )
                }
            }
        })
        .catch_unwind()
        .await;

        attempt.unwrap_or_else(|_| {
            log::error!("Action {} panicked", kind.name());
            ActionResponse::failure(ActionOutcome::Unexpected, UNEXPECTED_ERROR)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::{
        errors::AppError,
        models::dto::form::UploadedFile,
        services::model_service::{GenerationRequest, MockModelProvider, ModelProvider},
    };

    const PROBLEM_JSON: &str =
        r#"{"problem":"Calculer la TVA","solution":"TVA = 18% du HT","keyConcepts":["Taux de TVA"]}"#;

    fn service(mock: MockModelProvider) -> ActionService {
        ActionService::new(FlowRunner::new(Arc::new(mock), "test-model"))
    }

    fn no_calls() -> MockModelProvider {
        let mut mock = MockModelProvider::new();
        mock.expect_generate().never();
        mock
    }

    #[test]
    fn action_names_round_trip() {
        for name in [
            "generate-problem",
            "summarize-lesson",
            "ask-question",
            "generate-quiz",
            "solve-image-exercise",
            "solve-exercise",
            "generate-course",
            "presentation-plan",
        ] {
            let kind = ActionKind::from_name(name).expect("known action");
            assert_eq!(kind.name(), name);
        }
        assert_eq!(ActionKind::from_name("delete-everything"), None);
    }

    #[actix_web::test]
    async fn missing_fields_never_reach_the_model() {
        let service = service(no_calls());
        let empty = SubmittedForm::new();

        for kind in [
            ActionKind::GenerateProblem,
            ActionKind::SummarizeLesson,
            ActionKind::AskQuestion,
            ActionKind::GenerateQuiz,
            ActionKind::SolveImageExercise,
            ActionKind::SolveExercise,
            ActionKind::GenerateCourse,
            ActionKind::PresentationPlan,
        ] {
            let response = service.dispatch(kind, &empty).await;
            assert!(response.data.is_none(), "{} returned data", kind.name());
            assert!(response.error.is_some(), "{} returned no error", kind.name());
            assert_eq!(response.outcome, ActionOutcome::Invalid);
        }
    }

    #[actix_web::test]
    async fn problem_prompt_embeds_inputs_verbatim() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| {
                req.prompt.contains("Comptabilité et Finance")
                    && req.prompt.contains("La TVA collectée")
                    && req.prompt.contains("medium")
                    && req.prompt.contains("Terminale G2")
            })
            .returning(|_| Ok(Some(PROBLEM_JSON.to_string())));

        let form = SubmittedForm::new()
            .with_field("subject", "Comptabilité et Finance")
            .with_field("topic", "La TVA collectée")
            .with_field("difficulty", "medium")
            .with_field("studentLevel", "Terminale G2");

        let response = service(mock).generate_problem(&form).await;
        assert!(response.is_success());
        assert_eq!(
            response.data.map(|d| d.key_concepts),
            Some(vec!["Taux de TVA".to_string()])
        );
    }

    #[actix_web::test]
    async fn droit_summary_sends_first_500_words() {
        let content = (1..=600)
            .map(|i| format!("w{}", i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| {
                req.flow == "summarizeLesson"
                    && req.prompt.contains(" w500")
                    && !req.prompt.contains("w501")
            })
            .returning(|_| Ok(Some("{\"summary\":\"Résumé\"}".to_string())));

        let form = SubmittedForm::new()
            .with_field("subject", "Droit")
            .with_field("lessonContent", content);

        assert!(service(mock).summarize_lesson(&form).await.is_success());
    }

    #[actix_web::test]
    async fn informatique_summary_uses_tutorial_template() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| req.flow == "generateTutorial")
            .returning(|_| Ok(Some("{\"summary\":\"Tutoriel\"}".to_string())));

        let form = SubmittedForm::new()
            .with_field("subject", "Informatique")
            .with_field("lessonContent", "Les tableurs");

        let response = service(mock).summarize_lesson(&form).await;
        assert_eq!(response.data.map(|d| d.summary), Some("Tutoriel".to_string()));
    }

    #[actix_web::test]
    async fn quiz_defaults_reach_the_prompt() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| {
                req.prompt.contains("with 5 multiple-choice questions")
                    && req.prompt.contains("(Première G1)")
            })
            .returning(|_| {
                Ok(Some(
                    r#"{"questions":[{"question":"Q","options":["A","B"],"correctAnswer":"A","explanation":"E"}]}"#
                        .to_string(),
                ))
            });

        let form = SubmittedForm::new()
            .with_field("subject", "Droit")
            .with_field("topic", "Le contrat");

        assert!(service(mock).generate_quiz(&form).await.is_success());
    }

    #[actix_web::test]
    async fn empty_exercise_is_rejected_without_model_call() {
        let form = SubmittedForm::new()
            .with_field("subject", "TQG")
            .with_file("exerciseImage", UploadedFile::new("image/png", vec![]));

        let response = service(no_calls()).solve_exercise(&form).await;
        assert_eq!(
            response.error.as_deref(),
            Some("Please provide the exercise text or image.")
        );
    }

    #[actix_web::test]
    async fn provider_failure_is_prefixed() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Err(AppError::ProviderError("503 from upstream".to_string())));

        let form = SubmittedForm::new()
            .with_field("subject", "Droit")
            .with_field("question", "Qu'est-ce qu'un contrat ?");

        let response = service(mock).ask_question(&form).await;
        assert_eq!(response.outcome, ActionOutcome::Failed);
        let error = response.error.expect("error should be set");
        assert!(error.starts_with("Could not get an answer: "));
        assert!(!error.contains("503"));
    }

    #[actix_web::test]
    async fn empty_model_output_keeps_flow_message() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate().times(1).returning(|_| Ok(None));

        let form = SubmittedForm::new()
            .with_field("subject", "Droit")
            .with_field("topic", "Le contrat")
            .with_field("questionCount", "3");

        let response = service(mock).generate_quiz(&form).await;
        assert_eq!(
            response.error.as_deref(),
            Some("Failed to generate quiz: Failed to generate quiz. The AI model returned no output.")
        );
    }

    struct PanickingProvider;

    #[async_trait]
    impl ModelProvider for PanickingProvider {
        async fn generate(&self, _request: GenerationRequest) -> AppResult<Option<String>> {
            panic!("provider blew up")
        }
    }

    #[actix_web::test]
    async fn panics_degrade_to_unexpected_error() {
        let service = ActionService::new(FlowRunner::new(Arc::new(PanickingProvider), "test-model"));
        let form = SubmittedForm::new()
            .with_field("subject", "Droit")
            .with_field("chapter", "Les contrats");

        let response = service.generate_course(&form).await;
        assert_eq!(response.outcome, ActionOutcome::Unexpected);
        assert_eq!(response.error.as_deref(), Some("An unexpected error occurred."));
    }

    #[actix_web::test]
    async fn conversation_records_both_sides() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .returning(|_| Ok(Some("{\"answer\":\"Un accord de volontés.\"}".to_string())));

        let form = SubmittedForm::new()
            .with_field("subject", "Droit")
            .with_field("question", "Qu'est-ce qu'un contrat ?");

        let mut conversation = Conversation::new();
        service(mock)
            .ask_in_conversation(&mut conversation, &form)
            .await;

        let contents: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["Qu'est-ce qu'un contrat ?", "Un accord de volontés."]);
    }
}
