//! Exercise solving, either from a photographed exercise or from free text/image input.

use crate::{
    constants::prompts::{render, ANY_EXERCISE_FOOTER, ANY_EXERCISE_PROMPT, IMAGE_EXERCISE_PROMPT},
    errors::AppResult,
    models::dto::artifacts::PracticeProblemOutput,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

const IMAGE_EXERCISE_FLOW: FlowDefinition = FlowDefinition {
    name: "solveImageExercise",
    safety: SafetyProfile::BlockOnlyHigh,
    temperature: None,
    empty_output_message: "Failed to generate problem. The AI model returned no output.",
};

const ANY_EXERCISE_FLOW: FlowDefinition = FlowDefinition {
    name: "solveAnyExercise",
    safety: SafetyProfile::BlockOnlyHigh,
    temperature: None,
    empty_output_message: "Failed to generate problem. The AI model returned no output.",
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveImageExerciseInput {
    pub subject: String,
    pub student_level: String,
    /// Data URI of the exercise photo.
    pub exercise_image: String,
}

/// The single source of an exercise. Text and image are never sent together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExerciseContent {
    Text(String),
    /// Data URI.
    Image(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolveAnyExerciseInput {
    pub subject: String,
    pub student_level: String,
    pub exercise: ExerciseContent,
}

pub fn build_image_prompt(input: &SolveImageExerciseInput) -> String {
    render(
        IMAGE_EXERCISE_PROMPT,
        &[
            ("studentLevel", &input.student_level),
            ("subject", &input.subject),
        ],
    )
}

pub fn build_any_prompt(input: &SolveAnyExerciseInput) -> String {
    let mut prompt = render(
        ANY_EXERCISE_PROMPT,
        &[
            ("studentLevel", &input.student_level),
            ("subject", &input.subject),
        ],
    );

    match &input.exercise {
        ExerciseContent::Image(_) => {
            prompt.push_str("\n\nImage de l'exercice : voir l'image jointe.");
        }
        ExerciseContent::Text(text) => {
            prompt.push_str("\n\nTexte de l'exercice :\n");
            prompt.push_str(text);
        }
    }

    prompt.push_str("\n\n");
    prompt.push_str(ANY_EXERCISE_FOOTER);
    prompt
}

impl FlowRunner {
    pub async fn solve_image_exercise(
        &self,
        input: SolveImageExerciseInput,
    ) -> AppResult<PracticeProblemOutput> {
        let prompt = build_image_prompt(&input);
        self.run(&IMAGE_EXERCISE_FLOW, prompt, Some(input.exercise_image))
            .await
    }

    pub async fn solve_any_exercise(
        &self,
        input: SolveAnyExerciseInput,
    ) -> AppResult<PracticeProblemOutput> {
        let prompt = build_any_prompt(&input);
        let image = match input.exercise {
            ExerciseContent::Image(uri) => Some(uri),
            ExerciseContent::Text(_) => None,
        };
        self.run(&ANY_EXERCISE_FLOW, prompt, image).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::model_service::MockModelProvider;

    const SOLVED: &str = r#"{"problem":"Calculer la VAN","solution":"VAN = ...","keyConcepts":["Actualisation"]}"#;

    #[test]
    fn text_exercise_is_embedded_before_footer() {
        let prompt = build_any_prompt(&SolveAnyExerciseInput {
            subject: "TQG".to_string(),
            student_level: "Première G1".to_string(),
            exercise: ExerciseContent::Text("Résoudre 2x + 3 = 7".to_string()),
        });

        let text_at = prompt.find("Résoudre 2x + 3 = 7").expect("text should be embedded");
        let footer_at = prompt.find(ANY_EXERCISE_FOOTER).expect("footer should be present");
        assert!(text_at < footer_at);
        assert!(!prompt.contains("voir l'image jointe"));
    }

    #[actix_web::test]
    async fn image_exercise_sends_only_the_image() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| {
                req.flow == "solveAnyExercise"
                    && req.image.as_deref() == Some("data:image/jpeg;base64,/9j/")
                    && !req.prompt.contains("Texte de l'exercice")
            })
            .returning(|_| Ok(Some(SOLVED.to_string())));

        let runner = FlowRunner::new(Arc::new(mock), "test-model");
        let output = runner
            .solve_any_exercise(SolveAnyExerciseInput {
                subject: "Comptabilité et Finance".to_string(),
                student_level: "Première G1".to_string(),
                exercise: ExerciseContent::Image("data:image/jpeg;base64,/9j/".to_string()),
            })
            .await
            .expect("flow should succeed");

        assert_eq!(output.key_concepts, vec!["Actualisation".to_string()]);
    }

    #[actix_web::test]
    async fn photographed_exercise_attaches_image() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| req.flow == "solveImageExercise" && req.image.is_some())
            .returning(|_| Ok(Some(SOLVED.to_string())));

        let runner = FlowRunner::new(Arc::new(mock), "test-model");
        let output = runner
            .solve_image_exercise(SolveImageExerciseInput {
                subject: "TQG".to_string(),
                student_level: "Première G1".to_string(),
                exercise_image: "data:image/png;base64,AAAA".to_string(),
            })
            .await
            .expect("flow should succeed");

        assert_eq!(output.problem, "Calculer la VAN");
    }
}
