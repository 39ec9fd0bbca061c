use crate::{
    constants::prompts::{render, PRESENTATION_PROMPT},
    errors::AppResult,
    models::dto::artifacts::PresentationPlan,
};

use super::{FlowDefinition, FlowRunner, SafetyProfile};

const PRESENTATION_FLOW: FlowDefinition = FlowDefinition {
    name: "presentationAssistant",
    safety: SafetyProfile::ProviderDefault,
    temperature: Some(0.7),
    empty_output_message: "Failed to generate presentation plan. The AI model returned no output.",
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationInput {
    pub subject: String,
    pub topic: String,
}

pub fn build_prompt(input: &PresentationInput) -> String {
    render(
        PRESENTATION_PROMPT,
        &[("subject", &input.subject), ("topic", &input.topic)],
    )
}

impl FlowRunner {
    pub async fn plan_presentation(&self, input: PresentationInput) -> AppResult<PresentationPlan> {
        self.run(&PRESENTATION_FLOW, build_prompt(&input), None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::model_service::MockModelProvider;

    #[actix_web::test]
    async fn presentation_uses_higher_temperature_and_no_safety() {
        let mut mock = MockModelProvider::new();
        mock.expect_generate()
            .times(1)
            .withf(|req| {
                req.temperature == Some(0.7)
                    && req.safety_settings.is_empty()
                    && req.prompt.contains("\"La responsabilité civile\"")
            })
            .returning(|_| {
                Ok(Some(
                    r#"{
                        "title": "La responsabilité civile",
                        "problematique": "Qui répare le dommage ?",
                        "introduction": "Amorce...",
                        "plan": [{"part": "I. Les conditions", "subparts": ["A. La faute"]}],
                        "conclusion": "Ouverture...",
                        "sources": "Code civil"
                    }"#
                    .to_string(),
                ))
            });

        let runner = FlowRunner::new(Arc::new(mock), "test-model");
        let plan = runner
            .plan_presentation(PresentationInput {
                subject: "Droit".to_string(),
                topic: "La responsabilité civile".to_string(),
            })
            .await
            .expect("flow should succeed");

        assert_eq!(plan.plan.len(), 1);
        assert_eq!(plan.plan[0].subparts, vec!["A. La faute".to_string()]);
    }
}
