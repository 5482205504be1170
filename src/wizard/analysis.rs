//! Analysis pipeline: personality analysis, then recommendations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::error::{AnalysisError, AnalysisStage};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::catalog::QuestionCatalog;
use super::prompts::{
    answers_payload, personality_prompt, recommendations_prompt, ANALYST_SYSTEM_PROMPT,
};
use super::state::{AnalysisReport, AnswerSet};

/// The two opaque text transforms the wizard hands off to.
#[async_trait]
pub trait AnalysisPipeline: Send + Sync {
    async fn analyze_personality(&self, answers: &AnswerSet) -> Result<String, AnalysisError>;

    async fn generate_recommendations(&self, personality: &str) -> Result<String, AnalysisError>;
}

/// Run both calls in order. Recommendations are never requested if the
/// personality analysis fails or comes back blank, whatever the pipeline.
pub async fn run_analysis(
    pipeline: &dyn AnalysisPipeline,
    answers: &AnswerSet,
) -> Result<AnalysisReport, AnalysisError> {
    let personality = non_blank(
        AnalysisStage::Personality,
        pipeline.analyze_personality(answers).await?,
    )?;
    let recommendations = non_blank(
        AnalysisStage::Recommendations,
        pipeline.generate_recommendations(&personality).await?,
    )?;
    Ok(AnalysisReport {
        personality,
        recommendations,
        generated_at: Utc::now(),
    })
}

fn non_blank(stage: AnalysisStage, text: String) -> Result<String, AnalysisError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        warn!(%stage, "Analysis stage produced no text");
        return Err(AnalysisError::EmptyOutput { stage });
    }
    Ok(trimmed.to_string())
}

/// Sampling settings for the analysis calls.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// Pipeline backed by an LLM provider.
pub struct LlmAnalysisPipeline {
    llm: Arc<dyn LlmProvider>,
    catalog: Arc<QuestionCatalog>,
    config: AnalysisConfig,
}

impl LlmAnalysisPipeline {
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        catalog: Arc<QuestionCatalog>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            llm,
            catalog,
            config,
        }
    }

    async fn generate(&self, stage: AnalysisStage, prompt: String) -> Result<String, AnalysisError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(ANALYST_SYSTEM_PROMPT),
            ChatMessage::user(prompt),
        ])
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens);

        let response = self.llm.complete(request).await.map_err(|source| {
            warn!(%stage, error = %source, "Analysis call failed");
            AnalysisError::Llm { stage, source }
        })?;

        let text = response.content.trim();
        if text.is_empty() {
            warn!(%stage, "Analysis call returned empty text");
            return Err(AnalysisError::EmptyOutput { stage });
        }

        info!(
            %stage,
            model = self.llm.model_name(),
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Analysis call complete"
        );
        Ok(text.to_string())
    }
}

#[async_trait]
impl AnalysisPipeline for LlmAnalysisPipeline {
    async fn analyze_personality(&self, answers: &AnswerSet) -> Result<String, AnalysisError> {
        let payload = answers_payload(answers, &self.catalog);
        self.generate(AnalysisStage::Personality, personality_prompt(&payload))
            .await
    }

    async fn generate_recommendations(&self, personality: &str) -> Result<String, AnalysisError> {
        self.generate(
            AnalysisStage::Recommendations,
            recommendations_prompt(personality),
        )
        .await
    }
}
