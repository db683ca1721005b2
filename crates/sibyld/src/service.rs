//! Completion service.
//!
//! Renders one of the fixed prompt templates, issues a single completion
//! call, and wraps the raw text in a response envelope. The provider client
//! is injected at construction; there is no shared global state.

use crate::prompts;
use serde_json::{Map, Value};
use sibyl_common::{
    AnalysisResponse, CompletionClient, CompletionError, DecisionResponse, RecommendationResponse,
    ResponseMetadata, FIXED_CONFIDENCE,
};
use std::sync::Arc;
use tracing::info;

/// Service wrapping the completion provider
pub struct CompletionService {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl CompletionService {
    pub fn new(client: Arc<dyn CompletionClient>, model: String) -> Self {
        Self { client, model }
    }

    /// Model name reported in envelope metadata.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn metadata(&self) -> ResponseMetadata {
        ResponseMetadata::now(&self.model)
    }

    /// Generate a decision recommendation from context and options.
    pub async fn decide(
        &self,
        context: &Map<String, Value>,
        options: &[String],
    ) -> Result<DecisionResponse, CompletionError> {
        let prompt = prompts::decision_prompt(context, options);
        let text = self.client.complete(&prompt).await?;

        info!("Decision generated ({} options)", options.len());

        Ok(DecisionResponse {
            decision: text,
            confidence_score: FIXED_CONFIDENCE,
            metadata: self.metadata(),
        })
    }

    /// Analyze data and answer a question about it.
    pub async fn analyze(
        &self,
        data: &Map<String, Value>,
        question: &str,
    ) -> Result<AnalysisResponse, CompletionError> {
        let prompt = prompts::analysis_prompt(data, question);
        let text = self.client.complete(&prompt).await?;

        info!("Analysis generated for question: {}", question);

        Ok(AnalysisResponse {
            analysis: text,
            confidence_score: FIXED_CONFIDENCE,
            metadata: self.metadata(),
        })
    }

    /// Generate personalized recommendations from user context.
    pub async fn recommend(
        &self,
        user_context: &Map<String, Value>,
    ) -> Result<RecommendationResponse, CompletionError> {
        let prompt = prompts::recommendation_prompt(user_context);
        let text = self
            .client
            .chat(prompts::RECOMMENDATION_SYSTEM_PROMPT, &prompt)
            .await?;

        info!("Recommendations generated");

        Ok(RecommendationResponse {
            recommendations: text,
            confidence_score: FIXED_CONFIDENCE,
            metadata: self.metadata(),
        })
    }
}
