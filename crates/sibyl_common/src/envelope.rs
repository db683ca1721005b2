//! Response envelopes returned by the completion endpoints.
//!
//! Fixed-shape wrappers around generated text: the result field, a
//! confidence score, and provider metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence reported on every envelope.
// TODO: replace with a computed score once a scoring model exists; the
// literal is part of the current wire contract.
pub const FIXED_CONFIDENCE: f64 = 0.8;

/// Provider metadata attached to every envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Model that produced the text
    pub model: String,
    /// When the completion was produced (UTC)
    pub timestamp: DateTime<Utc>,
}

impl ResponseMetadata {
    /// Metadata stamped with the current time.
    pub fn now(model: &str) -> Self {
        Self {
            model: model.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Decision endpoint envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub decision: String,
    pub confidence_score: f64,
    pub metadata: ResponseMetadata,
}

/// Analysis endpoint envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub confidence_score: f64,
    pub metadata: ResponseMetadata,
}

/// Recommendation endpoint envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: String,
    pub confidence_score: f64,
    pub metadata: ResponseMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_now_stamps_model_and_recent_time() {
        let meta = ResponseMetadata::now("gpt-4");
        assert_eq!(meta.model, "gpt-4");

        let age = Utc::now().signed_duration_since(meta.timestamp);
        assert!(age.num_seconds() < 5);
    }

    #[test]
    fn test_decision_envelope_json_shape() {
        let envelope = DecisionResponse {
            decision: "Choose B".to_string(),
            confidence_score: FIXED_CONFIDENCE,
            metadata: ResponseMetadata::now("gpt-4"),
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["decision"], "Choose B");
        assert_eq!(json["confidence_score"], 0.8);
        assert_eq!(json["metadata"]["model"], "gpt-4");

        // Timestamp serializes as an ISO-8601 string
        let ts = json["metadata"]["timestamp"].as_str().unwrap();
        assert!(ts.parse::<DateTime<Utc>>().is_ok());
    }

    #[test]
    fn test_recommendation_envelope_field_name() {
        let envelope = RecommendationResponse {
            recommendations: "Upgrade to platinum".to_string(),
            confidence_score: FIXED_CONFIDENCE,
            metadata: ResponseMetadata::now("gpt-4"),
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert!(json.get("recommendations").is_some());
        assert!(json.get("text").is_none());
    }
}
