//! Interaction record contract.
//!
//! Describes how a completed interaction would be persisted by a storage
//! service: owning user, type tag, timestamp, JSON blobs for
//! context/input/output, confidence score, and free-form metadata. No
//! lifecycle operations live here; the daemon never reads or writes
//! storage itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Decision,
    Analysis,
    Recommendation,
}

impl InteractionKind {
    /// Short label for display
    pub fn label(&self) -> &'static str {
        match self {
            InteractionKind::Decision => "decision",
            InteractionKind::Analysis => "analysis",
            InteractionKind::Recommendation => "recommendation",
        }
    }
}

/// One persisted interaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// Record id
    pub id: Uuid,

    /// Owning user
    pub user_id: i64,

    /// When the interaction happened (UTC)
    pub timestamp: DateTime<Utc>,

    /// Interaction type tag
    pub interaction_type: InteractionKind,

    /// Context the interaction ran with
    pub context: serde_json::Value,

    /// Input data as submitted
    pub input: serde_json::Value,

    /// The provider's response
    pub output: serde_json::Value,

    /// Confidence reported on the envelope
    pub confidence_score: f64,

    /// Additional metadata about the interaction
    pub metadata: serde_json::Value,
}
