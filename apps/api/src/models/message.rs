use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::generation::config::Language;
use crate::llm_client::ProviderTag;

/// A generated message as archived after a successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageRecord {
    pub document_id: Uuid,
    pub customer_name: String,
    pub message: String,
    pub language: Language,
    pub provider: ProviderTag,
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedMessageRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub user_id: Uuid,
    pub customer_name: String,
    pub message: String,
    pub language: String,
    pub provider: String,
    pub template_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
