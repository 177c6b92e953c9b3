//! Collaborator capabilities the generation pipeline depends on:
//! configuration lookup and fire-and-forget archiving.

pub mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::generation::config::Template;
use crate::models::message::MessageRecord;

/// Per-user settings relevant to message generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSettings {
    pub include_ats_score: bool,
    pub default_template_id: Option<Uuid>,
}

#[async_trait]
pub trait ConfigLookup: Send + Sync {
    /// Settings of the user owning `document_id`; defaults when none are saved.
    async fn load_settings(&self, document_id: Uuid) -> Result<UserSettings>;

    async fn load_template(&self, template_id: Uuid) -> Result<Option<Template>>;
}

#[async_trait]
pub trait Archive: Send + Sync {
    async fn store_extracted_text(&self, document_id: Uuid, text: &str) -> Result<()>;

    async fn store_message(&self, record: &MessageRecord) -> Result<()>;
}
