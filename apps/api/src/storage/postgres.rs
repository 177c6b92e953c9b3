use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::generation::config::Template;
use crate::models::message::{GeneratedMessageRow, MessageRecord};
use crate::models::template::{TemplateRow, UserSettingsRow};
use crate::storage::{Archive, ConfigLookup, UserSettings};

/// PostgreSQL-backed lookup and archive. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConfigLookup for PgStore {
    async fn load_settings(&self, document_id: Uuid) -> Result<UserSettings> {
        let row: Option<UserSettingsRow> = sqlx::query_as(
            r#"
            SELECT s.include_ats_score, s.default_template_id
            FROM resumes r
            JOIN user_settings s ON s.user_id = r.user_id
            WHERE r.id = $1
            "#,
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load settings for resume {document_id}"))?;

        Ok(row
            .map(|r| UserSettings {
                include_ats_score: r.include_ats_score,
                default_template_id: r.default_template_id,
            })
            .unwrap_or_default())
    }

    async fn load_template(&self, template_id: Uuid) -> Result<Option<Template>> {
        let row: Option<TemplateRow> =
            sqlx::query_as("SELECT * FROM message_templates WHERE id = $1")
                .bind(template_id)
                .fetch_optional(&self.pool)
                .await
                .with_context(|| format!("Failed to load template {template_id}"))?;

        Ok(row.map(Template::from))
    }
}

#[async_trait]
impl Archive for PgStore {
    async fn store_extracted_text(&self, document_id: Uuid, text: &str) -> Result<()> {
        sqlx::query("UPDATE resumes SET extracted_text = $2, updated_at = now() WHERE id = $1")
            .bind(document_id)
            .bind(text)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to archive extracted text for resume {document_id}"))?;
        Ok(())
    }

    async fn store_message(&self, record: &MessageRecord) -> Result<()> {
        let row: GeneratedMessageRow = sqlx::query_as(
            r#"
            INSERT INTO generated_messages
                (resume_id, user_id, customer_name, message, language, provider, template_id)
            SELECT r.id, r.user_id, $2, $3, $4, $5, $6
            FROM resumes r
            WHERE r.id = $1
            RETURNING *
            "#,
        )
        .bind(record.document_id)
        .bind(&record.customer_name)
        .bind(&record.message)
        .bind(record.language.as_str())
        .bind(record.provider.as_str())
        .bind(record.template_id)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("Failed to archive message for resume {}", record.document_id))?;

        debug!("Archived message {} for resume {}", row.id, row.resume_id);
        Ok(())
    }
}
