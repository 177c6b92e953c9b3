use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::generation::config::{CustomerType, SectionOverrides, Template, Tone};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub tone: String,
    pub customer_type: String,
    /// JSON object of per-section booleans; absent keys are unset.
    pub sections: Value,
    pub custom_instructions: Option<String>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserSettingsRow {
    pub include_ats_score: bool,
    pub default_template_id: Option<Uuid>,
}

impl From<TemplateRow> for Template {
    fn from(row: TemplateRow) -> Self {
        let sections = match serde_json::from_value::<SectionOverrides>(row.sections) {
            Ok(sections) => sections,
            Err(e) => {
                warn!("Template {} has malformed sections, using defaults: {e}", row.id);
                SectionOverrides::default()
            }
        };

        Template {
            id: row.id,
            name: row.name,
            tone: Tone::parse_lenient(&row.tone),
            customer_type: CustomerType::parse_lenient(&row.customer_type),
            sections,
            custom_instructions: row.custom_instructions,
        }
    }
}
