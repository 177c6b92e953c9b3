//! Message generation — one sequential pipeline per request.
//!
//! Flow: validate → load settings/template → resolve config → fetch + extract →
//!       archive extracted text → build prompt → complete → archive message.
//!
//! Extraction faults never surface here; only completion failures after both
//! providers, bad input, and lookup errors reach the caller.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::fetch::DocumentFetcher;
use crate::extraction::orchestrator::extract;
use crate::extraction::FileType;
use crate::generation::config::{GenerationConfig, Language, Template};
use crate::generation::prompt_builder::build_prompt;
use crate::llm_client::{CompletionClient, ProviderTag};
use crate::models::message::MessageRecord;
use crate::storage::{Archive, ConfigLookup};

/// Request body for message generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub document_id: Uuid,
    pub customer_name: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub include_questions: bool,
    pub file_url: String,
    pub file_type: String,
    pub template_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub message: String,
    pub provider_tag: ProviderTag,
}

/// Runs the full generation pipeline for one resume.
pub async fn generate_message(
    fetcher: &dyn DocumentFetcher,
    lookup: &dyn ConfigLookup,
    archive: &dyn Archive,
    llm: &CompletionClient,
    request: GenerateRequest,
) -> Result<GenerateResponse, AppError> {
    let file_type = validate(&request)?;
    let customer_name = request.customer_name.trim();

    // Step 1: settings and template, merged once
    let settings = lookup.load_settings(request.document_id).await?;
    let template_id = request.template_id.or(settings.default_template_id);
    let template = load_template(lookup, template_id).await?;

    let config = GenerationConfig {
        language: request.language,
        include_interview_questions: request.include_questions,
        include_ats_score: settings.include_ats_score,
        template,
    }
    .resolve();

    // Step 2: fetch + extract (never fails)
    info!(
        "Generating message for resume {} ({})",
        request.document_id, file_type
    );
    let extraction = extract(fetcher, &request.file_url, file_type).await;
    info!(
        "Extraction {:?}: {} chars for prompt",
        extraction.status,
        extraction.text.chars().count()
    );

    if let Err(e) = archive
        .store_extracted_text(request.document_id, &extraction.archival_text)
        .await
    {
        warn!("Archiving extracted text failed: {e:#}");
    }

    // Step 3: prompt + completion
    let prompt = build_prompt(customer_name, &extraction.text, &config);
    let completion = llm.complete(&prompt).await?;

    // Step 4: archive result
    let record = MessageRecord {
        document_id: request.document_id,
        customer_name: customer_name.to_string(),
        message: completion.text.clone(),
        language: request.language,
        provider: completion.provider,
        template_id,
    };
    if let Err(e) = archive.store_message(&record).await {
        warn!("Archiving generated message failed: {e:#}");
    }

    info!(
        "Generated message for resume {} via {} provider",
        request.document_id, completion.provider
    );

    Ok(GenerateResponse {
        message: completion.text,
        provider_tag: completion.provider,
    })
}

fn validate(request: &GenerateRequest) -> Result<FileType, AppError> {
    if request.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customerName cannot be empty".to_string()));
    }
    if request.file_url.trim().is_empty() {
        return Err(AppError::Validation("fileUrl cannot be empty".to_string()));
    }
    request
        .file_type
        .parse::<FileType>()
        .map_err(|e| AppError::Validation(e.to_string()))
}

async fn load_template(
    lookup: &dyn ConfigLookup,
    template_id: Option<Uuid>,
) -> Result<Option<Template>, AppError> {
    let Some(id) = template_id else {
        return Ok(None);
    };
    let template = lookup.load_template(id).await?;
    if template.is_none() {
        warn!("Template {id} not found, generating with defaults");
    }
    Ok(template)
}
