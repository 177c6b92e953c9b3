//! Axum route handlers for the Message Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::generator::{generate_message, GenerateRequest, GenerateResponse};
use crate::state::AppState;

/// POST /api/v1/messages/generate
///
/// Extracts the resume text, builds the prompt and returns the generated
/// WhatsApp message with the provider that produced it.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response = generate_message(
        state.fetcher.as_ref(),
        state.lookup.as_ref(),
        state.archive.as_ref(),
        &state.llm,
        request,
    )
    .await?;

    Ok(Json(response))
}
