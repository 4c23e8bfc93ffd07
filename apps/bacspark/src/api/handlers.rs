//! HTTP request handlers.

use super::AppState;
use super::error::ApiError;
use super::types::{
    ActivationResponse, CodePageResponse, CodeResponse, CodesQuery, HealthResponse, RedeemRequest,
    RedeemResponse, SummaryEntry,
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use bacspark_core::{CategoryId, CategorySnapshot, CodeId, pagination};
use tracing::{debug, info};

// =============================================================================
// VISITOR ROUTES
// =============================================================================

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn categories_handler(State(state): State<AppState>) -> Json<Vec<CategorySnapshot>> {
    let session = state.session.read().await;
    Json(session.categories())
}

pub async fn activation_handler(State(state): State<AppState>) -> Json<ActivationResponse> {
    let session = state.session.read().await;
    Json(ActivationResponse {
        active: session.active_category().cloned(),
    })
}

pub async fn redeem_handler(
    State(state): State<AppState>,
    payload: Result<Json<RedeemRequest>, JsonRejection>,
) -> Result<Json<RedeemResponse>, ApiError> {
    let Json(request) = payload?;
    if request.code.trim().is_empty() {
        return Err(ApiError::EmptyCode);
    }

    tokio::time::sleep(state.validation_delay).await;

    let mut session = state.session.write().await;
    match session.redeem(&request.code) {
        Ok(redemption) => {
            info!(category = %redemption.category, "Code redeemed");
            Ok(Json(redemption.into()))
        }
        Err(err) => {
            debug!(input_len = request.code.len(), "Code rejected");
            Err(err.into())
        }
    }
}

// =============================================================================
// ADMIN ROUTES
// =============================================================================

pub async fn admin_codes_handler(
    State(state): State<AppState>,
    Query(query): Query<CodesQuery>,
) -> Result<Json<CodePageResponse>, ApiError> {
    let category = query.category.filter(|c| !c.is_empty()).map(CategoryId::new);
    let session = state.session.read().await;

    let page = session
        .available_page(
            category.as_ref(),
            query.page.unwrap_or(1),
            query.per_page.unwrap_or(pagination::DEFAULT_PER_PAGE),
        )?
        .map(CodeResponse::from);

    Ok(Json(page.into()))
}

pub async fn admin_mark_used_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CodeResponse>, ApiError> {
    let id = CodeId::new(id);
    let mut session = state.session.write().await;
    let code = session.mark_used(&id, chrono::Utc::now())?;

    info!(code_id = %code.id, category = %code.category, "Code marked used");
    Ok(Json(CodeResponse::from(code)))
}

pub async fn admin_history_handler(State(state): State<AppState>) -> Json<Vec<CodeResponse>> {
    let session = state.session.read().await;
    Json(
        session
            .used_history()
            .into_iter()
            .map(CodeResponse::from)
            .collect(),
    )
}

pub async fn admin_summary_handler(State(state): State<AppState>) -> Json<Vec<SummaryEntry>> {
    let session = state.session.read().await;
    let entries = session
        .summary()
        .into_iter()
        .map(|summary| {
            let name = session
                .category(&summary.category)
                .map(|c| c.display_name.clone())
                .unwrap_or_default();
            SummaryEntry::new(summary, name)
        })
        .collect();
    Json(entries)
}
