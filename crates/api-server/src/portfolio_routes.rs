use anyhow::anyhow;
use axum::{
    extract::{Extension, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use consensus_core::{GoalFeasibility, PortfolioReport, ReportError};
use portfolio_optimizer::{evaluate_goal_feasibility, ExportData};
use serde::{Deserialize, Serialize};

use crate::request_id::RequestId;
use crate::{ApiResponse, AppError, AppState, CacheEntry};

/// Body of `GET /api/portfolio`
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioPayload {
    pub report: PortfolioReport,
    pub feasibility: GoalFeasibility,
}

#[derive(Debug, Default, Deserialize)]
pub struct PortfolioQuery {
    pub refresh: Option<String>,
    pub format: Option<String>,
}

impl PortfolioQuery {
    fn refresh(&self) -> bool {
        self.refresh.as_deref() == Some("true")
    }

    fn flat(&self) -> bool {
        self.format.as_deref() == Some("flat")
    }
}

pub fn portfolio_routes() -> Router<AppState> {
    Router::new()
        .route("/api/portfolio", get(get_portfolio))
        .route("/api/portfolio/export", get(export_portfolio))
}

async fn get_portfolio(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Response, AppError> {
    let refresh = query.refresh();
    let payload = load_payload(&state, refresh).await?;
    tracing::info!(
        %request_id,
        refresh,
        report_date = %payload.report.metadata.report_date,
        "Portfolio served"
    );

    let cache_control = if refresh {
        HeaderValue::from_static("no-cache")
    } else {
        HeaderValue::from_str(&format!(
            "public, max-age={}",
            state.config.cache_max_age_secs
        ))?
    };

    Ok((
        [(header::CACHE_CONTROL, cache_control)],
        Json(ApiResponse::success(payload)),
    )
        .into_response())
}

async fn export_portfolio(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PortfolioQuery>,
) -> Result<Response, AppError> {
    let payload = load_payload(&state, query.refresh()).await?;
    let report = &payload.report;
    tracing::info!(%request_id, flat = query.flat(), "Portfolio exported");

    let body = if query.flat() {
        serde_json::to_string_pretty(&ExportData::from_report(report))?
    } else {
        serde_json::to_string_pretty(report)?
    };
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"portfolio-{}.json\"",
        report.metadata.report_date
    ))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Cached payload for the configured user, regenerated when stale or on refresh
async fn load_payload(state: &AppState, refresh: bool) -> Result<PortfolioPayload, AppError> {
    let today = Utc::now().date_naive();
    let key = format!("{}:{}", state.config.user_name, today);

    if !refresh {
        let cached = state
            .report_cache
            .get(&key)
            .filter(|entry| entry.is_fresh(state.config.cache_max_age_secs))
            .map(|entry| entry.data.clone());
        if let Some(payload) = cached {
            tracing::debug!("Serving cached report for {}", key);
            return Ok(payload);
        }
    }

    let engine = state.engine.clone();
    let ctx = state.config.user_context(today);
    let payload = tokio::task::spawn_blocking(move || -> Result<PortfolioPayload, ReportError> {
        let report = engine.generate_full_report(&ctx)?;
        let feasibility = evaluate_goal_feasibility(&report);
        Ok(PortfolioPayload { report, feasibility })
    })
    .await
    .map_err(|e| anyhow!("Report generation task failed: {}", e))??;

    state
        .report_cache
        .insert(key, CacheEntry::new(payload.clone()));
    Ok(payload)
}
