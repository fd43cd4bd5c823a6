use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, warn};

use super::dates::Clock;
use super::domain::ValidationError;
use super::report::views::StreakView;
use super::report::LedgerReport;
use super::score::{ScoreBreakdown, ScoreInputs};
use super::service::{
    ClassifyRequest, ClassifyResponse, LedgerService, ReportRequest, StreakRequest,
};
use crate::error::AppError;

/// Router exposing the ledger computations over HTTP.
pub fn ledger_router<C>(service: Arc<LedgerService<C>>) -> Router
where
    C: Clock + 'static,
{
    Router::new()
        .route("/api/v1/ledger/classify", post(classify_handler::<C>))
        .route("/api/v1/ledger/streak", post(streak_handler::<C>))
        .route("/api/v1/ledger/score", post(score_handler::<C>))
        .route("/api/v1/ledger/report", post(report_handler::<C>))
        .with_state(service)
}

fn rejected(error: ValidationError) -> AppError {
    warn!(%error, "rejected ledger payload");
    AppError::from(error)
}

pub(crate) async fn classify_handler<C>(
    State(service): State<Arc<LedgerService<C>>>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError>
where
    C: Clock + 'static,
{
    service.classify(request).map(Json).map_err(rejected)
}

pub(crate) async fn streak_handler<C>(
    State(service): State<Arc<LedgerService<C>>>,
    Json(request): Json<StreakRequest>,
) -> Result<Json<StreakView>, AppError>
where
    C: Clock + 'static,
{
    service.streak(request).map(Json).map_err(rejected)
}

pub(crate) async fn score_handler<C>(
    State(service): State<Arc<LedgerService<C>>>,
    Json(inputs): Json<ScoreInputs>,
) -> Json<ScoreBreakdown>
where
    C: Clock + 'static,
{
    Json(service.score(inputs))
}

pub(crate) async fn report_handler<C>(
    State(service): State<Arc<LedgerService<C>>>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<LedgerReport>, AppError>
where
    C: Clock + 'static,
{
    let report = service.report(request).map_err(rejected)?;
    info!(
        today = %report.today,
        streak = report.streak.current,
        score = report.score.total,
        "served ledger report"
    );
    Ok(Json(report))
}
