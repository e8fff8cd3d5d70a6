use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::service::{AnalysisService, AnalysisServiceError};
use super::source::{LedgerBuildError, LedgerSource};
use crate::scoring::Ledger;

/// Router builder exposing the scoring endpoints.
pub fn analysis_router<S>(service: Arc<AnalysisService<S>>) -> Router
where
    S: LedgerSource + 'static,
{
    Router::new()
        .route("/api/v1/analyze", get(analyze_handler::<S>))
        .route("/api/v1/scorecard", post(scorecard_handler::<S>))
        .route("/api/v1/rules", get(rules_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeParams {
    pub ticker: Option<String>,
}

pub(crate) async fn analyze_handler<S>(
    State(service): State<Arc<AnalysisService<S>>>,
    Query(params): Query<AnalyzeParams>,
) -> Response
where
    S: LedgerSource + 'static,
{
    let Some(ticker) = params.ticker.filter(|ticker| !ticker.trim().is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "ticker query parameter is required".to_string(),
        );
    };

    // Ledger sources read from disk.
    let outcome = tokio::task::spawn_blocking(move || service.analyze(&ticker)).await;

    match outcome {
        Ok(Ok(report)) => (StatusCode::OK, Json(report)).into_response(),
        Ok(Err(AnalysisServiceError::Ledger(error @ LedgerBuildError::TickerNotFound(_)))) => {
            error_response(StatusCode::NOT_FOUND, error.to_string())
        }
        Ok(Err(AnalysisServiceError::Ledger(error @ LedgerBuildError::InvalidTicker(_)))) => {
            error_response(StatusCode::BAD_REQUEST, error.to_string())
        }
        Ok(Err(AnalysisServiceError::Ledger(
            error @ LedgerBuildError::IndustryRejected { .. },
        ))) => error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string()),
        Ok(Err(other)) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        Err(join_error) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("analysis task failed: {join_error}"),
        ),
    }
}

pub(crate) async fn scorecard_handler<S>(
    State(service): State<Arc<AnalysisService<S>>>,
    Json(ledger): Json<Ledger>,
) -> Response
where
    S: LedgerSource + 'static,
{
    let report = service.score(ledger);
    (StatusCode::OK, Json(report)).into_response()
}

pub(crate) async fn rules_handler<S>(State(service): State<Arc<AnalysisService<S>>>) -> Response
where
    S: LedgerSource + 'static,
{
    (StatusCode::OK, Json(service.rules())).into_response()
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
