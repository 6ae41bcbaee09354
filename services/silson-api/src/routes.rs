use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use silson_core::error::AppError;
use silson_core::reimbursement::{
    CostBreakdown, DomainViolation, Facility, Generation, GenerationRule, ResultVector,
    TreatmentContext, TreatmentType, Won,
};
use silson_core::report::{comparison_cards, ComparisonCardView, LedgerSummary, ReceiptLedger};
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Serialize)]
pub(crate) struct GenerationView {
    pub(crate) generation: Generation,
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) cap_description: &'static str,
}

impl From<&GenerationRule> for GenerationView {
    fn from(rule: &GenerationRule) -> Self {
        Self {
            generation: rule.generation,
            name: rule.name,
            description: rule.description,
            cap_description: rule.cap_description,
        }
    }
}

/// Cost lines as submitted. Signed so negative input is reported instead of
/// rejected by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmittedCosts {
    #[serde(default)]
    pub(crate) pay_self: i64,
    #[serde(default)]
    pub(crate) pay_nhis: i64,
    #[serde(default)]
    pub(crate) pay_full: i64,
    #[serde(default)]
    pub(crate) non_pay_select: i64,
    #[serde(default)]
    pub(crate) non_pay_other: i64,
}

impl TryFrom<SubmittedCosts> for CostBreakdown {
    type Error = DomainViolation;

    fn try_from(costs: SubmittedCosts) -> Result<Self, Self::Error> {
        CostBreakdown::from_signed(
            costs.pay_self,
            costs.pay_nhis,
            costs.pay_full,
            costs.non_pay_select,
            costs.non_pay_other,
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    pub(crate) treatment_type: String,
    pub(crate) facility: String,
    #[serde(default)]
    pub(crate) costs: SubmittedCosts,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuoteResponse {
    pub(crate) treatment_type: TreatmentType,
    pub(crate) facility: Facility,
    pub(crate) costs: CostBreakdown,
    pub(crate) total_cost: Won,
    pub(crate) payouts: ResultVector,
    pub(crate) comparison: Vec<ComparisonCardView>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BatchRequest {
    pub(crate) receipts_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BatchResponse {
    #[serde(flatten)]
    pub(crate) summary: LedgerSummary,
    pub(crate) comparison: Vec<ComparisonCardView>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/generations", get(generations_endpoint))
        .route("/api/v1/reimbursement/quote", post(quote_endpoint))
        .route("/api/v1/reimbursement/batch", post(batch_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn generations_endpoint() -> Json<Vec<GenerationView>> {
    Json(GenerationRule::all().iter().map(GenerationView::from).collect())
}

pub(crate) async fn quote_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, AppError> {
    let treatment_type: TreatmentType = payload.treatment_type.parse()?;
    let facility: Facility = payload.facility.parse()?;
    let costs = CostBreakdown::try_from(payload.costs)?;

    let payouts = state
        .engine
        .evaluate(&costs, TreatmentContext::new(treatment_type, facility));

    Ok(Json(QuoteResponse {
        treatment_type,
        facility,
        costs,
        total_cost: costs.total_cost(),
        payouts,
        comparison: comparison_cards(&payouts),
    }))
}

pub(crate) async fn batch_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let reader = Cursor::new(payload.receipts_csv.into_bytes());
    let records = state.importer.from_reader(reader)?;
    let ledger = ReceiptLedger::evaluate(records, &state.engine);

    let summary = ledger.summary();
    info!(
        rows = summary.rows.len(),
        malformed = summary.malformed_rows,
        "receipt batch evaluated"
    );

    Ok(Json(BatchResponse {
        summary,
        comparison: ledger.comparison(),
    }))
}
