//! Distribution query endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use distribution_core::{Category, StrikeBin};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;

/// Query parameters for listing contracts
#[derive(Debug, Deserialize)]
pub struct ListContractsQuery {
    /// Filter by category (fed_levels, headline_cpi_releases, ...)
    pub category: Option<String>,
}

/// Response for listing contracts
#[derive(Debug, Serialize)]
pub struct ContractsResponse {
    pub contracts: Vec<String>,
}

/// Response for listing categories
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// Query parameters for listing prediction dates
#[derive(Debug, Deserialize)]
pub struct PredictionDatesQuery {
    pub contract_preamble: String,
    pub category: String,
}

/// Response for listing prediction dates
#[derive(Debug, Serialize)]
pub struct PredictionDatesResponse {
    pub dates: Vec<NaiveDate>,
}

/// Query parameters for fetching a distribution
#[derive(Debug, Deserialize)]
pub struct DistributionQuery {
    pub contract_preamble: String,
    /// One or two snapshot dates, comma-separated
    pub prediction_dates: String,
    /// Optional lower truncation bound in strike space
    pub smallest_bin: Option<Decimal>,
    /// Optional upper truncation bound in strike space
    pub largest_bin: Option<Decimal>,
}

/// Response for a distribution query, keyed by requested date
#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    pub strike_labels: Vec<Decimal>,
    pub data: BTreeMap<String, Vec<StrikeBin>>,
}

/// Query parameters for contract metadata
#[derive(Debug, Deserialize)]
pub struct ContractInfoQuery {
    pub contract_preamble: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Create distribution routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/contracts", get(list_contracts))
        .route("/categories", get(list_categories))
        .route("/prediction-dates", get(prediction_dates))
        .route("/distribution", get(get_distribution))
        .route("/contract-info", get(contract_info))
}

/// List contracts with optional category filtering
async fn list_contracts(
    State(state): State<AppState>,
    Query(params): Query<ListContractsQuery>,
) -> Json<ContractsResponse> {
    info!("Listing contracts with params: {:?}", params);

    // An unrecognized category filter matches nothing rather than erroring
    let contracts = match params.category.as_deref() {
        None => state.service.list_contracts(None),
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => state.service.list_contracts(Some(category)),
            Err(_) => Vec::new(),
        },
    };

    Json(ContractsResponse { contracts })
}

/// List the category tags present in the table
async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: state.service.categories(),
    })
}

/// List distinct snapshot dates for one (contract, category)
async fn prediction_dates(
    State(state): State<AppState>,
    Query(params): Query<PredictionDatesQuery>,
) -> Json<PredictionDatesResponse> {
    info!(
        "Listing prediction dates for {} ({})",
        params.contract_preamble, params.category
    );

    let dates = match params.category.parse::<Category>() {
        Ok(category) => state
            .service
            .prediction_dates(&params.contract_preamble, category),
        Err(_) => Vec::new(),
    };

    Json(PredictionDatesResponse { dates })
}

/// Fetch the rebinned distribution for one or two prediction dates
async fn get_distribution(
    State(state): State<AppState>,
    Query(params): Query<DistributionQuery>,
) -> impl IntoResponse {
    info!(
        "Fetching distribution for {} on {}",
        params.contract_preamble, params.prediction_dates
    );

    let raw_dates: Vec<&str> = params
        .prediction_dates
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if raw_dates.is_empty() || raw_dates.len() > 2 {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "prediction_dates expects one or two comma-separated dates".to_string(),
            }),
        )
            .into_response();
    }

    let mut dates = Vec::with_capacity(raw_dates.len());
    for raw in &raw_dates {
        match raw.parse::<NaiveDate>() {
            Ok(date) => dates.push(date),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Unparsable prediction date: {}", raw),
                    }),
                )
                    .into_response();
            }
        }
    }

    match state.service.distribution(
        &params.contract_preamble,
        &dates,
        params.smallest_bin,
        params.largest_bin,
    ) {
        Ok(series) => {
            let data: BTreeMap<String, Vec<StrikeBin>> = series
                .data
                .into_iter()
                .map(|ds| (ds.prediction_date.to_string(), ds.bins))
                .collect();

            (
                StatusCode::OK,
                Json(DistributionResponse {
                    strike_labels: series.strike_labels,
                    data,
                }),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// Fetch horizon metadata for one contract
async fn contract_info(
    State(state): State<AppState>,
    Query(params): Query<ContractInfoQuery>,
) -> impl IntoResponse {
    info!("Fetching contract info for {}", params.contract_preamble);

    match state.service.contract_info(&params.contract_preamble) {
        Some(contract) => (StatusCode::OK, Json(contract)).into_response(),
        // Unknown contracts resolve to an empty object, not an error
        None => (StatusCode::OK, Json(serde_json::json!({}))).into_response(),
    }
}
