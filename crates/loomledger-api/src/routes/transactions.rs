//! Transaction ledger endpoints
//!
//! Endpoints:
//! - api_transactions: Filtered, sorted, capped ledger view with totals
//! - api_transaction_store: Record a new transaction
//! - api_transaction_update: Amend a record (admin gated)
//! - api_transactions_export: Flat six-column rows for tabular export
//! - api_categories: Category enumerations of the active location

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::AppState;
use loomledger_core::{
    tabular_rows, DisplayLimit, FilterCriteria, LedgerView, TabularRow, Totals, Transaction,
    TransactionFields, TypeFilter,
};
use loomledger_utils::format_number;

/// Totals rendered for display, with thousands separators
#[derive(Debug, Clone, Serialize)]
pub struct TotalsDisplay {
    pub income: String,
    pub expense: String,
    pub balance: String,
}

impl From<&Totals> for TotalsDisplay {
    fn from(totals: &Totals) -> Self {
        Self {
            income: format_number(totals.income),
            expense: format_number(totals.expense),
            balance: format_number(totals.balance),
        }
    }
}

/// Ledger view response
#[derive(Debug, Clone, Serialize)]
pub struct TransactionsResponse {
    pub rows: Vec<Transaction>,
    pub totals: Totals,
    pub display: TotalsDisplay,
    pub location: String,
}

fn parse_date(params: &HashMap<String, String>, key: &str) -> Result<Option<NaiveDate>, ApiError> {
    match params.get(key) {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::BadRequest {
                message: format!("{} is not a calendar date: {}", key, raw),
            }),
    }
}

/// Translate query parameters into filter criteria
///
/// Unknown parameters are ignored; malformed ones are a 400. The caller
/// picks the cap used when no `limit` parameter is given: the list view
/// defaults to the configured recent-rows cap, the export to all rows.
pub fn criteria_from_params(
    params: &HashMap<String, String>,
    default_limit: DisplayLimit,
) -> Result<FilterCriteria, ApiError> {
    let type_filter = match params.get("type") {
        None => TypeFilter::All,
        Some(raw) => raw
            .parse::<TypeFilter>()
            .map_err(|message| ApiError::BadRequest { message })?,
    };
    let limit = match params.get("limit") {
        None => default_limit,
        Some(raw) => raw
            .parse::<DisplayLimit>()
            .map_err(|message| ApiError::BadRequest { message })?,
    };
    Ok(FilterCriteria {
        start_date: parse_date(params, "start_date")?,
        end_date: parse_date(params, "end_date")?,
        type_filter,
        category: params.get("category").filter(|c| !c.is_empty()).cloned(),
        keyword: params.get("q").filter(|q| !q.is_empty()).cloned(),
        limit,
    })
}

/// Get the filtered ledger view (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let criteria = criteria_from_params(
        &params,
        DisplayLimit::Last(state.config.display.recent_limit),
    )?;
    let LedgerView { rows, totals } = state.ledger.view(&criteria);
    Ok(Json(TransactionsResponse {
        display: TotalsDisplay::from(&totals),
        rows,
        totals,
        location: state.ledger.active_location(),
    }))
}

/// Record a new transaction (JSON API)
pub async fn api_transaction_store(
    State(state): State<AppState>,
    Json(fields): Json<TransactionFields>,
) -> Result<Json<Transaction>, ApiError> {
    let created = state.ledger.submit(fields).await?;
    Ok(Json(created))
}

/// Amend a transaction (JSON API, admin gated)
pub async fn api_transaction_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(fields): Json<TransactionFields>,
) -> Result<Json<Transaction>, ApiError> {
    crate::require_admin(&state, &headers).await?;
    let amended = state.ledger.amend(&id, fields).await?;
    Ok(Json(amended))
}

/// Flat rows for tabular export (JSON API)
///
/// Accepts the same filter parameters as the list endpoint, but covers the
/// whole filtered range unless a cap is asked for explicitly.
pub async fn api_transactions_export(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<TabularRow>>, ApiError> {
    let criteria = criteria_from_params(&params, DisplayLimit::All)?;
    let view = state.ledger.view(&criteria);
    Ok(Json(tabular_rows(&view.rows)))
}

/// Category response for the active location
#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub sub_categories: Vec<String>,
}

/// Get category enumerations (JSON API)
pub async fn api_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: state.ledger.categories(),
        sub_categories: state.ledger.sub_categories(),
    })
}
