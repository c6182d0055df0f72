//! Contract aggregate read/update and quote-to-contract conversion.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use tracing::info;

use crate::db;
use crate::db::contracts::{ContractAggregate, NewClause};
use crate::error::{msg, ApiError};
use crate::handlers::{parse_contract_id, require_body};
use crate::middleware::AuthSession;
use crate::routes::AppState;

/// GET /contracts/:id - Aggregate with client, quote, clauses, and
/// signatures
pub async fn contract_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ContractAggregate>, ApiError> {
    let id = parse_contract_id(&id)?;
    let aggregate = db::contracts::fetch_aggregate(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(msg::CONTRACT_NOT_FOUND))?;
    Ok(Json(aggregate))
}

#[derive(Debug, Deserialize)]
pub struct UpdateContractRequest {
    pub clauses: Option<Vec<ClauseInput>>,
}

#[derive(Debug, Deserialize)]
pub struct ClauseInput {
    #[serde(rename = "type")]
    pub clause_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// PUT /contracts/:id - Full clause replacement. The stored order is
/// re-derived from array position; the first element becomes order 1.
pub async fn contract_put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateContractRequest>, JsonRejection>,
) -> Result<Json<ContractAggregate>, ApiError> {
    let id = parse_contract_id(&id)?;
    let request = require_body(body, msg::BAD_REQUEST)?;
    let clauses = validate_clauses(request)?;

    if db::contracts::fetch_contract(&state.db, id).await?.is_none() {
        return Err(ApiError::not_found(msg::CONTRACT_NOT_FOUND));
    }

    db::contracts::replace_clauses(&state.db, id, &clauses).await?;
    info!(contract_id = id, clauses = clauses.len(), "replaced contract clauses");

    let aggregate = db::contracts::fetch_aggregate(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(msg::CONTRACT_NOT_FOUND))?;
    Ok(Json(aggregate))
}

fn validate_clauses(request: UpdateContractRequest) -> Result<Vec<NewClause>, ApiError> {
    let inputs = request
        .clauses
        .ok_or_else(|| ApiError::bad_request(msg::BAD_REQUEST))?;

    inputs
        .into_iter()
        .map(|input| {
            let clause_type = input
                .clause_type
                .ok_or_else(|| ApiError::bad_request(msg::BAD_REQUEST))?;
            let title = input
                .title
                .ok_or_else(|| ApiError::bad_request(msg::BAD_REQUEST))?;
            Ok(NewClause {
                clause_type,
                title,
                content: input.content.unwrap_or_default(),
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FromQuoteRequest {
    pub quote_id: Option<i64>,
}

/// POST /contracts/from-quote - Create a contract carrying the quote's
/// title, amount, and client (session-authenticated); clauses arrive
/// later via PUT.
pub async fn contract_from_quote(
    State(state): State<AppState>,
    Extension(session): Extension<AuthSession>,
    body: Result<Json<FromQuoteRequest>, JsonRejection>,
) -> Result<Json<ContractAggregate>, ApiError> {
    let request = require_body(body, msg::BAD_REQUEST)?;
    let quote_id = request
        .quote_id
        .ok_or_else(|| ApiError::bad_request(msg::BAD_REQUEST))?;

    let quote = db::contracts::fetch_user_quote(&state.db, quote_id, session.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(msg::QUOTE_NOT_FOUND))?;

    let contract = db::contracts::create_from_quote(&state.db, session.user_id, &quote).await?;
    info!(contract_id = contract.id, quote_id, "created contract from quote");

    let aggregate = db::contracts::fetch_aggregate(&state.db, contract.id)
        .await?
        .ok_or_else(|| ApiError::not_found(msg::CONTRACT_NOT_FOUND))?;
    Ok(Json(aggregate))
}
