//! Contract aggregate access: a contract row plus its client, quote,
//! ordered clauses, and signatures.

use serde::Serialize;
use sqlx::PgPool;
use tracing::instrument;

use crate::db::models::{Clause, Client, Contract, Quote, Service, Signature};
use crate::db::DbError;

/// Contract with every relation the owner view renders.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAggregate {
    #[serde(flatten)]
    pub contract: Contract,
    pub client: Option<Client>,
    pub quote: Option<QuoteWithService>,
    pub clauses: Vec<Clause>,
    pub signatures: Vec<Signature>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteWithService {
    #[serde(flatten)]
    pub quote: Quote,
    pub service: Option<Service>,
}

/// Relations shared by the owner and public views: everything except the
/// quote, which the public view never loads.
#[derive(Debug)]
pub struct ContractBundle {
    pub contract: Contract,
    pub client: Option<Client>,
    pub clauses: Vec<Clause>,
    pub signatures: Vec<Signature>,
}

/// Replacement input for a full clause rewrite; `sort_order` is derived
/// from array position, so callers never supply it.
#[derive(Debug)]
pub struct NewClause {
    pub clause_type: String,
    pub title: String,
    pub content: String,
}

const CONTRACT_COLUMNS: &str =
    "id, user_id, client_id, quote_id, title, amount, is_demo, created_at, updated_at";

#[instrument(skip(pool))]
pub async fn fetch_contract(pool: &PgPool, id: i64) -> Result<Option<Contract>, DbError> {
    let contract = sqlx::query_as::<_, Contract>(&format!(
        "SELECT {CONTRACT_COLUMNS} FROM contracts WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(contract)
}

/// Contract plus client, clauses (render order), and signatures (most
/// recent first). Returns `None` when the contract does not exist.
#[instrument(skip(pool))]
pub async fn fetch_bundle(pool: &PgPool, id: i64) -> Result<Option<ContractBundle>, DbError> {
    let Some(contract) = fetch_contract(pool, id).await? else {
        return Ok(None);
    };

    let client = match contract.client_id {
        Some(client_id) => {
            sqlx::query_as::<_, Client>(
                "SELECT id, user_id, name, email, phone, business_number, memo, is_demo, \
                 created_at, updated_at FROM clients WHERE id = $1",
            )
            .bind(client_id)
            .fetch_optional(pool)
            .await?
        }
        None => None,
    };

    let clauses = sqlx::query_as::<_, Clause>(
        "SELECT id, contract_id, clause_type, title, content, sort_order \
         FROM clauses WHERE contract_id = $1 ORDER BY sort_order",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let signatures = sqlx::query_as::<_, Signature>(
        "SELECT id, contract_id, signer_type, signer_name, signed_at \
         FROM signatures WHERE contract_id = $1 ORDER BY signed_at DESC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(ContractBundle {
        contract,
        client,
        clauses,
        signatures,
    }))
}

/// Owner view: the bundle plus the originating quote and its service.
#[instrument(skip(pool))]
pub async fn fetch_aggregate(pool: &PgPool, id: i64) -> Result<Option<ContractAggregate>, DbError> {
    let Some(bundle) = fetch_bundle(pool, id).await? else {
        return Ok(None);
    };

    let quote = match bundle.contract.quote_id {
        Some(quote_id) => fetch_quote_with_service(pool, quote_id).await?,
        None => None,
    };

    Ok(Some(ContractAggregate {
        contract: bundle.contract,
        client: bundle.client,
        quote,
        clauses: bundle.clauses,
        signatures: bundle.signatures,
    }))
}

async fn fetch_quote_with_service(
    pool: &PgPool,
    quote_id: i64,
) -> Result<Option<QuoteWithService>, DbError> {
    let Some(quote) = sqlx::query_as::<_, Quote>(
        "SELECT id, user_id, client_id, service_id, title, amount, status, is_demo, \
         created_at, updated_at FROM quotes WHERE id = $1",
    )
    .bind(quote_id)
    .fetch_optional(pool)
    .await?
    else {
        return Ok(None);
    };

    let service = match quote.service_id {
        Some(service_id) => {
            sqlx::query_as::<_, Service>(
                "SELECT id, user_id, category_id, name, description, price, is_demo, \
                 created_at, updated_at FROM services WHERE id = $1",
            )
            .bind(service_id)
            .fetch_optional(pool)
            .await?
        }
        None => None,
    };

    Ok(Some(QuoteWithService { quote, service }))
}

/// Replace every clause of a contract in one transaction. Not a merge:
/// prior rows are deleted and `sort_order` restarts at 1 following the
/// input order.
#[instrument(skip(pool, clauses), fields(count = clauses.len()))]
pub async fn replace_clauses(
    pool: &PgPool,
    contract_id: i64,
    clauses: &[NewClause],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM clauses WHERE contract_id = $1")
        .bind(contract_id)
        .execute(&mut *tx)
        .await?;

    for (index, clause) in clauses.iter().enumerate() {
        sqlx::query(
            "INSERT INTO clauses (contract_id, clause_type, title, content, sort_order) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(contract_id)
        .bind(&clause.clause_type)
        .bind(&clause.title)
        .bind(&clause.content)
        .bind(index as i32 + 1)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Quote owned by the given user, for quote-to-contract conversion.
#[instrument(skip(pool))]
pub async fn fetch_user_quote(
    pool: &PgPool,
    quote_id: i64,
    user_id: i64,
) -> Result<Option<Quote>, DbError> {
    let quote = sqlx::query_as::<_, Quote>(
        "SELECT id, user_id, client_id, service_id, title, amount, status, is_demo, \
         created_at, updated_at FROM quotes WHERE id = $1 AND user_id = $2",
    )
    .bind(quote_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(quote)
}

/// Create a contract carrying the quote's title, amount, and client.
#[instrument(skip(pool, quote), fields(quote_id = quote.id))]
pub async fn create_from_quote(
    pool: &PgPool,
    user_id: i64,
    quote: &Quote,
) -> Result<Contract, DbError> {
    let contract = sqlx::query_as::<_, Contract>(&format!(
        "INSERT INTO contracts (user_id, client_id, quote_id, title, amount) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {CONTRACT_COLUMNS}"
    ))
    .bind(user_id)
    .bind(quote.client_id)
    .bind(quote.id)
    .bind(&quote.title)
    .bind(quote.amount)
    .fetch_one(pool)
    .await?;
    Ok(contract)
}
