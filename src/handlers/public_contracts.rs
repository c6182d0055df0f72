//! Public (signing page) contract view.
//!
//! The response types here define the redaction: they have no owner id,
//! business-registration number, or memo fields.

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db;
use crate::db::contracts::ContractBundle;
use crate::db::models::{Clause, Client, Signature};
use crate::error::{msg, ApiError};
use crate::handlers::parse_contract_id;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicContract {
    pub id: i64,
    pub title: String,
    pub amount: i64,
    pub is_demo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub client: Option<PublicClient>,
    pub clauses: Vec<Clause>,
    pub signatures: Vec<Signature>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicClient {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<ContractBundle> for PublicContract {
    fn from(bundle: ContractBundle) -> Self {
        PublicContract {
            id: bundle.contract.id,
            title: bundle.contract.title,
            amount: bundle.contract.amount,
            is_demo: bundle.contract.is_demo,
            created_at: bundle.contract.created_at,
            updated_at: bundle.contract.updated_at,
            client: bundle.client.map(PublicClient::from),
            clauses: bundle.clauses,
            signatures: bundle.signatures,
        }
    }
}

impl From<Client> for PublicClient {
    fn from(client: Client) -> Self {
        PublicClient {
            id: client.id,
            name: client.name,
            email: client.email,
            phone: client.phone,
        }
    }
}

/// GET /contracts/public/:id - Unauthenticated read for the signing
/// page. Failures here carry the error text in `details` so the signing
/// frontend can surface it.
pub async fn contract_public_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PublicContract>, ApiError> {
    let id = parse_contract_id(&id)?;
    let bundle = db::contracts::fetch_bundle(&state.db, id)
        .await
        .map_err(|err| {
            tracing::error!("public contract fetch failed: {err}");
            ApiError::internal_with_details(err.to_string())
        })?
        .ok_or_else(|| ApiError::not_found(msg::CONTRACT_NOT_FOUND))?;

    Ok(Json(PublicContract::from(bundle)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Contract;
    use chrono::TimeZone;

    fn bundle_with_client() -> ContractBundle {
        let at = Utc.with_ymd_and_hms(2025, 4, 1, 10, 0, 0).unwrap();
        ContractBundle {
            contract: Contract {
                id: 9,
                user_id: 77,
                client_id: Some(5),
                quote_id: Some(3),
                title: "앱 개발 계약".to_string(),
                amount: 12_000_000,
                is_demo: false,
                created_at: at,
                updated_at: at,
            },
            client: Some(Client {
                id: 5,
                user_id: 77,
                name: "바로 주식회사".to_string(),
                email: Some("ceo@baro.example".to_string()),
                phone: Some("010-0000-0000".to_string()),
                business_number: Some("999-88-77777".to_string()),
                memo: Some("긴 협상 끝에 계약".to_string()),
                is_demo: false,
                created_at: at,
                updated_at: at,
            }),
            clauses: vec![],
            signatures: vec![],
        }
    }

    #[test]
    fn public_response_never_carries_redacted_keys() {
        let v = serde_json::to_value(PublicContract::from(bundle_with_client())).unwrap();

        assert!(v.get("userId").is_none());
        assert!(v.get("quote").is_none());
        assert_eq!(v["client"]["name"], "바로 주식회사");
        assert!(v["client"].get("userId").is_none());
        assert!(v["client"].get("businessNumber").is_none());
        assert!(v["client"].get("memo").is_none());
    }

    #[test]
    fn redaction_holds_for_clientless_contracts() {
        let mut bundle = bundle_with_client();
        bundle.client = None;
        let v = serde_json::to_value(PublicContract::from(bundle)).unwrap();

        assert_eq!(v["client"], serde_json::Value::Null);
        assert!(v.get("userId").is_none());
        assert_eq!(v["id"], 9);
        assert_eq!(v["amount"], 12_000_000);
    }
}
