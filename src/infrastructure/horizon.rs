use crate::domain::keys::AccountId;
use crate::domain::ports::LedgerClient;
use crate::domain::transaction::AccountRecord;
use crate::error::{ConfigError, LedgerError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Ledger client speaking the Horizon REST API.
///
/// `GET /accounts/{id}` loads an account (404 means it does not exist) and
/// `POST /transactions` with a `tx` form field submits an envelope.
#[derive(Clone)]
pub struct HorizonClient {
    client: Client,
    base_url: String,
}

impl HorizonClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

async fn rejection(response: reqwest::Response) -> LedgerError {
    LedgerError::Rejected {
        status: response.status().as_u16(),
        body: response.text().await.unwrap_or_default(),
    }
}

#[async_trait]
impl LedgerClient for HorizonClient {
    async fn load_account(&self, account: &AccountId) -> Result<AccountRecord, LedgerError> {
        let url = format!("{}/accounts/{}", self.base_url, account);
        let response = self.client.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(LedgerError::NotFound(account.to_string())),
            status if status.is_success() => response
                .json::<AccountRecord>()
                .await
                .map_err(|e| LedgerError::Malformed(e.to_string())),
            _ => Err(rejection(response).await),
        }
    }

    async fn submit_transaction(&self, envelope: &str) -> Result<Value, LedgerError> {
        let url = format!("{}/transactions", self.base_url);
        let response = self
            .client
            .post(url)
            .form(&[("tx", envelope)])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(rejection(response).await);
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| LedgerError::Malformed(e.to_string()))
    }
}
