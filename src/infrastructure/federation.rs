use crate::domain::destination::FederationRecord;
use crate::domain::ports::AddressResolver;
use crate::error::{ConfigError, ResolveError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Splits a `name*domain` address. Returns `None` for strings without `*`,
/// which are treated as raw account ids.
pub fn split_address(address: &str) -> Result<Option<(&str, &str)>, ResolveError> {
    let Some((name, domain)) = address.rsplit_once('*') else {
        return Ok(None);
    };
    if name.is_empty() || domain.is_empty() {
        return Err(ResolveError::MalformedAddress(address.to_string()));
    }
    Ok(Some((name, domain)))
}

#[derive(Debug, Deserialize)]
struct StellarToml {
    #[serde(rename = "FEDERATION_SERVER")]
    federation_server: Option<String>,
}

/// Resolves `name*domain` addresses over HTTP.
///
/// The domain's `/.well-known/stellar.toml` names its federation server, which
/// is then queried with `?q=<address>&type=name`.
pub struct FederationResolver {
    client: Client,
    toml_origin: Option<String>,
}

impl FederationResolver {
    pub fn new(timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            toml_origin: None,
        })
    }

    /// Fetches every `stellar.toml` from `origin` instead of `https://<domain>`.
    pub fn with_toml_origin(mut self, origin: impl Into<String>) -> Self {
        self.toml_origin = Some(origin.into());
        self
    }

    fn toml_url(&self, domain: &str) -> String {
        match &self.toml_origin {
            Some(origin) => format!("{}/.well-known/stellar.toml", origin.trim_end_matches('/')),
            None => format!("https://{}/.well-known/stellar.toml", domain),
        }
    }

    async fn federation_server(&self, domain: &str) -> Result<String, ResolveError> {
        let response = self.client.get(self.toml_url(domain)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Lookup(format!(
                "stellar.toml for {} returned {}",
                domain, status
            )));
        }
        let text = response.text().await?;
        let toml: StellarToml =
            toml::from_str(&text).map_err(|e| ResolveError::Lookup(e.to_string()))?;
        toml.federation_server
            .ok_or_else(|| ResolveError::Lookup(format!("{} has no FEDERATION_SERVER", domain)))
    }
}

#[async_trait]
impl AddressResolver for FederationResolver {
    async fn resolve(&self, destination: &str) -> Result<FederationRecord, ResolveError> {
        let Some((_, domain)) = split_address(destination)? else {
            return Ok(FederationRecord::account(destination));
        };

        let server = self.federation_server(domain).await?;
        debug!(%server, destination, "querying federation server");
        let response = self
            .client
            .get(&server)
            .query(&[("q", destination), ("type", "name")])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(ResolveError::NotFound(destination.to_string())),
            status if status.is_success() => response
                .json::<FederationRecord>()
                .await
                .map_err(|e| ResolveError::Lookup(e.to_string())),
            status => Err(ResolveError::Lookup(format!(
                "federation server returned {}",
                status
            ))),
        }
    }
}
