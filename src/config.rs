use crate::application::gateway::PaymentGateway;
use crate::domain::keys::AccountId;
use crate::domain::ports::{AddressResolverBox, LedgerClientBox};
use crate::domain::transaction::NetworkId;
use crate::error::ConfigError;
use crate::infrastructure::envelope::EnvelopeBuilder;
use crate::infrastructure::federation::FederationResolver;
use crate::infrastructure::horizon::HorizonClient;
use crate::infrastructure::in_memory::InMemoryLedger;
use clap::Args;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Runtime settings for the gateway, from flags or the environment.
#[derive(Args, Debug, Clone)]
pub struct GatewayConfig {
    /// Horizon base URL. When set, accounts are loaded and transactions submitted over HTTP.
    #[arg(long, env = "GATEWAY_HORIZON_URL")]
    pub horizon_url: Option<String>,

    /// JSON fixture `{ "<account id>": "<sequence>" }` for the in-memory ledger.
    #[arg(long, env = "GATEWAY_ACCOUNTS", conflicts_with = "horizon_url")]
    pub accounts: Option<PathBuf>,

    /// Passphrase of the network transactions are signed for.
    #[arg(
        long,
        env = "GATEWAY_NETWORK_PASSPHRASE",
        default_value = NetworkId::TESTNET_PASSPHRASE
    )]
    pub network_passphrase: String,

    /// Timeout for federation and Horizon requests, in seconds.
    #[arg(long, env = "GATEWAY_FEDERATION_TIMEOUT_SECS", default_value_t = 10)]
    pub federation_timeout_secs: u64,
}

impl GatewayConfig {
    pub fn network_id(&self) -> NetworkId {
        NetworkId::from_passphrase(&self.network_passphrase)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.federation_timeout_secs)
    }

    /// Wires the gateway: Horizon when a URL is configured, otherwise an
    /// in-memory ledger seeded from the accounts fixture (empty without one).
    pub fn build_gateway(&self) -> Result<PaymentGateway, ConfigError> {
        let network_id = self.network_id();

        let ledger: LedgerClientBox = match (&self.horizon_url, &self.accounts) {
            (Some(url), _) => {
                info!(horizon_url = %url, "using Horizon ledger");
                Box::new(HorizonClient::new(url.as_str(), self.timeout())?)
            }
            (None, Some(path)) => {
                let accounts = load_accounts(path)?;
                info!(accounts = accounts.len(), "using in-memory ledger");
                Box::new(InMemoryLedger::with_accounts(network_id, accounts))
            }
            (None, None) => {
                info!("using empty in-memory ledger");
                Box::new(InMemoryLedger::new(network_id))
            }
        };
        let resolver: AddressResolverBox = Box::new(FederationResolver::new(self.timeout())?);

        Ok(PaymentGateway::new(
            resolver,
            ledger,
            Box::new(EnvelopeBuilder),
            network_id,
        ))
    }
}

/// Loads an `account id -> sequence` fixture.
pub fn load_accounts(path: &Path) -> Result<HashMap<AccountId, String>, ConfigError> {
    let reader = BufReader::new(File::open(path)?);
    let raw: HashMap<String, String> = serde_json::from_reader(reader)?;
    raw.into_iter()
        .map(|(account, sequence)| {
            let id = account
                .parse::<AccountId>()
                .map_err(|_| ConfigError::FixtureAccount(account.clone()))?;
            if sequence.parse::<u64>().is_err() {
                return Err(ConfigError::FixtureAccount(format!(
                    "{account}: bad sequence {sequence:?}"
                )));
            }
            Ok((id, sequence))
        })
        .collect()
}
