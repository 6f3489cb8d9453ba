use crate::application::assembler::TransactionAssembler;
use crate::application::composer::OperationComposer;
use crate::application::destination::resolve_destination;
use crate::domain::keys::SourceKey;
use crate::domain::memo::resolve_memo;
use crate::domain::ports::{AddressResolverBox, LedgerClientBox, TransactionBuilderBox};
use crate::domain::request::PaymentRequest;
use crate::domain::transaction::NetworkId;
use crate::error::{PaymentError, Result};
use serde_json::Value;
use tracing::{debug, error, info, warn};

/// The main entry point for payment requests.
///
/// `PaymentGateway` owns the collaborators and runs one request through the
/// validation chain: source key, destination resolution, operation
/// composition, memo reconciliation, assembly and submission. The first
/// failing stage ends the request. No state is kept between requests.
pub struct PaymentGateway {
    resolver: AddressResolverBox,
    ledger: LedgerClientBox,
    builder: TransactionBuilderBox,
    network_id: NetworkId,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway`.
    ///
    /// # Arguments
    ///
    /// * `resolver` - Resolves destination addresses.
    /// * `ledger` - Loads accounts and accepts envelopes.
    /// * `builder` - Validates, signs and encodes transactions.
    /// * `network_id` - Network the transactions are signed for.
    pub fn new(
        resolver: AddressResolverBox,
        ledger: LedgerClientBox,
        builder: TransactionBuilderBox,
        network_id: NetworkId,
    ) -> Self {
        Self {
            resolver,
            ledger,
            builder,
            network_id,
        }
    }

    /// Validates, assembles and submits one payment request.
    ///
    /// Returns the ledger's raw submission response.
    pub async fn process_payment(&self, request: PaymentRequest) -> Result<Value> {
        let source = request.source.parse::<SourceKey>().map_err(|e| {
            warn!(error = %e, "invalid source parameter");
            PaymentError::InvalidSource
        })?;

        let destination = resolve_destination(self.resolver.as_ref(), &request.destination).await?;
        debug!(destination = %destination.account_id, "destination resolved");

        let operation = OperationComposer::new(self.ledger.as_ref())
            .compose(&request, &destination)
            .await?;

        let memo = resolve_memo(&request.memo_type, &request.memo, destination.memo.as_ref())?;

        let envelope =
            TransactionAssembler::new(self.ledger.as_ref(), self.builder.as_ref(), self.network_id)
                .assemble(&source, operation, memo)
                .await?;

        self.submit(&envelope).await
    }

    /// Submits an encoded envelope and returns the ledger's response verbatim.
    pub async fn submit(&self, envelope: &str) -> Result<Value> {
        let response = self
            .ledger
            .submit_transaction(envelope)
            .await
            .map_err(|e| {
                error!(error = %e, "error submitting transaction");
                PaymentError::ServerError
            })?;
        info!("transaction submitted");
        Ok(response)
    }
}
