use crate::domain::keys::SourceKey;
use crate::domain::memo::Memo;
use crate::domain::operation::OperationPlan;
use crate::domain::ports::{LedgerClient, TransactionBuilder};
use crate::domain::transaction::{NetworkId, TransactionDraft};
use crate::error::{PaymentError, Result};
use tracing::{debug, error, warn};

/// Turns the composed operation and memo into a signed, encoded envelope.
pub struct TransactionAssembler<'a> {
    ledger: &'a dyn LedgerClient,
    builder: &'a dyn TransactionBuilder,
    network_id: NetworkId,
}

impl<'a> TransactionAssembler<'a> {
    pub fn new(
        ledger: &'a dyn LedgerClient,
        builder: &'a dyn TransactionBuilder,
        network_id: NetworkId,
    ) -> Self {
        Self {
            ledger,
            builder,
            network_id,
        }
    }

    /// Fetches the source's current sequence number and builds the next
    /// transaction on top of it.
    pub async fn assemble(
        &self,
        source: &SourceKey,
        operation: Option<OperationPlan>,
        memo: Memo,
    ) -> Result<String> {
        let source_account = source.account_id();
        let account = self
            .ledger
            .load_account(&source_account)
            .await
            .map_err(|e| {
                error!(source = %source_account, error = %e, "cannot load source account");
                PaymentError::SourceNotExist
            })?;

        let sequence = account.sequence.parse::<u64>().map_err(|e| {
            error!(sequence = %account.sequence, error = %e, "cannot convert sequence number");
            PaymentError::ServerError
        })?;
        let sequence = sequence.checked_add(1).ok_or_else(|| {
            error!(sequence, "sequence number exhausted");
            PaymentError::ServerError
        })?;
        debug!(source = %source_account, sequence, "assembling transaction");

        let draft = TransactionDraft {
            source_account,
            sequence,
            network_id: self.network_id,
            operation,
            memo,
        };
        let built = self.builder.build(draft).map_err(|e| {
            warn!(error = %e, "transaction builder error");
            PaymentError::from(e)
        })?;

        let seed = source.seed().ok_or_else(|| {
            error!(source = %source_account, "source is not a secret seed, cannot sign");
            PaymentError::ServerError
        })?;
        self.builder.sign_and_encode(built, seed).map_err(|e| {
            error!(error = %e, "cannot encode transaction envelope");
            PaymentError::ServerError
        })
    }
}
