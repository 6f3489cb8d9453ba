use crate::domain::asset::{AssetDescriptor, AssetFields};
use crate::domain::destination::ResolvedDestination;
use crate::domain::keys::AccountId;
use crate::domain::operation::OperationPlan;
use crate::domain::ports::LedgerClient;
use crate::domain::request::{PaymentRequest, PaymentType};
use crate::error::{LedgerError, PaymentError, Result};
use tracing::{debug, error, warn};

/// Chooses the ledger operation for a request.
///
/// Native payments depend on whether the destination already exists: an
/// absent account is funded with `CreateAccount` instead of `Payment`.
pub struct OperationComposer<'a> {
    ledger: &'a dyn LedgerClient,
}

impl<'a> OperationComposer<'a> {
    pub fn new(ledger: &'a dyn LedgerClient) -> Self {
        Self { ledger }
    }

    /// Returns `None` when the request names no operation type.
    pub async fn compose(
        &self,
        request: &PaymentRequest,
        destination: &ResolvedDestination,
    ) -> Result<Option<OperationPlan>> {
        let payment_type = request.payment_type.parse::<PaymentType>().inspect_err(|_| {
            warn!(payment_type = %request.payment_type, "invalid payment type");
        })?;

        match payment_type {
            PaymentType::Unspecified => Ok(None),
            PaymentType::Payment => {
                debug!("composing payment");
                self.payment(request, destination.account_id).await.map(Some)
            }
            PaymentType::PathPayment => {
                debug!("composing path payment");
                path_payment(request, destination.account_id).map(Some)
            }
        }
    }

    async fn payment(
        &self,
        request: &PaymentRequest,
        destination: AccountId,
    ) -> Result<OperationPlan> {
        let asset = request.asset.resolve_checked().inspect_err(|e| {
            warn!(
                asset_code = %request.asset.code,
                asset_issuer = %request.asset.issuer,
                error = %e,
                "invalid asset params"
            );
        })?;

        if asset == AssetDescriptor::Native && !self.account_exists(&destination).await? {
            return Ok(OperationPlan::CreateAccount {
                destination,
                starting_balance: request.amount.clone(),
            });
        }

        Ok(OperationPlan::Payment {
            destination,
            asset,
            amount: request.amount.clone(),
        })
    }

    /// Only a confirmed "not found" means absent; any other lookup failure is
    /// reported instead of being mistaken for a missing account.
    async fn account_exists(&self, account: &AccountId) -> Result<bool> {
        match self.ledger.load_account(account).await {
            Ok(_) => Ok(true),
            Err(LedgerError::NotFound(_)) => {
                debug!(%account, "destination account does not exist");
                Ok(false)
            }
            Err(e) => {
                error!(%account, error = %e, "cannot check destination account");
                Err(PaymentError::ServerError)
            }
        }
    }
}

fn path_payment(request: &PaymentRequest, destination: AccountId) -> Result<OperationPlan> {
    let send_asset = request.send_asset.resolve().inspect_err(|_| {
        warn!("missing send asset param");
    })?;
    let dest_asset = request.destination_asset.resolve().inspect_err(|_| {
        warn!("missing destination asset param");
    })?;
    let path = request
        .path
        .iter()
        .map(AssetFields::resolve)
        .collect::<Result<Vec<_>>>()
        .inspect_err(|_| warn!("missing path asset param"))?;

    Ok(OperationPlan::PathPayment {
        destination,
        send_asset,
        send_max: request.send_max.clone(),
        dest_asset,
        dest_amount: request.destination_amount.clone(),
        path,
    })
}
