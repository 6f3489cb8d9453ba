use crate::domain::asset::AssetDescriptor;
use crate::domain::keys::AccountId;
use serde::{Deserialize, Serialize};

/// The single ledger operation a payment request turns into.
///
/// Amounts stay in their submitted decimal form; the transaction builder
/// decides whether they are representable on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OperationPlan {
    CreateAccount {
        destination: AccountId,
        starting_balance: String,
    },
    Payment {
        destination: AccountId,
        asset: AssetDescriptor,
        amount: String,
    },
    PathPayment {
        destination: AccountId,
        send_asset: AssetDescriptor,
        send_max: String,
        dest_asset: AssetDescriptor,
        dest_amount: String,
        path: Vec<AssetDescriptor>,
    },
}

impl OperationPlan {
    pub fn destination(&self) -> &AccountId {
        match self {
            OperationPlan::CreateAccount { destination, .. }
            | OperationPlan::Payment { destination, .. }
            | OperationPlan::PathPayment { destination, .. } => destination,
        }
    }
}
