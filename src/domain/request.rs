use crate::domain::asset::AssetFields;
use crate::error::{PaymentError, Result};
use std::str::FromStr;

/// Operation kind requested through the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentType {
    /// No `type` given. Nothing is composed and assembly fails later.
    Unspecified,
    Payment,
    PathPayment,
}

impl FromStr for PaymentType {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(PaymentType::Unspecified),
            "payment" => Ok(PaymentType::Payment),
            "path_payment" => Ok(PaymentType::PathPayment),
            _ => Err(PaymentError::InvalidType),
        }
    }
}

/// One payment request, as submitted.
///
/// Fields are kept raw so every stage of the pipeline can report its own
/// error in order; only path-leg discovery happens at construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentRequest {
    pub source: String,
    pub destination: String,
    pub payment_type: String,
    pub amount: String,
    pub asset: AssetFields,
    pub send_max: String,
    pub send_asset: AssetFields,
    pub destination_amount: String,
    pub destination_asset: AssetFields,
    pub path: Vec<AssetFields>,
    pub memo_type: String,
    pub memo: String,
}
