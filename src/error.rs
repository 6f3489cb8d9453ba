use serde::Serialize;
use thiserror::Error;

/// Terminal outcome of a rejected payment request.
///
/// Every variant maps to a stable machine-readable code (see [`PaymentError::code`])
/// and a human-readable message. Internal failures are collapsed into
/// [`PaymentError::ServerError`] so collaborator details never reach the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentError {
    #[error("source parameter is invalid")]
    InvalidSource,
    #[error("Cannot resolve federated address")]
    CannotResolveDestination,
    #[error("destination parameter is invalid")]
    InvalidDestination,
    #[error("type parameter is invalid")]
    InvalidType,
    #[error("memo and memo_type must be given together")]
    MissingParamMemo,
    #[error("memo given in request but destination resolution returned a memo")]
    CannotUseMemo,
    #[error("memo parameter is invalid")]
    InvalidMemo,
    #[error("asset code and issuer must be given together")]
    MissingParamAsset,
    #[error("asset_issuer parameter is invalid")]
    InvalidIssuer,
    #[error("asset_code parameter is invalid")]
    MalformedAssetCode,
    #[error("amount parameter is invalid")]
    InvalidAmount,
    #[error("source account does not exist")]
    SourceNotExist,
    #[error("Server error")]
    ServerError,
}

impl PaymentError {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::InvalidSource => "invalid_source",
            PaymentError::CannotResolveDestination => "cannot_resolve_destination",
            PaymentError::InvalidDestination => "invalid_destination",
            PaymentError::InvalidType => "invalid_type",
            PaymentError::MissingParamMemo => "missing_param_memo",
            PaymentError::CannotUseMemo => "cannot_use_memo",
            PaymentError::InvalidMemo => "invalid_memo",
            PaymentError::MissingParamAsset => "missing_param_asset",
            PaymentError::InvalidIssuer => "invalid_issuer",
            PaymentError::MalformedAssetCode => "asset_code_invalid",
            PaymentError::InvalidAmount => "invalid_amount",
            PaymentError::SourceNotExist => "source_not_exist",
            PaymentError::ServerError => "server_error",
        }
    }

    /// Serializable body returned to callers in place of a submission response.
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Failures reported by the ledger-access collaborator.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("account not found: {0}")]
    NotFound(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("ledger rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("malformed ledger response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LedgerError {
    fn from(err: reqwest::Error) -> Self {
        LedgerError::Transport(err.to_string())
    }
}

/// Failures reported by an address resolver.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("malformed address: {0}")]
    MalformedAddress(String),
    #[error("no federation record for {0}")]
    NotFound(String),
    #[error("federation lookup failed: {0}")]
    Lookup(String),
}

impl From<reqwest::Error> for ResolveError {
    fn from(err: reqwest::Error) -> Self {
        ResolveError::Lookup(err.to_string())
    }
}

/// Construction failures reported by a transaction builder.
///
/// Only the first two variants carry a caller-visible meaning; everything else
/// is an internal failure.
#[derive(Error, Debug, PartialEq)]
pub enum BuildError {
    #[error("asset code length is invalid: {0:?}")]
    InvalidAssetCode(String),
    #[error("cannot parse amount: {0:?}")]
    InvalidAmount(String),
    #[error("{0}")]
    Other(String),
}

impl From<BuildError> for PaymentError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::InvalidAssetCode(_) => PaymentError::MalformedAssetCode,
            BuildError::InvalidAmount(_) => PaymentError::InvalidAmount,
            BuildError::Other(_) => PaymentError::ServerError,
        }
    }
}

/// Failures while loading gateway configuration or fixtures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid accounts fixture: {0}")]
    Fixture(#[from] serde_json::Error),
    #[error("invalid account id in fixture: {0}")]
    FixtureAccount(String),
    #[error("cannot build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_serialization() {
        let json = serde_json::to_value(PaymentError::CannotUseMemo.to_body()).unwrap();
        assert_eq!(json["code"], "cannot_use_memo");
        assert_eq!(
            json["message"],
            "memo given in request but destination resolution returned a memo"
        );
    }

    #[test]
    fn test_build_error_classification() {
        assert_eq!(
            PaymentError::from(BuildError::InvalidAssetCode("TOOLONGASSETCODE".into())),
            PaymentError::MalformedAssetCode
        );
        assert_eq!(
            PaymentError::from(BuildError::InvalidAmount("abc".into())),
            PaymentError::InvalidAmount
        );
        assert_eq!(
            PaymentError::from(BuildError::Other("memo too long".into())),
            PaymentError::ServerError
        );
    }
}
