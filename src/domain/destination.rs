use crate::domain::keys::AccountId;
use crate::domain::memo::RoutingMemo;
use serde::Deserialize;

/// Untrusted answer of an address resolver, in federation-response shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FederationRecord {
    pub account_id: String,
    #[serde(default)]
    pub memo_type: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

impl FederationRecord {
    pub fn account(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            memo_type: None,
            memo: None,
        }
    }

    pub fn with_memo(mut self, memo_type: impl Into<String>, memo: impl Into<String>) -> Self {
        self.memo_type = Some(memo_type.into());
        self.memo = Some(memo.into());
        self
    }
}

/// Destination after resolution and re-validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    pub account_id: AccountId,
    pub memo: Option<RoutingMemo>,
}
