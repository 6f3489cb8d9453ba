use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoKind {
    Id,
    Text,
    Hash,
}

impl FromStr for MemoKind {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "id" => Ok(MemoKind::Id),
            "text" => Ok(MemoKind::Text),
            "hash" => Ok(MemoKind::Hash),
            _ => Err(PaymentError::InvalidMemo),
        }
    }
}

/// Memo attached to the assembled transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Memo {
    #[default]
    None,
    Id(u64),
    Text(String),
    Hash(#[serde(with = "hex::serde")] [u8; 32]),
}

impl Memo {
    /// Parses a `(memo_type, memo)` pair. An empty type means no memo.
    pub fn parse(memo_type: &str, value: &str) -> Result<Self> {
        if memo_type.is_empty() {
            return Ok(Memo::None);
        }
        match memo_type.parse::<MemoKind>()? {
            // Plain decimal digits only; `u64::from_str` would also take a `+`.
            MemoKind::Id if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) => {
                Err(PaymentError::InvalidMemo)
            }
            MemoKind::Id => value
                .parse::<u64>()
                .map(Memo::Id)
                .map_err(|_| PaymentError::InvalidMemo),
            MemoKind::Text => Ok(Memo::Text(value.to_string())),
            MemoKind::Hash => {
                let bytes = hex::decode(value).map_err(|_| PaymentError::InvalidMemo)?;
                let hash: [u8; 32] = bytes.try_into().map_err(|_| PaymentError::InvalidMemo)?;
                Ok(Memo::Hash(hash))
            }
        }
    }
}

/// Memo supplied by address resolution, e.g. to route funds to a sub-account
/// of a custodial destination. Type and value always travel together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingMemo {
    pub memo_type: String,
    pub memo: String,
}

/// Reconciles the request memo with the routing memo.
///
/// The request pair must be jointly empty or jointly set. A routing memo
/// excludes any request memo; when present it is the one parsed.
pub fn resolve_memo(memo_type: &str, memo: &str, routing: Option<&RoutingMemo>) -> Result<Memo> {
    if memo_type.is_empty() != memo.is_empty() {
        tracing::warn!("missing one of memo params");
        return Err(PaymentError::MissingParamMemo);
    }

    let (memo_type, memo) = match routing {
        Some(_) if !memo_type.is_empty() => {
            tracing::warn!("memo given in request but resolution returned memo fields");
            return Err(PaymentError::CannotUseMemo);
        }
        Some(routing) => (routing.memo_type.as_str(), routing.memo.as_str()),
        None => (memo_type, memo),
    };

    Memo::parse(memo_type, memo).inspect_err(|_| {
        tracing::warn!(memo_type, memo, "cannot parse memo value");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routing(memo_type: &str, memo: &str) -> RoutingMemo {
        RoutingMemo {
            memo_type: memo_type.to_string(),
            memo: memo.to_string(),
        }
    }

    #[test]
    fn test_no_memo_anywhere() {
        assert_eq!(resolve_memo("", "", None).unwrap(), Memo::None);
    }

    #[test]
    fn test_half_specified_memo() {
        assert_eq!(
            resolve_memo("id", "", None),
            Err(PaymentError::MissingParamMemo)
        );
        assert_eq!(
            resolve_memo("", "123", None),
            Err(PaymentError::MissingParamMemo)
        );
    }

    #[test]
    fn test_request_memo_kinds() {
        assert_eq!(resolve_memo("id", "42", None).unwrap(), Memo::Id(42));
        assert_eq!(
            resolve_memo("text", "hello", None).unwrap(),
            Memo::Text("hello".into())
        );
        let hash = "ab".repeat(32);
        assert_eq!(
            resolve_memo("hash", &hash, None).unwrap(),
            Memo::Hash([0xab; 32])
        );
    }

    #[test]
    fn test_unknown_memo_kind() {
        assert_eq!(
            resolve_memo("return", "x", None),
            Err(PaymentError::InvalidMemo)
        );
    }

    #[test]
    fn test_id_memo_out_of_range() {
        assert_eq!(
            resolve_memo("id", "18446744073709551616", None),
            Err(PaymentError::InvalidMemo)
        );
        assert_eq!(
            resolve_memo("id", "-1", None),
            Err(PaymentError::InvalidMemo)
        );
    }

    #[test]
    fn test_id_memo_rejects_signs_and_spaces() {
        for value in ["+5", " 5", "5 ", "0x5"] {
            assert_eq!(
                resolve_memo("id", value, None),
                Err(PaymentError::InvalidMemo),
                "{value:?}"
            );
        }
        assert_eq!(resolve_memo("id", "007", None), Ok(Memo::Id(7)));
    }

    #[test]
    fn test_hash_memo_wrong_length() {
        assert_eq!(
            resolve_memo("hash", &"ab".repeat(31), None),
            Err(PaymentError::InvalidMemo)
        );
        assert_eq!(
            resolve_memo("hash", &"ab".repeat(33), None),
            Err(PaymentError::InvalidMemo)
        );
        assert_eq!(
            resolve_memo("hash", &"zz".repeat(32), None),
            Err(PaymentError::InvalidMemo)
        );
    }

    #[test]
    fn test_routing_memo_wins() {
        let routing = routing("id", "7");
        assert_eq!(resolve_memo("", "", Some(&routing)).unwrap(), Memo::Id(7));
    }

    #[test]
    fn test_routing_memo_conflicts_with_request_memo() {
        let routing = routing("text", "route");
        assert_eq!(
            resolve_memo("text", "mine", Some(&routing)),
            Err(PaymentError::CannotUseMemo)
        );
    }

    #[test]
    fn test_invalid_routing_memo() {
        let routing = routing("id", "abc");
        assert_eq!(
            resolve_memo("", "", Some(&routing)),
            Err(PaymentError::InvalidMemo)
        );
    }

    #[test]
    fn test_memo_serialization() {
        let json = serde_json::to_value(Memo::Hash([1u8; 32])).unwrap();
        assert_eq!(json["type"], "hash");
        assert_eq!(json["value"], "01".repeat(32));
        let json = serde_json::to_value(Memo::Id(5)).unwrap();
        assert_eq!(json["value"], 5);
    }
}
