use ledger_gateway::domain::memo::{Memo, RoutingMemo, resolve_memo};
use ledger_gateway::error::PaymentError;
use proptest::prelude::*;

proptest! {
    #[test]
    fn id_memo_accepts_every_u64(n in any::<u64>()) {
        prop_assert_eq!(resolve_memo("id", &n.to_string(), None), Ok(Memo::Id(n)));
    }

    #[test]
    fn signed_id_memo_is_invalid(n in any::<u64>()) {
        prop_assert_eq!(
            resolve_memo("id", &format!("+{n}"), None),
            Err(PaymentError::InvalidMemo)
        );
    }

    #[test]
    fn hash_memo_requires_32_bytes(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let result = resolve_memo("hash", &hex::encode(&bytes), None);
        if bytes.len() == 32 {
            let mut expected = [0u8; 32];
            expected.copy_from_slice(&bytes);
            prop_assert_eq!(result, Ok(Memo::Hash(expected)));
        } else {
            prop_assert_eq!(result, Err(PaymentError::InvalidMemo));
        }
    }

    #[test]
    fn text_memo_is_passed_through(text in "\\PC{1,40}") {
        prop_assert_eq!(resolve_memo("text", &text, None), Ok(Memo::Text(text.clone())));
    }

    #[test]
    fn half_memo_is_missing_param(value in "[a-z0-9]{1,16}") {
        prop_assert_eq!(resolve_memo("", &value, None), Err(PaymentError::MissingParamMemo));
        prop_assert_eq!(resolve_memo("text", "", None), Err(PaymentError::MissingParamMemo));
    }

    #[test]
    fn routing_memo_conflicts_with_user_memo(
        kind in prop::sample::select(vec!["id", "text", "hash"]),
        value in "[0-9]{1,10}",
    ) {
        let routing = RoutingMemo {
            memo_type: "text".into(),
            memo: "routed".into(),
        };
        prop_assert_eq!(
            resolve_memo(kind, &value, Some(&routing)),
            Err(PaymentError::CannotUseMemo)
        );
        prop_assert_eq!(
            resolve_memo("", "", Some(&routing)),
            Ok(Memo::Text("routed".into()))
        );
    }
}
