use crate::domain::destination::ResolvedDestination;
use crate::domain::keys::AccountId;
use crate::domain::memo::RoutingMemo;
use crate::domain::ports::AddressResolver;
use crate::error::{PaymentError, Result};
use tracing::warn;

/// Resolves `destination` and re-validates the answer.
///
/// The resolver is untrusted: its account id must parse as a key, and a memo
/// type without a memo value (or the reverse) is treated as a failed lookup.
/// Empty memo strings count as absent.
pub async fn resolve_destination(
    resolver: &dyn AddressResolver,
    destination: &str,
) -> Result<ResolvedDestination> {
    let record = resolver.resolve(destination).await.map_err(|e| {
        warn!(destination, error = %e, "cannot resolve address");
        PaymentError::CannotResolveDestination
    })?;

    let account_id = record.account_id.parse::<AccountId>().map_err(|e| {
        warn!(account_id = %record.account_id, error = %e, "invalid account id in destination");
        PaymentError::InvalidDestination
    })?;

    let memo_type = record.memo_type.filter(|value| !value.is_empty());
    let memo = record.memo.filter(|value| !value.is_empty());
    let memo = match (memo_type, memo) {
        (Some(memo_type), Some(memo)) => Some(RoutingMemo { memo_type, memo }),
        (None, None) => None,
        _ => {
            warn!(destination, "resolver returned an incomplete memo");
            return Err(PaymentError::CannotResolveDestination);
        }
    };

    Ok(ResolvedDestination { account_id, memo })
}
