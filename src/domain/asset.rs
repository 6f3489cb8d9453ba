use crate::domain::keys::AccountId;
use crate::error::{PaymentError, Result};
use serde::{Deserialize, Serialize};

/// Raw `(code, issuer)` pair as submitted in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetFields {
    pub code: String,
    pub issuer: String,
}

impl AssetFields {
    pub fn new(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issuer: issuer.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.issuer.is_empty()
    }

    /// Maps the pair to an asset: both empty is native, both present is issued.
    ///
    /// The issuer is passed through as-is; the transaction builder validates it.
    pub fn resolve(&self) -> Result<AssetDescriptor> {
        match (self.code.is_empty(), self.issuer.is_empty()) {
            (true, true) => Ok(AssetDescriptor::Native),
            (false, false) => Ok(AssetDescriptor::Issued {
                code: self.code.clone(),
                issuer: self.issuer.clone(),
            }),
            _ => Err(PaymentError::MissingParamAsset),
        }
    }

    /// Like [`AssetFields::resolve`], but rejects an issued asset whose issuer is
    /// not a valid account id with `InvalidIssuer`.
    pub fn resolve_checked(&self) -> Result<AssetDescriptor> {
        let asset = self.resolve()?;
        if let AssetDescriptor::Issued { issuer, .. } = &asset {
            issuer
                .parse::<AccountId>()
                .map_err(|_| PaymentError::InvalidIssuer)?;
        }
        Ok(asset)
    }
}

/// Asset moved by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetDescriptor {
    Native,
    Issued { code: String, issuer: String },
}

impl AssetDescriptor {
    pub fn issued(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        AssetDescriptor::Issued {
            code: code.into(),
            issuer: issuer.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> String {
        AccountId::from_bytes([4u8; 32]).to_string()
    }

    #[test]
    fn test_empty_fields_are_native() {
        assert_eq!(
            AssetFields::default().resolve().unwrap(),
            AssetDescriptor::Native
        );
    }

    #[test]
    fn test_full_fields_are_issued() {
        let fields = AssetFields::new("USD", issuer());
        assert_eq!(
            fields.resolve().unwrap(),
            AssetDescriptor::issued("USD", issuer())
        );
    }

    #[test]
    fn test_partial_fields_rejected() {
        assert_eq!(
            AssetFields::new("USD", "").resolve(),
            Err(PaymentError::MissingParamAsset)
        );
        assert_eq!(
            AssetFields::new("", issuer()).resolve(),
            Err(PaymentError::MissingParamAsset)
        );
    }

    #[test]
    fn test_unchecked_resolve_passes_issuer_through() {
        let fields = AssetFields::new("EUR", "not-a-key");
        assert_eq!(
            fields.resolve().unwrap(),
            AssetDescriptor::issued("EUR", "not-a-key")
        );
        assert_eq!(fields.resolve_checked(), Err(PaymentError::InvalidIssuer));
    }

    #[test]
    fn test_asset_serialization() {
        let json = serde_json::to_value(AssetDescriptor::Native).unwrap();
        assert_eq!(json["type"], "native");
        let json = serde_json::to_value(AssetDescriptor::issued("USD", "GA")).unwrap();
        assert_eq!(json["type"], "issued");
        assert_eq!(json["code"], "USD");
    }
}
