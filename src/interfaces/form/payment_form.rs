use crate::domain::asset::AssetFields;
use crate::domain::request::PaymentRequest;
use std::collections::HashMap;
use std::io::{self, Read};

/// Decodes an `application/x-www-form-urlencoded` payment request.
///
/// When a key repeats, the first value wins. Missing keys read as empty
/// strings, except for path legs whose presence is what defines the path.
#[derive(Debug, Default, Clone)]
pub struct PaymentForm {
    fields: HashMap<String, String>,
}

impl PaymentForm {
    pub fn parse(body: &[u8]) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body) {
            fields
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { fields }
    }

    /// Reads the whole body from any `Read` source (e.g., File, Stdin).
    pub fn from_reader<R: Read>(mut source: R) -> io::Result<Self> {
        let mut body = Vec::new();
        source.read_to_end(&mut body)?;
        // Bodies piped through a shell usually end with a newline.
        let end = body
            .iter()
            .rposition(|b| !matches!(b, b'\r' | b'\n'))
            .map_or(0, |i| i + 1);
        Ok(Self::parse(&body[..end]))
    }

    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    fn asset(&self, code_key: &str, issuer_key: &str) -> AssetFields {
        AssetFields::new(self.get(code_key), self.get(issuer_key))
    }

    /// Path legs `path[0]`, `path[1]`, ... up to the first index without an
    /// `asset_code` key.
    fn path(&self) -> Vec<AssetFields> {
        (0..)
            .map(|i| (format!("path[{i}][asset_code]"), format!("path[{i}][asset_issuer]")))
            .take_while(|(code_key, _)| self.contains(code_key))
            .map(|(code_key, issuer_key)| self.asset(&code_key, &issuer_key))
            .collect()
    }

    pub fn into_request(self) -> PaymentRequest {
        PaymentRequest {
            source: self.get("source").to_string(),
            destination: self.get("destination").to_string(),
            payment_type: self.get("type").to_string(),
            amount: self.get("amount").to_string(),
            asset: self.asset("asset_code", "asset_issuer"),
            send_max: self.get("send_max").to_string(),
            send_asset: self.asset("send_asset_code", "send_asset_issuer"),
            destination_amount: self.get("destination_amount").to_string(),
            destination_asset: self.asset("destination_asset_code", "destination_asset_issuer"),
            path: self.path(),
            memo_type: self.get("memo_type").to_string(),
            memo: self.get("memo").to_string(),
        }
    }
}
