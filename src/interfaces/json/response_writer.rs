use crate::error::Result;
use serde_json::Value;
use std::io::{self, Write};

/// Renders a pipeline outcome: the ledger's response on success, the
/// `{ "code", "message" }` body on failure.
pub fn render(result: &Result<Value>) -> Value {
    match result {
        Ok(response) => response.clone(),
        Err(err) => serde_json::to_value(err.to_body()).unwrap_or(Value::Null),
    }
}

/// Writes pipeline outcomes as JSON, one document per call.
pub struct ResponseWriter<W: Write> {
    writer: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_response(&mut self, result: &Result<Value>) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &render(result))?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use serde_json::json;

    #[test]
    fn test_render_error_body() {
        let body = render(&Err(PaymentError::CannotUseMemo));
        assert_eq!(body["code"], "cannot_use_memo");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[test]
    fn test_render_passes_response_through() {
        let response = json!({ "hash": "ab", "ledger": 3 });
        assert_eq!(render(&Ok(response.clone())), response);
    }

    #[test]
    fn test_writer_outputs_json_document() {
        let mut out = Vec::new();
        ResponseWriter::new(&mut out)
            .write_response(&Err(PaymentError::InvalidAmount))
            .unwrap();
        let written: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(written["code"], "invalid_amount");
        assert!(out.ends_with(b"\n"));
    }
}
