use serde::Deserialize;
use serde_json::Value;

/// Body returned by the receipt upload endpoint
#[derive(Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub result: Option<ReceiptScan>,
}

/// Fields the provider's OCR step extracted from a receipt.
/// Every field is optional; missing ones are defaulted by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptScan {
    pub total_amount: Option<ScanField>,
    pub merchant_name: Option<ScanField>,
    pub mongo_db_ref_id: Option<Value>,
    pub date: Option<ScanField>,
}

/// A scanned value, either wrapped as `{ "data": ... }` or given as a bare scalar
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ScanField {
    Nested(NestedData),
    Raw(Value),
}

#[derive(Debug, Default, Deserialize)]
pub struct NestedData {
    #[serde(default)]
    pub data: Value,
}

impl ScanField {
    pub fn value(&self) -> &Value {
        match self {
            ScanField::Nested(nested) => &nested.data,
            ScanField::Raw(value) => value,
        }
    }

    /// Value as a number; numeric strings are parsed, anything else is zero
    pub fn as_amount(&self) -> f64 {
        match self.value() {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Value as text; null becomes empty
    pub fn as_text(&self) -> String {
        value_as_text(self.value())
    }
}

pub(crate) fn value_as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl UploadResponse {
    /// Interpret an upload body, tolerating any shape
    pub fn from_value(body: &Value) -> Self {
        UploadResponse::deserialize(body).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_and_raw_fields_both_parse() {
        let response = UploadResponse::from_value(&json!({
            "result": {
                "totalAmount": { "data": "12.50", "confidence": 0.9 },
                "merchantName": "Metro Transit",
            }
        }));

        let scan = response.result.unwrap();
        assert_eq!(scan.total_amount.unwrap().as_amount(), 12.5);
        assert_eq!(scan.merchant_name.unwrap().as_text(), "Metro Transit");
        assert!(scan.date.is_none());
    }

    #[test]
    fn unexpected_shape_defaults_to_empty() {
        let response = UploadResponse::from_value(&json!(["not", "an", "object"]));
        assert!(response.result.is_none());
    }

    #[test]
    fn unparseable_amount_is_zero() {
        let field: ScanField = serde_json::from_value(json!({ "data": "n/a" })).unwrap();
        assert_eq!(field.as_amount(), 0.0);
    }
}
