use serde_json::Value;

use crate::api::types::{value_as_text, UploadResponse};
use super::types::ExtractedReceipt;

/// Flatten an upload response into the fields a claim needs.
///
/// Never fails: absent fields come back as zero or empty.
pub fn extract_receipt(body: &Value) -> ExtractedReceipt {
    let scan = UploadResponse::from_value(body).result.unwrap_or_default();

    let amount = scan
        .total_amount
        .as_ref()
        .map(|field| field.as_amount())
        .unwrap_or(0.0);

    let merchant_name = scan
        .merchant_name
        .as_ref()
        .map(|field| field.as_text())
        .unwrap_or_default();

    let reference_id = scan
        .mongo_db_ref_id
        .as_ref()
        .map(value_as_text)
        .unwrap_or_default();

    let receipt_date = scan
        .date
        .as_ref()
        .map(|field| field.as_text())
        .filter(|date| !date.is_empty());

    ExtractedReceipt {
        amount,
        merchant_name,
        reference_id,
        receipt_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_nested_fields() {
        let receipt = extract_receipt(&json!({
            "result": {
                "totalAmount": { "data": 23.75 },
                "merchantName": { "data": "City Parking" },
                "mongoDbRefId": "65f0c0ffee",
                "date": { "data": "2024-02-15T10:00:00Z" },
            }
        }));

        assert_eq!(receipt.amount, 23.75);
        assert_eq!(receipt.merchant_name, "City Parking");
        assert_eq!(receipt.reference_id, "65f0c0ffee");
        assert_eq!(receipt.receipt_date.as_deref(), Some("2024-02-15T10:00:00Z"));
    }

    #[test]
    fn scalar_merchant_is_used_as_is() {
        let receipt = extract_receipt(&json!({
            "result": { "merchantName": "Corner Bikes" }
        }));
        assert_eq!(receipt.merchant_name, "Corner Bikes");
    }

    #[test]
    fn textual_amount_is_coerced() {
        let receipt = extract_receipt(&json!({
            "result": { "totalAmount": { "data": "8.40" } }
        }));
        assert_eq!(receipt.amount, 8.4);
    }

    #[test]
    fn missing_fields_default() {
        let receipt = extract_receipt(&json!({ "result": {} }));
        assert_eq!(receipt, ExtractedReceipt::default());

        let receipt = extract_receipt(&json!({}));
        assert_eq!(receipt.amount, 0.0);
        assert!(receipt.receipt_date.is_none());
    }

    #[test]
    fn empty_date_is_absent() {
        let receipt = extract_receipt(&json!({
            "result": { "date": { "data": "" } }
        }));
        assert!(receipt.receipt_date.is_none());
    }
}
