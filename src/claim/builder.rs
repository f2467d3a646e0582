use chrono::{Duration, NaiveDate};

use crate::error::{ClaimError, Result};
use super::types::{
    ClaimDocument, ClaimPayload, ClaimPayment, ExpenseType, ExtractedReceipt, Provider,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Days the provider has to process a claim, counted from the expense date
pub const PROCESSING_WINDOW_DAYS: i64 = 90;

/// Fallback merchant when neither the caller nor the scan supplied one
pub const UNKNOWN_MERCHANT: &str = "Unknown";

// Fixed claim classification expected by the provider
const BUSINESS_AFFILIATION: u32 = 1;
const CLAIM_TYPE: u32 = 5;
const CLAIM_RECEIPT_TYPE: u32 = 4;
const CLAIM_STATUS: u32 = 4001;
const PAYMENT_TYPE: u32 = 2;
const PAYMENT_STATUS: u32 = 1;
const SUBMISSION_STATUS: u32 = 3;

/// Caller-supplied overrides for one claim
#[derive(Debug, Clone, Default)]
pub struct ClaimOptions<'a> {
    pub expense_date: Option<&'a str>,
    pub merchant_override: Option<&'a str>,
    pub expense_type: ExpenseType,
}

/// Build the submit payload for an extracted receipt.
///
/// The expense date is the caller's date if given, else the receipt's calendar
/// date, else `today`. It is used for the usage start/end dates too. The
/// payment date prefers the receipt's own date.
pub fn build_claim(
    member_id: i64,
    receipt: &ExtractedReceipt,
    options: &ClaimOptions<'_>,
    today: NaiveDate,
) -> Result<ClaimPayload> {
    let receipt_day = receipt
        .receipt_date
        .as_deref()
        .filter(|date| !date.is_empty())
        .map(calendar_prefix);

    let expense_date = match (options.expense_date.filter(|d| !d.is_empty()), &receipt_day) {
        (Some(date), _) => date.to_string(),
        (None, Some(day)) => day.clone(),
        (None, None) => today.format(DATE_FORMAT).to_string(),
    };

    let payment_date = receipt_day.unwrap_or_else(|| expense_date.clone());
    let process_by_date = process_by(&expense_date)?;

    let merchant_name = options
        .merchant_override
        .filter(|name| !name.is_empty())
        .or(Some(receipt.merchant_name.as_str()).filter(|name| !name.is_empty()))
        .unwrap_or(UNKNOWN_MERCHANT)
        .to_string();

    let receipt_purchase_date = match receipt.receipt_date.as_deref() {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => format!("{}T16:47:00Z", expense_date),
    };

    let amount = receipt.amount;

    Ok(ClaimPayload {
        id_member: member_id,
        amount,
        usage_date_end: expense_date.clone(),
        usage_date_start: expense_date.clone(),
        expense_date,
        process_by_date,
        id_business_affiliation: BUSINESS_AFFILIATION,
        id_claim_type: CLAIM_TYPE,
        id_claim_receipt_type: CLAIM_RECEIPT_TYPE,
        id_claim_status: CLAIM_STATUS,
        provider: Provider::named(merchant_name.clone()),
        claim_payment: vec![ClaimPayment {
            payment_date,
            paid_amount: amount,
            id_payment_type: PAYMENT_TYPE,
            id_payment_status: PAYMENT_STATUS,
        }],
        claim_documents: vec![ClaimDocument { id_document: 0 }],
        mongo_db_ref_id: receipt.reference_id.clone(),
        is_multi_month_receipt: false,
        receipt_merchant_name: merchant_name,
        receipt_purchase_date,
        receipt_amount: amount,
        id_submission_status: SUBMISSION_STATUS,
        id_expense_type: options.expense_type.code(),
    })
}

/// First ten characters of an ISO-8601 timestamp
fn calendar_prefix(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}

fn process_by(expense_date: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(expense_date, DATE_FORMAT)
        .map_err(|_| ClaimError::InvalidDate(expense_date.to_string()))?;
    Ok((date + Duration::days(PROCESSING_WINDOW_DAYS))
        .format(DATE_FORMAT)
        .to_string())
}
