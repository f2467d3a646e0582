use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Expense category, mapped to the provider's numeric expense type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    #[default]
    Transit,
    Parking,
    Bike,
}

impl ExpenseType {
    /// Provider code sent as `idExpenseType`
    pub fn code(&self) -> u32 {
        match self {
            ExpenseType::Transit => 6,
            ExpenseType::Parking => 1,
            ExpenseType::Bike => 5,
        }
    }

    /// Parse a category name, case-insensitively. Unrecognized names are transit.
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "parking" => ExpenseType::Parking,
            "bike" => ExpenseType::Bike,
            _ => ExpenseType::Transit,
        }
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseType::Transit => write!(f, "transit"),
            ExpenseType::Parking => write!(f, "parking"),
            ExpenseType::Bike => write!(f, "bike"),
        }
    }
}

impl std::str::FromStr for ExpenseType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ExpenseType::parse_lenient(s))
    }
}

/// One receipt to upload and claim
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptJob {
    pub image_path: PathBuf,
    /// YYYY-MM-DD, used verbatim when given
    pub expense_date: Option<String>,
    pub merchant_override: Option<String>,
    pub expense_type: ExpenseType,
}

impl ReceiptJob {
    pub fn new(image_path: impl Into<PathBuf>, expense_type: ExpenseType) -> Self {
        Self {
            image_path: image_path.into(),
            expense_date: None,
            merchant_override: None,
            expense_type,
        }
    }
}

/// Flat view of an upload response
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExtractedReceipt {
    pub amount: f64,
    pub merchant_name: String,
    pub reference_id: String,
    /// ISO-8601 timestamp as returned by the provider
    pub receipt_date: Option<String>,
}

/// Body of the claim submit call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPayload {
    pub id_member: i64,
    pub amount: f64,
    pub usage_date_end: String,
    pub usage_date_start: String,
    pub expense_date: String,
    pub process_by_date: String,
    #[serde(rename = "IdBusinessAffiliation")]
    pub id_business_affiliation: u32,
    pub id_claim_type: u32,
    pub id_claim_receipt_type: u32,
    pub id_claim_status: u32,
    pub provider: Provider,
    pub claim_payment: Vec<ClaimPayment>,
    pub claim_documents: Vec<ClaimDocument>,
    #[serde(rename = "MongoDbRefId")]
    pub mongo_db_ref_id: String,
    pub is_multi_month_receipt: bool,
    pub receipt_merchant_name: String,
    pub receipt_purchase_date: String,
    pub receipt_amount: f64,
    pub id_submission_status: u32,
    pub id_expense_type: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Provider {
    pub name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Provider {
    /// Provider with a name and blank address
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address1: String::new(),
            address2: String::new(),
            city: String::new(),
            state: String::new(),
            zip: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimPayment {
    pub payment_date: String,
    pub paid_amount: f64,
    pub id_payment_type: u32,
    pub id_payment_status: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDocument {
    pub id_document: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_codes() {
        assert_eq!(ExpenseType::Transit.code(), 6);
        assert_eq!(ExpenseType::Parking.code(), 1);
        assert_eq!(ExpenseType::Bike.code(), 5);
    }

    #[test]
    fn unknown_category_is_transit() {
        assert_eq!(ExpenseType::parse_lenient("scooter"), ExpenseType::Transit);
        assert_eq!(ExpenseType::parse_lenient("scooter").code(), 6);
        assert_eq!(ExpenseType::parse_lenient(""), ExpenseType::Transit);
    }

    #[test]
    fn category_parse_ignores_case() {
        assert_eq!(ExpenseType::parse_lenient("PARKING"), ExpenseType::Parking);
        assert_eq!(" Bike ".parse::<ExpenseType>().unwrap(), ExpenseType::Bike);
    }
}
