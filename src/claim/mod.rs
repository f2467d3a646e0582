pub mod types;
pub mod extractor;
pub mod builder;

pub use types::{ExpenseType, ExtractedReceipt, ReceiptJob, ClaimPayload};
pub use extractor::extract_receipt;
pub use builder::{build_claim, ClaimOptions};
