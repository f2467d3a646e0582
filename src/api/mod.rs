pub mod client;
pub mod types;

pub use client::{content_type_for, ClaimsApi, EdenredClient};
pub use types::{UploadResponse, ReceiptScan, ScanField};

#[cfg(test)]
pub use client::MockClaimsApi;
