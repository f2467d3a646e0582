use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    api::ClaimsApi,
    claim::{build_claim, extract_receipt, ClaimOptions, ExtractedReceipt, ReceiptJob},
};

/// Step at which a job stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Upload,
    Build,
    Submit,
}

/// Outcome of one receipt job
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ProcessResult {
    Success {
        image_path: PathBuf,
        receipt_data: ExtractedReceipt,
        result: Value,
    },
    Error {
        image_path: PathBuf,
        stage: FailureStage,
        error: String,
        /// Present when the upload went through before the failure
        #[serde(skip_serializing_if = "Option::is_none")]
        receipt_data: Option<ExtractedReceipt>,
    },
}

impl ProcessResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessResult::Success { .. })
    }

    pub fn image_path(&self) -> &PathBuf {
        match self {
            ProcessResult::Success { image_path, .. } | ProcessResult::Error { image_path, .. } => {
                image_path
            }
        }
    }
}

/// Runs a single receipt through upload, extraction and claim submission
pub struct ClaimEngine<A: ClaimsApi> {
    api: A,
    member_id: i64,
    today: fn() -> NaiveDate,
}

impl<A: ClaimsApi> ClaimEngine<A> {
    pub fn new(api: A, member_id: i64) -> Self {
        Self {
            api,
            member_id,
            today: local_today,
        }
    }

    /// Replace the clock used for the "no date anywhere" fallback
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Process one job. Failures are captured in the result, never returned.
    pub fn process_receipt(&self, job: &ReceiptJob) -> ProcessResult {
        let path = job.image_path.clone();

        let uploaded = match self.api.upload_receipt(&job.image_path) {
            Ok(body) => body,
            Err(e) => {
                warn!("✗ {}: {}", path.display(), e);
                return ProcessResult::Error {
                    image_path: path,
                    stage: FailureStage::Upload,
                    error: e.to_string(),
                    receipt_data: None,
                };
            }
        };

        let receipt = extract_receipt(&uploaded);
        info!(
            "✓ {}: ${} from {}",
            path.display(),
            receipt.amount,
            receipt.merchant_name
        );

        let options = ClaimOptions {
            expense_date: job.expense_date.as_deref(),
            merchant_override: job.merchant_override.as_deref(),
            expense_type: job.expense_type,
        };

        let payload = match build_claim(self.member_id, &receipt, &options, (self.today)()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("✗ {}: {}", path.display(), e);
                return ProcessResult::Error {
                    image_path: path,
                    stage: FailureStage::Build,
                    error: e.to_string(),
                    receipt_data: Some(receipt),
                };
            }
        };

        match self.api.submit_claim(&payload) {
            Ok(result) => ProcessResult::Success {
                image_path: path,
                receipt_data: receipt,
                result,
            },
            Err(e) => {
                warn!("✗ {}: {}", path.display(), e);
                ProcessResult::Error {
                    image_path: path,
                    stage: FailureStage::Submit,
                    error: e.to_string(),
                    receipt_data: Some(receipt),
                }
            }
        }
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
