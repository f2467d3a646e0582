use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::{
    api::ClaimsApi,
    claim::ReceiptJob,
    submit::engine::{ClaimEngine, ProcessResult},
};

/// Sequential batch runner with a fixed pause between receipts
pub struct BatchProcessor<A: ClaimsApi> {
    engine: ClaimEngine<A>,
    delay: Duration,
}

impl<A: ClaimsApi> BatchProcessor<A> {
    pub fn new(engine: ClaimEngine<A>, delay_seconds: u64) -> Self {
        Self::with_delay(engine, Duration::from_secs(delay_seconds))
    }

    pub fn with_delay(engine: ClaimEngine<A>, delay: Duration) -> Self {
        Self { engine, delay }
    }

    /// Process jobs in order, one result per job.
    ///
    /// Blocks for the configured delay between jobs, not after the last one.
    pub fn process_batch(&self, jobs: &[ReceiptJob]) -> BatchSummary {
        let total = jobs.len();
        info!("Processing {} receipts ({}s apart)", total, self.delay.as_secs_f64());

        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };

        for (index, job) in jobs.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, job.image_path.display());

            let result = self.engine.process_receipt(job);
            match &result {
                ProcessResult::Success { receipt_data, .. } => {
                    summary.successful += 1;
                    summary.total_amount += receipt_data.amount;
                }
                ProcessResult::Error { .. } => summary.failed += 1,
            }
            summary.results.push(result);

            if index + 1 < total {
                std::thread::sleep(self.delay);
            }
        }

        info!(
            "Batch complete: {} successful, {} failed",
            summary.successful, summary.failed
        );

        summary
    }
}

/// Results of a batch run, in input order
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub total_amount: f64,
    pub results: Vec<ProcessResult>,
}

impl BatchSummary {
    /// Print a formatted summary to console
    pub fn print_summary(&self) {
        println!("\n{}", "=== Claim Batch Summary ===".cyan().bold());
        println!("Total Receipts:  {}", self.total);
        println!("Successful:      {} ✓", self.successful.to_string().green());
        println!("Failed:          {} ✗", self.failed.to_string().red());
        println!("Success Rate:    {:.1}%", self.success_rate());
        println!("Total Claimed:   {}", crate::utils::format_amount(self.total_amount));
        println!("{}", "===========================".cyan());
    }

    /// Get success rate as percentage
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.successful as f64 / self.total as f64) * 100.0
        }
    }
}
