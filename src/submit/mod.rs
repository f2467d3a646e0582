pub mod engine;
pub mod batch;

pub use engine::{ClaimEngine, FailureStage, ProcessResult};
pub use batch::{BatchProcessor, BatchSummary};
