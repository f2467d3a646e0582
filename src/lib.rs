pub mod auth;
pub mod api;
pub mod claim;
pub mod submit;
pub mod manifest;
pub mod config;
pub mod error;
pub mod utils;

pub use error::{Result, ClaimError};
pub use config::Config;
