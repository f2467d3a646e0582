pub mod token;

pub use token::{decode_identity, Identity};
