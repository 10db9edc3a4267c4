pub mod config;
pub mod error;
pub mod types;

pub use config::AerogridConfig;
pub use error::{AerogridError, Result};
pub use types::*;
