pub mod config;
pub mod error;
pub mod types;

pub use config::MindmateConfig;
pub use error::{MindmateError, Result};
pub use types::*;
