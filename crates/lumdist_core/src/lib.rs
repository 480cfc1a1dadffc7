pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::{Cosmology, IntegrationConfig, RedshiftFactor};
pub use constants::*;
pub use error::{LumdistError, Result};
pub use types::*;
