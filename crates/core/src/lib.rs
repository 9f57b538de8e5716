pub mod config;
pub mod error;
pub mod logging;
pub mod util;

pub use config::{GroovyLevel, GroovyscopeConfig};
pub use error::{CoreError, Result};
