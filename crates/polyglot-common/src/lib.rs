//! Common error type and logging setup shared by the Polyglot crates

pub mod error;
pub mod logging;

pub use error::{PolyglotError, Result};
pub use logging::{init_logging, LoggingConfig};
