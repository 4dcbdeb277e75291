pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod service;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use registry::chiller_registry;
pub use service::{ComparisonService, FieldExtractor};
