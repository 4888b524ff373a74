pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{http::HttpSource, storage::LocalStorage};
pub use config::{toml_config::CrawlerConfig, CliConfig};
pub use core::engine::{CurriculumEngine, Dataset, RunSummary};
pub use utils::error::{CurriculumError, Result};
