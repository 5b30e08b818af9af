pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, RunConfig};
pub use core::{etl::EtlEngine, pipeline::CoveragePipeline};
pub use domain::model::{CoverageReport, OutputFormat, UncoveredLine};
pub use utils::error::{CoverageError, Result};
