pub mod etl;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod uncovered;

pub use crate::domain::model::{CoverageReport, TransformResult, UncoveredLine};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
