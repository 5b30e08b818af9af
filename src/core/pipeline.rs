use crate::core::output::render;
use crate::core::report::parse_report;
use crate::core::uncovered::{summarize, uncovered_lines};
use crate::core::{ConfigProvider, CoverageReport, Pipeline, Storage, TransformResult};
use crate::utils::error::Result;

pub struct CoveragePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CoveragePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CoveragePipeline<S, C> {
    async fn extract(&self) -> Result<CoverageReport> {
        let report_path = self.config.report_path();
        tracing::debug!("Reading coverage report from: {}", report_path);

        let bytes = self.storage.read_file(report_path).await?;
        tracing::debug!("Read {} bytes, parsing JaCoCo XML", bytes.len());

        parse_report(&bytes)
    }

    async fn transform(&self, report: CoverageReport) -> Result<TransformResult> {
        let records = uncovered_lines(&report, self.config.source_root());
        let summary = summarize(&report, &records);

        tracing::debug!(
            "Rendering {} records as {}",
            records.len(),
            self.config.output_format()
        );
        let rendered = render(&records, self.config.output_format())?;

        Ok(TransformResult {
            records,
            summary,
            rendered,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();

        tracing::debug!(
            "Writing {} bytes to {}",
            result.rendered.len(),
            output_path
        );
        self.storage.write_file(output_path, &result.rendered).await?;

        Ok(output_path.to_string())
    }
}
