use crate::domain::model::{CoverageReport, OutputFormat, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn report_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn source_root(&self) -> &str;
    fn output_format(&self) -> OutputFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CoverageReport>;
    async fn transform(&self, report: CoverageReport) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
