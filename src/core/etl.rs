use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// 依序執行 extract -> transform -> load，任何一步失敗即中止
    pub async fn run(&mut self) -> Result<String> {
        tracing::info!("Starting coverage extraction...");

        // Extract
        let report = self.pipeline.extract().await?;
        tracing::info!("Parsed report with {} packages", report.packages.len());
        self.monitor.log_stats("Extract");

        // Transform
        let result = self.pipeline.transform(report).await?;
        tracing::info!(
            "Found {} uncovered lines in {} source files ({} lines inspected)",
            result.summary.uncovered_lines,
            result.summary.source_files,
            result.summary.lines
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
