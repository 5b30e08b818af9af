use clap::Parser;
use jacoco_uncovered::utils::{logger, validation::Validate};
use jacoco_uncovered::{CliConfig, CoverageError, CoveragePipeline, EtlEngine, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting jacoco-uncovered");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析並驗證配置
    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let monitor_enabled = config.monitor;
    let storage = LocalStorage::current_dir();
    let pipeline = CoveragePipeline::new(storage, config);
    let mut engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => println!("Created file: {}", output_path),
        Err(e) => fail(e),
    }
}

fn fail(e: CoverageError) -> ! {
    tracing::error!(
        "❌ Extraction failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("   {}", e);
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code());
}
