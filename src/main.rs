use clap::Parser;
use curriculum_etl::utils::error::ErrorSeverity;
use curriculum_etl::utils::{logger, validation::Validate};
use curriculum_etl::{CliConfig, CurriculumEngine, HttpSource, LocalStorage, RunSummary};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting curriculum-etl");

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!(
        "✅ Configuration loaded: {} study program(s) from {}",
        config.study_programs.len(),
        config.base_url()
    );

    let source = HttpSource::new(&config.source)?;
    let storage = LocalStorage::new(config.output_root());
    let engine = CurriculumEngine::new(source, storage, config);

    let result = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no artifacts will be written");
        engine.dry_run().await
    } else {
        engine.run().await
    };

    match result {
        Ok(summary) => print_summary(&summary, cli.dry_run),
        Err(e) => {
            tracing::error!(
                "❌ Curriculum build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    println!("📋 Curriculum Summary:");
    println!("  Study programs: {}", summary.programs);
    println!("  Modules: {}", summary.modules);
    println!("  Categories: {}", summary.categories);
    println!("  Focuses: {}", summary.focuses);
    if summary.skipped_details > 0 {
        println!(
            "  ⚠️ Modules without detail data: {}",
            summary.skipped_details
        );
    }
    if dry_run {
        println!("🔍 Dry run finished, nothing written");
        return;
    }
    for artifact in &summary.artifacts {
        println!("📁 {}", artifact);
    }
}
