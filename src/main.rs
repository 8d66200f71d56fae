use anyhow::Context;
use clap::Parser;
use door_marks::domain::model::CommandOutcome;
use door_marks::utils::error::ErrorSeverity;
use door_marks::utils::validation::{validate_required_field, Validate};
use door_marks::utils::logger;
use door_marks::{
    CliConfig, CommandConfig, InMemoryDocument, ListMarksCommand, TomlConfig, TracingReportSink,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting door-marks");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入 TOML 配置，命令列參數優先
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            if let Err(e) = config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
            config
        }
        None => TomlConfig::default(),
    };

    let mut config: CommandConfig = file_config.to_command_config();
    cli.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let model_path = cli.model.clone().or_else(|| file_config.model_path().map(String::from));
    let model_path = match validate_required_field("model", &model_path) {
        Ok(path) => path.clone(),
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Pass --model <path> or set [model].path in the config file");
            std::process::exit(1);
        }
    };
    let save_path = cli
        .save
        .clone()
        .or_else(|| file_config.save_path().map(String::from));
    let report_json = cli
        .report_json
        .clone()
        .or_else(|| file_config.report_json_path().map(String::from));

    let mut doc = InMemoryDocument::from_file(&model_path)
        .with_context(|| format!("failed to load model '{}'", model_path))?;
    let mut sink = TracingReportSink::new(config.element_noun.clone());
    let command = ListMarksCommand::new(config);

    match command.execute(&mut doc, &mut sink) {
        Ok(outcome) => {
            write_outputs(&doc, &outcome, save_path.as_deref(), report_json.as_deref())?;
            tracing::info!(
                "✅ Command succeeded ({} changed, transaction {:?})",
                outcome.changed_count(),
                outcome.transaction_state()
            );
            println!("✅ {} element(s) changed", outcome.changed_count());
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0, // 使用者取消
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

fn write_outputs(
    doc: &InMemoryDocument,
    outcome: &CommandOutcome,
    save_path: Option<&str>,
    report_json: Option<&str>,
) -> anyhow::Result<()> {
    if let Some(path) = save_path {
        doc.save(path)
            .with_context(|| format!("failed to save model to '{}'", path))?;
        tracing::info!("📁 Model saved to: {}", path);
    }

    if let Some(path) = report_json {
        match &outcome.report {
            Some(report) => {
                let json = serde_json::to_string_pretty(report)?;
                std::fs::write(path, json)
                    .with_context(|| format!("failed to write report to '{}'", path))?;
                tracing::info!("📁 Report saved to: {}", path);
            }
            None => tracing::info!("No elements found, report file not written"),
        }
    }

    Ok(())
}
