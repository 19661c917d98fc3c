use chrono::Utc;
use clap::Parser;
use numera::app::study::{compute_figures, validate_request, StudyRequest};
use numera::utils::{logger, validation::Validate};
use numera::{
    CliConfig, GeneratorConfig, OpenAiClient, RateLimiter, ServiceConfig, StudyEngine,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting numera CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let service_config = match &cli.config {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::from_env(),
    };

    if let Err(e) = service_config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(3);
    }

    let request = StudyRequest {
        kind: cli.study,
        person: cli.person(),
        partner: cli.partner(),
        reference_year: cli.year,
        event: cli.event_window(),
    };

    // The numbers are always computed and printed, with or without the
    // generated analysis.
    let validated = match validate_request(&request) {
        Ok(validated) => validated,
        Err(e) => {
            tracing::error!("❌ Invalid request: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    let figures = compute_figures(&validated)?;
    println!("{}", serde_json::to_string_pretty(&figures)?);

    if cli.offline {
        tracing::info!("Offline mode, skipping analysis generation");
        return Ok(());
    }

    let api_key = match service_config.api_key() {
        Some(key) => key.to_string(),
        None => {
            tracing::warn!("No API key configured, numbers printed without analysis");
            eprintln!("💡 Set OPENAI_API_KEY (or use --offline) to silence this message.");
            return Ok(());
        }
    };

    let generator = OpenAiClient::new(GeneratorConfig {
        api_key,
        model: service_config.model().to_string(),
        temperature: service_config.temperature(),
        max_tokens: service_config.max_tokens(),
        endpoint: service_config.endpoint().to_string(),
    });
    let limiter = RateLimiter::new(service_config.rate_limits(), Utc::now());
    let mut engine = StudyEngine::new(generator, limiter);

    match engine.run(&validated).await {
        Ok(report) => {
            tracing::info!("✅ Study generated successfully");
            println!("{}", serde_json::to_string_pretty(&report.analysis)?);
        }
        Err(e) => {
            tracing::error!(
                "❌ Study failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                numera::utils::error::ErrorSeverity::Low => 1,
                numera::utils::error::ErrorSeverity::Medium => 2,
                numera::utils::error::ErrorSeverity::High => 1,
                numera::utils::error::ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
