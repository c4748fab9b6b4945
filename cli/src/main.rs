//! CLI entrypoint for P&ID Insight
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use pid_application::AnalysisSessionManager;
use pid_domain::{ConfigIssue, Model, Severity};
use pid_infrastructure::config::expand_home;
use pid_infrastructure::{ConfigLoader, FileConfig, GeminiLlmGateway, JsonlConversationLogger};
use pid_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ReplConfig, load_diagram, messages, run_one_shot,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, cli.log_file_dir.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    report_issues(&config.validate());

    info!("Starting P&ID Insight");

    let model: Model = match &cli.model {
        Some(name) if !name.trim().is_empty() => {
            let Ok(model) = name.parse::<Model>();
            model
        }
        _ => config.gemini.parse_model().0,
    };
    let format = cli
        .output
        .unwrap_or_else(|| config.output.parse_format().0);
    ConsoleFormatter::set_color_enabled(config.output.color);

    let api_key = config.gemini.resolve_api_key();
    if api_key.is_none() {
        report_issues(&[config.missing_api_key_issue()]);
    }

    // === Dependency Injection ===
    let gateway = Arc::new(GeminiLlmGateway::new(config.gemini.to_settings(api_key))?);
    let manager = Arc::new(build_manager(gateway, model, &config));
    let show_progress = !cli.quiet && config.repl.show_progress;

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress,
            history_file: config
                .repl
                .history_file
                .as_deref()
                .map(expand_home)
                .or(ReplConfig::default().history_file),
        };
        ChatRepl::new(manager, repl_config)
            .run(cli.image.clone())
            .await?;
        return Ok(());
    }

    // One-shot mode - an image is required
    let Some(path) = cli.image.as_deref() else {
        bail!("A diagram image is required. Use --chat for interactive mode.");
    };
    let image = load_diagram(path)?;

    match run_one_shot(&manager, image, &cli.questions, show_progress).await {
        Ok(report) => {
            println!("{}", ConsoleFormatter::render(format, &report));
            Ok(())
        }
        Err(e) => bail!("{}", messages::analysis_failure(&e)),
    }
}

/// Initialize tracing: stderr always, plus daily files when `log_dir` is set.
///
/// Without `-v`, `RUST_LOG` is honoured; otherwise the verbosity flag wins.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let Some(dir) = log_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create log directory {}", dir.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "pid-insight.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Ok(Some(guard))
}

fn build_manager(
    gateway: Arc<GeminiLlmGateway>,
    model: Model,
    config: &FileConfig,
) -> AnalysisSessionManager {
    let manager = AnalysisSessionManager::new(gateway, model);

    let Some(dir) = config.logging.transcript_dir() else {
        return manager;
    };
    match JsonlConversationLogger::in_dir(&dir) {
        Some(logger) => {
            info!("Session transcript: {}", logger.path().display());
            manager.with_conversation_logger(Arc::new(logger))
        }
        None => manager,
    }
}

fn report_issues(issues: &[ConfigIssue]) {
    for issue in issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
}
