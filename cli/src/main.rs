//! CLI entrypoint for showrunner
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use showrunner_application::{
    Announcer, PlayerRegistry, SeasonArchive, SeasonConfig, SeasonService,
};
use showrunner_domain::Outcome;
use showrunner_infrastructure::{
    ConfigLoader, FileConfig, InMemoryPlayerRegistry, InMemorySeasonArchive, JsonlSeasonArchive,
};
use showrunner_presentation::{
    Cli, CommandLine, ConsoleAnnouncer, ConsoleFormatter, OutputFormat, parse_line,
};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let file_config = if cli.no_config {
        info!("Configuration files disabled (--no-config)");
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let issues = file_config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue.message);
    }
    let errors: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(|i| i.message.as_str())
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }

    let format = cli.output_format();
    let config = file_config.to_season_config();

    // === Dependency Injection ===
    let registry: Arc<dyn PlayerRegistry> = Arc::new(InMemoryPlayerRegistry::new());
    let archive = open_archive(&file_config)?;
    let announcer: Arc<dyn Announcer> =
        Arc::new(ConsoleAnnouncer::stdout(format == OutputFormat::Json));

    let service = SeasonService::open(config, registry, archive, announcer)
        .await
        .context("Failed to read the season archive")?;
    info!(
        season = service.snapshot().season_number,
        "Season service ready"
    );

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &cli.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    run(&service, reader, format).await?;
    drain(&service).await;

    Ok(())
}

/// Initialize logging based on verbosity level, optionally mirrored to a
/// daily rolling file
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "showrunner.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn open_archive(file_config: &FileConfig) -> Result<Arc<dyn SeasonArchive>> {
    match &file_config.archive.path {
        Some(path) => {
            let archive = JsonlSeasonArchive::open(path)
                .with_context(|| format!("Failed to open season archive {}", path))?;
            info!("Archiving seasons to {}", archive.path().display());
            Ok(Arc::new(archive))
        }
        None => Ok(Arc::new(InMemorySeasonArchive::new())),
    }
}

/// Feed every input line to the service and print the result
async fn run(
    service: &SeasonService,
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    format: OutputFormat,
) -> Result<()> {
    let config: &SeasonConfig = service.config();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                let rendered = match format {
                    OutputFormat::Text => ConsoleFormatter::format_parse_error(&e),
                    OutputFormat::Json => ConsoleFormatter::format_parse_error_json(&e),
                };
                println!("{}", rendered);
                continue;
            }
        };

        let CommandLine { actor, intent } = command;
        let actor = config.actor(actor);
        let rendered = match service.handle(&actor, intent).await {
            Ok(outcome) => render_outcome(&outcome, format),
            Err(e) => match format {
                OutputFormat::Text => ConsoleFormatter::format_rejection(&e),
                OutputFormat::Json => ConsoleFormatter::format_rejection_json(&e),
            },
        };
        println!("{}", rendered);
    }

    Ok(())
}

fn render_outcome(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => ConsoleFormatter::format_outcome(outcome),
        OutputFormat::Json => ConsoleFormatter::format_outcome_json(outcome),
    }
}

/// Let a running competition reach its deadline and pending reveals print
/// before the process exits
async fn drain(service: &SeasonService) {
    let mut snapshots = service.subscribe();
    while snapshots.borrow_and_update().competition.is_some() {
        if snapshots.changed().await.is_err() {
            break;
        }
    }
    tokio::time::sleep(service.config().reveal_delay()).await;
}
