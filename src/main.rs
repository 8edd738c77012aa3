//! MA Excursion - maximum price excursion between moving-average crosses
//!
//! Command-line front end: one-shot analysis or a polling watch loop.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use ma_excursion::adapters::alerts::AlertNotifier;
use ma_excursion::adapters::cli::{AnalysisArgs, AnalyzeCmd, CliApp, Command, OutputFormat, WatchCmd};
use ma_excursion::adapters::display::{JsonRenderer, TextRenderer};
use ma_excursion::adapters::market_data::load_bars;
use ma_excursion::application::{AnalysisSession, ExcursionAnalyzer, InstrumentLabel};
use ma_excursion::config::{load_config, Config};
use ma_excursion::domain::Bar;
use ma_excursion::ports::{AlignedSeries, Renderer};
use ma_excursion::strategy::{build_series, AnalysisConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (webhook URLs go here, not in config.toml)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Analyze(cmd) => analyze_command(cmd),
        Command::Watch(cmd) => watch_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

/// Load the optional config file and apply command-line overrides
fn resolve_config(args: &AnalysisArgs) -> Result<(Config, AnalysisConfig)> {
    let config = match &args.config {
        Some(path) => {
            let path = expand_path(path);
            load_config(&path).with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => {
            tracing::debug!("No config file given, using defaults");
            Config::default()
        }
    };

    let mut analysis = AnalysisConfig::from(&config);
    args.apply(&mut analysis);
    analysis.validate().context("Invalid analysis settings")?;
    Ok((config, analysis))
}

/// Expand `~` in user-supplied paths
fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string())
}

/// Bar count plus the newest bar; a forming bar changes it without adding a row
#[derive(Debug, Clone, Copy, PartialEq)]
struct HistoryKey {
    bars: usize,
    last: Option<Bar>,
}

impl HistoryKey {
    fn of(bars: &[Bar]) -> Self {
        Self {
            bars: bars.len(),
            last: bars.last().copied(),
        }
    }
}

fn read_series(path: &Path, analysis: &AnalysisConfig) -> Result<(HistoryKey, AlignedSeries)> {
    let bars = load_bars(path).with_context(|| format!("Failed to load bars from {}", path.display()))?;
    let series = build_series(&bars, &analysis.moving_average).context("Failed to build MA series")?;
    Ok((HistoryKey::of(&bars), series))
}

fn make_renderer(format: OutputFormat, show_excursions: bool) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::stdout(show_excursions)),
        OutputFormat::Json => Box::new(JsonRenderer::stdout(true)),
    }
}

fn analyze_command(cmd: AnalyzeCmd) -> Result<()> {
    let (_, analysis) = resolve_config(&cmd.analysis)?;
    let input = expand_path(&cmd.input);

    let (history, series) = read_series(&input, &analysis)?;
    tracing::info!(bars = history.bars, mode = %analysis.distance_mode, cross_point = %analysis.cross_point, "Analyzing");

    let mut analyzer = ExcursionAnalyzer::new(analysis).context("Failed to create analyzer")?;
    let frame = analyzer.run_pass(&series)?;

    let mut renderer = make_renderer(cmd.format, cmd.excursions);
    renderer.render(&frame).context("Failed to render results")?;
    Ok(())
}

async fn watch_command(cmd: WatchCmd) -> Result<()> {
    let (config, mut analysis) = resolve_config(&cmd.analysis)?;
    if cmd.alerts {
        analysis.alerts_enabled = true;
    }
    let input = expand_path(&cmd.input);

    let notifier = AlertNotifier::from_url(config.alerts.get_webhook_url())
        .context("Failed to create alert notifier")?;
    if analysis.alerts_enabled && matches!(notifier, AlertNotifier::Log(_)) {
        tracing::warn!("No webhook configured - alerts will only be logged");
    }

    let instrument = InstrumentLabel {
        symbol: config.instrument.symbol.clone(),
        timeframe: config.instrument.timeframe.clone(),
    };
    let analyzer = ExcursionAnalyzer::new(analysis.clone()).context("Failed to create analyzer")?;
    let mut session = AnalysisSession::new(analyzer, make_renderer(cmd.format, false), notifier, instrument);

    tracing::info!(input = %input.display(), interval_secs = cmd.interval, "Watching bar file");

    let mut ticker = tokio::time::interval(Duration::from_secs(cmd.interval.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut last_history = None;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received");
                break;
            }
            _ = ticker.tick() => {
                let (history, series) = match read_series(&input, &analysis) {
                    Ok(loaded) => loaded,
                    Err(e) => {
                        tracing::warn!(error = %format!("{:#}", e), "Skipping poll");
                        continue;
                    }
                };

                if last_history == Some(history) {
                    continue;
                }
                last_history = Some(history);

                let frame = session.process(&series).await?;
                tracing::debug!(records = frame.records.len(), pass = session.passes(), "Pass complete");
            }
        }
    }

    tracing::info!(passes = session.passes(), "Watch stopped");
    Ok(())
}
