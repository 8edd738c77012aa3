//! CLI Command Definitions
//!
//! Argument structures for all ma-excursion commands.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::strategy::{AnalysisConfig, AppliedPrice, CrossPoint, DistanceMode, MovingAverageKind};

/// MA Excursion - maximum price excursion between moving-average crosses
#[derive(Parser, Debug)]
#[command(
    name = "ma-excursion",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Maximum price excursion from a moving average between crosses",
    long_about = "Finds every price/MA cross in a bar history, measures how far price ran \
                  from the average before the next cross, and reports mean and median \
                  excursions for up and down moves."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one analysis pass over a bar file
    Analyze(AnalyzeCmd),

    /// Re-run the analysis whenever the bar file grows
    Watch(WatchCmd),
}

/// Output format for analysis frames
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Overrides applied on top of the configuration file
#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Path to configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Distance mode: absolute or relative
    #[arg(long, value_name = "MODE")]
    pub mode: Option<DistanceMode>,

    /// Cross point: ma-value or price
    #[arg(long, value_name = "POINT")]
    pub cross_point: Option<CrossPoint>,

    /// Override MA period
    #[arg(long, value_name = "BARS")]
    pub period: Option<usize>,

    /// Override MA kind: simple, exponential, smoothed, weighted
    #[arg(long, value_name = "KIND")]
    pub ma_kind: Option<MovingAverageKind>,

    /// Override the applied price
    #[arg(long, value_enum, value_name = "PRICE")]
    pub applied_price: Option<AppliedPriceArg>,

    /// Trailing bars to scan (0 = all)
    #[arg(long, value_name = "BARS")]
    pub max_bars: Option<usize>,

    /// Recent excursions used for statistics (0 = all)
    #[arg(long, value_name = "COUNT")]
    pub stats_count: Option<usize>,

    /// Minimum price increment used as reporting unit
    #[arg(long, value_name = "SIZE")]
    pub unit_size: Option<f64>,
}

/// Applied price values accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedPriceArg {
    Close,
    Open,
    High,
    Low,
    Median,
    Typical,
    Weighted,
}

impl From<AppliedPriceArg> for AppliedPrice {
    fn from(arg: AppliedPriceArg) -> Self {
        match arg {
            AppliedPriceArg::Close => AppliedPrice::Close,
            AppliedPriceArg::Open => AppliedPrice::Open,
            AppliedPriceArg::High => AppliedPrice::High,
            AppliedPriceArg::Low => AppliedPrice::Low,
            AppliedPriceArg::Median => AppliedPrice::Median,
            AppliedPriceArg::Typical => AppliedPrice::Typical,
            AppliedPriceArg::Weighted => AppliedPrice::Weighted,
        }
    }
}

impl AnalysisArgs {
    /// Apply command-line overrides to a loaded configuration
    pub fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(mode) = self.mode {
            config.distance_mode = mode;
        }
        if let Some(cross_point) = self.cross_point {
            config.cross_point = cross_point;
        }
        if let Some(period) = self.period {
            config.moving_average.period = period;
        }
        if let Some(kind) = self.ma_kind {
            config.moving_average.kind = kind;
        }
        if let Some(price) = self.applied_price {
            config.moving_average.applied_price = price.into();
        }
        if let Some(max_bars) = self.max_bars {
            config.max_bars = max_bars;
        }
        if let Some(count) = self.stats_count {
            config.stats_count = count;
        }
        if let Some(unit_size) = self.unit_size {
            config.unit_size = unit_size;
        }
    }
}

/// Single analysis pass
#[derive(Parser, Debug)]
pub struct AnalyzeCmd {
    /// Bar history CSV (time,open,high,low,close[,volume])
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List every excursion below the statistics panel
    #[arg(long)]
    pub excursions: bool,
}

/// Poll a bar file and re-analyze on change
#[derive(Parser, Debug)]
pub struct WatchCmd {
    /// Bar history CSV (time,open,high,low,close[,volume])
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Poll interval in seconds
    #[arg(long, value_name = "SECS", default_value = "5")]
    pub interval: u64,

    /// Enable alerts regardless of the configuration file
    #[arg(long)]
    pub alerts: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}
