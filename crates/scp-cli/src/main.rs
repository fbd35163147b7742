use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Colored;
use crossterm::tty::IsTty;

#[derive(Parser)]
#[command(name = "scp")]
#[command(about = "Access the SCP Archives")]
#[command(long_about = "Access the SCP Archives by specifying a number or URL.")]
#[command(version)]
struct Cli {
    /// Article number (e.g. "173") or full page URL
    article: String,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long)]
    utc: bool,

    /// When to color the object class
    #[arg(long, default_value = "auto", value_enum)]
    color: ColorMode,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Whether to color, given what the terminal and environment report.
    fn enabled(self, stdout_is_tty: bool, no_color: bool) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => stdout_is_tty && !no_color,
        }
    }

    /// Decide for this process and tell crossterm, so `--color always`
    /// overrides `NO_COLOR`.
    fn apply(self) -> bool {
        let enabled = self.enabled(std::io::stdout().is_tty(), Colored::ansi_color_disabled());
        Colored::set_ansi_color_disabled(!enabled);
        enabled
    }
}

fn init_logging(level: &LogLevel, utc: bool) {
    // Suppress noisy HTML-parsing crates at debug/trace
    let level = match level {
        LogLevel::Error => "error",
        LogLevel::Warn  => "warn",
        LogLevel::Info  => "info",
        LogLevel::Debug => "debug,selectors=warn,html5ever=warn",
        LogLevel::Trace => "trace,selectors=warn,html5ever=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    // stdout carries the article, so logs go to stderr
    if utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.utc);

    let paint = cli.color.apply();
    tracing::info!(article = %cli.article, paint, "Reading article");

    let article = scp_acquire::resolve_and_fetch(&cli.article, paint)
        .await
        .with_context(|| format!("Failed to read article {}", cli.article))?;

    tracing::info!(
        title = %article.title,
        rating = %article.rating,
        color = %article.color(),
        "Fetched article"
    );
    if !article.has_rating() {
        tracing::warn!(title = %article.title, "No object class found");
    }

    println!("{}", article.content);

    Ok(())
}
