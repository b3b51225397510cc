mod render;
mod session;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use weekday_range_core::calendar::YearMonth;
use weekday_range_core::field::DateRangeField;
use weekday_range_core::grid::MonthGrid;
use weekday_range_core::range::{DateRange, DateSpan, PredefinedRange};
use weekday_range_presets::file::FilePresets;
use weekday_range_presets::provider::PresetProvider;
use weekday_range_presets::relative::RelativePresets;

use crate::session::Session;

#[derive(Parser)]
#[command(
    name = "weekday-range",
    about = "Pick weekday-only date ranges and list the weekends they span"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the weekend days inside a date range
    Weekends {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        end: NaiveDate,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render a month grid
    Month {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month, 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,

        /// Highlight a range starting here (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Highlight a range ending here (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,

        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// List the predefined ranges
    Presets {
        /// JSON preset file (falls back to $WEEKDAY_RANGE_PRESETS, then built-ins)
        #[arg(long)]
        presets_file: Option<PathBuf>,

        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Pick a range interactively from stdin commands
    Pick {
        /// Initially selected start date (YYYY-MM-DD)
        #[arg(long, requires = "end")]
        start: Option<NaiveDate>,

        /// Initially selected end date (YYYY-MM-DD)
        #[arg(long, requires = "start")]
        end: Option<NaiveDate>,

        /// JSON preset file (falls back to $WEEKDAY_RANGE_PRESETS, then built-ins)
        #[arg(long)]
        presets_file: Option<PathBuf>,

        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Dismiss the open picker after this many idle seconds
        #[arg(long)]
        idle_timeout: Option<u64>,

        /// Print confirmed selections as JSON
        #[arg(long)]
        json: bool,
    },
}

fn today_or(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn create_provider(presets_file: Option<PathBuf>) -> Box<dyn PresetProvider> {
    match presets_file {
        Some(path) => Box::new(FilePresets::new(path)),
        None => match FilePresets::from_env() {
            Ok(provider) => Box::new(provider),
            Err(_) => Box::new(RelativePresets::default()),
        },
    }
}

fn load_presets(presets_file: Option<PathBuf>, today: NaiveDate) -> Result<Vec<PredefinedRange>> {
    let provider = create_provider(presets_file);
    info!("Using presets: {}", provider.name());
    provider
        .presets(today)
        .with_context(|| format!("failed to load {} presets", provider.name()))
}

fn cmd_weekends(start: NaiveDate, end: NaiveDate, json: bool) -> Result<()> {
    let (weekends, weekdays) = match DateSpan::new(start, end) {
        Ok(span) => (span.weekend_dates(), span.weekdays()),
        Err(e) => {
            warn!("{e}, range is empty");
            (Vec::new(), Vec::new())
        }
    };

    if json {
        let out = serde_json::json!({
            "start": start,
            "end": end,
            "weekends": weekends,
            "weekday_count": weekdays.len(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "{start} to {end}: {} weekday(s), {} weekend day(s)",
        weekdays.len(),
        weekends.len()
    );
    for date in &weekends {
        println!("{date} {}", date.format("%a"));
    }
    Ok(())
}

fn cmd_month(
    year: Option<i32>,
    month: Option<u32>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<()> {
    let current = YearMonth::of(today);
    let year = year.unwrap_or(current.year());
    let month0 = match month {
        Some(m) => m.checked_sub(1).context("month must be 1-12")?,
        None => current.month0(),
    };
    let month = YearMonth::new(year, month0)
        .with_context(|| format!("cannot show month {} of year {year}", month0 + 1))?;
    let range = DateRange::from_bounds(start, end).context("invalid range")?;

    let grid = MonthGrid::build(month, today, &range, None);
    print!("{}", render::month_grid(&grid));
    if !matches!(range, DateRange::Empty) {
        println!("Selection: {}", render::range_status(&range));
    }
    Ok(())
}

fn cmd_presets(presets: &[PredefinedRange], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(presets)?);
        return Ok(());
    }
    if presets.is_empty() {
        println!("No presets.");
        return Ok(());
    }
    print!("{}", render::preset_list(presets));
    Ok(())
}

async fn cmd_pick(
    initial: Option<DateSpan>,
    presets: Vec<PredefinedRange>,
    today: NaiveDate,
    idle_timeout: Option<Duration>,
    json: bool,
) -> Result<()> {
    let mut field = DateRangeField::new(session::printer(json));
    if let Some(span) = initial {
        field.set_selected(span);
    }
    let session = Session::new(field, today, presets);
    session::run(session, idle_timeout).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Weekends { start, end, json } => {
            cmd_weekends(start, end, json)?;
        }
        Commands::Month {
            year,
            month,
            start,
            end,
            today,
        } => {
            cmd_month(year, month, start, end, today_or(today))?;
        }
        Commands::Presets {
            presets_file,
            today,
            json,
        } => {
            let presets = load_presets(presets_file, today_or(today))?;
            cmd_presets(&presets, json)?;
        }
        Commands::Pick {
            start,
            end,
            presets_file,
            today,
            idle_timeout,
            json,
        } => {
            let today = today_or(today);
            let initial = match (start, end) {
                (Some(start), Some(end)) => {
                    Some(DateSpan::new(start, end).context("invalid initial range")?)
                }
                _ => None,
            };
            let presets = load_presets(presets_file, today)?;
            cmd_pick(
                initial,
                presets,
                today,
                idle_timeout.map(Duration::from_secs),
                json,
            )
            .await?;
        }
    }

    Ok(())
}
