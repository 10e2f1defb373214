use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use jiff::Zoned;
use sweepday::display::calendar_dates;
use sweepday::loader::{self, RawSchedule, SegmentReport, SideSummary};
use sweepday::ScheduleError;

#[derive(Parser)]
#[command(
    name = "sweepday",
    about = "Next street-sweeping window for weekday + ordinal-week schedules",
    version
)]
struct Cli {
    /// Schedule record as JSON, e.g. '{"frequency":"weekly","day":"tue","start_time":"8:00 AM","end_time":"10:00 AM"}'
    schedule: Option<String>,

    /// GeoJSON feature collection of street segments
    #[arg(long, conflicts_with_all = ["schedule", "neighborhood"])]
    file: Option<PathBuf>,

    /// Neighborhood name, resolved to a file under --data-dir
    #[arg(long, conflicts_with = "schedule")]
    neighborhood: Option<String>,

    /// Directory holding per-neighborhood GeoJSON files
    #[arg(long, env = "SWEEPDAY_DATA_DIR", default_value = "data/neighborhoods")]
    data_dir: PathBuf,

    /// Reference instant (ISO 8601 with time zone); defaults to now
    #[arg(long)]
    now: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let now: Zoned = match cli.now {
        Some(ref s) => match s.parse() {
            Ok(z) => z,
            Err(e) => {
                eprintln!("error: invalid --now datetime: {e}");
                process::exit(1);
            }
        },
        None => Zoned::now(),
    };

    let path = match (&cli.file, &cli.neighborhood) {
        (Some(file), _) => Some(file.clone()),
        (None, Some(name)) => Some(cli.data_dir.join(loader::neighborhood_file_name(name))),
        (None, None) => None,
    };

    if let Some(path) = path {
        match run_segments(&path, &now, cli.json) {
            Ok(()) => process::exit(0),
            Err(e) => {
                eprintln!("{}", e.display_rich());
                process::exit(1);
            }
        }
    }

    let text = match cli.schedule {
        Some(ref s) => s.clone(),
        None => {
            eprintln!("error: no schedule provided");
            process::exit(2);
        }
    };

    let descriptor = match RawSchedule::Text(text).resolve() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("{}", e.display_rich());
            process::exit(1);
        }
    };

    let summary = SideSummary::new(descriptor, &now);
    if cli.json {
        print_json(&summary);
    } else {
        match summary.window() {
            Some(window) => {
                println!("next:  {}", summary.next);
                println!("until: {}", summary.until);
                println!("dates: {}", calendar_dates(&window));
            }
            None => println!("not available"),
        }
    }
}

fn run_segments(path: &Path, now: &Zoned, json: bool) -> Result<(), ScheduleError> {
    let data = fs::read_to_string(path)
        .map_err(|e| ScheduleError::io(e.to_string(), path.display().to_string()))?;
    let segments = loader::load_segments(&data)?;
    tracing::info!(path = %path.display(), segments = segments.len(), "loaded street segments");

    let reports: Vec<SegmentReport> = segments
        .iter()
        .map(|segment| SegmentReport::new(segment, now))
        .collect();

    if json {
        print_json(&reports);
        return Ok(());
    }

    for report in reports.iter().filter(|r| !r.sides.is_empty()) {
        println!("{}", report.street);
        for (side, summary) in &report.sides {
            println!(
                "  {:<6} {} -> {}",
                side.title(),
                summary.next,
                summary.until
            );
        }
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: failed to serialize: {e}");
            process::exit(1);
        }
    }
}
