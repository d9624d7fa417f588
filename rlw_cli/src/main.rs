use clap::Parser;
use csv::Reader;
use rlw_core::common::{time::Time, utils::parse_price};
use rlw_core::{Analyzer, ErrCode, KLineUnit, RlwConfig, RlwError};
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rlw_cli")]
#[command(about = "Compute %R Larry Williams over OHLCV csv files", long_about = None)]
struct Args {
    /// CSV files or directories of CSV files (time,open,high,low,close,volume)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Lookback period, overrides the config file
    #[arg(short, long)]
    period: Option<usize>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "rlw_out")]
    output: PathBuf,

    /// Repair bars whose high/low are not the extremes instead of failing
    #[arg(long)]
    autofix: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    run(&args)?;
    Ok(())
}

/// Process every input; fails only when no file could be processed
fn run(args: &Args) -> Result<usize, RlwError> {
    let config = load_config(args)?;
    info!(name = %config.short_name(), "config loaded");

    let files = collect_csv_files(&args.inputs)?;
    let mut processed = 0;
    for path in &files {
        info!("Processing file: {:?}", path);
        match process_csv_file(path, &config, args) {
            Ok(_) => processed += 1,
            Err(e) => warn!(error = %e, "skip {:?}", path),
        }
    }

    if processed == 0 {
        return Err(RlwError::new(
            format!("none of {} csv files could be processed", files.len()),
            ErrCode::NoData,
        ));
    }
    if processed < files.len() {
        warn!(processed, failed = files.len() - processed, "some files were skipped");
    }
    Ok(processed)
}

fn load_config(args: &Args) -> Result<RlwConfig, RlwError> {
    let mut config = match &args.config {
        Some(path) => RlwConfig::from_file(path)?,
        None => RlwConfig::default(),
    };
    if let Some(period) = args.period {
        config.period = period;
    }
    config.check()?;
    Ok(config)
}

fn collect_csv_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, RlwError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            // walk one level of the directory for csv files
            let mut found = Vec::new();
            for entry in std::fs::read_dir(input)? {
                let path = entry?.path();
                if path.extension().and_then(|s| s.to_str()) == Some("csv") {
                    found.push(path);
                }
            }
            found.sort();
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(RlwError::new(
                format!("input {:?} not found", input),
                ErrCode::SrcDataNotFound,
            ));
        }
    }
    Ok(files)
}

fn process_csv_file(path: &Path, config: &RlwConfig, args: &Args) -> Result<PathBuf, RlwError> {
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);
    let mut kline_units = Vec::new();

    for result in rdr.records() {
        let record = result?;
        kline_units.push(parse_csv_record(&record, args.autofix)?);
    }

    if kline_units.is_empty() {
        return Err(RlwError::new(format!("{:?} has no rows", path), ErrCode::NoData));
    }

    // Sort by timestamp
    kline_units.sort_by_key(|k| k.time);

    let mut analyzer = Analyzer::new(config.clone())?;
    analyzer.update(&kline_units)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let out = analyzer.to_csv(&args.output, &format!("{}_rlw", stem))?;

    let points = analyzer.points();
    let valued = points.iter().filter(|p| p.value.is_some()).count();
    info!(
        bars = points.len(),
        valued,
        first = %points[0].time,
        last = %points[points.len() - 1].time,
        last_value = ?analyzer.oscillator().last_value(),
        "Analysis completed, wrote {:?}",
        out
    );

    Ok(out)
}

fn parse_csv_record(record: &csv::StringRecord, autofix: bool) -> Result<KLineUnit, RlwError> {
    let field = |idx: usize, name: &str| {
        record.get(idx).ok_or_else(|| {
            RlwError::new(
                format!("missing column {} in row {:?}", name, record),
                ErrCode::SrcDataFormatError,
            )
        })
    };

    let time: Time = field(0, "time")?.trim().parse()?;
    KLineUnit::new(
        time,
        parse_price("open", field(1, "open")?)?,
        parse_price("high", field(2, "high")?)?,
        parse_price("low", field(3, "low")?)?,
        parse_price("close", field(4, "close")?)?,
        parse_price("volume", field(5, "volume")?)?,
        autofix,
    )
}
