use std::{
    error::Error as StdError,
    fs::File,
    io,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use anubis_elo::{Backtest, CanonicalNames, WeightMode};
use anubis_elo_research::{
    config::PartialSettings,
    record_csv::read_records,
    report::{write_ratings, write_summary},
};
use clap::Parser as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Replays match records in chronological order and reports how well the
/// ratings predicted each match before updating on it.
#[derive(clap::Parser)]
struct Opt {
    /// Input CSV. Reads stdin if omitted.
    #[clap(long = "in-csv", value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output CSV for the final ratings. Writes stdout if omitted.
    #[clap(long = "out-csv", value_name = "FILE")]
    output: Option<PathBuf>,
    /// TOML file with defaults for the options below.
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Learning rate [default: 24]
    #[clap(long)]
    k: Option<f64>,
    /// Initial rating of new players [default: 1500]
    #[clap(long = "init")]
    init_rating: Option<f64>,
    /// Round margin weighting: none, linear or sqrt [default: linear]
    #[clap(long = "weight")]
    weight_mode: Option<WeightMode>,
    /// Upper bound on the round margin weight [default: 2]
    #[clap(long)]
    weight_cap: Option<f64>,
    /// First match id to replay (inclusive)
    #[clap(long)]
    start_id: Option<i64>,
    /// Last match id to replay (inclusive)
    #[clap(long)]
    end_id: Option<i64>,
    /// Map to rate, compared case-insensitively [default: anubis]
    #[clap(long)]
    map: Option<String>,
    /// Number of top rated players to print after the summary line
    #[clap(long, default_value = "0")]
    top: usize,
    /// Log filter, overriding RUST_LOG
    #[clap(long, value_name = "FILTER")]
    log_level: Option<String>,
}

impl Opt {
    fn overrides(&self) -> PartialSettings {
        PartialSettings {
            k: self.k,
            init_rating: self.init_rating,
            weight_mode: self.weight_mode,
            weight_cap: self.weight_cap,
            start_id: self.start_id,
            end_id: self.end_id,
            map: self.map.clone(),
        }
    }
}

fn init_tracing(log_level: Option<&str>) -> Result<(), Box<dyn StdError>> {
    let filter = match log_level {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<(), Box<dyn StdError>> {
    let opt = Opt::parse();
    init_tracing(opt.log_level.as_deref())?;

    let file_settings = match &opt.config {
        Some(path) => PartialSettings::load(path)?,
        None => PartialSettings::default(),
    };
    let settings = opt.overrides().merge(file_settings).resolve()?;
    info!(
        k = settings.k,
        init_rating = settings.init_rating,
        weight_mode = %settings.weight_mode,
        weight_cap = settings.weight_cap,
        start_id = ?settings.range.start,
        end_id = ?settings.range.end,
        map = %settings.map,
        "starting backtest"
    );

    let outcome = match &opt.input {
        Some(path) => read_records(BufReader::new(File::open(path)?))?,
        None => read_records(io::stdin().lock())?,
    };

    let names = CanonicalNames::build(&outcome.records, &settings.map);
    info!(players = names.len(), "canonicalized player names");

    let report = Backtest::new(settings.rating_system(), &settings.map, settings.range, names)
        .replay(&outcome.records);

    match &opt.output {
        Some(path) => {
            write_ratings(BufWriter::new(File::create(path)?), &report.ratings)?;
            write_summary(io::stdout().lock(), &report, opt.top)?;
            println!("wrote -> {}", path.display());
        }
        None => {
            write_ratings(io::stdout().lock(), &report.ratings)?;
            write_summary(io::stderr().lock(), &report, opt.top)?;
        }
    }

    Ok(())
}
