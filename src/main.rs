//! sunset-clouds CLI: generate a synthetic sunset cloud series and export it.

use clap::Parser;
use std::path::PathBuf;
use sunset_clouds::{
    export_dataset, ClimateSource, GenerationConfig, ObservatoryFeed, SunsetError,
    SunsetGenerator, DEFAULT_SEED,
};

/// Synthetic daily sunset cloud series with correlated weather fields.
#[derive(Parser)]
#[command(name = "sunset-clouds")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First calendar year of the series (from Jan 1).
    #[arg(long, default_value_t = 2000)]
    start_year: i32,

    /// Last calendar year of the series (through Dec 31).
    #[arg(long, default_value_t = 2020)]
    end_year: i32,

    /// Random seed for reproducible generation.
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output directory for the CSV and report.
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// Base name for output files. Defaults to `sunset_clouds_<start>_<end>`.
    #[arg(short, long)]
    name: Option<String>,

    /// Only write the CSV.
    #[arg(long)]
    no_report: bool,
}

#[tokio::main]
async fn main() -> Result<(), SunsetError> {
    // Set RUST_LOG=info (or debug) to see progress
    env_logger::init();

    let cli = Cli::parse();
    let config = GenerationConfig::builder()
        .start_year(cli.start_year)
        .end_year(cli.end_year)
        .seed(cli.seed)
        .build();

    let source = ObservatoryFeed::new();
    let generator = SunsetGenerator::from_source(&source)?;
    let dataset = generator.run(&config)?;

    println!("Sunset cloud series ({})", generator.profile().name());
    println!("{}", dataset.summary());

    let name = cli
        .name
        .unwrap_or_else(|| format!("sunset_clouds_{}_{}", cli.start_year, cli.end_year));
    let description = source.description();
    let report_source = (!cli.no_report).then_some(description.as_str());
    let generated_at = chrono::Local::now().naive_local();

    let paths = export_dataset(
        &dataset,
        &cli.output_dir,
        &name,
        report_source,
        generated_at,
    )
    .await?;

    println!("CSV written to {}", paths.csv.display());
    if let Some(report) = paths.report {
        println!("Report written to {}", report.display());
    }
    Ok(())
}
