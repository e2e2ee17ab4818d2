//! covid-dash CLI
//!
//! Offline access to the dashboard dataset:
//! - List regions
//! - Summarise the loaded table
//! - Render a selection's charts to the terminal or as JSON
//! - Generate a default config file

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use covid_dash::config::{generate_default_config, Config};
use covid_dash::dashboard::{render_charts, ChartMetric};
use covid_dash::dataset::{CsvLoader, Dataset, Selection, DEFAULT_DATE_FORMAT};

#[derive(Parser)]
#[command(name = "covid-dash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 time-series dashboard tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/covid-dash/config.toml or ./covid-dash.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// CSV dataset, overriding the config
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Dataset(DatasetCommand),

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Commands that read the CSV dataset
#[derive(Subcommand)]
pub enum DatasetCommand {
    /// List the regions in the dataset
    Regions,

    /// Show record count, regions and date span
    Summary,

    /// Render the confirmed, deaths and recovered charts for a selection
    Chart {
        /// Region name, matched exactly
        #[arg(short, long)]
        region: String,
        /// First day (YYYY-MM-DD, default: earliest in dataset)
        #[arg(short, long, value_parser = parse_date)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD, default: latest in dataset)
        #[arg(short, long, value_parser = parse_date)]
        end: Option<NaiveDate>,
        /// Only this chart (confirmed, deaths, recovered)
        #[arg(short, long)]
        metric: Option<ChartMetric>,
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, DEFAULT_DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config { output } => write_default_config(output),
        Commands::Dataset(command) => {
            let mut config = Config::resolve(cli.config.as_deref())?;
            if let Some(data) = cli.data {
                config.data.csv_path = data;
            }

            covid_dash::logging::init(&config.logging);
            run_dataset_command(command, &config)
        }
    }
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("failed to write {:?}", path))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn run_dataset_command(command: DatasetCommand, config: &Config) -> anyhow::Result<()> {
    let (dataset, report) = CsvLoader::from_config(&config.data)
        .load(&config.data.csv_path)
        .with_context(|| format!("failed to load {:?}", config.data.csv_path))?;

    match command {
        DatasetCommand::Regions => {
            for region in dataset.regions() {
                println!("{}", region);
            }
        }

        DatasetCommand::Summary => {
            println!("File:      {}", config.data.csv_path.display());
            println!("Records:   {}", report.rows_loaded);
            if report.rows_skipped > 0 {
                println!("Skipped:   {}", report.rows_skipped);
            }
            println!("Regions:   {}", dataset.regions().len());
            if let Some((first, last)) = dataset.date_bounds() {
                println!("Dates:     {} to {}", first, last);
            }
        }

        DatasetCommand::Chart {
            region,
            start,
            end,
            metric,
            format,
        } => {
            let selection = build_selection(&dataset, region, start, end)?;
            if let Err(issue) = selection.validate(&dataset) {
                eprintln!("warning: {}", issue);
            }

            let charts = render_charts(&dataset, &selection);
            let metrics: Vec<ChartMetric> = match metric {
                Some(metric) => vec![metric],
                None => ChartMetric::all().to_vec(),
            };

            match format.to_lowercase().as_str() {
                "json" => {
                    let figures: Vec<_> = metrics
                        .iter()
                        .map(|metric| {
                            serde_json::json!({
                                "id": metric.element_id(),
                                "figure": charts.get(*metric).to_figure(),
                            })
                        })
                        .collect();
                    let body = serde_json::json!({
                        "selection": selection,
                        "charts": figures,
                    });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                "table" => {
                    println!("{}", selection);
                    print!("{:<12}", "date");
                    for metric in &metrics {
                        print!(" {:>12}", metric.to_string());
                    }
                    println!();
                    for i in 0..charts.points() {
                        print!("{:<12}", charts.confirmed.x[i].to_string());
                        for metric in &metrics {
                            print!(" {:>12}", charts.get(*metric).y[i]);
                        }
                        println!();
                    }
                    println!("({} points)", charts.points());
                }
                other => bail!("unknown format {:?} (expected table or json)", other),
            }
        }
    }

    Ok(())
}

/// Fill omitted dates from the dataset bounds
fn build_selection(
    dataset: &Dataset,
    region: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> anyhow::Result<Selection> {
    let Some((first, last)) = dataset.date_bounds() else {
        bail!("dataset is empty");
    };

    Ok(Selection::new(
        region,
        start.unwrap_or(first),
        end.unwrap_or(last),
    ))
}
