use std::path::Path;

use anyhow::{bail, Context, Result};
use log::error;

use flotation_monitor::{
    AppConfig, Database, LabComparison, PredictionPipeline, PredictionService, SensorReadings,
};

const CONFIG_PATH: &str = "flotation-monitor.json";

/// Headless stand-in for the dashboard's predict button: run one request
/// and print the corrected estimate plus the history size.
///
/// Usage: flotation-monitor [readings.json] [--lab <lab_value> <model_value>]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let (readings, lab) = parse_args()?;

    let config = AppConfig::load(Path::new(CONFIG_PATH))?;
    let db = Database::new(config.db_path.clone())?;

    let service = match PredictionService::load(&config.model_path) {
        Ok(service) => Some(service),
        Err(err) => {
            error!("{err}");
            None
        }
    };

    let pipeline = PredictionPipeline::new(service, db);

    let outcome = pipeline.handle_request(&readings, lab).await?;
    println!("raw prediction : {:.2}% silica", outcome.raw);
    println!("bias correction: {:+.2}", outcome.bias);
    println!("final estimate : {:.2}% silica", outcome.final_value);
    if !outcome.logged {
        println!("warning: this prediction was not logged");
    }

    let history = pipeline.history().await?;
    println!("logged predictions so far: {}", history.len());

    Ok(())
}

fn parse_args() -> Result<(SensorReadings, Option<LabComparison>)> {
    let mut readings = SensorReadings::default();
    let mut lab = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--lab" {
            let lab_value = parse_number(args.next(), "--lab <lab_value>")?;
            let model_value = parse_number(args.next(), "--lab <model_value>")?;
            lab = Some(LabComparison {
                lab_value,
                model_value,
            });
        } else {
            let contents = std::fs::read_to_string(&arg)
                .with_context(|| format!("failed to read readings from {arg}"))?;
            readings = serde_json::from_str(&contents)
                .with_context(|| format!("invalid readings file {arg}"))?;
        }
    }

    Ok((readings, lab))
}

fn parse_number(value: Option<String>, what: &str) -> Result<f64> {
    let Some(value) = value else {
        bail!("missing value for {what}");
    };
    value
        .parse()
        .with_context(|| format!("invalid number '{value}' for {what}"))
}
