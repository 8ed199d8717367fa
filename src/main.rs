use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info, warn};
use nsfg_reader::{SurveyConfig, validate_pregnum_from_config};

const CONFIG_FILE: &str = "nsfg.json";
const MISMATCHES_SHOWN: usize = 10;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        info!("Loading configuration from {}", config_path.display());
        SurveyConfig::from_json_file(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?
    } else {
        SurveyConfig::default()
    };
    debug!("Using configuration: {config:?}");

    let start = Instant::now();
    let validation = validate_pregnum_from_config(&config)
        .context("Failed to validate respondent pregnancy counts")?;
    info!("Validation finished in {:?}", start.elapsed());

    for mismatch in validation.mismatches.iter().take(MISMATCHES_SHOWN) {
        warn!(
            "caseid {}: stated {:?}, found {} pregnancy records",
            mismatch.caseid, mismatch.stated, mismatch.actual
        );
    }
    if validation.mismatches.len() > MISMATCHES_SHOWN {
        warn!(
            "{} more mismatches not shown",
            validation.mismatches.len() - MISMATCHES_SHOWN
        );
    }
    debug!(
        "Mismatches: {}",
        serde_json::to_string(&validation.mismatches)?
    );

    println!("{}", validation.report());
    Ok(())
}
