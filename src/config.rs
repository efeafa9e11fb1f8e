use std::{fs, path::Path};

use anyhow::Context;
use machine_learning::config::TrainingConfig;

/// Loads a [`TrainingConfig`] from a JSON file.
///
/// Missing fields keep their defaults, so `{}` is the default configuration.
///
/// # Errors
/// If the file cannot be read or is not a valid configuration.
pub fn load(path: &Path) -> anyhow::Result<TrainingConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read '{}'", path.display()))?;

    from_json(&content).with_context(|| format!("invalid config in '{}'", path.display()))
}

fn from_json(content: &str) -> anyhow::Result<TrainingConfig> {
    let config: TrainingConfig = serde_json::from_str(content)?;
    config.validate()?;
    Ok(config)
}
