use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub mining: RoundParams,
    pub filter: FilterConfig,
}

/// Thresholds and round limit for one bootstrap session.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RoundParams {
    pub word_threshold: f64,
    pub phrase_threshold: f64,
    pub word_min_count: usize,
    pub phrase_min_count: usize,
    pub limit: usize,
}

impl Default for RoundParams {
    fn default() -> Self {
        Self {
            word_threshold: 0.021,
            phrase_threshold: 0.014,
            word_min_count: 20,
            phrase_min_count: 10,
            limit: 3,
        }
    }
}

impl RoundParams {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("word_threshold", self.word_threshold),
            ("phrase_threshold", self.phrase_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::invalid_config(format!("{} must be within [0, 1], got {}", name, value)));
            }
        }
        if self.limit == 0 {
            return Err(Error::invalid_config("limit must be at least one round"));
        }
        Ok(())
    }
}

/// Single-word aligned values to drop, keyed by the language they belong to.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FilterConfig {
    pub excluded_values: BTreeMap<String, BTreeSet<String>>,
}

impl FilterConfig {
    pub fn excluded_for(&self, language: &str) -> BTreeSet<String> {
        self.excluded_values.get(language).cloned().unwrap_or_default()
    }
}

pub fn load_config_from_file(file_path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(file_path).map_err(|e| Error::io(file_path, e))?;
    let config = toml::from_str::<Config>(&contents).map_err(|e| Error::Config {
        path: file_path.to_path_buf(),
        reason: e.to_string(),
    })?;
    config.mining.validate()?;
    Ok(config)
}
