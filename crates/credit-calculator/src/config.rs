use anyhow::{Context, Result};
use credit_calculator_core::{ChannelFilters, CreditRates, Frequency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "~/.credit-calculator.json";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub credit_rates: CreditRates,
    #[serde(default)]
    pub channel_filters: ChannelFilters,
    /// Send frequency per message type id. Results exports carry no
    /// frequency, so this is where non-monthly cadences live between runs.
    #[serde(default)]
    pub frequencies: BTreeMap<String, Frequency>,
}

pub fn get_config_path(explicit: Option<&str>) -> PathBuf {
    let raw = explicit.unwrap_or(DEFAULT_CONFIG_PATH);
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn load_config(path: &Path) -> Result<CalculatorConfig> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: CalculatorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    } else {
        Ok(CalculatorConfig::default())
    }
}

pub fn save_config(path: &Path, config: &CalculatorConfig) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, CalculatorConfig::default());
        assert_eq!(config.credit_rates, CreditRates::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = CalculatorConfig::default();
        config.credit_rates.sms = 2.5;
        config.channel_filters.push = false;
        config.frequencies.insert(
            "habituation-repeat-visits-Birthday-Message".to_string(),
            Frequency::Quarterly,
        );

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"frequencies": {"x": "bi-weekly"}}"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.channel_filters, ChannelFilters::default());
        assert_eq!(config.frequencies.get("x"), Some(&Frequency::BiWeekly));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_explicit_path_is_kept() {
        assert_eq!(
            get_config_path(Some("/tmp/calc.json")),
            PathBuf::from("/tmp/calc.json")
        );
    }
}
