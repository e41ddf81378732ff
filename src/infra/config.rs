use crate::domain::{DashboardConfig, Prefixes};
use std::path::PathBuf;
use thiserror::Error;

pub const SUBVOLUME_PREFIX_ENV: &str = "SUBVOLUME_PREFIX";
pub const SNAPSHOT_PREFIX_ENV: &str = "SNAPSHOT_PREFIX";
pub const BALANCE_USAGE_ENV: &str = "BALANCE_USAGE";
pub const GRUB_CONFIG_PATH_ENV: &str = "GRUB_CONFIG_PATH";

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("invalid BALANCE_USAGE: {0} (expected an integer 0-100)")]
    InvalidBalanceUsage(String),
}

pub fn resolve_config(root: PathBuf) -> Result<DashboardConfig, ConfigError> {
    resolve_config_with(root, |name| std::env::var(name).ok())
}

/// Builds the config from `lookup`; blank values keep the defaults.
pub fn resolve_config_with(
    root: PathBuf,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<DashboardConfig, ConfigError> {
    let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    let mut config = DashboardConfig::new(root);
    let defaults = Prefixes::default();
    config.prefixes = Prefixes {
        active: non_empty(SUBVOLUME_PREFIX_ENV).unwrap_or(defaults.active),
        snapshot: non_empty(SNAPSHOT_PREFIX_ENV).unwrap_or(defaults.snapshot),
    };

    if let Some(raw) = non_empty(BALANCE_USAGE_ENV) {
        config.balance_usage = raw
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|usage| *usage <= 100)
            .ok_or(ConfigError::InvalidBalanceUsage(raw))?;
    }

    if let Some(path) = non_empty(GRUB_CONFIG_PATH_ENV) {
        config.grub_config_path = PathBuf::from(path);
    }

    Ok(config)
}
