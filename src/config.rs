/*
 *  src/config.rs
 *
 *  strato - always-on clock and three-day forecast panel
 *  (c) 2023-26 the strato authors
 *
 *  Configuration: YAML file layered under CLI overrides
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// "info" | "debug" | any env_logger filter string
    pub log_level: Option<String>,
    /// Footer label, e.g. "Rapid City, South Dakota"
    pub location: Option<String>,
    /// When set, dump each flushed frame to this PPM path
    pub frame_dump: Option<PathBuf>,
    /// Post canned payloads shortly after startup
    pub demo: Option<bool>,
}

impl Config {
    pub fn location_label(&self) -> &str {
        self.location.as_deref().unwrap_or("Rapid City, South Dakota")
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "strato", about = "Always-on clock and three-day forecast panel")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Footer location label
    #[arg(long)]
    pub location: Option<String>,
    /// Dump each flushed frame as PPM to this path
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub frame_dump: Option<PathBuf>,
    /// Post canned weather payloads shortly after startup
    #[arg(long, action = ArgAction::SetTrue)]
    pub demo: bool,
    /// Dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    load_with(cli)
}

fn load_with(cli: Cli) -> Result<Config, ConfigError> {
    // 1) defaults
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/strato/config.yaml");
        if p.exists() {
            return Some(p);
        }
        let p = home.join(".config/strato.yaml");
        if p.exists() {
            return Some(p);
        }
    }
    for candidate in &["strato.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}

fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some() {
        dst.log_level = src.log_level;
    }
    if src.location.is_some() {
        dst.location = src.location;
    }
    if src.frame_dump.is_some() {
        dst.frame_dump = src.frame_dump;
    }
    if src.demo.is_some() {
        dst.demo = src.demo;
    }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some() {
        cfg.log_level = cli.log_level.clone();
    }
    if cli.location.is_some() {
        cfg.location = cli.location.clone();
    }
    if cli.frame_dump.is_some() {
        cfg.frame_dump = cli.frame_dump.clone();
    }
    if cli.demo {
        cfg.demo = Some(true);
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(loc) = cfg.location.as_deref() {
        if loc.trim().is_empty() {
            return Err(ConfigError::Validation(
                "location must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_parses_into_config() {
        let cfg: Config = serde_yaml::from_str(
            "log_level: debug\nlocation: Sioux Falls, South Dakota\ndemo: true\n",
        )
        .unwrap();
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.location_label(), "Sioux Falls, South Dakota");
        assert_eq!(cfg.demo, Some(true));
    }

    #[test]
    fn test_merge_prefers_loaded_values() {
        let mut cfg = Config::default();
        merge(
            &mut cfg,
            Config {
                location: Some("Deadwood".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(cfg.location_label(), "Deadwood");
        // untouched fields keep their defaults
        assert!(cfg.log_level.is_none());
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let mut cfg = Config {
            location: Some("Deadwood".to_string()),
            ..Default::default()
        };
        let cli = Cli {
            config: None,
            log_level: Some("debug".to_string()),
            location: Some("Spearfish".to_string()),
            frame_dump: None,
            demo: false,
            dump_config: false,
        };
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.location_label(), "Spearfish");
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_location_is_rejected() {
        let cfg = Config {
            location: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate(&cfg).is_err());
        assert!(validate(&Config::default()).is_ok());
    }
}
