//! Handler functions for config CLI commands.
//!
//! Implements the `config` subcommands (`path`, `show`, `get`, `set`,
//! `init`) over [`HubSpotConfig`]. Secrets are masked whenever a value is
//! printed.

use std::path::PathBuf;

use hubspot_client::HubSpotConfig;

use crate::cli::ConfigAction;
use crate::error::{Error, Result};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => {
            let config = HubSpotConfig::load(config_path)?;
            print!("{}", cmd_config_show(&config)?);
            Ok(())
        }
        ConfigAction::Get { key } => {
            let config = HubSpotConfig::load(config_path)?;
            println!("{}", cmd_config_get(&config, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match HubSpotConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist; run `hubspot config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Render the effective configuration as TOML with secrets masked.
pub fn cmd_config_show(config: &HubSpotConfig) -> Result<String> {
    Ok(config.redacted().to_toml_string()?)
}

/// Look up one value by key. Secrets come back masked.
pub fn cmd_config_get(config: &HubSpotConfig, key: &str) -> Result<String> {
    check_key(key)?;
    let value =
        toml::Value::try_from(config.redacted()).map_err(|e| Error::config(e.to_string()))?;
    value
        .get(key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' is not set")))
}

/// Set one key in the config file.
///
/// Only [`HubSpotConfig::KEYS`] are accepted, and the result must still
/// load and validate; otherwise the file is left untouched.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    check_key(key)?;
    let path = HubSpotConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `hubspot config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Table = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    doc.insert(key.to_string(), toml::Value::String(value.to_string()));

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    let updated = HubSpotConfig::from_toml_str(&toml_str)
        .map_err(|e| Error::config(format!("Refusing to write invalid config: {e}")))?;
    updated.validate()?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} in {}", path.display());
    Ok(())
}

/// Create a default configuration file.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => HubSpotConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = HubSpotConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn check_key(key: &str) -> Result<()> {
    if HubSpotConfig::KEYS.contains(&key) {
        return Ok(());
    }
    Err(Error::config(format!(
        "Unknown key '{key}'; expected one of: {}",
        HubSpotConfig::KEYS.join(", ")
    )))
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
