//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use pda_cfg_core::StateOrder;

use crate::config::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("pda2cfg Configuration");
    println!("{:-<40}", "");

    println!("State Order:     {}", config.state_order);
    println!("Default Format:  {}", config.default_format);

    if let Some(config_path) = config.path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "state-order" | "order" => {
            config.state_order = value
                .parse::<StateOrder>()
                .map_err(anyhow::Error::msg)?;
            println!("Set state-order to: {}", config.state_order);
        }
        "default-format" | "format" => {
            config.default_format = value.parse()?;
            println!("Set default-format to: {}", config.default_format);
        }
        _ => {
            anyhow::bail!(
                "Unknown config key: {}. Valid keys: state-order, default-format",
                key
            );
        }
    }

    config.save()?;
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    let value = match key {
        "state-order" | "order" => config.state_order.to_string(),
        "default-format" | "format" => config.default_format.to_string(),
        _ => {
            anyhow::bail!("Unknown config key: {}", key);
        }
    };

    println!("{}", value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset(config: &mut Config) -> Result<()> {
    config.reset();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
