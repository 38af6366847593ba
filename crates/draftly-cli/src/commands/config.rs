//! Config command handlers

use anyhow::{bail, Context, Result};

use draftly_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "base_url": config.base_url,
                    "secret_length": config.secret_length
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  data_dir:      {}", config.data_dir.display());
            println!("  base_url:      {}", config.base_url);
            println!("  secret_length: {}", config.secret_length);
            println!();
            println!("Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "data_dir" => {
            config.data_dir = value.clone().into();
        }
        "base_url" => {
            config.base_url = value.clone();
        }
        "secret_length" => {
            let length: usize = value
                .parse()
                .context("Invalid value for secret_length. Use a positive integer.")?;
            if length == 0 {
                bail!("secret_length must be greater than zero.");
            }
            config.secret_length = length;
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, base_url, secret_length",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    output.success(&format!("Set {} = {}", key, value));

    Ok(())
}
