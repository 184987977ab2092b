//! Configuration management command
//!
//! Provides CLI interface to view and edit the user configuration.

use anyhow::{Context, Result};
use cli_lib::system_config::{self, SystemConfig};
use owo_colors::OwoColorize;

/// Every settable key, in display order
pub const KEYS: &[&str] = &[
    "catalog.base_url",
    "catalog.per_page",
    "catalog.debounce_ms",
    "auth.supabase_url",
    "auth.supabase_pubkey",
    "auth.redirect_url",
];

/// List all configuration values
pub async fn run_list() -> Result<()> {
    let config = system_config::load()?;
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", "Configuration".bold());
    println!("{}: {}\n", "Location".dimmed(), config_path.display().dimmed());

    println!("{}", "[catalog]".yellow());
    println!("  {} = {}", "base_url".cyan(), config.catalog.base_url);
    println!("  {} = {}", "per_page".cyan(), config.catalog.per_page);
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.catalog.debounce_ms,
        format!("({}ms quiet period before a search is sent)", config.catalog.debounce_ms).dimmed()
    );

    println!("\n{}", "[auth]".yellow());
    println!(
        "  {} = {}",
        "supabase_url".cyan(),
        display_or_unset(&config.auth.supabase_url)
    );
    println!(
        "  {} = {}",
        "supabase_pubkey".cyan(),
        if config.auth.supabase_pubkey.is_empty() {
            "(not set)".dimmed().to_string()
        } else {
            mask(&config.auth.supabase_pubkey)
        }
    );
    println!("  {} = {}", "redirect_url".cyan(), config.auth.redirect_url);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  per_page: 1-100");
    println!("  debounce_ms: 0-5000");
    println!(
        "{}",
        format!(
            "  {} and {} override the auth values above",
            system_config::SUPABASE_URL_ENV,
            system_config::SUPABASE_PUBKEY_ENV
        )
        .dimmed()
    );

    Ok(())
}

/// Get a single configuration value
pub async fn run_get(key: &str) -> Result<()> {
    let config = system_config::load()?;
    println!("{}", get_value(&config, key)?);
    Ok(())
}

/// Set a configuration value
pub async fn run_set(key: &str, value: &str) -> Result<()> {
    // Environment overrides are not written back
    let mut config = system_config::load_file()?;
    set_value(&mut config, key, value)?;

    // Validate before saving
    config.validate()
        .context("Invalid configuration value")?;

    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

/// Show the config file path and optionally create it
pub async fn run_path(create: bool) -> Result<()> {
    let config_path = system_config::config_file_path()
        .context("Could not determine config file path")?;

    if create && !config_path.exists() {
        system_config::init_if_missing()?;
        println!("{} Created config file at: {}", "✓".green(), config_path.display());
    } else if config_path.exists() {
        println!("{}", config_path.display());
    } else {
        println!("{}", config_path.display());
        println!("{}", "File does not exist. Use --create to create it.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    let example = system_config::example_config();
    println!("{}", example);
    Ok(())
}

fn unknown_key(key: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Unknown config key: {}. Use 'showcase config --list' to see available keys.",
        key
    )
}

pub(crate) fn get_value(config: &SystemConfig, key: &str) -> Result<String> {
    let value = match key {
        "catalog.base_url" => config.catalog.base_url.clone(),
        "catalog.per_page" => config.catalog.per_page.to_string(),
        "catalog.debounce_ms" => config.catalog.debounce_ms.to_string(),
        "auth.supabase_url" => config.auth.supabase_url.clone(),
        "auth.supabase_pubkey" => config.auth.supabase_pubkey.clone(),
        "auth.redirect_url" => config.auth.redirect_url.clone(),
        _ => return Err(unknown_key(key)),
    };
    Ok(value)
}

pub(crate) fn set_value(config: &mut SystemConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "catalog.base_url" => config.catalog.base_url = value.to_string(),
        "catalog.per_page" => {
            config.catalog.per_page = value.parse()
                .context("Invalid value: must be a positive integer")?;
        }
        "catalog.debounce_ms" => {
            config.catalog.debounce_ms = value.parse()
                .context("Invalid value: must be a non-negative integer")?;
        }
        "auth.supabase_url" => config.auth.supabase_url = value.to_string(),
        "auth.supabase_pubkey" => config.auth.supabase_pubkey = value.to_string(),
        "auth.redirect_url" => config.auth.redirect_url = value.to_string(),
        _ => return Err(unknown_key(key)),
    }
    Ok(())
}

fn display_or_unset(value: &str) -> String {
    if value.is_empty() {
        "(not set)".dimmed().to_string()
    } else {
        value.to_string()
    }
}

/// Show only the first few characters of a key
fn mask(secret: &str) -> String {
    let shown: String = secret.chars().take(6).collect();
    format!("{}…", shown)
}
