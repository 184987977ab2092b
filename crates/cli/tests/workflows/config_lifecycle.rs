//! Config file create / set / get

use crate::common::Sandbox;
use crate::showcase;
use anyhow::Result;

#[test]
fn test_path_and_create() -> Result<()> {
    let sandbox = Sandbox::new()?;

    let result = showcase!(sandbox, "config", "--path").assert_success()?;
    assert!(result.contains_stdout("File does not exist"));
    assert!(!sandbox.config_file().exists());

    showcase!(sandbox, "config", "--path", "--create").assert_success()?;
    assert!(sandbox.config_file().exists());
    Ok(())
}

#[test]
fn test_set_then_get() -> Result<()> {
    let sandbox = Sandbox::new()?;

    showcase!(sandbox, "config", "--set", "catalog.per_page", "12").assert_success()?;
    let result = showcase!(sandbox, "config", "--get", "catalog.per_page").assert_success()?;
    assert_eq!(result.stdout.trim(), "12");

    let raw = std::fs::read_to_string(sandbox.config_file())?;
    assert!(raw.contains("per_page = 12"));
    Ok(())
}

#[test]
fn test_out_of_range_value_is_not_saved() -> Result<()> {
    let sandbox = Sandbox::new()?;

    let result = showcase!(sandbox, "config", "--set", "catalog.per_page", "500").assert_failure()?;
    assert!(result.contains_stderr("Invalid configuration value"));
    assert!(!sandbox.config_file().exists());

    showcase!(sandbox, "config", "--set", "nope.key", "1").assert_failure()?;
    Ok(())
}

#[test]
fn test_environment_overrides_auth_url() -> Result<()> {
    let sandbox = Sandbox::new()?;

    showcase!(sandbox, "config", "--set", "auth.supabase_url", "https://file.supabase.co")
        .assert_success()?;
    let result = showcase!(sandbox, "config", "--get", "auth.supabase_url")
        .env("SHOWCASE_SUPABASE_URL", "https://env.supabase.co")
        .assert_success()?;
    assert_eq!(result.stdout.trim(), "https://env.supabase.co");

    // The override is never written back
    let raw = std::fs::read_to_string(sandbox.config_file())?;
    assert!(raw.contains("https://file.supabase.co"));
    Ok(())
}

#[test]
fn test_example_is_printed() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "config", "--example").assert_success()?;
    assert!(result.contains_stdout("[catalog]"));
    assert!(result.contains_stdout("debounce_ms = 300"));
    Ok(())
}
