//! Lead list and detail

use crate::common::Sandbox;
use crate::showcase;
use anyhow::Result;

#[test]
fn test_lists_all_leads() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "leads").assert_success()?;

    assert_eq!(result.lead_ids(), vec!["1", "2", "3", "4", "5", "6"]);
    assert!(result.contains_stdout("Sarah Johnson"));
    // Won and lost deals are out of the pipeline
    assert!(result.plain_stdout().contains("open pipeline $160,000"));
    Ok(())
}

#[test]
fn test_search_matches_name_company_and_email() -> Result<()> {
    let sandbox = Sandbox::new()?;

    let by_company = showcase!(sandbox, "leads", "--search", "TECH").assert_success()?;
    assert_eq!(by_company.lead_ids(), vec!["1", "6"]);

    let by_email = showcase!(sandbox, "leads", "--search", "innovate.io").assert_success()?;
    assert_eq!(by_email.lead_ids(), vec!["2"]);

    let none = showcase!(sandbox, "leads", "-s", "zzz").assert_success()?;
    assert!(none.lead_ids().is_empty());
    assert!(none.contains_stdout("No leads found matching your search."));
    Ok(())
}

#[test]
fn test_lead_detail_with_history() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "lead", "1").assert_success()?;
    let out = result.plain_stdout();

    assert!(out.contains("Sarah Johnson"));
    assert!(out.contains("Qualified"));
    assert!(out.contains("Conversation History"));
    assert!(out.contains("enterprise software solutions"));
    Ok(())
}

#[test]
fn test_lead_without_history() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "lead", "6").assert_success()?;
    assert!(result.contains_stdout("No conversation history yet."));
    Ok(())
}

#[test]
fn test_unknown_lead_fails() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let result = showcase!(sandbox, "lead", "42").assert_failure()?;
    assert!(result.contains_stderr("Lead not found: 42"));
    Ok(())
}
