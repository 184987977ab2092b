//! Lead table with client-side filtering

use anyhow::{Context, Result};
use cli_lib::util;
use owo_colors::OwoColorize;
use sc_core::{Lead, LeadBook, LeadStatus};

pub async fn run(search: Option<String>) -> Result<()> {
    let book = LeadBook::embedded().context("Failed to load lead data")?;
    let term = search.unwrap_or_default();
    let leads = book.filter(&term);

    println!("{}", "Leads".bold());
    println!("{}", "Manage your sales leads and track conversations".dimmed());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if leads.is_empty() {
        println!("{}", "No leads found matching your search.".dimmed());
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<22} {:<11} {:>9}  {:<10} {:<16} {}",
        "ID".dimmed(),
        "Name".dimmed(),
        "Company".dimmed(),
        "Status".dimmed(),
        "Value".dimmed(),
        "Source".dimmed(),
        "Agent".dimmed(),
        "Last Contact".dimmed()
    );
    for lead in &leads {
        print_row(lead);
    }

    println!();
    println!(
        "{} of {} leads · open pipeline {}",
        leads.len(),
        book.leads().len(),
        util::format_currency(book.open_pipeline_value()).green()
    );
    Ok(())
}

fn print_row(lead: &Lead) {
    println!(
        "  {:<3} {:<20} {:<22} {} {:>9}  {:<10} {:<16} {}",
        lead.id.yellow(),
        util::truncate(&lead.name, 20),
        util::truncate(&lead.company, 22),
        status_badge(lead.status, 11),
        util::format_currency(lead.value),
        lead.source,
        util::truncate(&lead.assigned_agent, 16),
        util::format_date(lead.last_contact).dimmed()
    );
}

/// Status label, colored like the web badges and padded to `width`
pub(crate) fn status_badge(status: LeadStatus, width: usize) -> String {
    let label = format!("{:<width$}", status.to_string(), width = width);
    match status {
        LeadStatus::New => label.blue().to_string(),
        LeadStatus::Contacted => label.yellow().to_string(),
        LeadStatus::Qualified => label.green().to_string(),
        LeadStatus::Proposal => label.purple().to_string(),
        LeadStatus::Won => label.bright_green().to_string(),
        LeadStatus::Lost => label.red().to_string(),
    }
}
