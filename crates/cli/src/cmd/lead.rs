//! Lead detail with conversation history

use anyhow::{Context, Result};
use cli_lib::util;
use owo_colors::OwoColorize;
use sc_core::lead::{MessageKind, Sender};
use sc_core::{Lead, LeadBook, LeadChatHistory};

pub async fn run(id: &str) -> Result<()> {
    let book = LeadBook::embedded().context("Failed to load lead data")?;
    let lead = book
        .find(id)
        .with_context(|| format!("Lead not found: {}", id))?;

    print_lead(lead);
    println!();
    print_history(lead, book.chat_history(&lead.id));
    Ok(())
}

fn print_lead(lead: &Lead) {
    println!(
        "{}  {}",
        lead.name.bold(),
        super::leads::status_badge(lead.status, 0)
    );
    println!("{}", lead.company.cyan());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Email:          {}", lead.email);
    println!("Phone:          {}", lead.phone);
    println!("Deal value:     {}", util::format_currency(lead.value).green());
    println!("Source:         {}", lead.source);
    println!("Assigned agent: {}", lead.assigned_agent);
    println!("Last contact:   {}", util::format_date(lead.last_contact));
    println!("Created:        {}", util::format_date(lead.created_at));
}

fn print_history(lead: &Lead, history: Option<&LeadChatHistory>) {
    println!("{}", "Conversation History".bold());

    let messages = match history {
        Some(history) if !history.messages.is_empty() => &history.messages,
        _ => {
            println!("  {}", "No conversation history yet.".dimmed());
            return;
        }
    };

    for message in messages {
        let author = match message.sender {
            Sender::Agent => lead.assigned_agent.as_str(),
            Sender::Lead => lead.name.as_str(),
        };
        let kind = match message.kind {
            MessageKind::Text => "text",
            MessageKind::Email => "email",
            MessageKind::Call => "call",
            MessageKind::Meeting => "meeting",
        };
        let header = format!("{} · {}", author, util::format_date_time(message.timestamp));
        match message.sender {
            Sender::Agent => println!("  {} {}", header.cyan(), format!("[{}]", kind).dimmed()),
            Sender::Lead => println!("  {} {}", header.yellow(), format!("[{}]", kind).dimmed()),
        }
        println!("    {}", message.message);
    }
}
