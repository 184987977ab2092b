//! Sales-lead records and the in-memory lead book

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const LEADS_JSON: &str = include_str!("../data/leads.json");
const CHATS_JSON: &str = include_str!("../data/chats.json");

/// Pipeline stage of a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Proposal,
    Won,
    Lost,
}

impl LeadStatus {
    /// Lowercase wire name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Contacted => "contacted",
            Self::Qualified => "qualified",
            Self::Proposal => "proposal",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    /// Whether the lead has left the pipeline
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Capitalized for badges: "Qualified"
        let name = self.as_str();
        let mut chars = name.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{}", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}

/// A prospective customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub status: LeadStatus,
    /// Acquisition channel ("Website", "LinkedIn", ...)
    pub source: String,
    /// Estimated deal value in whole dollars
    pub value: u64,
    pub last_contact: NaiveDate,
    pub assigned_agent: String,
    pub created_at: NaiveDate,
}

impl Lead {
    /// Case-insensitive match on name, company or email
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.name, &self.company, &self.email]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    Agent,
    Lead,
}

/// Channel a message went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Email,
    Call,
    Meeting,
}

/// One entry in a lead's conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
}

/// Conversation attached to a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadChatHistory {
    pub lead_id: String,
    pub messages: Vec<ChatMessage>,
}

/// Leads plus their conversations
#[derive(Debug, Clone, Default)]
pub struct LeadBook {
    leads: Vec<Lead>,
    histories: Vec<LeadChatHistory>,
}

impl LeadBook {
    /// Build from explicit records
    pub fn new(leads: Vec<Lead>, histories: Vec<LeadChatHistory>) -> Self {
        Self { leads, histories }
    }

    /// Demo data compiled into the binary
    pub fn embedded() -> Result<Self, serde_json::Error> {
        let leads = serde_json::from_str(LEADS_JSON)?;
        let histories = serde_json::from_str(CHATS_JSON)?;
        Ok(Self::new(leads, histories))
    }

    /// All leads in insertion order
    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    /// Leads matching `term`; a blank term returns everything
    pub fn filter(&self, term: &str) -> Vec<&Lead> {
        let term = term.trim();
        self.leads
            .iter()
            .filter(|lead| term.is_empty() || lead.matches(term))
            .collect()
    }

    /// Look up a lead by id
    pub fn find(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    /// Conversation for a lead, if one was recorded
    pub fn chat_history(&self, lead_id: &str) -> Option<&LeadChatHistory> {
        self.histories.iter().find(|h| h.lead_id == lead_id)
    }

    /// Sum of deal values for leads still in the pipeline
    pub fn open_pipeline_value(&self) -> u64 {
        self.leads
            .iter()
            .filter(|lead| !lead.status.is_closed())
            .map(|lead| lead.value)
            .sum()
    }
}
