//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! deskgen binary. Every connection flag falls back to an environment
//! variable so a `.env` file is enough to run it.

use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};

const DEFAULT_BASE_URL: &str = "https://mycompany.teamwork.com/desk/api/v2";

/// Generate fixture data against a Desk instance.
#[derive(Parser, Debug)]
#[command(name = "deskgen", about = "Desk fixture generator", version)]
pub struct Cli {
    /// Desk API key.
    #[arg(long, env = "DESK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Desk API base URL.
    #[arg(long, env = "DESK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Resource to interact with, or `all`.
    #[arg(long, env = "DESK_RESOURCE", value_enum, ignore_case = true, default_value = "tickets")]
    pub resource: Resource,

    /// Action to perform.
    #[arg(long, env = "DESK_ACTION", value_enum, ignore_case = true, default_value = "list")]
    pub action: Action,

    /// Number of resources to create.
    #[arg(long, env = "DESK_COUNT", default_value_t = 1)]
    pub count: u32,

    /// Resource ID for get/update actions.
    #[arg(long, default_value_t = 0)]
    pub id: u64,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,

    /// JSON object merged over the generated values for create/update.
    #[arg(long, value_parser = parse_data)]
    pub data: Option<Map<String, Value>>,
}

impl Cli {
    /// How many times to run the action. Only creation repeats.
    pub fn effective_count(&self) -> u32 {
        match self.action {
            Action::Create => self.count,
            _ => 1,
        }
    }

    /// The resources selected, with `all` expanded.
    pub fn resources(&self) -> Vec<Resource> {
        match self.resource {
            Resource::All => Resource::ALL.to_vec(),
            resource => vec![resource],
        }
    }
}

/// Operation applied to each selected resource.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Get,
    List,
    Create,
    Update,
}

/// Resources the generator knows how to fill.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    #[value(name = "businesshours")]
    BusinessHours,
    Companies,
    Customers,
    Files,
    #[value(name = "helpdocarticles")]
    HelpDocArticles,
    #[value(name = "helpdocsites")]
    HelpDocSites,
    Inboxes,
    Priorities,
    Slas,
    Spamlists,
    Statuses,
    Tags,
    Tickets,
    Types,
    Users,
    /// Every resource, prerequisites first.
    All,
}

impl Resource {
    /// What `all` expands to.
    pub const ALL: [Resource; 11] = [
        Resource::BusinessHours,
        Resource::Companies,
        Resource::Customers,
        Resource::Inboxes,
        Resource::Priorities,
        Resource::Slas,
        Resource::Spamlists,
        Resource::Statuses,
        Resource::Tags,
        Resource::Tickets,
        Resource::Types,
    ];

    /// The command-line name, e.g. `businesshours`.
    pub fn name(self) -> String {
        self.to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default()
    }
}

fn parse_data(raw: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".to_string()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}
