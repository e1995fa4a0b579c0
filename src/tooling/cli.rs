//! CLI Tooling
//!
//! Thin host around the resolver and matcher: loads configuration and the two
//! stores, runs one command, and renders its result as text or JSON.

use crate::advisory::{
    advice_scope, filter_to_rig, label_usage, match_advisories, match_by_label, AdvisoryCatalog,
    AdvisoryItem,
};
use crate::agent::{AgentIdentity, TomlAgentStore};
use crate::config::{AdviceConfig, ConfigLoader};
use crate::error::ApiError;
use crate::resolver::{Resolution, SubscriptionResolver};
use crate::types::Label;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Advice CLI - label-based advisory subscriptions
#[derive(Parser, Debug)]
#[command(name = "advice")]
#[command(about = "Resolve agent subscriptions and list the advisories they match")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Agent store file (TOML, overrides stores.agents_file)
    #[arg(long)]
    pub agents: Option<PathBuf>,

    /// Advisory file (JSON array, overrides stores.advisories_file)
    #[arg(long)]
    pub advisories: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show an agent's effective subscription labels
    Resolve {
        /// Agent identity (<rig>/<role>/<name>)
        agent: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List advisories an agent is subscribed to
    List {
        /// Agent identity (<rig>/<role>/<name>)
        #[arg(long = "for")]
        for_agent: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show what an agent subscribed to exactly one label would see
    Preview {
        #[arg(long)]
        label: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the identity an agent with the given role is addressed by
    Id {
        /// Role (polecat, crew, witness, refinery, mayor, deacon)
        #[arg(long)]
        role: String,
        #[arg(long, default_value = "")]
        rig: String,
        #[arg(long, default_value = "")]
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List distinct advisory labels with usage counts
    Labels {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<OutputFormat, ApiError> {
    match format {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(ApiError::InvalidArgument(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

/// Loaded stores plus the resolver built over them
pub struct CliContext {
    resolver: SubscriptionResolver,
    catalog: AdvisoryCatalog,
}

impl CliContext {
    /// Load configuration and apply the CLI's store and logging overrides
    pub fn load_config(cli: &Cli) -> Result<AdviceConfig, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => {
                let cwd = std::env::current_dir().map_err(|e| {
                    ApiError::ConfigError(format!("Failed to read current directory: {}", e))
                })?;
                ConfigLoader::load(&cwd)?
            }
        };

        if let Some(path) = &cli.agents {
            config.stores.agents_file = Some(path.clone());
        }
        if let Some(path) = &cli.advisories {
            config.stores.advisories_file = Some(path.clone());
        }
        if let Some(level) = &cli.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }

    /// Open the configured stores
    pub fn from_config(config: &AdviceConfig) -> Result<Self, ApiError> {
        let options = config.subscriptions.resolver_options()?;
        let agents_path = config.stores.resolve_agents_file()?;
        let advisories_path = config.stores.resolve_advisories_file()?;

        let agents = TomlAgentStore::open_or_empty(&agents_path)?;
        let catalog = AdvisoryCatalog::open_or_empty(&advisories_path)?;
        info!(
            agents = agents.len(),
            advisories = catalog.len(),
            "Opened stores"
        );

        Ok(Self {
            resolver: SubscriptionResolver::with_options(Arc::new(agents), options),
            catalog,
        })
    }

    /// Build a context over already-loaded stores
    pub fn with_stores(resolver: SubscriptionResolver, catalog: AdvisoryCatalog) -> Self {
        Self { resolver, catalog }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Resolve { agent, format } => {
                let format = parse_format(format)?;
                let resolution = self.resolver.resolve_for(&AgentIdentity::new(agent.as_str())?);
                Ok(match format {
                    OutputFormat::Text => format_resolution_text(&resolution),
                    OutputFormat::Json => to_pretty_json(&json!(resolution)),
                })
            }
            Commands::List { for_agent, format } => {
                let format = parse_format(format)?;
                let resolution = self
                    .resolver
                    .resolve_for(&AgentIdentity::new(for_agent.as_str())?);
                let matched = filter_to_rig(
                    match_advisories(&resolution.effective, &self.catalog),
                    resolution.cluster.as_deref(),
                );
                Ok(match format {
                    OutputFormat::Text => format_agent_advice_text(&resolution, &matched),
                    OutputFormat::Json => to_pretty_json(&json!({
                        "agent": resolution.identity,
                        "rig": resolution.cluster,
                        "subscriptions": resolution.effective,
                        "notice": resolution.notice.as_ref().map(|n| n.to_string()),
                        "advice": advice_json(&matched),
                        "total": matched.len(),
                    })),
                })
            }
            Commands::Preview { label, format } => {
                let format = parse_format(format)?;
                let label = Label::new(label.as_str())?;
                let matched = match_by_label(&label, &self.catalog);
                Ok(match format {
                    OutputFormat::Text => format_preview_text(&label, &matched),
                    OutputFormat::Json => to_pretty_json(&json!({
                        "label": label,
                        "advice": advice_json(&matched),
                        "total": matched.len(),
                    })),
                })
            }
            Commands::Id {
                role,
                rig,
                name,
                format,
            } => {
                let format = parse_format(format)?;
                let identity = AgentIdentity::from_role(role, rig, name).ok_or_else(|| {
                    ApiError::InvalidIdentity(format!(
                        "cannot build an identity for role '{}' with rig '{}' and name '{}'",
                        role, rig, name
                    ))
                })?;
                Ok(match format {
                    OutputFormat::Text => identity.to_string(),
                    OutputFormat::Json => to_pretty_json(&json!({ "agent": identity })),
                })
            }
            Commands::Labels { format } => {
                let format = parse_format(format)?;
                let usage = label_usage(&self.catalog);
                Ok(match format {
                    OutputFormat::Text => format_labels_text(&usage),
                    OutputFormat::Json => {
                        let labels: Vec<_> = usage
                            .iter()
                            .map(|(label, count)| json!({ "label": label, "count": count }))
                            .collect();
                        to_pretty_json(&json!({ "labels": labels, "total": usage.len() }))
                    }
                })
            }
        }
    }
}

fn to_pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn advice_json(items: &[&AdvisoryItem]) -> Vec<serde_json::Value> {
    items
        .iter()
        .map(|item| {
            json!({
                "id": item.id,
                "title": item.title,
                "description": item.description,
                "labels": item.labels,
                "scope": advice_scope(&item.labels),
            })
        })
        .collect()
}

fn format_resolution_text(resolution: &Resolution) -> String {
    let mut output = format!("Agent: {}\n", resolution.identity);
    if resolution.effective.is_empty() {
        output.push_str("Subscriptions: (none)\n");
    } else {
        output.push_str("Subscriptions:\n");
        for label in &resolution.effective {
            output.push_str(&format!("  {}\n", label));
        }
    }
    output.push_str(&format!("\nTotal: {} label(s)", resolution.effective.len()));
    if let Some(notice) = &resolution.notice {
        output.push_str(&format!("\n\nNote: {}", notice));
    }
    output
}

fn advice_table(items: &[&AdvisoryItem]) -> String {
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["ID", "Scope", "Title", "Labels"]);
    for item in items {
        let labels: Vec<&str> = item.labels.iter().map(Label::as_str).collect();
        table.add_row(vec![
            item.id.to_string(),
            advice_scope(&item.labels),
            item.title.clone(),
            labels.join(", "),
        ]);
    }
    table.to_string()
}

fn format_agent_advice_text(resolution: &Resolution, matched: &[&AdvisoryItem]) -> String {
    let mut output = if matched.is_empty() {
        format!("No advice for {}.", resolution.identity)
    } else {
        format!(
            "Advice for {}:\n{}\n\nTotal: {} advisory item(s)",
            resolution.identity,
            advice_table(matched),
            matched.len()
        )
    };
    if let Some(notice) = &resolution.notice {
        output.push_str(&format!("\n\nNote: {}", notice));
    }
    output
}

fn format_preview_text(label: &Label, matched: &[&AdvisoryItem]) -> String {
    if matched.is_empty() {
        return format!("No advice labeled {}.", label);
    }
    format!(
        "Advice labeled {}:\n{}\n\nTotal: {} advisory item(s)",
        label,
        advice_table(matched),
        matched.len()
    )
}

fn format_labels_text(usage: &std::collections::BTreeMap<Label, usize>) -> String {
    if usage.is_empty() {
        return "No labels found.".to_string();
    }
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Label", "Advisories"]);
    for (label, count) in usage {
        table.add_row(vec![label.to_string(), count.to_string()]);
    }
    format!("{}\n\nTotal: {} label(s)", table, usage.len())
}
