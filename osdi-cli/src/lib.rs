//! Argument model and command execution for the `osdi-exchange` binary.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use osdi_sync::{CancelToken, OsdiClient, OsdiClientConfig, PeopleQuery};
use osdi_types::{CustomFieldEntry, ListFilter, OrganizationFeatures, OsdiCredential};
use serde_json::Value;
use std::{fs, path::PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "osdi-exchange")]
#[command(about = "Browse and import lists from an OSDI server")]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,

    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the OSDI credential comes from.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Base URL of the OSDI API
    #[arg(long, env = "OSDI_API_URL")]
    pub api_url: Option<String>,

    /// OSDI API token
    #[arg(long, env = "OSDI_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Organization features JSON carrying osdiEnabled, osdiApiUrl and
    /// osdiApiToken. Takes precedence over --api-url / --api-token.
    #[arg(long)]
    pub features: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every list on the server as JSON
    Lists {
        /// Only keep lists whose name or summary contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the people on one list as JSON
    People {
        /// Remote list identifier
        #[arg(long)]
        list_id: String,

        /// Stop after this many people
        #[arg(long)]
        limit: Option<usize>,

        /// Extra field for every person, as key=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<CustomFieldEntry>,
    },
}

/// Parses a `key=value` custom field argument.
pub fn parse_field(raw: &str) -> Result<CustomFieldEntry, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok(CustomFieldEntry::new(key, value))
}

impl SourceArgs {
    pub fn credential(&self) -> Result<OsdiCredential> {
        if let Some(path) = &self.features {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read features file {}", path.display()))?;
            let features =
                OrganizationFeatures::parse(&raw).context("Failed to parse organization features")?;
            return features
                .osdi_credential()
                .context("Organization is not configured for OSDI");
        }

        let credential = OsdiCredential::new(
            self.api_url.clone().unwrap_or_default(),
            self.api_token.clone().unwrap_or_default(),
        );
        credential
            .validate()
            .context("Provide --api-url and --api-token (or OSDI_API_URL / OSDI_API_TOKEN)")?;
        Ok(credential)
    }
}

/// Runs the selected command and returns its JSON output.
pub async fn run(cli: &Cli, cancel: &CancelToken) -> Result<Value> {
    let credential = cli.source.credential()?;
    let client = OsdiClient::new(OsdiClientConfig {
        request_timeout_secs: cli.timeout,
        ..Default::default()
    })?;

    match &cli.command {
        Command::Lists { search } => {
            let filter = ListFilter {
                search: search.clone(),
            };
            let lists = client
                .fetch_lists_filtered_cancellable(&credential, &filter, cancel)
                .await
                .context("Failed to fetch OSDI lists")?;
            info!("Found {} list(s)", lists.len());
            Ok(serde_json::to_value(lists)?)
        }
        Command::People {
            list_id,
            limit,
            fields,
        } => {
            let query = PeopleQuery {
                limit: *limit,
                extra_fields: fields.clone(),
            };
            let people = client
                .fetch_list_people_cancellable(&credential, list_id, &query, cancel)
                .await
                .with_context(|| format!("Failed to fetch people for list {list_id}"))?;
            info!("Fetched {} people from list {}", people.len(), list_id);
            Ok(serde_json::to_value(people)?)
        }
    }
}
