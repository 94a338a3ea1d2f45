//! `api3-oracle` CLI entry-point.
//!
//! Available sub-commands:
//! - `invoke`: run one operation over one or more items.
//! - `operations`: print the dispatch table.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

use engine::operations::{self, Fallback, ParamSpec, Placement};
use engine::{Credentials, NodeContext, Parameters, Resource, ResourceDispatcher, DEFAULT_BASE_URL, DEFAULT_NODE_NAME};
use transport::{ReqwestTransport, TransportConfig};

#[derive(Parser)]
#[command(
    name = "api3-oracle",
    about = "Dispatch operations against the API3 oracle-network API",
    version
)]
struct Cli {
    /// API key sent as a bearer token.
    #[arg(long, env = "API3_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    #[arg(long, env = "API3_BASE_URL", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Whole-request timeout; unset means no timeout.
    #[arg(
        long,
        env = "API3_TIMEOUT_SECS",
        global = true,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an operation and print the result items as JSON.
    Invoke {
        /// dApis, airnodes, oevAuctions, daoGovernance or staking.
        #[arg(long)]
        resource: String,

        #[arg(long)]
        operation: String,

        /// Parameter shared by every item. VALUE is passed on as text; the
        /// engine reads it as a number or a JSON document where the
        /// operation expects one.
        #[arg(long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
        params: Vec<(String, Value)>,

        /// JSON array of per-item parameter objects.
        #[arg(long)]
        items: Option<PathBuf>,

        /// Record per-item failures in the output instead of aborting.
        #[arg(long)]
        continue_on_fail: bool,

        #[arg(long, default_value = DEFAULT_NODE_NAME)]
        node_name: String,
    },
    /// List supported operations.
    Operations {
        #[arg(long)]
        resource: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Invoke {
            resource,
            operation,
            params,
            items,
            continue_on_fail,
            node_name,
        } => {
            let api_key = cli
                .api_key
                .context("no API key: pass --api-key or set API3_API_KEY")?;
            let credentials = Credentials::new(api_key, cli.base_url);
            let transport = ReqwestTransport::new(&TransportConfig {
                timeout: cli.timeout_secs.map(Duration::from_secs),
                user_agent: None,
            })?;

            let shared = shared_parameters(params);
            let items = match items {
                Some(path) => load_items(&path)?,
                None => vec![Parameters::new()],
            };
            let items: Vec<Parameters> = items.iter().map(|i| i.merged_over(&shared)).collect();

            info!("invoking {resource}/{operation} against {}", credentials.base_url);
            let ctx = NodeContext::new(node_name).continue_on_fail(continue_on_fail);
            let dispatcher = ResourceDispatcher::new(Arc::new(transport), credentials);
            let results = dispatcher.run(&ctx, &resource, &operation, &items).await?;

            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        Command::Operations { resource } => {
            let resources = match resource {
                Some(name) => vec![name.parse::<Resource>()?],
                None => Resource::ALL.to_vec(),
            };
            for resource in resources {
                for spec in operations::operations(resource) {
                    let params: Vec<String> = spec.params.iter().map(describe_param).collect();
                    println!(
                        "{:<14} {:<20} {:<6} {:<40} {}",
                        resource.as_str(),
                        spec.name,
                        spec.method.as_str(),
                        spec.path,
                        params.join(" ")
                    );
                }
            }
        }
    }

    Ok(())
}

/// `name=value` → `(name, value)`. The value stays text so amounts keep
/// every digit they were written with.
fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("empty parameter name in '{raw}'"));
    }
    Ok((name.to_string(), Value::String(value.to_string())))
}

fn shared_parameters(params: Vec<(String, Value)>) -> Parameters {
    params
        .into_iter()
        .fold(Parameters::new(), |acc, (name, value)| acc.with(name, value))
}

fn load_items(path: &Path) -> Result<Vec<Parameters>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read items file {}", path.display()))?;
    let items: Vec<Parameters> = serde_json::from_str(&content)
        .with_context(|| format!("{} must hold a JSON array of objects", path.display()))?;
    if items.is_empty() {
        bail!("{} contains no items", path.display());
    }
    Ok(items)
}

/// `query:network?`, `path:dapiId`, `body:duration=3600`, ...
fn describe_param(param: &ParamSpec) -> String {
    let place = match param.placement {
        Placement::Path => "path",
        Placement::Query => "query",
        Placement::Body => "body",
    };
    let mut out = format!("{place}:{}", param.name);
    if param.wire != param.name {
        out.push_str(&format!("->{}", param.wire));
    }
    match param.fallback {
        Some(Fallback::Text(s)) => out.push_str(&format!("={s}")),
        Some(Fallback::Number(n)) => out.push_str(&format!("={n}")),
        Some(Fallback::EmptyObject) => out.push_str("={}"),
        None if !param.required => out.push('?'),
        None => {}
    }
    out
}
