//! patient-card-router command line.
//!
//! Resolves paths against the patient card route table (or one loaded from
//! a TOML file), lists routes and builds URLs for named routes. `watch`
//! keeps a live table, reloading the config file whenever it changes, and
//! resolves paths read line by line from stdin.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use patient_card_router::config::{load_config, ConfigWatcher, RouterConfig};
use patient_card_router::navigation::Navigator;
use patient_card_router::observability;
use patient_card_router::routing::{RouteMatch, RouteTable, SharedRouteTable};
use patient_card_router::views::FsViewLoader;

#[derive(Parser)]
#[command(name = "patient-card-router")]
#[command(about = "Route resolver for the FHIR patient card application", long_about = None)]
struct Cli {
    /// Route configuration file (TOML); the built-in table is used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve paths and print the matches as JSON
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// List every route with its full pattern and view module
    Routes,
    /// Print the URL of a named route
    Href {
        name: String,
        /// Parameters as KEY=VALUE
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Resolve paths read from stdin against the live table
    Watch {
        /// Also load the matched view units from disk
        #[arg(long)]
        load: bool,
    },
}

#[derive(Serialize)]
struct RouteRow<'a> {
    name: &'a str,
    pattern: &'a str,
    module: String,
}

#[derive(Serialize)]
struct WatchLine<'a> {
    #[serde(flatten)]
    route: &'a RouteMatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<String>>,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    observability::init(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?cli.config,
        case_sensitive = config.matching.case_sensitive,
        "patient-card-router starting"
    );

    let table = RouteTable::from_config(&config)?;

    match cli.command {
        Commands::Resolve { paths } => {
            for path in paths {
                println!("{}", serde_json::to_string_pretty(&table.resolve(&path))?);
            }
        }
        Commands::Routes => {
            let rows: Vec<RouteRow> = table
                .routes()
                .iter()
                .map(|r| RouteRow {
                    name: &r.name,
                    pattern: &r.pattern,
                    module: r.view.module_specifier(&config.views),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Commands::Href { name, params } => {
            let params: BTreeMap<String, String> = params.into_iter().collect();
            println!("{}", table.href(&name, &params)?);
        }
        Commands::Watch { load } => {
            watch(cli.config.as_deref(), table, &config, load).await?;
        }
    }

    Ok(())
}

async fn watch(
    path: Option<&Path>,
    table: RouteTable,
    config: &RouterConfig,
    load: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedRouteTable::new(table);

    // Kept alive for the whole session; dropping it stops the watch.
    let _watcher = match path {
        Some(path) => Some(ConfigWatcher::new(path, shared.clone()).run()?),
        None => {
            tracing::warn!("No config file given, the built-in table will not reload");
            None
        }
    };

    let navigator = Navigator::new(shared, FsViewLoader::new(config.views.clone()));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        let requested = line.trim();
        if requested.is_empty() {
            continue;
        }

        let output = if load {
            match navigator.navigate(requested).await {
                Ok(navigation) => {
                    let modules = navigation.views.iter().map(|v| v.module.clone()).collect();
                    serde_json::to_string(&WatchLine {
                        route: &navigation.route,
                        modules: Some(modules),
                    })?
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    continue;
                }
            }
        } else {
            let route = navigator.resolve(requested);
            serde_json::to_string(&WatchLine {
                route: &route,
                modules: None,
            })?
        };
        println!("{}", output);
    }

    Ok(())
}
