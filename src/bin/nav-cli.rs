use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::{Parser, Subcommand};

use soil_moisture_nav::config::{load_config, NavConfig};
use soil_moisture_nav::http::response::navigation_body;
use soil_moisture_nav::lifecycle::build_router;
use soil_moisture_nav::observability::logging;
use soil_moisture_nav::routing::{Navigation, Route, Router};

#[derive(Parser)]
#[command(name = "nav-cli")]
#[command(about = "Inspect the soil moisture navigation table offline", long_about = None)]
struct Cli {
    /// TOML configuration file providing routing options.
    #[arg(short, long, env = "NAV_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a location and print the navigation outcome
    Resolve {
        /// Path-form location or absolute URL
        location: String,
    },
    /// List the route table
    Routes,
    /// Build a link to a named route
    Href {
        /// Route name, e.g. `edit-request`
        route: String,
        /// Path parameter as `name=value`; repeatable
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Quiet unless a config file asks for more; stdout carries the output.
    let config = match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            logging::init_cli_logging(&config.observability.log_level);
            config
        }
        None => {
            logging::init_cli_logging("warn");
            NavConfig::default()
        }
    };

    let router = build_router(&config)?;

    let mut stdout = io::stdout().lock();
    if execute(&router, cli.command, &mut stdout)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Run one subcommand. Returns `false` when the command should exit 1.
fn execute(
    router: &Router,
    command: Commands,
    out: &mut impl Write,
) -> Result<bool, Box<dyn std::error::Error>> {
    match command {
        Commands::Resolve { location } => {
            let navigation = router.navigate(&location);
            writeln!(out, "{}", serde_json::to_string_pretty(&navigation_body(&navigation))?)?;
            if let Navigation::NotFound(cause) = &navigation {
                tracing::debug!(location = %location, cause = %cause, "Unresolved");
                return Ok(false);
            }
        }
        Commands::Routes => {
            let routes: Vec<_> = router.routes().map(Route::summary).collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&routes)?)?;
        }
        Commands::Href { route, params } => {
            let params: BTreeMap<_, _> = params.into_iter().collect();
            match router.href(&route, &params) {
                Ok(link) => writeln!(out, "{link}")?,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return Ok(false);
                }
            }
        }
    }

    Ok(true)
}
