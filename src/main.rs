use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use battlefield_squads::api::{build_router, state::AppState};
use battlefield_squads::assignment::{
    auto_assign_teams, balance_teams_by_tier, generate_squad_compositions,
    validate_team_composition, GameMode,
};
use battlefield_squads::config::AppConfig;
use battlefield_squads::models::{Player, RosterEntry, TeamAssignment, TeamId, Tournament};
use battlefield_squads::storage::{
    parse_json_or_jsonl, JsonlStore, PlayerDirectory, StorageConfig,
};

#[derive(Parser)]
#[command(name = "battlefield-squads")]
#[command(about = "Squad and position assignment for Battlefield tournaments")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign players from a JSON or JSONL file to squads and positions
    Assign {
        /// Player records (JSON array or JSON Lines)
        #[arg(long)]
        input: PathBuf,

        /// Write assignments here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Skip the tier standings pass
        #[arg(long)]
        no_balance: bool,
    },

    /// Validate team assignments from a JSON or JSONL file
    Validate {
        /// Team assignments (JSON array or JSON Lines)
        #[arg(long)]
        input: PathBuf,
    },

    /// Register a tournament and load its roster into the data directory
    Import {
        /// Tournament id
        #[arg(long)]
        tournament: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,

        /// Roster entries (JSON array or JSON Lines)
        #[arg(long)]
        roster: PathBuf,

        /// Confirmed team ids, comma separated (defaults to every roster team)
        #[arg(long, value_delimiter = ',')]
        confirm: Vec<String>,

        /// Game mode: 16v16, 32v32 or 64v64
        #[arg(long)]
        mode: Option<String>,

        /// Mark the tournament as started, freezing assignments
        #[arg(long)]
        started: bool,
    },

    /// Print the recommended squad template for a game mode
    Template {
        /// Game mode: 16v16, 32v32 or 64v64
        #[arg(long)]
        mode: Option<String>,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn read_input<T: serde::de::DeserializeOwned>(path: &PathBuf) -> Result<Vec<T>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_json_or_jsonl(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);

    tracing::info!("Starting battlefield-squads v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Assign {
            input,
            output,
            no_balance,
        } => {
            let players: Vec<Player> = read_input(&input)?;
            tracing::info!("Assigning {} players from {}", players.len(), input.display());

            let mut teams = auto_assign_teams(&players);
            if config.assignment.balance_by_tier && !no_balance {
                teams = balance_teams_by_tier(teams);
            }

            let json = serde_json::to_string_pretty(&teams)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Wrote {} teams to {}", teams.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Validate { input } => {
            let teams: Vec<TeamAssignment> = read_input(&input)?;
            let mut invalid = 0;

            for team in &teams {
                let report = validate_team_composition(team);
                let status = if report.valid { "OK" } else { "ISSUES" };
                println!(
                    "\n=== {} ({}) - {} players: {} ===",
                    team.team_name,
                    team.team_id,
                    team.players.len(),
                    status
                );
                for (issue, suggestion) in report.issues.iter().zip(&report.suggestions) {
                    println!("  - {}", issue);
                    println!("    -> {}", suggestion);
                }
                if !report.valid {
                    invalid += 1;
                }
            }

            println!("\n{} of {} teams valid", teams.len() - invalid, teams.len());
        }
        Commands::Import {
            tournament,
            name,
            roster,
            confirm,
            mode,
            started,
        } => {
            let entries: Vec<RosterEntry> = read_input(&roster)?;

            let display_name = name.as_deref().unwrap_or(&tournament);
            let mut record = Tournament::new(tournament.as_str(), display_name);
            record.mode = mode.map(|m| m.parse::<GameMode>()).transpose()?;
            record.is_started = started;
            record.confirmed_team_ids = confirm.into_iter().map(TeamId::from).collect();

            let store = JsonlStore::new(StorageConfig::new(config.data_dir.clone()));
            let written = store
                .import_roster(record, &entries)
                .with_context(|| format!("Failed to import roster for {}", tournament))?;

            let confirmed = store
                .tournament(&tournament)?
                .map(|t| t.confirmed_team_ids.len())
                .unwrap_or(0);
            println!(
                "Imported {} roster entries for {} ({} confirmed teams)",
                written, tournament, confirmed
            );
        }
        Commands::Template { mode } => {
            let mode: GameMode = match mode {
                Some(m) => m.parse()?,
                None => config.assignment.game_mode()?,
            };
            let composition = generate_squad_compositions(mode);
            println!("{}", serde_json::to_string_pretty(&composition)?);
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let store = Arc::new(JsonlStore::new(StorageConfig::new(config.data_dir.clone())));
            let state = AppState::new(
                store.clone(),
                store,
                config.assignment.balance_by_tier,
                config.server.cors_origin.clone(),
            );
            let app = build_router(state);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
