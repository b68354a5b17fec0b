use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lobby_stats::api::state::AppState;
use lobby_stats::calculate::{
    analyze_game_stats, analyze_match_stats, analyze_player_stats, analyze_team, rank_players,
};
use lobby_stats::config::AppConfig;
use lobby_stats::models::{GameStats, MatchStats, PlayerStats, TeamPerformance, TeamRankings};
use lobby_stats::storage::{load_matches, LoadSummary};

#[derive(Parser)]
#[command(name = "lobby-stats")]
#[command(about = "Battle-royale tournament analytics over lobby scoreboards")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./lobby-stats.toml")]
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
    /// Analyze score files and print the reports as JSON
    Analyze {
        /// Report to produce
        #[arg(long, value_enum, default_value = "all")]
        report: ReportKind,

        /// Team to analyze (defaults to the configured team)
        #[arg(long)]
        team: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Score files to read instead of the configured sources
        files: Vec<PathBuf>,
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

    /// List the score files the configured sources resolve to
    Files,

    /// Load and validate the configuration
    CheckConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    All,
    Match,
    Game,
    Team,
    Players,
    Rankings,
}

impl ReportKind {
    fn includes(self, other: ReportKind) -> bool {
        self == ReportKind::All || self == other
    }
}

#[derive(Debug, Serialize)]
struct AnalysisReport {
    team_name: String,
    load: LoadSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    match_stats: Option<MatchStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    game_stats: Option<GameStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    team_performance: Option<TeamPerformance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    player_stats: Option<Vec<PlayerStats>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rankings: Option<TeamRankings>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let mut config = if config_found {
        AppConfig::from_file(&cli.config)?
    } else {
        AppConfig::default()
    };
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }

    // Initialize tracing; stdout is reserved for reports
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting lobby-stats v{}", env!("CARGO_PKG_VERSION"));
    if !config_found {
        tracing::warn!("Config file {:?} not found, using defaults", cli.config);
    }

    match cli.command {
        Commands::Analyze {
            report,
            team,
            pretty,
            files,
        } => {
            let aliases = config.alias_table()?;
            let maps = config.map_names();
            let paths = if files.is_empty() {
                config.score_files()?
            } else {
                files
            };

            let loaded = load_matches(&paths);
            if loaded.matches.is_empty() {
                tracing::warn!("No matches loaded from {} files", paths.len());
            }
            let matches = &loaded.matches;
            let team_name = team.unwrap_or_else(|| config.team_name.clone());

            let output = AnalysisReport {
                match_stats: report
                    .includes(ReportKind::Match)
                    .then(|| analyze_match_stats(matches, &aliases)),
                game_stats: report
                    .includes(ReportKind::Game)
                    .then(|| analyze_game_stats(matches, &maps)),
                team_performance: report
                    .includes(ReportKind::Team)
                    .then(|| analyze_team(matches, &team_name, &maps)),
                player_stats: report
                    .includes(ReportKind::Players)
                    .then(|| analyze_player_stats(matches, &team_name, &aliases)),
                rankings: report
                    .includes(ReportKind::Rankings)
                    .then(|| rank_players(matches, &team_name, &aliases)),
                load: loaded.summary,
                team_name,
            };

            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
        Commands::Serve { host, port } => {
            let aliases = config.alias_table()?;
            let loaded = load_matches(&config.score_files()?);
            tracing::info!(
                "Serving {} matches ({} aliases configured)",
                loaded.matches.len(),
                aliases.len()
            );

            let state = AppState::new(loaded.matches)
                .with_aliases(aliases)
                .with_maps(config.map_names())
                .with_cors_origin(&config.server.cors_origin);
            let app = lobby_stats::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("API: http://{}/api/health", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Files => {
            let paths = config.score_files()?;
            if paths.is_empty() {
                println!("No score files found in {:?}", config.data_dir);
            }
            let mut present = 0;
            for path in &paths {
                let status = if path.exists() {
                    present += 1;
                    "present"
                } else {
                    "missing"
                };
                println!("{:<8} {}", status, path.display());
            }
            println!("\n{} of {} score files present", present, paths.len());
        }
        Commands::CheckConfig => {
            config.validate()?;
            println!("=== Configuration ===");
            println!("Config file:  {:?} ({})", cli.config, if config_found { "loaded" } else { "defaults" });
            println!("Data dir:     {:?}", config.data_dir);
            println!("Team:         {}", config.team_name);
            println!("Pattern:      {}", config.sources.pattern);
            println!("Lobby URLs:   {}", config.sources.lobby_urls.len());
            println!("Aliases:      {}", config.alias_table()?.len());
            println!("Map names:    {}", config.map_names.len());
            println!("Server:       {}:{}", config.server.host, config.server.port);
        }
    }

    Ok(())
}
