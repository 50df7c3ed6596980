//! CLI frontend for the campaign tracker.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ct",
    about = "Campaign tracker for cooperative card game sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// JSON catalog of campaigns, heroes, aspects and difficulties
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Require an aspect for every hero
    #[arg(long, global = true)]
    aspects: bool,

    /// Log store operations to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch an interactive tracking session
    Play {
        /// Save file to load at start and use for `save`
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Campaign to select at start
        #[arg(short, long)]
        campaign: Option<String>,

        /// Preferred number of hero slots
        #[arg(long, default_value = "1")]
        slots: usize,
    },

    /// List campaigns, or the scenarios of one campaign
    Catalog {
        /// Campaign to show scenarios for
        campaign: Option<String>,

        /// List heroes instead
        #[arg(long)]
        heroes: bool,
    },

    /// Add a player to a save file
    Player {
        /// Player name
        name: String,

        /// Save file (created if missing)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Record a scenario outcome in a save file
    Record {
        /// Campaign name (case-insensitive)
        campaign: String,

        /// Scenario name (case-insensitive)
        scenario: String,

        /// win or loss
        outcome: String,

        /// Hero as `name[:aspect][=hp]`; repeat for each hero
        #[arg(long = "hero", required = true)]
        heroes: Vec<String>,

        /// Free-text notes
        #[arg(short, long, default_value = "")]
        notes: String,

        /// Date played, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Difficulty tier
        #[arg(long)]
        difficulty: Option<String>,

        /// Modular encounter sets
        #[arg(long)]
        sets: Option<String>,

        /// Villain health remaining (losses only)
        #[arg(long)]
        villain: Option<u32>,

        /// Turns taken
        #[arg(long)]
        turns: Option<u32>,

        /// Threat on the main scheme at the end
        #[arg(long)]
        threat: Option<u32>,

        /// Save file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Add a campaign note or boon to a save file
    Note {
        /// Campaign name (case-insensitive)
        campaign: String,

        /// Note text
        text: String,

        /// Note type: boon, choice, general
        #[arg(short, long)]
        kind: Option<String>,

        /// Date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,

        /// Save file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show the scenario log
    Log {
        /// Only this campaign
        #[arg(short, long)]
        campaign: Option<String>,

        /// Save file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show win rates and most played heroes for a campaign
    Stats {
        /// Campaign name (case-insensitive)
        campaign: String,

        /// Save file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Export a campaign log or the whole save file
    Export {
        /// Output format: markdown, text, json
        format: String,

        /// Campaign to export (markdown/text)
        #[arg(short, long)]
        campaign: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Save file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ct=debug,ct_core=debug" } else { "error" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match commands::config(cli.catalog.as_deref(), cli.aspects) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Play {
            file,
            campaign,
            slots,
        } => commands::play::run(config, file.as_deref(), campaign.as_deref(), slots),
        Commands::Catalog { campaign, heroes } => {
            commands::catalog::run(&config, campaign.as_deref(), heroes)
        }
        Commands::Player { name, file } => commands::player::run(config, &file, &name),
        Commands::Record {
            campaign,
            scenario,
            outcome,
            heroes,
            notes,
            date,
            difficulty,
            sets,
            villain,
            turns,
            threat,
            file,
        } => commands::record::run(
            config,
            &file,
            commands::record::RecordArgs {
                campaign,
                scenario,
                outcome,
                heroes,
                notes,
                date,
                extras: ct_core::OutcomeExtras {
                    difficulty,
                    modular_sets: sets,
                    villain_health_remaining: villain,
                    turns_taken: turns,
                    threat_on_main_scheme: threat,
                },
            },
        ),
        Commands::Note {
            campaign,
            text,
            kind,
            date,
            file,
        } => commands::note::run(
            config,
            &file,
            &campaign,
            &text,
            kind.as_deref(),
            date.as_deref(),
        ),
        Commands::Log { campaign, file } => commands::log::run(config, &file, campaign.as_deref()),
        Commands::Stats { campaign, file } => commands::stats::run(config, &file, &campaign),
        Commands::Export {
            format,
            campaign,
            output,
            file,
        } => commands::export::run(
            config,
            &file,
            &format,
            campaign.as_deref(),
            output.as_deref(),
        ),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
