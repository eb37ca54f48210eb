mod commands;
mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use fairmove_core::GameError;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "fairmove")]
#[command(about = "Provably fair rock-paper-scissors for any odd number of moves")]
#[command(version)]
struct Cli {
    /// Config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one round against the computer
    Play {
        /// Moves in circular order: odd count, at least 3, no duplicates
        moves: Vec<String>,
    },
    /// Show who beats whom for a move list
    Table {
        /// Moves in circular order: odd count, at least 3, no duplicates
        moves: Vec<String>,
    },
    /// Check a revealed HMAC key against the HMAC shown before your move
    Verify {
        /// HMAC printed at the start of the round (hex)
        #[arg(long)]
        hmac: String,
        /// Computer move printed at the end of the round
        #[arg(long = "move")]
        chosen_move: String,
        /// HMAC key printed at the end of the round (prompted if omitted)
        #[arg(long)]
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cli_config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging; stays quiet by default so it never interleaves with the game
    let log_level = if cli.verbose || cli_config.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "fairmove={},fairmove_core={}",
            log_level, log_level
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Play { moves } => match cli_config.game_config(moves) {
            Ok(game) => commands::handle_play_command(game).await,
            Err(e) => Err(e.into()),
        },
        Commands::Table { moves } => match cli_config.game_config(moves) {
            Ok(game) => commands::handle_table_command(game).await,
            Err(e) => Err(e.into()),
        },
        Commands::Verify {
            hmac,
            chosen_move,
            key,
        } => commands::handle_verify_command(&hmac, &chosen_move, key).await,
    };

    if let Err(e) = result {
        match e.downcast_ref::<GameError>() {
            Some(GameError::InvalidMoveSet(msg)) => {
                eprintln!("Error: Provide an odd number of unique moves ({})", msg);
                eprintln!("Example: fairmove play rock paper scissors");
            }
            Some(GameError::Config(msg)) => {
                eprintln!("Error: Invalid configuration: {}", msg);
            }
            _ => {
                eprintln!("Error: {:#}", e);
            }
        }
        std::process::exit(1);
    }

    Ok(())
}
