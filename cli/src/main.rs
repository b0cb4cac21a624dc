//! cfa - settings and database setup for the CFA portfolio analysis project

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use shared::{init_tracing, Settings};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "cfa",
    version,
    about = "Inspect project settings and apply SQL to the analysis database"
)]
struct Cli {
    /// Database URL to use instead of DB_URL
    #[arg(long, global = true)]
    db_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved settings as JSON
    Config,
    /// Print the ticker list, one symbol per line
    Tickers,
    /// Apply SQL files (each in its own transaction), then inline SQL
    Run {
        /// SQL files to apply, in order
        files: Vec<PathBuf>,
        /// Inline SQL to run after the files
        #[arg(long)]
        sql: Option<String>,
    },
    /// Check that the database is reachable
    Ping,
    /// Print build information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = match cli.db_url {
        Some(db_url) => Settings::from_env().with_db_url(db_url),
        None => Settings::from_env(),
    };
    init_tracing(&settings.log_level);

    match cli.command {
        Commands::Config => commands::show_config(&settings),
        Commands::Tickers => {
            commands::show_tickers(&settings);
            Ok(())
        }
        Commands::Run { files, sql } => commands::run(&settings, &files, sql.as_deref()).await,
        Commands::Ping => commands::ping(&settings).await,
        Commands::Version => {
            println!("{}", commands::version_info());
            Ok(())
        }
    }
}
