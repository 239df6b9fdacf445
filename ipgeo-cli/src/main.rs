use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

mod commands;
mod error;

#[derive(Parser, Debug)]
#[command(name = "ipgeo", version)]
#[command(about = "IP GeoLocator skill - serve, invoke and look up addresses")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the skill webhook over HTTP
    Serve {
        /// Listen address (overrides IPGEO_BIND_ADDR)
        #[arg(long)]
        bind: Option<SocketAddr>,
        /// City database file (overrides IPGEO_DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
    },
    /// Handle one envelope and print the response
    Invoke {
        /// City database file (overrides IPGEO_DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
        /// Event JSON file, or `-` for stdin
        event: String,
    },
    /// Print what the skill would say for one address
    Lookup {
        /// City database file (overrides IPGEO_DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
        /// Dotted-quad IPv4 address
        address: String,
    },
}

#[tokio::main]
async fn main() {
    // JSON logs on stderr; stdout carries command output.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { bind, database } => commands::serve(bind, database).await,
        Commands::Invoke { database, event } => commands::invoke(&event, database)
            .await
            .map(|response| println!("{response}")),
        Commands::Lookup { database, address } => commands::lookup(&address, database)
            .await
            .map(|text| println!("{text}")),
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
