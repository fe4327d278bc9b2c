mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "labpack",
    version,
    about = "Hazardous waste classification and lab-pack compatibility tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify materials from a JSON file (one material or an array)
    Classify {
        /// Path to material JSON file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Classification database file; created on first use
        #[arg(long, value_name = "FILE")]
        db: Option<PathBuf>,

        /// Skip the classification database even when --db is given
        #[arg(long)]
        no_cache: bool,
    },
    /// Check lab-pack compatibility across materials in a JSON file
    Compat {
        /// Path to material JSON file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Learning store file; user resolutions are recorded into it
        #[arg(long, value_name = "FILE")]
        learn: Option<PathBuf>,

        /// Resolve an ambiguous material: NAME=TYPE (e.g. "My Spray=aerosol")
        #[arg(long = "resolve", value_name = "NAME=TYPE")]
        resolve: Vec<String>,
    },
    /// Inspect the embedded regulatory tables
    Codes {
        #[command(subcommand)]
        action: CodesAction,
    },
}

#[derive(Subcommand)]
enum CodesAction {
    /// List all embedded P, U, and D codes
    List,
    /// Look up one CAS number across all tables
    Lookup {
        /// CAS number (prefixes like "CAS No." are tolerated)
        cas: String,
    },
    /// List the form-code rule catalog
    Forms,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify {
            input_file,
            output,
            db,
            no_cache,
        } => commands::classify::run(input_file, &output, db, no_cache),
        Commands::Compat {
            input_file,
            output,
            learn,
            resolve,
        } => commands::compat::run(input_file, &output, learn, resolve),
        Commands::Codes { action } => match action {
            CodesAction::List => commands::codes::list(),
            CodesAction::Lookup { cas } => commands::codes::lookup(&cas),
            CodesAction::Forms => commands::codes::forms(),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
