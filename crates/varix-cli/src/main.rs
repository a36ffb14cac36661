mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "varix",
    version,
    about = "Inspect and validate venous reflux study rulesets"
)]
struct Cli {
    /// Seed file with rulesets (defaults to the built-in seed)
    #[arg(short, long, value_name = "FILE", global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the rulesets in the seed
    List,
    /// Show the rules of one ruleset
    Show {
        /// Ruleset name (exact match)
        ruleset: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Validate a seed file
    Validate {
        /// Path to JSON seed file
        file: PathBuf,
    },
    /// Print the seed JSON schema with field descriptions and example
    Schema,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => commands::list::run(cli.seed.as_deref()),
        Commands::Show { ruleset, output } => {
            commands::show::run(cli.seed.as_deref(), &ruleset, &output)
        }
        Commands::Validate { file } => commands::seedfile::validate(&file),
        Commands::Schema => commands::seedfile::schema(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
