//! relmap CLI
//!
//! Inspect the basic type registry and try out attribute type resolution

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "relmap")]
#[command(about = "relmap - basic type registry inspection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List registration keys with their domain and SQL types
    Types(commands::types::TypesArgs),
    /// Resolve the basic type for one attribute
    Resolve(commands::resolve::ResolveArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Types(args) => commands::types::execute(args),
        Commands::Resolve(args) => commands::resolve::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
