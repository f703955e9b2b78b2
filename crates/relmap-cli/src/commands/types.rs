//! Types command
//!
//! Usage: relmap types [--settings <FILE>]

use clap::Args;
use std::path::PathBuf;

use relmap_core::BasicType;

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Settings file (TOML); built-in defaults when omitted
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
}

/// Execute types command
pub fn execute(args: TypesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::bootstrap(args.settings.as_deref())?;

    let registrations = config.basic_types().registrations();
    let width = registrations
        .iter()
        .map(|r| r.key.len())
        .max()
        .unwrap_or(0);

    for registration in &registrations {
        let basic_type = &registration.basic_type;
        println!(
            "{:<width$}  {:<24}  {}",
            registration.key,
            basic_type.domain_type().class_name(),
            basic_type.sql_type(),
            width = width
        );
    }
    println!(
        "{} keys, {} types (bootstrap {})",
        registrations.len(),
        config.basic_types().len(),
        config.bootstrap_id()
    );

    Ok(())
}
