//! Resolve command
//!
//! Usage: relmap resolve <DOMAIN> [--key <KEY>] [--lob] [--nationalized]
//! [--precision <P>] [--settings <FILE>]

use clap::Args;
use std::path::PathBuf;

use relmap_core::{
    resolve_attribute_type, AttributeTypeRequest, BasicType, DomainTypeId, ResolutionIndicators,
    TemporalPrecision,
};

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Domain type, by class name (`Vec<char>`) or variant name (`CharArray`)
    pub domain: String,

    /// Explicit registration key
    #[arg(short, long)]
    pub key: Option<String>,

    /// Mark the attribute as a LOB
    #[arg(long)]
    pub lob: bool,

    /// Mark the attribute as nationalized character data
    #[arg(long)]
    pub nationalized: bool,

    /// Temporal precision: DATE, TIME or TIMESTAMP
    #[arg(short, long)]
    pub precision: Option<String>,

    /// Attribute name used in log output
    #[arg(long, default_value = "attribute")]
    pub attribute: String,

    /// Settings file (TOML); built-in defaults when omitted
    #[arg(short, long)]
    pub settings: Option<PathBuf>,
}

/// Execute resolve command
pub fn execute(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let domain: DomainTypeId = args.domain.parse()?;
    let mut indicators = ResolutionIndicators::new()
        .with_lob(args.lob)
        .with_nationalized(args.nationalized);
    if let Some(precision) = &args.precision {
        indicators = indicators.with_temporal_precision(precision.parse::<TemporalPrecision>()?);
    }

    let mut request = AttributeTypeRequest::new(args.attribute, domain).with_indicators(indicators);
    if let Some(key) = args.key {
        request = request.with_key(key);
    }

    let config = super::bootstrap(args.settings.as_deref())?;
    let resolved = resolve_attribute_type(&config, &request)?;

    println!("type: {}", resolved.display_name());
    println!("domain: {}", resolved.domain_type().class_name());
    println!("sql: {}", resolved.sql_type());

    Ok(())
}
