pub mod resolve;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use relmap_core::logging_facility::init;
use relmap_core::{TypeConfiguration, TypeSettings};

/// Load settings (defaults when no file is given), start logging, bootstrap
pub fn bootstrap(settings_path: Option<&Path>) -> relmap_core::Result<Arc<TypeConfiguration>> {
    let settings = match settings_path {
        Some(path) => TypeSettings::from_file(path)?,
        None => TypeSettings::default(),
    };
    init(settings.logging.profile);
    TypeConfiguration::bootstrap(&settings)
}
