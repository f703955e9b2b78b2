//! Canonical logging macros
//!
//! Bootstrap and attribute resolution bracket themselves with these. Field
//! names follow `relmap_core_types::schema`.

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use relmap_core::log_op_start;
/// log_op_start!("bootstrap");
/// log_op_start!(
///     "resolve_attribute_type",
///     attribute = "Document.body",
///     domain_type = "Vec<char>"
/// );
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use relmap_core::log_op_end;
/// log_op_end!(
///     "resolve_attribute_type",
///     duration_ms = 3,
///     resolved_type = "materialized-nclob",
///     type_code = 2011
/// );
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Accepts anything convertible into an `ExError`: pass a `RelmapError`
/// directly, or an `ExError` already stamped with a bootstrap id. The stable
/// code is always recorded; type code, registration key, navigable path and
/// bootstrap id only when the error carries them.
///
/// ```
/// # use relmap_core::{log_op_error, errors::{ExError, RelmapError}};
/// # use relmap_core_types::BootstrapId;
/// log_op_error!(
///     "resolve_attribute_type",
///     RelmapError::UnknownRegistrationKey { key: "money".into() },
///     duration_ms = 0,
///     attribute = "Invoice.total"
/// );
///
/// let stamped = ExError::from(RelmapError::UnknownTypeCode { code: 4242 })
///     .with_bootstrap_id(BootstrapId::new());
/// log_op_error!("bootstrap", stamped, duration_ms = 2);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = relmap_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.type_code = ex_err.type_code(),
            err.registration_key = ex_err.registration_key(),
            err.navigable_path = ex_err.navigable_path(),
            err.bootstrap_id = ex_err.bootstrap_id().map(|id| id.as_str()),
            $($field)*
        );
    }};
}
