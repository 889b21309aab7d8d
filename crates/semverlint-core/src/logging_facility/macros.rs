//! Operation boundary macros.
//!
//! Each emits `component` (the calling module), `op` and an `event` from
//! the canonical schema, followed by any extra `key = value` fields.

/// Log the start of an operation
///
/// ```
/// # use semverlint_core::log_op_start;
/// log_op_start!("diff");
/// log_op_start!("diff", pkg_count = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::semverlint_core_types::schema::EVENT_START,
            $($($field)*)?
        );
    };
}

/// Log the successful end of an operation; `duration_ms` is mandatory.
///
/// ```
/// # use semverlint_core::log_op_end;
/// log_op_end!("diff", duration_ms = 4, change_count = 2);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::semverlint_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)*)?
        );
    };
}

/// Log a failed operation with the error's kind and stable code.
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError).
///
/// ```
/// # use semverlint_core::{log_op_error, errors::SemverLintError};
/// log_op_error!("discover_versions", SemverLintError::MissingHead, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::semverlint_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?ex_err.kind(),
            err_code = ex_err.code(),
            $($($field)*)?
        );
    }};
}
