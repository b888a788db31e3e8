//! Canonical logging macros

/// Log the start of an operation
///
/// # Example
///
/// ```
/// # use hbc_core::log_op_start;
/// log_op_start!("client_command");
/// log_op_start!("client_command", command = "show");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbc_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbc_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// # Example
///
/// ```
/// # use hbc_core::log_op_end;
/// log_op_end!("client_command", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbc_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::hbc_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// Recoverable errors are logged at `warn`, fatal ones at `error`.
///
/// # Example
///
/// ```
/// # use hbc_core::{log_op_error, errors::HbcError};
/// let err = HbcError::validation("Expected integer value");
/// log_op_error!("client_command", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {
        $crate::log_op_error!($op, $err, duration_ms = $duration,)
    };
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let err: &$crate::errors::HbcError = &$err;
        if err.is_recoverable() {
            tracing::warn!(
                component = module_path!(),
                op = $op,
                event = $crate::hbc_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?err.kind(),
                err_code = err.code(),
                $($field)*
            );
        } else {
            tracing::error!(
                component = module_path!(),
                op = $op,
                event = $crate::hbc_core_types::schema::EVENT_END_ERROR,
                duration_ms = $duration,
                err_kind = ?err.kind(),
                err_code = err.code(),
                $($field)*
            );
        }
    }};
}
