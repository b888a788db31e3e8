//! Canonical schema constants for structured logging
//!
//! These constants keep field keys and event names identical across crates.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Dispatch identifiers
pub const FIELD_COMMAND: &str = "command";
pub const FIELD_ORIGIN: &str = "origin";
pub const FIELD_PEER: &str = "peer";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

// Operation names
pub const OP_CLIENT_COMMAND: &str = "client_command";
pub const OP_SERVER_COMMAND: &str = "server_command";
pub const OP_DATAGRAM: &str = "datagram";
pub const OP_SAVE_COLLECTION: &str = "save_collection";
pub const OP_LOAD_COLLECTION: &str = "load_collection";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_op_names_are_distinct() {
        assert_ne!(OP_CLIENT_COMMAND, OP_SERVER_COMMAND);
        assert!(!OP_DATAGRAM.is_empty());
    }
}
