//! Canonical schema constants for structured logging and events
//!
//! The emitting macros write `op` and `event` as identifiers; the test
//! capture layer reads them back through these keys.

pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
