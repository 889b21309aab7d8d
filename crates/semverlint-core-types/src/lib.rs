//! Core types shared across semverlint facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! facility and by anything that asserts on emitted events:
//!
//! - **Field keys**: component, op, event, duration and domain counters
//! - **Event names**: start / end / end_error

pub mod schema;
