//! Shared UI components.

pub mod console_header;
