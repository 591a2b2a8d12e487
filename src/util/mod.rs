//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns (storage, navigation, document
//! attributes) from state and page logic so the core stays testable natively.

pub mod document;
pub mod navigator;
pub mod storage;
