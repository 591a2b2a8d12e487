//! Networking modules for the console REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `client` authorizes and normalizes every
//! call, `api` binds the endpoints, and `types`/`error` define the wire
//! schema and failure taxonomy.

pub mod api;
pub mod client;
pub mod error;
pub mod transport;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;
