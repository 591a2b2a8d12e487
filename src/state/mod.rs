//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`session`, `site`) so the router, the API client
//! and individual pages can depend on small focused models.

pub mod session;
pub mod site;
