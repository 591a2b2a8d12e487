//! Page modules for route-level screens.
//!
//! Each page owns route-scoped orchestration and delegates shared chrome to
//! `components`.

pub mod login;
pub mod profile;
pub mod section;
