//! # hr-auth
//!
//! Authenticated principal, the declarative role capability table, and
//! decoding of externally issued bearer tokens. The core trusts the
//! authentication provider completely: no credential verification happens
//! here, only claim extraction and role checks.

pub mod capabilities;
pub mod jwt;
pub mod principal;

pub use capabilities::{require, Action};
pub use principal::Principal;
