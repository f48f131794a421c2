//! Laytime Calculation Engine for maritime demurrage and despatch claims
//!
//! This crate computes laytime used from a vessel's Statement-of-Facts events
//! under a set of charter-party terms, and settles the result as demurrage or
//! despatch. The engine is a pure function; configuration, storage and HTTP
//! surfaces are layered around it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
