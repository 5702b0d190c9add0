//! Smart Product Grid Core - Shared types library.
//!
//! This crate provides common types used across the Smart Product Grid
//! components:
//! - `server` - Multi-tenant backend for the Wix marketplace app
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Site ids, plan limits, catalog types, tenant settings, and
//!   OAuth token records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
