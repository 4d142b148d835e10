//! Product Dashboard Core - Shared types library.
//!
//! This crate provides the domain types used across the dashboard components:
//! - `dashboard` - API client, session store and product controllers
//! - `cli` - Terminal front end
//! - `integration-tests` - Mock backend and end-to-end tests
//!
//! # Architecture
//!
//! Types and pure parsing only. Anything that talks to the backend lives in
//! `product-dashboard`.
//!
//! # Modules
//!
//! - [`types`] - Opaque identifiers, products and price parsing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
