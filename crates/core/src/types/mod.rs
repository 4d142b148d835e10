//! Core types for the product dashboard.
//!
//! This module provides type-safe wrappers for the backend's domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{PriceError, parse_price};
pub use product::{Product, ProductFields};
