//! Backend API client.
//!
//! # Architecture
//!
//! - Every call is a single `POST` with a JSON body; no retries, no caching
//! - [`ProductApi`] is the seam the controllers depend on
//! - [`HttpProductApi`] is the reqwest-backed implementation
//!
//! No call touches local state. Callers re-synchronize their collection
//! after a mutation.

mod client;
#[cfg(test)]
pub(crate) mod fake;
mod types;

use std::future::Future;

use product_dashboard_core::{Product, ProductFields, ProductId, UserId};
use thiserror::Error;

pub use client::HttpProductApi;
pub use types::{Credentials, DEFAULT_PRODUCT_COLOR};

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the login or did not return a user id.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// A required field was missing from the response body.
    #[error("Response missing field: {0}")]
    MissingField(&'static str),
}

/// Operations the dashboard performs against the backend.
pub trait ProductApi: Send + Sync {
    /// Exchange credentials for the user's identifier.
    fn login(&self, credentials: &Credentials)
    -> impl Future<Output = Result<UserId, ApiError>> + Send;

    /// Fetch every product owned by `user_id`.
    ///
    /// A malformed payload yields an empty list rather than an error.
    fn list_products(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Create a product owned by `user_id`, returning its new identifier.
    fn create_product(
        &self,
        user_id: &UserId,
        fields: &ProductFields,
    ) -> impl Future<Output = Result<ProductId, ApiError>> + Send;

    /// Replace every editable field of product `id`.
    fn update_product(
        &self,
        id: &ProductId,
        fields: &ProductFields,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Delete product `id`.
    fn delete_product(&self, id: &ProductId) -> impl Future<Output = Result<(), ApiError>> + Send;
}
