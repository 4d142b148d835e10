//! Request and response bodies for the backend endpoints.
//!
//! Field names follow the backend exactly, including the `product_prize`
//! spelling on create. Update sends both `product_prize` and `product_price`,
//! which is what existing clients send and what the backend accepts.

use product_dashboard_core::{ProductId, UserId};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Color sent on create when the form leaves it blank.
pub const DEFAULT_PRODUCT_COLOR: &str = "Red";

/// Login credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct Credentials {
    /// Account user name
    pub username: String,
    /// Account password
    pub password: SecretString,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
pub(super) struct LoginRequest<'a> {
    pub user_name: &'a str,
    pub password: &'a str,
}

#[derive(Deserialize)]
pub(super) struct LoginResponse {
    #[serde(default)]
    pub data: Option<LoginData>,
}

#[derive(Deserialize)]
pub(super) struct LoginData {
    #[serde(default)]
    pub user_id: Option<UserId>,
}

#[derive(Serialize)]
pub(super) struct ListProductsRequest<'a> {
    pub user_id: &'a UserId,
}

#[derive(Serialize)]
pub(super) struct CreateProductRequest<'a> {
    pub product_name: &'a str,
    pub product_prize: f64,
    pub product_description: &'a str,
    pub product_color: &'a str,
    pub user_id: &'a UserId,
}

#[derive(Deserialize)]
pub(super) struct CreateProductResponse {
    #[serde(default)]
    pub product_id: Option<ProductId>,
}

#[derive(Serialize)]
pub(super) struct UpdateProductRequest<'a> {
    pub product_id: &'a ProductId,
    pub product_name: &'a str,
    pub product_prize: f64,
    pub product_price: f64,
    pub product_description: &'a str,
    pub product_color: &'a str,
}

#[derive(Serialize)]
pub(super) struct DeleteProductRequest<'a> {
    pub product_id: &'a ProductId,
}
