//! reqwest-backed implementation of [`ProductApi`].

use product_dashboard_core::{Product, ProductFields, ProductId, RawId, UserId};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use url::Url;

use super::types::{
    CreateProductRequest, CreateProductResponse, Credentials, DEFAULT_PRODUCT_COLOR,
    DeleteProductRequest, ListProductsRequest, LoginRequest, LoginResponse, UpdateProductRequest,
};
use super::{ApiError, ProductApi};

/// HTTP client for the product backend.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    /// Origin without a trailing slash.
    base_url: String,
}

impl HttpProductApi {
    /// Create a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be built.
    pub fn new(base_url: &Url) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Backend origin requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a JSON `POST` and fail on any non-success status.
    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<Response, ApiError> {
        let response = self.client.post(self.endpoint(path)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, path, "Backend returned error status");
            return Err(ApiError::Status(status));
        }

        Ok(response)
    }
}

impl ProductApi for HttpProductApi {
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    async fn login(&self, credentials: &Credentials) -> Result<UserId, ApiError> {
        let request = LoginRequest {
            user_name: &credentials.username,
            password: credentials.password.expose_secret(),
        };

        let response = match self.post("/v1/login", &request).await {
            Ok(response) => response,
            Err(ApiError::Status(status)) => {
                debug!(%status, "Login rejected");
                return Err(ApiError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        let body = response.bytes().await?;
        let user_id = decode_login(&body)?;
        debug!(%user_id, "Login accepted");
        Ok(user_id)
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn list_products(&self, user_id: &UserId) -> Result<Vec<Product>, ApiError> {
        let response = self
            .post("/list_products", &ListProductsRequest { user_id })
            .await?;
        let body = response.bytes().await?;

        let products = decode_product_list(&body);
        debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    #[instrument(skip(self, fields), fields(user_id = %user_id, name = %fields.name))]
    async fn create_product(
        &self,
        user_id: &UserId,
        fields: &ProductFields,
    ) -> Result<ProductId, ApiError> {
        let response = self
            .post("/create_product", &create_request(user_id, fields))
            .await?;

        let body: CreateProductResponse = response
            .json()
            .await
            .map_err(|_| ApiError::MissingField("product_id"))?;
        let product_id = body.product_id.ok_or(ApiError::MissingField("product_id"))?;

        debug!(%product_id, "Product created");
        Ok(product_id)
    }

    #[instrument(skip(self, fields), fields(product_id = %id))]
    async fn update_product(&self, id: &ProductId, fields: &ProductFields) -> Result<(), ApiError> {
        self.post("/update_product", &update_request(id, fields))
            .await?;
        debug!("Product updated");
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        self.post("/delete_product", &DeleteProductRequest { product_id: id })
            .await?;
        debug!("Product deleted");
        Ok(())
    }
}

/// Build the create body, filling in the backend's defaults for blank fields.
fn create_request<'a>(user_id: &'a UserId, fields: &'a ProductFields) -> CreateProductRequest<'a> {
    let color = if fields.color.is_empty() {
        DEFAULT_PRODUCT_COLOR
    } else {
        &fields.color
    };

    CreateProductRequest {
        product_name: &fields.name,
        product_prize: fields.price,
        product_description: &fields.description,
        product_color: color,
        user_id,
    }
}

fn update_request<'a>(id: &'a ProductId, fields: &'a ProductFields) -> UpdateProductRequest<'a> {
    UpdateProductRequest {
        product_id: id,
        product_name: &fields.name,
        product_prize: fields.price,
        product_price: fields.price,
        product_description: &fields.description,
        product_color: &fields.color,
    }
}

/// Extract `data.user_id` from a login response body.
///
/// A zero or blank id is treated the same as a missing one.
fn decode_login(body: &[u8]) -> Result<UserId, ApiError> {
    serde_json::from_slice::<LoginResponse>(body)
        .ok()
        .and_then(|response| response.data)
        .and_then(|data| data.user_id)
        .filter(|id| match id.as_raw() {
            RawId::Number(n) => *n != 0,
            RawId::Text(s) => !s.trim().is_empty(),
        })
        .ok_or(ApiError::InvalidCredentials)
}

/// Decode a `list_products` body.
///
/// Anything other than `{"products": [...]}` yields an empty list. Entries
/// without a usable identifier are dropped.
fn decode_product_list(body: &[u8]) -> Vec<Product> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "list_products body is not JSON");
            return Vec::new();
        }
    };

    let items = match value {
        Value::Object(mut map) => match map.remove("products") {
            Some(Value::Array(items)) => items,
            other => {
                warn!(products = ?other, "list_products payload has no products array");
                return Vec::new();
            }
        },
        _ => {
            warn!("list_products payload is not an object");
            return Vec::new();
        }
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Product>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable product entry");
                None
            }
        })
        .collect()
}
