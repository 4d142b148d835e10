//! Create/edit dialog and login form.
//!
//! Forms hold text exactly as typed. Validation turns that text into the
//! typed values the backend calls take, and nothing reaches the backend
//! until it passes.

use product_dashboard_core::{PriceError, Product, ProductFields, ProductId, parse_price};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::api::{Credentials, ProductApi};
use crate::error::DashboardError;
use crate::products::ProductListController;

/// Client-side validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name required")]
    NameRequired,
    #[error("invalid price")]
    InvalidPrice(#[source] PriceError),
    #[error("Please fill in all fields")]
    MissingCredentials,
}

/// Product form contents as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub price: String,
    pub description: String,
    pub color: String,
}

impl ProductDraft {
    /// Pre-populate from an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone().unwrap_or_default(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            description: product.description.clone().unwrap_or_default(),
            color: product.color.clone().unwrap_or_default(),
        }
    }

    /// Check the draft and produce the fields to send.
    ///
    /// # Errors
    ///
    /// - `ValidationError::NameRequired` if the trimmed name is empty
    /// - `ValidationError::InvalidPrice` if the price is not a finite,
    ///   non-negative number
    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        let price = parse_price(&self.price).map_err(ValidationError::InvalidPrice)?;

        Ok(ProductFields {
            name: name.to_string(),
            price,
            description: self.description.trim().to_string(),
            color: self.color.trim().to_string(),
        })
    }
}

/// Which operation the dialog submits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(ProductId),
}

/// The product create/edit dialog.
#[derive(Debug, Clone, Default)]
pub struct ProductDialog {
    open: bool,
    mode: FormMode,
    draft: ProductDraft,
    error: Option<String>,
}

impl ProductDialog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with an empty draft.
    pub fn open_create(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    /// Open pre-filled with `product`.
    pub fn open_edit(&mut self, product: &Product) {
        *self = Self {
            open: true,
            mode: FormMode::Edit(product.id.clone()),
            draft: ProductDraft::from_product(product),
            error: None,
        };
    }

    /// Close and discard the draft.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub const fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    /// Inline error from the last failed submit.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate the draft and send it through `controller`.
    ///
    /// On success the dialog closes and its draft is cleared. On failure it
    /// stays open with [`Self::error`] set; validation failures send nothing.
    ///
    /// # Errors
    ///
    /// - `DashboardError::Validation` if the draft is incomplete
    /// - any error from [`ProductListController::create`] or
    ///   [`ProductListController::update`]
    #[instrument(skip_all, fields(mode = ?self.mode))]
    pub async fn submit<A: ProductApi>(
        &mut self,
        controller: &mut ProductListController<A>,
    ) -> Result<ProductId, DashboardError> {
        let result = match self.draft.validate() {
            Ok(fields) => match &self.mode {
                FormMode::Create => controller.create(fields).await,
                FormMode::Edit(id) => controller
                    .update(id.clone(), fields)
                    .await
                    .map(|()| id.clone()),
            },
            Err(e) => {
                debug!(error = %e, "Product form rejected");
                Err(e.into())
            }
        };

        match result {
            Ok(id) => {
                self.cancel();
                Ok(id)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

/// Login form contents.
#[derive(Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginForm {
    /// Both fields must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingCredentials` if either field is empty.
    pub fn validate(&self) -> Result<Credentials, ValidationError> {
        let username = self.username.trim();
        if username.is_empty() || self.password.expose_secret().is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(Credentials {
            username: username.to_string(),
            password: self.password.clone(),
        })
    }
}

impl From<Credentials> for LoginForm {
    fn from(credentials: Credentials) -> Self {
        Self {
            username: credentials.username,
            password: credentials.password,
        }
    }
}
