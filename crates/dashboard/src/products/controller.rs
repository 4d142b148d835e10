//! Product list controller.
//!
//! Owns the product collection and keeps it in step with the backend:
//!
//! ```text
//! Idle ──refresh──▶ Loading ──ok──▶ Loaded
//!   ▲                  │
//!   │                  └──err──▶ Error (collection emptied)
//!   └── no session, or session changed mid-fetch (collection cleared)
//! ```
//!
//! Mutations never change the list state directly. On success they record a
//! notice and a highlight, then re-synchronize; on failure they record an
//! error notice and leave the collection as it was.
//!
//! Every operation takes `&mut self`, so mutations issued through one
//! controller run one after another.

use product_dashboard_core::{Product, ProductFields, ProductId};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use super::highlights::{HighlightKind, HighlightTracker};
use super::reconcile::{Mutation, apply_mutation};
use super::view::{SortKey, filter_and_sort};
use crate::api::{ApiError, DEFAULT_PRODUCT_COLOR, ProductApi};
use crate::config::{DashboardConfig, SyncMode};
use crate::error::{Action, DashboardError};
use crate::session::{Session, SessionStore};

/// Load state of the collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The collection mirrors the last successful fetch.
    Loaded,
    /// The last fetch failed; the message is user-facing.
    Error(String),
}

/// Dismissible banner shown above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    /// Banner text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    /// Whether this is an error banner.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// One rendered table row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductRow<'a> {
    pub product: &'a Product,
    pub is_new: bool,
    pub is_updated: bool,
}

/// Controller for the product table.
#[derive(Debug)]
pub struct ProductListController<A> {
    api: A,
    session: SessionStore,
    sync_mode: SyncMode,
    products: Vec<Product>,
    state: ListState,
    filter: String,
    sort: SortKey,
    highlights: HighlightTracker,
    notice: Option<Notice>,
}

impl<A: ProductApi> ProductListController<A> {
    /// Create a controller for the identity held by `session`.
    #[must_use]
    pub fn new(api: A, session: SessionStore, config: &DashboardConfig) -> Self {
        Self {
            api,
            session,
            sync_mode: config.sync_mode,
            products: Vec::new(),
            state: ListState::Idle,
            filter: String::new(),
            sort: SortKey::default(),
            highlights: HighlightTracker::new(config.highlight_ttl),
            notice: None,
        }
    }

    /// The backend client.
    pub const fn api(&self) -> &A {
        &self.api
    }

    /// Current load state.
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// The full, unfiltered collection.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by identifier.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Current filter term.
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Replace the filter term.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    /// Current sort order.
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Replace the sort order.
    pub const fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
    }

    /// Current banner, if any.
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Hide the banner.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Highlight records.
    pub const fn highlights(&self) -> &HighlightTracker {
        &self.highlights
    }

    fn reset(&mut self) {
        self.products.clear();
        self.highlights.clear();
        self.state = ListState::Idle;
    }

    /// Rows to render at `now`: filtered, sorted, with highlight flags.
    pub fn visible_rows(&self, now: Instant) -> Vec<ProductRow<'_>> {
        filter_and_sort(&self.products, &self.filter, self.sort)
            .into_iter()
            .map(|product| ProductRow {
                product,
                is_new: self.highlights.is_new(&product.id, now),
                is_updated: self.highlights.is_updated(&product.id, now),
            })
            .collect()
    }

    /// Fetch the collection for the current session.
    ///
    /// Without a session the collection and highlights are cleared and the
    /// state returns to [`ListState::Idle`]. A result that arrives after the
    /// session changed is discarded the same way. A successful fetch drops
    /// expired highlight records.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Fetch` if the list call fails; the collection
    /// is emptied and the state becomes [`ListState::Error`].
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        let (session, generation) = self.session.snapshot().await;
        let Some(session) = session else {
            debug!("No session, clearing product list");
            self.reset();
            return Ok(());
        };

        self.state = ListState::Loading;
        let result = self.api.list_products(&session.user_id).await;

        if self.session.generation().await != generation {
            debug!("Session changed during fetch, discarding result");
            self.reset();
            return Ok(());
        }

        match result {
            Ok(products) => {
                debug!(count = products.len(), "Product list loaded");
                self.products = products;
                self.state = ListState::Loaded;
                self.highlights.prune(Instant::now());
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load products");
                let err = DashboardError::fetch(Action::LoadProducts, e);
                let message = err.user_message();
                self.products.clear();
                self.state = ListState::Error(message.clone());
                self.notice = Some(Notice::Error(message));
                Err(err)
            }
        }
    }

    /// Create a product and tag it as new.
    ///
    /// A failed re-synchronization afterwards does not undo the create; it
    /// shows up in [`Self::state`] instead.
    ///
    /// # Errors
    ///
    /// - `DashboardError::NotAuthenticated` without a session (nothing sent)
    /// - `DashboardError::Fetch` if the backend call fails
    #[instrument(skip(self, fields), fields(name = %fields.name))]
    pub async fn create(&mut self, fields: ProductFields) -> Result<ProductId, DashboardError> {
        let session = self.require_session().await?;

        let id = match self.api.create_product(&session.user_id, &fields).await {
            Ok(id) => id,
            Err(e) => return Err(self.mutation_failed(Action::CreateProduct, e)),
        };
        info!(product_id = %id, "Product created");

        self.highlights
            .mark(HighlightKind::New, id.clone(), Instant::now());
        self.notice = Some(Notice::Success(format!(
            "{} created successfully!",
            fields.name
        )));

        let mut product = Product::from_fields(id.clone(), &fields);
        if fields.color.is_empty() {
            product.color = Some(DEFAULT_PRODUCT_COLOR.to_string());
        }
        self.resync(Mutation::Created(product)).await;
        Ok(id)
    }

    /// Replace every editable field of product `id` and tag it as updated.
    ///
    /// # Errors
    ///
    /// - `DashboardError::NotAuthenticated` without a session (nothing sent)
    /// - `DashboardError::Fetch` if the backend call fails
    #[instrument(skip(self, fields), fields(product_id = %id))]
    pub async fn update(&mut self, id: ProductId, fields: ProductFields) -> Result<(), DashboardError> {
        self.require_session().await?;

        if let Err(e) = self.api.update_product(&id, &fields).await {
            return Err(self.mutation_failed(Action::UpdateProduct, e));
        }
        info!("Product updated");

        self.highlights
            .mark(HighlightKind::Updated, id.clone(), Instant::now());
        self.notice = Some(Notice::Success(format!(
            "{} updated successfully!",
            fields.name
        )));

        self.resync(Mutation::Updated(Product::from_fields(id, &fields)))
            .await;
        Ok(())
    }

    /// Delete product `id`.
    ///
    /// # Errors
    ///
    /// - `DashboardError::NotAuthenticated` without a session (nothing sent)
    /// - `DashboardError::Fetch` if the backend call fails
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&mut self, id: &ProductId) -> Result<(), DashboardError> {
        self.require_session().await?;

        if let Err(e) = self.api.delete_product(id).await {
            return Err(self.mutation_failed(Action::DeleteProduct, e));
        }
        info!("Product deleted");

        self.highlights.forget(id);
        self.notice = Some(Notice::Success("Product deleted successfully!".to_string()));

        self.resync(Mutation::Deleted(id.clone())).await;
        Ok(())
    }

    async fn require_session(&self) -> Result<Session, DashboardError> {
        self.session.current().await.ok_or_else(|| {
            debug!("Product operation attempted without a session");
            DashboardError::NotAuthenticated
        })
    }

    fn mutation_failed(&mut self, action: Action, source: ApiError) -> DashboardError {
        warn!(error = %source, %action, "Product mutation failed");
        let err = DashboardError::fetch(action, source);
        self.notice = Some(Notice::Error(err.user_message()));
        err
    }

    /// Bring the collection up to date after an acknowledged mutation.
    async fn resync(&mut self, mutation: Mutation) {
        if self.sync_mode == SyncMode::Reconcile && self.state == ListState::Loaded {
            let products = std::mem::take(&mut self.products);
            self.products = apply_mutation(products, mutation);
            return;
        }

        // The error is already recorded in `state` and `notice`.
        let _ = self.refresh().await;
    }
}
