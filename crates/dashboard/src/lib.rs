//! Product Dashboard library.
//!
//! Client-side logic of the product admin dashboard: talking to the backend,
//! holding the logged-in identity, and keeping the product table in sync with
//! what the backend says.
//!
//! # Modules
//!
//! - [`api`] - Backend calls behind the [`api::ProductApi`] trait
//! - [`session`] - Session store and the login flow
//! - [`products`] - Product list controller, filter/sort view, highlights
//! - [`form`] - Create/edit dialog and login form validation
//! - [`config`] - Environment-driven configuration
//! - [`error`] - Error taxonomy and user-facing messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod products;
pub mod session;

pub use api::{ApiError, Credentials, HttpProductApi, ProductApi};
pub use config::{ConfigError, DashboardConfig, SyncMode};
pub use error::{Action, DashboardError};
pub use form::{FormMode, LoginForm, ProductDialog, ProductDraft, ValidationError};
pub use products::{
    HighlightKind, HighlightTracker, ListState, Notice, ProductListController, ProductRow, SortKey,
};
pub use session::{Session, SessionStore, authenticate};
