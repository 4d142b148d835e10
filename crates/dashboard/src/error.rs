//! Unified error handling for the dashboard.
//!
//! Every operation returns a [`DashboardError`]; front ends show
//! [`DashboardError::user_message`] and never the internal details.

use core::fmt;

use thiserror::Error;

use crate::api::ApiError;
use crate::form::ValidationError;

/// Backend operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadProducts,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoadProducts => "load products",
            Self::CreateProduct => "create product",
            Self::UpdateProduct => "update product",
            Self::DeleteProduct => "delete product",
        })
    }
}

/// Library-level error type.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Input failed client-side validation; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Login was rejected or could not be completed.
    #[error("Authentication failed: {0}")]
    Auth(#[source] ApiError),

    /// A product call failed.
    #[error("Failed to {action}: {source}")]
    Fetch {
        action: Action,
        #[source]
        source: ApiError,
    },

    /// A product operation was attempted without a session.
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl DashboardError {
    pub(crate) const fn fetch(action: Action, source: ApiError) -> Self {
        Self::Fetch { action, source }
    }

    /// Message safe to show to the user.
    ///
    /// Login failures always read "Invalid credentials" so the message does
    /// not reveal which field was wrong.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Auth(_) => "Invalid credentials".to_string(),
            Self::Fetch { action, .. } => format!("Failed to {action}"),
            Self::NotAuthenticated => "Please sign in first".to_string(),
        }
    }
}
