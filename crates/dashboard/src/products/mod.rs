//! Product list state and its derived view.
//!
//! - [`ProductListController`] owns the collection and talks to the backend
//! - [`view`] holds the pure filter and sort functions
//! - [`HighlightTracker`] remembers which rows were just created or updated
//! - [`reconcile`] applies acknowledged mutations locally

mod controller;
mod highlights;
pub mod reconcile;
pub mod view;

pub use controller::{ListState, Notice, ProductListController, ProductRow};
pub use highlights::{DEFAULT_HIGHLIGHT_TTL, HighlightKind, HighlightTracker, MAX_HIGHLIGHT_TTL};
pub use reconcile::{Mutation, apply_mutation};
pub use view::{SortKey, filter_and_sort};
