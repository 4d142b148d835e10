//! Transient "New" / "Updated" row tags.
//!
//! Each tagged identifier carries its own expiry instant, checked whenever
//! the table is rendered. A burst of mutations therefore cannot evict an
//! unrelated tag early, and there are no timers to cancel on teardown.

use std::collections::HashMap;
use std::time::Duration;

use product_dashboard_core::ProductId;
use tokio::time::Instant;

/// How long a tag stays visible unless configured otherwise.
pub const DEFAULT_HIGHLIGHT_TTL: Duration = Duration::from_secs(5);

/// Longest lifetime a tag can have; longer values are clamped to it.
pub const MAX_HIGHLIGHT_TTL: Duration = Duration::from_secs(86_400);

/// Which tag a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    /// Created in this session.
    New,
    /// Edited in this session.
    Updated,
}

/// Per-identifier expiry records for both tag kinds.
#[derive(Debug, Clone)]
pub struct HighlightTracker {
    ttl: Duration,
    new: HashMap<ProductId, Instant>,
    updated: HashMap<ProductId, Instant>,
}

impl Default for HighlightTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT_TTL)
    }
}

impl HighlightTracker {
    /// Create an empty tracker whose tags live for `ttl`, at most [`MAX_HIGHLIGHT_TTL`].
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl: ttl.min(MAX_HIGHLIGHT_TTL),
            new: HashMap::new(),
            updated: HashMap::new(),
        }
    }

    /// Tag lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    const fn entries(&self, kind: HighlightKind) -> &HashMap<ProductId, Instant> {
        match kind {
            HighlightKind::New => &self.new,
            HighlightKind::Updated => &self.updated,
        }
    }

    /// Tag `id` as of `now`. Re-tagging restarts its lifetime.
    pub fn mark(&mut self, kind: HighlightKind, id: ProductId, now: Instant) {
        let expires_at = now + self.ttl;
        match kind {
            HighlightKind::New => self.new.insert(id, expires_at),
            HighlightKind::Updated => self.updated.insert(id, expires_at),
        };
    }

    /// Whether `id` carries an unexpired `kind` tag at `now`.
    #[must_use]
    pub fn is_active(&self, kind: HighlightKind, id: &ProductId, now: Instant) -> bool {
        self.entries(kind)
            .get(id)
            .is_some_and(|expires_at| now < *expires_at)
    }

    /// Shorthand for [`HighlightKind::New`].
    #[must_use]
    pub fn is_new(&self, id: &ProductId, now: Instant) -> bool {
        self.is_active(HighlightKind::New, id, now)
    }

    /// Shorthand for [`HighlightKind::Updated`].
    #[must_use]
    pub fn is_updated(&self, id: &ProductId, now: Instant) -> bool {
        self.is_active(HighlightKind::Updated, id, now)
    }

    /// Number of unexpired tags of `kind` at `now`.
    #[must_use]
    pub fn active_count(&self, kind: HighlightKind, now: Instant) -> usize {
        self.entries(kind).values().filter(|at| now < **at).count()
    }

    /// Drop every tag that has expired by `now`.
    pub fn prune(&mut self, now: Instant) {
        self.new.retain(|_, expires_at| now < *expires_at);
        self.updated.retain(|_, expires_at| now < *expires_at);
    }

    /// Drop the tags of a product that no longer exists.
    pub fn forget(&mut self, id: &ProductId) {
        self.new.remove(id);
        self.updated.remove(id);
    }

    /// Drop every tag.
    pub fn clear(&mut self) {
        self.new.clear();
        self.updated.clear();
    }

    /// Whether no tags are stored, expired or not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new.is_empty() && self.updated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_tag_visible_until_ttl() {
        let start = Instant::now();
        let mut tracker = HighlightTracker::default();
        let id = ProductId::from(1);

        tracker.mark(HighlightKind::New, id.clone(), start);

        assert!(tracker.is_new(&id, start));
        assert!(tracker.is_new(&id, start + 4 * SECOND));
        assert!(!tracker.is_new(&id, start + 5 * SECOND));
        assert!(!tracker.is_updated(&id, start));
    }

    #[test]
    fn test_burst_does_not_evict_earlier_tags_early() {
        let start = Instant::now();
        let mut tracker = HighlightTracker::default();

        tracker.mark(HighlightKind::New, ProductId::from(1), start);
        tracker.mark(HighlightKind::New, ProductId::from(2), start + 3 * SECOND);
        tracker.mark(HighlightKind::New, ProductId::from(3), start + 4 * SECOND);

        let later = start + 6 * SECOND;
        assert!(!tracker.is_new(&ProductId::from(1), later));
        assert!(tracker.is_new(&ProductId::from(2), later));
        assert!(tracker.is_new(&ProductId::from(3), later));
        assert_eq!(tracker.active_count(HighlightKind::New, later), 2);
    }

    #[test]
    fn test_remark_restarts_lifetime() {
        let start = Instant::now();
        let mut tracker = HighlightTracker::new(2 * SECOND);
        let id = ProductId::from("p");

        tracker.mark(HighlightKind::Updated, id.clone(), start);
        tracker.mark(HighlightKind::Updated, id.clone(), start + SECOND);

        assert!(tracker.is_updated(&id, start + 2 * SECOND));
        assert!(!tracker.is_updated(&id, start + 3 * SECOND));
    }

    #[test]
    fn test_oversized_ttl_is_clamped() {
        let start = Instant::now();
        let mut tracker = HighlightTracker::new(Duration::MAX);
        let id = ProductId::from(1);

        tracker.mark(HighlightKind::New, id.clone(), start);

        assert_eq!(tracker.ttl(), MAX_HIGHLIGHT_TTL);
        assert!(tracker.is_new(&id, start + MAX_HIGHLIGHT_TTL - SECOND));
        assert!(!tracker.is_new(&id, start + MAX_HIGHLIGHT_TTL));
    }

    #[test]
    fn test_kinds_are_independent() {
        let start = Instant::now();
        let mut tracker = HighlightTracker::default();
        let id = ProductId::from(9);

        tracker.mark(HighlightKind::New, id.clone(), start);
        tracker.mark(HighlightKind::Updated, id.clone(), start + 2 * SECOND);

        let at = start + 6 * SECOND;
        assert!(!tracker.is_new(&id, at));
        assert!(tracker.is_updated(&id, at));
    }

    #[test]
    fn test_prune_and_forget() {
        let start = Instant::now();
        let mut tracker = HighlightTracker::default();
        tracker.mark(HighlightKind::New, ProductId::from(1), start);
        tracker.mark(HighlightKind::Updated, ProductId::from(2), start + 3 * SECOND);

        tracker.prune(start + 5 * SECOND);
        assert_eq!(tracker.active_count(HighlightKind::New, start), 0);
        assert!(!tracker.is_empty());

        tracker.forget(&ProductId::from(2));
        assert!(tracker.is_empty());
    }
}
