//! Group-header tracking across one extraction pass.
//!
//! Replaces the loosely-scoped "current parent item" variable seen in the
//! source variants with an explicit pass-scoped object whose
//! consume-vs-persist behavior is configuration.

use crate::models::config::HeaderPolicy;
use crate::models::item::HeaderLabel;

/// Tracks the active group header as units are processed in order.
#[derive(Debug)]
pub struct HeaderTracker {
    policy: HeaderPolicy,
    active: Option<HeaderLabel>,
}

impl HeaderTracker {
    pub fn new(policy: HeaderPolicy) -> Self {
        Self {
            policy,
            active: None,
        }
    }

    /// A header row replaces the active header.
    pub fn observe_header(&mut self, label: HeaderLabel) {
        self.active = Some(label);
    }

    /// A summary row closes the open group under the consume policy.
    pub fn observe_summary(&mut self) {
        if self.policy == HeaderPolicy::ConsumeAfterDetail {
            self.active = None;
        }
    }

    /// Hand the active header to a detail row at `pos`.
    ///
    /// Only a header whose position precedes the detail associates. Under
    /// `ConsumeAfterDetail` the header is given out exactly once.
    pub fn take_for(&mut self, pos: usize) -> Option<HeaderLabel> {
        match &self.active {
            Some(label) if label.pos < pos => match self.policy {
                HeaderPolicy::ConsumeAfterDetail => self.active.take(),
                HeaderPolicy::PersistUntilNext => self.active.clone(),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn label(name: &str, pos: usize) -> HeaderLabel {
        HeaderLabel {
            name: name.to_string(),
            pos,
        }
    }

    #[test]
    fn test_consume_policy_hands_out_header_once() {
        let mut tracker = HeaderTracker::new(HeaderPolicy::ConsumeAfterDetail);
        tracker.observe_header(label("部材", 0));

        assert_eq!(tracker.take_for(1), Some(label("部材", 0)));
        assert_eq!(tracker.take_for(2), None);
    }

    #[test]
    fn test_persist_policy_keeps_header_until_superseded() {
        let mut tracker = HeaderTracker::new(HeaderPolicy::PersistUntilNext);
        tracker.observe_header(label("部材", 0));

        assert_eq!(tracker.take_for(1), Some(label("部材", 0)));
        assert_eq!(tracker.take_for(2), Some(label("部材", 0)));

        tracker.observe_header(label("送料", 3));
        assert_eq!(tracker.take_for(4), Some(label("送料", 3)));
    }

    #[test]
    fn test_header_never_associates_backwards() {
        let mut tracker = HeaderTracker::new(HeaderPolicy::PersistUntilNext);
        tracker.observe_header(label("部材", 5));

        assert_eq!(tracker.take_for(5), None);
        assert_eq!(tracker.take_for(3), None);
        assert_eq!(tracker.take_for(6), Some(label("部材", 5)));
    }

    #[test]
    fn test_summary_closes_group_under_consume_policy() {
        let mut tracker = HeaderTracker::new(HeaderPolicy::ConsumeAfterDetail);
        tracker.observe_header(label("部材", 0));
        tracker.observe_summary();
        assert_eq!(tracker.take_for(2), None);

        let mut tracker = HeaderTracker::new(HeaderPolicy::PersistUntilNext);
        tracker.observe_header(label("部材", 0));
        tracker.observe_summary();
        assert_eq!(tracker.take_for(2), Some(label("部材", 0)));
    }
}
