// src/engine/watcher.rs
//! Debounced reaction to nodes added to the page

use std::time::{Duration, Instant};
use tracing::debug;

use crate::dom::{NodeHandle, PageDom};

/// Watches added nodes and schedules a selector-binding refresh once new
/// form structure has settled. It never fills anything itself.
#[derive(Debug, Clone)]
pub struct DomWatcher {
    debounce: Duration,
    refresh_due: Option<Instant>,
}

impl DomWatcher {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            refresh_due: None,
        }
    }

    /// Record a batch of added nodes. Returns whether a refresh got scheduled.
    ///
    /// Our own injected UI can trip this too; that only costs a redundant
    /// refresh.
    pub fn observe<D: PageDom>(&mut self, dom: &D, added: &[NodeHandle], at: Instant) -> bool {
        let has_new_fields = added.iter().any(|node| dom.subtree_has_control(*node));
        if !has_new_fields {
            return false;
        }

        // A later batch pushes the deadline out
        self.refresh_due = Some(at + self.debounce);
        debug!("New form controls observed, binding refresh scheduled");
        true
    }

    /// Consume the scheduled refresh if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.refresh_due {
            Some(due) if due <= now => {
                self.refresh_due = None;
                true
            }
            _ => false,
        }
    }

    pub fn refresh_due(&self) -> Option<Instant> {
        self.refresh_due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{HtmlPage, PageLocation};

    const DEBOUNCE: Duration = Duration::from_millis(500);

    fn page() -> HtmlPage {
        HtmlPage::parse(
            PageLocation::new("jobs.example.com", "/apply"),
            r#"<body><main id="app"></main></body>"#,
        )
    }

    #[test]
    fn test_ignores_nodes_without_controls() {
        let mut page = page();
        let app = page.find("#app").unwrap();
        let added = page.append_html(app, "<p>Welcome</p><div><span>hi</span></div>").unwrap();

        let mut watcher = DomWatcher::new(DEBOUNCE);
        assert!(!watcher.observe(&page, &added, Instant::now()));
        assert_eq!(watcher.refresh_due(), None);
    }

    #[test]
    fn test_schedules_after_debounce() {
        let mut page = page();
        let app = page.find("#app").unwrap();
        let added = page
            .append_html(app, r#"<form><input name="email"></form>"#)
            .unwrap();

        let start = Instant::now();
        let mut watcher = DomWatcher::new(DEBOUNCE);
        assert!(watcher.observe(&page, &added, start));

        assert!(!watcher.take_due(start + Duration::from_millis(499)));
        assert!(watcher.take_due(start + DEBOUNCE));
        assert!(!watcher.take_due(start + DEBOUNCE * 2));
    }

    #[test]
    fn test_later_batches_push_deadline() {
        let mut page = page();
        let app = page.find("#app").unwrap();
        let first = page.append_html(app, r#"<input name="a">"#).unwrap();
        let second = page.append_html(app, r#"<select name="b"></select>"#).unwrap();

        let start = Instant::now();
        let mut watcher = DomWatcher::new(DEBOUNCE);
        watcher.observe(&page, &first, start);
        watcher.observe(&page, &second, start + Duration::from_millis(300));

        assert!(!watcher.take_due(start + DEBOUNCE));
        assert!(watcher.take_due(start + Duration::from_millis(800)));
    }
}
