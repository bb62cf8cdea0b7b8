// src/engine/executor.rs
//! Write values into controls and tell the host page about it

use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::dom::{Notification, NotificationKind, NodeHandle, PageDom, SelectOption};
use crate::types::{ControlKind, FieldDescriptor};
use crate::utils::merge_inline_style;

pub const HIGHLIGHT_STYLE: &str =
    "border: 2px solid #4CAF50; box-shadow: 0 0 8px rgba(76, 175, 80, 0.3);";

const NOTIFICATION_ORDER: [NotificationKind; 3] = [
    NotificationKind::Input,
    NotificationKind::Change,
    NotificationKind::Blur,
];

#[derive(Debug, Clone)]
struct PendingRestore {
    original: Option<String>,
    due: Instant,
}

/// Transient highlights waiting to be undone.
#[derive(Debug, Default)]
pub struct HighlightTracker {
    pending: HashMap<NodeHandle, PendingRestore>,
}

impl HighlightTracker {
    /// Highlight `node` until `now + window`. A node that is already
    /// highlighted keeps the style saved the first time.
    pub fn highlight<D: PageDom>(
        &mut self,
        dom: &mut D,
        node: NodeHandle,
        now: Instant,
        window: Duration,
    ) -> Result<()> {
        let original = match self.pending.get(&node) {
            Some(pending) => pending.original.clone(),
            None => dom.inline_style(node),
        };

        let highlighted = merge_inline_style(original.as_deref(), HIGHLIGHT_STYLE);
        dom.set_inline_style(node, Some(&highlighted))?;

        self.pending.insert(
            node,
            PendingRestore {
                original,
                due: now + window,
            },
        );
        Ok(())
    }

    /// Put back the exact prior inline style of every expired highlight.
    pub fn restore_due<D: PageDom>(&mut self, dom: &mut D, now: Instant) -> usize {
        let due: Vec<NodeHandle> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.due <= now)
            .map(|(node, _)| *node)
            .collect();

        let mut restored = 0;
        for node in due {
            if let Some(pending) = self.pending.remove(&node) {
                match dom.set_inline_style(node, pending.original.as_deref()) {
                    Ok(()) => restored += 1,
                    Err(e) => debug!("Could not restore style after highlight: {}", e),
                }
            }
        }
        restored
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.due).min()
    }
}

/// First option whose value or label contains the target, case-insensitively.
pub fn matching_option<'a>(options: &'a [SelectOption], target: &str) -> Option<&'a SelectOption> {
    let target = target.to_lowercase();
    options.iter().find(|option| {
        option.value.to_lowercase().contains(&target)
            || option.label.to_lowercase().contains(&target)
    })
}

#[derive(Debug, Clone)]
pub struct FillExecutor {
    highlight_window: Duration,
}

impl FillExecutor {
    pub fn new(highlight_window: Duration) -> Self {
        Self { highlight_window }
    }

    /// Fill one control. Returns whether the fill was attempted and did not
    /// error. A select with no matching option is left alone and still
    /// counts as filled.
    pub fn fill<D: PageDom>(
        &self,
        dom: &mut D,
        highlights: &mut HighlightTracker,
        field: &FieldDescriptor,
        value: Option<&str>,
        now: Instant,
    ) -> bool {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return false;
        };
        if !dom.is_attached(field.handle) {
            return false;
        }

        match self.write(dom, highlights, field, value, now) {
            Ok(()) => true,
            Err(e) => {
                warn!("Error filling field '{}': {:#}", field.display_name(), e);
                false
            }
        }
    }

    fn write<D: PageDom>(
        &self,
        dom: &mut D,
        highlights: &mut HighlightTracker,
        field: &FieldDescriptor,
        value: &str,
        now: Instant,
    ) -> Result<()> {
        let node = field.handle;

        match field.kind {
            ControlKind::Checkbox | ControlKind::Radio => {
                dom.set_checked(node, !value.is_empty())?;
            }
            ControlKind::Select => {
                let options = dom.select_options(node);
                match matching_option(&options, value) {
                    Some(option) => dom.set_value(node, &option.value)?,
                    None => debug!(
                        "No option of '{}' matches '{}'",
                        field.display_name(),
                        value
                    ),
                }
            }
            _ => dom.set_value(node, value)?,
        }

        for kind in NOTIFICATION_ORDER {
            dom.dispatch(node, Notification::bubbling(kind))?;
        }

        highlights.highlight(dom, node, now, self.highlight_window)
    }
}
