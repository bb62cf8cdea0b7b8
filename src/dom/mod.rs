// src/dom/mod.rs
//! Capability surface over the hosted page's live document

pub mod html_page;

pub use html_page::HtmlPage;

use anyhow::{Context, Result};
use ego_tree::NodeId;
use scraper::Selector;

use crate::types::ControlAttributes;

/// Opaque identity of one node in the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub(crate) NodeId);

/// Where the page lives. Host and path are lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    pub host: String,
    pub path: String,
}

impl PageLocation {
    pub fn new(host: &str, path: &str) -> Self {
        Self {
            host: host.to_lowercase(),
            path: path.to_lowercase(),
        }
    }

    pub fn parse(url: &str) -> Result<Self> {
        let parsed =
            reqwest::Url::parse(url).with_context(|| format!("Invalid page URL: {}", url))?;
        Ok(Self::new(parsed.host_str().unwrap_or_default(), parsed.path()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Input,
    Change,
    Blur,
}

/// A synthetic event dispatched on a control after a programmatic write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub bubbles: bool,
}

impl Notification {
    pub fn bubbling(kind: NotificationKind) -> Self {
        Self {
            kind,
            bubbles: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// Everything the engine is allowed to do with a document.
pub trait PageDom {
    fn location(&self) -> &PageLocation;

    /// Every `input`, `textarea` and `select` attached to the document, in
    /// document order.
    fn form_controls(&self) -> Vec<NodeHandle>;

    fn control_attributes(&self, node: NodeHandle) -> Option<ControlAttributes>;

    fn is_attached(&self, node: NodeHandle) -> bool;

    /// Whether the node would get a layout box when rendered.
    fn has_layout_box(&self, node: NodeHandle) -> bool;

    fn matches(&self, node: NodeHandle, selector: &Selector) -> bool;

    fn query_all(&self, selector: &Selector) -> Vec<NodeHandle>;

    fn query_exists(&self, selector: &Selector) -> bool {
        !self.query_all(selector).is_empty()
    }

    /// Text of the first attached element matching `selector`.
    fn first_text(&self, selector: &Selector) -> Option<String>;

    /// Whether the node is itself a form control or has one among its
    /// descendants.
    fn subtree_has_control(&self, node: NodeHandle) -> bool;

    fn select_options(&self, node: NodeHandle) -> Vec<SelectOption>;

    fn current_value(&self, node: NodeHandle) -> Option<String>;

    fn is_checked(&self, node: NodeHandle) -> bool;

    fn set_value(&mut self, node: NodeHandle, value: &str) -> Result<()>;

    fn set_checked(&mut self, node: NodeHandle, checked: bool) -> Result<()>;

    fn inline_style(&self, node: NodeHandle) -> Option<String>;

    /// `None` removes the inline style entirely.
    fn set_inline_style(&mut self, node: NodeHandle, style: Option<&str>) -> Result<()>;

    fn dispatch(&mut self, node: NodeHandle, notification: Notification) -> Result<()>;
}
