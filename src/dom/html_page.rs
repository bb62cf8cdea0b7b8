// src/dom/html_page.rs
//! In-memory page backed by a parsed HTML snapshot

use anyhow::{Context, Result};
use ego_tree::{NodeId, NodeMut, NodeRef};
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashMap;

use super::{Notification, NodeHandle, PageDom, PageLocation, SelectOption};
use crate::types::{ControlAttributes, ControlKind};
use crate::utils::{clean_text, style_hides_element};

lazy_static! {
    static ref CONTROL_SELECTOR: Selector =
        Selector::parse("input, textarea, select").expect("control selector is valid");
    static ref OPTION_SELECTOR: Selector =
        Selector::parse("option").expect("option selector is valid");
    static ref BODY_SELECTOR: Selector = Selector::parse("body").expect("body selector is valid");
    static ref RADIO_SELECTOR: Selector =
        Selector::parse(r#"input[type="radio" i]"#).expect("radio selector is valid");
}

/// Live state written by the engine. The parsed markup is never touched for
/// these, so `None` means "fall back to the markup".
#[derive(Debug, Default, Clone)]
struct ControlState {
    value: Option<String>,
    checked: Option<bool>,
    // Some(None) = inline style removed
    style: Option<Option<String>>,
}

pub struct HtmlPage {
    location: PageLocation,
    document: Html,
    overlay: HashMap<NodeId, ControlState>,
    notifications: Vec<(NodeHandle, Notification)>,
}

impl HtmlPage {
    pub fn parse(location: PageLocation, markup: &str) -> Self {
        Self {
            location,
            document: Html::parse_document(markup),
            overlay: HashMap::new(),
            notifications: Vec::new(),
        }
    }

    pub fn from_url(url: &str, markup: &str) -> Result<Self> {
        Ok(Self::parse(PageLocation::parse(url)?, markup))
    }

    /// Replace the document, as a full navigation does.
    pub fn navigate(&mut self, location: PageLocation, markup: &str) {
        self.location = location;
        self.document = Html::parse_document(markup);
        self.overlay.clear();
        self.notifications.clear();
    }

    pub fn body(&self) -> Option<NodeHandle> {
        self.attached(&BODY_SELECTOR)
            .next()
            .map(|element| NodeHandle(element.id()))
    }

    /// First attached element matching a CSS selector.
    pub fn find(&self, selector: &str) -> Option<NodeHandle> {
        let selector = Selector::parse(selector).ok()?;
        self.query_all(&selector).into_iter().next()
    }

    /// Parse `markup` and append the resulting nodes under `parent`.
    /// Returns the handles of the appended top-level nodes.
    pub fn append_html(&mut self, parent: NodeHandle, markup: &str) -> Result<Vec<NodeHandle>> {
        let fragment = Html::parse_fragment(markup);
        let mut parent_node = self
            .document
            .tree
            .get_mut(parent.0)
            .context("Parent node not found in page")?;

        let added = fragment
            .root_element()
            .children()
            .map(|child| graft(&mut parent_node, child))
            .collect();

        Ok(added)
    }

    /// Detach a subtree from the document. Handles inside it stay valid as
    /// identities but report as detached.
    pub fn remove(&mut self, node: NodeHandle) -> bool {
        if node.0 == self.document.tree.root().id() {
            return false;
        }
        match self.document.tree.get_mut(node.0) {
            Some(mut target) => {
                target.detach();
                true
            }
            None => false,
        }
    }

    /// Notifications dispatched on `node`, in dispatch order.
    pub fn notifications_for(&self, node: NodeHandle) -> Vec<Notification> {
        self.notifications
            .iter()
            .filter(|(target, _)| *target == node)
            .map(|(_, notification)| *notification)
            .collect()
    }

    /// Matches in document order. `Html::select` walks the whole node arena,
    /// detached subtrees included, so queries start from the root element.
    fn attached<'a, 'b>(&'a self, selector: &'b Selector) -> scraper::element_ref::Select<'a, 'b> {
        self.document.root_element().select(selector)
    }

    fn element(&self, node: NodeHandle) -> Option<ElementRef<'_>> {
        self.document.tree.get(node.0).and_then(ElementRef::wrap)
    }

    /// Other radios sharing `node`'s name within its form, or within the
    /// document when it has no form.
    fn radio_peers(&self, node: NodeHandle) -> Vec<NodeHandle> {
        let Some(element) = self.element(node) else {
            return Vec::new();
        };
        if !RADIO_SELECTOR.matches(&element) {
            return Vec::new();
        }
        let Some(name) = element.value().attr("name").filter(|name| !name.is_empty()) else {
            return Vec::new();
        };

        let scope = element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| ancestor.value().name() == "form")
            .unwrap_or_else(|| self.document.root_element());

        scope
            .select(&RADIO_SELECTOR)
            .filter(|peer| peer.id() != node.0 && peer.value().attr("name") == Some(name))
            .map(|peer| NodeHandle(peer.id()))
            .collect()
    }

    fn state_mut(&mut self, node: NodeHandle) -> &mut ControlState {
        self.overlay.entry(node.0).or_default()
    }

    /// Tag of a control that can currently receive a write.
    fn writable_control(&self, node: NodeHandle) -> Result<String> {
        let element = self.element(node).context("Control not found in page")?;
        if !self.is_attached(node) {
            anyhow::bail!("Control is detached from the document");
        }

        let tag = element.value().name().to_string();
        if !matches!(tag.as_str(), "input" | "textarea" | "select") {
            anyhow::bail!("<{}> is not a form control", tag);
        }
        Ok(tag)
    }
}

fn graft(parent: &mut NodeMut<'_, Node>, source: NodeRef<'_, Node>) -> NodeHandle {
    let mut copy = parent.append(source.value().clone());
    for child in source.children() {
        graft(&mut copy, child);
    }
    NodeHandle(copy.id())
}

fn option_of(option: ElementRef<'_>) -> SelectOption {
    let label = clean_text(&option.text().collect::<String>());
    let value = option
        .value()
        .attr("value")
        .map(str::to_string)
        .unwrap_or_else(|| label.clone());
    SelectOption { value, label }
}

impl PageDom for HtmlPage {
    fn location(&self) -> &PageLocation {
        &self.location
    }

    fn form_controls(&self) -> Vec<NodeHandle> {
        self.query_all(&CONTROL_SELECTOR)
    }

    fn control_attributes(&self, node: NodeHandle) -> Option<ControlAttributes> {
        let element = self.element(node)?;
        let value = element.value();
        let tag = value.name().to_ascii_lowercase();
        if !matches!(tag.as_str(), "input" | "textarea" | "select") {
            return None;
        }

        let attr = |name: &str| value.attr(name).unwrap_or_default().to_string();
        Some(ControlAttributes {
            kind: ControlKind::from_tag_and_type(&tag, value.attr("type")),
            name: attr("name"),
            id: attr("id"),
            placeholder: attr("placeholder"),
            required: value.attr("required").is_some(),
            tag,
        })
    }

    fn is_attached(&self, node: NodeHandle) -> bool {
        let root = self.document.tree.root().id();
        match self.document.tree.get(node.0) {
            Some(target) => target.id() == root || target.ancestors().any(|a| a.id() == root),
            None => false,
        }
    }

    fn has_layout_box(&self, node: NodeHandle) -> bool {
        if !self.is_attached(node) {
            return false;
        }
        let Some(element) = self.element(node) else {
            return false;
        };

        let value = element.value();
        if value.name() == "input"
            && value
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("hidden"))
        {
            return false;
        }

        std::iter::once(element)
            .chain(element.ancestors().filter_map(ElementRef::wrap))
            .all(|el| {
                el.value().attr("hidden").is_none()
                    && !self
                        .inline_style(NodeHandle(el.id()))
                        .is_some_and(|style| style_hides_element(&style))
            })
    }

    fn matches(&self, node: NodeHandle, selector: &Selector) -> bool {
        self.element(node)
            .map(|element| selector.matches(&element))
            .unwrap_or(false)
    }

    fn query_all(&self, selector: &Selector) -> Vec<NodeHandle> {
        self.attached(selector)
            .map(|element| NodeHandle(element.id()))
            .collect()
    }

    fn first_text(&self, selector: &Selector) -> Option<String> {
        self.attached(selector)
            .next()
            .map(|element| element.text().collect::<Vec<_>>().join(" "))
    }

    fn subtree_has_control(&self, node: NodeHandle) -> bool {
        match self.element(node) {
            Some(element) => {
                CONTROL_SELECTOR.matches(&element)
                    || element.select(&CONTROL_SELECTOR).next().is_some()
            }
            None => false,
        }
    }

    fn select_options(&self, node: NodeHandle) -> Vec<SelectOption> {
        match self.element(node) {
            Some(element) if element.value().name() == "select" => {
                element.select(&OPTION_SELECTOR).map(option_of).collect()
            }
            _ => Vec::new(),
        }
    }

    fn current_value(&self, node: NodeHandle) -> Option<String> {
        if let Some(value) = self.overlay.get(&node.0).and_then(|s| s.value.clone()) {
            return Some(value);
        }

        let element = self.element(node)?;
        match element.value().name() {
            "input" => Some(element.value().attr("value").unwrap_or_default().to_string()),
            "textarea" => Some(element.text().collect()),
            "select" => {
                let options: Vec<ElementRef<'_>> = element.select(&OPTION_SELECTOR).collect();
                options
                    .iter()
                    .find(|option| option.value().attr("selected").is_some())
                    .or_else(|| options.first())
                    .map(|option| option_of(*option).value)
            }
            _ => None,
        }
    }

    fn is_checked(&self, node: NodeHandle) -> bool {
        if let Some(checked) = self.overlay.get(&node.0).and_then(|s| s.checked) {
            return checked;
        }
        self.element(node)
            .map(|element| element.value().attr("checked").is_some())
            .unwrap_or(false)
    }

    fn set_value(&mut self, node: NodeHandle, value: &str) -> Result<()> {
        let tag = self.writable_control(node)?;

        if tag == "input"
            && self
                .control_attributes(node)
                .is_some_and(|attrs| attrs.kind == ControlKind::File)
            && !value.is_empty()
        {
            anyhow::bail!("File inputs only accept an empty value programmatically");
        }

        let stored = if tag == "select"
            && !self.select_options(node).iter().any(|o| o.value == value)
        {
            // Matches the DOM: an unknown option value clears the selection
            String::new()
        } else {
            value.to_string()
        };

        self.state_mut(node).value = Some(stored);
        Ok(())
    }

    fn set_checked(&mut self, node: NodeHandle, checked: bool) -> Result<()> {
        let tag = self.writable_control(node)?;
        if tag != "input" {
            anyhow::bail!("<{}> has no checked state", tag);
        }
        if checked {
            // one checked radio per group
            for peer in self.radio_peers(node) {
                self.state_mut(peer).checked = Some(false);
            }
        }
        self.state_mut(node).checked = Some(checked);
        Ok(())
    }

    fn inline_style(&self, node: NodeHandle) -> Option<String> {
        if let Some(style) = self.overlay.get(&node.0).and_then(|s| s.style.clone()) {
            return style;
        }
        self.element(node)
            .and_then(|element| element.value().attr("style").map(str::to_string))
    }

    fn set_inline_style(&mut self, node: NodeHandle, style: Option<&str>) -> Result<()> {
        self.element(node).context("Element not found in page")?;
        self.state_mut(node).style = Some(style.map(str::to_string));
        Ok(())
    }

    fn dispatch(&mut self, node: NodeHandle, notification: Notification) -> Result<()> {
        self.element(node).context("Event target not found in page")?;
        self.notifications.push((node, notification));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NotificationKind;

    fn page(markup: &str) -> HtmlPage {
        HtmlPage::parse(PageLocation::new("careers.example.com", "/apply"), markup)
    }

    #[test]
    fn test_form_controls_in_document_order() {
        let page = page(
            r#"<form><input name="a"><textarea name="b"></textarea><select name="c"></select></form>"#,
        );
        let names: Vec<String> = page
            .form_controls()
            .into_iter()
            .filter_map(|node| page.control_attributes(node))
            .map(|attrs| attrs.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_layout_box_heuristic() {
        let page = page(
            r#"<div style="display: none"><input name="inside"></div>
               <div hidden><input name="hidden_attr"></div>
               <input type="hidden" name="token">
               <input name="shown" style="color: red">"#,
        );

        assert!(!page.has_layout_box(page.find("[name=inside]").unwrap()));
        assert!(!page.has_layout_box(page.find("[name=hidden_attr]").unwrap()));
        assert!(!page.has_layout_box(page.find("[name=token]").unwrap()));
        assert!(page.has_layout_box(page.find("[name=shown]").unwrap()));
    }

    #[test]
    fn test_values_come_from_markup_until_written() {
        let mut page = page(
            r#"<input name="city" value="Paris">
               <textarea name="bio">Hello</textarea>
               <select name="level"><option value="j">Junior</option><option value="s" selected>Senior</option></select>"#,
        );
        let city = page.find("[name=city]").unwrap();
        let bio = page.find("[name=bio]").unwrap();
        let level = page.find("[name=level]").unwrap();

        assert_eq!(page.current_value(city).as_deref(), Some("Paris"));
        assert_eq!(page.current_value(bio).as_deref(), Some("Hello"));
        assert_eq!(page.current_value(level).as_deref(), Some("s"));

        page.set_value(city, "Lyon").unwrap();
        page.set_value(level, "j").unwrap();
        assert_eq!(page.current_value(city).as_deref(), Some("Lyon"));
        assert_eq!(page.current_value(level).as_deref(), Some("j"));

        page.set_value(level, "missing").unwrap();
        assert_eq!(page.current_value(level).as_deref(), Some(""));
    }

    #[test]
    fn test_checking_a_radio_unchecks_its_group() {
        let mut page = page(
            r#"<form>
                 <input type="radio" name="experience" value="junior" checked>
                 <input type="radio" name="experience" value="senior">
                 <input type="radio" name="remote" value="yes" checked>
               </form>
               <form><input type="radio" name="experience" value="other" checked></form>"#,
        );
        let junior = page.find("[value=junior]").unwrap();
        let senior = page.find("[value=senior]").unwrap();
        let remote = page.find("[name=remote]").unwrap();
        let other_form = page.find("[value=other]").unwrap();

        page.set_checked(senior, true).unwrap();
        assert!(page.is_checked(senior));
        assert!(!page.is_checked(junior));
        assert!(page.is_checked(remote));
        assert!(page.is_checked(other_form));

        page.set_checked(senior, false).unwrap();
        assert!(!page.is_checked(senior));
        assert!(!page.is_checked(junior));
    }

    #[test]
    fn test_file_input_rejects_value() {
        let mut page = page(r#"<input type="file" name="cv">"#);
        let cv = page.find("[name=cv]").unwrap();
        assert!(page.set_value(cv, "resume.pdf").is_err());
        assert!(page.set_value(cv, "").is_ok());
    }

    #[test]
    fn test_append_and_remove() {
        let mut page = page(r#"<body><div id="root"></div></body>"#);
        let root = page.find("#root").unwrap();

        let added = page
            .append_html(root, r#"<section><label>Email</label><input name="email"></section><p>x</p>"#)
            .unwrap();
        assert_eq!(added.len(), 2);
        assert!(page.subtree_has_control(added[0]));
        assert!(!page.subtree_has_control(added[1]));

        let email = page.find("[name=email]").unwrap();
        assert!(page.is_attached(email));
        assert_eq!(page.form_controls().len(), 1);

        assert!(page.remove(added[0]));
        assert!(!page.is_attached(email));
        assert!(page.form_controls().is_empty());
        assert!(page.set_value(email, "x").is_err());
    }

    #[test]
    fn test_inline_style_overlay() {
        let mut page = page(r#"<input name="a" style="color: red">"#);
        let a = page.find("[name=a]").unwrap();

        assert_eq!(page.inline_style(a).as_deref(), Some("color: red"));
        page.set_inline_style(a, Some("border: 1px")).unwrap();
        assert_eq!(page.inline_style(a).as_deref(), Some("border: 1px"));
        page.set_inline_style(a, None).unwrap();
        assert_eq!(page.inline_style(a), None);
    }

    #[test]
    fn test_notifications_are_recorded_per_node() {
        let mut page = page(r#"<input name="a"><input name="b">"#);
        let a = page.find("[name=a]").unwrap();
        let b = page.find("[name=b]").unwrap();

        page.dispatch(a, Notification::bubbling(NotificationKind::Input)).unwrap();
        page.dispatch(b, Notification::bubbling(NotificationKind::Change)).unwrap();
        page.dispatch(a, Notification::bubbling(NotificationKind::Blur)).unwrap();

        let kinds: Vec<NotificationKind> =
            page.notifications_for(a).into_iter().map(|n| n.kind).collect();
        assert_eq!(kinds, vec![NotificationKind::Input, NotificationKind::Blur]);
    }
}
