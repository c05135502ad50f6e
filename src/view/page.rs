//! In-memory document model implementing [`Surface`].
//!
//! `PageModel` is a small element tree: each element has a tag, a class set,
//! text, inline styles, attributes and optional vertical bounds. It is what the
//! CLI replays sessions against and what every controller test inspects.

use super::surface::{Rect, Surface, Viewport};
use std::collections::{BTreeMap, BTreeSet};

/// Id of the document element (`<html>`), which carries `data-theme`.
pub const ROOT: &str = "root";
/// Id of `<body>`.
pub const BODY: &str = "body";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: BTreeSet<String>,
    pub text: String,
    pub styles: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub bounds: Option<Rect>,
}

/// A recorded `scroll_to` request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub smooth: bool,
}

#[derive(Debug, Clone)]
pub struct PageModel {
    elements: BTreeMap<String, Element>,
    viewport: Viewport,
    scroll_requests: Vec<ScrollRequest>,
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PageModel {
    /// A document with just `root` and `body`.
    pub fn new() -> Self {
        let mut elements = BTreeMap::new();
        elements.insert(
            ROOT.to_string(),
            Element {
                tag: "html".to_string(),
                children: vec![BODY.to_string()],
                ..Default::default()
            },
        );
        elements.insert(
            BODY.to_string(),
            Element {
                tag: "body".to_string(),
                parent: Some(ROOT.to_string()),
                ..Default::default()
            },
        );
        Self {
            elements,
            viewport: Viewport::default(),
            scroll_requests: Vec::new(),
        }
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    /// Every element id, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn set_bounds(&mut self, id: &str, bounds: Rect) {
        if let Some(el) = self.elements.get_mut(id) {
            el.bounds = Some(bounds);
        }
    }

    /// Jump the scroll position without recording a request (a user scroll).
    pub fn set_scroll(&mut self, y: f64) {
        self.viewport.scroll_y = y.max(0.0);
    }

    pub fn set_width(&mut self, width: f64) {
        self.viewport.width = width;
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    fn collect_descendants(&self, id: &str, out: &mut Vec<String>) {
        if let Some(el) = self.elements.get(id) {
            for child in &el.children {
                out.push(child.clone());
                self.collect_descendants(child, out);
            }
        }
    }

    fn detach(&mut self, id: &str) {
        let parent = self.elements.get(id).and_then(|el| el.parent.clone());
        if let Some(p) = parent.and_then(|parent| self.elements.get_mut(&parent)) {
            p.children.retain(|c| c != id);
        }
    }
}

impl Surface for PageModel {
    fn exists(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn add_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.classes.remove(class);
        }
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|el| el.classes.contains(class))
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.text = text.to_string();
        }
    }

    fn text(&self, id: &str) -> Option<String> {
        self.elements.get(id).map(|el| el.text.clone())
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, id: &str, property: &str) -> Option<String> {
        self.elements
            .get(id)
            .and_then(|el| el.styles.get(property).cloned())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, id: &str, name: &str) {
        if let Some(el) = self.elements.get_mut(id) {
            el.attributes.remove(name);
        }
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.elements
            .get(id)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn append_child(&mut self, parent: &str, child: &str, tag: &str) {
        if !self.elements.contains_key(parent) {
            return;
        }
        if self.elements.contains_key(child) {
            self.remove_element(child);
        }
        self.elements.insert(
            child.to_string(),
            Element {
                tag: tag.to_string(),
                parent: Some(parent.to_string()),
                ..Default::default()
            },
        );
        if let Some(p) = self.elements.get_mut(parent) {
            p.children.push(child.to_string());
        }
    }

    fn remove_element(&mut self, id: &str) {
        if id == ROOT || !self.elements.contains_key(id) {
            return;
        }
        self.detach(id);
        let mut doomed = Vec::new();
        self.collect_descendants(id, &mut doomed);
        for d in doomed {
            self.elements.remove(&d);
        }
        self.elements.remove(id);
    }

    fn clear_children(&mut self, parent: &str) {
        for child in self.children(parent) {
            self.remove_element(&child);
        }
    }

    fn children(&self, parent: &str) -> Vec<String> {
        self.elements
            .get(parent)
            .map(|el| el.children.clone())
            .unwrap_or_default()
    }

    fn parent(&self, id: &str) -> Option<String> {
        self.elements.get(id).and_then(|el| el.parent.clone())
    }

    fn elements_with_class(&self, class: &str) -> Vec<String> {
        let mut order = vec![ROOT.to_string()];
        self.collect_descendants(ROOT, &mut order);
        order
            .into_iter()
            .filter(|id| self.has_class(id, class))
            .collect()
    }

    fn bounds(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).and_then(|el| el.bounds)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn scroll_to(&mut self, top: f64, smooth: bool) {
        let top = top.max(0.0);
        self.scroll_requests.push(ScrollRequest { top, smooth });
        self.viewport.scroll_y = top;
    }
}
