//! The [`Surface`] trait: the styling-hook contract every controller writes to.
//!
//! Controllers never touch a real DOM. They toggle classes, set text, styles
//! and attributes on elements addressed by id, and read back layout bounds and
//! the scroll position. Any host that can honour these operations can drive the
//! coordinator; the in-crate implementation is [`PageModel`](super::PageModel).
//!
//! Operations on ids that do not exist are silent no-ops, mirroring how a
//! missing element is simply skipped by the page script.

/// Vertical bounds of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current vertical scroll offset.
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scroll_y: 0.0,
            width: 1280.0,
            height: 800.0,
        }
    }
}

pub trait Surface {
    fn exists(&self, id: &str) -> bool;

    fn add_class(&mut self, id: &str, class: &str);
    fn remove_class(&mut self, id: &str, class: &str);
    fn has_class(&self, id: &str, class: &str) -> bool;

    /// Add or remove `class` depending on `on`.
    fn set_class(&mut self, id: &str, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    fn set_text(&mut self, id: &str, text: &str);
    fn text(&self, id: &str) -> Option<String>;

    fn set_style(&mut self, id: &str, property: &str, value: &str);
    fn style(&self, id: &str, property: &str) -> Option<String>;

    fn set_attribute(&mut self, id: &str, name: &str, value: &str);
    fn remove_attribute(&mut self, id: &str, name: &str);
    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    /// Create `child` as the last child of `parent`. Replaces any existing
    /// element with the same id.
    fn append_child(&mut self, parent: &str, child: &str, tag: &str);
    /// Remove an element and its whole subtree.
    fn remove_element(&mut self, id: &str);
    fn clear_children(&mut self, parent: &str);
    fn children(&self, parent: &str) -> Vec<String>;
    fn parent(&self, id: &str) -> Option<String>;

    /// All elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<String>;

    fn bounds(&self, id: &str) -> Option<Rect>;
    fn viewport(&self) -> Viewport;
    /// Record new window geometry reported by the host (a scroll or resize).
    fn set_viewport(&mut self, viewport: Viewport);
    fn scroll_to(&mut self, top: f64, smooth: bool);

    /// Whether `id` is `ancestor` or sits somewhere inside it.
    fn contains(&self, ancestor: &str, id: &str) -> bool {
        let mut current = Some(id.to_string());
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(&node);
        }
        false
    }

    /// Position of `id` among its parent's children.
    fn sibling_index(&self, id: &str) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(&parent).iter().position(|c| c == id)
    }
}
