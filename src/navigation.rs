//! Navigation controller: scroll spy, navbar state, mobile menu, anchors.

use crate::config::NavigationConfig;
use crate::view::{Surface, classes, ids};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct NavigationController {
    config: NavigationConfig,
}

impl NavigationController {
    pub fn new(config: NavigationConfig) -> Self {
        Self { config }
    }

    /// Scroll handler: navbar `scrolled` state plus the active link.
    pub fn on_scroll(&self, surface: &mut dyn Surface) {
        let y = surface.viewport().scroll_y;
        surface.set_class(ids::NAVBAR, classes::SCROLLED, y > self.config.scrolled_threshold);
        self.update_active_link(surface);
    }

    /// The section whose bounds contain `scroll + section_offset`.
    ///
    /// Sections are checked in document order and the last match wins.
    pub fn current_section(&self, surface: &dyn Surface) -> Option<String> {
        let position = surface.viewport().scroll_y + self.config.section_offset;
        surface
            .elements_with_class(classes::SECTION)
            .into_iter()
            .rev()
            .find(|id| {
                surface
                    .bounds(id)
                    .is_some_and(|b| position >= b.top && position < b.bottom())
            })
    }

    /// Mark exactly the link targeting the current section as active, or none.
    pub fn update_active_link(&self, surface: &mut dyn Surface) {
        let target = self.current_section(surface).map(|s| format!("#{s}"));
        for link in surface.elements_with_class(classes::NAV_LINK) {
            let on = target.is_some() && surface.attribute(&link, "href") == target;
            surface.set_class(&link, classes::ACTIVE, on);
        }
    }

    pub fn is_menu_open(&self, surface: &dyn Surface) -> bool {
        surface.has_class(ids::NAV_MENU, classes::ACTIVE)
    }

    /// Flip the menu, hamburger and body scroll-lock together.
    pub fn toggle_menu(&self, surface: &mut dyn Surface) {
        let open = !self.is_menu_open(surface);
        set_menu(surface, open);
        debug!(open, "mobile menu toggled");
    }

    pub fn close_menu(&self, surface: &mut dyn Surface) {
        set_menu(surface, false);
    }

    /// Smooth-scroll to a same-page anchor and close the menu.
    ///
    /// Bounds are document coordinates, so the destination is the target's
    /// top minus the fixed header. Returns `false` and leaves everything as it
    /// was when `href` is not a `#id` anchor or the target does not exist.
    pub fn follow_anchor(&self, surface: &mut dyn Surface, href: &str) -> bool {
        let Some(target) = href.strip_prefix('#').filter(|t| !t.is_empty()) else {
            return false;
        };
        let Some(bounds) = surface.bounds(target) else {
            debug!(href, "anchor target missing");
            return false;
        };
        let top = bounds.top - self.config.header_offset;
        surface.scroll_to(top, true);
        self.close_menu(surface);
        debug!(href, top, "anchor followed");
        true
    }

    /// A click on a `nav-link` inside the menu closes the menu.
    pub fn on_menu_click(&self, surface: &mut dyn Surface, clicked: &str) {
        if surface.has_class(clicked, classes::NAV_LINK) {
            self.close_menu(surface);
        }
    }

    /// Widening past the mobile breakpoint closes the menu.
    pub fn on_resize(&self, surface: &mut dyn Surface) {
        if surface.viewport().width > self.config.mobile_breakpoint {
            self.close_menu(surface);
        }
    }
}

fn set_menu(surface: &mut dyn Surface, open: bool) {
    surface.set_class(ids::NAV_MENU, classes::ACTIVE, open);
    surface.set_class(ids::HAMBURGER, classes::ACTIVE, open);
    surface.set_class(ids::BODY, classes::MENU_OPEN, open);
}
