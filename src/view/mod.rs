//! The page as the coordinator sees it.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`Surface`] | Styling-hook contract: classes, text, styles, attributes, bounds, scroll |
//! | [`PageModel`] | In-memory element tree implementing `Surface` |
//! | [`build_page`] | Builds the `PageModel` for a config and catalog, with synthetic layout |
//! | [`ids`] / [`classes`] | Element ids and class names shared with the HTML generator |
//!
//! The generator renders exactly the ids and classes listed here, so a session
//! replayed against the `PageModel` exercises the same hooks the stylesheet
//! keys off.

mod build;
mod page;
mod surface;

pub use build::{PageLayout, build_page, filter_label, section_label};
pub use page::{Element, PageModel, ScrollRequest};
pub use surface::{Rect, Surface, Viewport};

/// Element ids.
pub mod ids {
    pub use super::page::{BODY, ROOT};

    pub const LOADING_SCREEN: &str = "loading-screen";
    pub const NAVBAR: &str = "navbar";
    pub const NAV_MENU: &str = "nav-menu";
    pub const HAMBURGER: &str = "hamburger";
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const THEME_ICON: &str = "theme-icon";

    pub const HERO_CONTENT: &str = "hero-content";
    pub const HERO_IMAGE: &str = "hero-image";
    pub const TYPEWRITER: &str = "typewriter";
    pub const DYNAMIC_TITLE: &str = "dynamic-title";

    pub const STATS: &str = "stats";
    pub const SKILLS_GRID: &str = "skills-grid";
    pub const FILTER_BAR: &str = "filter-bar";
    pub const PROJECTS_GRID: &str = "projects-grid";
    pub const TIMELINE: &str = "timeline";
    pub const CERT_GRID: &str = "cert-grid";

    pub const CONTACT_FORM: &str = "contactForm";
    pub const SUBMIT_BUTTON: &str = "contact-submit";

    pub const PROJECT_MODAL: &str = "projectModal";
    pub const MODAL_TITLE: &str = "modalTitle";
    pub const MODAL_BODY: &str = "modalBody";
    pub const GALLERY_MODAL: &str = "galleryModal";
    pub const GALLERY_CONTAINER: &str = "galleryContainer";
    pub const CURRENT_SLIDE: &str = "currentSlide";
    pub const TOTAL_SLIDES: &str = "totalSlides";
    pub const GALLERY_DOTS: &str = "galleryDots";

    pub const WHATSAPP_FLOAT: &str = "whatsapp-float";
    pub const WHATSAPP_POPUP: &str = "whatsapp-popup";
    pub const WHATSAPP_CLOSE: &str = "whatsapp-close";

    /// Page sections, top to bottom. Each id doubles as a class on the
    /// section element.
    pub const SECTIONS: [&str; 7] = [
        "home",
        "about",
        "skills",
        "projects",
        "experience",
        "certifications",
        "contact",
    ];

    pub fn nav_link(section: &str) -> String {
        format!("nav-{section}")
    }

    pub fn filter_button(tag: &str) -> String {
        format!("filter-{tag}")
    }

    pub fn project_card(project_id: &str) -> String {
        format!("card-{project_id}")
    }

    pub fn stat(index: usize) -> String {
        format!("stat-{index}")
    }

    pub fn skill_category(index: usize) -> String {
        format!("skill-category-{index}")
    }

    pub fn skill_bar(category: usize, item: usize) -> String {
        format!("skill-bar-{category}-{item}")
    }

    pub fn timeline_item(index: usize) -> String {
        format!("timeline-{index}")
    }

    pub fn cert_card(index: usize) -> String {
        format!("cert-{index}")
    }

    pub fn contact_field(name: &str) -> String {
        format!("contact-{name}")
    }

    pub fn gallery_slide(index: usize) -> String {
        format!("gallery-slide-{index}")
    }

    pub fn gallery_image(index: usize) -> String {
        format!("gallery-image-{index}")
    }

    pub fn gallery_dot(index: usize) -> String {
        format!("gallery-dot-{index}")
    }
}

/// Class names the controllers toggle or query.
pub mod classes {
    pub const ACTIVE: &str = "active";
    pub const HIDDEN: &str = "hidden";
    pub const SCROLLED: &str = "scrolled";
    pub const LOADING: &str = "loading";
    pub const MENU_OPEN: &str = "menu-open";
    pub const SHOW: &str = "show";

    pub const SECTION: &str = "section";
    pub const NAV_LINK: &str = "nav-link";
    pub const FILTER_BUTTON: &str = "filter-btn";
    pub const PROJECT_CARD: &str = "project-card";
    pub const SKILL_CATEGORY: &str = "skill-category";
    pub const SKILL_PROGRESS: &str = "skill-progress";
    pub const STAT_NUMBER: &str = "stat-number";
    pub const TIMELINE_ITEM: &str = "timeline-item";
    pub const CERT_CARD: &str = "cert-card";
    pub const GALLERY_SLIDE: &str = "gallery-slide";
    pub const GALLERY_DOT: &str = "gallery-dot";
    pub const NOTIFICATION: &str = "notification";
}
