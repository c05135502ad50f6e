//! Builds the headless page for a site.
//!
//! The tree mirrors what `generate` renders: the same ids, classes and data
//! attributes. Layout is synthetic. Sections stack top to bottom with a fixed
//! default height (overridable per section) and the revealable items inside a
//! section are laid out in rows of three cards.

use super::page::PageModel;
use super::surface::{Rect, Surface, Viewport};
use super::{classes, ids};
use crate::catalog::{ALL_CATEGORIES, Catalog};
use crate::config::SiteConfig;
use crate::contact::FIELDS;
use std::collections::BTreeMap;

pub const DEFAULT_SECTION_HEIGHT: f64 = 800.0;

const GRID_COLUMNS: usize = 3;
const GRID_OFFSET: f64 = 120.0;
const CARD_HEIGHT: f64 = 200.0;
const ROW_GAP: f64 = 20.0;

/// Viewport and per-section heights used to position elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub viewport: Viewport,
    pub section_heights: BTreeMap<String, f64>,
}

impl PageLayout {
    pub fn section_height(&self, section: &str) -> f64 {
        self.section_heights
            .get(section)
            .copied()
            .unwrap_or(DEFAULT_SECTION_HEIGHT)
    }
}

/// Build the page tree for `config` and `catalog`.
pub fn build_page(config: &SiteConfig, catalog: &Catalog, layout: &PageLayout) -> PageModel {
    let mut page = PageModel::new();
    page.set_viewport(layout.viewport);

    page.append_child(ids::BODY, ids::LOADING_SCREEN, "div");
    page.add_class(ids::LOADING_SCREEN, "loading-screen");
    build_navbar(&mut page);

    let mut top = 0.0;
    for section in ids::SECTIONS {
        page.append_child(ids::BODY, section, "section");
        page.add_class(section, classes::SECTION);
        page.add_class(section, section);
        let height = layout.section_height(section);
        page.set_bounds(section, Rect::new(top, height));
        top += height;
    }

    build_hero(&mut page, config);
    build_about(&mut page, config);
    build_skills(&mut page, config);
    build_projects(&mut page, catalog);
    build_experience(&mut page, config);
    build_certifications(&mut page, config);
    build_contact(&mut page);
    build_modals(&mut page);
    if config.whatsapp.is_enabled() {
        build_whatsapp(&mut page, config);
    }

    page
}

fn build_navbar(page: &mut PageModel) {
    page.append_child(ids::BODY, ids::NAVBAR, "nav");
    page.add_class(ids::NAVBAR, "navbar");
    page.append_child(ids::NAVBAR, ids::NAV_MENU, "ul");
    page.add_class(ids::NAV_MENU, "nav-menu");
    for section in ids::SECTIONS {
        let link = ids::nav_link(section);
        page.append_child(ids::NAV_MENU, &link, "a");
        page.add_class(&link, classes::NAV_LINK);
        page.set_attribute(&link, "href", &format!("#{section}"));
        page.set_text(&link, &section_label(section));
    }
    page.append_child(ids::NAVBAR, ids::THEME_TOGGLE, "button");
    page.append_child(ids::THEME_TOGGLE, ids::THEME_ICON, "i");
    page.set_attribute(ids::THEME_ICON, "class", "fas fa-moon");
    page.append_child(ids::NAVBAR, ids::HAMBURGER, "div");
    page.add_class(ids::HAMBURGER, "hamburger");
}

fn build_hero(page: &mut PageModel, config: &SiteConfig) {
    page.append_child("home", ids::HERO_CONTENT, "div");
    page.append_child(ids::HERO_CONTENT, ids::TYPEWRITER, "span");
    page.set_attribute(ids::TYPEWRITER, "data-text", config.typewriter_text());
    page.append_child(ids::HERO_CONTENT, ids::DYNAMIC_TITLE, "span");
    if let Some(first) = config.site.roles.first() {
        page.set_text(ids::DYNAMIC_TITLE, first);
    }
    page.append_child("home", ids::HERO_IMAGE, "div");
}

fn build_about(page: &mut PageModel, config: &SiteConfig) {
    page.append_child("about", ids::STATS, "div");
    for (i, stat) in config.stats.iter().enumerate() {
        let id = ids::stat(i);
        page.append_child(ids::STATS, &id, "span");
        page.add_class(&id, classes::STAT_NUMBER);
        page.set_text(&id, &format!("{}+", stat.value));
    }
}

fn build_skills(page: &mut PageModel, config: &SiteConfig) {
    page.append_child("skills", ids::SKILLS_GRID, "div");
    let mut cards = Vec::new();
    for (i, category) in config.skills.iter().enumerate() {
        let id = ids::skill_category(i);
        page.append_child(ids::SKILLS_GRID, &id, "div");
        page.add_class(&id, classes::SKILL_CATEGORY);
        for (j, skill) in category.items.iter().enumerate() {
            let bar = ids::skill_bar(i, j);
            page.append_child(&id, &bar, "div");
            page.add_class(&bar, classes::SKILL_PROGRESS);
            page.set_attribute(&bar, "data-width", &format!("{}%", skill.level));
        }
        cards.push(id);
    }
    place_grid(page, "skills", &cards);
}

fn build_projects(page: &mut PageModel, catalog: &Catalog) {
    page.append_child("projects", ids::FILTER_BAR, "div");
    let tags = std::iter::once(ALL_CATEGORIES).chain(catalog.categories());
    for tag in tags {
        let id = ids::filter_button(tag);
        page.append_child(ids::FILTER_BAR, &id, "button");
        page.add_class(&id, classes::FILTER_BUTTON);
        page.set_attribute(&id, "data-filter", tag);
        page.set_text(&id, &filter_label(tag));
    }
    page.add_class(&ids::filter_button(ALL_CATEGORIES), classes::ACTIVE);

    page.append_child("projects", ids::PROJECTS_GRID, "div");
    let mut cards = Vec::new();
    for project in catalog.projects() {
        let id = ids::project_card(&project.id);
        page.append_child(ids::PROJECTS_GRID, &id, "div");
        page.add_class(&id, classes::PROJECT_CARD);
        page.set_attribute(&id, "data-category", &project.category_attr());
        page.set_attribute(&id, "data-project", &project.id);
        cards.push(id);
    }
    place_grid(page, "projects", &cards);
}

fn build_experience(page: &mut PageModel, config: &SiteConfig) {
    page.append_child("experience", ids::TIMELINE, "div");
    let mut items = Vec::new();
    for (i, entry) in config.experience.iter().enumerate() {
        let id = ids::timeline_item(i);
        page.append_child(ids::TIMELINE, &id, "div");
        page.add_class(&id, classes::TIMELINE_ITEM);
        page.set_text(&id, &entry.role);
        items.push(id);
    }
    place_grid(page, "experience", &items);
}

fn build_certifications(page: &mut PageModel, config: &SiteConfig) {
    page.append_child("certifications", ids::CERT_GRID, "div");
    let mut cards = Vec::new();
    for (i, cert) in config.certifications.iter().enumerate() {
        let id = ids::cert_card(i);
        page.append_child(ids::CERT_GRID, &id, "div");
        page.add_class(&id, classes::CERT_CARD);
        page.set_text(&id, &cert.name);
        cards.push(id);
    }
    place_grid(page, "certifications", &cards);
}

fn build_contact(page: &mut PageModel) {
    page.append_child("contact", ids::CONTACT_FORM, "form");
    for field in FIELDS {
        let id = ids::contact_field(field);
        let tag = if field == "message" { "textarea" } else { "input" };
        page.append_child(ids::CONTACT_FORM, &id, tag);
        page.set_attribute(&id, "name", field);
        page.set_attribute(&id, "value", "");
    }
    page.append_child(ids::CONTACT_FORM, ids::SUBMIT_BUTTON, "button");
    page.add_class(ids::SUBMIT_BUTTON, "btn-submit");
}

fn build_modals(page: &mut PageModel) {
    page.append_child(ids::BODY, ids::PROJECT_MODAL, "div");
    page.add_class(ids::PROJECT_MODAL, "modal");
    page.append_child(ids::PROJECT_MODAL, "projectModalContent", "div");
    page.append_child("projectModalContent", ids::MODAL_TITLE, "h2");
    page.append_child("projectModalContent", ids::MODAL_BODY, "div");

    page.append_child(ids::BODY, ids::GALLERY_MODAL, "div");
    page.add_class(ids::GALLERY_MODAL, "modal");
    page.append_child(ids::GALLERY_MODAL, "galleryModalContent", "div");
    page.append_child("galleryModalContent", ids::GALLERY_CONTAINER, "div");
    page.append_child("galleryModalContent", ids::CURRENT_SLIDE, "span");
    page.append_child("galleryModalContent", ids::TOTAL_SLIDES, "span");
    page.append_child("galleryModalContent", ids::GALLERY_DOTS, "div");
}

fn build_whatsapp(page: &mut PageModel, config: &SiteConfig) {
    page.append_child(ids::BODY, "whatsapp-widget", "div");
    page.append_child("whatsapp-widget", ids::WHATSAPP_POPUP, "div");
    page.add_class(ids::WHATSAPP_POPUP, "whatsapp-popup");
    page.append_child(ids::WHATSAPP_POPUP, ids::WHATSAPP_CLOSE, "button");
    page.add_class(ids::WHATSAPP_CLOSE, "whatsapp-close");
    page.append_child(ids::WHATSAPP_POPUP, "whatsapp-chat", "a");
    page.set_attribute("whatsapp-chat", "href", &config.whatsapp.chat_url());
    page.append_child("whatsapp-widget", ids::WHATSAPP_FLOAT, "a");
    page.add_class(ids::WHATSAPP_FLOAT, "whatsapp-float");
    page.append_child(ids::WHATSAPP_FLOAT, "whatsapp-icon", "i");
    page.set_attribute("whatsapp-icon", "class", "fab fa-whatsapp");
}

/// Give `items` card bounds inside `section`, three per row.
fn place_grid(page: &mut PageModel, section: &str, items: &[String]) {
    let Some(bounds) = page.bounds(section) else {
        return;
    };
    for (i, id) in items.iter().enumerate() {
        let row = (i / GRID_COLUMNS) as f64;
        let top = bounds.top + GRID_OFFSET + row * (CARD_HEIGHT + ROW_GAP);
        page.set_bounds(id, Rect::new(top, CARD_HEIGHT));
    }
}

/// Navigation label for a section id.
pub fn section_label(section: &str) -> String {
    let mut chars = section.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Button label for a filter tag.
pub fn filter_label(tag: &str) -> String {
    if tag == ALL_CATEGORIES {
        "All Projects".to_string()
    } else {
        section_label(tag)
    }
}
