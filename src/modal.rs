//! Project details modal and the image gallery modal.
//!
//! Both modals are closed/open state machines keyed off the `active` class on
//! their root element. The gallery additionally owns a [`GalleryState`] while
//! open; it is dropped on close.

use crate::catalog::{Catalog, Project};
use crate::view::{Surface, classes, ids};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalKind {
    Project,
    Gallery,
}

impl ModalKind {
    pub fn element_id(self) -> &'static str {
        match self {
            ModalKind::Project => ids::PROJECT_MODAL,
            ModalKind::Gallery => ids::GALLERY_MODAL,
        }
    }
}

/// Slide position within the open gallery. The index wraps in both directions.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryState {
    pub project_id: String,
    pub images: Vec<String>,
    pub index: usize,
}

impl GalleryState {
    /// `None` for an empty image list.
    pub fn new(project_id: &str, images: Vec<String>) -> Option<Self> {
        if images.is_empty() {
            return None;
        }
        Some(Self {
            project_id: project_id.to_string(),
            images,
            index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1) % self.images.len();
    }

    pub fn previous(&mut self) {
        self.index = (self.index + self.images.len() - 1) % self.images.len();
    }

    /// Jump to `index` if it is in range.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// The counter text, 1-based.
    pub fn counter_label(&self) -> String {
        format!("{}/{}", self.index + 1, self.images.len())
    }

    pub fn transform(&self) -> String {
        format!("translateX({}%)", -(self.index as i64) * 100)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    project: Option<String>,
    gallery: Option<GalleryState>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the project shown in the details modal.
    pub fn open_project_id(&self) -> Option<&str> {
        self.project.as_deref()
    }

    pub fn gallery(&self) -> Option<&GalleryState> {
        self.gallery.as_ref()
    }

    pub fn is_open(&self, kind: ModalKind) -> bool {
        match kind {
            ModalKind::Project => self.project.is_some(),
            ModalKind::Gallery => self.gallery.is_some(),
        }
    }

    /// Fill the details modal from the project record and open it.
    /// Unknown ids leave the modal as it was.
    pub fn open_project(&mut self, surface: &mut dyn Surface, catalog: &Catalog, id: &str) -> bool {
        let Some(project) = catalog.get(id) else {
            debug!(id, "open_project: unknown project");
            return false;
        };
        surface.set_text(ids::MODAL_TITLE, &project.title);
        render_project_body(surface, project);
        surface.add_class(ids::PROJECT_MODAL, classes::ACTIVE);
        self.project = Some(project.id.clone());
        debug!(id, "project modal opened");
        true
    }

    pub fn close_project(&mut self, surface: &mut dyn Surface) {
        surface.remove_class(ids::PROJECT_MODAL, classes::ACTIVE);
        if self.project.take().is_some() {
            debug!("project modal closed");
        }
    }

    /// Load the project's images and open the gallery at the first slide.
    /// Unknown ids and projects without images leave the gallery closed.
    pub fn open_gallery(&mut self, surface: &mut dyn Surface, catalog: &Catalog, id: &str) -> bool {
        let Some(project) = catalog.get(id) else {
            debug!(id, "open_gallery: unknown project");
            return false;
        };
        let Some(state) = GalleryState::new(&project.id, project.image_paths()) else {
            debug!(id, "open_gallery: no images");
            return false;
        };

        surface.set_text(ids::TOTAL_SLIDES, &state.len().to_string());
        surface.clear_children(ids::GALLERY_CONTAINER);
        surface.clear_children(ids::GALLERY_DOTS);
        for (i, src) in state.images.iter().enumerate() {
            let slide = ids::gallery_slide(i);
            surface.append_child(ids::GALLERY_CONTAINER, &slide, "div");
            surface.add_class(&slide, classes::GALLERY_SLIDE);
            let image = ids::gallery_image(i);
            surface.append_child(&slide, &image, "img");
            surface.set_attribute(&image, "src", src);
            surface.set_attribute(&image, "alt", &project.title);
            surface.set_attribute(&image, "loading", if i == 0 { "eager" } else { "lazy" });

            let dot = ids::gallery_dot(i);
            surface.append_child(ids::GALLERY_DOTS, &dot, "button");
            surface.add_class(&dot, classes::GALLERY_DOT);
            surface.set_attribute(&dot, "data-index", &i.to_string());
        }
        render_position(surface, &state);
        surface.add_class(ids::GALLERY_MODAL, classes::ACTIVE);
        debug!(id, slides = state.len(), "gallery opened");
        self.gallery = Some(state);
        true
    }

    /// Close the gallery. Returns whether it was open.
    pub fn close_gallery(&mut self, surface: &mut dyn Surface) -> bool {
        surface.remove_class(ids::GALLERY_MODAL, classes::ACTIVE);
        let was_open = self.gallery.take().is_some();
        if was_open {
            debug!("gallery closed");
        }
        was_open
    }

    pub fn next_slide(&mut self, surface: &mut dyn Surface) {
        self.move_slide(surface, GalleryState::next);
    }

    pub fn previous_slide(&mut self, surface: &mut dyn Surface) {
        self.move_slide(surface, GalleryState::previous);
    }

    /// Jump to a slide. Out-of-range indices are ignored.
    pub fn go_to_slide(&mut self, surface: &mut dyn Surface, index: usize) -> bool {
        let Some(state) = self.gallery.as_mut() else {
            return false;
        };
        if !state.go_to(index) {
            return false;
        }
        render_position(surface, state);
        true
    }

    fn move_slide(&mut self, surface: &mut dyn Surface, step: fn(&mut GalleryState)) {
        if let Some(state) = self.gallery.as_mut() {
            step(state);
            render_position(surface, state);
        }
    }

    /// A click that landed on `target`. Only a click on a modal's own backdrop
    /// element closes it; clicks on the content panel do not.
    pub fn backdrop_click(&mut self, surface: &mut dyn Surface, target: &str) -> Option<ModalKind> {
        let kind = [ModalKind::Project, ModalKind::Gallery]
            .into_iter()
            .find(|kind| kind.element_id() == target && self.is_open(*kind))?;
        match kind {
            ModalKind::Project => self.close_project(surface),
            ModalKind::Gallery => {
                self.close_gallery(surface);
            }
        }
        Some(kind)
    }
}

fn render_project_body(surface: &mut dyn Surface, project: &Project) {
    surface.clear_children(ids::MODAL_BODY);

    surface.append_child(ids::MODAL_BODY, "modal-description", "p");
    surface.add_class("modal-description", "project-description");
    surface.set_text("modal-description", &project.description);

    surface.append_child(ids::MODAL_BODY, "modal-features", "ul");
    surface.add_class("modal-features", "feature-list");
    for (i, feature) in project.features.iter().enumerate() {
        let id = format!("modal-feature-{i}");
        surface.append_child("modal-features", &id, "li");
        surface.set_text(&id, feature);
    }

    surface.append_child(ids::MODAL_BODY, "modal-tech", "div");
    surface.add_class("modal-tech", "tech-tags");
    for (i, tech) in project.technologies.iter().enumerate() {
        let id = format!("modal-tech-{i}");
        surface.append_child("modal-tech", &id, "span");
        surface.add_class(&id, "tech-tag");
        surface.set_text(&id, tech);
    }

    if let Some(url) = &project.live_url {
        surface.append_child(ids::MODAL_BODY, "modal-live-link", "a");
        surface.set_attribute("modal-live-link", "href", url);
        surface.set_attribute("modal-live-link", "target", "_blank");
        surface.set_attribute("modal-live-link", "rel", "noopener");
        surface.add_class("modal-live-link", "btn");
        surface.add_class("modal-live-link", "btn-primary");
        surface.set_text("modal-live-link", "View Live Project");
    }
}

/// Counter, strip offset and dot for the current index.
fn render_position(surface: &mut dyn Surface, state: &GalleryState) {
    surface.set_text(ids::CURRENT_SLIDE, &(state.index + 1).to_string());
    surface.set_style(ids::GALLERY_CONTAINER, "transform", &state.transform());
    for i in 0..state.len() {
        surface.set_class(&ids::gallery_dot(i), classes::ACTIVE, i == state.index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_catalog, sample_page};
    use crate::view::PageModel;

    fn open_gallery(page: &mut PageModel, id: &str) -> ModalController {
        let mut modal = ModalController::new();
        assert!(modal.open_gallery(page, &sample_catalog(), id));
        modal
    }

    fn displayed_index(page: &PageModel) -> usize {
        let shown: usize = page.text(ids::CURRENT_SLIDE).unwrap().parse().unwrap();
        shown - 1
    }

    fn active_dots(page: &PageModel) -> Vec<String> {
        page.elements_with_class(classes::GALLERY_DOT)
            .into_iter()
            .filter(|d| page.has_class(d, classes::ACTIVE))
            .collect()
    }

    #[test]
    fn gallery_state_wraps_both_ways() {
        let mut state = GalleryState::new("p", vec!["a".into(), "b".into(), "c".into()]).unwrap();
        state.previous();
        assert_eq!(state.index, 2);
        state.next();
        assert_eq!(state.index, 0);
        assert_eq!(state.counter_label(), "1/3");
        assert!(!state.go_to(3));
        assert!(state.go_to(2));
        assert_eq!(state.transform(), "translateX(-200%)");
    }

    #[test]
    fn gallery_state_rejects_empty() {
        assert!(GalleryState::new("p", Vec::new()).is_none());
    }

    #[test]
    fn open_project_fills_content() {
        let mut page = sample_page();
        let catalog = sample_catalog();
        let mut modal = ModalController::new();
        assert!(modal.open_project(&mut page, &catalog, "altair"));
        let project = catalog.get("altair").unwrap();

        assert!(page.has_class(ids::PROJECT_MODAL, classes::ACTIVE));
        assert_eq!(page.text(ids::MODAL_TITLE), Some(project.title.clone()));
        assert_eq!(page.text("modal-description"), Some(project.description.clone()));
        assert_eq!(page.children("modal-features").len(), project.features.len());
        assert_eq!(page.children("modal-tech").len(), project.technologies.len());
        assert_eq!(modal.open_project_id(), Some("altair"));
    }

    #[test]
    fn live_link_only_when_url_present() {
        let mut page = sample_page();
        let catalog = sample_catalog();
        let mut modal = ModalController::new();

        let with_url = catalog.projects().iter().find(|p| p.live_url.is_some()).unwrap();
        modal.open_project(&mut page, &catalog, &with_url.id);
        assert_eq!(page.attribute("modal-live-link", "href"), with_url.live_url.clone());

        let without = catalog.projects().iter().find(|p| p.live_url.is_none()).unwrap();
        modal.open_project(&mut page, &catalog, &without.id);
        assert!(!page.exists("modal-live-link"));
    }

    #[test]
    fn unknown_project_stays_closed() {
        let mut page = sample_page();
        let mut modal = ModalController::new();
        assert!(!modal.open_project(&mut page, &sample_catalog(), "ghost"));
        assert!(!page.has_class(ids::PROJECT_MODAL, classes::ACTIVE));
        assert!(!modal.is_open(ModalKind::Project));
    }

    #[test]
    fn close_project_is_unconditional() {
        let mut page = sample_page();
        let mut modal = ModalController::new();
        modal.close_project(&mut page);
        assert!(!modal.is_open(ModalKind::Project));
        modal.open_project(&mut page, &sample_catalog(), "olx");
        modal.close_project(&mut page);
        assert!(!page.has_class(ids::PROJECT_MODAL, classes::ACTIVE));
    }

    #[test]
    fn open_gallery_renders_slides_and_dots() {
        let mut page = sample_page();
        let catalog = sample_catalog();
        let modal = open_gallery(&mut page, "altair");
        let images = catalog.get("altair").unwrap().image_paths();

        assert!(page.has_class(ids::GALLERY_MODAL, classes::ACTIVE));
        assert_eq!(page.text(ids::CURRENT_SLIDE).as_deref(), Some("1"));
        assert_eq!(page.text(ids::TOTAL_SLIDES), Some(images.len().to_string()));
        assert_eq!(page.children(ids::GALLERY_CONTAINER).len(), images.len());
        assert_eq!(active_dots(&page), vec![ids::gallery_dot(0)]);
        assert_eq!(
            page.attribute(&ids::gallery_image(0), "loading").as_deref(),
            Some("eager")
        );
        assert_eq!(
            page.attribute(&ids::gallery_image(1), "loading").as_deref(),
            Some("lazy")
        );
        assert_eq!(page.attribute(&ids::gallery_image(1), "src"), Some(images[1].clone()));
        assert_eq!(modal.gallery().unwrap().index, 0);
    }

    #[test]
    fn empty_gallery_stays_closed() {
        let mut page = sample_page();
        let mut modal = ModalController::new();
        assert!(!modal.open_gallery(&mut page, &sample_catalog(), "notes"));
        assert!(!page.has_class(ids::GALLERY_MODAL, classes::ACTIVE));
        assert!(modal.gallery().is_none());
    }

    #[test]
    fn go_to_every_valid_index_displays_it() {
        let mut page = sample_page();
        let mut modal = open_gallery(&mut page, "altair");
        let len = modal.gallery().unwrap().len();
        for i in (0..len).rev() {
            assert!(modal.go_to_slide(&mut page, i));
            assert_eq!(displayed_index(&page), i);
            assert_eq!(
                page.style(ids::GALLERY_CONTAINER, "transform"),
                Some(format!("translateX({}%)", -(i as i64) * 100))
            );
            assert_eq!(active_dots(&page), vec![ids::gallery_dot(i)]);
        }
    }

    #[test]
    fn go_to_out_of_range_is_noop() {
        let mut page = sample_page();
        let mut modal = open_gallery(&mut page, "altair");
        modal.go_to_slide(&mut page, 1);
        let len = modal.gallery().unwrap().len();
        assert!(!modal.go_to_slide(&mut page, len));
        assert_eq!(displayed_index(&page), 1);
    }

    #[test]
    fn next_at_last_wraps_to_first() {
        let mut page = sample_page();
        let mut modal = open_gallery(&mut page, "altair");
        let last = modal.gallery().unwrap().len() - 1;
        modal.go_to_slide(&mut page, last);
        modal.next_slide(&mut page);
        assert_eq!(displayed_index(&page), 0);
    }

    #[test]
    fn previous_at_first_wraps_to_last() {
        let mut page = sample_page();
        let mut modal = open_gallery(&mut page, "altair");
        let last = modal.gallery().unwrap().len() - 1;
        modal.previous_slide(&mut page);
        assert_eq!(displayed_index(&page), last);
        assert_eq!(active_dots(&page), vec![ids::gallery_dot(last)]);
    }

    #[test]
    fn reopening_resets_to_first_slide() {
        let mut page = sample_page();
        let catalog = sample_catalog();
        let mut modal = open_gallery(&mut page, "altair");
        modal.go_to_slide(&mut page, 2);
        modal.close_gallery(&mut page);
        assert!(modal.open_gallery(&mut page, &catalog, "yacht"));
        assert_eq!(displayed_index(&page), 0);
        assert_eq!(
            page.style(ids::GALLERY_CONTAINER, "transform").as_deref(),
            Some("translateX(0%)")
        );
        let yacht = catalog.get("yacht").unwrap().images.len();
        assert_eq!(page.children(ids::GALLERY_DOTS).len(), yacht);
    }

    #[test]
    fn slide_navigation_without_gallery_is_noop() {
        let mut page = sample_page();
        let mut modal = ModalController::new();
        modal.next_slide(&mut page);
        assert!(!modal.go_to_slide(&mut page, 0));
        assert!(modal.gallery().is_none());
    }

    #[test]
    fn backdrop_click_closes_only_on_backdrop() {
        let mut page = sample_page();
        let mut modal = ModalController::new();
        modal.open_project(&mut page, &sample_catalog(), "altair");
        assert_eq!(modal.backdrop_click(&mut page, ids::MODAL_BODY), None);
        assert!(modal.is_open(ModalKind::Project));
        assert_eq!(
            modal.backdrop_click(&mut page, ids::PROJECT_MODAL),
            Some(ModalKind::Project)
        );
        assert!(!page.has_class(ids::PROJECT_MODAL, classes::ACTIVE));
    }
}
