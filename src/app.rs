//! The `Portfolio` coordinator: events in, surface mutations and timers out.
//!
//! Every user interaction arrives as an [`Event`]. The coordinator looks up the
//! listeners registered for the event's [`EventKind`] and calls them in
//! registration order. Listeners are named, so they can be removed again: the
//! gallery's keyboard listener exists only while the gallery is open, the same
//! way the page script attaches and detaches its `keydown` handler.
//!
//! Controllers return the delayed work their state change implies. The
//! coordinator wraps it in a [`Task`] and puts it on its [`Timeline`];
//! [`Portfolio::advance`] moves the virtual clock and runs whatever fell due.
//!
//! ```text
//! Event ──► listeners[kind] ──► controller ──► Surface
//!                                   │
//!                                   └──► Deferred<XTask> ──► Timeline<Task>
//!                                                              │
//!                       advance(ms) ◄─────────────────────────┘
//! ```

use crate::animation::{AnimationScheduler, AnimationTask};
use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::contact::{ContactFormHandler, ContactTask, FormFields, SimulatedBackend, Submitter};
use crate::filter::ProjectFilter;
use crate::modal::{ModalController, ModalKind};
use crate::navigation::NavigationController;
use crate::notify::{Notice, NotificationCenter, NotifyTask, Toast};
use crate::popup::{ChatPopup, PopupTask};
use crate::theme::{MemoryStorage, Storage, ThemePreference, ThemeStore};
use crate::timeline::{Deferred, Timeline};
use crate::view::{PageLayout, PageModel, Surface, build_page, classes, ids};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

pub const ESCAPE: &str = "Escape";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";

/// Name of the keyboard listener that only exists while the gallery is open.
pub const GALLERY_KEYS: &str = "gallery-keys";

/// A user interaction or window event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Window load finished.
    Load,
    Scroll {
        y: f64,
    },
    Resize {
        width: f64,
        #[serde(default)]
        height: Option<f64>,
    },
    ToggleMenu,
    ToggleTheme,
    /// Click on an in-page anchor. `link` is the id of the clicked element,
    /// when it has one.
    AnchorClick {
        href: String,
        #[serde(default)]
        link: Option<String>,
    },
    SelectFilter {
        filter: String,
    },
    OpenProject {
        id: String,
    },
    CloseProject,
    OpenGallery {
        id: String,
    },
    CloseGallery,
    NextSlide,
    PreviousSlide,
    GoToSlide {
        index: usize,
    },
    /// Click whose target is the element `target`.
    BackdropClick {
        target: String,
    },
    Key {
        key: String,
    },
    SetField {
        field: String,
        value: String,
    },
    Submit,
    DismissNotification {
        id: String,
    },
    /// Plain click on the element `target`.
    Click {
        target: String,
    },
    MouseEnter {
        target: String,
    },
    MouseLeave {
        target: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Load,
    Scroll,
    Resize,
    ToggleMenu,
    ToggleTheme,
    AnchorClick,
    SelectFilter,
    OpenProject,
    CloseProject,
    OpenGallery,
    CloseGallery,
    NextSlide,
    PreviousSlide,
    GoToSlide,
    BackdropClick,
    Key,
    SetField,
    Submit,
    DismissNotification,
    Click,
    MouseEnter,
    MouseLeave,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Load => EventKind::Load,
            Event::Scroll { .. } => EventKind::Scroll,
            Event::Resize { .. } => EventKind::Resize,
            Event::ToggleMenu => EventKind::ToggleMenu,
            Event::ToggleTheme => EventKind::ToggleTheme,
            Event::AnchorClick { .. } => EventKind::AnchorClick,
            Event::SelectFilter { .. } => EventKind::SelectFilter,
            Event::OpenProject { .. } => EventKind::OpenProject,
            Event::CloseProject => EventKind::CloseProject,
            Event::OpenGallery { .. } => EventKind::OpenGallery,
            Event::CloseGallery => EventKind::CloseGallery,
            Event::NextSlide => EventKind::NextSlide,
            Event::PreviousSlide => EventKind::PreviousSlide,
            Event::GoToSlide { .. } => EventKind::GoToSlide,
            Event::BackdropClick { .. } => EventKind::BackdropClick,
            Event::Key { .. } => EventKind::Key,
            Event::SetField { .. } => EventKind::SetField,
            Event::Submit => EventKind::Submit,
            Event::DismissNotification { .. } => EventKind::DismissNotification,
            Event::Click { .. } => EventKind::Click,
            Event::MouseEnter { .. } => EventKind::MouseEnter,
            Event::MouseLeave { .. } => EventKind::MouseLeave,
        }
    }
}

/// Delayed work, tagged with the controller that runs it.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    Animation(AnimationTask),
    Notify(NotifyTask),
    Contact(ContactTask),
    Popup(PopupTask),
}

pub type Handler<S> = fn(&mut Portfolio<S>, &Event);

/// Slide position of the open gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GallerySnapshot {
    pub project: String,
    pub index: usize,
    pub total: usize,
}

/// Observable view state at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub time_ms: u64,
    pub scroll_y: f64,
    pub theme: ThemePreference,
    pub menu_open: bool,
    pub navbar_scrolled: bool,
    pub active_section: Option<String>,
    pub loading_screen_hidden: bool,
    pub filter: String,
    pub visible_projects: Vec<String>,
    pub project_modal: Option<String>,
    pub gallery: Option<GallerySnapshot>,
    pub typewriter: String,
    pub title: String,
    pub counters: Vec<String>,
    pub revealed: usize,
    pub observed: usize,
    pub submitting: bool,
    pub fields: FormFields,
    pub notifications: Vec<Toast>,
    pub chat_popup_open: bool,
    pub pending_timers: usize,
}

pub struct Portfolio<S: Surface> {
    surface: S,
    catalog: Catalog,
    timeline: Timeline<Task>,
    theme: ThemeStore,
    navigation: NavigationController,
    animation: AnimationScheduler,
    filter: ProjectFilter,
    modal: ModalController,
    notifications: NotificationCenter,
    contact: ContactFormHandler,
    popup: ChatPopup,
    submitter: Box<dyn Submitter>,
    listeners: BTreeMap<EventKind, Vec<(&'static str, Handler<S>)>>,
}

impl Portfolio<PageModel> {
    /// A coordinator over a freshly built page, with in-memory theme storage
    /// and the simulated backend.
    pub fn headless(config: &SiteConfig, catalog: Catalog, layout: &PageLayout) -> Self {
        let page = build_page(config, &catalog, layout);
        let backend = SimulatedBackend::new(config.contact.latency_ms);
        Self::new(
            page,
            config,
            catalog,
            Box::new(MemoryStorage::new()),
            Box::new(backend),
        )
    }
}

impl<S: Surface> Portfolio<S> {
    /// Wire every controller to `surface`, apply the stored theme, start the
    /// hero effects and run the first visibility check.
    pub fn new(
        mut surface: S,
        config: &SiteConfig,
        catalog: Catalog,
        storage: Box<dyn Storage>,
        submitter: Box<dyn Submitter>,
    ) -> Self {
        let mut theme = ThemeStore::new(storage);
        theme.init(&mut surface);
        let animation = AnimationScheduler::new(
            config.animation.clone(),
            config.site.roles.clone(),
            &mut surface,
        );

        let popup = ChatPopup::new(config.whatsapp.clone(), &surface);

        let mut app = Self {
            surface,
            catalog,
            timeline: Timeline::new(),
            theme,
            navigation: NavigationController::new(config.navigation.clone()),
            animation,
            filter: ProjectFilter::new(),
            modal: ModalController::new(),
            notifications: NotificationCenter::new(config.notifications.clone()),
            contact: ContactFormHandler::new(),
            popup,
            submitter,
            listeners: BTreeMap::new(),
        };
        app.install_listeners();

        let start = app.animation.start();
        app.schedule(start, Task::Animation);
        let popup = app.popup.start();
        app.schedule(popup, Task::Popup);
        app.reveal_visible();
        app
    }

    fn install_listeners(&mut self) {
        self.listen(EventKind::Load, "loading-screen", on_load);
        self.listen(EventKind::Load, "active-link", on_scroll);
        self.listen(EventKind::Scroll, "navbar", on_scroll);
        self.listen(EventKind::Scroll, "reveal", on_visibility_change);
        self.listen(EventKind::Resize, "mobile-menu", on_resize);
        self.listen(EventKind::Resize, "reveal", on_visibility_change);
        self.listen(EventKind::ToggleMenu, "hamburger", on_toggle_menu);
        self.listen(EventKind::ToggleTheme, "theme-toggle", on_toggle_theme);
        self.listen(EventKind::AnchorClick, "smooth-scroll", on_anchor_click);
        self.listen(EventKind::AnchorClick, "nav-link", on_nav_link_click);
        self.listen(EventKind::SelectFilter, "project-filter", on_select_filter);
        self.listen(EventKind::OpenProject, "project-modal", on_open_project);
        self.listen(EventKind::CloseProject, "project-modal", on_close_project);
        self.listen(EventKind::OpenGallery, "gallery", on_open_gallery);
        self.listen(EventKind::CloseGallery, "gallery", on_close_gallery);
        self.listen(EventKind::NextSlide, "gallery-controls", on_slide);
        self.listen(EventKind::PreviousSlide, "gallery-controls", on_slide);
        self.listen(EventKind::GoToSlide, "gallery-controls", on_slide);
        self.listen(EventKind::BackdropClick, "modal-backdrop", on_backdrop_click);
        self.listen(EventKind::Key, "keyboard", on_key);
        self.listen(EventKind::SetField, "contact-form", on_set_field);
        self.listen(EventKind::Submit, "contact-form", on_submit);
        self.listen(EventKind::DismissNotification, "notification-close", on_dismiss);
        self.listen(EventKind::Click, "whatsapp-float", on_whatsapp_click);
        self.listen(EventKind::Click, "whatsapp-outside", on_document_click);
        self.listen(EventKind::BackdropClick, "whatsapp-outside", on_document_click);
        self.listen(EventKind::AnchorClick, "whatsapp-outside", on_document_click);
        self.listen(EventKind::MouseEnter, "whatsapp-hover", on_popup_hover);
        self.listen(EventKind::MouseLeave, "whatsapp-hover", on_popup_hover);
    }

    /// Register `handler` under `name`. A name already registered for `kind`
    /// is left as it is.
    pub fn listen(&mut self, kind: EventKind, name: &'static str, handler: Handler<S>) {
        let entries = self.listeners.entry(kind).or_default();
        if entries.iter().any(|(n, _)| *n == name) {
            return;
        }
        trace!(?kind, listener = name, "listener added");
        entries.push((name, handler));
    }

    pub fn unlisten(&mut self, kind: EventKind, name: &str) {
        if let Some(entries) = self.listeners.get_mut(&kind) {
            entries.retain(|(n, _)| *n != name);
        }
    }

    pub fn is_listening(&self, kind: EventKind, name: &str) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|entries| entries.iter().any(|(n, _)| *n == name))
    }

    /// Listener names for `kind`, in call order.
    pub fn listener_names(&self, kind: EventKind) -> Vec<&'static str> {
        self.listeners
            .get(&kind)
            .map(|entries| entries.iter().map(|(n, _)| *n).collect())
            .unwrap_or_default()
    }

    /// Deliver `event` to its listeners.
    ///
    /// The listener list is captured before the first call. A listener removed
    /// by an earlier one in the same dispatch is skipped; one added during the
    /// dispatch waits for the next event.
    pub fn dispatch(&mut self, event: &Event) {
        self.apply_geometry(event);
        let kind = event.kind();
        let handlers = self.listeners.get(&kind).cloned().unwrap_or_default();
        debug!(?kind, listeners = handlers.len(), "dispatch");
        for (name, handler) in handlers {
            if self.is_listening(kind, name) {
                handler(self, event);
            }
        }
    }

    /// Scroll and resize events carry the new window geometry.
    fn apply_geometry(&mut self, event: &Event) {
        let mut viewport = self.surface.viewport();
        match event {
            Event::Scroll { y } => viewport.scroll_y = y.max(0.0),
            Event::Resize { width, height } => {
                viewport.width = *width;
                if let Some(height) = height {
                    viewport.height = *height;
                }
            }
            _ => return,
        }
        self.surface.set_viewport(viewport);
    }

    /// Move the virtual clock forward by `ms`, running every task that falls
    /// due on the way, follow-ups included.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timeline.now().saturating_add(ms);
        while let Some(task) = self.timeline.pop_due(until) {
            self.run_task(task);
        }
        self.timeline.settle(until);
    }

    fn run_task(&mut self, task: Task) {
        trace!(now = self.timeline.now(), ?task, "timer");
        match task {
            Task::Animation(task) => {
                let follow = self.animation.run(&mut self.surface, task);
                self.schedule(follow, Task::Animation);
            }
            Task::Notify(task) => {
                let follow = self.notifications.run(&mut self.surface, task);
                self.schedule(follow, Task::Notify);
            }
            Task::Contact(task) => {
                let notice = self.contact.run(&mut self.surface, task);
                self.show_notification(notice);
            }
            Task::Popup(task) => {
                let follow = self.popup.run(&mut self.surface, task);
                self.schedule(follow, Task::Popup);
            }
        }
    }

    fn schedule<T>(&mut self, deferred: impl IntoIterator<Item = Deferred<T>>, wrap: fn(T) -> Task) {
        self.timeline
            .schedule_all(deferred.into_iter().map(|d| d.map(wrap)));
    }

    /// Show a toast. Returns its element id.
    pub fn show_notification(&mut self, notice: Notice) -> String {
        let (id, tasks) = self.notifications.show(&mut self.surface, notice);
        self.schedule(tasks, Task::Notify);
        id
    }

    fn close_gallery(&mut self) {
        self.modal.close_gallery(&mut self.surface);
        self.unlisten(EventKind::Key, GALLERY_KEYS);
    }

    fn reveal_visible(&mut self) {
        let reveals = self.animation.check_visibility(&mut self.surface);
        self.schedule(reveals, Task::Animation);
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn now(&self) -> u64 {
        self.timeline.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.timeline.pending()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn filter(&self) -> &ProjectFilter {
        &self.filter
    }

    pub fn animation(&self) -> &AnimationScheduler {
        &self.animation
    }

    pub fn notifications(&self) -> &[Toast] {
        self.notifications.toasts()
    }

    pub fn contact(&self) -> &ContactFormHandler {
        &self.contact
    }

    pub fn popup(&self) -> &ChatPopup {
        &self.popup
    }

    pub fn snapshot(&self) -> Snapshot {
        let surface = &self.surface;
        let active_section = surface
            .elements_with_class(classes::NAV_LINK)
            .into_iter()
            .find(|l| surface.has_class(l, classes::ACTIVE))
            .and_then(|l| surface.attribute(&l, "href"))
            .map(|href| href.trim_start_matches('#').to_string());
        let visible_projects = self
            .filter
            .visible_cards(surface)
            .iter()
            .filter_map(|card| surface.attribute(card, "data-project"))
            .collect();
        let gallery = self.modal.gallery().map(|g| GallerySnapshot {
            project: g.project_id.clone(),
            index: g.index,
            total: g.len(),
        });
        let counters = surface
            .elements_with_class(classes::STAT_NUMBER)
            .iter()
            .map(|id| surface.text(id).unwrap_or_default())
            .collect();

        Snapshot {
            time_ms: self.timeline.now(),
            scroll_y: surface.viewport().scroll_y,
            theme: self.theme.current(),
            menu_open: self.navigation.is_menu_open(surface),
            navbar_scrolled: surface.has_class(ids::NAVBAR, classes::SCROLLED),
            active_section,
            loading_screen_hidden: surface.has_class(ids::LOADING_SCREEN, classes::HIDDEN),
            filter: self.filter.active().to_string(),
            visible_projects,
            project_modal: self.modal.open_project_id().map(str::to_string),
            gallery,
            typewriter: surface.text(ids::TYPEWRITER).unwrap_or_default(),
            title: surface.text(ids::DYNAMIC_TITLE).unwrap_or_default(),
            counters,
            revealed: self.animation.revealed_count(),
            observed: self.animation.observed().len(),
            submitting: self.contact.is_submitting(),
            fields: self.contact.fields(surface),
            notifications: self.notifications.toasts().to_vec(),
            chat_popup_open: self.popup.is_open(),
            pending_timers: self.timeline.pending(),
        }
    }
}

// ============================================================================
// Listeners
// ============================================================================

fn on_load<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    let tasks = app.animation.on_load();
    app.schedule(tasks, Task::Animation);
}

fn on_scroll<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.navigation.on_scroll(&mut app.surface);
}

fn on_visibility_change<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.reveal_visible();
}

fn on_resize<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.navigation.on_resize(&mut app.surface);
}

fn on_toggle_menu<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.navigation.toggle_menu(&mut app.surface);
}

fn on_toggle_theme<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.theme.toggle(&mut app.surface);
}

/// A followed anchor moves the window, which the page sees as a scroll.
fn on_anchor_click<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    let Event::AnchorClick { href, .. } = event else {
        return;
    };
    if app.navigation.follow_anchor(&mut app.surface, href) {
        let y = app.surface.viewport().scroll_y;
        app.dispatch(&Event::Scroll { y });
    }
}

fn on_nav_link_click<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    if let Event::AnchorClick {
        link: Some(link), ..
    } = event
    {
        app.navigation.on_menu_click(&mut app.surface, link);
    }
}

fn on_select_filter<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    if let Event::SelectFilter { filter } = event {
        app.filter.select(&mut app.surface, filter);
    }
}

fn on_open_project<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    if let Event::OpenProject { id } = event {
        app.modal.open_project(&mut app.surface, &app.catalog, id);
    }
}

fn on_close_project<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.modal.close_project(&mut app.surface);
}

fn on_open_gallery<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    let Event::OpenGallery { id } = event else {
        return;
    };
    if app.modal.open_gallery(&mut app.surface, &app.catalog, id) {
        app.listen(EventKind::Key, GALLERY_KEYS, on_gallery_key);
    }
}

fn on_close_gallery<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    app.close_gallery();
}

fn on_slide<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    match event {
        Event::NextSlide => app.modal.next_slide(&mut app.surface),
        Event::PreviousSlide => app.modal.previous_slide(&mut app.surface),
        Event::GoToSlide { index } => {
            app.modal.go_to_slide(&mut app.surface, *index);
        }
        _ => {}
    }
}

fn on_backdrop_click<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    let Event::BackdropClick { target } = event else {
        return;
    };
    if app.modal.backdrop_click(&mut app.surface, target) == Some(ModalKind::Gallery) {
        app.unlisten(EventKind::Key, GALLERY_KEYS);
    }
}

/// Escape closes the mobile menu and the project modal.
fn on_key<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    if matches!(event, Event::Key { key } if key == ESCAPE) {
        app.navigation.close_menu(&mut app.surface);
        app.modal.close_project(&mut app.surface);
    }
}

/// Arrow keys page through the open gallery; Escape closes it.
fn on_gallery_key<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    let Event::Key { key } = event else {
        return;
    };
    match key.as_str() {
        ARROW_LEFT => app.modal.previous_slide(&mut app.surface),
        ARROW_RIGHT => app.modal.next_slide(&mut app.surface),
        ESCAPE => app.close_gallery(),
        _ => {}
    }
}

fn on_set_field<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    if let Event::SetField { field, value } = event {
        app.contact.set_field(&mut app.surface, field, value);
    }
}

fn on_submit<S: Surface>(app: &mut Portfolio<S>, _: &Event) {
    let settle = app
        .contact
        .submit(&mut app.surface, app.submitter.as_mut());
    app.schedule(settle, Task::Contact);
}

fn on_dismiss<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    if let Event::DismissNotification { id } = event {
        let removal = app.notifications.dismiss(&mut app.surface, id);
        app.schedule(removal, Task::Notify);
    }
}

/// Float and close buttons of the chat popup.
fn on_whatsapp_click<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    let Event::Click { target } = event else {
        return;
    };
    if app.surface.contains(ids::WHATSAPP_FLOAT, target) {
        app.popup.toggle(&mut app.surface);
    } else if app.surface.contains(ids::WHATSAPP_CLOSE, target) {
        app.popup.close(&mut app.surface);
    }
}

/// Any click outside the chat popup and its button hides the popup.
fn on_document_click<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    let target = match event {
        Event::Click { target } | Event::BackdropClick { target } => target.as_str(),
        Event::AnchorClick { link, .. } => link.as_deref().unwrap_or_default(),
        _ => return,
    };
    app.popup.click_outside(&mut app.surface, target);
}

fn on_popup_hover<S: Surface>(app: &mut Portfolio<S>, event: &Event) {
    match event {
        Event::MouseEnter { target } if target == ids::WHATSAPP_POPUP => {
            app.popup.pointer_enter();
        }
        Event::MouseLeave { target } if target == ids::WHATSAPP_POPUP => {
            let hide = app.popup.pointer_leave();
            app.schedule(hide, Task::Popup);
        }
        _ => {}
    }
}
