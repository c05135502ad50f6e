//! Floating WhatsApp chat popup.
//!
//! A few seconds after load the popup shows itself, then again on every
//! interval tick until it has auto-shown `max_auto_shows` times. An auto-shown
//! popup hides again after a delay unless the pointer is over it. The float
//! button toggles it, the close button hides it, and a click anywhere outside
//! the button and the popup hides it.
//!
//! Every opening gets a sequence number. Hide timers carry the number of the
//! opening they belong to, so a timer left over from an earlier opening never
//! closes a later one.

use crate::config::WhatsAppConfig;
use crate::timeline::Deferred;
use crate::view::{Surface, classes, ids};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupTask {
    /// One tick of the auto-show interval.
    AutoShow,
    /// Hide the popup if it is still the given opening and not hovered.
    Hide { opening: u64 },
}

#[derive(Debug, Clone)]
pub struct ChatPopup {
    config: WhatsAppConfig,
    enabled: bool,
    open: bool,
    hovered: bool,
    auto_shows: u32,
    opening: u64,
}

impl ChatPopup {
    /// The popup is only active when the page carries both the float button
    /// and the popup element.
    pub fn new(config: WhatsAppConfig, surface: &dyn Surface) -> Self {
        let enabled = surface.exists(ids::WHATSAPP_FLOAT) && surface.exists(ids::WHATSAPP_POPUP);
        Self {
            config,
            enabled,
            open: false,
            hovered: false,
            auto_shows: 0,
            opening: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn auto_shows(&self) -> u32 {
        self.auto_shows
    }

    /// The first auto-show tick.
    pub fn start(&self) -> Option<Deferred<PopupTask>> {
        (self.enabled && self.config.max_auto_shows > 0)
            .then(|| Deferred::new(self.config.start_delay_ms, PopupTask::AutoShow))
    }

    fn show(&mut self, surface: &mut dyn Surface) {
        surface.add_class(ids::WHATSAPP_POPUP, classes::SHOW);
        self.open = true;
        self.opening += 1;
    }

    fn hide(&mut self, surface: &mut dyn Surface) {
        surface.remove_class(ids::WHATSAPP_POPUP, classes::SHOW);
        self.open = false;
        debug!(opening = self.opening, "chat popup hidden");
    }

    pub fn run(&mut self, surface: &mut dyn Surface, task: PopupTask) -> Vec<Deferred<PopupTask>> {
        match task {
            PopupTask::AutoShow => {
                let mut follow = Vec::new();
                if !self.open && self.auto_shows < self.config.max_auto_shows {
                    self.show(surface);
                    self.auto_shows += 1;
                    debug!(count = self.auto_shows, "chat popup auto-shown");
                    follow.push(Deferred::new(
                        self.config.auto_hide_ms,
                        PopupTask::Hide {
                            opening: self.opening,
                        },
                    ));
                }
                if self.auto_shows < self.config.max_auto_shows {
                    follow.push(Deferred::new(self.config.interval_ms, PopupTask::AutoShow));
                }
                follow
            }
            PopupTask::Hide { opening } => {
                if self.open && !self.hovered && opening == self.opening {
                    self.hide(surface);
                }
                Vec::new()
            }
        }
    }

    /// Float button click.
    pub fn toggle(&mut self, surface: &mut dyn Surface) {
        if !self.enabled {
            return;
        }
        if self.open {
            self.hide(surface);
        } else {
            self.show(surface);
            debug!(opening = self.opening, "chat popup opened");
        }
    }

    /// Close button click.
    pub fn close(&mut self, surface: &mut dyn Surface) {
        if self.open {
            self.hide(surface);
        }
    }

    /// A document click on `target`. Returns whether it hid the popup.
    pub fn click_outside(&mut self, surface: &mut dyn Surface, target: &str) -> bool {
        if !self.open
            || surface.contains(ids::WHATSAPP_FLOAT, target)
            || surface.contains(ids::WHATSAPP_POPUP, target)
        {
            return false;
        }
        self.hide(surface);
        true
    }

    pub fn pointer_enter(&mut self) {
        if self.enabled {
            self.hovered = true;
        }
    }

    /// Pointer left the popup: hide it after a delay if it is still open.
    pub fn pointer_leave(&mut self) -> Option<Deferred<PopupTask>> {
        self.hovered = false;
        self.open.then(|| {
            Deferred::new(
                self.config.leave_hide_ms,
                PopupTask::Hide {
                    opening: self.opening,
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_page;
    use crate::timeline::Timeline;
    use crate::view::PageModel;

    fn popup(page: &PageModel) -> ChatPopup {
        ChatPopup::new(WhatsAppConfig::default(), page)
    }

    fn run_until(
        popup: &mut ChatPopup,
        page: &mut PageModel,
        timeline: &mut Timeline<PopupTask>,
        until: u64,
    ) {
        while let Some(task) = timeline.pop_due(until) {
            let follow = popup.run(page, task);
            timeline.schedule_all(follow);
        }
        timeline.settle(until);
    }

    fn started(page: &PageModel) -> (ChatPopup, Timeline<PopupTask>) {
        let popup = popup(page);
        let mut timeline = Timeline::new();
        timeline.schedule_all(popup.start());
        (popup, timeline)
    }

    fn shown(page: &PageModel) -> bool {
        page.has_class(ids::WHATSAPP_POPUP, classes::SHOW)
    }

    #[test]
    fn first_auto_show_after_start_delay() {
        let mut page = sample_page();
        let (mut popup, mut timeline) = started(&page);
        run_until(&mut popup, &mut page, &mut timeline, 2999);
        assert!(!shown(&page));
        run_until(&mut popup, &mut page, &mut timeline, 3000);
        assert!(shown(&page));
        assert!(popup.is_open());
    }

    #[test]
    fn auto_show_hides_after_delay() {
        let mut page = sample_page();
        let (mut popup, mut timeline) = started(&page);
        run_until(&mut popup, &mut page, &mut timeline, 7999);
        assert!(shown(&page));
        run_until(&mut popup, &mut page, &mut timeline, 8000);
        assert!(!shown(&page));
    }

    #[test]
    fn auto_show_stops_after_three() {
        let mut page = sample_page();
        let (mut popup, mut timeline) = started(&page);
        // Shows at 3000, 11000 and 19000.
        run_until(&mut popup, &mut page, &mut timeline, 19_000);
        assert_eq!(popup.auto_shows(), 3);
        assert!(shown(&page));
        run_until(&mut popup, &mut page, &mut timeline, 60_000);
        assert_eq!(popup.auto_shows(), 3);
        assert!(!shown(&page));
        assert!(timeline.is_idle());
    }

    #[test]
    fn auto_show_skips_tick_while_open() {
        let mut page = sample_page();
        let (mut popup, mut timeline) = started(&page);
        popup.toggle(&mut page);
        run_until(&mut popup, &mut page, &mut timeline, 3000);
        assert_eq!(popup.auto_shows(), 0);
        assert!(shown(&page));
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut page = sample_page();
        let mut popup = popup(&page);
        popup.toggle(&mut page);
        assert!(shown(&page));
        popup.toggle(&mut page);
        assert!(!shown(&page));
    }

    #[test]
    fn close_hides() {
        let mut page = sample_page();
        let mut popup = popup(&page);
        popup.toggle(&mut page);
        popup.close(&mut page);
        assert!(!popup.is_open());
        assert!(!shown(&page));
    }

    #[test]
    fn click_outside_hides_but_inside_does_not() {
        let mut page = sample_page();
        let mut popup = popup(&page);
        popup.toggle(&mut page);
        assert!(!popup.click_outside(&mut page, ids::WHATSAPP_CLOSE));
        assert!(!popup.click_outside(&mut page, "whatsapp-icon"));
        assert!(shown(&page));
        assert!(popup.click_outside(&mut page, "about"));
        assert!(!shown(&page));
    }

    #[test]
    fn click_outside_when_closed_is_noop() {
        let mut page = sample_page();
        let mut popup = popup(&page);
        assert!(!popup.click_outside(&mut page, "about"));
    }

    #[test]
    fn hover_keeps_auto_shown_popup_open() {
        let mut page = sample_page();
        let (mut popup, mut timeline) = started(&page);
        run_until(&mut popup, &mut page, &mut timeline, 4000);
        popup.pointer_enter();
        run_until(&mut popup, &mut page, &mut timeline, 9000);
        assert!(shown(&page));

        timeline.schedule_all(popup.pointer_leave());
        run_until(&mut popup, &mut page, &mut timeline, 10_999);
        assert!(shown(&page));
        run_until(&mut popup, &mut page, &mut timeline, 11_000);
        assert!(!shown(&page));
    }

    #[test]
    fn stale_hide_leaves_reopened_popup_alone() {
        let mut page = sample_page();
        let (mut popup, mut timeline) = started(&page);
        run_until(&mut popup, &mut page, &mut timeline, 3000);
        popup.close(&mut page);
        popup.toggle(&mut page);
        run_until(&mut popup, &mut page, &mut timeline, 8000);
        assert!(shown(&page));
    }

    #[test]
    fn page_without_widget_is_inert() {
        let mut page = PageModel::new();
        let mut popup = popup(&page);
        assert!(!popup.is_enabled());
        assert!(popup.start().is_none());
        popup.toggle(&mut page);
        assert!(!popup.is_open());
    }
}
