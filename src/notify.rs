//! Transient toast notifications.
//!
//! Each toast is independent: it slides in one frame after creation, dismisses
//! itself after a fixed delay unless closed first, and is removed once its
//! slide-out finishes. There is no queue and no deduplication.

use crate::config::NotificationConfig;
use crate::timeline::Deferred;
use crate::view::{Surface, classes, ids};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OFFSCREEN: &str = "translateX(400px)";
const ONSCREEN: &str = "translateX(0)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Info => "fa-info-circle",
            NotificationKind::Success => "fa-check-circle",
            NotificationKind::Error => "fa-exclamation-circle",
        }
    }
}

/// A message a controller wants shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notice {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastState {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: String,
    pub kind: NotificationKind,
    pub message: String,
    pub state: ToastState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyTask {
    SlideIn { id: String },
    AutoDismiss { id: String },
    Remove { id: String },
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    config: NotificationConfig,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl NotificationCenter {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            next_id: 0,
            toasts: Vec::new(),
        }
    }

    /// Live toasts, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Create a toast off-screen and schedule its slide-in and auto-dismiss.
    pub fn show(
        &mut self,
        surface: &mut dyn Surface,
        notice: Notice,
    ) -> (String, Vec<Deferred<NotifyTask>>) {
        self.next_id += 1;
        let id = format!("notification-{}", self.next_id);
        let kind = notice.kind;

        surface.append_child(ids::BODY, &id, "div");
        surface.add_class(&id, classes::NOTIFICATION);
        surface.add_class(&id, &format!("notification-{}", kind.as_str()));
        surface.set_style(&id, "transform", OFFSCREEN);
        let icon = format!("{id}-icon");
        surface.append_child(&id, &icon, "i");
        surface.set_attribute(&icon, "class", &format!("fas {}", kind.icon()));
        let text = format!("{id}-message");
        surface.append_child(&id, &text, "span");
        surface.set_text(&text, &notice.message);
        let close = format!("{id}-close");
        surface.append_child(&id, &close, "button");
        surface.add_class(&close, "notification-close");

        debug!(id = %id, kind = kind.as_str(), "notification shown");
        self.toasts.push(Toast {
            id: id.clone(),
            kind,
            message: notice.message,
            state: ToastState::Entering,
        });

        let tasks = vec![
            Deferred::new(
                self.config.enter_delay_ms,
                NotifyTask::SlideIn { id: id.clone() },
            ),
            Deferred::new(
                self.config.dismiss_after_ms,
                NotifyTask::AutoDismiss { id: id.clone() },
            ),
        ];
        (id, tasks)
    }

    /// Start the slide-out. A toast already leaving, or gone, is left alone.
    pub fn dismiss(&mut self, surface: &mut dyn Surface, id: &str) -> Option<Deferred<NotifyTask>> {
        let toast = self
            .toasts
            .iter_mut()
            .find(|t| t.id == id && t.state != ToastState::Leaving)?;
        toast.state = ToastState::Leaving;
        surface.set_style(id, "transform", OFFSCREEN);
        debug!(id, "notification dismissed");
        Some(Deferred::new(
            self.config.exit_ms,
            NotifyTask::Remove { id: id.to_string() },
        ))
    }

    pub fn run(&mut self, surface: &mut dyn Surface, task: NotifyTask) -> Vec<Deferred<NotifyTask>> {
        match task {
            NotifyTask::SlideIn { id } => {
                if let Some(toast) = self
                    .toasts
                    .iter_mut()
                    .find(|t| t.id == id && t.state == ToastState::Entering)
                {
                    toast.state = ToastState::Visible;
                    surface.set_style(&id, "transform", ONSCREEN);
                }
                Vec::new()
            }
            NotifyTask::AutoDismiss { id } => self.dismiss(surface, &id).into_iter().collect(),
            NotifyTask::Remove { id } => {
                self.toasts.retain(|t| t.id != id);
                surface.remove_element(&id);
                Vec::new()
            }
        }
    }
}
