//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what the visitor sees, not with files. Projects are
//! listed by positional index and title; paths, tags and status follow as
//! indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Projects
//! 001 Altair Innovation - Automotive Parts (4 images)
//!     Categories: ecommerce, payment, dashboard
//!     Status: Live
//!     Gallery: assets/projects/altair/
//!
//! Filters
//!     all (5)
//!     ecommerce (3)
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//! Stylesheet → style.1a2b3c4d.css
//! Assets → assets/ (1 file)
//! Generated 5 projects in 5 categories
//! ```
//!
//! ## Replay
//!
//! The first entry lists every observable field. Later entries list only
//! the fields that changed.
//!
//! ```text
//! 000 start (t=0ms)
//!     theme: dark
//!     ...
//! 001 load (t=0ms)
//!     timers: 9 pending
//! 002 wait 2500 (t=2500ms)
//!     loading screen: hidden
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.

use crate::app::Snapshot;
use crate::catalog::{ALL_CATEGORIES, Catalog, Project};
use crate::generate::BuildReport;
use crate::session::StepReport;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Project header: index, title and the gallery size when there is one.
///
/// ```text
/// 001 Altair Innovation (4 images)
/// 005 Internal Notes API
/// ```
fn project_header(index: usize, project: &Project) -> String {
    match project.images.len() {
        0 => format!("{} {}", format_index(index), project.title),
        n => format!(
            "{} {} ({})",
            format_index(index),
            project.title,
            plural(n, "image", "images")
        ),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory for `check`.
pub fn format_check_output(catalog: &Catalog, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Projects".to_string()];
    if catalog.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, project) in catalog.projects().iter().enumerate() {
        lines.push(project_header(i + 1, project));
        if !project.categories.is_empty() {
            lines.push(format!("    Categories: {}", project.categories.join(", ")));
        }
        lines.push(format!("    Status: {}", project.status.label()));
        if !project.images.is_empty() {
            lines.push(format!("    Gallery: {}", project.images_base_path));
        }
        let summary = truncate_desc(project.card_summary().trim(), 60);
        if !summary.is_empty() {
            lines.push(format!("    {}", summary));
        }
    }

    lines.push(String::new());
    lines.push("Filters".to_string());
    lines.push(format!("    {} ({})", ALL_CATEGORIES, catalog.len()));
    for tag in catalog.categories() {
        lines.push(format!("    {} ({})", tag, catalog.matching(tag).len()));
    }

    let mut config_lines = Vec::new();
    if source_root.join("config.toml").exists() {
        config_lines.push("    config.toml".to_string());
    }
    if source_root.join("assets").is_dir() {
        config_lines.push("    assets/".to_string());
    }
    if !config_lines.is_empty() {
        lines.push(String::new());
        lines.push("Config".to_string());
        lines.extend(config_lines);
    }

    lines
}

pub fn print_check_output(catalog: &Catalog, source_root: &Path) {
    for line in format_check_output(catalog, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the result of `build`.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![
        "Home \u{2192} index.html".to_string(),
        format!("Stylesheet \u{2192} {}", report.stylesheet),
    ];
    if report.assets_copied > 0 {
        lines.push(format!(
            "Assets \u{2192} assets/ ({})",
            plural(report.assets_copied, "file", "files")
        ));
    }
    lines.push(format!(
        "Generated {} in {}",
        plural(report.projects, "project", "projects"),
        plural(report.categories, "category", "categories")
    ));
    lines
}

pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

fn on_off(flag: bool, on: &str, off: &str) -> String {
    if flag { on } else { off }.to_string()
}

/// Every displayed field of a snapshot, in display order.
fn snapshot_fields(snapshot: &Snapshot) -> Vec<(&'static str, String)> {
    let visible = if snapshot.visible_projects.is_empty() {
        "none".to_string()
    } else {
        snapshot.visible_projects.join(", ")
    };
    let gallery = match &snapshot.gallery {
        Some(g) => format!("{} {}/{}", g.project, g.index + 1, g.total),
        None => "closed".to_string(),
    };
    let fields = snapshot
        .fields
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>();
    let notifications = snapshot
        .notifications
        .iter()
        .map(|toast| format!("[{}] {}", toast.kind.as_str(), toast.message))
        .collect::<Vec<_>>();

    vec![
        ("scroll", format!("{}", snapshot.scroll_y)),
        ("theme", snapshot.theme.as_str().to_string()),
        ("menu", on_off(snapshot.menu_open, "open", "closed")),
        ("navbar", on_off(snapshot.navbar_scrolled, "scrolled", "top")),
        (
            "section",
            snapshot.active_section.clone().unwrap_or_else(|| "-".to_string()),
        ),
        (
            "loading screen",
            on_off(snapshot.loading_screen_hidden, "hidden", "shown"),
        ),
        ("filter", format!("{} ({})", snapshot.filter, visible)),
        (
            "project modal",
            snapshot
                .project_modal
                .clone()
                .unwrap_or_else(|| "closed".to_string()),
        ),
        ("gallery", gallery),
        ("typewriter", format!("{:?}", snapshot.typewriter)),
        ("title", format!("{:?}", snapshot.title)),
        ("counters", snapshot.counters.join(" ")),
        (
            "revealed",
            format!("{}/{}", snapshot.revealed, snapshot.observed),
        ),
        ("form", on_off(snapshot.submitting, "submitting", "idle")),
        (
            "fields",
            if fields.is_empty() {
                "-".to_string()
            } else {
                fields.join(", ")
            },
        ),
        (
            "notifications",
            if notifications.is_empty() {
                "none".to_string()
            } else {
                notifications.join("; ")
            },
        ),
        (
            "chat popup",
            on_off(snapshot.chat_popup_open, "shown", "hidden"),
        ),
        ("timers", format!("{} pending", snapshot.pending_timers)),
    ]
}

/// Format a replay as a step-by-step trace.
///
/// The first report lists every field; each later report lists the fields
/// that differ from the report before it.
pub fn format_replay_output(reports: &[StepReport]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut previous: Option<Vec<(&'static str, String)>> = None;
    for report in reports {
        lines.push(format!(
            "{} {} (t={}ms)",
            format_index(report.step),
            report.action,
            report.snapshot.time_ms
        ));
        let current = snapshot_fields(&report.snapshot);
        for (i, (name, value)) in current.iter().enumerate() {
            let changed = previous
                .as_ref()
                .is_none_or(|prev| prev.get(i).map(|(_, v)| v) != Some(value));
            if changed {
                lines.push(format!("    {}: {}", name, value));
            }
        }
        previous = Some(current);
    }
    lines
}

pub fn print_replay_output(reports: &[StepReport]) {
    for line in format_replay_output(reports) {
        println!("{}", line);
    }
}

/// Pretty JSON array of step reports.
pub fn format_replay_json(reports: &[StepReport]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(reports)
}

// ============================================================================
// Tests
// ============================================================================
