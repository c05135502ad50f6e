//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is deep-merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml        # Site config (optional)
//! ├── projects.toml      # Project catalog
//! └── assets/            # Copied verbatim to the output root
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! owner = "Muhammad Mughees"
//! title = "Muhammad Mughees | Portfolio"
//! tagline = "I build web platforms that ship."
//! typewriter_text = ""       # Empty = use owner
//! roles = ["Laravel Developer", "Full Stack Developer", ...]
//! about = "..."              # Markdown
//! email = "hello@example.com"
//!
//! [navigation]
//! section_offset = 100       # Scroll offset used to pick the active section
//! header_offset = 80         # Fixed header height subtracted on anchor scroll
//! scrolled_threshold = 50    # Navbar gets `scrolled` past this offset
//! mobile_breakpoint = 768    # Resizing wider than this closes the mobile menu
//!
//! [animation]
//! reveal_threshold = 0.1     # Fraction of an element that must be visible
//! reveal_bottom_margin = 50  # Viewport bottom shrink for the reveal test
//! loading_screen_ms = 2500
//! skill_bar_stagger_ms = 100
//! counter_duration_ms = 2000
//! frame_ms = 16
//!
//! [animation.typewriter]
//! start_delay_ms = 1000
//! type_ms = 100
//! delete_ms = 50
//! hold_ms = 2000
//! restart_ms = 500
//!
//! [animation.titles]
//! start_delay_ms = 2000
//! interval_ms = 3000
//! fade_ms = 150
//!
//! [notifications]
//! dismiss_after_ms = 5000
//! exit_ms = 300
//! enter_delay_ms = 16
//!
//! [contact]
//! latency_ms = 2000          # Simulated backend round trip
//!
//! [whatsapp]
//! phone = "15555550100"      # Empty = no chat popup
//! greeting = "Hi! I'd like to talk about a project."
//! start_delay_ms = 3000
//! interval_ms = 8000
//! max_auto_shows = 3
//! auto_hide_ms = 5000
//! leave_hide_ms = 2000
//!
//! [colors.dark]              # Default theme
//! background = "#0f172a"
//! ...
//! ```
//!
//! Content blocks (`[[stats]]`, `[[skills]]`, `[[experience]]`,
//! `[[certifications]]`) replace the defaults wholesale when present.
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and hero copy.
    pub site: SiteInfo,
    /// Color schemes for the light and dark themes.
    pub colors: ColorConfig,
    /// Scroll and menu geometry.
    pub navigation: NavigationConfig,
    /// Reveal and cosmetic effect timings.
    pub animation: AnimationConfig,
    /// Toast timings.
    pub notifications: NotificationConfig,
    /// Contact form backend settings.
    pub contact: ContactConfig,
    /// Floating chat popup.
    pub whatsapp: WhatsAppConfig,
    /// Counters in the about section.
    pub stats: Vec<Stat>,
    /// Skill categories with progress bars.
    pub skills: Vec<SkillCategory>,
    /// Timeline entries.
    pub experience: Vec<Experience>,
    /// Certification cards.
    pub certifications: Vec<Certification>,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let anim = &self.animation;
        if !(anim.reveal_threshold > 0.0 && anim.reveal_threshold <= 1.0) {
            return Err(ConfigError::Validation(
                "animation.reveal_threshold must be in (0, 1]".into(),
            ));
        }
        if anim.frame_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.frame_ms must be non-zero".into(),
            ));
        }
        if anim.counter_duration_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.counter_duration_ms must be non-zero".into(),
            ));
        }
        let typewriter = &anim.typewriter;
        for (field, value) in [
            ("type_ms", typewriter.type_ms),
            ("delete_ms", typewriter.delete_ms),
            ("hold_ms", typewriter.hold_ms),
            ("restart_ms", typewriter.restart_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Validation(format!(
                    "animation.typewriter.{field} must be non-zero"
                )));
            }
        }
        if anim.titles.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.titles.interval_ms must be non-zero".into(),
            ));
        }
        if anim.titles.fade_ms >= anim.titles.interval_ms {
            return Err(ConfigError::Validation(
                "animation.titles.fade_ms must be shorter than interval_ms".into(),
            ));
        }
        if self.whatsapp.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "whatsapp.interval_ms must be non-zero".into(),
            ));
        }
        if !self.whatsapp.phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(
                "whatsapp.phone must contain digits only".into(),
            ));
        }
        if self.site.roles.is_empty() {
            return Err(ConfigError::Validation(
                "site.roles must not be empty".into(),
            ));
        }
        for category in &self.skills {
            if let Some(skill) = category.items.iter().find(|s| s.level > 100) {
                return Err(ConfigError::Validation(format!(
                    "skill '{}' level must be 0-100",
                    skill.name
                )));
            }
        }
        Ok(())
    }

    /// Text the hero typewriter cycles through.
    pub fn typewriter_text(&self) -> &str {
        if self.site.typewriter_text.is_empty() {
            &self.site.owner
        } else {
            &self.site.typewriter_text
        }
    }
}

/// Identity and hero copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub owner: String,
    /// Document `<title>`.
    pub title: String,
    pub tagline: String,
    /// Typewriter text; empty falls back to `owner`.
    pub typewriter_text: String,
    /// Rotating hero titles, shown in order.
    pub roles: Vec<String>,
    /// About section body (markdown).
    pub about: String,
    pub email: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            owner: "Muhammad Mughees".to_string(),
            title: "Muhammad Mughees | Portfolio".to_string(),
            tagline: "I build web platforms that ship.".to_string(),
            typewriter_text: String::new(),
            roles: vec![
                "Laravel Developer".to_string(),
                "Full Stack Developer".to_string(),
                "API Specialist".to_string(),
                "Payment Integration Expert".to_string(),
                "Web Solutions Architect".to_string(),
            ],
            about: "Full stack developer focused on **Laravel**, payment integrations \
                    and admin platforms."
                .to_string(),
            email: "hello@example.com".to_string(),
        }
    }
}

/// Scroll and menu geometry, in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    /// Added to the scroll position before matching section bounds.
    pub section_offset: f64,
    /// Fixed header height subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Scroll offset past which the navbar is marked `scrolled`.
    pub scrolled_threshold: f64,
    /// Viewports wider than this close the mobile menu on resize.
    pub mobile_breakpoint: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            section_offset: 100.0,
            header_offset: 80.0,
            scrolled_threshold: 50.0,
            mobile_breakpoint: 768.0,
        }
    }
}

/// Reveal and cosmetic effect timings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Fraction of an element that must be inside the viewport to reveal it.
    pub reveal_threshold: f64,
    /// Amount the viewport's bottom edge is pulled up for the reveal test.
    pub reveal_bottom_margin: f64,
    /// Delay after load before the loading screen is hidden.
    pub loading_screen_ms: u64,
    /// Gap between consecutive skill bar fills.
    pub skill_bar_stagger_ms: u64,
    /// Total run time of a stat counter.
    pub counter_duration_ms: u64,
    /// Frame period used by counters.
    pub frame_ms: u64,
    pub typewriter: TypewriterConfig,
    pub titles: TitleRotationConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_bottom_margin: 50.0,
            loading_screen_ms: 2500,
            skill_bar_stagger_ms: 100,
            counter_duration_ms: 2000,
            frame_ms: 16,
            typewriter: TypewriterConfig::default(),
            titles: TitleRotationConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypewriterConfig {
    pub start_delay_ms: u64,
    pub type_ms: u64,
    pub delete_ms: u64,
    /// Pause with the full text shown.
    pub hold_ms: u64,
    /// Pause with the text fully deleted.
    pub restart_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000,
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            restart_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleRotationConfig {
    pub start_delay_ms: u64,
    pub interval_ms: u64,
    /// Fade-out time before the text is swapped.
    pub fade_ms: u64,
}

impl Default for TitleRotationConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 2000,
            interval_ms: 3000,
            fade_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    /// Auto-dismiss delay.
    pub dismiss_after_ms: u64,
    /// Slide-out time before the toast is removed.
    pub exit_ms: u64,
    /// Delay before the slide-in starts (one frame).
    pub enter_delay_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 5000,
            exit_ms: 300,
            enter_delay_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Round trip of the simulated submission backend.
    pub latency_ms: u64,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self { latency_ms: 2000 }
    }
}

/// WhatsApp chat popup: the link target and its auto-show schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WhatsAppConfig {
    /// Number in international format, digits only. Empty leaves the widget out.
    pub phone: String,
    /// Message prefilled in the chat.
    pub greeting: String,
    /// Delay after load before the first auto-show.
    pub start_delay_ms: u64,
    pub interval_ms: u64,
    /// Auto-shows per page view.
    pub max_auto_shows: u32,
    /// An auto-shown popup hides again after this long unless hovered.
    pub auto_hide_ms: u64,
    /// Delay before hiding once the pointer leaves the popup.
    pub leave_hide_ms: u64,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            phone: "15555550100".to_string(),
            greeting: "Hi! I'd like to talk about a project.".to_string(),
            start_delay_ms: 3000,
            interval_ms: 8000,
            max_auto_shows: 3,
            auto_hide_ms: 5000,
            leave_hide_ms: 2000,
        }
    }
}

impl WhatsAppConfig {
    pub fn is_enabled(&self) -> bool {
        !self.phone.is_empty()
    }

    /// `wa.me` chat link with the greeting prefilled.
    pub fn chat_url(&self) -> String {
        let text: String = self
            .greeting
            .bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    (b as char).to_string()
                }
                _ => format!("%{b:02X}"),
            })
            .collect();
        format!("https://wa.me/{}?text={}", self.phone, text)
    }
}

/// A counter in the about section. `value` is the literal the counter animates to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Stat {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Skill {
    pub name: String,
    /// Bar fill percentage (0-100).
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Experience {
    pub period: String,
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: u32,
}

fn default_stats() -> Vec<Stat> {
    vec![
        Stat {
            label: "Projects Delivered".to_string(),
            value: 50,
        },
        Stat {
            label: "Happy Clients".to_string(),
            value: 30,
        },
        Stat {
            label: "Years Experience".to_string(),
            value: 4,
        },
    ]
}

fn default_skills() -> Vec<SkillCategory> {
    let skill = |name: &str, level| Skill {
        name: name.to_string(),
        level,
    };
    vec![
        SkillCategory {
            name: "Backend".to_string(),
            items: vec![skill("Laravel", 95), skill("PHP", 90), skill("MySQL", 85)],
        },
        SkillCategory {
            name: "Frontend".to_string(),
            items: vec![
                skill("JavaScript", 85),
                skill("Vue.js", 75),
                skill("React", 70),
            ],
        },
    ]
}

fn default_experience() -> Vec<Experience> {
    vec![
        Experience {
            period: "2022 - Present".to_string(),
            role: "Senior Laravel Developer".to_string(),
            company: "Freelance".to_string(),
            summary: "E-commerce, booking and POS platforms with payment integrations."
                .to_string(),
        },
        Experience {
            period: "2020 - 2022".to_string(),
            role: "Full Stack Developer".to_string(),
            company: "Agency".to_string(),
            summary: "Admin dashboards and REST APIs for mobile clients.".to_string(),
        },
    ]
}

fn default_certifications() -> Vec<Certification> {
    vec![
        Certification {
            name: "Laravel Certified Developer".to_string(),
            issuer: "Laravel".to_string(),
            year: 2023,
        },
        Certification {
            name: "Stripe Payments".to_string(),
            issuer: "Stripe".to_string(),
            year: 2022,
        },
    ]
}

/// Color configuration for the two themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Card and panel background.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    /// Accent used for buttons, links and info toasts.
    pub primary: String,
    pub success: String,
    pub error: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#f8fafc".to_string(),
            surface: "#ffffff".to_string(),
            text: "#0f172a".to_string(),
            text_muted: "#475569".to_string(),
            primary: "#6366f1".to_string(),
            success: "#16a34a".to_string(),
            error: "#dc2626".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0f172a".to_string(),
            surface: "#1e293b".to_string(),
            text: "#f1f5f9".to_string(),
            text_muted: "#94a3b8".to_string(),
            primary: "#818cf8".to_string(),
            success: "#22c55e".to_string(),
            error: "#ef4444".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Content blocks are part of the stock layer so that a config without
/// `[[stats]]` still renders a populated page.
pub fn stock_defaults_value() -> toml::Value {
    let stock = SiteConfig {
        stats: default_stats(),
        skills: default_skills(),
        experience: default_experience(),
        certifications: default_certifications(),
        ..SiteConfig::default()
    };
    toml::Value::try_from(stock).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, layered over the
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// The fully-layered stock configuration, content blocks included.
pub fn stock_config() -> SiteConfig {
    resolve_config(stock_defaults_value(), None).expect("stock config must validate")
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
owner = "Muhammad Mughees"
title = "Muhammad Mughees | Portfolio"
tagline = "I build web platforms that ship."
# Text typed by the hero typewriter. Empty = use owner.
typewriter_text = ""
# Hero titles, rotated in order.
roles = [
    "Laravel Developer",
    "Full Stack Developer",
    "API Specialist",
    "Payment Integration Expert",
    "Web Solutions Architect",
]
# About section body, markdown.
about = "Full stack developer focused on **Laravel**, payment integrations and admin platforms."
email = "hello@example.com"

# ---------------------------------------------------------------------------
# Navigation geometry (CSS pixels)
# ---------------------------------------------------------------------------
[navigation]
# Added to the scroll position when picking the active section.
section_offset = 100.0
# Fixed header height subtracted from anchor scroll targets.
header_offset = 80.0
# The navbar is marked `scrolled` past this offset.
scrolled_threshold = 50.0
# Resizing wider than this closes the mobile menu.
mobile_breakpoint = 768.0

# ---------------------------------------------------------------------------
# Animation timings (milliseconds)
# ---------------------------------------------------------------------------
[animation]
# Fraction of an element that must be visible to reveal it, in (0, 1].
reveal_threshold = 0.1
# The viewport's bottom edge is pulled up by this much for the reveal test.
reveal_bottom_margin = 50.0
loading_screen_ms = 2500
skill_bar_stagger_ms = 100
counter_duration_ms = 2000
frame_ms = 16

[animation.typewriter]
start_delay_ms = 1000
type_ms = 100
delete_ms = 50
hold_ms = 2000
restart_ms = 500

[animation.titles]
start_delay_ms = 2000
interval_ms = 3000
# Must be shorter than interval_ms.
fade_ms = 150

# ---------------------------------------------------------------------------
# Notifications
# ---------------------------------------------------------------------------
[notifications]
dismiss_after_ms = 5000
exit_ms = 300
enter_delay_ms = 16

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Round trip of the simulated submission backend.
latency_ms = 2000

# ---------------------------------------------------------------------------
# WhatsApp chat popup
# ---------------------------------------------------------------------------
[whatsapp]
# International number, digits only. Set to "" to leave the widget out.
phone = "15555550100"
greeting = "Hi! I'd like to talk about a project."
# First auto-show after load, then one per interval.
start_delay_ms = 3000
interval_ms = 8000
max_auto_shows = 3
# Auto-shown popups hide after this long unless hovered.
auto_hide_ms = 5000
# Hide delay after the pointer leaves the popup.
leave_hide_ms = 2000

# ---------------------------------------------------------------------------
# Colors - dark theme (default)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0f172a"
surface = "#1e293b"
text = "#f1f5f9"
text_muted = "#94a3b8"
primary = "#818cf8"
success = "#22c55e"
error = "#ef4444"

# ---------------------------------------------------------------------------
# Colors - light theme
# ---------------------------------------------------------------------------
[colors.light]
background = "#f8fafc"
surface = "#ffffff"
text = "#0f172a"
text_muted = "#475569"
primary = "#6366f1"
success = "#16a34a"
error = "#dc2626"

# ---------------------------------------------------------------------------
# Content blocks. Any block present here replaces the default list.
# ---------------------------------------------------------------------------
[[stats]]
label = "Projects Delivered"
value = 50

[[stats]]
label = "Happy Clients"
value = 30

[[stats]]
label = "Years Experience"
value = 4

[[skills]]
name = "Backend"
items = [
    { name = "Laravel", level = 95 },
    { name = "PHP", level = 90 },
    { name = "MySQL", level = 85 },
]

[[skills]]
name = "Frontend"
items = [
    { name = "JavaScript", level = 85 },
    { name = "Vue.js", level = 75 },
    { name = "React", level = 70 },
]

[[experience]]
period = "2022 - Present"
role = "Senior Laravel Developer"
company = "Freelance"
summary = "E-commerce, booking and POS platforms with payment integrations."

[[experience]]
period = "2020 - 2022"
role = "Full Stack Developer"
company = "Agency"
summary = "Admin dashboards and REST APIs for mobile clients."

[[certifications]]
name = "Laravel Certified Developer"
issuer = "Laravel"
year = 2023

[[certifications]]
name = "Stripe Payments"
issuer = "Stripe"
year = 2022
"##
}

fn scheme_properties(scheme: &ColorScheme) -> String {
    format!(
        "    --color-bg: {};\n    --color-surface: {};\n    --color-text: {};\n    \
         --color-text-muted: {};\n    --color-primary: {};\n    --color-success: {};\n    \
         --color-error: {};",
        scheme.background,
        scheme.surface,
        scheme.text,
        scheme.text_muted,
        scheme.primary,
        scheme.success,
        scheme.error,
    )
}

/// Generate CSS custom properties for both themes.
///
/// Dark is the default: it applies to `:root` and to an explicit
/// `data-theme="dark"`; light applies only when `data-theme="light"` is set.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root,\n[data-theme=\"dark\"] {{\n{}\n}}\n\n[data-theme=\"light\"] {{\n{}\n}}",
        scheme_properties(&colors.dark),
        scheme_properties(&colors.light),
    )
}
