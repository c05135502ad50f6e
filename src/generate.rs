//! Static site generation.
//!
//! Renders the single `index.html` the headless page model mirrors, writes the
//! stylesheet under a content-hashed name and copies the content's `assets/`
//! directory next to it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── style.3f9a1c2e.css         # static/style.css + color properties
//! └── assets/                    # copied verbatim from content/assets/
//!     └── projects/altair/...
//! ```
//!
//! ## Styling hooks
//!
//! Every id, class and data attribute the controllers touch comes from
//! [`crate::view::ids`] and [`crate::view::classes`], the same constants
//! `build_page` uses, so the markup and the page model cannot drift apart.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. The about
//! text is markdown, converted with pulldown-cmark.

use crate::catalog::{ALL_CATEGORIES, Catalog, CatalogError, Project};
use crate::config::{self, ConfigError, SiteConfig};
use crate::contact::FIELDS;
use crate::view::{classes, filter_label, ids, section_label};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const FONT_AWESOME: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// What a build wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// File name of the fingerprinted stylesheet.
    pub stylesheet: String,
    pub projects: usize,
    pub categories: usize,
    pub assets_copied: usize,
}

/// Build the site in `source` into `output_dir`.
pub fn generate(source: &Path, output_dir: &Path) -> Result<BuildReport, GenerateError> {
    let config = config::load_config(source)?;
    let catalog = Catalog::load(source)?;

    fs::create_dir_all(output_dir)?;

    let css = stylesheet(&config);
    let stylesheet = fingerprinted_name(&css);
    fs::write(output_dir.join(&stylesheet), &css)?;
    debug!(stylesheet = %stylesheet, "wrote stylesheet");

    let page = render_index(&config, &catalog, &stylesheet);
    fs::write(output_dir.join("index.html"), page.into_string())?;

    let assets_copied = copy_assets(&source.join("assets"), &output_dir.join("assets"))?;
    info!(
        projects = catalog.len(),
        assets = assets_copied,
        "site generated at {}",
        output_dir.display()
    );

    Ok(BuildReport {
        output_dir: output_dir.to_path_buf(),
        stylesheet,
        projects: catalog.len(),
        categories: catalog.categories().len(),
        assets_copied,
    })
}

/// Color custom properties followed by the static stylesheet.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    )
}

/// `style.<first 8 hex digits of sha256>.css`
pub fn fingerprinted_name(css: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(css.as_bytes()));
    format!("style.{}.css", &digest[..8])
}

/// Copy every file under `src` into `dst`, keeping relative paths. A missing
/// `src` copies nothing.
fn copy_assets(src: &Path, dst: &Path) -> std::io::Result<usize> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(markdown));
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure. Dark is the initial theme.
fn base_document(title: &str, stylesheet: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" data-theme="dark" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(FONT_AWESOME);
                link rel="stylesheet" href=(stylesheet);
            }
            body {
                (content)
            }
        }
    }
}

fn loading_screen() -> Markup {
    html! {
        div.loading-screen id=(ids::LOADING_SCREEN) {
            div.loader {}
        }
    }
}

/// Fixed navbar with section links, theme toggle and mobile hamburger.
fn navbar(config: &SiteConfig) -> Markup {
    html! {
        nav.navbar id=(ids::NAVBAR) {
            a.nav-logo href="#home" { (config.site.owner) }
            ul.nav-menu id=(ids::NAV_MENU) {
                @for section in ids::SECTIONS {
                    li {
                        a class=(classes::NAV_LINK) id=(ids::nav_link(section)) href={ "#" (section) } {
                            (section_label(section))
                        }
                    }
                }
            }
            button.theme-toggle id=(ids::THEME_TOGGLE) aria-label="Toggle theme" {
                i id=(ids::THEME_ICON) class="fas fa-moon" {}
            }
            div.hamburger id=(ids::HAMBURGER) {
                span.bar {}
                span.bar {}
                span.bar {}
            }
        }
    }
}

fn section(id: &str, heading: Option<&str>, body: Markup) -> Markup {
    html! {
        section class={ (classes::SECTION) " " (id) } id=(id) {
            div.container {
                @if let Some(heading) = heading {
                    h2.section-title { (heading) }
                }
                (body)
            }
        }
    }
}

fn hero(config: &SiteConfig) -> Markup {
    let first_role = config.site.roles.first().map(String::as_str).unwrap_or("");
    html! {
        div.hero-content id=(ids::HERO_CONTENT) {
            h1 {
                span.typewriter id=(ids::TYPEWRITER) data-text=(config.typewriter_text()) {}
            }
            p.hero-title {
                span id=(ids::DYNAMIC_TITLE) { (first_role) }
            }
            p.hero-tagline { (config.site.tagline) }
            div.hero-buttons {
                a.btn.btn-primary href="#projects" { "View Projects" }
                a.btn.btn-outline href="#contact" { "Get In Touch" }
            }
        }
        div.hero-image id=(ids::HERO_IMAGE) {
            div.hero-avatar { i class="fas fa-code" {} }
        }
    }
}

fn about(config: &SiteConfig) -> Markup {
    html! {
        div.about-text {
            (PreEscaped(markdown_to_html(&config.site.about)))
        }
        div.stats id=(ids::STATS) {
            @for (i, stat) in config.stats.iter().enumerate() {
                div.stat {
                    span class=(classes::STAT_NUMBER) id=(ids::stat(i)) { (stat.value) "+" }
                    span.stat-label { (stat.label) }
                }
            }
        }
    }
}

fn skills(config: &SiteConfig) -> Markup {
    html! {
        div.skills-grid id=(ids::SKILLS_GRID) {
            @for (i, category) in config.skills.iter().enumerate() {
                div class=(classes::SKILL_CATEGORY) id=(ids::skill_category(i)) {
                    h3 { (category.name) }
                    @for (j, skill) in category.items.iter().enumerate() {
                        div.skill-item {
                            div.skill-info {
                                span { (skill.name) }
                                span { (skill.level) "%" }
                            }
                            div.skill-bar {
                                div class=(classes::SKILL_PROGRESS)
                                    id=(ids::skill_bar(i, j))
                                    data-width={ (skill.level) "%" } {}
                            }
                        }
                    }
                }
            }
        }
    }
}

fn project_card(project: &Project) -> Markup {
    html! {
        div class=(classes::PROJECT_CARD)
            id=(ids::project_card(&project.id))
            data-category=(project.category_attr())
            data-project=(project.id) {
            div.project-image {
                @if let Some(thumb) = project.thumbnail_path() {
                    img src=(thumb) alt=(project.title) loading="lazy";
                } @else {
                    div.project-placeholder { i class="fas fa-laptop-code" {} }
                }
                span class={ "project-status " (project.status.css_class()) } {
                    (project.status.label())
                }
            }
            div.project-content {
                @if !project.kind.is_empty() {
                    span.project-type { (project.kind) }
                }
                h3.project-title { (project.title) }
                p.project-description { (project.card_summary()) }
                ul.project-features {
                    @for feature in project.card_features() {
                        li { (feature) }
                    }
                }
                div.tech-tags {
                    @for tech in project.card_technologies() {
                        span.tech-tag { (tech) }
                    }
                }
                div.project-actions {
                    button.btn.btn-primary data-project=(project.id) data-action="details" {
                        "View Details"
                    }
                    @if !project.images.is_empty() {
                        button.btn.btn-outline data-project=(project.id) data-action="gallery" {
                            i class="fas fa-images" {} " Gallery"
                        }
                    }
                    @if let Some(url) = &project.live_url {
                        a.btn.btn-outline href=(url) target="_blank" rel="noopener" { "Live" }
                    }
                }
            }
        }
    }
}

fn projects(catalog: &Catalog) -> Markup {
    let tags = std::iter::once(ALL_CATEGORIES).chain(catalog.categories());
    html! {
        div.filter-bar id=(ids::FILTER_BAR) {
            @for tag in tags {
                @let class = if tag == ALL_CATEGORIES {
                    format!("{} {}", classes::FILTER_BUTTON, classes::ACTIVE)
                } else {
                    classes::FILTER_BUTTON.to_string()
                };
                button class=(class) id=(ids::filter_button(tag))
                    data-filter=(tag) {
                    (filter_label(tag))
                }
            }
        }
        div.projects-grid id=(ids::PROJECTS_GRID) {
            @for project in catalog.projects() {
                (project_card(project))
            }
        }
    }
}

fn experience(config: &SiteConfig) -> Markup {
    html! {
        div.timeline id=(ids::TIMELINE) {
            @for (i, entry) in config.experience.iter().enumerate() {
                div class=(classes::TIMELINE_ITEM) id=(ids::timeline_item(i)) {
                    span.timeline-period { (entry.period) }
                    h3 { (entry.role) }
                    h4 { (entry.company) }
                    @if !entry.summary.is_empty() {
                        p { (entry.summary) }
                    }
                }
            }
        }
    }
}

fn certifications(config: &SiteConfig) -> Markup {
    html! {
        div.cert-grid id=(ids::CERT_GRID) {
            @for (i, cert) in config.certifications.iter().enumerate() {
                div class=(classes::CERT_CARD) id=(ids::cert_card(i)) {
                    i class="fas fa-certificate" {}
                    h3 { (cert.name) }
                    p { (cert.issuer) " · " (cert.year) }
                }
            }
        }
    }
}

fn contact(config: &SiteConfig) -> Markup {
    html! {
        p.contact-intro {
            "Reach me at "
            a href={ "mailto:" (config.site.email) } { (config.site.email) }
        }
        form.contact-form id=(ids::CONTACT_FORM) {
            @for field in FIELDS {
                div.form-group {
                    @if field == "message" {
                        textarea id=(ids::contact_field(field)) name=(field) rows="5"
                            placeholder=(section_label(field)) required {}
                    } @else {
                        input id=(ids::contact_field(field)) name=(field)
                            type=(if field == "email" { "email" } else { "text" })
                            placeholder=(section_label(field)) required;
                    }
                }
            }
            button.btn.btn-primary.btn-submit id=(ids::SUBMIT_BUTTON) type="submit" {
                span.btn-text { "Send Message" }
                span.btn-loading { i class="fas fa-spinner fa-spin" {} }
            }
        }
    }
}

/// Details and gallery modals, both closed. Their bodies are filled when
/// opened.
fn modals() -> Markup {
    html! {
        div.modal id=(ids::PROJECT_MODAL) {
            div.modal-content id="projectModalContent" {
                button.modal-close aria-label="Close" { "×" }
                h2 id=(ids::MODAL_TITLE) {}
                div.modal-body id=(ids::MODAL_BODY) {}
            }
        }
        div.modal.gallery-modal id=(ids::GALLERY_MODAL) {
            div.modal-content id="galleryModalContent" {
                button.modal-close aria-label="Close" { "×" }
                div.gallery-viewport {
                    div.gallery-container id=(ids::GALLERY_CONTAINER) {}
                }
                button.gallery-prev aria-label="Previous" { i class="fas fa-chevron-left" {} }
                button.gallery-next aria-label="Next" { i class="fas fa-chevron-right" {} }
                div.gallery-counter {
                    span id=(ids::CURRENT_SLIDE) {} " / " span id=(ids::TOTAL_SLIDES) {}
                }
                div.gallery-dots id=(ids::GALLERY_DOTS) {}
            }
        }
    }
}

/// Floating chat button with its popup, hidden until shown.
fn whatsapp(config: &SiteConfig) -> Markup {
    let chat_url = config.whatsapp.chat_url();
    html! {
        div.whatsapp-widget id="whatsapp-widget" {
            div.whatsapp-popup id=(ids::WHATSAPP_POPUP) {
                button.whatsapp-close id=(ids::WHATSAPP_CLOSE) aria-label="Close" { "×" }
                p.whatsapp-greeting { (config.whatsapp.greeting) }
                a.btn.whatsapp-chat id="whatsapp-chat" href=(chat_url)
                    target="_blank" rel="noopener" { "Start chat" }
            }
            a.whatsapp-float id=(ids::WHATSAPP_FLOAT) href=(chat_url)
                target="_blank" rel="noopener" aria-label="Chat on WhatsApp" {
                i id="whatsapp-icon" class="fab fa-whatsapp" {}
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the whole single-page site.
pub fn render_index(config: &SiteConfig, catalog: &Catalog, stylesheet: &str) -> Markup {
    let content = html! {
        (loading_screen())
        (navbar(config))
        (section("home", None, hero(config)))
        (section("about", Some("About Me"), about(config)))
        (section("skills", Some("Skills"), skills(config)))
        (section("projects", Some("Projects"), projects(catalog)))
        (section("experience", Some("Experience"), experience(config)))
        (section("certifications", Some("Certifications"), certifications(config)))
        (section("contact", Some("Contact"), contact(config)))
        (modals())
        @if config.whatsapp.is_enabled() {
            (whatsapp(config))
        }
        footer.footer {
            p { "© " (config.site.owner) }
        }
    };

    base_document(&config.site.title, stylesheet, content)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_catalog, sample_config, sample_page, setup_fixtures};
    use tempfile::TempDir;

    fn index_html() -> String {
        render_index(&sample_config(), &sample_catalog(), "style.css").into_string()
    }

    #[test]
    fn base_document_includes_doctype_and_theme() {
        let doc = base_document("Test", "s.css", html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"data-theme="dark""#));
        assert!(doc.contains(r#"href="s.css""#));
    }

    #[test]
    fn every_page_model_id_is_rendered() {
        let html = index_html();
        let page = sample_page();
        for id in page.ids().filter(|id| *id != ids::ROOT && *id != ids::BODY) {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing id {id}");
        }
    }

    #[test]
    fn whatsapp_widget_links_to_chat() {
        let html = index_html();
        assert!(html.contains(r#"id="whatsapp-float""#));
        assert!(html.contains("https://wa.me/15555550100?text="));

        let mut config = sample_config();
        config.whatsapp.phone.clear();
        let html = render_index(&config, &sample_catalog(), "style.css").into_string();
        assert!(!html.contains("whatsapp-float"));
    }

    #[test]
    fn cards_carry_category_and_project() {
        let html = index_html();
        assert!(html.contains(r#"data-category="ecommerce payment dashboard""#));
        assert!(html.contains(r#"data-project="altair""#));
    }

    #[test]
    fn only_all_filter_starts_active() {
        let html = index_html();
        assert!(html.contains(r#"class="filter-btn active" id="filter-all""#));
        assert!(html.contains(r#"class="filter-btn" id="filter-payment""#));
    }

    #[test]
    fn gallery_button_only_for_projects_with_images() {
        let html = index_html();
        assert!(html.contains(r#"data-project="altair" data-action="gallery""#));
        assert!(!html.contains(r#"data-project="notes" data-action="gallery""#));
    }

    #[test]
    fn skill_bars_and_typewriter_carry_data() {
        let config = sample_config();
        let html = index_html();
        let level = config.skills[0].items[0].level;
        assert!(html.contains(&format!(r#"data-width="{level}%""#)));
        assert!(html.contains(&format!(r#"data-text="{}""#, config.typewriter_text())));
    }

    #[test]
    fn about_markdown_is_converted() {
        let mut config = sample_config();
        config.site.about = "This is **bold**.".to_string();
        let html = render_index(&config, &sample_catalog(), "s.css").into_string();
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn html_is_escaped() {
        let mut config = sample_config();
        config.site.owner = "<script>alert('xss')</script>".to_string();
        let html = render_index(&config, &sample_catalog(), "s.css").into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn stylesheet_starts_with_color_properties() {
        let css = stylesheet(&sample_config());
        assert!(css.starts_with(":root,"));
        assert!(css.contains("[data-theme=\"light\"]"));
        assert!(css.contains(".loading-screen"));
    }

    #[test]
    fn fingerprint_tracks_content() {
        let a = fingerprinted_name("body {}");
        let b = fingerprinted_name("body { color: red }");
        assert_ne!(a, b);
        assert_eq!(a, fingerprinted_name("body {}"));
        assert!(a.starts_with("style.") && a.ends_with(".css"));
        assert_eq!(a.len(), "style.".len() + 8 + ".css".len());
    }

    #[test]
    fn generate_writes_site() {
        let source = setup_fixtures();
        let out = TempDir::new().unwrap();
        let report = generate(source.path(), out.path()).unwrap();

        let index = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(index.contains(&report.stylesheet));
        assert!(out.path().join(&report.stylesheet).exists());
        assert!(report.projects > 0);
        assert_eq!(report.assets_copied, 1);
        assert!(out.path().join("assets/profile.svg").exists());
    }

    #[test]
    fn generate_without_assets_copies_nothing() {
        let source = setup_fixtures();
        fs::remove_dir_all(source.path().join("assets")).unwrap();
        let out = TempDir::new().unwrap();
        let report = generate(source.path(), out.path()).unwrap();
        assert_eq!(report.assets_copied, 0);
    }

    #[test]
    fn generate_reports_bad_config() {
        let source = setup_fixtures();
        fs::write(source.path().join("config.toml"), "[site]\nunknown = 1\n").unwrap();
        let out = TempDir::new().unwrap();
        assert!(matches!(
            generate(source.path(), out.path()),
            Err(GenerateError::Config(_))
        ));
    }
}
