//! Shared test utilities for the folio test suite.
//!
//! Provides a fixture copy on disk, an in-code sample catalog shaped like the
//! real one, and a scripted submitter that records what it was handed.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut page = sample_page();
//! let catalog = sample_catalog();
//! assert_eq!(catalog.matching("payment").len(), 2);
//!
//! let submitter = ScriptedSubmitter::failing();
//! let log = submitter.clone();
//! // ... hand `submitter` to a Portfolio, then inspect `log.seen()`
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

use crate::catalog::{Catalog, Project, ProjectStatus};
use crate::config::{SiteConfig, stock_config};
use crate::contact::{FormFields, SubmitError, Submitter};
use crate::view::{PageLayout, PageModel, build_page};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Sample data
// =========================================================================

/// A minimal valid project with the given categories and no images.
pub fn sample_project(id: &str, categories: &[&str]) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {id}"),
        kind: "Web Platform".to_string(),
        summary: format!("Summary of {id}"),
        description: format!("Long description of {id}"),
        status: ProjectStatus::Live,
        categories: categories.iter().map(|c| c.to_string()).collect(),
        technologies: vec!["Laravel".to_string(), "MySQL".to_string()],
        features: vec!["Admin dashboard".to_string()],
        thumbnail: None,
        images_base_path: String::new(),
        images: Vec::new(),
        live_url: None,
    }
}

fn with_images(mut project: Project, files: &[&str]) -> Project {
    project.images_base_path = format!("assets/projects/{}/", project.id);
    project.images = files.iter().map(|f| f.to_string()).collect();
    project
}

/// Five projects; category tags first appear in the order
/// ecommerce, payment, dashboard, api, frontend.
pub fn sample_catalog() -> Catalog {
    let mut altair = with_images(
        sample_project("altair", &["ecommerce", "payment", "dashboard"]),
        &["landing.png", "shop.png", "checkout.png", "admin.png"],
    );
    altair.title = "Altair Innovation - Automotive Parts".to_string();
    altair.live_url = Some("https://altair.example.com".to_string());
    altair.features.push("Stripe payment integration".to_string());

    let olx = with_images(
        sample_project("olx", &["ecommerce", "dashboard", "api", "frontend"]),
        &["home.png"],
    );

    let mut yacht = with_images(
        sample_project("yacht", &["ecommerce", "payment", "dashboard", "api"]),
        &["fleet.png", "booking.png"],
    );
    yacht.status = ProjectStatus::Private;

    let jsc = with_images(
        sample_project("jsc", &["dashboard", "api", "frontend"]),
        &["pos.png", "reports.png", "stock.png"],
    );

    let notes = sample_project("notes", &["api"]);

    Catalog::new(vec![altair, olx, yacht, jsc, notes]).unwrap()
}

pub fn sample_config() -> SiteConfig {
    stock_config()
}

/// The sample site built with the default layout.
pub fn sample_page() -> PageModel {
    build_page(&sample_config(), &sample_catalog(), &PageLayout::default())
}

// =========================================================================
// Contact submitter double
// =========================================================================

/// Submitter with a fixed outcome that records every submission.
///
/// Clones share the record, so a test can keep one clone after handing the
/// other to a coordinator.
#[derive(Debug, Clone)]
pub struct ScriptedSubmitter {
    outcome: Result<(), SubmitError>,
    latency_ms: u64,
    seen: Rc<RefCell<Vec<FormFields>>>,
}

impl ScriptedSubmitter {
    pub fn succeeding() -> Self {
        Self {
            outcome: Ok(()),
            latency_ms: 2000,
            seen: Rc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            outcome: Err(SubmitError("scripted failure".to_string())),
            ..Self::succeeding()
        }
    }

    /// Every submission so far, oldest first.
    pub fn seen(&self) -> Vec<FormFields> {
        self.seen.borrow().clone()
    }
}

impl Submitter for ScriptedSubmitter {
    fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    fn submit(&mut self, fields: &FormFields) -> Result<(), SubmitError> {
        self.seen.borrow_mut().push(fields.clone());
        self.outcome.clone()
    }
}
