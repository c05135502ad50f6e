//! Project catalog: the static project records the portfolio renders.
//!
//! Projects are read once from `projects.toml` in the content directory and
//! never mutated afterwards. File order is display order.
//!
//! ```toml
//! [[project]]
//! id = "altair"
//! title = "Altair Innovation - Automotive Parts"
//! kind = "E-commerce Platform"
//! summary = "Automotive e-commerce platform with Stripe payments."
//! description = "Comprehensive automotive e-commerce platform ..."
//! status = "live"                      # live | private
//! categories = ["ecommerce", "payment", "dashboard"]
//! technologies = ["Laravel 10", "Stripe API", "MySQL 8"]
//! features = ["Stripe payment integration", "Admin dashboard"]
//! images_base_path = "assets/projects/altair/"
//! images = ["landing.png", "shop.png"]
//! thumbnail = "assets/projects/altair/landing.png"   # optional, first image otherwise
//! live_url = "https://example.com"                   # optional
//! ```
//!
//! ## Validation
//!
//! - Ids must be non-empty and unique (they key modal and gallery lookups).
//! - Titles must be non-empty.
//! - Category tags must be non-empty single words: cards carry them as a
//!   whitespace-separated `data-category` attribute.
//! - The tag `all` is reserved for the unfiltered view.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Filter sentinel that matches every project.
pub const ALL_CATEGORIES: &str = "all";

/// Number of features and technologies shown on a project card.
pub const CARD_ITEM_LIMIT: usize = 6;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Project with empty id at position {0}")]
    EmptyId(usize),
    #[error("Duplicate project id: {0}")]
    DuplicateId(String),
    #[error("Project '{0}' uses the reserved category '{ALL_CATEGORIES}'")]
    ReservedCategory(String),
    #[error("Catalog validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Live,
    Private,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Live => "Live",
            ProjectStatus::Private => "Private",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ProjectStatus::Live => "status-live",
            ProjectStatus::Private => "status-private",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Display type shown above the card title, e.g. "E-commerce Platform".
    #[serde(default)]
    pub kind: String,
    /// Short card description.
    #[serde(default)]
    pub summary: String,
    /// Long description shown in the details modal.
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Prefix joined onto every entry of `images`.
    #[serde(default)]
    pub images_base_path: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
}

impl Project {
    /// Gallery image paths, in order, with the base path applied.
    pub fn image_paths(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|file| format!("{}{}", self.images_base_path, file))
            .collect()
    }

    /// Card thumbnail: the explicit thumbnail, else the first gallery image.
    pub fn thumbnail_path(&self) -> Option<String> {
        self.thumbnail
            .clone()
            .or_else(|| self.image_paths().into_iter().next())
    }

    /// Value of the card's `data-category` attribute.
    pub fn category_attr(&self) -> String {
        self.categories.join(" ")
    }

    pub fn card_features(&self) -> &[String] {
        &self.features[..self.features.len().min(CARD_ITEM_LIMIT)]
    }

    pub fn card_technologies(&self) -> &[String] {
        &self.technologies[..self.technologies.len().min(CARD_ITEM_LIMIT)]
    }

    /// Card summary, falling back to the long description.
    pub fn card_summary(&self) -> &str {
        if self.summary.is_empty() {
            &self.description
        } else {
            &self.summary
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "project")]
    projects: Vec<Project>,
}

/// The ordered, validated list of projects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    projects: Vec<Project>,
}

impl Catalog {
    /// Build a catalog from records, validating them.
    pub fn new(projects: Vec<Project>) -> Result<Self, CatalogError> {
        validate(&projects)?;
        Ok(Self { projects })
    }

    /// Parse and validate `projects.toml` content.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::new(file.projects)
    }

    /// Load `projects.toml` from a content directory.
    ///
    /// A missing file yields an empty catalog; the page renders with an empty
    /// project grid.
    pub fn load(dir: &Path) -> Result<Self, CatalogError> {
        let path = dir.join("projects.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Every category tag in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .flat_map(|p| p.categories.iter())
            .filter(|c| seen.insert(c.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Projects a filter tag selects.
    pub fn matching(&self, tag: &str) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| tag == ALL_CATEGORIES || p.categories.iter().any(|c| c == tag))
            .collect()
    }
}

fn validate(projects: &[Project]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    for (pos, project) in projects.iter().enumerate() {
        if project.id.trim().is_empty() {
            return Err(CatalogError::EmptyId(pos + 1));
        }
        if !ids.insert(project.id.as_str()) {
            return Err(CatalogError::DuplicateId(project.id.clone()));
        }
        if project.title.trim().is_empty() {
            return Err(CatalogError::Validation(format!(
                "project '{}' has an empty title",
                project.id
            )));
        }
        for category in &project.categories {
            if category == ALL_CATEGORIES {
                return Err(CatalogError::ReservedCategory(project.id.clone()));
            }
            if category.is_empty() || category.chars().any(char::is_whitespace) {
                return Err(CatalogError::Validation(format!(
                    "project '{}' has invalid category '{category}'",
                    project.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_catalog, sample_project};
    use tempfile::TempDir;

    #[test]
    fn parse_minimal_project() {
        let catalog = Catalog::parse(
            r#"
[[project]]
id = "one"
title = "One"
description = "First"
"#,
        )
        .unwrap();
        let project = catalog.get("one").unwrap();
        assert_eq!(project.status, ProjectStatus::Live);
        assert!(project.images.is_empty());
        assert_eq!(project.live_url, None);
    }

    #[test]
    fn parse_preserves_file_order() {
        let catalog = Catalog::parse(
            r#"
[[project]]
id = "b"
title = "B"
description = ""

[[project]]
id = "a"
title = "A"
description = ""
"#,
        )
        .unwrap();
        let ids: Vec<&str> = catalog.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn parse_status_private() {
        let catalog = Catalog::parse(
            r#"
[[project]]
id = "x"
title = "X"
description = ""
status = "private"
"#,
        )
        .unwrap();
        let status = catalog.get("x").unwrap().status;
        assert_eq!(status, ProjectStatus::Private);
        assert_eq!(status.label(), "Private");
        assert_eq!(status.css_class(), "status-private");
    }

    #[test]
    fn unknown_field_rejected() {
        let result = Catalog::parse(
            r#"
[[project]]
id = "x"
title = "X"
description = ""
demo = "nope"
"#,
        );
        assert!(matches!(result, Err(CatalogError::Toml(_))));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = Catalog::new(vec![sample_project("dup", &[]), sample_project("dup", &[])]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "dup"));
    }

    #[test]
    fn empty_id_rejected() {
        let result = Catalog::new(vec![sample_project("ok", &[]), sample_project("  ", &[])]);
        assert!(matches!(result, Err(CatalogError::EmptyId(2))));
    }

    #[test]
    fn empty_title_rejected() {
        let mut project = sample_project("p", &[]);
        project.title = String::new();
        assert!(matches!(
            Catalog::new(vec![project]),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn reserved_category_rejected() {
        let result = Catalog::new(vec![sample_project("p", &["all"])]);
        assert!(matches!(result, Err(CatalogError::ReservedCategory(_))));
    }

    #[test]
    fn whitespace_category_rejected() {
        let result = Catalog::new(vec![sample_project("p", &["web design"])]);
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn image_paths_apply_base_path() {
        let mut project = sample_project("p", &[]);
        project.images_base_path = "assets/p/".to_string();
        project.images = vec!["a.png".to_string(), "b.png".to_string()];
        assert_eq!(project.image_paths(), vec!["assets/p/a.png", "assets/p/b.png"]);
        assert_eq!(project.thumbnail_path().as_deref(), Some("assets/p/a.png"));
    }

    #[test]
    fn explicit_thumbnail_wins() {
        let mut project = sample_project("p", &[]);
        project.images = vec!["a.png".to_string()];
        project.thumbnail = Some("thumb.png".to_string());
        assert_eq!(project.thumbnail_path().as_deref(), Some("thumb.png"));
    }

    #[test]
    fn card_lists_are_capped() {
        let mut project = sample_project("p", &[]);
        project.features = (0..9).map(|i| format!("f{i}")).collect();
        project.technologies = vec!["Rust".to_string()];
        assert_eq!(project.card_features().len(), CARD_ITEM_LIMIT);
        assert_eq!(project.card_technologies(), &["Rust".to_string()]);
    }

    #[test]
    fn card_summary_falls_back_to_description() {
        let mut project = sample_project("p", &[]);
        project.summary = String::new();
        project.description = "Long form".to_string();
        assert_eq!(project.card_summary(), "Long form");
    }

    #[test]
    fn category_attr_is_space_separated() {
        let project = sample_project("p", &["api", "frontend"]);
        assert_eq!(project.category_attr(), "api frontend");
    }

    #[test]
    fn categories_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.categories(),
            vec!["ecommerce", "payment", "dashboard", "api", "frontend"]
        );
    }

    #[test]
    fn matching_all_returns_everything() {
        let catalog = sample_catalog();
        assert_eq!(catalog.matching(ALL_CATEGORIES).len(), catalog.len());
    }

    #[test]
    fn matching_tag_filters() {
        let catalog = sample_catalog();
        let ids: Vec<&str> = catalog
            .matching("payment")
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["altair", "yacht"]);
        assert!(catalog.matching("nonexistent").is_empty());
    }

    #[test]
    fn get_unknown_is_none() {
        assert!(sample_catalog().get("nope").is_none());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn load_reads_projects_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("projects.toml"),
            r#"
[[project]]
id = "site"
title = "Site"
description = "A site"
categories = ["frontend"]
"#,
        )
        .unwrap();
        let catalog = Catalog::load(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.categories(), vec!["frontend"]);
    }
}
