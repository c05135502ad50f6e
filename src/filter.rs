//! Category filter over the rendered project cards.

use crate::animation::FADE_IN_UP;
use crate::catalog::ALL_CATEGORIES;
use crate::view::{Surface, classes};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ProjectFilter {
    active: String,
}

impl Default for ProjectFilter {
    fn default() -> Self {
        Self {
            active: ALL_CATEGORIES.to_string(),
        }
    }
}

impl ProjectFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Select a filter tag.
    ///
    /// Returns `false` without touching anything when no filter control
    /// carries `tag`, so exactly one control stays active.
    pub fn select(&mut self, surface: &mut dyn Surface, tag: &str) -> bool {
        let buttons = surface.elements_with_class(classes::FILTER_BUTTON);
        let Some(chosen) = buttons
            .iter()
            .find(|b| surface.attribute(b, "data-filter").as_deref() == Some(tag))
            .cloned()
        else {
            debug!(tag, "no filter control for tag");
            return false;
        };

        for button in &buttons {
            surface.remove_class(button, classes::ACTIVE);
        }
        surface.add_class(&chosen, classes::ACTIVE);

        let mut shown = 0;
        for card in surface.elements_with_class(classes::PROJECT_CARD) {
            let categories = surface.attribute(&card, "data-category").unwrap_or_default();
            if card_matches(&categories, tag) {
                surface.remove_class(&card, classes::HIDDEN);
                surface.set_style(&card, "animation", FADE_IN_UP);
                shown += 1;
            } else {
                surface.add_class(&card, classes::HIDDEN);
            }
        }
        self.active = tag.to_string();
        debug!(tag, shown, "filter applied");
        true
    }

    /// Ids of the cards not hidden, in page order.
    pub fn visible_cards(&self, surface: &dyn Surface) -> Vec<String> {
        surface
            .elements_with_class(classes::PROJECT_CARD)
            .into_iter()
            .filter(|c| !surface.has_class(c, classes::HIDDEN))
            .collect()
    }
}

/// Whether a card with the whitespace-separated `categories` passes `tag`.
pub fn card_matches(categories: &str, tag: &str) -> bool {
    tag == ALL_CATEGORIES || categories.split_whitespace().any(|c| c == tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_catalog, sample_page};
    use crate::view::{PageModel, ids};

    fn active_buttons(page: &PageModel) -> Vec<String> {
        page.elements_with_class(classes::FILTER_BUTTON)
            .into_iter()
            .filter(|b| page.has_class(b, classes::ACTIVE))
            .collect()
    }

    #[test]
    fn card_matches_splits_on_whitespace() {
        assert!(card_matches("api  frontend", "frontend"));
        assert!(!card_matches("api-frontend", "api"));
        assert!(card_matches("", "all"));
        assert!(!card_matches("", "api"));
    }

    #[test]
    fn default_is_all() {
        assert_eq!(ProjectFilter::new().active(), "all");
    }

    #[test]
    fn all_shows_every_card() {
        let mut page = sample_page();
        let mut filter = ProjectFilter::new();
        filter.select(&mut page, "payment");
        assert!(filter.select(&mut page, "all"));
        assert_eq!(filter.visible_cards(&page).len(), sample_catalog().len());
    }

    #[test]
    fn tag_shows_exactly_matching_cards() {
        let catalog = sample_catalog();
        for tag in catalog.categories() {
            let mut page = sample_page();
            let mut filter = ProjectFilter::new();
            assert!(filter.select(&mut page, tag));
            let expected: Vec<String> = catalog
                .matching(tag)
                .iter()
                .map(|p| ids::project_card(&p.id))
                .collect();
            assert_eq!(filter.visible_cards(&page), expected, "tag {tag}");
        }
    }

    #[test]
    fn exactly_one_button_active() {
        let mut page = sample_page();
        let mut filter = ProjectFilter::new();
        filter.select(&mut page, "api");
        assert_eq!(active_buttons(&page), vec!["filter-api"]);
        filter.select(&mut page, "dashboard");
        assert_eq!(active_buttons(&page), vec!["filter-dashboard"]);
        assert_eq!(filter.active(), "dashboard");
    }

    #[test]
    fn unknown_tag_is_noop() {
        let mut page = sample_page();
        let mut filter = ProjectFilter::new();
        filter.select(&mut page, "payment");
        let visible = filter.visible_cards(&page);
        assert!(!filter.select(&mut page, "blockchain"));
        assert_eq!(filter.active(), "payment");
        assert_eq!(filter.visible_cards(&page), visible);
        assert_eq!(active_buttons(&page), vec!["filter-payment"]);
    }

    #[test]
    fn shown_cards_restart_animation() {
        let mut page = sample_page();
        let mut filter = ProjectFilter::new();
        filter.select(&mut page, "payment");
        assert_eq!(
            page.style("card-altair", "animation").as_deref(),
            Some(FADE_IN_UP)
        );
    }
}
