//! Reveal-on-scroll and timed cosmetic effects.
//!
//! | Piece | Role |
//! |-------|------|
//! | [`reveal`] | Intersection test and the set of already-revealed elements |
//! | [`effects`] | Typewriter, title rotator and counter state machines |
//! | [`AnimationScheduler`] | Applies effects to the surface and emits the follow-up tasks |
//!
//! Observed elements are every section plus the skill categories, project
//! cards, timeline items and cert cards. Each one reveals at most once for the
//! life of the page.

pub mod effects;
pub mod reveal;

use crate::config::AnimationConfig;
use crate::timeline::Deferred;
use crate::view::{Surface, classes, ids};
use effects::{Counter, TitleRotator, Typewriter, css_seconds, leading_integer};
use reveal::{RevealTracker, intersection_ratio};
use tracing::debug;

pub const FADE_IN_UP: &str = "fadeInUp 0.6s ease-out forwards";
const PROJECT_CARD_STAGGER_MS: u64 = 100;
const CERT_CARD_STAGGER_MS: u64 = 200;

/// Classes observed for reveal besides sections, in page order.
const OBSERVED_CLASSES: [&str; 4] = [
    classes::SKILL_CATEGORY,
    classes::PROJECT_CARD,
    classes::TIMELINE_ITEM,
    classes::CERT_CARD,
];

#[derive(Debug, Clone, PartialEq)]
pub enum AnimationTask {
    HideLoadingScreen,
    SkillBar { id: String },
    CounterFrame { id: String, counter: Counter },
    TypewriterTick,
    TitleFadeOut,
    TitleSwap,
}

/// The `animation` shorthand for a staggered fade-up.
pub fn fade_in_up(delay_ms: u64) -> String {
    format!("fadeInUp 0.6s ease-out {}s forwards", css_seconds(delay_ms))
}

pub struct AnimationScheduler {
    config: AnimationConfig,
    reveals: RevealTracker,
    typewriter: Option<Typewriter>,
    titles: Option<TitleRotator>,
    loaded: bool,
}

impl AnimationScheduler {
    /// Collect observed elements, put them in their pre-reveal state and reset
    /// the skill bars.
    pub fn new(config: AnimationConfig, roles: Vec<String>, surface: &mut dyn Surface) -> Self {
        let mut observed = surface.elements_with_class(classes::SECTION);
        for class in OBSERVED_CLASSES {
            observed.extend(surface.elements_with_class(class));
        }
        for id in &observed {
            surface.set_style(id, "opacity", "0");
            surface.set_style(id, "transform", "translateY(30px)");
        }
        for bar in surface.elements_with_class(classes::SKILL_PROGRESS) {
            surface.set_style(&bar, "width", "0%");
        }

        let text = surface
            .attribute(ids::TYPEWRITER, "data-text")
            .unwrap_or_default();
        let typewriter = Typewriter::new(&text, config.typewriter.clone());
        let titles = TitleRotator::new(roles);

        Self {
            config,
            reveals: RevealTracker::new(observed),
            typewriter,
            titles,
            loaded: false,
        }
    }

    /// Kick off the typewriter and title rotation.
    pub fn start(&self) -> Vec<Deferred<AnimationTask>> {
        let mut tasks = Vec::new();
        if self.typewriter.is_some() {
            tasks.push(Deferred::new(
                self.config.typewriter.start_delay_ms,
                AnimationTask::TypewriterTick,
            ));
        }
        if self.titles.is_some() {
            tasks.push(Deferred::new(
                self.config.titles.start_delay_ms,
                AnimationTask::TitleFadeOut,
            ));
        }
        tasks
    }

    /// Window load: hide the loading screen after its delay. Only the first
    /// load counts.
    pub fn on_load(&mut self) -> Vec<Deferred<AnimationTask>> {
        if self.loaded {
            return Vec::new();
        }
        self.loaded = true;
        vec![Deferred::new(
            self.config.loading_screen_ms,
            AnimationTask::HideLoadingScreen,
        )]
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveals.is_revealed(id)
    }

    pub fn revealed_count(&self) -> usize {
        self.reveals.revealed_count()
    }

    pub fn observed(&self) -> &[String] {
        self.reveals.observed()
    }

    /// Reveal every observed element that is now visible enough.
    pub fn check_visibility(&mut self, surface: &mut dyn Surface) -> Vec<Deferred<AnimationTask>> {
        let viewport = surface.viewport();
        let due: Vec<String> = self
            .reveals
            .pending()
            .filter(|id| {
                surface.bounds(id).is_some_and(|b| {
                    let ratio = intersection_ratio(b, viewport, self.config.reveal_bottom_margin);
                    ratio > 0.0 && ratio >= self.config.reveal_threshold
                })
            })
            .map(str::to_string)
            .collect();

        let mut tasks = Vec::new();
        for id in due {
            if self.reveals.mark(&id) {
                tasks.extend(self.reveal(surface, &id));
            }
        }
        tasks
    }

    fn reveal(&mut self, surface: &mut dyn Surface, id: &str) -> Vec<Deferred<AnimationTask>> {
        debug!(id, "reveal");
        surface.set_style(id, "opacity", "1");
        surface.set_style(id, "transform", "translateY(0)");

        let mut tasks = Vec::new();
        if surface.has_class(id, "skills") {
            tasks.extend(self.fill_skill_bars(surface));
        }
        if surface.has_class(id, "about") {
            tasks.extend(self.start_counters(surface));
        }
        if surface.has_class(id, classes::SKILL_CATEGORY)
            || surface.has_class(id, classes::TIMELINE_ITEM)
        {
            surface.set_style(id, "animation", FADE_IN_UP);
        }
        if surface.has_class(id, classes::PROJECT_CARD) {
            let index = surface.sibling_index(id).unwrap_or(0) as u64;
            surface.set_style(id, "animation", &fade_in_up(index * PROJECT_CARD_STAGGER_MS));
        }
        if surface.has_class(id, classes::CERT_CARD) {
            let index = surface.sibling_index(id).unwrap_or(0) as u64;
            surface.set_style(id, "animation", &fade_in_up(index * CERT_CARD_STAGGER_MS));
        }
        tasks
    }

    fn fill_skill_bars(&self, surface: &dyn Surface) -> Vec<Deferred<AnimationTask>> {
        surface
            .elements_with_class(classes::SKILL_PROGRESS)
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                Deferred::new(
                    i as u64 * self.config.skill_bar_stagger_ms,
                    AnimationTask::SkillBar { id },
                )
            })
            .collect()
    }

    /// Start every stat counter. The first frame renders immediately.
    fn start_counters(&self, surface: &mut dyn Surface) -> Vec<Deferred<AnimationTask>> {
        let mut tasks = Vec::new();
        for id in surface.elements_with_class(classes::STAT_NUMBER) {
            let Some(target) = surface.text(&id).as_deref().and_then(leading_integer) else {
                debug!(id = %id, "counter has no numeric target");
                continue;
            };
            let counter = Counter::new(
                target,
                self.config.counter_duration_ms,
                self.config.frame_ms,
            );
            tasks.extend(self.counter_frame(surface, id, counter));
        }
        tasks
    }

    fn counter_frame(
        &self,
        surface: &mut dyn Surface,
        id: String,
        mut counter: Counter,
    ) -> Option<Deferred<AnimationTask>> {
        let (text, done) = counter.advance();
        surface.set_text(&id, &text);
        if done {
            None
        } else {
            Some(Deferred::new(
                self.config.frame_ms,
                AnimationTask::CounterFrame { id, counter },
            ))
        }
    }

    /// Run a due task and return its follow-ups.
    pub fn run(
        &mut self,
        surface: &mut dyn Surface,
        task: AnimationTask,
    ) -> Vec<Deferred<AnimationTask>> {
        match task {
            AnimationTask::HideLoadingScreen => {
                surface.add_class(ids::LOADING_SCREEN, classes::HIDDEN);
                surface.set_style(ids::HERO_CONTENT, "animation", "fadeInUp 1s ease-out forwards");
                surface.set_style(
                    ids::HERO_IMAGE,
                    "animation",
                    "fadeInRight 1s ease-out 0.3s forwards",
                );
                debug!("loading screen hidden");
                Vec::new()
            }
            AnimationTask::SkillBar { id } => {
                if let Some(width) = surface.attribute(&id, "data-width") {
                    surface.set_style(&id, "width", &width);
                }
                Vec::new()
            }
            AnimationTask::CounterFrame { id, counter } => {
                self.counter_frame(surface, id, counter).into_iter().collect()
            }
            AnimationTask::TypewriterTick => {
                let Some(tw) = self.typewriter.as_mut() else {
                    return Vec::new();
                };
                let delay = tw.tick();
                surface.set_text(ids::TYPEWRITER, &tw.text());
                vec![Deferred::new(delay, AnimationTask::TypewriterTick)]
            }
            AnimationTask::TitleFadeOut => {
                surface.set_style(ids::DYNAMIC_TITLE, "opacity", "0");
                vec![
                    Deferred::new(self.config.titles.fade_ms, AnimationTask::TitleSwap),
                    Deferred::new(self.config.titles.interval_ms, AnimationTask::TitleFadeOut),
                ]
            }
            AnimationTask::TitleSwap => {
                if let Some(rotator) = self.titles.as_mut() {
                    let title = rotator.advance().to_string();
                    surface.set_text(ids::DYNAMIC_TITLE, &title);
                    surface.set_style(ids::DYNAMIC_TITLE, "opacity", "1");
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{sample_config, sample_page};
    use crate::timeline::Timeline;
    use crate::view::PageModel;

    fn scheduler(page: &mut PageModel) -> AnimationScheduler {
        let config = sample_config();
        AnimationScheduler::new(config.animation, config.site.roles, page)
    }

    /// Drive `scheduler` until `until`, returning every task it ran with its time.
    fn run_until(
        scheduler: &mut AnimationScheduler,
        page: &mut PageModel,
        timeline: &mut Timeline<AnimationTask>,
        until: u64,
    ) -> Vec<(u64, AnimationTask)> {
        let mut ran = Vec::new();
        while let Some(task) = timeline.pop_due(until) {
            ran.push((timeline.now(), task.clone()));
            let follow = scheduler.run(page, task);
            timeline.schedule_all(follow);
        }
        timeline.settle(until);
        ran
    }

    #[test]
    fn new_hides_observed_and_resets_bars() {
        let mut page = sample_page();
        let s = scheduler(&mut page);
        assert!(s.observed().iter().any(|id| id == "about"));
        assert!(s.observed().iter().any(|id| id == "card-altair"));
        assert_eq!(page.style("card-altair", "opacity").as_deref(), Some("0"));
        assert_eq!(page.style(&ids::skill_bar(0, 0), "width").as_deref(), Some("0%"));
    }

    #[test]
    fn initial_check_reveals_only_visible() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        s.check_visibility(&mut page);
        assert!(s.is_revealed("home"));
        assert!(!s.is_revealed("about"));
        assert_eq!(page.style("home", "opacity").as_deref(), Some("1"));
        assert_eq!(page.style("home", "transform").as_deref(), Some("translateY(0)"));
    }

    #[test]
    fn reveal_fires_once() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        s.check_visibility(&mut page);
        let count = s.revealed_count();
        page.set_style("home", "opacity", "0");
        s.check_visibility(&mut page);
        assert_eq!(s.revealed_count(), count);
        assert_eq!(page.style("home", "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn threshold_respects_bottom_margin() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        // about spans [800, 1600); band is [scroll, scroll + 750)
        page.set_scroll(129.0);
        s.check_visibility(&mut page);
        assert!(!s.is_revealed("about"));
        page.set_scroll(130.0);
        s.check_visibility(&mut page);
        assert!(s.is_revealed("about"));
    }

    #[test]
    fn skills_reveal_staggers_bars() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("skills").unwrap().top);
        let tasks = s.check_visibility(&mut page);
        let bars: Vec<_> = tasks
            .iter()
            .filter(|d| matches!(d.task, AnimationTask::SkillBar { .. }))
            .map(|d| d.delay_ms)
            .collect();
        assert!(bars.len() > 1);
        for (i, delay) in bars.iter().enumerate() {
            assert_eq!(*delay, i as u64 * 100);
        }

        let mut timeline = Timeline::new();
        timeline.schedule_all(tasks);
        run_until(&mut s, &mut page, &mut timeline, 10_000);
        let level = sample_config().skills[0].items[0].level;
        assert_eq!(
            page.style(&ids::skill_bar(0, 0), "width"),
            Some(format!("{level}%"))
        );
    }

    #[test]
    fn about_reveal_counts_up_to_targets() {
        let mut page = sample_page();
        let config = sample_config();
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("about").unwrap().top);
        let tasks = s.check_visibility(&mut page);
        assert_eq!(page.text("stat-0").as_deref(), Some("0+"));

        let mut timeline = Timeline::new();
        timeline.schedule_all(tasks);
        run_until(&mut s, &mut page, &mut timeline, 1000);
        let mid: u64 = leading_integer(&page.text("stat-0").unwrap()).unwrap();
        assert!(mid > 0 && mid < config.stats[0].value);

        run_until(&mut s, &mut page, &mut timeline, 5000);
        for (i, stat) in config.stats.iter().enumerate() {
            assert_eq!(page.text(&ids::stat(i)), Some(format!("{}+", stat.value)));
        }
        assert!(timeline.is_idle());
    }

    #[test]
    fn counter_120_ends_at_120_plus() {
        let mut page = sample_page();
        page.set_text("stat-0", "120+");
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("about").unwrap().top);
        let mut timeline = Timeline::new();
        timeline.schedule_all(s.check_visibility(&mut page));
        let mut max_seen = 0;
        while let Some(task) = timeline.pop_due(10_000) {
            let follow = s.run(&mut page, task);
            timeline.schedule_all(follow);
            let n = leading_integer(&page.text("stat-0").unwrap()).unwrap();
            max_seen = max_seen.max(n);
        }
        assert_eq!(page.text("stat-0").as_deref(), Some("120+"));
        assert_eq!(max_seen, 120);
    }

    #[test]
    fn non_numeric_counter_left_alone() {
        let mut page = sample_page();
        page.set_text("stat-0", "many");
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("about").unwrap().top);
        s.check_visibility(&mut page);
        assert_eq!(page.text("stat-0").as_deref(), Some("many"));
    }

    #[test]
    fn cards_stagger_by_sibling_index() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("projects").unwrap().top);
        s.check_visibility(&mut page);
        let cards = page.elements_with_class(classes::PROJECT_CARD);
        assert_eq!(
            page.style(&cards[0], "animation").as_deref(),
            Some("fadeInUp 0.6s ease-out 0s forwards")
        );
        assert_eq!(
            page.style(&cards[2], "animation").as_deref(),
            Some("fadeInUp 0.6s ease-out 0.2s forwards")
        );
    }

    #[test]
    fn cert_cards_stagger_wider() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("certifications").unwrap().top);
        s.check_visibility(&mut page);
        assert_eq!(
            page.style(&ids::cert_card(1), "animation").as_deref(),
            Some("fadeInUp 0.6s ease-out 0.2s forwards")
        );
    }

    #[test]
    fn timeline_items_fade_up() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        page.set_scroll(page.bounds("experience").unwrap().top);
        s.check_visibility(&mut page);
        assert_eq!(
            page.style(&ids::timeline_item(0), "animation").as_deref(),
            Some(FADE_IN_UP)
        );
    }

    #[test]
    fn typewriter_runs_in_delay_order() {
        let mut page = sample_page();
        page.set_attribute(ids::TYPEWRITER, "data-text", "Hey");
        let mut s = scheduler(&mut page);
        let mut timeline = Timeline::new();
        timeline.schedule_all(s.start());

        run_until(&mut s, &mut page, &mut timeline, 999);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some(""));
        run_until(&mut s, &mut page, &mut timeline, 1000);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some("H"));
        run_until(&mut s, &mut page, &mut timeline, 1200);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some("Hey"));
        // hold 2000ms, then delete every 50ms
        run_until(&mut s, &mut page, &mut timeline, 3199);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some("Hey"));
        run_until(&mut s, &mut page, &mut timeline, 3200);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some("He"));
        run_until(&mut s, &mut page, &mut timeline, 3300);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some(""));
        // pause 500ms, then type again
        run_until(&mut s, &mut page, &mut timeline, 3799);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some(""));
        run_until(&mut s, &mut page, &mut timeline, 3800);
        assert_eq!(page.text(ids::TYPEWRITER).as_deref(), Some("H"));
    }

    #[test]
    fn empty_typewriter_schedules_nothing() {
        let mut page = sample_page();
        page.set_attribute(ids::TYPEWRITER, "data-text", "");
        let s = scheduler(&mut page);
        assert!(
            !s.start()
                .iter()
                .any(|d| d.task == AnimationTask::TypewriterTick)
        );
    }

    #[test]
    fn titles_rotate_with_fade() {
        let mut page = sample_page();
        let roles = sample_config().site.roles;
        let mut s = scheduler(&mut page);
        let mut timeline = Timeline::new();
        timeline.schedule_all(s.start());

        run_until(&mut s, &mut page, &mut timeline, 2000);
        assert_eq!(page.style(ids::DYNAMIC_TITLE, "opacity").as_deref(), Some("0"));
        run_until(&mut s, &mut page, &mut timeline, 2150);
        assert_eq!(page.text(ids::DYNAMIC_TITLE), Some(roles[0].clone()));
        assert_eq!(page.style(ids::DYNAMIC_TITLE, "opacity").as_deref(), Some("1"));
        run_until(&mut s, &mut page, &mut timeline, 5150);
        assert_eq!(page.text(ids::DYNAMIC_TITLE), Some(roles[1].clone()));
    }

    #[test]
    fn load_hides_loading_screen_once() {
        let mut page = sample_page();
        let mut s = scheduler(&mut page);
        let mut timeline = Timeline::new();
        timeline.schedule_all(s.on_load());
        assert!(s.on_load().is_empty());

        run_until(&mut s, &mut page, &mut timeline, 2499);
        assert!(!page.has_class(ids::LOADING_SCREEN, classes::HIDDEN));
        run_until(&mut s, &mut page, &mut timeline, 2500);
        assert!(page.has_class(ids::LOADING_SCREEN, classes::HIDDEN));
        assert_eq!(
            page.style(ids::HERO_IMAGE, "animation").as_deref(),
            Some("fadeInRight 1s ease-out 0.3s forwards")
        );
    }
}
