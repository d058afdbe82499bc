//! Scroll-spy: maps the page's scroll offset onto the single active
//! section and resolves "jump to section" requests.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::config::ScrollConfig;
use crate::debug_checks::{check_extent, check_navigator_integrity};
use crate::layout::PageLayout;
use crate::section::{SectionId, SectionRegistry};

/// What the nav bar renders from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorState {
    pub active: SectionId,
    pub scrolled: bool,
}

/// A smooth scroll the host should start so `anchor`'s top edge meets the
/// viewport top. Easing is left to the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRequest {
    pub section: SectionId,
    pub anchor: String,
    pub top: f64,
}

/// First section, in registry order, whose extent contains `point`.
/// Sections whose anchor is missing from the layout are skipped.
pub fn locate(registry: &SectionRegistry, point: f64, layout: &impl PageLayout) -> Option<SectionId> {
    registry.entries().iter().find_map(|entry| {
        let extent = layout.extent(&entry.anchor)?;
        check_extent(&entry.anchor, &extent);
        extent.contains(point).then_some(entry.id)
    })
}

#[derive(Debug, Clone)]
pub struct Navigator {
    registry: Rc<SectionRegistry>,
    config: ScrollConfig,
    active: SectionId,
    scrolled: bool,
}

impl Navigator {
    pub fn new(registry: Rc<SectionRegistry>, config: ScrollConfig) -> Self {
        let navigator = Self {
            active: registry.first(),
            scrolled: false,
            registry,
            config,
        };
        check_navigator_integrity(&navigator);
        navigator
    }

    pub fn registry(&self) -> &SectionRegistry {
        &self.registry
    }

    pub fn config(&self) -> ScrollConfig {
        self.config
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn state(&self) -> NavigatorState {
        NavigatorState {
            active: self.active,
            scrolled: self.scrolled,
        }
    }

    /// Recompute state for the current scroll offset.
    ///
    /// `active` only moves when some section contains the lookahead point;
    /// above the first section or past the last it keeps its value.
    pub fn on_scroll(&mut self, scroll_y: f64, layout: &impl PageLayout) -> NavigatorState {
        if !scroll_y.is_finite() {
            trace!(scroll_y, "ignoring non-finite scroll offset");
            return self.state();
        }

        self.scrolled = scroll_y > self.config.scrolled_threshold;

        let point = scroll_y + self.config.offset;
        if let Some(found) = locate(&self.registry, point, layout) {
            if found != self.active {
                debug!(from = %self.active, to = %found, point, "active section changed");
                self.active = found;
            }
        }

        check_navigator_integrity(self);
        self.state()
    }

    /// Resolve where a jump to `section` should land. `None` when the
    /// section is not registered or its anchor is not on the page.
    pub fn navigate_to(&self, section: SectionId, layout: &impl PageLayout) -> Option<ScrollRequest> {
        let Some(anchor) = self.registry.anchor_of(section) else {
            debug!(%section, "navigation to unregistered section ignored");
            return None;
        };
        let Some(extent) = layout.extent(anchor) else {
            debug!(%section, anchor, "navigation target not mounted");
            return None;
        };
        check_extent(anchor, &extent);
        Some(ScrollRequest {
            section,
            anchor: anchor.to_owned(),
            top: extent.top,
        })
    }

    /// Back to the state of a freshly mounted page.
    pub fn reset(&mut self) {
        self.active = self.registry.first();
        self.scrolled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Extent;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn page(sections: &[(&str, f64, f64)]) -> BTreeMap<String, Extent> {
        sections
            .iter()
            .map(|&(anchor, top, height)| (anchor.to_owned(), Extent::new(top, height)))
            .collect()
    }

    fn standard_page() -> BTreeMap<String, Extent> {
        page(&[
            ("hero-section", 0.0, 900.0),
            ("about-section", 900.0, 1200.0),
            ("timeline-section", 2100.0, 800.0),
            ("projects-section", 2900.0, 1500.0),
            ("contact-section", 4400.0, 1000.0),
        ])
    }

    fn navigator() -> Navigator {
        Navigator::new(Rc::new(SectionRegistry::standard()), ScrollConfig::default())
    }

    #[test]
    fn starts_on_first_section_unscrolled() {
        let nav = navigator();
        assert_eq!(
            nav.state(),
            NavigatorState { active: SectionId::Home, scrolled: false }
        );
    }

    #[test]
    fn point_includes_lookahead_offset() {
        let mut nav = navigator();
        let layout = standard_page();
        // 810 + 100 lands inside about, although the viewport top is still in the hero.
        assert_eq!(nav.on_scroll(810.0, &layout).active, SectionId::About);
        assert_eq!(nav.on_scroll(790.0, &layout).active, SectionId::Home);
    }

    #[test]
    fn scrolled_flag_follows_threshold_only() {
        let mut nav = navigator();
        let layout = standard_page();
        assert!(!nav.on_scroll(50.0, &layout).scrolled);
        assert!(nav.on_scroll(50.5, &layout).scrolled);
        assert_eq!(nav.active(), SectionId::Home);
        assert!(!nav.on_scroll(0.0, &layout).scrolled);
    }

    #[test]
    fn missing_anchor_is_skipped() {
        let mut nav = navigator();
        let mut layout = standard_page();
        layout.remove("timeline-section");
        // Point 2500 falls in the gap the timeline left: no match, keep about.
        nav.on_scroll(1000.0, &layout);
        assert_eq!(nav.on_scroll(2400.0, &layout).active, SectionId::About);
        assert_eq!(nav.on_scroll(2900.0, &layout).active, SectionId::Projects);
    }

    #[test]
    fn past_last_section_keeps_previous_value() {
        let mut nav = navigator();
        let layout = standard_page();
        nav.on_scroll(4500.0, &layout);
        assert_eq!(nav.active(), SectionId::Contact);
        assert_eq!(nav.on_scroll(9000.0, &layout).active, SectionId::Contact);
    }

    #[test]
    fn above_first_section_keeps_previous_value() {
        let registry = Rc::new(SectionRegistry::from_ids([SectionId::About, SectionId::Contact]).unwrap());
        let mut nav = Navigator::new(registry, ScrollConfig { offset: 0.0, scrolled_threshold: 50.0 });
        let layout = page(&[("about-section", 400.0, 400.0), ("contact-section", 800.0, 400.0)]);
        nav.on_scroll(900.0, &layout);
        assert_eq!(nav.on_scroll(0.0, &layout).active, SectionId::Contact);
    }

    #[test]
    fn overlapping_extents_resolve_in_registry_order() {
        let registry = Rc::new(
            SectionRegistry::from_ids([SectionId::Projects, SectionId::About]).unwrap(),
        );
        let layout = page(&[("about-section", 0.0, 1000.0), ("projects-section", 500.0, 1000.0)]);
        assert_eq!(locate(&registry, 700.0, &layout), Some(SectionId::Projects));
        assert_eq!(locate(&registry, 300.0, &layout), Some(SectionId::About));
    }

    #[test]
    fn non_finite_scroll_is_ignored() {
        let mut nav = navigator();
        let layout = standard_page();
        nav.on_scroll(1000.0, &layout);
        let before = nav.state();
        assert_eq!(nav.on_scroll(f64::NAN, &layout), before);
        assert_eq!(nav.on_scroll(f64::INFINITY, &layout), before);
    }

    #[test]
    fn navigate_targets_anchor_top() {
        let nav = navigator();
        let layout = standard_page();
        assert_eq!(
            nav.navigate_to(SectionId::Contact, &layout),
            Some(ScrollRequest {
                section: SectionId::Contact,
                anchor: "contact-section".to_owned(),
                top: 4400.0,
            })
        );
    }

    #[test]
    fn navigate_without_target_is_a_no_op() {
        let nav = Navigator::new(
            Rc::new(SectionRegistry::from_ids([SectionId::Home]).unwrap()),
            ScrollConfig::default(),
        );
        let layout = page(&[("hero-section", 0.0, 900.0)]);
        assert_eq!(nav.navigate_to(SectionId::Contact, &layout), None);

        let nav = navigator();
        assert_eq!(nav.navigate_to(SectionId::Timeline, &page(&[])), None);
        assert_eq!(nav.active(), SectionId::Home);
    }

    #[test]
    fn navigate_does_not_move_active_section() {
        let nav = navigator();
        nav.navigate_to(SectionId::Projects, &standard_page());
        assert_eq!(nav.active(), SectionId::Home);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut nav = navigator();
        nav.on_scroll(3000.0, &standard_page());
        assert_eq!(nav.active(), SectionId::Projects);
        nav.reset();
        assert_eq!(
            nav.state(),
            NavigatorState { active: SectionId::Home, scrolled: false }
        );
    }
}
