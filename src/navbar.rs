//! Presentation state of the nav bar that wraps the navigator: the mobile
//! menu overlay and what each entry should look like.

use crate::layout::PageLayout;
use crate::navigator::{Navigator, ScrollRequest};
use crate::section::{IconToken, SectionId};

/// Nav bar background: see-through over the hero, solid once scrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavChrome {
    Transparent,
    Solid,
}

impl NavChrome {
    pub fn as_str(self) -> &'static str {
        match self {
            NavChrome::Transparent => "transparent",
            NavChrome::Solid => "solid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub id: SectionId,
    pub label: &'static str,
    pub icon: IconToken,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct NavBar {
    navigator: Navigator,
    menu_open: bool,
}

impl NavBar {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            navigator,
            menu_open: false,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    /// Returns the new menu state.
    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// User picked an entry. The menu closes whether or not the section
    /// can be scrolled to.
    pub fn select(&mut self, section: SectionId, layout: &impl PageLayout) -> Option<ScrollRequest> {
        self.close_menu();
        self.navigator.navigate_to(section, layout)
    }

    pub fn chrome(&self) -> NavChrome {
        if self.navigator.scrolled() {
            NavChrome::Solid
        } else {
            NavChrome::Transparent
        }
    }

    /// Entries in registry order.
    pub fn entries(&self) -> impl Iterator<Item = NavEntry> + '_ {
        let active = self.navigator.active();
        self.navigator.registry().ids().map(move |id| {
            let meta = id.meta();
            NavEntry {
                id,
                label: meta.label,
                icon: meta.icon,
                active: id == active,
            }
        })
    }

    pub fn reset(&mut self) {
        self.navigator.reset();
        self.menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollConfig;
    use crate::layout::Extent;
    use crate::section::SectionRegistry;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn bar() -> NavBar {
        NavBar::new(Navigator::new(
            Rc::new(SectionRegistry::standard()),
            ScrollConfig::default(),
        ))
    }

    fn layout(anchor: &str) -> Option<Extent> {
        match anchor {
            "hero-section" => Some(Extent::new(0.0, 800.0)),
            "about-section" => Some(Extent::new(800.0, 800.0)),
            _ => None,
        }
    }

    #[test]
    fn menu_toggles_and_closes() {
        let mut bar = bar();
        assert!(!bar.menu_open());
        assert!(bar.toggle_menu());
        assert!(!bar.toggle_menu());
        bar.toggle_menu();
        bar.close_menu();
        assert!(!bar.menu_open());
    }

    #[test]
    fn select_closes_menu_even_without_target() {
        let mut bar = bar();
        bar.toggle_menu();
        assert_eq!(bar.select(SectionId::Contact, &layout), None);
        assert!(!bar.menu_open());

        bar.toggle_menu();
        let request = bar.select(SectionId::About, &layout).unwrap();
        assert_eq!(request.top, 800.0);
        assert!(!bar.menu_open());
    }

    #[test]
    fn chrome_follows_scrolled_flag() {
        let mut bar = bar();
        assert_eq!(bar.chrome(), NavChrome::Transparent);
        bar.navigator_mut().on_scroll(120.0, &layout);
        assert_eq!(bar.chrome(), NavChrome::Solid);
    }

    #[test]
    fn entries_mark_only_the_active_section() {
        let mut bar = bar();
        bar.navigator_mut().on_scroll(900.0, &layout);
        let entries: Vec<_> = bar.entries().collect();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].label, "Home");
        let active: Vec<_> = entries.iter().filter(|e| e.active).map(|e| e.id).collect();
        assert_eq!(active, vec![SectionId::About]);
    }

    #[test]
    fn reset_closes_menu_and_rewinds_navigator() {
        let mut bar = bar();
        bar.navigator_mut().on_scroll(900.0, &layout);
        bar.toggle_menu();
        bar.reset();
        assert!(!bar.menu_open());
        assert_eq!(bar.navigator().active(), SectionId::Home);
    }
}
