//! Read-only view of the page geometry the scroll-spy needs.

use std::collections::{BTreeMap, HashMap};

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub top: f64,
    pub height: f64,
}

impl Extent {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open: the bottom edge belongs to the next section.
    pub fn contains(&self, point: f64) -> bool {
        point >= self.top && point < self.bottom()
    }
}

/// Resolves anchor ids to extents. `None` means the anchor is not in the
/// document right now, which callers treat as "skip".
pub trait PageLayout {
    fn extent(&self, anchor: &str) -> Option<Extent>;
}

impl<F> PageLayout for F
where
    F: Fn(&str) -> Option<Extent>,
{
    fn extent(&self, anchor: &str) -> Option<Extent> {
        self(anchor)
    }
}

impl PageLayout for BTreeMap<String, Extent> {
    fn extent(&self, anchor: &str) -> Option<Extent> {
        self.get(anchor).copied()
    }
}

impl PageLayout for HashMap<String, Extent> {
    fn extent(&self, anchor: &str) -> Option<Extent> {
        self.get(anchor).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_is_half_open() {
        let e = Extent::new(800.0, 800.0);
        assert!(!e.contains(799.9));
        assert!(e.contains(800.0));
        assert!(e.contains(1599.9));
        assert!(!e.contains(1600.0));
    }

    #[test]
    fn empty_extent_contains_nothing() {
        let e = Extent::new(100.0, 0.0);
        assert!(!e.contains(100.0));
        assert!(!Extent::new(100.0, -5.0).contains(98.0));
    }

    #[test]
    fn nan_point_matches_nothing() {
        assert!(!Extent::new(0.0, 1000.0).contains(f64::NAN));
    }

    #[test]
    fn map_and_closure_layouts_resolve_anchors() {
        let mut map = BTreeMap::new();
        map.insert("about-section".to_owned(), Extent::new(10.0, 20.0));
        assert_eq!(map.extent("about-section"), Some(Extent::new(10.0, 20.0)));
        assert_eq!(map.extent("hero-section"), None);

        let closure = |anchor: &str| (anchor == "hero-section").then(|| Extent::new(0.0, 5.0));
        assert_eq!(closure.extent("hero-section"), Some(Extent::new(0.0, 5.0)));
        assert_eq!(closure.extent("contact-section"), None);
    }
}
