//! Debug-only integrity checks for detecting corrupted state early.
//! All functions are no-ops in release builds.

use crate::layout::Extent;
use crate::navigator::Navigator;
use crate::section::SectionRegistry;

/// Check registry ordering invariants: non-empty, unique ids and anchors
#[allow(unused_variables)]
pub fn check_registry_integrity(registry: &SectionRegistry) {
    #[cfg(debug_assertions)]
    {
        let entries = registry.entries();

        // Check 1: At least one section to fall back to as initial state
        debug_assert!(!entries.is_empty(), "Section registry is empty");

        // Check 2: Ids and anchors are unique
        for (idx, entry) in entries.iter().enumerate() {
            debug_assert!(
                !entry.anchor.is_empty(),
                "Section {} ({}) has an empty anchor id",
                idx,
                entry.id
            );
            for (other_idx, other) in entries[..idx].iter().enumerate() {
                debug_assert!(
                    other.id != entry.id,
                    "Section {} repeats id {} from section {}",
                    idx,
                    entry.id,
                    other_idx
                );
                debug_assert!(
                    other.anchor != entry.anchor,
                    "Section {} repeats anchor {} from section {}",
                    idx,
                    entry.anchor,
                    other_idx
                );
            }
        }
    }
}

/// Check an extent reported by the host is usable
#[allow(unused_variables)]
pub fn check_extent(anchor: &str, extent: &Extent) {
    #[cfg(debug_assertions)]
    {
        debug_assert!(
            extent.top.is_finite() && extent.height.is_finite(),
            "Anchor {} has non-finite extent: top {} height {}",
            anchor,
            extent.top,
            extent.height
        );
    }
}

/// Check navigator state consistency
#[allow(unused_variables)]
pub fn check_navigator_integrity(navigator: &Navigator) {
    #[cfg(debug_assertions)]
    {
        // Check 1: Active section is one the registry knows about
        debug_assert!(
            navigator.registry().contains(navigator.active()),
            "Active section {} is not registered",
            navigator.active()
        );

        // Check 2: Tuning stays finite after construction
        let config = navigator.config();
        debug_assert!(
            config.offset.is_finite() && config.scrolled_threshold.is_finite(),
            "Navigator config is not finite: offset {} threshold {}",
            config.offset,
            config.scrolled_threshold
        );
    }
}
