//! Section identifiers, their nav-bar metadata, and the ordered registry
//! that ties each section to the DOM anchor it is rendered under.

use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;

/// Closed set of page sections the nav bar can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionId {
    Home,
    About,
    Timeline,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Timeline,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Timeline => "timeline",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    /// Default DOM anchor. `home` is rendered by the hero banner.
    pub fn anchor_id(self) -> &'static str {
        match self {
            SectionId::Home => "hero-section",
            SectionId::About => "about-section",
            SectionId::Timeline => "timeline-section",
            SectionId::Projects => "projects-section",
            SectionId::Contact => "contact-section",
        }
    }

    pub fn meta(self) -> &'static SectionMeta {
        &SECTION_META[self as usize]
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownSection(s.to_owned()))
    }
}

/// Icon reference handed to the renderer, which maps it to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconToken {
    Lantern,
    Book,
    Hourglass,
    Sparkles,
    Postbox,
}

impl IconToken {
    pub fn as_str(self) -> &'static str {
        match self {
            IconToken::Lantern => "lantern",
            IconToken::Book => "book",
            IconToken::Hourglass => "hourglass",
            IconToken::Sparkles => "sparkles",
            IconToken::Postbox => "postbox",
        }
    }

    /// Glyph to show when the renderer has no asset for the token.
    pub fn fallback_glyph(self) -> &'static str {
        match self {
            IconToken::Lantern => "\u{1F3EE}",
            IconToken::Book => "\u{1F4D6}",
            IconToken::Hourglass => "\u{23F3}",
            IconToken::Sparkles => "\u{2728}",
            IconToken::Postbox => "\u{1F4EE}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionMeta {
    pub id: SectionId,
    pub label: &'static str,
    pub icon: IconToken,
}

// Indexed by `SectionId as usize`.
static SECTION_META: [SectionMeta; 5] = [
    SectionMeta { id: SectionId::Home, label: "Home", icon: IconToken::Lantern },
    SectionMeta { id: SectionId::About, label: "About", icon: IconToken::Book },
    SectionMeta { id: SectionId::Timeline, label: "Journey", icon: IconToken::Hourglass },
    SectionMeta { id: SectionId::Projects, label: "Projects", icon: IconToken::Sparkles },
    SectionMeta { id: SectionId::Contact, label: "Contact", icon: IconToken::Postbox },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub id: SectionId,
    pub anchor: String,
}

impl SectionEntry {
    pub fn new(id: SectionId) -> Self {
        Self { id, anchor: id.anchor_id().to_owned() }
    }

    pub fn with_anchor(id: SectionId, anchor: impl Into<String>) -> Self {
        Self { id, anchor: anchor.into() }
    }
}

/// Ordered sections of the page. Order is traversal order for the scroll
/// lookahead and the tie-break when extents overlap.
///
/// Never empty, ids and anchors unique. Not mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRegistry {
    entries: Vec<SectionEntry>,
}

impl SectionRegistry {
    pub fn from_entries(entries: Vec<SectionEntry>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyRegistry);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entry.anchor.is_empty() {
                return Err(ConfigError::EmptyAnchor(entry.id));
            }
            for earlier in &entries[..i] {
                if earlier.id == entry.id {
                    return Err(ConfigError::DuplicateSection(entry.id));
                }
                if earlier.anchor == entry.anchor {
                    return Err(ConfigError::DuplicateAnchor(entry.anchor.clone()));
                }
            }
        }
        let registry = Self { entries };
        crate::debug_checks::check_registry_integrity(&registry);
        Ok(registry)
    }

    /// Registry using each section's default anchor.
    pub fn from_ids(ids: impl IntoIterator<Item = SectionId>) -> Result<Self, ConfigError> {
        Self::from_entries(ids.into_iter().map(SectionEntry::new).collect())
    }

    /// home, about, timeline, projects, contact.
    pub fn standard() -> Self {
        Self {
            entries: SectionId::ALL.into_iter().map(SectionEntry::new).collect(),
        }
    }

    pub fn first(&self) -> SectionId {
        self.entries[0].id
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn anchor_of(&self, id: SectionId) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.anchor.as_str())
    }
}

impl Default for SectionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
