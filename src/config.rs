//! Host-supplied tuning, parsed from a JSON object the page passes in.
//!
//! Every key is optional:
//!
//! ```json
//! {
//!   "scrollOffset": 100,
//!   "scrolledThreshold": 50,
//!   "revealThreshold": 0.1,
//!   "sections": [{ "id": "home" }, { "id": "about", "anchor": "about-me" }],
//!   "logLevel": "info"
//! }
//! ```

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;
use crate::section::{SectionEntry, SectionId, SectionRegistry};

/// Lookahead added to `scrollY`, roughly the fixed nav bar's height.
pub const DEFAULT_SCROLL_OFFSET: f64 = 100.0;
/// `scrollY` beyond which the nav bar switches to its solid chrome.
pub const DEFAULT_SCROLLED_THRESHOLD: f64 = 50.0;
/// Fraction of a section's area that must be on screen to reveal it.
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollConfig {
    pub offset: f64,
    pub scrolled_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_SCROLL_OFFSET,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionSpec {
    pub id: String,
    #[serde(default)]
    pub anchor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct SpyConfig {
    pub scroll_offset: f64,
    pub scrolled_threshold: f64,
    pub reveal_threshold: f64,
    pub sections: Vec<SectionSpec>,
    pub log_level: String,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            scroll_offset: DEFAULT_SCROLL_OFFSET,
            scrolled_threshold: DEFAULT_SCROLLED_THRESHOLD,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            sections: Vec::new(),
            log_level: "info".to_owned(),
        }
    }
}

impl SpyConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SpyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_finite("scrollOffset", self.scroll_offset)?;
        check_finite("scrolledThreshold", self.scrolled_threshold)?;
        if self.scrolled_threshold < 0.0 {
            return Err(ConfigError::InvalidNumber {
                field: "scrolledThreshold",
                value: self.scrolled_threshold,
            });
        }
        check_threshold(self.reveal_threshold)?;
        self.level()?;
        self.registry()?;
        Ok(())
    }

    pub fn scroll(&self) -> ScrollConfig {
        ScrollConfig {
            offset: self.scroll_offset,
            scrolled_threshold: self.scrolled_threshold,
        }
    }

    /// An empty `sections` list means the standard page layout.
    pub fn registry(&self) -> Result<SectionRegistry, ConfigError> {
        if self.sections.is_empty() {
            return Ok(SectionRegistry::standard());
        }
        let entries = self
            .sections
            .iter()
            .map(|spec| -> Result<SectionEntry, ConfigError> {
                let id: SectionId = spec.id.parse()?;
                Ok(match &spec.anchor {
                    Some(anchor) => SectionEntry::with_anchor(id, anchor.clone()),
                    None => SectionEntry::new(id),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        SectionRegistry::from_entries(entries)
    }

    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        parse_level(&self.log_level)
    }
}

pub fn parse_level(level: &str) -> Result<LevelFilter, ConfigError> {
    level
        .parse::<LevelFilter>()
        .map_err(|_| ConfigError::InvalidLogLevel(level.to_owned()))
}

pub fn check_threshold(threshold: f64) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(ConfigError::ThresholdOutOfRange(threshold));
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidNumber { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SpyConfig::from_json("{}").unwrap();
        assert_eq!(config, SpyConfig::default());
        assert_eq!(config.scroll(), ScrollConfig::default());
        assert_eq!(config.registry().unwrap(), SectionRegistry::standard());
        assert_eq!(config.level().unwrap(), LevelFilter::INFO);
    }

    #[test]
    fn custom_sections_keep_their_order_and_anchors() {
        let config = SpyConfig::from_json(
            r#"{
                "scrollOffset": 64,
                "sections": [
                    { "id": "contact" },
                    { "id": "home", "anchor": "top" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.scroll().offset, 64.0);
        let registry = config.registry().unwrap();
        assert_eq!(registry.first(), SectionId::Contact);
        assert_eq!(registry.anchor_of(SectionId::Home), Some("top"));
        assert_eq!(registry.anchor_of(SectionId::Contact), Some("contact-section"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            SpyConfig::from_json(r#"{ "offset": 10 }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn reveal_threshold_must_be_a_fraction() {
        assert!(matches!(
            SpyConfig::from_json(r#"{ "revealThreshold": 1.5 }"#),
            Err(ConfigError::ThresholdOutOfRange(t)) if t == 1.5
        ));
        assert!(SpyConfig::from_json(r#"{ "revealThreshold": 0 }"#).is_ok());
        assert!(SpyConfig::from_json(r#"{ "revealThreshold": 1 }"#).is_ok());
    }

    #[test]
    fn negative_scrolled_threshold_is_rejected() {
        assert!(matches!(
            SpyConfig::from_json(r#"{ "scrolledThreshold": -1 }"#),
            Err(ConfigError::InvalidNumber { field: "scrolledThreshold", .. })
        ));
    }

    #[test]
    fn negative_scroll_offset_is_allowed() {
        let config = SpyConfig::from_json(r#"{ "scrollOffset": -20 }"#).unwrap();
        assert_eq!(config.scroll().offset, -20.0);
    }

    #[test]
    fn section_errors_surface_from_validation() {
        assert!(matches!(
            SpyConfig::from_json(r#"{ "sections": [{ "id": "blog" }] }"#),
            Err(ConfigError::UnknownSection(s)) if s == "blog"
        ));
        assert!(matches!(
            SpyConfig::from_json(r#"{ "sections": [{ "id": "about" }, { "id": "about" }] }"#),
            Err(ConfigError::DuplicateSection(SectionId::About))
        ));
        assert!(matches!(
            SpyConfig::from_json(r#"{ "sections": [{ "id": "home", "anchor": "" }] }"#),
            Err(ConfigError::EmptyAnchor(SectionId::Home))
        ));
    }

    #[test]
    fn log_level_is_validated() {
        let config = SpyConfig::from_json(r#"{ "logLevel": "debug" }"#).unwrap();
        assert_eq!(config.level().unwrap(), LevelFilter::DEBUG);
        assert!(matches!(
            SpyConfig::from_json(r#"{ "logLevel": "loud" }"#),
            Err(ConfigError::InvalidLogLevel(l)) if l == "loud"
        ));
    }
}
