//! Viewport-driven section tracking for a single-page site.
//!
//! Two independent pieces react to the browser viewport:
//!
//! - the scroll-spy ([`navigator::Navigator`], wrapped by
//!   [`navbar::NavBar`]) maps `scrollY` to the one nav entry to highlight
//!   and resolves "jump to section" requests;
//! - one [`reveal::RevealTrigger`] per section flips a one-shot flag the
//!   first time the section is visible enough to play its entrance.
//!
//! Both are plain state machines over the [`layout::PageLayout`] and
//! [`reveal::VisibilityHost`] seams. The [`web`] module binds them to the
//! DOM and exports the `ScrollSpy` and `SectionReveal` classes to JS.

// SAFETY POLICY: Single-threaded WASM execution only
// Shared state lives in Rc<RefCell<..>> and JS closures hold Rc clones.
// DO NOT compile with WASM atomics/threads; none of this is Send.
#[cfg(target_feature = "atomics")]
compile_error!("section-spy is single-threaded. Rc/RefCell state cannot be shared across WASM threads.");

pub mod config;
mod debug_checks;
pub mod error;
pub mod frame;
pub mod layout;
mod logging;
pub mod navbar;
pub mod navigator;
pub mod reveal;
pub mod section;
pub mod web;

pub use config::{ScrollConfig, SpyConfig};
pub use error::ConfigError;
pub use layout::{Extent, PageLayout};
pub use navbar::{NavBar, NavChrome, NavEntry};
pub use navigator::{locate, Navigator, NavigatorState, ScrollRequest};
pub use reveal::{Observation, RevealTrigger, TriggerPhase, VisibilityHost, VisibilitySample};
pub use section::{IconToken, SectionEntry, SectionId, SectionRegistry};
