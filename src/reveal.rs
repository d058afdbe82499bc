//! One-shot entrance trigger for a single section.
//!
//! A trigger observes its section's anchor and flips `revealed` the first
//! time enough of the section is on screen. The flag never goes back, and
//! the observation is disconnected as soon as it has done its job.

use tracing::{debug, trace};

use crate::config::DEFAULT_REVEAL_THRESHOLD;
use crate::section::SectionId;

/// Live observation of one element. Disconnecting twice must be harmless.
pub trait Observation {
    fn disconnect(&mut self);
}

/// Starts observations. `None` when the anchor is not in the document.
pub trait VisibilityHost {
    type Observation: Observation;

    fn observe(&mut self, anchor: &str, threshold: f64) -> Option<Self::Observation>;
}

/// One intersection report for the observed element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilitySample {
    pub is_intersecting: bool,
    /// Visible fraction of the element's area, `0.0..=1.0`.
    pub ratio: f64,
}

impl VisibilitySample {
    /// Browsers report `is_intersecting` on the first callback even when
    /// the visible fraction is below the requested threshold.
    pub fn meets(&self, threshold: f64) -> bool {
        self.is_intersecting && self.ratio >= threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    /// Constructed, not attached yet.
    Idle,
    Observing,
    /// Anchor was absent at attach time. Never reveals.
    Unobservable,
    Revealed,
    Detached,
}

impl TriggerPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            TriggerPhase::Idle => "idle",
            TriggerPhase::Observing => "observing",
            TriggerPhase::Unobservable => "unobservable",
            TriggerPhase::Revealed => "revealed",
            TriggerPhase::Detached => "detached",
        }
    }
}

#[derive(Debug)]
pub struct RevealTrigger<O: Observation> {
    anchor: String,
    threshold: f64,
    revealed: bool,
    phase: TriggerPhase,
    observation: Option<O>,
}

impl<O: Observation> RevealTrigger<O> {
    pub fn new(anchor: impl Into<String>, threshold: f64) -> Self {
        Self {
            anchor: anchor.into(),
            threshold,
            revealed: false,
            phase: TriggerPhase::Idle,
            observation: None,
        }
    }

    pub fn for_section(section: SectionId) -> Self {
        Self::new(section.anchor_id(), DEFAULT_REVEAL_THRESHOLD)
    }

    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn revealed(&self) -> bool {
        self.revealed
    }

    pub fn phase(&self) -> TriggerPhase {
        self.phase
    }

    /// Start observing. Only acts on an idle trigger; returns the phase
    /// the trigger ends up in.
    pub fn attach<H>(&mut self, host: &mut H) -> TriggerPhase
    where
        H: VisibilityHost<Observation = O>,
    {
        if self.phase != TriggerPhase::Idle {
            trace!(anchor = %self.anchor, phase = ?self.phase, "attach ignored");
            return self.phase;
        }
        match host.observe(&self.anchor, self.threshold) {
            Some(observation) => {
                self.observation = Some(observation);
                self.phase = TriggerPhase::Observing;
            }
            None => {
                debug!(anchor = %self.anchor, "reveal anchor not found, section will render without entrance");
                self.phase = TriggerPhase::Unobservable;
            }
        }
        self.phase
    }

    /// Feed one intersection report. Returns the `revealed` flag.
    ///
    /// Only an observing trigger reacts: idle, unobservable and detached
    /// triggers keep their flag whatever the host reports.
    pub fn on_intersect(&mut self, is_intersecting: bool) -> bool {
        if self.phase != TriggerPhase::Observing || !is_intersecting {
            return self.revealed;
        }
        self.revealed = true;
        self.phase = TriggerPhase::Revealed;
        // Disconnect only. The host may still be inside the callback that
        // got us here, so the observation is dropped on detach.
        if let Some(observation) = self.observation.as_mut() {
            observation.disconnect();
        }
        debug!(anchor = %self.anchor, "section revealed");
        true
    }

    pub fn on_sample(&mut self, sample: VisibilitySample) -> bool {
        self.on_intersect(sample.meets(self.threshold))
    }

    /// Stop observing. Safe to call any number of times, attached or not.
    pub fn detach(&mut self) {
        if let Some(mut observation) = self.observation.take() {
            if self.phase == TriggerPhase::Observing {
                observation.disconnect();
            }
        }
        if self.phase != TriggerPhase::Detached {
            trace!(anchor = %self.anchor, revealed = self.revealed, "reveal trigger detached");
            self.phase = TriggerPhase::Detached;
        }
    }
}

impl<O: Observation> Drop for RevealTrigger<O> {
    fn drop(&mut self) {
        self.detach();
    }
}
