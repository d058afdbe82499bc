//! JS-facing classes and the DOM-backed implementations of the core's
//! layout and visibility seams.
//!
//! Listener and observer lifetimes are owned by guards: dropping a
//! [`ScrollSpy`] or [`SectionReveal`] (JS `free()`), or unmounting/detaching
//! it, removes everything it registered with the browser.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function, Object, Reflect};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::{check_threshold, parse_level, SpyConfig, DEFAULT_REVEAL_THRESHOLD};
use crate::frame::FrameGate;
use crate::layout::{Extent, PageLayout};
use crate::logging;
use crate::navbar::{NavBar, NavEntry};
use crate::navigator::{Navigator, NavigatorState, ScrollRequest};
use crate::reveal::{Observation, RevealTrigger, TriggerPhase, VisibilityHost, VisibilitySample};
use crate::section::SectionId;

const TRACKED_EVENTS: [&str; 2] = ["scroll", "resize"];

/// Install console logging at `level` (default `info`). Only the first
/// call, or the first `ScrollSpy` constructed, takes effect.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    let level = parse_level(level.as_deref().unwrap_or("info"))?;
    logging::init(level);
    Ok(())
}

/// Extents from `getBoundingClientRect`, shifted into document space.
struct DomLayout<'a> {
    document: &'a Document,
    scroll_y: f64,
}

impl PageLayout for DomLayout<'_> {
    fn extent(&self, anchor: &str) -> Option<Extent> {
        let element = self.document.get_element_by_id(anchor)?;
        let rect = element.get_bounding_client_rect();
        Some(Extent::new(rect.top() + self.scroll_y, rect.height()))
    }
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or_else(|err| {
        warn!(error = ?err, "scrollY unavailable, assuming top of page");
        0.0
    })
}

fn smooth_scroll(window: &Window, request: &ScrollRequest) {
    let options = ScrollToOptions::new();
    options.set_top(request.top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    debug!(section = %request.section, top = request.top, "smooth scroll requested");
}

fn call_back(callback: Option<Function>, what: &str) {
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            warn!(callback = what, error = ?err, "host callback threw");
        }
    }
}

fn set_field(obj: &Object, key: &str, value: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(key), value);
}

fn entry_object(entry: &NavEntry) -> Object {
    let obj = Object::new();
    set_field(&obj, "id", &JsValue::from_str(entry.id.as_str()));
    set_field(&obj, "label", &JsValue::from_str(entry.label));
    set_field(&obj, "icon", &JsValue::from_str(entry.icon.as_str()));
    set_field(&obj, "glyph", &JsValue::from_str(entry.icon.fallback_glyph()));
    set_field(&obj, "active", &JsValue::from_bool(entry.active));
    obj
}

// -------- Scroll spy --------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Snapshot {
    navigator: NavigatorState,
    menu_open: bool,
}

struct SpyState {
    bar: NavBar,
    gate: FrameGate,
    on_change: Option<Function>,
}

impl SpyState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            navigator: self.bar.navigator().state(),
            menu_open: self.bar.menu_open(),
        }
    }

    fn sync(&mut self, window: &Window) {
        let Some(document) = window.document() else {
            return;
        };
        let scroll_y = scroll_y(window);
        let layout = DomLayout {
            document: &document,
            scroll_y,
        };
        self.bar.navigator_mut().on_scroll(scroll_y, &layout);
    }
}

/// Run `f` against the shared state and tell the host if anything it
/// renders from changed. The callback runs after the borrow is released so
/// it may call straight back into the spy.
fn update<R>(state: &Rc<RefCell<SpyState>>, f: impl FnOnce(&mut SpyState) -> R) -> R {
    let (result, callback) = {
        let mut s = state.borrow_mut();
        let before = s.snapshot();
        let result = f(&mut s);
        let changed = s.snapshot() != before;
        (result, changed.then(|| s.on_change.clone()).flatten())
    };
    call_back(callback, "onChange");
    result
}

/// Scroll and resize listeners plus the animation-frame callback they
/// schedule. Dropping the guard removes both listeners and cancels any
/// pending frame.
struct ScrollListeners {
    window: Window,
    state: Rc<RefCell<SpyState>>,
    on_event: Closure<dyn FnMut()>,
    _on_frame: Closure<dyn FnMut()>,
}

impl ScrollListeners {
    fn register(window: Window, state: Rc<RefCell<SpyState>>) -> Result<Self, JsValue> {
        let on_frame = {
            let state = state.clone();
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                update(&state, |s| {
                    if s.gate.fire() {
                        s.sync(&window);
                    }
                });
            })
        };

        let on_event = {
            let state = state.clone();
            let window = window.clone();
            let frame: Function = on_frame.as_ref().unchecked_ref::<Function>().clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut s = state.borrow_mut();
                if !s.gate.is_idle() {
                    return;
                }
                match window.request_animation_frame(&frame) {
                    Ok(handle) => s.gate.schedule(handle),
                    Err(err) => warn!(error = ?err, "requestAnimationFrame failed"),
                }
            })
        };

        let listeners = Self {
            window,
            state,
            on_event,
            _on_frame: on_frame,
        };
        for event in TRACKED_EVENTS {
            listeners
                .window
                .add_event_listener_with_callback(event, listeners.on_event.as_ref().unchecked_ref())?;
        }
        Ok(listeners)
    }
}

impl Drop for ScrollListeners {
    fn drop(&mut self) {
        for event in TRACKED_EVENTS {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback(event, self.on_event.as_ref().unchecked_ref())
            {
                warn!(event, error = ?err, "failed to remove listener");
            }
        }
        let pending = self.state.borrow_mut().gate.cancel();
        if let Some(handle) = pending {
            if let Err(err) = self.window.cancel_animation_frame(handle) {
                warn!(handle, error = ?err, "failed to cancel animation frame");
            }
        }
        debug!("scroll listeners released");
    }
}

/// Nav-bar state driven by the page's scroll position.
#[wasm_bindgen]
pub struct ScrollSpy {
    state: Rc<RefCell<SpyState>>,
    listeners: RefCell<Option<ScrollListeners>>,
}

#[wasm_bindgen]
impl ScrollSpy {
    /// `configJson` is an optional JSON object, see the crate docs.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<ScrollSpy, JsError> {
        let config = match config_json.as_deref() {
            Some(json) => SpyConfig::from_json(json)?,
            None => SpyConfig::default(),
        };
        logging::init(config.level()?);

        let navigator = Navigator::new(Rc::new(config.registry()?), config.scroll());
        debug!(
            sections = navigator.registry().len(),
            offset = config.scroll_offset,
            "scroll spy created"
        );
        Ok(Self {
            state: Rc::new(RefCell::new(SpyState {
                bar: NavBar::new(navigator),
                gate: FrameGate::new(),
                on_change: None,
            })),
            listeners: RefCell::new(None),
        })
    }

    /// Start tracking scroll and resize, then sync once. Mounting again
    /// after `unmount` starts over from the first section with the menu
    /// closed. Returns whether tracking is active; on failure the nav bar
    /// simply stays put.
    pub fn mount(&self) -> bool {
        if self.listeners.borrow().is_some() {
            return true;
        }
        let Some(window) = web_sys::window() else {
            warn!("no window, scroll spy stays inactive");
            return false;
        };
        match ScrollListeners::register(window.clone(), self.state.clone()) {
            Ok(listeners) => {
                *self.listeners.borrow_mut() = Some(listeners);
            }
            Err(err) => {
                warn!(error = ?err, "failed to register scroll listeners");
                return false;
            }
        }
        debug!("scroll spy mounted");
        update(&self.state, |s| {
            s.bar.reset();
            s.sync(&window);
        });
        true
    }

    /// Release listeners. Safe to call repeatedly.
    pub fn unmount(&self) {
        let listeners = self.listeners.borrow_mut().take();
        drop(listeners);
    }

    /// Recompute now, e.g. after content above the fold changed height.
    pub fn refresh(&self) {
        if let Some(window) = web_sys::window() {
            update(&self.state, |s| s.sync(&window));
        }
    }

    #[wasm_bindgen(getter, js_name = activeSection)]
    pub fn active_section(&self) -> String {
        self.state.borrow().bar.navigator().active().as_str().to_owned()
    }

    #[wasm_bindgen(getter)]
    pub fn scrolled(&self) -> bool {
        self.state.borrow().bar.navigator().scrolled()
    }

    #[wasm_bindgen(getter)]
    pub fn chrome(&self) -> String {
        self.state.borrow().bar.chrome().as_str().to_owned()
    }

    #[wasm_bindgen(getter, js_name = menuOpen)]
    pub fn menu_open(&self) -> bool {
        self.state.borrow().bar.menu_open()
    }

    #[wasm_bindgen(js_name = toggleMenu)]
    pub fn toggle_menu(&self) -> bool {
        update(&self.state, |s| s.bar.toggle_menu())
    }

    #[wasm_bindgen(js_name = closeMenu)]
    pub fn close_menu(&self) {
        update(&self.state, |s| s.bar.close_menu());
    }

    /// Smooth-scroll to `section`. Returns whether a scroll was started;
    /// unknown or unmounted sections are ignored. Closes the mobile menu
    /// either way.
    #[wasm_bindgen(js_name = navigateTo)]
    pub fn navigate_to(&self, section: &str) -> bool {
        let Ok(id) = section.parse::<SectionId>() else {
            debug!(section, "navigation to unknown section ignored");
            self.close_menu();
            return false;
        };
        let Some(window) = web_sys::window() else {
            self.close_menu();
            return false;
        };
        let request = update(&self.state, |s| match window.document() {
            Some(document) => {
                let layout = DomLayout {
                    document: &document,
                    scroll_y: scroll_y(&window),
                };
                s.bar.select(id, &layout)
            }
            None => {
                s.bar.close_menu();
                None
            }
        });
        match request {
            Some(request) => {
                smooth_scroll(&window, &request);
                true
            }
            None => false,
        }
    }

    /// `[{ id, label, icon, glyph, active }]` in nav order.
    #[wasm_bindgen(js_name = navEntries)]
    pub fn nav_entries(&self) -> Array {
        let state = self.state.borrow();
        state.bar.entries().map(|entry| entry_object(&entry)).collect()
    }

    /// Called with no arguments whenever the active section, the scrolled
    /// flag or the menu state changes. Pass nothing to clear.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        self.state.borrow_mut().on_change = callback;
    }
}

// -------- Section reveal --------

struct RevealState {
    trigger: RevealTrigger<DomObservation>,
    on_reveal: Option<Function>,
}

struct DomObservation {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array)>,
}

impl Observation for DomObservation {
    fn disconnect(&mut self) {
        self.observer.disconnect();
    }
}

/// The observer callback holds the state weakly: the state owns the
/// observation, which owns the callback.
struct DomVisibilityHost {
    document: Document,
    state: Weak<RefCell<RevealState>>,
}

impl VisibilityHost for DomVisibilityHost {
    type Observation = DomObservation;

    fn observe(&mut self, anchor: &str, threshold: f64) -> Option<DomObservation> {
        let element = self.document.get_element_by_id(anchor)?;

        let state = self.state.clone();
        let callback = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            on_entries(&state, &entries);
        });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(err) => {
                warn!(anchor, error = ?err, "IntersectionObserver unavailable");
                return None;
            }
        };
        observer.observe(&element);
        Some(DomObservation {
            observer,
            _callback: callback,
        })
    }
}

fn on_entries(state: &Weak<RefCell<RevealState>>, entries: &Array) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let callback = {
        let mut s = state.borrow_mut();
        let was_revealed = s.trigger.revealed();
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let sample = VisibilitySample {
                is_intersecting: entry.is_intersecting(),
                ratio: entry.intersection_ratio(),
            };
            if s.trigger.on_sample(sample) {
                break;
            }
        }
        let newly_revealed = !was_revealed && s.trigger.revealed();
        newly_revealed.then(|| s.on_reveal.clone()).flatten()
    };
    call_back(callback, "onReveal");
}

/// One-shot entrance trigger for a section component.
#[wasm_bindgen]
pub struct SectionReveal {
    state: Rc<RefCell<RevealState>>,
}

#[wasm_bindgen]
impl SectionReveal {
    /// Trigger for a registered section id, observing its default anchor.
    #[wasm_bindgen(constructor)]
    pub fn new(section: &str, threshold: Option<f64>) -> Result<SectionReveal, JsError> {
        let section: SectionId = section.parse()?;
        Self::for_anchor(section.anchor_id().to_owned(), threshold)
    }

    #[wasm_bindgen(js_name = forAnchor)]
    pub fn for_anchor(anchor: String, threshold: Option<f64>) -> Result<SectionReveal, JsError> {
        let threshold = threshold.unwrap_or(DEFAULT_REVEAL_THRESHOLD);
        check_threshold(threshold)?;
        Ok(Self {
            state: Rc::new(RefCell::new(RevealState {
                trigger: RevealTrigger::new(anchor, threshold),
                on_reveal: None,
            })),
        })
    }

    /// Begin observing. Returns whether an observation is live; a missing
    /// anchor leaves the section unrevealed for good.
    pub fn attach(&self) -> bool {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            warn!("no document, section reveal stays inactive");
            return false;
        };
        let mut host = DomVisibilityHost {
            document,
            state: Rc::downgrade(&self.state),
        };
        let phase = self.state.borrow_mut().trigger.attach(&mut host);
        phase == TriggerPhase::Observing
    }

    /// Stop observing. Safe before `attach` and when called repeatedly.
    pub fn detach(&self) {
        self.state.borrow_mut().trigger.detach();
    }

    #[wasm_bindgen(getter)]
    pub fn revealed(&self) -> bool {
        self.state.borrow().trigger.revealed()
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        self.state.borrow().trigger.phase().as_str().to_owned()
    }

    #[wasm_bindgen(getter)]
    pub fn anchor(&self) -> String {
        self.state.borrow().trigger.anchor().to_owned()
    }

    /// Called once, with no arguments, when the section reveals.
    #[wasm_bindgen(js_name = setOnReveal)]
    pub fn set_on_reveal(&self, callback: Option<Function>) {
        self.state.borrow_mut().on_reveal = callback;
    }
}
