//! First-visit intro overlay.
//!
//! The overlay is shown until the visitor presses "enter" or "skip", after
//! which a flag in `localStorage` keeps it hidden on every later visit.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, Storage};

use crate::config::PageConfig;
use crate::dom;
use crate::error::{PageError, Result};

pub const SPLASH_SELECTOR: &str = "#splash";
pub const ENTER_SELECTOR: &str = "[data-splash-enter]";
pub const SKIP_SELECTOR: &str = "[data-splash-skip]";
pub const SCROLL_TARGET_ATTR: &str = "data-scroll-target";
pub const LEAVING_CLASS: &str = "leaving";
pub const SCROLL_LOCK_CLASS: &str = "splash-lock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    Hidden,
    Visible,
    Leaving,
}

/// Persisted "splash already seen" marker.
pub trait SeenFlag {
    /// Unreadable storage counts as "not seen".
    fn is_set(&self) -> bool;
    fn set(&self);
}

pub struct LocalStorageFlag {
    key: String,
    value: String,
}

impl LocalStorageFlag {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            key: config.splash_key.clone(),
            value: config.splash_seen_value.clone(),
        }
    }

    fn storage() -> Result<Storage> {
        let window = web_sys::window().ok_or(PageError::Unsupported("window"))?;
        window
            .local_storage()
            .map_err(|e| PageError::Storage(crate::error::describe(&e)))?
            .ok_or(PageError::Unsupported("localStorage"))
    }
}

impl SeenFlag for LocalStorageFlag {
    fn is_set(&self) -> bool {
        Self::storage()
            .and_then(|s| s.get_item(&self.key).map_err(Into::into))
            .map(|v| v.as_deref() == Some(self.value.as_str()))
            .unwrap_or(false)
    }

    fn set(&self) {
        let written = Self::storage().and_then(|s| s.set_item(&self.key, &self.value).map_err(Into::into));
        if let Err(e) = written {
            warn!("Could not persist splash flag: {}", e);
        }
    }
}

/// Phase bookkeeping, independent of the document.
pub struct SplashMachine<F: SeenFlag> {
    phase: SplashPhase,
    flag: F,
}

impl<F: SeenFlag> SplashMachine<F> {
    pub fn new(flag: F) -> Self {
        let phase = if flag.is_set() {
            SplashPhase::Hidden
        } else {
            SplashPhase::Visible
        };
        Self { phase, flag }
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    /// Enter and skip both land here. Only a visible splash can leave, so
    /// the flag is written once no matter how many clicks arrive.
    pub fn dismiss(&mut self) -> bool {
        if self.phase != SplashPhase::Visible {
            return false;
        }
        self.phase = SplashPhase::Leaving;
        self.flag.set();
        true
    }

    pub fn finish(&mut self) {
        if self.phase == SplashPhase::Leaving {
            self.phase = SplashPhase::Hidden;
        }
    }
}

struct SplashView {
    overlay: Element,
    machine: RefCell<SplashMachine<LocalStorageFlag>>,
    fade_ms: u32,
    focus_release_ms: u32,
    timers: RefCell<Vec<Timeout>>,
}

impl SplashView {
    fn hide(&self) {
        let _ = self.overlay.set_attribute("hidden", "");
        let _ = self.overlay.set_attribute("aria-hidden", "true");
        set_scroll_lock(false);
    }

    fn dismiss(self: &Rc<Self>, scroll_target: Option<String>) {
        if !self.machine.borrow_mut().dismiss() {
            return;
        }
        info!("Splash dismissed");
        dom::set_class(&self.overlay, LEAVING_CLASS, true);
        set_scroll_lock(false);

        let weak = Rc::downgrade(self);
        let fade = Timeout::new(self.fade_ms, move || {
            let Some(view) = weak.upgrade() else {
                return;
            };
            view.hide();
            view.machine.borrow_mut().finish();
            if let Some(target) = scroll_target.as_deref().and_then(dom::query) {
                view.hand_off_focus(target);
            }
        });
        self.timers.borrow_mut().push(fade);
    }

    fn hand_off_focus(self: &Rc<Self>, target: Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        target.scroll_into_view_with_scroll_into_view_options(&options);

        let Ok(target) = target.dyn_into::<HtmlElement>() else {
            return;
        };
        // Only borrow focusability when the target has none of its own.
        let borrowed = !target.has_attribute("tabindex");
        if borrowed {
            let _ = target.set_attribute("tabindex", "-1");
        }
        if let Err(e) = target.focus() {
            warn!("Could not focus scroll target: {}", crate::error::describe(&e));
        }
        if borrowed {
            let release = Timeout::new(self.focus_release_ms, move || {
                let _ = target.remove_attribute("tabindex");
            });
            self.timers.borrow_mut().push(release);
        }
    }
}

fn set_scroll_lock(locked: bool) {
    if let Some(root) = dom::document().and_then(|d| d.document_element()) {
        dom::set_class(&root, SCROLL_LOCK_CLASS, locked);
    }
}

pub struct Splash {
    view: Rc<SplashView>,
    _listeners: Vec<EventListener>,
}

impl Splash {
    pub fn install(config: &PageConfig) -> Option<Self> {
        let Some(overlay) = dom::query(SPLASH_SELECTOR) else {
            debug!("No {} element, splash not installed", SPLASH_SELECTOR);
            return None;
        };
        let view = Rc::new(SplashView {
            overlay,
            machine: RefCell::new(SplashMachine::new(LocalStorageFlag::new(config))),
            fade_ms: config.splash_fade_ms,
            focus_release_ms: config.focus_release_ms,
            timers: RefCell::new(Vec::new()),
        });

        if view.machine.borrow().phase() == SplashPhase::Hidden {
            debug!("Splash already seen, hiding immediately");
            view.hide();
        } else {
            set_scroll_lock(true);
        }

        let listeners = [ENTER_SELECTOR, SKIP_SELECTOR]
            .iter()
            .flat_map(|selector| dom::query_all_in(&view.overlay, selector))
            .map(|control| {
                let view = view.clone();
                let target = dom::attr(&control, SCROLL_TARGET_ATTR);
                EventListener::new(&control, "click", move |_| {
                    view.dismiss(target.clone());
                })
            })
            .collect();

        Some(Self {
            view,
            _listeners: listeners,
        })
    }

    pub fn phase(&self) -> SplashPhase {
        self.view.machine.borrow().phase()
    }
}
