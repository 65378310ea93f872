use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::Element;

use crate::dom;

pub const TRIGGER_SELECTOR: &str = "#burger";
pub const DRAWER_SELECTOR: &str = "#drawer";
pub const LINK_SELECTOR: &str = "#drawer a";
pub const OPEN_CLASS: &str = "open";

/// Open/closed state of the mobile navigation drawer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawerState {
    open: bool,
}

impl DrawerState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }
}

struct DrawerView {
    drawer: Element,
    trigger: Option<Element>,
    state: Cell<DrawerState>,
}

impl DrawerView {
    fn apply(&self, state: DrawerState) {
        self.state.set(state);
        dom::set_class(&self.drawer, OPEN_CLASS, state.is_open());
        if let Some(trigger) = &self.trigger {
            let _ = trigger.set_attribute("aria-expanded", &state.is_open().to_string());
        }
    }
}

pub struct Drawer {
    view: Rc<DrawerView>,
    _listeners: Vec<EventListener>,
}

impl Drawer {
    pub fn install() -> Option<Self> {
        let Some(drawer) = dom::query(DRAWER_SELECTOR) else {
            debug!("No {} element, drawer not installed", DRAWER_SELECTOR);
            return None;
        };
        let initial = DrawerState { open: dom::has_class(&drawer, OPEN_CLASS) };
        let view = Rc::new(DrawerView {
            drawer,
            trigger: dom::query(TRIGGER_SELECTOR),
            state: Cell::new(initial),
        });

        let mut listeners = Vec::new();
        if let Some(trigger) = &view.trigger {
            let view = view.clone();
            listeners.push(EventListener::new(trigger, "click", move |_| {
                view.apply(view.state.get().toggled());
            }));
        }
        for link in dom::query_all(LINK_SELECTOR) {
            let view = view.clone();
            listeners.push(EventListener::new(&link, "click", move |_| {
                view.apply(DrawerState::closed());
            }));
        }

        debug!("Drawer installed with {} bindings", listeners.len());
        Some(Self {
            view,
            _listeners: listeners,
        })
    }

    pub fn set_open(&self, open: bool) {
        self.view.apply(DrawerState { open });
    }

    pub fn is_open(&self) -> bool {
        self.view.state.get().is_open()
    }
}
