use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use web_sys::Element;

use crate::config::PageConfig;
use crate::dom;

pub const TOAST_SELECTOR: &str = "#toast";
pub const SHOW_CLASS: &str = "show";

/// Transient one-line notice. Newest message wins; nothing is queued.
pub struct Toast {
    element: Option<Element>,
    duration_ms: u32,
    pending: RefCell<Option<Timeout>>,
}

impl Toast {
    pub fn install(config: &PageConfig) -> Rc<Self> {
        let element = dom::query(TOAST_SELECTOR);
        if element.is_none() {
            debug!("No {} element, notices are disabled", TOAST_SELECTOR);
        }
        Rc::new(Self {
            element,
            duration_ms: config.toast_ms,
            pending: RefCell::new(None),
        })
    }

    pub fn show(&self, text: &str) {
        let Some(element) = &self.element else {
            return;
        };
        element.set_text_content(Some(text));
        dom::set_class(element, SHOW_CLASS, true);

        let element = element.clone();
        let expiry = Timeout::new(self.duration_ms, move || {
            dom::set_class(&element, SHOW_CLASS, false);
        });
        // Dropping the previous timeout cancels it.
        self.pending.replace(Some(expiry));
    }

    pub fn text(&self) -> Option<String> {
        self.element.as_ref().and_then(|el| el.text_content())
    }

    pub fn is_visible(&self) -> bool {
        self.element
            .as_ref()
            .map(|el| dom::has_class(el, SHOW_CLASS))
            .unwrap_or(false)
    }
}

impl Drop for Toast {
    fn drop(&mut self) {
        // The pending expiry is cancelled with us, so hide the notice now.
        if let Some(element) = &self.element {
            dom::set_class(element, SHOW_CLASS, false);
        }
    }
}
