//! Query helpers and feature detection shared by every controller.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Reflect};
use web_sys::{
    Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    NodeList,
};

use crate::error::{PageError, Result};

pub fn document() -> Option<Document> {
    web_sys::window()?.document()
}

/// First element matching `selector` in the whole document.
pub fn query(selector: &str) -> Option<Element> {
    document()?.query_selector(selector).ok().flatten()
}

/// First element matching `selector` below `root`.
pub fn query_in(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Every element matching `selector` in the whole document, in tree order.
pub fn query_all(selector: &str) -> Vec<Element> {
    document()
        .and_then(|d| d.query_selector_all(selector).ok())
        .map(elements)
        .unwrap_or_default()
}

pub fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn require(selector: &str) -> Result<Element> {
    query(selector).ok_or_else(|| PageError::MissingElement(selector.to_string()))
}

/// Like [`require`] but also checks the element's concrete type.
pub fn require_as<T: JsCast>(selector: &str) -> Result<T> {
    require(selector)?
        .dyn_into::<T>()
        .map_err(|_| PageError::MissingElement(selector.to_string()))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Attribute value, treating an empty attribute as absent.
pub fn attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(name).filter(|v| !v.is_empty())
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

/// Browser features the page can run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub async_clipboard: bool,
    pub modal_dialog: bool,
    pub intersection_observer: bool,
}

impl Capabilities {
    /// Nothing optional available; every controller takes its fallback.
    pub const fn none() -> Self {
        Self {
            async_clipboard: false,
            modal_dialog: false,
            intersection_observer: false,
        }
    }

    pub fn detect() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::none();
        };
        let clipboard = Reflect::get(&window.navigator(), &JsValue::from_str("clipboard"))
            .unwrap_or(JsValue::UNDEFINED);
        let modal_dialog = Reflect::get(&window, &JsValue::from_str("HTMLDialogElement"))
            .ok()
            .filter(|ctor| ctor.is_function())
            .and_then(|ctor| Reflect::get(&ctor, &JsValue::from_str("prototype")).ok())
            .map(|proto| Reflect::has(&proto, &JsValue::from_str("showModal")).unwrap_or(false))
            .unwrap_or(false);

        Self {
            async_clipboard: !clipboard.is_undefined() && !clipboard.is_null(),
            modal_dialog,
            intersection_observer: Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false),
        }
    }
}

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// A live viewport-intersection observer. Disconnects on drop.
pub struct Observation {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl Observation {
    /// Observes `targets` against the viewport, handing each batch of
    /// entries to `on_batch` in the order the browser reported them.
    pub fn start<F>(thresholds: &[f64], targets: &[Element], mut on_batch: F) -> Result<Self>
    where
        F: FnMut(Vec<IntersectionObserverEntry>) + 'static,
    {
        let callback = EntriesCallback::new(move |entries: Array, _observer: IntersectionObserver| {
            let batch = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .collect();
            on_batch(batch);
        });

        let threshold = Array::new();
        for t in thresholds {
            threshold.push(&JsValue::from_f64(*t));
        }
        let options = IntersectionObserverInit::new();
        options.set_threshold(&threshold);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
        for target in targets {
            observer.observe(target);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
