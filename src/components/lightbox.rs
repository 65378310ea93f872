//! Gallery preview dialog.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlDialogElement, HtmlElement, HtmlImageElement, KeyboardEvent, MouseEvent};

use crate::dom::{self, Capabilities};
use crate::error::{describe, Result};

pub const LIGHTBOX_SELECTOR: &str = "#lightbox";
pub const IMAGE_SELECTOR: &str = "#lightboxImg";
pub const TITLE_SELECTOR: &str = "#lightboxTitle";
pub const DESC_SELECTOR: &str = "#lightboxDesc";
pub const CLOSE_SELECTOR: &str = "#lightboxClose";
pub const CONTENT_SELECTOR: &str = ".lightbox-inner";
pub const ITEM_SELECTOR: &str = "#gallery .shot";

const DEFAULT_TITLE: &str = "Preview";
const DEFAULT_LABEL: &str = "Open image";

/// What the lightbox shows for one gallery thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl GalleryItem {
    pub fn new(title: Option<String>, description: Option<String>, image: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: description.unwrap_or_default(),
            image: image.unwrap_or_default(),
        }
    }

    pub fn from_element(el: &Element) -> Self {
        Self::new(
            dom::attr(el, "data-title"),
            dom::attr(el, "data-desc"),
            dom::attr(el, "data-img"),
        )
    }
}

pub fn accessible_label(title: Option<&str>) -> String {
    format!("{} (opens dialog)", title.unwrap_or(DEFAULT_LABEL))
}

/// Keys that open a focused gallery item.
pub fn activates(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Client-space rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    pub fn of(el: &Element) -> Self {
        let rect = el.get_bounding_client_rect();
        Self {
            left: rect.left(),
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

struct LightboxView {
    surface: Element,
    content: Element,
    image: HtmlImageElement,
    title: Element,
    description: Element,
    modal: bool,
}

impl LightboxView {
    fn open(&self, item: &GalleryItem) {
        self.title.set_text_content(Some(&item.title));
        self.description.set_text_content(Some(&item.description));
        self.image.set_src(&item.image);
        self.image.set_alt(&item.title);

        if !self.modal {
            return;
        }
        if let Some(dialog) = self.surface.dyn_ref::<HtmlDialogElement>() {
            if dialog.open() {
                return;
            }
            if let Err(e) = dialog.show_modal() {
                warn!("showModal failed: {}", describe(&e));
            }
        }
    }

    fn close(&self) {
        match self.surface.dyn_ref::<HtmlDialogElement>() {
            Some(dialog) => dialog.close(),
            None => {
                let _ = self.surface.remove_attribute("open");
            }
        }
    }

    fn is_open(&self) -> bool {
        self.surface.has_attribute("open")
    }
}

pub struct Lightbox {
    view: Rc<LightboxView>,
    _listeners: Vec<EventListener>,
}

impl Lightbox {
    pub fn install(caps: Capabilities) -> Option<Self> {
        // Thumbnails stay reachable and labelled even without a preview dialog.
        let items = dom::query_all(ITEM_SELECTOR);
        for item in &items {
            prepare_item(item);
        }

        let view = match Self::locate(caps) {
            Ok(view) => Rc::new(view),
            Err(e) => {
                debug!("Lightbox not installed: {}", e);
                return None;
            }
        };
        if !view.modal {
            info!("Modal dialogs unavailable, lightbox only updates its content");
        }

        let mut listeners = Vec::new();
        for item in items {
            {
                let view = view.clone();
                let target = item.clone();
                listeners.push(EventListener::new(&item, "click", move |_| {
                    view.open(&GalleryItem::from_element(&target));
                }));
            }
            {
                let view = view.clone();
                let target = item.clone();
                listeners.push(EventListener::new_with_options(
                    &item,
                    "keydown",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|e| e.key()) else {
                            return;
                        };
                        if activates(&key) {
                            event.prevent_default();
                            view.open(&GalleryItem::from_element(&target));
                        }
                    },
                ));
            }
        }

        if let Some(close) = dom::query(CLOSE_SELECTOR) {
            let view = view.clone();
            listeners.push(EventListener::new(&close, "click", move |_| view.close()));
        }
        {
            let view_for_click = view.clone();
            listeners.push(EventListener::new(&view.surface, "click", move |event| {
                let Some(click) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let bounds = Bounds::of(&view_for_click.content);
                if !bounds.contains(f64::from(click.client_x()), f64::from(click.client_y())) {
                    view_for_click.close();
                }
            }));
        }

        debug!("Lightbox installed with {} bindings", listeners.len());
        Some(Self {
            view,
            _listeners: listeners,
        })
    }

    fn locate(caps: Capabilities) -> Result<LightboxView> {
        let surface = dom::require(LIGHTBOX_SELECTOR)?;
        let content = dom::query_in(&surface, CONTENT_SELECTOR).unwrap_or_else(|| surface.clone());
        Ok(LightboxView {
            modal: caps.modal_dialog && surface.has_type::<HtmlDialogElement>(),
            image: dom::require_as::<HtmlImageElement>(IMAGE_SELECTOR)?,
            title: dom::require(TITLE_SELECTOR)?,
            description: dom::require(DESC_SELECTOR)?,
            content,
            surface,
        })
    }

    pub fn open(&self, item: &GalleryItem) {
        self.view.open(item);
    }

    pub fn close(&self) {
        self.view.close();
    }

    pub fn is_open(&self) -> bool {
        self.view.is_open()
    }
}

/// Makes a thumbnail reachable and announced as a dialog opener.
fn prepare_item(item: &Element) {
    if let Some(el) = item.dyn_ref::<HtmlElement>() {
        el.set_tab_index(0);
    }
    let _ = item.set_attribute("role", "button");
    let title = dom::attr(item, "data-title");
    let _ = item.set_attribute("aria-label", &accessible_label(title.as_deref()));
}
