use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dom;
pub mod error;
pub mod inquiry;

pub mod components {
    pub mod chooser;
    pub mod clipboard;
    pub mod contact_form;
    pub mod drawer;
    pub mod footer;
    pub mod lightbox;
    pub mod reveal;
    pub mod sections;
    pub mod splash;
    pub mod toast;
}

use components::{
    chooser::Chooser,
    clipboard::ClipboardCopier,
    contact_form::ContactForm,
    drawer::Drawer,
    footer,
    lightbox::Lightbox,
    reveal::Reveal,
    sections::SectionTracker,
    splash::Splash,
    toast::Toast,
};
use config::PageConfig;
use dom::Capabilities;

/// Every behaviour wired onto the current document. Dropping it detaches
/// all listeners, disconnects observers and cancels pending timers.
pub struct Page {
    pub toast: Rc<Toast>,
    pub drawer: Option<Drawer>,
    pub splash: Option<Splash>,
    pub sections: Option<SectionTracker>,
    pub chooser: Option<Chooser>,
    pub reveal: Reveal,
    pub copier: ClipboardCopier,
    pub lightbox: Option<Lightbox>,
    pub contact: Option<ContactForm>,
}

impl Page {
    pub fn install(config: &PageConfig, caps: Capabilities) -> Self {
        footer::stamp_year();
        let toast = Toast::install(config);
        Self {
            drawer: Drawer::install(),
            splash: Splash::install(config),
            sections: SectionTracker::install(config, caps),
            chooser: Chooser::install(config),
            reveal: Reveal::install(config, caps),
            copier: ClipboardCopier::install(caps, toast.clone()),
            lightbox: Lightbox::install(caps),
            contact: ContactForm::install(config, toast.clone()),
            toast,
        }
    }
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

/// Wires the page. Calling it again replaces the previous wiring.
#[wasm_bindgen]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(config::log_level()).is_err() {
        debug!("Logger already initialised");
    }

    let config = PageConfig::load();
    let caps = Capabilities::detect();
    info!("Starting page controller ({:?})", caps);

    let page = Page::install(&config, caps);
    let previous = PAGE.with(|slot| slot.replace(Some(page)));
    if previous.is_some() {
        debug!("Replaced previous page wiring");
    }
}

/// Detaches everything `start` wired.
#[wasm_bindgen]
pub fn teardown() {
    if PAGE.with(|slot| slot.borrow_mut().take()).is_some() {
        info!("Page controller torn down");
    }
}
