use std::rc::Rc;

use gloo_events::EventListener;
use log::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::{Clipboard, HtmlDocument, HtmlTextAreaElement};

use super::toast::Toast;
use crate::dom::{self, Capabilities};
use crate::error::{describe, PageError, Result};

pub const COPY_ATTR: &str = "data-copy-btn";

/// Trimmed copy text, or `None` when there is nothing to copy.
pub fn copy_text(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|t| !t.is_empty())
}

pub fn copied_message(text: &str) -> String {
    format!("Copied: {}", text)
}

/// How text reaches the system clipboard, picked once at start-up.
pub enum CopyPath {
    Async(Clipboard),
    Legacy,
}

impl CopyPath {
    pub fn select(caps: Capabilities) -> Self {
        let clipboard = caps
            .async_clipboard
            .then(web_sys::window)
            .flatten()
            .and_then(|w| Reflect::get(&w.navigator(), &JsValue::from_str("clipboard")).ok())
            .and_then(|c| c.dyn_into::<Clipboard>().ok());
        match clipboard {
            Some(clipboard) => Self::Async(clipboard),
            None => {
                info!("Async clipboard unavailable, copying through a hidden field");
                Self::Legacy
            }
        }
    }

    async fn write(&self, text: &str) {
        if let Self::Async(clipboard) = self {
            match JsFuture::from(clipboard.write_text(text)).await {
                Ok(_) => return,
                Err(e) => info!("Clipboard write rejected ({}), using fallback", describe(&e)),
            }
        }
        match legacy_copy(text) {
            Ok(true) => {}
            Ok(false) => warn!("copy command reported failure"),
            Err(e) => warn!("Fallback copy failed: {}", e),
        }
    }
}

/// Copies through an off-screen text field and the `copy` command.
/// The field is removed again whatever the command reports.
pub fn legacy_copy(text: &str) -> Result<bool> {
    let document = dom::document().ok_or(PageError::Unsupported("document"))?;
    let body = document
        .body()
        .ok_or_else(|| PageError::MissingElement("body".to_string()))?;
    let field = document
        .create_element("textarea")?
        .dyn_into::<HtmlTextAreaElement>()
        .map_err(|_| PageError::Js("created textarea has the wrong type".to_string()))?;

    field.set_value(text);
    let style = field.style();
    style.set_property("position", "fixed")?;
    style.set_property("opacity", "0")?;
    style.set_property("left", "-9999px")?;
    field.set_attribute("aria-hidden", "true")?;
    body.append_child(&field)?;

    field.select();
    let copied = match document.dyn_ref::<HtmlDocument>() {
        Some(html) => html.exec_command("copy").map_err(PageError::from),
        None => Err(PageError::Unsupported("execCommand")),
    };
    field.remove();
    copied
}

struct CopyState {
    path: CopyPath,
    toast: Rc<Toast>,
}

/// Copy buttons wired to the clipboard and the toast.
pub struct ClipboardCopier {
    state: Rc<CopyState>,
    _listeners: Vec<EventListener>,
}

impl ClipboardCopier {
    pub fn install(caps: Capabilities, toast: Rc<Toast>) -> Self {
        let state = Rc::new(CopyState {
            path: CopyPath::select(caps),
            toast,
        });
        let listeners: Vec<_> = dom::query_all(&format!("[{}]", COPY_ATTR))
            .into_iter()
            .map(|button| {
                let state = state.clone();
                let value = button.get_attribute(COPY_ATTR).unwrap_or_default();
                EventListener::new(&button, "click", move |_| copy(state.clone(), &value))
            })
            .collect();
        debug!("{} copy buttons bound", listeners.len());

        Self {
            state,
            _listeners: listeners,
        }
    }

    pub fn copy(&self, text: &str) {
        copy(self.state.clone(), text);
    }
}

/// Blank input does nothing. Otherwise the toast confirms once the write
/// settles, on either path.
fn copy(state: Rc<CopyState>, raw: &str) {
    let Some(text) = copy_text(raw).map(str::to_string) else {
        return;
    };
    spawn_local(async move {
        state.path.write(&text).await;
        state.toast.show(&copied_message(&text));
    });
}
