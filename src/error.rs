use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys;

/// Failures raised while wiring or driving the page.
///
/// None of these ever reach the visitor. Controllers either skip their
/// feature (`MissingElement`) or log and carry on.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no element matches `{0}`")]
    MissingElement(String),
    #[error("{0} is not available in this browser")]
    Unsupported(&'static str),
    #[error("storage access failed: {0}")]
    Storage(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        PageError::Js(describe(&value))
    }
}

pub type Result<T> = std::result::Result<T, PageError>;

/// Best-effort text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}
