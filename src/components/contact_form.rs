use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, info, warn};
use web_sys::{FormData, HtmlFormElement};

use super::toast::Toast;
use crate::config::PageConfig;
use crate::dom;
use crate::error::Result;
use crate::inquiry::{missing_fields_notice, Inquiry, MailDraft};

pub const FORM_SELECTOR: &str = "#contactForm";

/// Contact form that validates locally and hands off to the mail client.
pub struct ContactForm {
    _listener: EventListener,
}

impl ContactForm {
    pub fn install(config: &PageConfig, toast: Rc<Toast>) -> Option<Self> {
        let form = match dom::require_as::<HtmlFormElement>(FORM_SELECTOR) {
            Ok(form) => form,
            Err(e) => {
                debug!("Contact form not installed: {}", e);
                return None;
            }
        };
        let config = config.clone();
        let target = form.clone();
        let listener = EventListener::new_with_options(
            &form,
            "submit",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                event.prevent_default();
                if let Err(e) = submit(&target, &config, &toast) {
                    warn!("Contact form submission failed: {}", e);
                }
            },
        );
        Some(Self { _listener: listener })
    }
}

fn read_inquiry(form: &HtmlFormElement, descriptor_field: &str) -> Result<Inquiry> {
    let data = FormData::new_with_form(form)?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();
    Ok(Inquiry::new(
        &field("name"),
        &field("phone"),
        &field("email"),
        &field(descriptor_field),
        &field("message"),
    ))
}

fn submit(form: &HtmlFormElement, config: &PageConfig, toast: &Toast) -> Result<()> {
    let inquiry = read_inquiry(form, &config.descriptor_field)?;
    if let Err(missing) = inquiry.validate() {
        debug!("Contact form incomplete: {} fields", missing.len());
        toast.show(&missing_fields_notice(&missing));
        return Ok(());
    }

    info!("Opening mail client for contact request");
    let link = MailDraft::new(config).mailto(&inquiry);
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    window.location().set_href(&link)?;
    Ok(())
}
