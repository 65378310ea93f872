use chrono::{Datelike, Local};

use crate::dom;

pub const YEAR_SELECTOR: &str = "#year";

/// Writes the current year into the footer.
pub fn stamp_year() {
    if let Some(el) = dom::query(YEAR_SELECTOR) {
        el.set_text_content(Some(&Local::now().year().to_string()));
    }
}
