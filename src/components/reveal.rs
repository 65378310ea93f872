use log::{debug, info, warn};
use web_sys::Element;

use crate::config::PageConfig;
use crate::dom::{self, Capabilities, Observation};

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const ACTIVE_CLASS: &str = "active";

/// Scroll-in animation trigger. Elements only ever gain `active`.
pub enum Reveal {
    Observing(Observation),
    AlwaysVisible,
}

impl Reveal {
    pub fn install(config: &PageConfig, caps: Capabilities) -> Self {
        let targets = dom::query_all(REVEAL_SELECTOR);
        if !caps.intersection_observer {
            info!("IntersectionObserver unavailable, revealing {} elements up front", targets.len());
            return Self::reveal_all(&targets);
        }

        let observation = Observation::start(&[config.reveal_threshold], &targets, |entries| {
            for entry in entries.iter().filter(|e| e.is_intersecting()) {
                dom::set_class(&entry.target(), ACTIVE_CLASS, true);
            }
        });
        match observation {
            Ok(observation) => {
                debug!("Observing {} reveal elements", targets.len());
                Self::Observing(observation)
            }
            Err(e) => {
                warn!("Reveal observer failed ({}), revealing everything", e);
                Self::reveal_all(&targets)
            }
        }
    }

    fn reveal_all(targets: &[Element]) -> Self {
        for el in targets {
            dom::set_class(el, ACTIVE_CLASS, true);
        }
        Self::AlwaysVisible
    }
}

/// Whether `el` has already been revealed.
pub fn is_revealed(el: &Element) -> bool {
    dom::has_class(el, ACTIVE_CLASS)
}
