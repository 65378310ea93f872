use log::{debug, info, warn};
use web_sys::Element;

use crate::config::PageConfig;
use crate::dom::{self, Capabilities, Observation};

pub const NAV_LINK_SELECTOR: &str = ".navlinks a";
pub const CURRENT_ATTR: &str = "aria-current";

/// The in-page id a navigation href points at, if it is a fragment link.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Picks the intersecting candidate with the highest ratio. Ties go to
/// whichever was reported first.
pub fn most_visible<T>(sightings: impl IntoIterator<Item = (T, bool, f64)>) -> Option<T> {
    sightings
        .into_iter()
        .filter(|(_, intersecting, _)| *intersecting)
        .fold(None, |best: Option<(T, f64)>, (item, _, ratio)| match best {
            Some((_, top)) if top >= ratio => best,
            _ => Some((item, ratio)),
        })
        .map(|(item, _)| item)
}

/// Navigation links that point into the page.
pub struct NavLinks {
    links: Vec<(String, Element)>,
}

impl NavLinks {
    pub fn collect() -> Self {
        let links = dom::query_all(NAV_LINK_SELECTOR)
            .into_iter()
            .filter_map(|link| {
                let href = link.get_attribute("href")?;
                let id = fragment_target(&href)?.to_string();
                Some((id, link))
            })
            .collect();
        Self { links }
    }

    /// Sections that actually exist, in link order.
    pub fn sections(&self) -> Vec<Element> {
        let document = dom::document();
        self.links
            .iter()
            .filter_map(|(id, _)| document.as_ref()?.get_element_by_id(id))
            .collect()
    }

    /// Marks the link for `id` as current and clears every other link.
    pub fn mark_current(&self, id: &str) {
        for (target, link) in &self.links {
            if target == id {
                let _ = link.set_attribute(CURRENT_ATTR, "page");
            } else {
                let _ = link.remove_attribute(CURRENT_ATTR);
            }
        }
    }
}

/// Keeps the navigation link of the most visible section marked.
pub struct SectionTracker {
    _observation: Observation,
}

impl SectionTracker {
    pub fn install(config: &PageConfig, caps: Capabilities) -> Option<Self> {
        if !caps.intersection_observer {
            info!("IntersectionObserver unavailable, section tracking disabled");
            return None;
        }
        let links = NavLinks::collect();
        let sections = links.sections();
        if sections.is_empty() {
            debug!("No navigable sections, section tracking not installed");
            return None;
        }

        let observation = Observation::start(&config.section_thresholds, &sections, move |entries| {
            let visible = most_visible(
                entries
                    .iter()
                    .map(|e| (e.target().id(), e.is_intersecting(), e.intersection_ratio())),
            );
            if let Some(id) = visible.filter(|id| !id.is_empty()) {
                links.mark_current(&id);
            }
        });

        match observation {
            Ok(observation) => {
                debug!("Tracking {} sections", sections.len());
                Some(Self {
                    _observation: observation,
                })
            }
            Err(e) => {
                warn!("Section tracking not installed: {}", e);
                None
            }
        }
    }
}
