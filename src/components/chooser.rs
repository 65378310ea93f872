use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::debug;
use web_sys::Element;

use crate::config::PageConfig;
use crate::dom;

pub const CHOICE_ATTR: &str = "data-choice";
pub const REC_ATTR: &str = "data-rec";
pub const SELECTED_CLASS: &str = "selected";
pub const HIGHLIGHT_CLASS: &str = "highlight";

/// Mutually exclusive choice keys. At most one is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceSet {
    keys: Vec<String>,
    selected: Option<usize>,
}

impl ChoiceSet {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, selected: None }
    }

    /// Selects the first choice carrying `key`; an unknown key clears the
    /// selection.
    pub fn select(&mut self, key: &str) -> Option<usize> {
        self.selected = self.keys.iter().position(|k| k == key);
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected.map(|i| self.keys[i].as_str())
    }
}

struct ChooserView {
    buttons: Vec<Element>,
    cards: Vec<(String, Element)>,
    choices: RefCell<ChoiceSet>,
}

impl ChooserView {
    fn highlight(&self, key: &str) {
        let mut choices = self.choices.borrow_mut();
        choices.select(key);
        for (i, button) in self.buttons.iter().enumerate() {
            let on = choices.is_selected(i);
            dom::set_class(button, SELECTED_CLASS, on);
            let _ = button.set_attribute("aria-pressed", &on.to_string());
        }
        let current = choices.selected_key();
        for (rec, card) in &self.cards {
            dom::set_class(card, HIGHLIGHT_CLASS, current == Some(rec.as_str()));
        }
    }
}

/// Care-need picker that highlights the matching recommendation card.
pub struct Chooser {
    view: Rc<ChooserView>,
    _listeners: Vec<EventListener>,
}

impl Chooser {
    pub fn install(config: &PageConfig) -> Option<Self> {
        let buttons = dom::query_all(&format!("[{}]", CHOICE_ATTR));
        if buttons.is_empty() {
            debug!("No choice buttons, chooser not installed");
            return None;
        }
        let keys = buttons
            .iter()
            .map(|b| b.get_attribute(CHOICE_ATTR).unwrap_or_default())
            .collect();
        let cards = dom::query_all(&format!("[{}]", REC_ATTR))
            .into_iter()
            .map(|card| (card.get_attribute(REC_ATTR).unwrap_or_default(), card))
            .collect();

        let view = Rc::new(ChooserView {
            buttons,
            cards,
            choices: RefCell::new(ChoiceSet::new(keys)),
        });
        let listeners = view
            .buttons
            .iter()
            .map(|button| {
                let view = view.clone();
                let key = button.get_attribute(CHOICE_ATTR).unwrap_or_default();
                EventListener::new(button, "click", move |_| view.highlight(&key))
            })
            .collect();

        view.highlight(&config.default_choice);
        Some(Self {
            view,
            _listeners: listeners,
        })
    }

    pub fn highlight(&self, key: &str) {
        self.view.highlight(key);
    }

    pub fn selected_key(&self) -> Option<String> {
        self.view.choices.borrow().selected_key().map(str::to_string)
    }
}
