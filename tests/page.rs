#![cfg(target_arch = "wasm32")]

use care_page::components::clipboard::legacy_copy;
use care_page::components::lightbox::ITEM_SELECTOR;
use care_page::components::reveal::is_revealed;
use care_page::components::sections::NavLinks;
use care_page::components::splash::SplashPhase;
use care_page::config::PageConfig;
use care_page::dom::{self, Capabilities};
use care_page::Page;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{
    Element, Event, EventInit, HtmlElement, HtmlFormElement, KeyboardEvent, KeyboardEventInit, MouseEvent,
    MouseEventInit, Storage,
};

wasm_bindgen_test_configure!(run_in_browser);

const FIXTURE: &str = r##"
<button id="burger" aria-expanded="false"></button>
<nav id="drawer"><a id="drawer-link" href="#services">Services</a></nav>
<div id="toast"></div>
<span id="year"></span>
<div class="reveal" id="r1"></div>
<div class="reveal" id="r2"></div>
<button data-choice="personal" id="c-personal"></button>
<button data-choice="respite" id="c-respite"></button>
<div data-rec="personal" id="rec-personal"></div>
<div data-rec="respite" id="rec-respite"></div>
<div id="gallery">
  <figure class="shot" id="shot-a" data-title="Room A" data-desc="Bright" data-img="a.jpg"></figure>
  <figure class="shot" id="shot-b"></figure>
</div>
<dialog id="lightbox">
  <div class="lightbox-inner">
    <h3 id="lightboxTitle"></h3>
    <p id="lightboxDesc"></p>
    <img id="lightboxImg" />
    <button id="lightboxClose">x</button>
  </div>
</dialog>
<form id="contactForm">
  <input name="name" value="Jo" />
  <input name="phone" value="" />
  <input name="email" value="bad" />
  <input name="service" value="" />
  <textarea name="message">hi</textarea>
</form>
"##;

fn mount() {
    let body = dom::document().and_then(|d| d.body()).expect("document body");
    body.set_inner_html(FIXTURE);
}

fn by_id(id: &str) -> HtmlElement {
    dom::query(&format!("#{}", id))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .unwrap_or_else(|| panic!("#{} missing from fixture", id))
}

fn install(caps: Capabilities) -> Page {
    mount();
    Page::install(&PageConfig::default(), caps)
}

#[wasm_bindgen_test]
fn drawer_toggles_and_links_close_it() {
    let page = install(Capabilities::none());
    let burger = by_id("burger");

    for clicks in 1..=4 {
        burger.click();
        let open = clicks % 2 == 1;
        assert_eq!(dom::has_class(&by_id("drawer"), "open"), open);
        assert_eq!(burger.get_attribute("aria-expanded").as_deref(), Some(if open { "true" } else { "false" }));
    }

    burger.click();
    by_id("drawer-link").click();
    assert!(!dom::has_class(&by_id("drawer"), "open"));
    assert!(!page.drawer.as_ref().unwrap().is_open());
}

#[wasm_bindgen_test]
fn footer_year_is_stamped() {
    let _page = install(Capabilities::none());
    let year = by_id("year").text_content().unwrap_or_default();
    assert_eq!(year.len(), 4);
    assert!(year.parse::<i32>().is_ok());
}

#[wasm_bindgen_test(async)]
async fn later_toast_replaces_earlier_one() {
    let page = install(Capabilities::none());

    page.toast.show("A");
    TimeoutFuture::new(700).await;
    page.toast.show("B");
    assert_eq!(page.toast.text().as_deref(), Some("B"));

    // The first message's timer would have fired here.
    TimeoutFuture::new(900).await;
    assert!(page.toast.is_visible());

    TimeoutFuture::new(700).await;
    assert!(!page.toast.is_visible());
    assert_eq!(page.toast.text().as_deref(), Some("B"));
}

#[wasm_bindgen_test]
fn reveal_without_observer_activates_everything() {
    let _page = install(Capabilities::none());
    assert!(is_revealed(&by_id("r1")));
    assert!(is_revealed(&by_id("r2")));
}

#[wasm_bindgen_test]
fn chooser_keeps_a_single_selection() {
    let page = install(Capabilities::none());
    let chooser = page.chooser.as_ref().expect("chooser installed");

    assert_eq!(chooser.selected_key().as_deref(), Some("personal"));
    assert!(dom::has_class(&by_id("c-personal"), "selected"));
    assert!(dom::has_class(&by_id("rec-personal"), "highlight"));

    by_id("c-respite").click();
    assert!(dom::has_class(&by_id("c-respite"), "selected"));
    assert!(dom::has_class(&by_id("rec-respite"), "highlight"));
    assert!(!dom::has_class(&by_id("c-personal"), "selected"));
    assert!(!dom::has_class(&by_id("rec-personal"), "highlight"));
    assert_eq!(dom::query_all(".selected").len(), 1);
    assert_eq!(dom::query_all(".highlight").len(), 1);
}

#[wasm_bindgen_test]
fn gallery_items_are_keyboard_reachable() {
    let _page = install(Capabilities::detect());
    for item in dom::query_all(ITEM_SELECTOR) {
        assert_eq!(item.get_attribute("tabindex").as_deref(), Some("0"));
        assert_eq!(item.get_attribute("role").as_deref(), Some("button"));
    }
    assert_eq!(by_id("shot-a").get_attribute("aria-label").as_deref(), Some("Room A (opens dialog)"));
    assert_eq!(by_id("shot-b").get_attribute("aria-label").as_deref(), Some("Open image (opens dialog)"));
}

#[wasm_bindgen_test]
fn lightbox_shows_item_and_closes_on_outside_click() {
    let page = install(Capabilities::detect());
    let lightbox = page.lightbox.as_ref().expect("lightbox installed");

    by_id("shot-a").click();
    assert_eq!(by_id("lightboxTitle").text_content().as_deref(), Some("Room A"));
    assert_eq!(by_id("lightboxDesc").text_content().as_deref(), Some("Bright"));
    assert!(by_id("lightboxImg").get_attribute("src").unwrap_or_default().ends_with("a.jpg"));
    assert_eq!(by_id("lightboxImg").get_attribute("alt").as_deref(), Some("Room A"));
    assert!(lightbox.is_open());

    let init = MouseEventInit::new();
    init.set_bubbles(true);
    init.set_client_x(-50);
    init.set_client_y(-50);
    let click = MouseEvent::new_with_mouse_event_init_dict("click", &init).unwrap();
    by_id("lightbox").dispatch_event(&click).unwrap();
    assert!(!lightbox.is_open());
}

#[wasm_bindgen_test]
fn lightbox_without_modal_still_updates_content() {
    let page = install(Capabilities::none());

    let init = KeyboardEventInit::new();
    init.set_key(" ");
    init.set_cancelable(true);
    let key = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
    by_id("shot-b").dispatch_event(&key).unwrap();

    assert!(key.default_prevented());
    assert_eq!(by_id("lightboxTitle").text_content().as_deref(), Some("Preview"));
    assert_eq!(by_id("lightboxDesc").text_content().as_deref(), Some(""));
    assert!(!page.lightbox.as_ref().unwrap().is_open());
}

#[wasm_bindgen_test]
fn invalid_form_lists_missing_fields() {
    let page = install(Capabilities::none());
    let form = by_id("contactForm").dyn_into::<HtmlFormElement>().unwrap();

    let init = EventInit::new();
    init.set_cancelable(true);
    let submit = Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&submit).unwrap();

    assert!(submit.default_prevented());
    assert_eq!(page.toast.text().as_deref(), Some("Please add: Phone, Valid email"));
    assert!(page.toast.is_visible());
}

#[wasm_bindgen_test]
fn fallback_copy_leaves_no_field_behind() {
    let _page = install(Capabilities::none());
    let before = dom::query_all("textarea").len();

    let _ = legacy_copy("555-0100");

    assert_eq!(dom::query_all("textarea").len(), before);
}

#[wasm_bindgen_test(async)]
async fn copy_confirms_with_a_toast() {
    let page = install(Capabilities::none());

    page.copier.copy("   ");
    TimeoutFuture::new(50).await;
    assert!(!page.toast.is_visible());

    page.copier.copy(" X ");
    TimeoutFuture::new(50).await;
    assert_eq!(page.toast.text().as_deref(), Some("Copied: X"));
}

#[wasm_bindgen_test]
fn dropping_the_page_hides_a_pending_toast() {
    let page = install(Capabilities::none());
    page.toast.show("Copied: 555-0100");
    assert!(dom::has_class(&by_id("toast"), "show"));

    drop(page);
    assert!(!dom::has_class(&by_id("toast"), "show"));
}

#[wasm_bindgen_test]
fn gallery_items_are_prepared_without_a_lightbox() {
    mount();
    by_id("lightbox").remove();
    let page = Page::install(&PageConfig::default(), Capabilities::detect());

    assert!(page.lightbox.is_none());
    assert_eq!(by_id("shot-a").get_attribute("tabindex").as_deref(), Some("0"));
    assert_eq!(by_id("shot-a").get_attribute("role").as_deref(), Some("button"));
    assert_eq!(by_id("shot-a").get_attribute("aria-label").as_deref(), Some("Room A (opens dialog)"));
}

const NAV_FIXTURE: &str = r##"
<nav class="navlinks">
  <a id="link-a" href="#a">A</a>
  <a id="link-b" href="#b">B</a>
  <a id="link-c" href="#c">C</a>
  <a id="link-gone" href="#gone">Gone</a>
  <a id="link-out" href="/pricing">Pricing</a>
</nav>
<section id="a"></section>
<section id="b"></section>
<section id="c"></section>
"##;

fn current_links() -> Vec<String> {
    dom::query_all(".navlinks a[aria-current]")
        .iter()
        .map(Element::id)
        .collect()
}

#[wasm_bindgen_test]
fn only_one_nav_link_is_current() {
    let body = dom::document().and_then(|d| d.body()).expect("document body");
    body.set_inner_html(NAV_FIXTURE);
    let links = NavLinks::collect();

    let sections: Vec<String> = links.sections().iter().map(Element::id).collect();
    assert_eq!(sections, vec!["a", "b", "c"]);

    links.mark_current("b");
    assert_eq!(current_links(), vec!["link-b"]);
    assert_eq!(by_id("link-b").get_attribute("aria-current").as_deref(), Some("page"));

    links.mark_current("c");
    assert_eq!(current_links(), vec!["link-c"]);
    assert!(by_id("link-b").get_attribute("aria-current").is_none());
}

const SPLASH_KEY: &str = "privian_splash_seen";

const SPLASH_FIXTURE: &str = r##"
<div id="splash">
  <button id="splash-enter" data-splash-enter data-scroll-target="#services">Enter</button>
  <button id="splash-skip" data-splash-skip>Skip</button>
</div>
<section id="services"></section>
"##;

fn storage() -> Storage {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .expect("localStorage available")
}

fn html_root() -> Element {
    dom::document()
        .and_then(|d| d.document_element())
        .expect("document element")
}

fn install_splash(seen: bool) -> Page {
    if seen {
        storage().set_item(SPLASH_KEY, "1").unwrap();
    } else {
        storage().remove_item(SPLASH_KEY).unwrap();
    }
    let body = dom::document().and_then(|d| d.body()).expect("document body");
    body.set_inner_html(SPLASH_FIXTURE);
    Page::install(&PageConfig::default(), Capabilities::none())
}

#[wasm_bindgen_test(async)]
async fn entering_fades_out_and_hands_focus_to_target() {
    let page = install_splash(false);
    let splash = by_id("splash");
    assert!(dom::has_class(&html_root(), "splash-lock"));
    assert!(!splash.has_attribute("hidden"));

    by_id("splash-enter").click();
    assert!(dom::has_class(&splash, "leaving"));
    assert!(!dom::has_class(&html_root(), "splash-lock"));
    assert_eq!(storage().get_item(SPLASH_KEY).unwrap().as_deref(), Some("1"));
    assert_eq!(page.splash.as_ref().unwrap().phase(), SplashPhase::Leaving);
    assert!(!splash.has_attribute("hidden"));

    TimeoutFuture::new(750).await;
    assert!(splash.has_attribute("hidden"));
    assert_eq!(splash.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert_eq!(page.splash.as_ref().unwrap().phase(), SplashPhase::Hidden);

    let services = by_id("services");
    assert_eq!(services.get_attribute("tabindex").as_deref(), Some("-1"));
    let focused = dom::document().and_then(|d| d.active_element()).map(|el| el.id());
    assert_eq!(focused.as_deref(), Some("services"));

    TimeoutFuture::new(650).await;
    assert!(!services.has_attribute("tabindex"));

    storage().remove_item(SPLASH_KEY).unwrap();
}

#[wasm_bindgen_test(async)]
async fn skipping_hides_without_moving_focus() {
    let page = install_splash(false);
    let splash = by_id("splash");

    by_id("splash-skip").click();
    by_id("splash-enter").click();
    assert_eq!(storage().get_item(SPLASH_KEY).unwrap().as_deref(), Some("1"));

    TimeoutFuture::new(750).await;
    assert!(splash.has_attribute("hidden"));
    assert_eq!(page.splash.as_ref().unwrap().phase(), SplashPhase::Hidden);
    assert!(!by_id("services").has_attribute("tabindex"));

    storage().remove_item(SPLASH_KEY).unwrap();
}

#[wasm_bindgen_test]
fn seen_splash_is_hidden_at_install() {
    let page = install_splash(true);
    let splash = by_id("splash");

    assert_eq!(page.splash.as_ref().unwrap().phase(), SplashPhase::Hidden);
    assert!(splash.has_attribute("hidden"));
    assert_eq!(splash.get_attribute("aria-hidden").as_deref(), Some("true"));
    assert!(!dom::has_class(&splash, "leaving"));
    assert!(!dom::has_class(&html_root(), "splash-lock"));

    storage().remove_item(SPLASH_KEY).unwrap();
}
