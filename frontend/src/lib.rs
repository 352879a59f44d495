//! Interactive behavior for the Infer landing page.
//!
//! Each controller wires itself to the page through a [`platform::Platform`]
//! and hands back a handle; dropping the handle detaches it. [`init_landing`]
//! runs the default startup sequence.

pub mod config;
pub mod controllers;
pub mod error;
pub mod platform;
pub mod ticker;

#[cfg(target_arch = "wasm32")]
pub mod components;

pub use config::LandingConfig;
pub use controllers::{
    CategoryTabs, Navigation, Parallax, ScreenshotZoom, ScrollReveal, SmoothScroll, TypingEffect,
};
pub use error::LandingError;
pub use platform::Platform;
pub use ticker::{create_stock_ticker, StockQuote, STOCK_DATA};

/// Every controller attached by [`init_landing`].
pub struct Landing {
    pub navigation: Navigation,
    pub reveal: ScrollReveal,
    pub smooth_scroll: SmoothScroll,
    pub zoom: Option<ScreenshotZoom>,
    pub tabs: Option<CategoryTabs>,
    pub parallax: Option<Parallax>,
}

impl Landing {
    /// Keeps every controller attached until the page unloads.
    pub fn forget(self) {
        std::mem::forget(self);
    }
}

/// Attaches navigation, scroll reveal, smooth scroll and screenshot zoom, in
/// that order, then any opt-in controllers the config enables.
pub fn init_landing(platform: &Platform, config: &LandingConfig) -> Landing {
    let navigation = Navigation::init(platform, &config.navigation);
    let reveal = ScrollReveal::init(platform, &config.reveal);
    let smooth_scroll = SmoothScroll::init(platform, &config.smooth_scroll, &config.navigation);
    let zoom = ScreenshotZoom::init(platform, &config.zoom);

    let tabs = config
        .enable_category_tabs
        .then(|| CategoryTabs::init(platform, &config.tabs));
    let parallax = if config.enable_parallax {
        Parallax::init(platform, &config.parallax)
    } else {
        None
    };

    log::info!(
        "Landing page ready (zoom: {}, tabs: {}, parallax: {})",
        zoom.is_some(),
        tabs.is_some(),
        parallax.is_some()
    );

    Landing {
        navigation,
        reveal,
        smooth_scroll,
        zoom,
        tabs,
        parallax,
    }
}

/// A controller that can be attached on its own, outside [`init_landing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Navigation,
    ScrollReveal,
    SmoothScroll,
    ScreenshotZoom,
    CategoryTabs,
    Parallax,
}

/// Attaches one controller for the life of the page. Returns false when the
/// page has nothing for it to drive.
pub fn attach(platform: &Platform, config: &LandingConfig, behavior: Behavior) -> bool {
    match behavior {
        Behavior::Navigation => {
            std::mem::forget(Navigation::init(platform, &config.navigation));
            true
        }
        Behavior::ScrollReveal => {
            std::mem::forget(ScrollReveal::init(platform, &config.reveal));
            true
        }
        Behavior::SmoothScroll => {
            std::mem::forget(SmoothScroll::init(
                platform,
                &config.smooth_scroll,
                &config.navigation,
            ));
            true
        }
        Behavior::ScreenshotZoom => ScreenshotZoom::init(platform, &config.zoom)
            .map(std::mem::forget)
            .is_some(),
        Behavior::CategoryTabs => {
            let tabs = CategoryTabs::init(platform, &config.tabs);
            let attached = tabs.tab_count() > 0;
            std::mem::forget(tabs);
            attached
        }
        Behavior::Parallax => Parallax::init(platform, &config.parallax)
            .map(std::mem::forget)
            .is_some(),
    }
}

/// `document.readyState` values other than "loading" mean the DOM is parsed.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn dom_is_parsed(ready_state: &str) -> bool {
    ready_state != "loading"
}

#[cfg(target_arch = "wasm32")]
mod exports {
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::js_sys;

    use crate::config::{self, LandingConfig};
    use crate::platform::web::{WebElement, WebPlatform};
    use crate::{attach, init_landing, Behavior, LandingError, TypingEffect, STOCK_DATA};

    fn page_config() -> Result<(crate::Platform, LandingConfig), LandingError> {
        let web = WebPlatform::new()?;
        let config = config::load_from_page(web.document());
        Ok((web.into_platform(), config))
    }

    fn boot() {
        match page_config() {
            Ok((platform, config)) => init_landing(&platform, &config).forget(),
            Err(e) => log::error!("Landing page not initialized: {}", e),
        }
    }

    fn attach_from_page(behavior: Behavior) -> Result<bool, JsValue> {
        let (platform, config) = page_config()?;
        let attached = attach(&platform, &config, behavior);
        if !attached {
            log::debug!("{:?} found nothing to attach to", behavior);
        }
        Ok(attached)
    }

    #[cfg(feature = "autostart")]
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(LandingError::NoDocument)?;
        if crate::dom_is_parsed(&document.ready_state()) {
            boot();
            return Ok(());
        }

        let on_ready = Closure::once(boot);
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    }

    #[wasm_bindgen(js_name = createStockTicker)]
    pub fn create_stock_ticker() -> String {
        crate::create_stock_ticker(&STOCK_DATA)
    }

    #[wasm_bindgen(js_name = stockData)]
    pub fn stock_data() -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(&STOCK_DATA).map_err(LandingError::from)?;
        js_sys::JSON::parse(&json)
    }

    #[wasm_bindgen(js_name = initNavigation)]
    pub fn init_navigation() -> Result<bool, JsValue> {
        attach_from_page(Behavior::Navigation)
    }

    #[wasm_bindgen(js_name = initScrollAnimations)]
    pub fn init_scroll_animations() -> Result<bool, JsValue> {
        attach_from_page(Behavior::ScrollReveal)
    }

    #[wasm_bindgen(js_name = initSmoothScroll)]
    pub fn init_smooth_scroll() -> Result<bool, JsValue> {
        attach_from_page(Behavior::SmoothScroll)
    }

    #[wasm_bindgen(js_name = initScreenshotZoom)]
    pub fn init_screenshot_zoom() -> Result<bool, JsValue> {
        attach_from_page(Behavior::ScreenshotZoom)
    }

    #[wasm_bindgen(js_name = initCategoryTabs)]
    pub fn init_category_tabs() -> Result<bool, JsValue> {
        attach_from_page(Behavior::CategoryTabs)
    }

    #[wasm_bindgen(js_name = initParallax)]
    pub fn init_parallax() -> Result<bool, JsValue> {
        attach_from_page(Behavior::Parallax)
    }

    /// Types `text` into `element`; `speed` is milliseconds per character.
    #[wasm_bindgen(js_name = initTypingEffect)]
    pub fn init_typing_effect(
        element: web_sys::Element,
        text: &str,
        speed: Option<u32>,
    ) -> Result<(), JsValue> {
        let platform = WebPlatform::platform()?;
        let target = Rc::new(WebElement::new(element));
        std::mem::forget(TypingEffect::start(&platform, target, text, speed));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{MemoryElement, MemoryPage};
    use crate::platform::Element;

    struct Page {
        page: MemoryPage,
        nav: MemoryElement,
        fade: MemoryElement,
        link: MemoryElement,
        preview: MemoryElement,
        tab: MemoryElement,
        logo: MemoryElement,
    }

    fn landing_page() -> Page {
        let page = MemoryPage::new();
        let body = page.body_element();
        let nav = page.add(&body, "nav", &[("id", "nav")]);
        nav.set_layout(0.0, 60.0);
        page.add(&nav, "button", &[("id", "mobile-toggle")]);
        page.add(&nav, "ul", &[("class", "nav__links")]);
        let link = page.add(&nav, "a", &[("href", "#features")]);
        let hero = page.add(&body, "header", &[("class", "hero")]);
        hero.set_layout(0.0, 700.0);
        let logo = page.add(&hero, "img", &[("class", "hero__logo")]);
        let fade = page.add(&body, "section", &[("id", "features"), ("class", "fade-in")]);
        fade.set_layout(900.0, 400.0);
        let preview = page.add(&body, "img", &[("class", "preview__phone"), ("src", "feed.png")]);
        let tab = page.add(&body, "button", &[("class", "category-tab"), ("data-category", "ai")]);
        Page {
            page,
            nav,
            fade,
            link,
            preview,
            tab,
            logo,
        }
    }

    #[test]
    fn test_default_startup_wires_core_controllers() {
        let p = landing_page();
        let landing = init_landing(&p.page.platform(), &LandingConfig::default());
        assert!(landing.zoom.is_some());
        assert!(landing.tabs.is_none());
        assert!(landing.parallax.is_none());

        p.page.scroll(120.0);
        assert!(p.nav.has_class("scrolled"));

        p.page.set_visibility(&p.fade, 0.5);
        assert!(p.fade.has_class("visible"));

        assert!(!p.page.click(&p.link));
        assert_eq!(p.page.last_scroll_request().map(|(top, _)| top), Some(820.0));

        p.page.click(&p.preview);
        assert!(landing.zoom.as_ref().map(ScreenshotZoom::is_open).unwrap_or(false));

        // Tabs and parallax stay inert unless enabled.
        p.page.click(&p.tab);
        assert!(!p.tab.has_class("active"));
        assert_eq!(p.logo.style("transform"), None);
    }

    #[test]
    fn test_opt_in_controllers() {
        let p = landing_page();
        let config = LandingConfig {
            enable_category_tabs: true,
            enable_parallax: true,
            ..LandingConfig::default()
        };
        let landing = init_landing(&p.page.platform(), &config);
        assert!(landing.tabs.is_some());
        assert!(landing.parallax.is_some());

        p.page.click(&p.tab);
        assert!(p.tab.has_class("active"));
        p.page.scroll(50.0);
        assert_eq!(p.logo.style("transform").as_deref(), Some("translateY(20px)"));
    }

    #[test]
    fn test_dropping_landing_detaches_everything() {
        let p = landing_page();
        let landing = init_landing(&p.page.platform(), &LandingConfig::default());
        assert!(p.page.listener_count() > 0);
        drop(landing);
        assert_eq!(p.page.listener_count(), 0);
        assert_eq!(p.page.watch_count(), 0);
        assert!(p.page.select(".screenshot-modal").is_none());
    }

    #[test]
    fn test_attach_single_behavior() {
        let p = landing_page();
        let platform = p.page.platform();
        let config = LandingConfig::default();
        assert!(attach(&platform, &config, Behavior::SmoothScroll));

        assert!(!p.page.click(&p.link));
        assert_eq!(p.page.last_scroll_request().map(|(top, _)| top), Some(820.0));

        // Nothing else came along with it.
        p.page.scroll(120.0);
        assert!(!p.nav.has_class("scrolled"));
        p.page.click(&p.preview);
        assert!(p.page.select(".screenshot-modal").is_none());
    }

    #[test]
    fn test_attach_each_behavior_on_full_page() {
        let p = landing_page();
        let platform = p.page.platform();
        let config = LandingConfig::default();

        assert!(attach(&platform, &config, Behavior::Navigation));
        p.page.scroll(120.0);
        assert!(p.nav.has_class("scrolled"));

        assert!(attach(&platform, &config, Behavior::ScrollReveal));
        p.page.set_visibility(&p.fade, 0.5);
        assert!(p.fade.has_class("visible"));

        assert!(attach(&platform, &config, Behavior::ScreenshotZoom));
        p.page.click(&p.preview);
        assert!(p.page.select(".screenshot-modal.active").is_some());

        assert!(attach(&platform, &config, Behavior::CategoryTabs));
        p.page.click(&p.tab);
        assert!(p.tab.has_class("active"));

        assert!(attach(&platform, &config, Behavior::Parallax));
        p.page.scroll(100.0);
        assert_eq!(p.logo.style("transform").as_deref(), Some("translateY(40px)"));
    }

    #[test]
    fn test_attach_reports_missing_markup() {
        let page = MemoryPage::new();
        let platform = page.platform();
        let config = LandingConfig::default();
        assert!(!attach(&platform, &config, Behavior::ScreenshotZoom));
        assert!(!attach(&platform, &config, Behavior::CategoryTabs));
        assert!(!attach(&platform, &config, Behavior::Parallax));
    }

    #[test]
    fn test_dom_is_parsed_after_loading() {
        assert!(!dom_is_parsed("loading"));
        assert!(dom_is_parsed("interactive"));
        assert!(dom_is_parsed("complete"));
    }

    #[test]
    fn test_empty_page_initializes_quietly() {
        let page = MemoryPage::new();
        let landing = init_landing(&page.platform(), &LandingConfig::default());
        assert!(landing.zoom.is_none());
        page.scroll(500.0);
        page.key_down("Escape");
        assert_eq!(page.listener_count(), 0);
    }
}
