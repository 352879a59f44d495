use crate::config::NavigationConfig;
use crate::platform::{DomEvent, ElementRef, Platform, Subscription};

/// Nav bar scroll state and the mobile menu toggle.
pub struct Navigation {
    _scroll: Option<Subscription>,
    _toggle: Option<Subscription>,
}

impl Navigation {
    pub fn init(platform: &Platform, config: &NavigationConfig) -> Self {
        let document = &platform.document;

        let scroll = match document.element_by_id(&config.nav_id) {
            Some(nav) => {
                let threshold = config.scroll_threshold;
                let class = config.scrolled_class.clone();
                apply_scrolled(&nav, platform.scroll.scroll_y(), threshold, &class);

                let source = platform.scroll.clone();
                Some(platform.scroll.on_scroll(Box::new(move || {
                    apply_scrolled(&nav, source.scroll_y(), threshold, &class);
                })))
            }
            None => {
                log::debug!("No #{} element, skipping nav scroll state", config.nav_id);
                None
            }
        };

        let toggle = match document.element_by_id(&config.toggle_id) {
            Some(toggle) => {
                let links = document.query_selector(&config.links_selector);
                let class = config.active_class.clone();
                let button = toggle.clone();
                Some(toggle.listen(
                    "click",
                    Box::new(move |_: &DomEvent| {
                        if let Some(links) = &links {
                            links.toggle_class(&class);
                        }
                        button.toggle_class(&class);
                    }),
                ))
            }
            None => None,
        };

        Self {
            _scroll: scroll,
            _toggle: toggle,
        }
    }
}

fn apply_scrolled(nav: &ElementRef, offset: f64, threshold: f64, class: &str) {
    if offset > threshold {
        nav.add_class(class);
    } else {
        nav.remove_class(class);
    }
}

/// Clears the open mark from the mobile menu and its toggle, whichever exist.
pub fn close_mobile_menu(platform: &Platform, config: &NavigationConfig) {
    if let Some(links) = platform.document.query_selector(&config.links_selector) {
        links.remove_class(&config.active_class);
    }
    if let Some(toggle) = platform.document.element_by_id(&config.toggle_id) {
        toggle.remove_class(&config.active_class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{MemoryElement, MemoryPage};
    use crate::platform::Element;

    fn nav_page() -> (MemoryPage, MemoryElement, MemoryElement, MemoryElement) {
        let page = MemoryPage::new();
        let body = page.body_element();
        let nav = page.add(&body, "nav", &[("id", "nav"), ("class", "nav")]);
        let toggle = page.add(&nav, "button", &[("id", "mobile-toggle")]);
        let links = page.add(&nav, "ul", &[("class", "nav__links")]);
        (page, nav, toggle, links)
    }

    #[test]
    fn test_scrolled_mark_follows_threshold() {
        let (page, nav, _, _) = nav_page();
        let _navigation = Navigation::init(&page.platform(), &NavigationConfig::default());

        for offset in [0.0, 10.0, 49.9, 50.0] {
            page.scroll(offset);
            assert!(!nav.has_class("scrolled"), "offset {}", offset);
        }
        for offset in [50.1, 51.0, 400.0] {
            page.scroll(offset);
            assert!(nav.has_class("scrolled"), "offset {}", offset);
        }
        page.scroll(20.0);
        assert!(!nav.has_class("scrolled"));
        assert!(nav.has_class("nav"));
    }

    #[test]
    fn test_initial_offset_is_applied() {
        let (page, nav, _, _) = nav_page();
        page.scroll(300.0);
        let _navigation = Navigation::init(&page.platform(), &NavigationConfig::default());
        assert!(nav.has_class("scrolled"));
    }

    #[test]
    fn test_toggle_parity() {
        let (page, _, toggle, links) = nav_page();
        let _navigation = Navigation::init(&page.platform(), &NavigationConfig::default());

        for clicks in 1..=6 {
            page.click(&toggle);
            let open = clicks % 2 == 1;
            assert_eq!(toggle.has_class("active"), open);
            assert_eq!(links.has_class("active"), open);
        }
    }

    #[test]
    fn test_missing_elements_are_skipped() {
        let page = MemoryPage::new();
        let _navigation = Navigation::init(&page.platform(), &NavigationConfig::default());
        page.scroll(100.0);
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_toggle_without_menu_panel() {
        let page = MemoryPage::new();
        let toggle = page.add(&page.body_element(), "button", &[("id", "mobile-toggle")]);
        let _navigation = Navigation::init(&page.platform(), &NavigationConfig::default());
        page.click(&toggle);
        assert!(toggle.has_class("active"));
    }

    #[test]
    fn test_dropping_handle_detaches_listeners() {
        let (page, nav, _, _) = nav_page();
        let navigation = Navigation::init(&page.platform(), &NavigationConfig::default());
        assert_eq!(page.listener_count(), 2);
        drop(navigation);
        assert_eq!(page.listener_count(), 0);
        page.scroll(100.0);
        assert!(!nav.has_class("scrolled"));
    }

    #[test]
    fn test_close_mobile_menu() {
        let (page, _, toggle, links) = nav_page();
        toggle.add_class("active");
        links.add_class("active");
        close_mobile_menu(&page.platform(), &NavigationConfig::default());
        assert!(!toggle.has_class("active"));
        assert!(!links.has_class("active"));
    }
}
