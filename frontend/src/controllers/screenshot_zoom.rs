use std::cell::RefCell;
use std::rc::Rc;

use crate::config::ZoomConfig;
use crate::platform::{DomEvent, ElementRef, Platform, ScheduledTask, Subscription};

/// Full-screen zoom for the phone screenshots.
///
/// The modal markup is built once and appended to the body:
///
/// ```text
/// <div class="screenshot-modal">
///     <button class="screenshot-modal__close" aria-label="Close zoom">×</button>
///     <img class="screenshot-modal__content" src="" alt="Zoomed Screenshot">
/// </div>
/// ```
pub struct ScreenshotZoom {
    modal: Rc<ZoomModal>,
    _listeners: Vec<Subscription>,
}

struct ZoomModal {
    platform: Platform,
    config: ZoomConfig,
    root: ElementRef,
    close_button: ElementRef,
    image: ElementRef,
    body: ElementRef,
    pending_clear: RefCell<Option<ScheduledTask>>,
}

impl ScreenshotZoom {
    /// Returns `None` when the page has no previews or the modal can't be built.
    pub fn init(platform: &Platform, config: &ZoomConfig) -> Option<Self> {
        let previews = platform.document.query_selector_all(&config.preview_selector);
        if previews.is_empty() {
            log::debug!("No screenshots match {:?}, zoom disabled", config.preview_selector);
            return None;
        }

        let modal = Rc::new(ZoomModal::build(platform, config)?);
        let mut listeners = Vec::with_capacity(previews.len() + 3);

        for preview in previews {
            let modal = Rc::downgrade(&modal);
            let source = preview.clone();
            listeners.push(preview.listen(
                "click",
                Box::new(move |_: &DomEvent| {
                    if let Some(modal) = modal.upgrade() {
                        let src = source.attribute("src").unwrap_or_default();
                        let alt = source.attribute("alt").unwrap_or_default();
                        modal.open(&src, &alt);
                    }
                }),
            ));
        }

        {
            let weak = Rc::downgrade(&modal);
            listeners.push(modal.close_button.listen(
                "click",
                Box::new(move |_: &DomEvent| {
                    if let Some(modal) = weak.upgrade() {
                        modal.close();
                    }
                }),
            ));
        }

        {
            let weak = Rc::downgrade(&modal);
            listeners.push(modal.root.listen(
                "click",
                Box::new(move |event: &DomEvent| {
                    // Only the backdrop itself, not clicks bubbling up from the image.
                    if !event.targets_self() {
                        return;
                    }
                    if let Some(modal) = weak.upgrade() {
                        modal.close();
                    }
                }),
            ));
        }

        {
            let weak = Rc::downgrade(&modal);
            listeners.push(platform.document.listen(
                "keydown",
                Box::new(move |event: &DomEvent| {
                    if event.key() != Some("Escape") {
                        return;
                    }
                    if let Some(modal) = weak.upgrade() {
                        if modal.is_open() {
                            modal.close();
                        }
                    }
                }),
            ));
        }

        Some(Self {
            modal,
            _listeners: listeners,
        })
    }

    pub fn open(&self, src: &str, alt: &str) {
        self.modal.open(src, alt);
    }

    pub fn close(&self) {
        self.modal.close();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_open()
    }
}

impl Drop for ScreenshotZoom {
    fn drop(&mut self) {
        if self.modal.is_open() {
            self.modal.body.set_style("overflow", "");
        }
        self.modal.pending_clear.borrow_mut().take();
        self.modal.root.remove();
    }
}

impl ZoomModal {
    fn build(platform: &Platform, config: &ZoomConfig) -> Option<Self> {
        let document = &platform.document;
        let Some(body) = document.body() else {
            log::warn!("Document has no body, screenshot zoom disabled");
            return None;
        };

        let root = document.create_element("div")?;
        root.set_class_name(&config.modal_class);

        let close_button = document.create_element("button")?;
        close_button.set_class_name(&config.close_class);
        close_button.set_attribute("aria-label", &config.close_label);
        close_button.set_text("\u{00d7}");

        let image = document.create_element("img")?;
        image.set_class_name(&config.content_class);
        image.set_attribute("src", "");
        image.set_attribute("alt", &config.default_alt);

        root.append_child(&*close_button);
        root.append_child(&*image);
        body.append_child(&*root);

        Some(Self {
            platform: platform.clone(),
            config: config.clone(),
            root,
            close_button,
            image,
            body,
            pending_clear: RefCell::new(None),
        })
    }

    fn is_open(&self) -> bool {
        self.root.has_class(&self.config.active_class)
    }

    fn open(&self, src: &str, alt: &str) {
        // A clear queued by an earlier close must not blank this image.
        if let Some(pending) = self.pending_clear.borrow_mut().take() {
            pending.cancel();
        }
        self.image.set_attribute("src", src);
        self.image.set_attribute("alt", alt);
        self.root.add_class(&self.config.active_class);
        self.body.set_style("overflow", "hidden");
    }

    fn close(&self) {
        self.root.remove_class(&self.config.active_class);
        self.body.set_style("overflow", "");

        let image = self.image.clone();
        let task = self.platform.scheduler.schedule(
            self.config.clear_delay_ms,
            Box::new(move || image.set_attribute("src", "")),
        );
        if let Some(previous) = self.pending_clear.replace(Some(task)) {
            previous.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{MemoryElement, MemoryPage};
    use crate::platform::Element;

    struct Fixture {
        page: MemoryPage,
        previews: Vec<MemoryElement>,
        zoom: ScreenshotZoom,
    }

    impl Fixture {
        fn modal(&self) -> MemoryElement {
            self.page.select(".screenshot-modal").unwrap()
        }

        fn image(&self) -> MemoryElement {
            self.page.select(".screenshot-modal__content").unwrap()
        }

        fn close_button(&self) -> MemoryElement {
            self.page.select(".screenshot-modal__close").unwrap()
        }

        fn body_overflow(&self) -> Option<String> {
            self.page.body_element().style("overflow")
        }
    }

    fn fixture() -> Fixture {
        let page = MemoryPage::new();
        let body = page.body_element();
        let gallery = page.add(&body, "div", &[("class", "preview")]);
        let previews = vec![
            page.add(&gallery, "img", &[("class", "preview__phone"), ("src", "a.jpg"), ("alt", "Feed")]),
            page.add(&gallery, "img", &[("class", "preview__phone"), ("src", "b.jpg"), ("alt", "Chat")]),
        ];
        let zoom = ScreenshotZoom::init(&page.platform(), &ZoomConfig::default()).unwrap();
        Fixture { page, previews, zoom }
    }

    #[test]
    fn test_no_previews_builds_nothing() {
        let page = MemoryPage::new();
        assert!(ScreenshotZoom::init(&page.platform(), &ZoomConfig::default()).is_none());
        assert!(page.select(".screenshot-modal").is_none());
        assert_eq!(page.listener_count(), 0);
    }

    #[test]
    fn test_modal_markup_is_built_once_and_hidden() {
        let f = fixture();
        assert_eq!(f.page.select_all(".screenshot-modal").len(), 1);
        let modal = f.modal();
        assert_eq!(modal.parent(), Some(f.page.body_element()));
        assert!(!modal.has_class("active"));

        let children = modal.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].tag(), "button");
        assert_eq!(children[0].attribute("aria-label").as_deref(), Some("Close zoom"));
        assert_eq!(children[0].text(), "\u{00d7}");
        assert_eq!(children[1].tag(), "img");
        assert_eq!(children[1].attribute("src").as_deref(), Some(""));
        assert_eq!(children[1].attribute("alt").as_deref(), Some("Zoomed Screenshot"));
    }

    #[test]
    fn test_preview_click_opens_modal() {
        let f = fixture();
        f.page.click(&f.previews[0]);
        assert!(f.zoom.is_open());
        assert!(f.modal().has_class("active"));
        assert_eq!(f.image().attribute("src").as_deref(), Some("a.jpg"));
        assert_eq!(f.image().attribute("alt").as_deref(), Some("Feed"));
        assert_eq!(f.body_overflow().as_deref(), Some("hidden"));
    }

    fn assert_closed_then_cleared(f: &Fixture) {
        assert!(!f.zoom.is_open());
        assert_eq!(f.body_overflow(), None);
        assert_eq!(f.image().attribute("src").as_deref(), Some("a.jpg"));
        f.page.advance(299);
        assert_eq!(f.image().attribute("src").as_deref(), Some("a.jpg"));
        f.page.advance(1);
        assert_eq!(f.image().attribute("src").as_deref(), Some(""));
    }

    #[test]
    fn test_close_button_closes() {
        let f = fixture();
        f.page.click(&f.previews[0]);
        f.page.click(&f.close_button());
        assert_closed_then_cleared(&f);
    }

    #[test]
    fn test_backdrop_click_closes() {
        let f = fixture();
        f.page.click(&f.previews[0]);
        f.page.click(&f.modal());
        assert_closed_then_cleared(&f);
    }

    #[test]
    fn test_clicking_image_keeps_modal_open() {
        let f = fixture();
        f.page.click(&f.previews[0]);
        f.page.click(&f.image());
        assert!(f.zoom.is_open());
        assert_eq!(f.page.pending_tasks(), 0);
    }

    #[test]
    fn test_escape_closes_open_modal() {
        let f = fixture();
        f.page.click(&f.previews[0]);
        f.page.key_down("Enter");
        assert!(f.zoom.is_open());
        f.page.key_down("Escape");
        assert_closed_then_cleared(&f);
    }

    #[test]
    fn test_escape_while_closed_changes_nothing() {
        let f = fixture();
        f.page.key_down("Escape");
        assert!(!f.zoom.is_open());
        assert_eq!(f.body_overflow(), None);
        assert_eq!(f.page.pending_tasks(), 0);
        assert_eq!(f.modal().classes(), vec!["screenshot-modal"]);
    }

    #[test]
    fn test_reopen_during_close_transition_keeps_image() {
        let f = fixture();
        f.page.click(&f.previews[0]);
        f.page.key_down("Escape");
        f.page.advance(100);
        f.page.click(&f.previews[1]);
        assert_eq!(f.page.pending_tasks(), 0);

        f.page.advance(1_000);
        assert!(f.zoom.is_open());
        assert_eq!(f.image().attribute("src").as_deref(), Some("b.jpg"));
        assert_eq!(f.image().attribute("alt").as_deref(), Some("Chat"));
    }

    #[test]
    fn test_repeated_opens_reuse_one_modal() {
        let f = fixture();
        for preview in f.previews.iter().chain(f.previews.iter()) {
            f.page.click(preview);
            f.page.click(&f.close_button());
        }
        assert_eq!(f.page.select_all(".screenshot-modal").len(), 1);
        assert_eq!(f.page.pending_tasks(), 1);
        f.page.advance(300);
        assert_eq!(f.image().attribute("src").as_deref(), Some(""));
    }

    #[test]
    fn test_programmatic_open_and_close() {
        let f = fixture();
        f.zoom.open("c.png", "Settings");
        assert!(f.zoom.is_open());
        assert_eq!(f.image().attribute("src").as_deref(), Some("c.png"));
        f.zoom.close();
        assert!(!f.zoom.is_open());
    }

    #[test]
    fn test_drop_removes_modal_and_restores_scroll() {
        let Fixture { page, previews, zoom } = fixture();
        page.click(&previews[0]);
        drop(zoom);
        assert!(page.select(".screenshot-modal").is_none());
        assert_eq!(page.body_element().style("overflow"), None);
        assert_eq!(page.listener_count(), 0);
    }
}
