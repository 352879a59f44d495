use std::any::Any;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, ScrollToOptions,
};

use super::{
    Document, DomEvent, Element, ElementRef, EventHandler, Platform, ScheduledTask, Scheduler,
    ScrollBehavior, ScrollSource, Subscription, VisibilityCallback, VisibilityEntry,
    VisibilityOptions, VisibilityWatcher,
};
use crate::error::LandingError;

/// The browser window and document behind a [`Platform`].
#[derive(Clone)]
pub struct WebPlatform {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl WebPlatform {
    pub fn new() -> Result<Self, LandingError> {
        let window = web_sys::window().ok_or(LandingError::NoWindow)?;
        let document = window.document().ok_or(LandingError::NoDocument)?;
        Ok(Self { window, document })
    }

    pub fn platform() -> Result<Platform, LandingError> {
        Ok(Self::new()?.into_platform())
    }

    pub fn into_platform(self) -> Platform {
        let web = Rc::new(self);
        Platform {
            document: web.clone(),
            scroll: web.clone(),
            scheduler: web.clone(),
            visibility: web,
        }
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }

    fn wrap(element: web_sys::Element) -> ElementRef {
        Rc::new(WebElement { inner: element })
    }
}

fn listen_on(target: &EventTarget, event: &str, mut handler: EventHandler) -> Subscription {
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        let targets_self = match (event.target(), event.current_target()) {
            (Some(target), Some(current)) => JsValue::from(target) == JsValue::from(current),
            _ => false,
        };
        let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
        let dom_event = DomEvent::new(key, targets_self);
        handler(&dom_event);
        if dom_event.is_default_prevented() {
            event.prevent_default();
        }
    });

    if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log::warn!("Failed to attach {} listener: {:?}", event, e);
        return Subscription::empty();
    }

    let target = target.clone();
    let event = event.to_string();
    Subscription::new(move || {
        if let Err(e) =
            target.remove_event_listener_with_callback(&event, callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to detach {} listener: {:?}", event, e);
        }
        drop(callback);
    })
}

impl Document for WebPlatform {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.document.get_element_by_id(id).map(Self::wrap)
    }

    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(Self::wrap),
            Err(e) => {
                log::debug!("Selector {:?} rejected: {:?}", selector, e);
                None
            }
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(e) => {
                log::debug!("Selector {:?} rejected: {:?}", selector, e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
            .map(Self::wrap)
            .collect()
    }

    fn create_element(&self, tag: &str) -> Option<ElementRef> {
        match self.document.create_element(tag) {
            Ok(element) => Some(Self::wrap(element)),
            Err(e) => {
                log::warn!("Failed to create <{}>: {:?}", tag, e);
                None
            }
        }
    }

    fn body(&self) -> Option<ElementRef> {
        self.document
            .body()
            .map(|body| Self::wrap(body.unchecked_into::<web_sys::Element>()))
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Subscription {
        listen_on(&self.document, event, handler)
    }
}

impl ScrollSource for WebPlatform {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn on_scroll(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        listen_on(&self.window, "scroll", Box::new(move |_: &DomEvent| handler()))
    }
}

impl Scheduler for WebPlatform {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask {
        // Dropping the Timeout clears the timer and frees its closure.
        ScheduledTask::holding(Timeout::new(delay_ms, task))
    }
}

impl VisibilityWatcher for WebPlatform {
    fn watch(
        &self,
        options: &VisibilityOptions,
        targets: &[ElementRef],
        mut callback: VisibilityCallback,
    ) -> Option<Subscription> {
        // The browser reports any overlap as intersecting, including the
        // initial callback, so the ratio is checked against the threshold here.
        let threshold_options = options.clone();
        let on_change = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let entries: Vec<VisibilityEntry> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| VisibilityEntry {
                        element: Self::wrap(entry.target()),
                        is_intersecting: threshold_options
                            .is_met(entry.is_intersecting(), entry.intersection_ratio()),
                    })
                    .collect();
                callback(&entries);
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));

        let observer =
            match IntersectionObserver::new_with_options(on_change.as_ref().unchecked_ref(), &init) {
                Ok(observer) => observer,
                Err(e) => {
                    log::warn!("IntersectionObserver unavailable: {:?}", e);
                    return None;
                }
            };

        for target in targets {
            if let Some(web) = target.as_any().downcast_ref::<WebElement>() {
                observer.observe(&web.inner);
            }
        }

        Some(Subscription::new(move || {
            observer.disconnect();
            drop(on_change);
        }))
    }
}

/// A live DOM element.
#[derive(Clone)]
pub struct WebElement {
    inner: web_sys::Element,
}

impl WebElement {
    pub fn new(inner: web_sys::Element) -> Self {
        Self { inner }
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.inner.dyn_ref::<HtmlElement>()
    }
}

impl Element for WebElement {
    fn add_class(&self, class: &str) {
        if let Err(e) = self.inner.class_list().add_1(class) {
            log::warn!("Failed to add class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.inner.class_list().remove_1(class) {
            log::warn!("Failed to remove class {}: {:?}", class, e);
        }
    }

    fn toggle_class(&self, class: &str) -> bool {
        self.inner.class_list().toggle(class).unwrap_or_else(|e| {
            log::warn!("Failed to toggle class {}: {:?}", class, e);
            self.has_class(class)
        })
    }

    fn has_class(&self, class: &str) -> bool {
        self.inner.class_list().contains(class)
    }

    fn set_class_name(&self, name: &str) {
        self.inner.set_class_name(name);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.inner.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(e) = self.inner.set_attribute(name, value) {
            log::warn!("Failed to set attribute {}: {:?}", name, e);
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else {
            log::debug!("Skipping style {} on non-HTML element", property);
            return;
        };
        let style = html.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            log::warn!("Failed to set style {}: {:?}", property, e);
        }
    }

    fn text(&self) -> String {
        self.inner.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.inner.set_text_content(Some(text));
    }

    fn offset_top(&self) -> f64 {
        self.html().map(|h| f64::from(h.offset_top())).unwrap_or(0.0)
    }

    fn offset_height(&self) -> f64 {
        self.html().map(|h| f64::from(h.offset_height())).unwrap_or(0.0)
    }

    fn append_child(&self, child: &dyn Element) {
        match child.as_any().downcast_ref::<WebElement>() {
            Some(child) => {
                if let Err(e) = self.inner.append_child(&child.inner) {
                    log::warn!("Failed to append child: {:?}", e);
                }
            }
            None => log::warn!("append_child called with a non-DOM element"),
        }
    }

    fn remove(&self) {
        self.inner.remove();
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Subscription {
        listen_on(&self.inner, event, handler)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
