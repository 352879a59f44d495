//! Seams between the landing-page controllers and the browser.
//!
//! Controllers never touch `window` or `document` directly. They receive a
//! [`Platform`] bundle and work through the traits below, so the same code
//! drives the real DOM (`web`, wasm only) and the in-memory page used by
//! tests (`memory`).

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub type ElementRef = Rc<dyn Element>;
pub type EventHandler = Box<dyn FnMut(&DomEvent)>;
pub type VisibilityCallback = Box<dyn FnMut(&[VisibilityEntry])>;

/// A node in the page that controllers can read and mutate.
pub trait Element {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Flips `class` and returns whether it is now present.
    fn toggle_class(&self, class: &str) -> bool;
    fn has_class(&self, class: &str) -> bool;
    fn set_class_name(&self, name: &str);

    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);

    /// Sets an inline style property. An empty value removes it.
    fn set_style(&self, property: &str, value: &str);

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    fn offset_top(&self) -> f64;
    fn offset_height(&self) -> f64;

    fn append_child(&self, child: &dyn Element);
    /// Detaches the element from its parent.
    fn remove(&self);

    fn listen(&self, event: &str, handler: EventHandler) -> Subscription;

    fn as_any(&self) -> &dyn Any;
}

pub trait Document {
    fn element_by_id(&self, id: &str) -> Option<ElementRef>;
    /// Invalid selectors match nothing.
    fn query_selector(&self, selector: &str) -> Option<ElementRef>;
    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef>;
    fn create_element(&self, tag: &str) -> Option<ElementRef>;
    fn body(&self) -> Option<ElementRef>;
    /// Listens on the document itself (keyboard events land here).
    fn listen(&self, event: &str, handler: EventHandler) -> Subscription;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

pub trait ScrollSource {
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);
    fn on_scroll(&self, handler: Box<dyn FnMut()>) -> Subscription;
}

pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask;
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be on screen, 0.0 to 1.0.
    pub threshold: f64,
    pub root_margin: String,
}

impl VisibilityOptions {
    /// Whether an observed overlap satisfies the threshold. A zero threshold
    /// accepts any overlap; otherwise `ratio` must reach it.
    pub fn is_met(&self, is_intersecting: bool, ratio: f64) -> bool {
        is_intersecting && (self.threshold <= 0.0 || ratio >= self.threshold)
    }
}

pub struct VisibilityEntry {
    pub element: ElementRef,
    /// True once at least `threshold` of the element is on screen.
    pub is_intersecting: bool,
}

pub trait VisibilityWatcher {
    /// Returns `None` when the platform cannot observe visibility.
    fn watch(
        &self,
        options: &VisibilityOptions,
        targets: &[ElementRef],
        callback: VisibilityCallback,
    ) -> Option<Subscription>;
}

/// Everything a controller needs from its environment.
#[derive(Clone)]
pub struct Platform {
    pub document: Rc<dyn Document>,
    pub scroll: Rc<dyn ScrollSource>,
    pub scheduler: Rc<dyn Scheduler>,
    pub visibility: Rc<dyn VisibilityWatcher>,
}

/// The parts of a DOM event the controllers look at.
#[derive(Debug, Default)]
pub struct DomEvent {
    key: Option<String>,
    targets_self: bool,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    pub fn new(key: Option<String>, targets_self: bool) -> Self {
        Self {
            key,
            targets_self,
            default_prevented: Cell::new(false),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// True when the listening element is the one that was hit, not one of its children.
    pub fn targets_self(&self) -> bool {
        self.targets_self
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Detaches a listener or observer when dropped.
#[must_use = "dropping a Subscription detaches it immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A subscription with nothing to tear down.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Keeps the listener attached for the life of the page.
    pub fn forget(mut self) {
        if let Some(teardown) = self.teardown.take() {
            std::mem::forget(teardown);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

/// A pending timer. Dropping or cancelling it stops the task if it has not run yet.
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Ties the task's lifetime to `guard`: cancelling or dropping the task
    /// drops the guard, whose own `Drop` stops the timer.
    pub fn holding<T: 'static>(guard: T) -> Self {
        Self::new(move || drop(guard))
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
