use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::platform::{ElementRef, Platform, ScheduledTask};

pub const DEFAULT_TYPING_SPEED_MS: u32 = 50;

/// Types `text` into an element one character at a time.
///
/// Without an explicit speed, characters land every [`DEFAULT_TYPING_SPEED_MS`].
/// Dropping the handle stops typing; whatever was already typed stays.
pub struct TypingEffect {
    state: Rc<TypingState>,
}

struct TypingState {
    platform: Platform,
    element: ElementRef,
    chars: Vec<char>,
    speed_ms: u32,
    typed: Cell<usize>,
    next: RefCell<Option<ScheduledTask>>,
}

impl TypingEffect {
    pub fn start(
        platform: &Platform,
        element: ElementRef,
        text: &str,
        speed_ms: Option<u32>,
    ) -> Self {
        element.set_text("");
        let state = Rc::new(TypingState {
            platform: platform.clone(),
            element,
            chars: text.chars().collect(),
            speed_ms: speed_ms.unwrap_or(DEFAULT_TYPING_SPEED_MS),
            typed: Cell::new(0),
            next: RefCell::new(None),
        });
        type_next(&state);
        Self { state }
    }

    pub fn is_done(&self) -> bool {
        self.state.typed.get() >= self.state.chars.len()
    }
}

impl Drop for TypingEffect {
    fn drop(&mut self) {
        self.state.next.borrow_mut().take();
    }
}

fn type_next(state: &Rc<TypingState>) {
    let index = state.typed.get();
    let Some(&c) = state.chars.get(index) else {
        return;
    };
    let mut text = state.element.text();
    text.push(c);
    state.element.set_text(&text);
    state.typed.set(index + 1);

    if index + 1 < state.chars.len() {
        let weak = Rc::downgrade(state);
        let task = state.platform.scheduler.schedule(
            state.speed_ms,
            Box::new(move || {
                if let Some(state) = weak.upgrade() {
                    type_next(&state);
                }
            }),
        );
        state.next.replace(Some(task));
    }
}
