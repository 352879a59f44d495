//! A rendering-free page for driving controllers outside a browser.
//!
//! Layout is whatever the test assigns, time only moves on [`MemoryPage::advance`],
//! and visibility changes only through [`MemoryPage::set_visibility`].

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use super::{
    Document, DomEvent, Element, ElementRef, EventHandler, Platform, ScheduledTask, Scheduler,
    ScrollBehavior, ScrollSource, Subscription, VisibilityCallback, VisibilityEntry,
    VisibilityOptions, VisibilityWatcher,
};

type SharedHandler = Rc<RefCell<EventHandler>>;
type SharedVisibilityCallback = Rc<RefCell<VisibilityCallback>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Window,
    Document,
    Node(usize),
}

struct Listener {
    id: u64,
    target: Target,
    event: String,
    handler: SharedHandler,
}

struct Task {
    id: u64,
    due: u64,
    run: Box<dyn FnOnce()>,
}

struct Watch {
    id: u64,
    threshold: f64,
    targets: Vec<usize>,
    visible: BTreeMap<usize, bool>,
    callback: SharedVisibilityCallback,
}

#[derive(Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
    top: f64,
    height: f64,
    visibility: f64,
}

impl Node {
    fn classes(&self) -> Vec<&str> {
        self.attributes
            .get("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, classes: &[&str]) {
        self.attributes
            .insert("class".to_string(), classes.join(" "));
    }
}

const ROOT: usize = 0;

struct PageState {
    nodes: Vec<Node>,
    body: usize,
    listeners: Vec<Listener>,
    tasks: Vec<Task>,
    watches: Vec<Watch>,
    next_id: u64,
    now: u64,
    scroll_y: f64,
    last_scroll_request: Option<(f64, ScrollBehavior)>,
    location_hash: String,
}

impl PageState {
    fn new() -> Self {
        let mut state = Self {
            nodes: Vec::new(),
            body: 0,
            listeners: Vec::new(),
            tasks: Vec::new(),
            watches: Vec::new(),
            next_id: 1,
            now: 0,
            scroll_y: 0.0,
            last_scroll_request: None,
            location_hash: String::new(),
        };
        let root = state.create("html");
        let body = state.create("body");
        state.attach(root, body);
        state.body = body;
        state
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn create(&mut self, tag: &str) -> usize {
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        self.nodes.len() - 1
    }

    fn detach(&mut self, node: usize) {
        if let Some(parent) = self.nodes[node].parent.take() {
            self.nodes[parent].children.retain(|&c| c != node);
        }
    }

    fn attach(&mut self, parent: usize, child: usize) {
        // Refuse cycles: a node cannot become its own descendant.
        if self.ancestors(parent).any(|a| a == child) || parent == child {
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn ancestors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.nodes[node].parent, move |&n| self.nodes[n].parent)
    }

    /// Connected nodes in document order.
    fn document_order(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.nodes[node].children.iter().rev());
        }
        out
    }

    fn select_all(&self, selector: &str) -> Vec<usize> {
        match parse_selector_list(selector) {
            Some(list) => self
                .document_order()
                .into_iter()
                .filter(|&n| list.iter().any(|complex| self.matches(n, complex)))
                .collect(),
            None => {
                log::debug!("Ignoring unsupported selector {:?}", selector);
                Vec::new()
            }
        }
    }

    fn matches(&self, node: usize, complex: &[Compound]) -> bool {
        let Some((last, rest)) = complex.split_last() else {
            return false;
        };
        if !last.matches(&self.nodes[node]) {
            return false;
        }
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in self.ancestors(node) {
            match remaining.peek() {
                Some(compound) if compound.matches(&self.nodes[ancestor]) => {
                    remaining.next();
                }
                Some(_) => {}
                None => break,
            }
        }
        remaining.peek().is_none()
    }

    fn handlers_for(&self, target: Target, event: &str) -> Vec<SharedHandler> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.event == event)
            .map(|l| l.handler.clone())
            .collect()
    }
}

/// An in-memory page. Cloning shares the same page.
#[derive(Clone)]
pub struct MemoryPage {
    state: Rc<RefCell<PageState>>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(PageState::new())),
        }
    }

    pub fn platform(&self) -> Platform {
        Platform {
            document: Rc::new(self.clone()),
            scroll: Rc::new(self.clone()),
            scheduler: Rc::new(self.clone()),
            visibility: Rc::new(self.clone()),
        }
    }

    fn element(&self, node: usize) -> MemoryElement {
        MemoryElement {
            page: self.state.clone(),
            node,
        }
    }

    pub fn body_element(&self) -> MemoryElement {
        let body = self.state.borrow().body;
        self.element(body)
    }

    /// Creates an element under `parent`. A `class` attribute seeds the class list.
    pub fn add(&self, parent: &MemoryElement, tag: &str, attributes: &[(&str, &str)]) -> MemoryElement {
        let mut state = self.state.borrow_mut();
        let node = state.create(tag);
        for (name, value) in attributes {
            state.nodes[node]
                .attributes
                .insert(name.to_string(), value.to_string());
        }
        state.attach(parent.node, node);
        drop(state);
        self.element(node)
    }

    pub fn by_id(&self, id: &str) -> Option<MemoryElement> {
        let state = self.state.borrow();
        let node = state
            .document_order()
            .into_iter()
            .find(|&n| state.nodes[n].attributes.get("id").map(String::as_str) == Some(id));
        drop(state);
        node.map(|n| self.element(n))
    }

    pub fn select(&self, selector: &str) -> Option<MemoryElement> {
        self.select_all(selector).into_iter().next()
    }

    pub fn select_all(&self, selector: &str) -> Vec<MemoryElement> {
        let nodes = self.state.borrow().select_all(selector);
        nodes.into_iter().map(|n| self.element(n)).collect()
    }

    fn dispatch(&self, origin: Target, path: &[Target], event: &str, key: Option<&str>) -> bool {
        let mut prevented = false;
        for &target in path {
            let handlers = self.state.borrow().handlers_for(target, event);
            if handlers.is_empty() {
                continue;
            }
            let dom_event = DomEvent::new(key.map(str::to_string), target == origin);
            if prevented {
                dom_event.prevent_default();
            }
            for handler in handlers {
                (&mut *handler.borrow_mut())(&dom_event);
            }
            prevented = dom_event.is_default_prevented();
        }
        !prevented
    }

    /// Clicks `element`, bubbling to the document. Returns whether the default action ran.
    pub fn click(&self, element: &MemoryElement) -> bool {
        let mut path = vec![Target::Node(element.node)];
        path.extend(
            self.state
                .borrow()
                .ancestors(element.node)
                .map(Target::Node),
        );
        path.push(Target::Document);
        path.push(Target::Window);

        let proceeds = self.dispatch(Target::Node(element.node), &path, "click", None);
        if proceeds {
            let mut state = self.state.borrow_mut();
            let node = &state.nodes[element.node];
            if node.tag == "a" {
                if let Some(href) = node.attributes.get("href").filter(|h| h.starts_with('#')) {
                    let href = href.clone();
                    state.location_hash = href;
                }
            }
        }
        proceeds
    }

    /// Presses `key` with focus on the document.
    pub fn key_down(&self, key: &str) -> bool {
        self.dispatch(
            Target::Document,
            &[Target::Document, Target::Window],
            "keydown",
            Some(key),
        )
    }

    /// Moves the viewport and fires the window's scroll listeners.
    pub fn scroll(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
        self.dispatch(Target::Window, &[Target::Window], "scroll", None);
    }

    pub fn current_scroll(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// The most recent `scroll_to` request, unclamped.
    pub fn last_scroll_request(&self) -> Option<(f64, ScrollBehavior)> {
        self.state.borrow().last_scroll_request
    }

    pub fn location_hash(&self) -> String {
        self.state.borrow().location_hash.clone()
    }

    /// Sets the on-screen fraction of `element` and notifies watchers whose threshold it crosses.
    pub fn set_visibility(&self, element: &MemoryElement, ratio: f64) {
        let mut deliveries: Vec<(SharedVisibilityCallback, bool)> = Vec::new();
        {
            let mut state = self.state.borrow_mut();
            state.nodes[element.node].visibility = ratio;
            for watch in state.watches.iter_mut() {
                if !watch.targets.contains(&element.node) {
                    continue;
                }
                let now_visible = crosses(ratio, watch.threshold);
                let was_visible = watch.visible.insert(element.node, now_visible);
                if was_visible != Some(now_visible) {
                    deliveries.push((watch.callback.clone(), now_visible));
                }
            }
        }
        for (callback, is_intersecting) in deliveries {
            let entry = VisibilityEntry {
                element: Rc::new(element.clone()),
                is_intersecting,
            };
            (&mut *callback.borrow_mut())(&[entry]);
        }
    }

    /// Moves the virtual clock forward, running due tasks in order.
    pub fn advance(&self, ms: u64) {
        let until = self.state.borrow().now + ms;
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let due = state
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= until)
                    .min_by_key(|(_, t)| (t.due, t.id))
                    .map(|(i, _)| i);
                due.map(|i| {
                    let task = state.tasks.remove(i);
                    state.now = task.due;
                    task
                })
            };
            match next {
                Some(task) => (task.run)(),
                None => break,
            }
        }
        self.state.borrow_mut().now = until;
    }

    pub fn now(&self) -> u64 {
        self.state.borrow().now
    }

    pub fn pending_tasks(&self) -> usize {
        self.state.borrow().tasks.len()
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn watch_count(&self) -> usize {
        self.state.borrow().watches.len()
    }

    fn add_listener(&self, target: Target, event: &str, handler: EventHandler) -> Subscription {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        state.listeners.push(Listener {
            id,
            target,
            event: event.to_string(),
            handler: Rc::new(RefCell::new(handler)),
        });
        drop(state);
        remove_listener_on_drop(Rc::downgrade(&self.state), id)
    }
}

fn remove_listener_on_drop(page: Weak<RefCell<PageState>>, id: u64) -> Subscription {
    Subscription::new(move || {
        if let Some(state) = page.upgrade() {
            state.borrow_mut().listeners.retain(|l| l.id != id);
        }
    })
}

fn crosses(ratio: f64, threshold: f64) -> bool {
    let options = VisibilityOptions {
        threshold,
        root_margin: String::new(),
    };
    options.is_met(ratio > 0.0, ratio)
}

impl Document for MemoryPage {
    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        self.by_id(id).map(|e| Rc::new(e) as ElementRef)
    }

    fn query_selector(&self, selector: &str) -> Option<ElementRef> {
        self.select(selector).map(|e| Rc::new(e) as ElementRef)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<ElementRef> {
        self.select_all(selector)
            .into_iter()
            .map(|e| Rc::new(e) as ElementRef)
            .collect()
    }

    fn create_element(&self, tag: &str) -> Option<ElementRef> {
        let node = self.state.borrow_mut().create(tag);
        Some(Rc::new(self.element(node)))
    }

    fn body(&self) -> Option<ElementRef> {
        Some(Rc::new(self.body_element()))
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Subscription {
        self.add_listener(Target::Document, event, handler)
    }
}

impl ScrollSource for MemoryPage {
    fn scroll_y(&self) -> f64 {
        self.current_scroll()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut state = self.state.borrow_mut();
        state.last_scroll_request = Some((top, behavior));
        state.scroll_y = top.max(0.0);
    }

    fn on_scroll(&self, mut handler: Box<dyn FnMut()>) -> Subscription {
        self.add_listener(Target::Window, "scroll", Box::new(move |_: &DomEvent| handler()))
    }
}

impl Scheduler for MemoryPage {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let mut state = self.state.borrow_mut();
        let id = state.next_id();
        let due = state.now + u64::from(delay_ms);
        state.tasks.push(Task { id, due, run: task });
        drop(state);

        let page = Rc::downgrade(&self.state);
        ScheduledTask::new(move || {
            if let Some(state) = page.upgrade() {
                state.borrow_mut().tasks.retain(|t| t.id != id);
            }
        })
    }
}

impl VisibilityWatcher for MemoryPage {
    fn watch(
        &self,
        options: &VisibilityOptions,
        targets: &[ElementRef],
        callback: VisibilityCallback,
    ) -> Option<Subscription> {
        let nodes: Vec<usize> = targets
            .iter()
            .filter_map(|t| t.as_any().downcast_ref::<MemoryElement>())
            .filter(|e| Rc::ptr_eq(&e.page, &self.state))
            .map(|e| e.node)
            .collect();

        let callback: SharedVisibilityCallback = Rc::new(RefCell::new(callback));
        let (id, initial) = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id();
            let initial: Vec<(usize, bool)> = nodes
                .iter()
                .map(|&n| (n, crosses(state.nodes[n].visibility, options.threshold)))
                .collect();
            state.watches.push(Watch {
                id,
                threshold: options.threshold,
                targets: nodes,
                visible: initial.iter().copied().collect(),
                callback: callback.clone(),
            });
            (id, initial)
        };

        // Observers report the starting state of every target once.
        if !initial.is_empty() {
            let entries: Vec<VisibilityEntry> = initial
                .into_iter()
                .map(|(node, is_intersecting)| VisibilityEntry {
                    element: Rc::new(self.element(node)),
                    is_intersecting,
                })
                .collect();
            (&mut *callback.borrow_mut())(&entries);
        }

        let page = Rc::downgrade(&self.state);
        Some(Subscription::new(move || {
            if let Some(state) = page.upgrade() {
                state.borrow_mut().watches.retain(|w| w.id != id);
            }
        }))
    }
}

/// A handle to one node of a [`MemoryPage`].
#[derive(Clone)]
pub struct MemoryElement {
    page: Rc<RefCell<PageState>>,
    node: usize,
}

impl std::fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.page.borrow();
        let node = &state.nodes[self.node];
        f.debug_struct("MemoryElement")
            .field("tag", &node.tag)
            .field("attributes", &node.attributes)
            .finish()
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.page, &other.page) && self.node == other.node
    }
}

impl MemoryElement {
    /// Assigns the layout box the controllers read through `offset_top`/`offset_height`.
    pub fn set_layout(&self, top: f64, height: f64) {
        let mut state = self.page.borrow_mut();
        state.nodes[self.node].top = top;
        state.nodes[self.node].height = height;
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.page.borrow().nodes[self.node]
            .styles
            .get(property)
            .cloned()
    }

    pub fn classes(&self) -> Vec<String> {
        self.page.borrow().nodes[self.node]
            .classes()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn tag(&self) -> String {
        self.page.borrow().nodes[self.node].tag.clone()
    }

    pub fn parent(&self) -> Option<MemoryElement> {
        let parent = self.page.borrow().nodes[self.node].parent;
        parent.map(|node| MemoryElement {
            page: self.page.clone(),
            node,
        })
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        let children = self.page.borrow().nodes[self.node].children.clone();
        children
            .into_iter()
            .map(|node| MemoryElement {
                page: self.page.clone(),
                node,
            })
            .collect()
    }

    pub fn is_connected(&self) -> bool {
        let state = self.page.borrow();
        self.node == ROOT || state.ancestors(self.node).any(|a| a == ROOT)
    }
}

impl Element for MemoryElement {
    fn add_class(&self, class: &str) {
        let mut state = self.page.borrow_mut();
        let node = &mut state.nodes[self.node];
        let mut classes = node.classes();
        if !classes.contains(&class) {
            classes.push(class);
            let classes: Vec<String> = classes.into_iter().map(str::to_string).collect();
            let refs: Vec<&str> = classes.iter().map(String::as_str).collect();
            node.set_classes(&refs);
        }
    }

    fn remove_class(&self, class: &str) {
        let mut state = self.page.borrow_mut();
        let node = &mut state.nodes[self.node];
        let remaining: Vec<String> = node
            .classes()
            .into_iter()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        let refs: Vec<&str> = remaining.iter().map(String::as_str).collect();
        node.set_classes(&refs);
    }

    fn toggle_class(&self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.page.borrow().nodes[self.node].classes().contains(&class)
    }

    fn set_class_name(&self, name: &str) {
        self.set_attribute("class", name);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.page.borrow().nodes[self.node]
            .attributes
            .get(name)
            .cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.page.borrow_mut().nodes[self.node]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut state = self.page.borrow_mut();
        let styles = &mut state.nodes[self.node].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn text(&self) -> String {
        self.page.borrow().nodes[self.node].text.clone()
    }

    fn set_text(&self, text: &str) {
        self.page.borrow_mut().nodes[self.node].text = text.to_string();
    }

    fn offset_top(&self) -> f64 {
        self.page.borrow().nodes[self.node].top
    }

    fn offset_height(&self) -> f64 {
        self.page.borrow().nodes[self.node].height
    }

    fn append_child(&self, child: &dyn Element) {
        match child.as_any().downcast_ref::<MemoryElement>() {
            Some(child) if Rc::ptr_eq(&child.page, &self.page) => {
                self.page.borrow_mut().attach(self.node, child.node);
            }
            _ => log::warn!("append_child called with an element from another page"),
        }
    }

    fn remove(&self) {
        self.page.borrow_mut().detach(self.node);
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Subscription {
        MemoryPage {
            state: self.page.clone(),
        }
        .add_listener(Target::Node(self.node), event, handler)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, AttrOp)>,
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != node.tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if node.attributes.get("id") != Some(id) {
                return false;
            }
        }
        let classes = node.classes();
        if !self.classes.iter().all(|c| classes.contains(&c.as_str())) {
            return false;
        }
        self.attributes.iter().all(|(name, op)| {
            match (node.attributes.get(name), op) {
                (None, _) => false,
                (Some(_), AttrOp::Exists) => true,
                (Some(v), AttrOp::Equals(expected)) => v == expected,
                (Some(v), AttrOp::Prefix(prefix)) => v.starts_with(prefix.as_str()),
            }
        })
    }
}

/// Splits on `separator` outside of `[...]` and quotes.
fn split_top_level(input: &str, separator: impl Fn(char) -> bool) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.checked_sub(1)?,
            (None, c) if depth == 0 && separator(c) => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if depth != 0 || quote.is_some() {
        return None;
    }
    parts.push(&input[start..]);
    Some(parts)
}

fn parse_selector_list(selector: &str) -> Option<Vec<Vec<Compound>>> {
    split_top_level(selector, |c| c == ',')?
        .into_iter()
        .map(|complex| {
            let compounds: Option<Vec<Compound>> = split_top_level(complex.trim(), char::is_whitespace)?
                .into_iter()
                .filter(|part| !part.is_empty())
                .map(parse_compound)
                .collect();
            compounds.filter(|c| !c.is_empty())
        })
        .collect()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(input: &str) -> Option<(&str, &str)> {
    let end = input
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(input.len());
    let ident = &input[..end];
    match ident.chars().next() {
        Some(first) if !first.is_ascii_digit() => Some((ident, &input[end..])),
        _ => None,
    }
}

fn parse_compound(input: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = input;

    if rest.starts_with('*') {
        compound.tag = Some("*".to_string());
        rest = &rest[1..];
    } else if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let (tag, tail) = take_ident(rest)?;
        compound.tag = Some(tag.to_ascii_lowercase());
        rest = tail;
    }

    while let Some(first) = rest.chars().next() {
        match first {
            '#' => {
                let (id, tail) = take_ident(&rest[1..])?;
                compound.id = Some(id.to_string());
                rest = tail;
            }
            '.' => {
                let (class, tail) = take_ident(&rest[1..])?;
                compound.classes.push(class.to_string());
                rest = tail;
            }
            '[' => {
                let close = rest.find(']')?;
                compound.attributes.push(parse_attribute(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attribute(inner: &str) -> Option<(String, AttrOp)> {
    let unquote = |v: &str| {
        let v = v.trim();
        let quoted = v.len() >= 2
            && ((v.starts_with('"') && v.ends_with('"')) || (v.starts_with('\'') && v.ends_with('\'')));
        if quoted {
            v[1..v.len() - 1].to_string()
        } else {
            v.to_string()
        }
    };
    if let Some((name, value)) = inner.split_once("^=") {
        return Some((name.trim().to_string(), AttrOp::Prefix(unquote(value))));
    }
    if let Some((name, value)) = inner.split_once('=') {
        return Some((name.trim().to_string(), AttrOp::Equals(unquote(value))));
    }
    let name = inner.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), AttrOp::Exists))
}
