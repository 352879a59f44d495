use std::cell::RefCell;
use std::rc::Rc;

use crate::config::TabsConfig;
use crate::platform::{DomEvent, ElementRef, Platform, ScheduledTask, Subscription};

/// Single-selection category tabs with a staggered card fade.
///
/// The category is carried through to [`CategoryTabs::refresh_cards`] but does
/// not filter anything yet: the cards only replay their entrance animation.
pub struct CategoryTabs {
    state: Rc<TabsState>,
    _clicks: Vec<Subscription>,
}

struct TabsState {
    platform: Platform,
    config: TabsConfig,
    tabs: Vec<ElementRef>,
    stagger: RefCell<Vec<ScheduledTask>>,
}

impl CategoryTabs {
    pub fn init(platform: &Platform, config: &TabsConfig) -> Self {
        let tabs = platform.document.query_selector_all(&config.tab_selector);
        let state = Rc::new(TabsState {
            platform: platform.clone(),
            config: config.clone(),
            tabs,
            stagger: RefCell::new(Vec::new()),
        });

        let clicks = state
            .tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| {
                let state = Rc::downgrade(&state);
                tab.listen(
                    "click",
                    Box::new(move |_: &DomEvent| {
                        if let Some(state) = state.upgrade() {
                            state.select(index);
                        }
                    }),
                )
            })
            .collect();
        log::debug!("Category tabs ready with {} tabs", state.tabs.len());

        Self {
            state,
            _clicks: clicks,
        }
    }

    pub fn tab_count(&self) -> usize {
        self.state.tabs.len()
    }

    /// Same effect as clicking the tab at `index`. Out-of-range indexes do nothing.
    pub fn select(&self, index: usize) {
        self.state.select(index);
    }

    pub fn refresh_cards(&self, category: Option<&str>) {
        self.state.refresh_cards(category);
    }
}

impl TabsState {
    fn select(&self, index: usize) {
        let Some(selected) = self.tabs.get(index) else {
            return;
        };
        let class = &self.config.active_class;
        for tab in &self.tabs {
            tab.remove_class(class);
        }
        selected.add_class(class);

        let category = selected.attribute(&self.config.category_attribute);
        self.refresh_cards(category.as_deref());
    }

    fn refresh_cards(&self, category: Option<&str>) {
        log::debug!("Refreshing cards for category {:?}", category);

        // A new refresh supersedes whatever the previous one still had queued.
        let mut stagger = self.stagger.borrow_mut();
        stagger.clear();

        let config = &self.config;
        let cards = self.platform.document.query_selector_all(&config.card_selector);
        for (index, card) in cards.into_iter().enumerate() {
            card.set_style("opacity", "0");
            card.set_style("transform", &config.hidden_transform);

            let transition = config.card_transition.clone();
            let shown = config.shown_transform.clone();
            let delay = config.stagger_ms.saturating_mul(index as u32);
            stagger.push(self.platform.scheduler.schedule(
                delay,
                Box::new(move || {
                    card.set_style("transition", &transition);
                    card.set_style("opacity", "1");
                    card.set_style("transform", &shown);
                }),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::{MemoryElement, MemoryPage};
    use crate::platform::Element;

    fn tabs_page() -> (MemoryPage, Vec<MemoryElement>, Vec<MemoryElement>) {
        let page = MemoryPage::new();
        let body = page.body_element();
        let bar = page.add(&body, "div", &[("class", "category-tabs")]);
        let tabs = ["all", "ai", "fintech"]
            .iter()
            .map(|c| page.add(&bar, "button", &[("class", "category-tab"), ("data-category", *c)]))
            .collect::<Vec<_>>();
        tabs[0].add_class("active");
        let cards = (0..3)
            .map(|_| page.add(&body, "article", &[("class", "news-card")]))
            .collect();
        (page, tabs, cards)
    }

    fn active(tabs: &[MemoryElement]) -> Vec<usize> {
        tabs.iter()
            .enumerate()
            .filter(|(_, t)| t.has_class("active"))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_click_selects_exactly_one() {
        let (page, tabs, _) = tabs_page();
        let _tabs = CategoryTabs::init(&page.platform(), &TabsConfig::default());

        page.click(&tabs[2]);
        assert_eq!(active(&tabs), vec![2]);
        page.click(&tabs[1]);
        assert_eq!(active(&tabs), vec![1]);
        page.click(&tabs[1]);
        assert_eq!(active(&tabs), vec![1]);
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let (page, tabs, cards) = tabs_page();
        let controller = CategoryTabs::init(&page.platform(), &TabsConfig::default());
        assert_eq!(controller.tab_count(), 3);
        controller.select(7);
        assert_eq!(active(&tabs), vec![0]);
        assert_eq!(cards[0].style("opacity"), None);
    }

    #[test]
    fn test_cards_fade_in_staggered() {
        let (page, tabs, cards) = tabs_page();
        let _tabs = CategoryTabs::init(&page.platform(), &TabsConfig::default());

        page.click(&tabs[1]);
        for card in &cards {
            assert_eq!(card.style("opacity").as_deref(), Some("0"));
            assert_eq!(card.style("transform").as_deref(), Some("translateY(10px)"));
            assert_eq!(card.style("transition"), None);
        }

        page.advance(0);
        assert_eq!(cards[0].style("opacity").as_deref(), Some("1"));
        assert_eq!(cards[1].style("opacity").as_deref(), Some("0"));

        page.advance(100);
        assert_eq!(cards[1].style("opacity").as_deref(), Some("1"));
        assert_eq!(cards[2].style("opacity").as_deref(), Some("0"));

        page.advance(100);
        for card in &cards {
            assert_eq!(card.style("opacity").as_deref(), Some("1"));
            assert_eq!(card.style("transform").as_deref(), Some("translateY(0)"));
            assert_eq!(
                card.style("transition").as_deref(),
                Some("opacity 0.3s ease, transform 0.3s ease")
            );
        }
        assert_eq!(page.pending_tasks(), 0);
    }

    #[test]
    fn test_new_selection_restarts_stagger() {
        let (page, tabs, cards) = tabs_page();
        let _tabs = CategoryTabs::init(&page.platform(), &TabsConfig::default());

        page.click(&tabs[1]);
        page.advance(150);
        page.click(&tabs[2]);
        assert_eq!(page.pending_tasks(), 3);
        assert_eq!(cards[2].style("opacity").as_deref(), Some("0"));

        page.advance(50);
        assert_eq!(cards[2].style("opacity").as_deref(), Some("0"));
        page.advance(150);
        assert_eq!(cards[2].style("opacity").as_deref(), Some("1"));
    }

    #[test]
    fn test_no_cards_is_harmless() {
        let page = MemoryPage::new();
        let tab = page.add(&page.body_element(), "button", &[("class", "category-tab")]);
        let _tabs = CategoryTabs::init(&page.platform(), &TabsConfig::default());
        page.click(&tab);
        assert!(tab.has_class("active"));
        assert_eq!(page.pending_tasks(), 0);
    }
}
