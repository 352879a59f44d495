use crate::config::{NavigationConfig, SmoothScrollConfig};
use crate::controllers::navigation::close_mobile_menu;
use crate::platform::{DomEvent, ElementRef, Platform, ScrollBehavior, Subscription};

/// Eases same-page anchor jumps so the target clears the fixed nav bar.
pub struct SmoothScroll {
    _clicks: Vec<Subscription>,
}

impl SmoothScroll {
    pub fn init(platform: &Platform, config: &SmoothScrollConfig, nav: &NavigationConfig) -> Self {
        let links = platform.document.query_selector_all(&config.link_selector);
        log::debug!("Smooth scrolling {} in-page links", links.len());

        let clicks = links
            .into_iter()
            .map(|link| {
                let platform = platform.clone();
                let gap = config.header_gap;
                let nav = nav.clone();
                let anchor = link.clone();
                link.listen(
                    "click",
                    Box::new(move |event: &DomEvent| {
                        let Some(target) = resolve_target(&platform, anchor.attribute("href")) else {
                            return;
                        };
                        event.prevent_default();

                        let nav_height = platform
                            .document
                            .element_by_id(&nav.nav_id)
                            .map(|el| el.offset_height())
                            .unwrap_or(0.0);
                        let top = target.offset_top() - nav_height - gap;
                        platform.scroll.scroll_to(top, ScrollBehavior::Smooth);

                        close_mobile_menu(&platform, &nav);
                    }),
                )
            })
            .collect();

        Self { _clicks: clicks }
    }
}

/// The element a same-page `href` points at, if it exists.
fn resolve_target(platform: &Platform, href: Option<String>) -> Option<ElementRef> {
    let href = href?;
    if href == "#" || !href.starts_with('#') {
        return None;
    }
    platform.document.query_selector(&href)
}
