use crate::config::ParallaxConfig;
use crate::platform::{Platform, Subscription};

/// Drifts the hero logo at a fraction of the scroll speed while the hero is on screen.
pub struct Parallax {
    _scroll: Subscription,
}

impl Parallax {
    pub fn init(platform: &Platform, config: &ParallaxConfig) -> Option<Self> {
        let document = &platform.document;
        let (Some(hero), Some(logo)) = (
            document.query_selector(&config.hero_selector),
            document.query_selector(&config.logo_selector),
        ) else {
            log::debug!("Hero or logo missing, parallax disabled");
            return None;
        };

        let factor = config.factor;
        let source = platform.scroll.clone();
        let scroll = platform.scroll.on_scroll(Box::new(move || {
            let scrolled = source.scroll_y();
            if scrolled < hero.offset_height() {
                logo.set_style("transform", &format!("translateY({}px)", scrolled * factor));
            }
        }));

        Some(Self { _scroll: scroll })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryPage;

    #[test]
    fn test_logo_drifts_within_hero() {
        let page = MemoryPage::new();
        let hero = page.add(&page.body_element(), "header", &[("class", "hero")]);
        hero.set_layout(0.0, 800.0);
        let logo = page.add(&hero, "img", &[("class", "hero__logo")]);
        let _parallax = Parallax::init(&page.platform(), &ParallaxConfig::default()).unwrap();

        page.scroll(100.0);
        assert_eq!(logo.style("transform").as_deref(), Some("translateY(40px)"));
        page.scroll(0.0);
        assert_eq!(logo.style("transform").as_deref(), Some("translateY(0px)"));
        page.scroll(500.0);
        assert_eq!(logo.style("transform").as_deref(), Some("translateY(200px)"));

        // Past the hero the logo keeps its last position.
        page.scroll(900.0);
        assert_eq!(logo.style("transform").as_deref(), Some("translateY(200px)"));
    }

    #[test]
    fn test_missing_hero_disables_parallax() {
        let page = MemoryPage::new();
        page.add(&page.body_element(), "img", &[("class", "hero__logo")]);
        assert!(Parallax::init(&page.platform(), &ParallaxConfig::default()).is_none());
        assert_eq!(page.listener_count(), 0);
    }
}
