use crate::config::RevealConfig;
use crate::platform::{Platform, Subscription, VisibilityEntry, VisibilityOptions};

/// Adds the visible class to animatable elements once they scroll into view.
///
/// Elements stay observed after they are revealed. Later notifications re-add
/// a class that is already there, so the reveal is permanent.
pub struct ScrollReveal {
    _watch: Option<Subscription>,
}

impl ScrollReveal {
    pub fn init(platform: &Platform, config: &RevealConfig) -> Self {
        let targets = platform.document.query_selector_all(&config.selector);
        if targets.is_empty() {
            log::debug!("No elements match {:?}, scroll reveal idle", config.selector);
            return Self { _watch: None };
        }

        let options = VisibilityOptions {
            threshold: config.threshold,
            root_margin: config.root_margin.clone(),
        };
        let class = config.visible_class.clone();
        let watch = platform.visibility.watch(
            &options,
            &targets,
            Box::new(move |entries: &[VisibilityEntry]| {
                for entry in entries.iter().filter(|e| e.is_intersecting) {
                    entry.element.add_class(&class);
                }
            }),
        );
        log::debug!("Watching {} animatable elements", targets.len());

        Self { _watch: watch }
    }
}
