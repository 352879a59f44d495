//! Markup contract and tuning knobs for every controller.
//!
//! The defaults match the landing page markup. A page can override any field
//! with a JSON blob in `<script type="application/json" id="landing-config">`.

use serde::{Deserialize, Serialize};

use crate::error::LandingError;

pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub tabs: TabsConfig,
    pub smooth_scroll: SmoothScrollConfig,
    pub zoom: ZoomConfig,
    pub parallax: ParallaxConfig,
    /// Category tabs are defined but not part of the default startup.
    pub enable_category_tabs: bool,
    pub enable_parallax: bool,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationConfig::default(),
            reveal: RevealConfig::default(),
            tabs: TabsConfig::default(),
            smooth_scroll: SmoothScrollConfig::default(),
            zoom: ZoomConfig::default(),
            parallax: ParallaxConfig::default(),
            enable_category_tabs: false,
            enable_parallax: false,
        }
    }
}

impl LandingConfig {
    pub fn from_json(json: &str) -> Result<Self, LandingError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub nav_id: String,
    pub toggle_id: String,
    pub links_selector: String,
    pub scrolled_class: String,
    pub active_class: String,
    /// Offsets strictly above this mark the nav as scrolled.
    pub scroll_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            nav_id: "nav".to_string(),
            toggle_id: "mobile-toggle".to_string(),
            links_selector: ".nav__links".to_string(),
            scrolled_class: "scrolled".to_string(),
            active_class: "active".to_string(),
            scroll_threshold: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub visible_class: String,
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".fade-in, .slide-in-left, .slide-in-right".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.1,
            root_margin: "0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsConfig {
    pub tab_selector: String,
    pub card_selector: String,
    pub active_class: String,
    pub category_attribute: String,
    pub stagger_ms: u32,
    pub card_transition: String,
    pub hidden_transform: String,
    pub shown_transform: String,
}

impl Default for TabsConfig {
    fn default() -> Self {
        Self {
            tab_selector: ".category-tab".to_string(),
            card_selector: ".news-card".to_string(),
            active_class: "active".to_string(),
            category_attribute: "data-category".to_string(),
            stagger_ms: 100,
            card_transition: "opacity 0.3s ease, transform 0.3s ease".to_string(),
            hidden_transform: "translateY(10px)".to_string(),
            shown_transform: "translateY(0)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    pub link_selector: String,
    /// Extra space left between the nav bar and the scrolled-to section.
    pub header_gap: f64,
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            link_selector: "a[href^=\"#\"]".to_string(),
            header_gap: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub preview_selector: String,
    pub modal_class: String,
    pub close_class: String,
    pub content_class: String,
    pub active_class: String,
    pub close_label: String,
    pub default_alt: String,
    /// Matches the modal's CSS close transition.
    pub clear_delay_ms: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            preview_selector: ".preview__phone".to_string(),
            modal_class: "screenshot-modal".to_string(),
            close_class: "screenshot-modal__close".to_string(),
            content_class: "screenshot-modal__content".to_string(),
            active_class: "active".to_string(),
            close_label: "Close zoom".to_string(),
            default_alt: "Zoomed Screenshot".to_string(),
            clear_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub hero_selector: String,
    pub logo_selector: String,
    pub factor: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            hero_selector: ".hero".to_string(),
            logo_selector: ".hero__logo".to_string(),
            factor: 0.4,
        }
    }
}

/// Reads overrides from the page, falling back to defaults.
#[cfg(target_arch = "wasm32")]
pub fn load_from_page(document: &web_sys::Document) -> LandingConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return LandingConfig::default();
    };
    LandingConfig::from_json(&text).unwrap_or_else(|e| {
        log::warn!("Ignoring landing config: {}", e);
        LandingConfig::default()
    })
}
