pub mod navigation;
pub mod parallax;
pub mod reveal;
pub mod screenshot_zoom;
pub mod smooth_scroll;
pub mod tabs;
pub mod typing;

pub use navigation::Navigation;
pub use parallax::Parallax;
pub use reveal::ScrollReveal;
pub use screenshot_zoom::ScreenshotZoom;
pub use smooth_scroll::SmoothScroll;
pub use tabs::CategoryTabs;
pub use typing::TypingEffect;
