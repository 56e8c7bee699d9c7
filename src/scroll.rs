use crate::config::InteractionConfig;

pub const SCROLL_TOP_ID: &str = "scrollTop";
pub const NAVBAR_SELECTOR: &str = ".navbar";
pub const HERO_CONTENT_SELECTOR: &str = ".hero-content";
pub const FADE_IN_SELECTOR: &str = ".fade-in-element";
pub const VISIBLE_CLASS: &str = "visible";
pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollClasses {
    pub scroll_top_visible: bool,
    pub navbar_scrolled: bool,
}

pub fn scroll_classes(offset: f64, config: &InteractionConfig) -> ScrollClasses {
    ScrollClasses {
        scroll_top_visible: offset > config.scroll_top_threshold,
        navbar_scrolled: offset > config.navbar_scrolled_threshold,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParallaxStyle {
    pub translate_y: f64,
    pub opacity: f64,
}

impl ParallaxStyle {
    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.translate_y)
    }

    pub fn opacity_value(&self) -> String {
        self.opacity.to_string()
    }
}

/// `None` once the hero has scrolled out of view; the last applied style is
/// left in place.
pub fn parallax_style(
    offset: f64,
    viewport_height: f64,
    config: &InteractionConfig,
) -> Option<ParallaxStyle> {
    if offset >= viewport_height {
        return None;
    }

    Some(ParallaxStyle {
        translate_y: offset * config.parallax_factor,
        opacity: (1.0 - offset / config.parallax_fade_distance).max(0.0),
    })
}

/// At most one animation frame in flight; scroll events arriving in between
/// are dropped.
#[derive(Debug, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn complete(&mut self) {
        self.pending = false;
    }
}

pub fn should_fade_in(element_top: f64, viewport_height: f64, config: &InteractionConfig) -> bool {
    element_top < viewport_height - config.fade_in_offset
}
