pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const PRELOADER_SELECTOR: &str = ".preloader";
pub const HIDDEN_CLASS: &str = "hidden";
pub const CURSOR_SELECTOR: &str = ".cursor";
pub const FORM_CONTROL_SELECTOR: &str = "input, textarea, select";
pub const CV_DOWNLOAD_SELECTOR: &str = "[data-cv-download]";
pub const CV_DOWNLOAD_MESSAGE: &str = "¡Gracias por tu interés! Esta funcionalidad \
     descargará el CV en formato PDF.\n\nPróximamente disponible.";
pub const SITE_NAME: &str = "Sitio web de Julián David Góngora";

const TOUCH_HANDSET_MARKERS: [&str; 3] = ["iphone", "ipad", "ipod"];

/// Selector for an in-page anchor's target; bare `#` links have none.
pub fn anchor_target(href: Option<&str>) -> Option<&str> {
    match href {
        Some("#") | Some("") | None => None,
        Some(href) => Some(href),
    }
}

pub fn next_cursor_opacity(current: &str) -> &'static str {
    if current == "0" {
        "1"
    } else {
        "0"
    }
}

pub fn is_touch_handset(user_agent: &str) -> bool {
    let user_agent = user_agent.to_ascii_lowercase();
    TOUCH_HANDSET_MARKERS
        .iter()
        .any(|marker| user_agent.contains(*marker))
}

pub fn parse_css_px(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let end = value
        .char_indices()
        .find(|(index, c)| {
            !(c.is_ascii_digit() || *c == '.' || (*index == 0 && (*c == '-' || *c == '+')))
        })
        .map(|(index, _)| index)
        .unwrap_or(value.len());

    value[..end].parse::<f64>().ok()
}

pub fn needs_font_fix(computed_font_size: &str, min_px: f64) -> bool {
    parse_css_px(computed_font_size).is_some_and(|size| size < min_px)
}
