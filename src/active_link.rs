use url::Url;

pub const DEFAULT_PAGE: &str = "index.html";

/// Last path segment, falling back to `index.html` for directory paths.
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => DEFAULT_PAGE,
    }
}

pub fn current_page_from_href(href: &str) -> String {
    Url::parse(href)
        .map(|url| current_page(url.path()).to_string())
        .unwrap_or_else(|_| DEFAULT_PAGE.to_string())
}

pub fn active_flags<'a>(hrefs: impl IntoIterator<Item = Option<&'a str>>, page: &str) -> Vec<bool> {
    hrefs.into_iter().map(|href| href == Some(page)).collect()
}
