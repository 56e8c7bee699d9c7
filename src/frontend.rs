use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    window, Document, Element, Event, HtmlElement, HtmlImageElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::active_link::{active_flags, current_page_from_href};
use crate::clipboard::{copy_to_clipboard, BrowserClipboard, COPY_ATTRIBUTE};
use crate::config::{InteractionConfig, CONFIG_ELEMENT_ID};
use crate::counter::{run_counter, CounterAnimation};
use crate::extras::{
    anchor_target, is_touch_handset, needs_font_fix, next_cursor_opacity, ANCHOR_SELECTOR,
    CURSOR_SELECTOR, CV_DOWNLOAD_MESSAGE, CV_DOWNLOAD_SELECTOR, FORM_CONTROL_SELECTOR,
    HIDDEN_CLASS, PRELOADER_SELECTOR, SITE_NAME,
};
use crate::lazy_image::{LazyImageLoader, DEFERRED_SOURCE_ATTRIBUTE, LAZY_IMAGE_SELECTOR};
use crate::logging::{log_event, LogLevel};
use crate::menu::{
    MenuEvent, MenuState, ACTIVE_CLASS, MENU_TOGGLE_ID, NAV_LINK_SELECTOR, NAV_MENU_ID,
};
use crate::notification::{
    show_notification, ToastPhase, ToastSurface, NOTIFICATION_CLASS, NOTIFICATION_SHOW_CLASS,
};
use crate::reveal::{
    run_skill_bar, RevealAction, RevealKind, RevealTracker, OBSERVED_SELECTOR,
    OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD, REVEALED_CLASS, SKILL_PROGRESS_SELECTOR,
};
use crate::scroll::{
    parallax_style, scroll_classes, should_fade_in, FrameGate, FADE_IN_SELECTOR,
    HERO_CONTENT_SELECTOR, NAVBAR_SELECTOR, SCROLLED_CLASS, SCROLL_TOP_ID, VISIBLE_CLASS,
};
use crate::timeline::{schedule_repeating, BrowserScheduler, Scheduler};
use crate::tooltip::{
    place_above, Rect, TooltipHandle, Tooltips, TOOLTIP_ATTRIBUTE, TOOLTIP_CLASS,
};

type SharedConfig = Rc<InteractionConfig>;

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn scroll_offset(win: &Window) -> f64 {
    win.scroll_y().unwrap_or(0.0)
}

fn viewport_size(win: &Window) -> (f64, f64) {
    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

/// Runs `init` now if the document has finished parsing, otherwise on
/// `DOMContentLoaded`.
fn on_dom_ready(document: &Document, init: impl FnOnce() + 'static) {
    if document.ready_state() == "loading" {
        EventListener::once(document, "DOMContentLoaded", move |_| init()).forget();
    } else {
        init();
    }
}

fn on_window_load(win: &Window, document: &Document, init: impl FnOnce() + 'static) {
    if document.ready_state() == "complete" {
        init();
    } else {
        EventListener::once(win, "load", move |_| init()).forget();
    }
}

fn load_config(document: &Document) -> InteractionConfig {
    let raw = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .unwrap_or_default();

    match InteractionConfig::from_json(&raw) {
        Ok(config) => config,
        Err(error) => {
            let config = InteractionConfig::default();
            log_event(
                config.log_level,
                LogLevel::Warn,
                "config_invalid",
                json!({ "error": error.to_string() }),
            );
            config
        }
    }
}

// Interns elements so pure state can key on a plain index. Lookups scan
// linearly, which is fine for the few dozen observed elements on a page.
#[derive(Default)]
struct ElementKeys {
    elements: Vec<Element>,
}

impl ElementKeys {
    fn key_for(&mut self, element: &Element) -> usize {
        if let Some(index) = self.find(element) {
            return index;
        }
        self.elements.push(element.clone());
        self.elements.len() - 1
    }

    fn find(&self, element: &Element) -> Option<usize> {
        self.elements.iter().position(|known| known == element)
    }
}

fn init_menu(win: &Window, document: &Document, config: &SharedConfig) {
    let (Some(toggle), Some(panel)) = (
        document.get_element_by_id(MENU_TOGGLE_ID),
        document.get_element_by_id(NAV_MENU_ID),
    ) else {
        return;
    };

    let initially_open = panel.class_list().contains(ACTIVE_CLASS);
    let state = Rc::new(RefCell::new(MenuState::with_open(initially_open)));
    let breakpoint = config.mobile_breakpoint;
    let apply: Rc<dyn Fn(MenuEvent)> = {
        let toggle = toggle.clone();
        let panel = panel.clone();
        Rc::new(move |event: MenuEvent| {
            let transition = state.borrow_mut().apply(event, breakpoint);
            if transition.changed {
                set_class(&panel, ACTIVE_CLASS, transition.open);
                set_class(&toggle, ACTIVE_CLASS, transition.open);
            }
        })
    };

    {
        let apply = apply.clone();
        EventListener::new(&toggle, "click", move |_| apply(MenuEvent::ToggleClicked)).forget();
    }

    if let Ok(links) = panel.query_selector_all(NAV_LINK_SELECTOR) {
        for link in (0..links.length()).filter_map(|index| links.item(index)) {
            let apply = apply.clone();
            EventListener::new(&link, "click", move |_| apply(MenuEvent::LinkClicked)).forget();
        }
    }

    {
        let apply = apply.clone();
        EventListener::new(document, "click", move |event: &Event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Node>().ok());
            let inside = panel.contains(target.as_ref()) || toggle.contains(target.as_ref());
            if !inside {
                apply(MenuEvent::OutsideClicked);
            }
        })
        .forget();
    }

    let resize_window = win.clone();
    EventListener::new(win, "resize", move |_| {
        let (width, _) = viewport_size(&resize_window);
        apply(MenuEvent::Resized { width });
    })
    .forget();
}

fn init_scroll_top(win: &Window, document: &Document, config: &SharedConfig) {
    let Some(button) = document.get_element_by_id(SCROLL_TOP_ID) else {
        return;
    };

    {
        let scroll_window = win.clone();
        let document = document.clone();
        let config = config.clone();
        let button = button.clone();
        EventListener::new(win, "scroll", move |_| {
            let classes = scroll_classes(scroll_offset(&scroll_window), &config);
            set_class(&button, VISIBLE_CLASS, classes.scroll_top_visible);

            if let Ok(Some(navbar)) = document.query_selector(NAVBAR_SELECTOR) {
                set_class(&navbar, SCROLLED_CLASS, classes.navbar_scrolled);
            }
        })
        .forget();
    }

    let click_window = win.clone();
    EventListener::new(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        click_window.scroll_to_with_scroll_to_options(&options);
    })
    .forget();
}

fn update_parallax(win: &Window, document: &Document, config: &InteractionConfig) {
    let Some(hero) = query_html(document, HERO_CONTENT_SELECTOR) else {
        return;
    };
    let (_, viewport_height) = viewport_size(win);

    if let Some(style) = parallax_style(scroll_offset(win), viewport_height, config) {
        let _ = hero.style().set_property("transform", &style.transform());
        let _ = hero.style().set_property("opacity", &style.opacity_value());
    }
}

fn init_parallax(win: &Window, document: &Document, config: &SharedConfig) {
    let gate = Rc::new(RefCell::new(FrameGate::default()));
    let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));
    let scroll_window = win.clone();
    let document = document.clone();
    let config = config.clone();

    EventListener::new(win, "scroll", move |_| {
        if !gate.borrow_mut().request() {
            return;
        }

        let gate = gate.clone();
        let win = scroll_window.clone();
        let document = document.clone();
        let config = config.clone();
        let handle = request_animation_frame(move |_timestamp| {
            update_parallax(&win, &document, &config);
            gate.borrow_mut().complete();
        });
        frame.borrow_mut().replace(handle);
    })
    .forget();
}

fn fade_in_on_scroll(win: &Window, document: &Document, config: &InteractionConfig) {
    let (_, viewport_height) = viewport_size(win);

    for element in query_all(document, FADE_IN_SELECTOR) {
        let top = element.get_bounding_client_rect().top();
        if should_fade_in(top, viewport_height, config) {
            let _ = element.class_list().add_1(VISIBLE_CLASS);
        }
    }
}

fn init_fade_in(win: &Window, document: &Document, config: &SharedConfig) {
    {
        let scroll_window = win.clone();
        let document = document.clone();
        let config = config.clone();
        EventListener::new(win, "scroll", move |_| {
            fade_in_on_scroll(&scroll_window, &document, &config);
        })
        .forget();
    }

    let load_window = win.clone();
    let load_document = document.clone();
    let config = config.clone();
    on_window_load(win, document, move || {
        fade_in_on_scroll(&load_window, &load_document, &config);
    });
}

fn init_preloader(win: &Window, document: &Document, config: &SharedConfig) {
    let lookup = document.clone();
    let delay_ms = config.preloader_delay_ms;

    on_window_load(win, document, move || {
        let Ok(Some(preloader)) = lookup.query_selector(PRELOADER_SELECTOR) else {
            return;
        };
        BrowserScheduler.schedule(
            delay_ms,
            Box::new(move || {
                let _ = preloader.class_list().add_1(HIDDEN_CLASS);
            }),
        );
    });
}

fn init_cursor_blink(document: &Document, config: &SharedConfig) {
    let Some(cursor) = query_html(document, CURSOR_SELECTOR) else {
        return;
    };

    schedule_repeating(&BrowserScheduler, config.cursor_blink_ms, move || {
        let style = cursor.style();
        let current = style.get_property_value("opacity").unwrap_or_default();
        let _ = style.set_property("opacity", next_cursor_opacity(&current));
        true
    });
}

fn init_anchor_scroll(document: &Document) {
    for anchor in query_all(document, ANCHOR_SELECTOR) {
        let document = document.clone();
        let link = anchor.clone();
        EventListener::new(&anchor, "click", move |event: &Event| {
            let href = link.get_attribute("href");
            let Some(selector) = anchor_target(href.as_deref()) else {
                return;
            };
            event.prevent_default();

            // Invalid selectors such as "#1-intro" throw; treat them as missing.
            if let Ok(Some(target)) = document.query_selector(selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })
        .forget();
    }
}

fn init_touch_font_fix(win: &Window, document: &Document, config: &SharedConfig) {
    let user_agent = win.navigator().user_agent().unwrap_or_default();
    if !is_touch_handset(&user_agent) {
        return;
    }

    let min_px = config.min_input_font_px;
    for control in query_all(document, FORM_CONTROL_SELECTOR) {
        let computed = win
            .get_computed_style(&control)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("font-size").ok())
            .unwrap_or_default();

        if needs_font_fix(&computed, min_px) {
            if let Some(control) = control.dyn_ref::<HtmlElement>() {
                let _ = control
                    .style()
                    .set_property("font-size", &format!("{min_px}px"));
            }
        }
    }
}

fn init_cv_download(win: &Window, document: &Document) {
    for trigger in query_all(document, CV_DOWNLOAD_SELECTOR) {
        let win = win.clone();
        EventListener::new(&trigger, "click", move |event: &Event| {
            event.prevent_default();
            let _ = win.alert_with_message(CV_DOWNLOAD_MESSAGE);
        })
        .forget();
    }
}

fn animate_revealed(
    target: &Element,
    bar: Option<&HtmlElement>,
    action: RevealAction,
    config: &InteractionConfig,
) {
    match action {
        RevealAction::MarkRevealed => {
            let _ = target.class_list().add_1(REVEALED_CLASS);
        }
        RevealAction::AnimateCounter(counter) => {
            let target = target.clone();
            run_counter(
                &BrowserScheduler,
                config.counter_step_ms,
                CounterAnimation::new(counter, config.counter_duration_ms, config.counter_step_ms),
                move |frame| target.set_text_content(Some(frame)),
            );
        }
        RevealAction::AnimateSkillBar => {
            let Some(bar) = bar.cloned() else {
                return;
            };
            let width = bar.style().get_property_value("width").unwrap_or_default();
            run_skill_bar(
                &BrowserScheduler,
                config.skill_bar_delay_ms,
                width,
                move |value| {
                    let _ = bar.style().set_property("width", value);
                },
            );
        }
    }
}

fn init_reveal_observer(document: &Document, config: &SharedConfig) {
    let tracker = Rc::new(RefCell::new(RevealTracker::<usize>::default()));
    let keys = Rc::new(RefCell::new(ElementKeys::default()));
    let log_level = config.log_level;
    let config = config.clone();

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                let class_name = target.class_name();
                let kind = RevealKind::from_class_list(class_name.split_whitespace());

                let bar = if kind.skill_item {
                    target
                        .query_selector(SKILL_PROGRESS_SELECTOR)
                        .ok()
                        .flatten()
                        .and_then(|bar| bar.dyn_into::<HtmlElement>().ok())
                } else {
                    None
                };
                let text = if kind.stat_counter {
                    target.text_content().unwrap_or_default()
                } else {
                    String::new()
                };

                let counter = kind
                    .stat_counter
                    .then(|| (keys.borrow_mut().key_for(&target), text.as_str()));
                let bar_key = bar.as_ref().map(|bar| keys.borrow_mut().key_for(bar));

                let actions = tracker.borrow_mut().on_intersect(counter, bar_key);
                for action in actions {
                    animate_revealed(&target, bar.as_ref(), action, &config);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
    options.set_root_margin(OBSERVER_ROOT_MARGIN);

    let Ok(observer) =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
    else {
        log_event(
            log_level,
            LogLevel::Warn,
            "observer_unavailable",
            json!({ "feature": "reveal" }),
        );
        return;
    };
    callback.forget();

    for element in query_all(document, OBSERVED_SELECTOR) {
        observer.observe(&element);
    }
}

fn set_active_nav_link(win: &Window, document: &Document) {
    let href = win.location().href().unwrap_or_default();
    let page = current_page_from_href(&href);
    let links = query_all(document, NAV_LINK_SELECTOR);
    let hrefs: Vec<Option<String>> = links
        .iter()
        .map(|link| link.get_attribute("href"))
        .collect();
    let flags = active_flags(hrefs.iter().map(Option::as_deref), &page);

    for (link, active) in links.iter().zip(flags) {
        let _ = link.class_list().remove_1(ACTIVE_CLASS);
        if active {
            let _ = link.class_list().add_1(ACTIVE_CLASS);
        }
    }
}

fn show_tooltip(
    document: &Document,
    trigger: &Element,
    tooltips: &RefCell<Tooltips<Element>>,
    gap: f64,
) -> Option<TooltipHandle> {
    let text = trigger.get_attribute(TOOLTIP_ATTRIBUTE)?;
    let body = document.body()?;
    let node = document.create_element("div").ok()?;
    node.set_class_name(TOOLTIP_CLASS);
    node.set_text_content(Some(&text));
    body.append_child(&node).ok()?;

    if let Some(tooltip) = node.dyn_ref::<HtmlElement>() {
        let rect = trigger.get_bounding_client_rect();
        let placement = place_above(
            Rect {
                top: rect.top(),
                left: rect.left(),
                width: rect.width(),
                height: rect.height(),
            },
            f64::from(tooltip.offset_width()),
            f64::from(tooltip.offset_height()),
            gap,
        );
        let _ = tooltip
            .style()
            .set_property("top", &format!("{}px", placement.top));
        let _ = tooltip
            .style()
            .set_property("left", &format!("{}px", placement.left));
    }

    Some(tooltips.borrow_mut().show(node))
}

fn hide_tooltip(tooltips: &RefCell<Tooltips<Element>>, handle: TooltipHandle) {
    if let Some(node) = tooltips.borrow_mut().hide(handle) {
        node.remove();
    }
}

fn init_tooltips(document: &Document, config: &SharedConfig) {
    let tooltips = Rc::new(RefCell::new(Tooltips::<Element>::default()));
    let selector = format!("[{TOOLTIP_ATTRIBUTE}]");

    for trigger in query_all(document, &selector) {
        let owned: Rc<RefCell<Option<TooltipHandle>>> = Rc::new(RefCell::new(None));

        {
            let document = document.clone();
            let tooltips = tooltips.clone();
            let owned = owned.clone();
            let element = trigger.clone();
            let gap = config.tooltip_gap;
            EventListener::new(&trigger, "mouseenter", move |_| {
                if let Some(previous) = owned.borrow_mut().take() {
                    hide_tooltip(&tooltips, previous);
                }
                *owned.borrow_mut() = show_tooltip(&document, &element, &tooltips, gap);
            })
            .forget();
        }

        let tooltips = tooltips.clone();
        EventListener::new(&trigger, "mouseleave", move |_| {
            if let Some(handle) = owned.borrow_mut().take() {
                hide_tooltip(&tooltips, handle);
            }
        })
        .forget();
    }
}

fn init_lazy_images(document: &Document, config: &SharedConfig) {
    let images = query_all(document, LAZY_IMAGE_SELECTOR);
    if images.is_empty() {
        return;
    }

    let loader = Rc::new(RefCell::new(LazyImageLoader::<usize>::default()));
    let keys = Rc::new(RefCell::new(ElementKeys::default()));
    let log_level = config.log_level;

    {
        let mut loader = loader.borrow_mut();
        let mut keys = keys.borrow_mut();
        for image in &images {
            if let Some(source) = image.get_attribute(DEFERRED_SOURCE_ATTRIBUTE) {
                loader.register(keys.key_for(image), source);
            }
        }
    }

    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(key) = keys.borrow().find(&target) else {
                    continue;
                };
                let Some(source) = loader
                    .borrow_mut()
                    .on_intersect(&key, entry.is_intersecting())
                else {
                    continue;
                };

                match target.dyn_ref::<HtmlImageElement>() {
                    Some(image) => image.set_src(&source),
                    None => {
                        let _ = target.set_attribute("src", &source);
                    }
                }
                let _ = target.remove_attribute(DEFERRED_SOURCE_ATTRIBUTE);
                observer.unobserve(&target);

                log_event(
                    log_level,
                    LogLevel::Debug,
                    "lazy_image_loaded",
                    json!({ "src": source, "remaining": loader.borrow().pending() }),
                );
            }
        },
    );

    let Ok(observer) = IntersectionObserver::new(callback.as_ref().unchecked_ref()) else {
        log_event(
            log_level,
            LogLevel::Warn,
            "observer_unavailable",
            json!({ "feature": "lazy_images" }),
        );
        return;
    };
    callback.forget();

    for image in &images {
        observer.observe(image);
    }
}

struct BrowserToastSurface {
    document: Document,
}

impl ToastSurface for BrowserToastSurface {
    type Node = Element;

    fn mount(&self, message: &str) -> Option<Element> {
        let body = self.document.body()?;
        let node = self.document.create_element("div").ok()?;
        node.set_class_name(NOTIFICATION_CLASS);
        node.set_text_content(Some(message));
        body.append_child(&node).ok()?;
        Some(node)
    }

    fn set_shown(&self, node: &Element, shown: bool) {
        set_class(node, NOTIFICATION_SHOW_CLASS, shown);
    }

    fn unmount(&self, node: &Element) {
        node.remove();
    }
}

fn init_copy_buttons(win: &Window, document: &Document, config: &SharedConfig) {
    let surface = Rc::new(BrowserToastSurface {
        document: document.clone(),
    });
    let selector = format!("[{COPY_ATTRIBUTE}]");

    for button in query_all(document, &selector) {
        let win = win.clone();
        let surface = surface.clone();
        let config = config.clone();
        let source = button.clone();
        EventListener::new(&button, "click", move |_| {
            let Some(text) = source.get_attribute(COPY_ATTRIBUTE) else {
                return;
            };
            let clipboard = BrowserClipboard::from_window(&win);
            let surface = surface.clone();
            let config = config.clone();

            spawn_local(async move {
                // Failures are logged inside; the user gets no feedback.
                let _ = copy_to_clipboard(&clipboard, &text, config.log_level, |message| {
                    let ticket =
                        show_notification(&surface, &BrowserScheduler, config.toast, message);
                    if ticket.phase() == ToastPhase::Idle {
                        log_event(
                            config.log_level,
                            LogLevel::Warn,
                            "toast_unavailable",
                            json!({ "message": message }),
                        );
                    }
                })
                .await;
            });
        })
        .forget();
    }
}

pub fn run() {
    let Some(win) = window() else {
        log_event(
            LogLevel::Info,
            LogLevel::Error,
            "window_unavailable",
            json!({}),
        );
        return;
    };
    let Some(document) = win.document() else {
        log_event(
            LogLevel::Info,
            LogLevel::Error,
            "document_unavailable",
            json!({}),
        );
        return;
    };
    let config: SharedConfig = Rc::new(load_config(&document));

    init_menu(&win, &document, &config);
    init_scroll_top(&win, &document, &config);
    init_parallax(&win, &document, &config);
    init_cursor_blink(&document, &config);
    init_anchor_scroll(&document);
    init_preloader(&win, &document, &config);
    init_fade_in(&win, &document, &config);
    init_touch_font_fix(&win, &document, &config);
    init_cv_download(&win, &document);

    {
        let win = win.clone();
        let ready_document = document.clone();
        let config = config.clone();
        on_dom_ready(&document, move || {
            init_reveal_observer(&ready_document, &config);
            set_active_nav_link(&win, &ready_document);
            init_tooltips(&ready_document, &config);
            init_lazy_images(&ready_document, &config);
            init_copy_buttons(&win, &ready_document, &config);
        });
    }

    log_event(
        config.log_level,
        LogLevel::Info,
        "interactions_ready",
        json!({ "site": SITE_NAME }),
    );
}
