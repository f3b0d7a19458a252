//! Site navigation chrome: mobile menu toggle, active link and the
//! scrolled navbar.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlAnchorElement, Window};

use crate::console;
use crate::dom;

/// Navbar gets the `scrolled` class past this many pixels of scroll.
pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;

/// One flag per link: whether its resolved path is the current page.
pub fn active_link_flags<S: AsRef<str>>(link_paths: &[S], current_path: &str) -> Vec<bool> {
    link_paths
        .iter()
        .map(|p| p.as_ref() == current_path)
        .collect()
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD_PX
}

pub fn init_nav() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    wire_hamburger(&document)?;
    mark_active_links(&window, &document)?;
    wire_scroll(&window, &document)?;
    console::log("navigation initialized");
    Ok(())
}

fn wire_hamburger(document: &Document) -> Result<(), JsValue> {
    let Some(hamburger) = dom::query(document, ".hamburger") else {
        return Ok(());
    };
    let links = dom::query(document, ".nav-links");

    let target = hamburger.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        if let Some(links) = &links {
            let _ = links.class_list().toggle("nav-active");
        }
        let _ = target.class_list().toggle("toggle");
    });
    hamburger.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn mark_active_links(window: &Window, document: &Document) -> Result<(), JsValue> {
    let location = window.location();
    let current = location.pathname()?;
    let origin = location.origin()?;

    let nodes = document.query_selector_all(".nav-links a")?;
    let mut anchors = Vec::with_capacity(nodes.length() as usize);
    let mut paths = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(anchor) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<HtmlAnchorElement>().ok())
        else {
            continue;
        };
        let path = web_sys::Url::new_with_base(&anchor.href(), &origin)
            .map(|url| url.pathname())
            .unwrap_or_default();
        anchors.push(anchor);
        paths.push(path);
    }

    for (anchor, active) in anchors.iter().zip(active_link_flags(&paths, &current)) {
        let classes = anchor.class_list();
        classes.remove_1("active")?;
        if active {
            classes.add_1("active")?;
        }
    }
    Ok(())
}

fn wire_scroll(window: &Window, document: &Document) -> Result<(), JsValue> {
    let document = document.clone();
    let win = window.clone();
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        let Some(navbar) = dom::query(&document, ".navbar") else {
            return;
        };
        let scroll_y = win.scroll_y().unwrap_or(0.0);
        let _ = navbar
            .class_list()
            .toggle_with_force("scrolled", is_scrolled(scroll_y));
    });
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{active_link_flags, is_scrolled};

    const LINKS: [&str; 6] = [
        "/",
        "/about",
        "/services",
        "/destinations",
        "/tracking",
        "/contact",
    ];

    #[test]
    fn about_page_marks_only_about() {
        assert_eq!(
            active_link_flags(&LINKS, "/about"),
            vec![false, true, false, false, false, false]
        );
    }

    #[test]
    fn home_matches_root_only() {
        assert_eq!(
            active_link_flags(&LINKS, "/"),
            vec![true, false, false, false, false, false]
        );
    }

    #[test]
    fn unknown_page_marks_nothing() {
        assert!(active_link_flags(&LINKS, "/careers").iter().all(|f| !f));
        assert!(active_link_flags::<&str>(&[], "/").is_empty());
    }

    #[test]
    fn scrolled_past_fifty_pixels() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }
}
