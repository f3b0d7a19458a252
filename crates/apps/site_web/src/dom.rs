//! The page elements the globe writes to.
//!
//! Every lookup is optional: a missing tooltip or modal only disables that
//! piece of behaviour.

use catalog::ModalContent;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

use crate::config::ElementIds;
use crate::globe_controller::Cursor;
use crate::interaction::TooltipView;

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("window missing"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("document missing"))
}

pub fn element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub(crate) fn set_style(el: &HtmlElement, name: &str, value: &str) {
    // Style writes only fail for read-only declarations.
    let _ = el.style().set_property(name, value);
}

#[derive(Debug, Clone)]
pub struct TooltipSurface {
    root: HtmlElement,
    country: Option<HtmlElement>,
    desc: Option<HtmlElement>,
}

impl TooltipSurface {
    pub fn lookup(document: &Document, ids: &ElementIds) -> Option<Self> {
        Some(Self {
            root: element_by_id(document, &ids.tooltip)?,
            country: element_by_id(document, &ids.tooltip_country),
            desc: element_by_id(document, &ids.tooltip_desc),
        })
    }

    pub fn show(&self, view: &TooltipView) {
        match view {
            TooltipView::Hidden => self.hide(),
            TooltipView::Shown {
                left_px,
                top_px,
                title,
                body_html,
            } => {
                set_style(&self.root, "display", "block");
                set_style(&self.root, "left", &format!("{left_px}px"));
                set_style(&self.root, "top", &format!("{top_px}px"));
                if let Some(el) = &self.country {
                    el.set_inner_text(title);
                }
                if let Some(el) = &self.desc {
                    el.set_inner_html(body_html);
                }
            }
        }
    }

    pub fn hide(&self) {
        set_style(&self.root, "display", "none");
    }
}

#[derive(Debug, Clone)]
pub struct ModalSurface {
    root: HtmlElement,
    name: Option<HtmlElement>,
    services: Option<HtmlElement>,
    routing: Option<HtmlElement>,
    transit: Option<HtmlElement>,
}

impl ModalSurface {
    pub fn lookup(document: &Document, ids: &ElementIds) -> Option<Self> {
        Some(Self {
            root: element_by_id(document, &ids.modal)?,
            name: element_by_id(document, &ids.modal_name),
            services: element_by_id(document, &ids.modal_services),
            routing: element_by_id(document, &ids.modal_routing),
            transit: element_by_id(document, &ids.modal_transit),
        })
    }

    pub fn open(&self, content: &ModalContent) {
        for (el, text) in [
            (&self.name, &content.name),
            (&self.services, &content.services),
            (&self.routing, &content.routing),
            (&self.transit, &content.transit),
        ] {
            if let Some(el) = el {
                el.set_inner_text(text);
            }
        }
        set_style(&self.root, "display", "block");
    }
}

/// Everything the globe touches on the page besides its own canvas.
#[derive(Debug, Clone)]
pub struct GlobeSurfaces {
    pub container: HtmlElement,
    pub tooltip: Option<TooltipSurface>,
    pub modal: Option<ModalSurface>,
}

impl GlobeSurfaces {
    /// `None` when the container is absent, which disables the globe.
    pub fn lookup(document: &Document, ids: &ElementIds) -> Option<Self> {
        Some(Self {
            container: element_by_id(document, &ids.container)?,
            tooltip: TooltipSurface::lookup(document, ids),
            modal: ModalSurface::lookup(document, ids),
        })
    }

    pub fn set_cursor(&self, cursor: Cursor) {
        set_style(&self.container, "cursor", cursor.css());
    }

    pub fn show_tooltip(&self, view: &TooltipView) {
        if let Some(tooltip) = &self.tooltip {
            tooltip.show(view);
        }
    }

    pub fn open_modal(&self, content: &ModalContent) {
        if let Some(tooltip) = &self.tooltip {
            tooltip.hide();
        }
        if let Some(modal) = &self.modal {
            modal.open(content);
        }
    }

    /// Container size in CSS pixels.
    pub fn size(&self) -> (f64, f64) {
        (
            self.container.client_width() as f64,
            self.container.client_height() as f64,
        )
    }

    pub fn client_rect(&self) -> gpu::camera::ClientRect {
        let r = self.container.get_bounding_client_rect();
        gpu::camera::ClientRect {
            left: r.left(),
            top: r.top(),
            width: r.width(),
            height: r.height(),
        }
    }
}
