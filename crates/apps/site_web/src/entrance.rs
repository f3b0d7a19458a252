//! Hero entrance animation: the text slides in from the left, the globe
//! column scales up, both fading in.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::console;
use crate::dom;

/// Cubic ease-out.
pub fn ease_power3_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Inline style values for one animated element.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntranceStyle {
    pub translate_x_px: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl EntranceStyle {
    pub const REST: EntranceStyle = EntranceStyle {
        translate_x_px: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    pub fn transform_css(&self) -> String {
        format!(
            "translateX({:.3}px) scale({:.4})",
            self.translate_x_px, self.scale
        )
    }
}

/// An element animated from `from` to its resting style.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EntranceTrack {
    pub selector: &'static str,
    pub from: EntranceStyle,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl EntranceTrack {
    /// Style at `elapsed_s` seconds after start; `None` once finished.
    pub fn sample(&self, elapsed_s: f64) -> Option<EntranceStyle> {
        let local = elapsed_s - self.delay_s;
        if local >= self.duration_s {
            return None;
        }
        let k = if local <= 0.0 {
            0.0
        } else {
            ease_power3_out(local / self.duration_s)
        };
        let lerp = |a: f64, b: f64| a + (b - a) * k;
        Some(EntranceStyle {
            translate_x_px: lerp(self.from.translate_x_px, EntranceStyle::REST.translate_x_px),
            scale: lerp(self.from.scale, EntranceStyle::REST.scale),
            opacity: lerp(self.from.opacity, EntranceStyle::REST.opacity),
        })
    }
}

pub const HERO_TRACKS: [EntranceTrack; 2] = [
    EntranceTrack {
        selector: ".hero-text-side",
        from: EntranceStyle {
            translate_x_px: -40.0,
            scale: 1.0,
            opacity: 0.0,
        },
        duration_s: 1.2,
        delay_s: 0.2,
    },
    EntranceTrack {
        selector: ".hero-visual-side",
        from: EntranceStyle {
            translate_x_px: 0.0,
            scale: 0.92,
            opacity: 0.0,
        },
        duration_s: 1.5,
        delay_s: 0.5,
    },
];

fn apply(el: &HtmlElement, style: EntranceStyle) {
    let css = el.style();
    let _ = css.set_property("transform", &style.transform_css());
    let _ = css.set_property("opacity", &format!("{:.4}", style.opacity));
}

fn clear(el: &HtmlElement) {
    let css = el.style();
    let _ = css.remove_property("transform");
    let _ = css.remove_property("opacity");
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

pub fn init_entrance() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;

    let mut targets: Vec<(EntranceTrack, HtmlElement)> = HERO_TRACKS
        .iter()
        .filter_map(|track| dom::query(&document, track.selector).map(|el| (*track, el)))
        .collect();
    if targets.is_empty() {
        return Ok(());
    }
    for (track, el) in &targets {
        apply(el, track.from);
    }

    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let win = window.clone();
    let mut start_ms: Option<f64> = None;

    *callback.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        let start = *start_ms.get_or_insert(now_ms);
        let elapsed_s = (now_ms - start) / 1000.0;

        targets.retain(|(track, el)| match track.sample(elapsed_s) {
            Some(style) => {
                apply(el, style);
                true
            }
            None => {
                clear(el);
                false
            }
        });

        if targets.is_empty() {
            // The closure cannot drop itself; it just stops rescheduling.
            return;
        }
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(err) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                console::warn(&format!("entrance animation stopped: {}", console::describe(&err)));
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{EntranceStyle, HERO_TRACKS, ease_power3_out};

    #[test]
    fn easing_endpoints_and_shape() {
        assert_eq!(ease_power3_out(0.0), 0.0);
        assert_eq!(ease_power3_out(1.0), 1.0);
        assert!((ease_power3_out(0.5) - 0.875).abs() < 1e-12);
        assert_eq!(ease_power3_out(2.0), 1.0);
    }

    #[test]
    fn text_holds_start_pose_during_delay() {
        let text = HERO_TRACKS[0];
        assert_eq!(text.sample(0.0), Some(text.from));
        assert_eq!(text.sample(0.1), Some(text.from));
    }

    #[test]
    fn text_slides_in_and_finishes() {
        let text = HERO_TRACKS[0];
        let mid = text.sample(0.2 + 0.6).expect("running");
        assert!((mid.translate_x_px - (-40.0 * 0.125)).abs() < 1e-9);
        assert!((mid.opacity - 0.875).abs() < 1e-9);
        assert_eq!(mid.scale, 1.0);
        assert_eq!(text.sample(1.5), None);
    }

    #[test]
    fn visual_scales_up() {
        let visual = HERO_TRACKS[1];
        let s = visual.sample(0.5 + 0.75).expect("running");
        assert!(s.scale > 0.92 && s.scale < 1.0);
        assert_eq!(s.translate_x_px, 0.0);
        assert_eq!(visual.sample(2.0), None);
    }

    #[test]
    fn transform_css_format() {
        assert_eq!(
            EntranceStyle::REST.transform_css(),
            "translateX(0.000px) scale(1.0000)"
        );
    }
}
