//! The hero globe widget: owns the scene and animation state, wires the
//! container's pointer events and drives the render loop.

use std::cell::RefCell;
use std::rc::Rc;

use catalog::DestinationRegistry;
use foundation::math::Vec2;
use gpu::camera::Camera3D;
use gpu::renderer::Renderer;
use runtime::{Frame, WidgetState};
use scene::prefabs::{GlobeScene, TextureImage, TextureOutcome};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    AddEventListenerOptions, Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
    WheelEvent,
};

use crate::config::GlobeConfig;
use crate::console;
use crate::dom::{self, GlobeSurfaces};
use crate::globe_controller::{Cursor, PointerController, PointerKind, on_wheel};
use crate::interaction::{click_outcome, hover_outcome, pick_destination};
use crate::label_raster::rasterize_label;
use crate::texture::load_texture;
use crate::wgpu::{
    WgpuContext, init_wgpu_from_canvas, render_frame, resize_wgpu, upload_globe_texture,
    upload_labels, upload_world,
};

pub struct GlobeWidget {
    registry: DestinationRegistry,
    scene: GlobeScene,
    state: WidgetState,
    camera: Camera3D,
    controller: PointerController,
    surfaces: GlobeSurfaces,
    canvas: HtmlCanvasElement,
    gpu: Option<WgpuContext>,
    /// Texture that arrived before the renderer was ready.
    pending_texture: Option<TextureImage>,
    last_frame: Option<Frame>,
    render_error_logged: bool,
}

type SharedWidget = Rc<RefCell<GlobeWidget>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

thread_local! {
    static GLOBE: RefCell<Option<SharedWidget>> = const { RefCell::new(None) };
}

fn client_pos(x: i32, y: i32) -> [f64; 2] {
    [x as f64, y as f64]
}

/// Backing-store size for a CSS size at the given device pixel ratio.
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
    let px = |v: f64| (v * dpr).round().max(1.0) as u32;
    (px(css_width), px(css_height))
}

impl GlobeWidget {
    fn backing_size(&self) -> (u32, u32) {
        let (w, h) = self.surfaces.size();
        let dpr = dom::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        backing_size(w, h, dpr)
    }

    fn tick(&mut self, now_ms: f64) {
        let frame = Frame::from_millis(self.last_frame, now_ms);
        self.last_frame = Some(frame);

        self.state.dragging = self.controller.is_dragging();
        self.state = runtime::step(&self.state, frame.dt_s);
        self.scene.apply_state(&self.state);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        let render = Renderer::collect(&self.scene.world, &self.camera);
        match render_frame(gpu, &render, &self.camera) {
            Ok(()) => self.render_error_logged = false,
            Err(err) => {
                if !self.render_error_logged {
                    console::error(&format!("globe render failed: {}", console::describe(&err)));
                    self.render_error_logged = true;
                }
            }
        }
    }

    fn attach_gpu(&mut self, mut ctx: WgpuContext) {
        upload_world(&mut ctx, &self.scene.world);

        match dom::document().and_then(|doc| {
            self.scene
                .world
                .labels()
                .iter()
                .map(|label| rasterize_label(&doc, label))
                .collect::<Result<Vec<_>, _>>()
        }) {
            Ok(images) => {
                if let Err(err) = upload_labels(&mut ctx, &images) {
                    console::warn(&format!("labels not uploaded: {}", console::describe(&err)));
                }
            }
            Err(err) => console::warn(&format!("labels not drawn: {}", console::describe(&err))),
        }

        if let Some(image) = self.pending_texture.take() {
            if let Err(err) = upload_globe_texture(&mut ctx, &image) {
                console::warn(&format!("globe texture not uploaded: {}", console::describe(&err)));
            }
        }
        self.gpu = Some(ctx);
        console::log("globe renderer ready");
    }

    fn apply_texture(&mut self, outcome: TextureOutcome) {
        let Some(image) = self.scene.apply_texture_outcome(outcome) else {
            return;
        };
        match self.gpu.as_mut() {
            Some(ctx) => {
                if let Err(err) = upload_globe_texture(ctx, &image) {
                    console::warn(&format!("globe texture not uploaded: {}", console::describe(&err)));
                }
            }
            None => self.pending_texture = Some(image),
        }
    }

    fn resize(&mut self) {
        let (w, h) = self.surfaces.size();
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.camera.set_aspect(w, h);
        let (pw, ph) = self.backing_size();
        self.canvas.set_width(pw);
        self.canvas.set_height(ph);
        if let Some(gpu) = self.gpu.as_mut() {
            resize_wgpu(gpu, pw, ph);
        }
    }

    fn update_hover(&mut self, client: Vec2) {
        let rect = self.surfaces.client_rect();
        let hit = pick_destination(&self.scene.world, &self.camera, rect, client);
        let outcome = hover_outcome(
            &self.registry,
            hit,
            rect,
            client,
            self.controller.idle_cursor(),
        );
        self.scene.apply_hover(outcome.hovered);
        self.surfaces.show_tooltip(&outcome.tooltip);
        self.surfaces.set_cursor(outcome.cursor);
    }

    fn on_mouse_down(&mut self, event: MouseEvent) {
        let pos = client_pos(event.client_x(), event.client_y());
        if self.controller.on_pointer_down(pos, event.button()) {
            self.surfaces.set_cursor(Cursor::Grabbing);
        }
    }

    fn on_mouse_up(&mut self, _event: MouseEvent) {
        if self.controller.is_dragging() {
            self.controller.on_pointer_up();
            self.surfaces.set_cursor(Cursor::Grab);
        }
    }

    fn on_mouse_move(&mut self, event: MouseEvent) {
        let pos = client_pos(event.client_x(), event.client_y());
        self.controller
            .on_pointer_move(pos, PointerKind::Mouse, &mut self.state.rotation);
        self.update_hover(Vec2::new(pos[0], pos[1]));
    }

    fn on_click(&mut self, event: MouseEvent) {
        let pos = client_pos(event.client_x(), event.client_y());
        let is_click = self.controller.is_click(pos);
        let hit = if is_click {
            pick_destination(
                &self.scene.world,
                &self.camera,
                self.surfaces.client_rect(),
                Vec2::new(pos[0], pos[1]),
            )
        } else {
            None
        };
        if let Some(content) = click_outcome(&self.registry, hit, is_click) {
            self.surfaces.open_modal(&content);
        }
    }

    fn on_touch_start(&mut self, event: TouchEvent) {
        let touches = event.touches();
        let Some(touch) = touches.get(0) else {
            return;
        };
        self.controller
            .on_touch_start(client_pos(touch.client_x(), touch.client_y()), touches.length());
    }

    fn on_touch_move(&mut self, event: TouchEvent) {
        let touches = event.touches();
        let Some(touch) = touches.get(0) else {
            return;
        };
        let consumed = self.controller.on_touch_move(
            client_pos(touch.client_x(), touch.client_y()),
            touches.length(),
            &mut self.state.rotation,
        );
        if consumed && event.cancelable() {
            event.prevent_default();
        }
    }

    fn on_touch_end(&mut self, _event: TouchEvent) {
        self.controller.on_pointer_up();
    }

    fn on_wheel(&mut self, event: WheelEvent) {
        event.prevent_default();
        on_wheel(&mut self.camera, event.delta_y());
    }

    fn on_resize(&mut self, _event: Event) {
        self.resize();
    }
}

/// Registers `handler` for `kind` events on `target`, for the lifetime of
/// the page. `passive` is passed through when set.
fn listen<E>(
    target: &EventTarget,
    kind: &str,
    widget: &SharedWidget,
    passive: Option<bool>,
    handler: fn(&mut GlobeWidget, E),
) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
{
    let widget = widget.clone();
    let closure = Closure::<dyn FnMut(E)>::new(move |event: E| {
        if let Ok(mut w) = widget.try_borrow_mut() {
            handler(&mut w, event);
        }
    });
    match passive {
        Some(passive) => {
            let options = AddEventListenerOptions::new();
            options.set_passive(passive);
            target.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
        }
        None => {
            target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        }
    }
    closure.forget();
    Ok(())
}

fn wire_events(widget: &SharedWidget, wheel_zoom: bool) -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let container = widget.borrow().surfaces.container.clone();

    listen(&container, "mousedown", widget, None, GlobeWidget::on_mouse_down)?;
    listen(&container, "mousemove", widget, None, GlobeWidget::on_mouse_move)?;
    listen(&container, "click", widget, None, GlobeWidget::on_click)?;
    // Releasing outside the globe still ends the drag.
    listen(&document, "mouseup", widget, None, GlobeWidget::on_mouse_up)?;

    listen(&container, "touchstart", widget, Some(false), GlobeWidget::on_touch_start)?;
    listen(&container, "touchmove", widget, Some(false), GlobeWidget::on_touch_move)?;
    listen(&container, "touchend", widget, None, GlobeWidget::on_touch_end)?;

    if wheel_zoom {
        listen(&container, "wheel", widget, Some(false), GlobeWidget::on_wheel)?;
    }
    listen(&window, "resize", widget, None, GlobeWidget::on_resize)?;
    Ok(())
}

fn start_render_loop(widget: SharedWidget) -> Result<(), JsValue> {
    let window = dom::window()?;
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = callback.clone();
    let win = window.clone();

    *callback.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
        if let Ok(mut w) = widget.try_borrow_mut() {
            w.tick(now_ms);
        }
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(err) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                console::error(&format!("globe render loop stopped: {}", console::describe(&err)));
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    }
    Ok(())
}

/// Builds the hero globe inside the configured container. A page without
/// the container is left alone; a second call is a no-op.
pub fn init_globe(config: &GlobeConfig) -> Result<(), JsValue> {
    if GLOBE.with(|g| g.borrow().is_some()) {
        console::warn("globe already initialized");
        return Ok(());
    }

    let document = dom::document()?;
    let Some(surfaces) = GlobeSurfaces::lookup(&document, &config.ids) else {
        console::log(&format!(
            "no #{} on this page; globe disabled",
            config.ids.container
        ));
        return Ok(());
    };

    let registry = config
        .registry()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let scene = GlobeScene::assemble(&registry, &config.scene_options());

    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    dom::set_style(&canvas, "width", "100%");
    dom::set_style(&canvas, "height", "100%");
    dom::set_style(&canvas, "display", "block");
    surfaces.container.append_child(&canvas)?;

    let (css_w, css_h) = surfaces.size();
    let mut camera = Camera3D::hero(1.0);
    camera.set_aspect(css_w, css_h);
    surfaces.set_cursor(Cursor::Grab);

    let widget: SharedWidget = Rc::new(RefCell::new(GlobeWidget {
        state: WidgetState::new(scene.routes.len()),
        registry,
        scene,
        camera,
        controller: PointerController::new(),
        surfaces,
        canvas: canvas.clone(),
        gpu: None,
        pending_texture: None,
        last_frame: None,
        render_error_logged: false,
    }));
    let (backing_w, backing_h) = widget.borrow().backing_size();
    canvas.set_width(backing_w);
    canvas.set_height(backing_h);

    GLOBE.with(|g| *g.borrow_mut() = Some(widget.clone()));
    wire_events(&widget, config.wheel_zoom)?;

    {
        let widget = widget.clone();
        spawn_local(async move {
            match init_wgpu_from_canvas(&canvas, backing_w, backing_h).await {
                Ok(ctx) => widget.borrow_mut().attach_gpu(ctx),
                Err(err) => console::error(&format!(
                    "globe renderer unavailable: {}",
                    console::describe(&err)
                )),
            }
        });
    }

    {
        let widget = widget.clone();
        let url = config.texture_url.clone();
        spawn_local(async move {
            let outcome = load_texture(&url).await;
            if let TextureOutcome::Fallback { reason } = &outcome {
                console::error(&format!("Error loading texture: {reason}"));
            }
            widget.borrow_mut().apply_texture(outcome);
        });
    }

    start_render_loop(widget)?;
    console::log("globe initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::backing_size;

    #[test]
    fn backing_store_follows_device_pixel_ratio() {
        assert_eq!(backing_size(600.0, 400.0, 2.0), (1200, 800));
        assert_eq!(backing_size(600.5, 400.0, 1.0), (601, 400));
    }

    #[test]
    fn backing_store_is_never_empty() {
        assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
        assert_eq!(backing_size(300.0, 200.0, f64::NAN), (300, 200));
        assert_eq!(backing_size(300.0, 200.0, 0.0), (300, 200));
    }
}
