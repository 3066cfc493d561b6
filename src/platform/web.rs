//! Browser host: canvas 2D surface, texture palette and frame loop
//!
//! The page owns listener wiring. It constructs a `BallPit`, calls `start`,
//! and forwards pointer, resize and scroll events with coordinates already in
//! canvas space.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::renderer::{RadialGradient, Shadow, Stroke, Surface};
use crate::sim::TextureId;
use crate::{Bounds, DeviceClass, Error, SimConfig, Simulation};

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn js_error(what: &str, err: JsValue) -> Error {
    Error::Surface {
        message: format!("{what}: {err:?}"),
    }
}

/// An image that flips `loaded` when the browser finishes decoding it
struct TextureSlot {
    image: HtmlImageElement,
    loaded: Rc<Cell<bool>>,
}

impl TextureSlot {
    fn load(src: &str) -> crate::Result<Self> {
        let image = HtmlImageElement::new().map_err(|e| js_error("create image", e))?;
        let loaded = Rc::new(Cell::new(false));

        {
            let loaded = loaded.clone();
            let closure = Closure::<dyn FnMut()>::new(move || loaded.set(true));
            image.set_onload(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }
        {
            let src = src.to_string();
            let closure = Closure::<dyn FnMut()>::new(move || {
                log::warn!("Texture failed to load: {}", src);
            });
            image.set_onerror(Some(closure.as_ref().unchecked_ref()));
            closure.forget();
        }

        image.set_src(src);
        Ok(Self { image, loaded })
    }

    fn size(&self) -> Option<Vec2> {
        if !self.loaded.get() {
            return None;
        }
        let (w, h) = (self.image.natural_width(), self.image.natural_height());
        (w > 0 && h > 0).then(|| Vec2::new(w as f32, h as f32))
    }
}

/// `Surface` backed by a canvas 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    textures: Vec<TextureSlot>,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement, texture_sources: &[String]) -> crate::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| js_error("get 2d context", e))?
            .ok_or_else(|| Error::Surface {
                message: "canvas has no 2d context".to_string(),
            })?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::Surface {
                message: "2d context has the wrong type".to_string(),
            })?;

        let textures = texture_sources
            .iter()
            .map(|src| TextureSlot::load(src))
            .collect::<crate::Result<Vec<_>>>()?;
        log::info!("Loading {} textures", textures.len());

        Ok(Self { ctx, textures })
    }

    fn apply_shadow(&self, shadow: Option<&Shadow>) {
        if let Some(shadow) = shadow {
            self.ctx.set_shadow_color(&shadow.color.to_css());
            self.ctx.set_shadow_blur(shadow.blur as f64);
            self.ctx.set_shadow_offset_x(shadow.offset.x as f64);
            self.ctx.set_shadow_offset_y(shadow.offset.y as f64);
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32, start: f64, end: f64) -> bool {
        self.ctx.begin_path();
        match self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, start, end)
        {
            Ok(()) => true,
            Err(e) => {
                log::warn!("arc failed: {:?}", e);
                false
            }
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, bounds: Bounds) {
        self.ctx
            .clear_rect(0.0, 0.0, bounds.width as f64, bounds.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &RadialGradient, shadow: Option<&Shadow>) {
        let gradient = match self.ctx.create_radial_gradient(
            fill.inner_center.x as f64,
            fill.inner_center.y as f64,
            fill.inner_radius.max(0.0) as f64,
            fill.outer_center.x as f64,
            fill.outer_center.y as f64,
            fill.outer_radius.max(0.0) as f64,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::warn!("createRadialGradient failed: {:?}", e);
                return;
            }
        };
        for stop in &fill.stops {
            if let Err(e) = gradient.add_color_stop(stop.offset, &stop.color.to_css()) {
                log::warn!("addColorStop failed at {}: {:?}", stop.offset, e);
            }
        }

        self.ctx.save();
        if self.circle_path(center, radius, 0.0, TAU) {
            self.ctx.close_path();
            self.apply_shadow(shadow);
            self.ctx.set_fill_style_canvas_gradient(&gradient);
            self.ctx.fill();
        }
        self.ctx.restore();
    }

    fn stroke_arc(
        &mut self,
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        stroke: &Stroke,
        glow: Option<&Shadow>,
    ) {
        self.ctx.save();
        if self.circle_path(center, radius, start as f64, end as f64) {
            self.ctx.set_line_width(stroke.width as f64);
            self.ctx.set_stroke_style_str(&stroke.color.to_css());
            self.apply_shadow(glow);
            self.ctx.stroke();
        }
        self.ctx.restore();
    }

    fn texture_size(&self, texture: TextureId) -> Option<Vec2> {
        self.textures.get(texture.0 as usize)?.size()
    }

    fn draw_texture(
        &mut self,
        texture: TextureId,
        clip_center: Vec2,
        clip_radius: f32,
        dest_min: Vec2,
        dest_size: Vec2,
    ) {
        let Some(slot) = self.textures.get(texture.0 as usize) else {
            return;
        };
        self.ctx.save();
        if self.circle_path(clip_center, clip_radius, 0.0, TAU) {
            self.ctx.clip();
            if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &slot.image,
                dest_min.x as f64,
                dest_min.y as f64,
                dest_size.x as f64,
                dest_size.y as f64,
            ) {
                log::warn!("drawImage failed for texture {}: {:?}", texture.0, e);
            }
        }
        self.ctx.restore();
    }
}

struct Host {
    sim: Simulation,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    /// Pending requestAnimationFrame id
    frame_id: Option<i32>,
}

/// Ball pit bound to a canvas, driven by the page
#[wasm_bindgen]
pub struct BallPit {
    host: Rc<RefCell<Host>>,
}

#[wasm_bindgen]
impl BallPit {
    /// `textures` are image URLs; `target_count` defaults to the device
    /// class count; `config_json` overrides tuning fields.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        textures: Vec<String>,
        target_count: Option<u32>,
        config_json: Option<String>,
    ) -> Result<BallPit, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialised when a second pit is created
        let _ = console_log::init_with_level(log::Level::Info);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let config = match config_json {
            Some(json) => SimConfig::from_json(&json)?,
            None => {
                let width = window
                    .inner_width()
                    .ok()
                    .and_then(|w| w.as_f64())
                    .unwrap_or(canvas.width() as f64);
                SimConfig::for_device(DeviceClass::from_viewport_width(width as f32))
            }
        };
        let count = target_count
            .map(|n| n as usize)
            .unwrap_or_else(|| config.device.body_count());

        let now = now_ms();
        let bounds = Bounds::new(canvas.width() as f32, canvas.height() as f32);
        let surface = CanvasSurface::new(&canvas, &textures)?;
        let sim = Simulation::new(
            bounds,
            &textures,
            count,
            config,
            super::seed_from_time(js_sys::Date::now()),
            now,
        )?;

        Ok(BallPit {
            host: Rc::new(RefCell::new(Host {
                sim,
                surface,
                canvas,
                frame_id: None,
            })),
        })
    }

    /// Begin the animation loop
    pub fn start(&self) {
        if self.host.borrow().frame_id.is_some() {
            return;
        }
        log::info!("Ball pit running");
        request_frame(self.host.clone());
    }

    /// Match the canvas backing store to a new size
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        let mut host = self.host.borrow_mut();
        host.canvas.set_width(width);
        host.canvas.set_height(height);
        host.sim.resize(Bounds::new(width as f32, height as f32))?;
        Ok(())
    }

    /// Returns true when a ball was grabbed
    pub fn pointer_down(&self, x: f32, y: f32) -> bool {
        self.host.borrow_mut().sim.pointer_down(x, y).is_some()
    }

    pub fn pointer_move(&self, x: f32, y: f32) {
        self.host.borrow_mut().sim.pointer_move(x, y);
    }

    pub fn pointer_up(&self) {
        self.host.borrow_mut().sim.pointer_up();
    }

    pub fn pointer_cancel(&self) {
        self.host.borrow_mut().sim.pointer_cancel();
    }

    pub fn apply_floor_movement(&self, scroll_delta: f32) {
        self.host.borrow_mut().sim.apply_floor_movement(scroll_delta);
    }

    /// World state as JSON, for debugging from the console
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.host.borrow().sim.world())
            .map_err(|e| JsValue::from(Error::from(e)))
    }

    /// Cancel the pending frame and stop the loop
    pub fn destroy(&self) {
        let mut host = self.host.borrow_mut();
        host.sim.destroy();
        if let (Some(id), Some(window)) = (host.frame_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn request_frame(host: Rc<RefCell<Host>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let next = host.clone();
    let closure = Closure::once(move |time: f64| frame_loop(next, time));
    match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        Ok(id) => host.borrow_mut().frame_id = Some(id),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
    closure.forget();
}

fn frame_loop(host: Rc<RefCell<Host>>, time: f64) {
    {
        let mut guard = host.borrow_mut();
        guard.frame_id = None;
        if guard.sim.is_destroyed() {
            return;
        }
        let Host { sim, surface, .. } = &mut *guard;
        sim.frame(time, surface);
    }
    // Skipped frames still reschedule
    request_frame(host);
}
