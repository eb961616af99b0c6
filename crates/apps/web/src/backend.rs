//! Canvas 2D drawing of a [`RenderFrame`].

use globe::ViewError;
use gpu::{RenderBackend, RenderCommand, RenderFrame, faces_camera, project, projected_radius};
use layers::css_rgba;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const SPHERE_FILL: &str = "rgba(12, 24, 48, 0.92)";
const SPHERE_RIM: &str = "rgba(120, 170, 255, 0.35)";
/// Dash pattern lengths are fractions of this many pixels.
const DASH_UNIT_PX: f64 = 40.0;

fn set_fill_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("fillStyle"),
        &JsValue::from_str(value),
    );
}

fn set_stroke_style(ctx: &CanvasRenderingContext2d, value: &str) {
    let _ = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str("strokeStyle"),
        &JsValue::from_str(value),
    );
}

pub struct Canvas2dBackend {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
    css_size: (f64, f64),
    disposed: bool,
}

impl Canvas2dBackend {
    pub fn new(canvas: HtmlCanvasElement, pixel_ratio: f64) -> Result<Self, ViewError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ViewError::Surface(format!("get_context: {e:?}")))?
            .ok_or_else(|| ViewError::Surface("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewError::Surface("context is not 2d".into()))?;
        Ok(Self {
            canvas,
            ctx,
            pixel_ratio: if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 },
            css_size: (0.0, 0.0),
            disposed: false,
        })
    }

    fn draw_sphere(&self, frame: &RenderFrame, radius: f64) -> Result<(), JsValue> {
        let (w, h) = self.css_size;
        let r = projected_radius(radius, &frame.camera, h);
        self.ctx.begin_path();
        self.ctx.arc(w * 0.5, h * 0.5, r, 0.0, std::f64::consts::TAU)?;
        set_fill_style(&self.ctx, SPHERE_FILL);
        self.ctx.fill();
        set_stroke_style(&self.ctx, SPHERE_RIM);
        self.ctx.set_line_width(1.0);
        self.ctx.stroke();
        Ok(())
    }

    fn draw_commands(&self, frame: &RenderFrame) -> Result<(), JsValue> {
        let (w, h) = self.css_size;
        let camera = &frame.camera;
        let focal = camera.focal_px(h);

        for command in &frame.commands {
            match command {
                RenderCommand::Sphere { radius, .. } => self.draw_sphere(frame, *radius)?,
                RenderCommand::Point {
                    position,
                    color,
                    radius,
                    ..
                } => {
                    if !faces_camera(*position, camera) {
                        continue;
                    }
                    let Some([x, y]) = project(*position, camera, w, h) else {
                        continue;
                    };
                    let depth = (camera.position.z - position.z).max(1e-6);
                    let r = (radius * focal / depth).max(1.0);
                    self.ctx.begin_path();
                    self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU)?;
                    set_fill_style(&self.ctx, &css_rgba(*color));
                    self.ctx.fill();
                }
                RenderCommand::Arc {
                    path,
                    color,
                    dash_length,
                    dash_gap,
                    dash_phase,
                    stroke,
                    ..
                } => {
                    let dash = f64::from(*dash_length) * DASH_UNIT_PX;
                    let gap = f64::from(*dash_gap) * DASH_UNIT_PX;
                    let pattern = js_sys::Array::of2(&dash.into(), &gap.into());
                    self.ctx.set_line_dash(&pattern)?;
                    self.ctx.set_line_dash_offset(-f64::from(*dash_phase) * (dash + gap));
                    set_stroke_style(&self.ctx, &css_rgba(*color));
                    self.ctx.set_line_width(f64::from(*stroke).max(0.5) * 2.0);
                    self.ctx.begin_path();
                    let mut pen_down = false;
                    for v in path {
                        let visible = faces_camera(*v, camera);
                        match (visible, project(*v, camera, w, h)) {
                            (true, Some([x, y])) if pen_down => self.ctx.line_to(x, y),
                            (true, Some([x, y])) => {
                                self.ctx.move_to(x, y);
                                pen_down = true;
                            }
                            _ => pen_down = false,
                        }
                    }
                    self.ctx.stroke();
                    self.ctx.set_line_dash(&js_sys::Array::new())?;
                }
            }
        }
        Ok(())
    }
}

impl RenderBackend for Canvas2dBackend {
    fn resize(&mut self, width: u32, height: u32) {
        if self.disposed {
            return;
        }
        self.css_size = (f64::from(width), f64::from(height));
        self.canvas
            .set_width((f64::from(width) * self.pixel_ratio).round() as u32);
        self.canvas
            .set_height((f64::from(height) * self.pixel_ratio).round() as u32);
        let _ = self
            .ctx
            .set_transform(self.pixel_ratio, 0.0, 0.0, self.pixel_ratio, 0.0, 0.0);
    }

    fn draw(&mut self, frame: &RenderFrame) {
        if self.disposed {
            return;
        }
        let (w, h) = self.css_size;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        if let Err(err) = self.draw_commands(frame) {
            tracing::warn!(?err, "canvas draw failed");
        }
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        // Shrinking the canvas frees its backing store.
        self.canvas.set_width(0);
        self.canvas.set_height(0);
    }
}
