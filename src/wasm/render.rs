use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::RippleConfig;
use crate::error::{Error, Resource, Result};
use crate::field::WaveField;
use crate::paint::{render_frame, Painter};
use crate::wave::{Wave, WAVE_COUNT};

type SharedField = Rc<RefCell<WaveField<fastrand::Rng>>>;
type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A running ripple animation bound to one canvas.
///
/// Dropping the loop stops it.
pub struct RenderLoop {
    window: Window,
    field: SharedField,
    running: Rc<Cell<bool>>,
    frame_id: Rc<Cell<Option<i32>>>,
    // The tick closure holds a clone of this slot so it can reschedule
    // itself; `stop` empties the slot to break that cycle.
    tick: FrameSlot,
    on_resize: Option<Closure<dyn FnMut()>>,
}

impl RenderLoop {
    /// Sizes `canvas` to the viewport, generates the waves, hooks window
    /// resizes, and schedules the first frame.
    pub fn start(canvas: HtmlCanvasElement, config: RippleConfig) -> Result<Self> {
        let window = window().ok_or(Resource::Window)?;
        let mut ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(Resource::Context2d)?
            .dyn_into()
            .map_err(|_| Resource::Context2d)?;

        let (width, height) = viewport(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);
        let field = Rc::new(RefCell::new(WaveField::new(width, height, seeded_rng())));
        log::info!("water ripple on #{} at {width}x{height}: {config:?}", config.canvas_id);

        let on_resize = {
            let window = window.clone();
            let field = field.clone();
            Closure::wrap(Box::new(move || match viewport(&window) {
                Ok((w, h)) => {
                    canvas.set_width(w);
                    canvas.set_height(h);
                    field.borrow_mut().resize(w, h);
                    log::debug!("ripple field resized to {w}x{h}");
                }
                Err(e) => log::error!("ripple resize failed: {e}"),
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        let running = Rc::new(Cell::new(true));
        let frame_id = Rc::new(Cell::new(None));
        let tick: FrameSlot = Rc::new(RefCell::new(None));
        {
            let slot = tick.clone();
            let window = window.clone();
            let field = field.clone();
            let running = running.clone();
            let frame_id = frame_id.clone();
            *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                frame_id.set(None);
                if !running.get() {
                    return;
                }
                render_frame(&mut ctx, &*field.borrow(), &config, js_sys::Date::now())
                    .unwrap_or_else(|never| match never {});

                // schedule next
                match request_frame(&window, &slot) {
                    Ok(id) => frame_id.set(Some(id)),
                    Err(e) => {
                        log::error!("ripple loop halted: {e}");
                        running.set(false);
                    }
                }
            }) as Box<dyn FnMut()>));
        }

        let mut render_loop = Self {
            window,
            field,
            running,
            frame_id,
            tick,
            on_resize: Some(on_resize),
        };
        match request_frame(&render_loop.window, &render_loop.tick) {
            Ok(id) => render_loop.frame_id.set(Some(id)),
            Err(e) => {
                render_loop.stop();
                return Err(e);
            }
        }
        Ok(render_loop)
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Current surface size as last read from the viewport.
    pub fn dimensions(&self) -> (u32, u32) {
        let field = self.field.borrow();
        (field.width(), field.height())
    }

    pub fn wave_count(&self) -> usize {
        self.field.borrow().waves().len()
    }

    /// Snapshot of the waves currently being drawn.
    pub fn waves(&self) -> [Wave; WAVE_COUNT] {
        *self.field.borrow().waves()
    }

    /// Cancels the pending frame and removes the resize listener. Safe to
    /// call more than once.
    pub fn stop(&mut self) {
        let was_running = self.running.replace(false);
        if let Some(id) = self.frame_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancel_animation_frame failed: {}", Error::from(e));
            }
        }
        if let Some(on_resize) = self.on_resize.take() {
            if let Err(e) = self
                .window
                .remove_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            {
                log::warn!("resize listener not removed: {}", Error::from(e));
            }
        }
        self.tick.borrow_mut().take();
        if was_running {
            log::info!("water ripple stopped");
        }
    }
}

impl Drop for RenderLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Painter for CanvasRenderingContext2d {
    type Error = Infallible;

    fn fill_rect(&mut self, style: &str, width: f64, height: f64) -> std::result::Result<(), Infallible> {
        self.set_fill_style_str(style);
        CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_polyline<I>(&mut self, points: I, style: &str, line_width: f64) -> std::result::Result<(), Infallible>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut points = points.into_iter();
        let Some((x0, y0)) = points.next() else {
            return Ok(());
        };
        self.set_stroke_style_str(style);
        self.set_line_width(line_width);
        self.begin_path();
        self.move_to(x0, y0);
        for (x, y) in points {
            self.line_to(x, y);
        }
        self.stroke();
        Ok(())
    }
}

fn viewport(window: &Window) -> Result<(u32, u32)> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width as u32, height as u32))
}

fn request_frame(window: &Window, slot: &FrameSlot) -> Result<i32> {
    let slot = slot.borrow();
    let tick = slot
        .as_ref()
        .ok_or_else(|| Error::Js("animation frame callback released".into()))?;
    Ok(window.request_animation_frame(tick.as_ref().unchecked_ref())?)
}

/// `fastrand`'s global generator has no entropy source on
/// `wasm32-unknown-unknown`, so seed from the page.
fn seeded_rng() -> fastrand::Rng {
    fastrand::Rng::with_seed(js_sys::Math::random().to_bits() ^ js_sys::Date::now().to_bits())
}
