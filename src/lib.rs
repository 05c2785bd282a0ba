//! Animated water-ripple background for a full-viewport `<canvas>`.
//!
//! The wave model ([`field`], [`wave`]) and the frame renderer ([`paint`]) are
//! plain Rust and build on any target. The browser binding lives in `wasm`,
//! which only compiles for `wasm32`.

pub mod config;
pub mod error;
pub mod field;
pub mod paint;
pub mod wave;

pub use config::RippleConfig;
pub use error::{Error, Resource, Result};
pub use field::WaveField;
pub use paint::{render_frame, Painter};
pub use wave::{RandomSource, Wave, WAVE_COUNT};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::{Cell, RefCell};

    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlCanvasElement, PageTransitionEvent, Window};

    use crate::config::RippleConfig;
    use crate::error::{Error, Resource, Result};

    mod render;

    pub use render::RenderLoop;

    thread_local! {
        static ACTIVE: RefCell<Option<RenderLoop>> = const { RefCell::new(None) };
        // canvas of the most recent launch, reused when a cached page is restored
        static LAST_CANVAS: RefCell<Option<String>> = const { RefCell::new(None) };
        static LIFECYCLE_HOOKED: Cell<bool> = const { Cell::new(false) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> std::result::Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        // failure leaves the page without a background
        if let Err(e) = launch(None) {
            log::error!("water ripple disabled: {e}");
        }
        Ok(())
    }

    /// Starts the background on `canvas_id` (or the configured id), stopping
    /// any loop that is already running.
    #[wasm_bindgen]
    pub fn start_ripples(canvas_id: Option<String>) -> std::result::Result<(), JsValue> {
        launch(canvas_id).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stops the active loop, if any, and removes its listeners.
    #[wasm_bindgen]
    pub fn stop_ripples() {
        let active = ACTIVE.with(|slot| slot.borrow_mut().take());
        if let Some(mut render_loop) = active {
            render_loop.stop();
        }
    }

    #[wasm_bindgen]
    pub fn ripples_running() -> bool {
        ACTIVE.with(|slot| slot.borrow().as_ref().is_some_and(RenderLoop::is_running))
    }

    fn launch(canvas_id: Option<String>) -> Result<()> {
        let window = web_sys::window().ok_or(Resource::Window)?;
        let document = window.document().ok_or(Resource::Document)?;

        let mut config = load_config(&document);
        if let Some(id) = canvas_id {
            config.canvas_id = id;
        }
        let canvas = find_canvas(&document, &config.canvas_id)?;

        hook_page_lifecycle(&window)?;
        stop_ripples();
        let canvas_id = config.canvas_id.clone();
        let render_loop = RenderLoop::start(canvas, config)?;
        ACTIVE.with(|slot| *slot.borrow_mut() = Some(render_loop));
        LAST_CANVAS.with(|last| *last.borrow_mut() = Some(canvas_id));
        Ok(())
    }

    pub fn find_canvas(document: &Document, id: &str) -> Result<HtmlCanvasElement> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| Resource::Canvas(id.into()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::from(Resource::NotACanvas(id.into())))
    }

    /// Reads `<body data-ripple='{...}'>`, falling back to defaults.
    pub fn load_config(document: &Document) -> RippleConfig {
        let Some(raw) = document.body().and_then(|body| body.get_attribute("data-ripple")) else {
            return RippleConfig::default();
        };
        RippleConfig::from_json(&raw).unwrap_or_else(|e| {
            log::warn!("{e}; using default ripple config");
            RippleConfig::default()
        })
    }

    /// Stops the loop when the page is really unloaded. A page entering the
    /// back/forward cache keeps its loop, and one restored from it without a
    /// running loop is relaunched on the last canvas.
    fn hook_page_lifecycle(window: &Window) -> Result<()> {
        if LIFECYCLE_HOOKED.with(Cell::get) {
            return Ok(());
        }

        let on_hide = Closure::wrap(Box::new(|event: PageTransitionEvent| {
            if !event.persisted() {
                stop_ripples();
            }
        }) as Box<dyn FnMut(PageTransitionEvent)>);
        let on_show = Closure::wrap(Box::new(|event: PageTransitionEvent| {
            if !event.persisted() || ripples_running() {
                return;
            }
            let canvas_id = LAST_CANVAS.with(|last| last.borrow().clone());
            if let Err(e) = launch(canvas_id) {
                log::error!("water ripple not restored: {e}");
            }
        }) as Box<dyn FnMut(PageTransitionEvent)>);

        window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
        if let Err(e) = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref()) {
            window.remove_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
            return Err(e.into());
        }
        on_hide.forget();
        on_show.forget();
        LIFECYCLE_HOOKED.with(|hooked| hooked.set(true));
        Ok(())
    }
}
