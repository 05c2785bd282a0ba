#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use water_ripple::wasm::{find_canvas, load_config, ripples_running, start_ripples, stop_ripples, RenderLoop};
use water_ripple::{Error, Resource, RippleConfig, WAVE_COUNT};
use web_sys::{Event, HtmlCanvasElement, PageTransitionEvent, PageTransitionEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn mount(tag: &str, id: &str) -> web_sys::Element {
    let elem = document().create_element(tag).unwrap();
    elem.set_id(id);
    document().body().unwrap().append_child(&elem).unwrap();
    elem
}

fn mount_canvas(id: &str) -> HtmlCanvasElement {
    mount("canvas", id).dyn_into().unwrap()
}

fn dispatch(event: &Event) {
    web_sys::window().unwrap().dispatch_event(event).unwrap();
}

fn dispatch_resize() {
    dispatch(&Event::new("resize").unwrap());
}

fn dispatch_page_transition(kind: &str, persisted: bool) {
    let init = PageTransitionEventInit::new();
    init.set_persisted(persisted);
    dispatch(&PageTransitionEvent::new_with_event_init_dict(kind, &init).unwrap());
}

fn shrink(canvas: &HtmlCanvasElement) {
    canvas.set_width(1);
    canvas.set_height(1);
}

fn set_body_config(json: Option<&str>) {
    let body = document().body().unwrap();
    match json {
        Some(json) => body.set_attribute("data-ripple", json).unwrap(),
        None => body.remove_attribute("data-ripple").unwrap(),
    }
}

fn viewport() -> (u32, u32) {
    let window = web_sys::window().unwrap();
    (
        window.inner_width().unwrap().as_f64().unwrap() as u32,
        window.inner_height().unwrap().as_f64().unwrap() as u32,
    )
}

#[wasm_bindgen_test]
fn missing_canvas_is_unavailable() {
    let err = find_canvas(&document(), "no-such-canvas").unwrap_err();
    assert!(
        matches!(err, Error::ResourceUnavailable(Resource::Canvas(ref id)) if id == "no-such-canvas"),
        "{err}"
    );
}

#[wasm_bindgen_test]
fn non_canvas_element_rejected() {
    mount("div", "ripple-div");
    let err = find_canvas(&document(), "ripple-div").unwrap_err();
    assert!(matches!(err, Error::ResourceUnavailable(Resource::NotACanvas(_))), "{err}");
}

#[wasm_bindgen_test]
fn start_sizes_canvas_to_viewport() {
    let canvas: HtmlCanvasElement = mount("canvas", "ripple-start").dyn_into().unwrap();
    let render_loop = RenderLoop::start(canvas.clone(), RippleConfig::default()).unwrap();

    let (width, height) = viewport();
    assert_eq!((canvas.width(), canvas.height()), (width, height));
    assert_eq!(render_loop.dimensions(), (width, height));
    assert_eq!(render_loop.wave_count(), WAVE_COUNT);
    assert!(render_loop.is_running());
}

#[wasm_bindgen_test]
fn stop_is_idempotent() {
    let canvas: HtmlCanvasElement = mount("canvas", "ripple-stop").dyn_into().unwrap();
    let mut render_loop = RenderLoop::start(canvas, RippleConfig::default()).unwrap();

    render_loop.stop();
    assert!(!render_loop.is_running());
    render_loop.stop();
    assert!(!render_loop.is_running());
}

#[wasm_bindgen_test]
fn resize_follows_viewport_with_fresh_waves() {
    let canvas = mount_canvas("ripple-resize");
    let render_loop = RenderLoop::start(canvas.clone(), RippleConfig::default()).unwrap();
    let before = render_loop.waves();

    shrink(&canvas);
    dispatch_resize();

    assert_eq!((canvas.width(), canvas.height()), viewport());
    assert_eq!(render_loop.dimensions(), viewport());
    assert_eq!(render_loop.wave_count(), WAVE_COUNT);
    assert!(before.iter().zip(render_loop.waves().iter()).all(|(old, new)| old != new));
}

#[wasm_bindgen_test]
fn stopped_loop_ignores_resize() {
    let canvas = mount_canvas("ripple-stopped-resize");
    let mut render_loop = RenderLoop::start(canvas.clone(), RippleConfig::default()).unwrap();
    render_loop.stop();
    let before = render_loop.waves();

    shrink(&canvas);
    dispatch_resize();

    assert_eq!((canvas.width(), canvas.height()), (1, 1));
    assert_eq!(render_loop.waves(), before);
}

#[wasm_bindgen_test]
fn restart_replaces_active_loop() {
    let first = mount_canvas("ripple-first");
    let second = mount_canvas("ripple-second");
    start_ripples(Some("ripple-first".into())).unwrap();
    start_ripples(Some("ripple-second".into())).unwrap();
    assert!(ripples_running());

    shrink(&first);
    shrink(&second);
    dispatch_resize();
    assert_eq!((first.width(), first.height()), (1, 1));
    assert_eq!((second.width(), second.height()), viewport());

    stop_ripples();
    assert!(!ripples_running());
    stop_ripples();
}

#[wasm_bindgen_test]
fn start_ripples_reports_missing_canvas() {
    let err = start_ripples(Some("ripple-nowhere".into())).unwrap_err();
    assert!(err.as_string().unwrap().contains("ripple-nowhere"), "{err:?}");
}

#[wasm_bindgen_test]
fn back_forward_cache_keeps_background() {
    mount_canvas("ripple-bfcache");
    start_ripples(Some("ripple-bfcache".into())).unwrap();

    dispatch_page_transition("pagehide", true);
    assert!(ripples_running());

    dispatch_page_transition("pagehide", false);
    assert!(!ripples_running());

    dispatch_page_transition("pageshow", true);
    assert!(ripples_running());

    stop_ripples();
}

#[wasm_bindgen_test]
fn body_config_is_read() {
    set_body_config(Some(r#"{"stroke_style": "white", "line_width": 3}"#));
    let config = load_config(&document());
    set_body_config(None);

    assert_eq!(config.stroke_style, "white");
    assert_eq!(config.line_width, 3.0);
    assert_eq!(config.canvas_id, RippleConfig::default().canvas_id);
}

#[wasm_bindgen_test]
fn malformed_body_config_falls_back() {
    set_body_config(Some("{not json"));
    let config = load_config(&document());
    set_body_config(None);

    assert_eq!(config, RippleConfig::default());
}

#[wasm_bindgen_test]
fn body_config_picks_canvas() {
    let canvas = mount_canvas("ripple-configured");
    shrink(&canvas);
    set_body_config(Some(r#"{"canvas_id": "ripple-configured"}"#));

    let started = start_ripples(None);
    set_body_config(None);
    started.unwrap();

    assert_eq!((canvas.width(), canvas.height()), viewport());
    stop_ripples();
}
