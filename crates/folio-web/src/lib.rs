#![cfg(target_arch = "wasm32")]
//! WASM entry point: wires the page's anchors to the animation core and runs
//! the frame loop. Every visual element degrades on its own — a page without
//! the pressure title, hero copy or a WebGPU context keeps whatever else it
//! has.

mod dom;
mod events;
mod frame;
mod glyphs;
mod hero;
mod render;
mod staged;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use folio_core::{PressureAnimator, PressureConfig, StarScene, SECTION_SETTLE_DELAY_MS};
use instant::Instant;
use rand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::events::{EventBinding, ObserverBinding, TimerHandle};
use crate::frame::FrameContext;
use crate::glyphs::GlyphRow;
use crate::hero::HeroText;
use crate::staged::StagedInput;

// Page anchor ids this layer consumes; everything is optional.
const CANVAS_ID: &str = "star-canvas";
const HERO_ID: &str = "hero";
const PRESSURE_TITLE_ID: &str = "pressure-title";

/// Owns the whole input surface and the liveness flag. Dropping it removes
/// every listener and timer and stops the frame chain at its next check.
struct SiteController {
    alive: Rc<Cell<bool>>,
    _bindings: Vec<EventBinding>,
    _observer: Option<ObserverBinding>,
    _timers: Vec<TimerHandle>,
    _ctx: Rc<RefCell<FrameContext>>,
}

impl Drop for SiteController {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

thread_local! {
    static CONTROLLER: RefCell<Option<SiteController>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Tear the site layer down: detach listeners, clear timers, stop the loop.
/// Safe to call more than once.
#[wasm_bindgen]
pub fn shutdown() {
    CONTROLLER.with(|c| c.borrow_mut().take());
}

async fn init() -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let now = Instant::now();

    let staged = Rc::new(RefCell::new(StagedInput::default()));
    let alive = Rc::new(Cell::new(true));

    // ---- Pressure headline ----
    let title = dom::element_by_id(&document, PRESSURE_TITLE_ID);
    let cfg = title
        .as_ref()
        .map(pressure_config_from)
        .unwrap_or_default();
    let animator = PressureAnimator::new(cfg.clone());
    let row = title
        .clone()
        .map(|el| GlyphRow::build(&document, el, &cfg));
    if row.is_none() {
        log::warn!("missing #{PRESSURE_TITLE_ID}; pressure headline disabled");
    }
    let observer = title.as_ref().and_then(|el| {
        ObserverBinding::observe(el, cfg.trigger_threshold, staged.clone())
    });

    // ---- Starfield ----
    let scene = StarScene::new(rand::thread_rng().gen());
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok());
    let gpu = match &canvas {
        Some(canvas) => {
            dom::sync_canvas_backing_size(canvas);
            render::init_gpu(canvas, &scene).await
        }
        None => {
            log::warn!("missing #{CANVAS_ID}; starfield disabled");
            None
        }
    };

    // ---- Hero copy ----
    let hero = HeroText::new(&document, now);
    let hero_container: Option<web::Element> = document.get_element_by_id(HERO_ID);

    // ---- Event wiring (stage now, commit on frame) ----
    let mut bindings = events::wire_window_inputs(&window, &staged);
    if let Some(reveal_el) = dom::element_by_id(&document, "hero-reveal") {
        bindings.extend(events::wire_reveal_inputs(&reveal_el, &staged));
    }

    // Initial section resolve waits for layout to settle.
    let mut timers = Vec::new();
    {
        let staged = staged.clone();
        if let Some(timer) = TimerHandle::once(&window, SECTION_SETTLE_DELAY_MS, move || {
            staged.borrow_mut().stage_scroll();
        }) {
            timers.push(timer);
        }
    }

    let ctx = Rc::new(RefCell::new(FrameContext {
        window,
        document,
        staged,
        animator,
        row,
        scene,
        gpu,
        canvas,
        hero,
        hero_container,
        sections_dirty: false,
        current_section: 0,
        last_instant: now,
    }));
    frame::start_loop(ctx.clone(), alive.clone());

    CONTROLLER.with(|c| {
        *c.borrow_mut() = Some(SiteController {
            alive,
            _bindings: bindings,
            _observer: observer,
            _timers: timers,
            _ctx: ctx,
        });
    });
    Ok(())
}

/// Animator configuration from the title element: text from `data-text` (or
/// the element's own text), the rest from optional `data-*` attributes.
fn pressure_config_from(el: &web::HtmlElement) -> PressureConfig {
    let mut cfg = PressureConfig::default();
    cfg.text = el
        .get_attribute("data-text")
        .or_else(|| el.text_content())
        .unwrap_or_default()
        .trim()
        .to_owned();
    if let Some(v) = parse_attr::<f32>(el, "data-min-font-size") {
        cfg.min_font_size = v;
    }
    if let Some(v) = el.get_attribute("data-text-color") {
        cfg.text_color = v;
    }
    if let Some(v) = parse_attr::<f64>(el, "data-threshold") {
        cfg.trigger_threshold = v;
    }
    if let Some(v) = parse_attr::<u64>(el, "data-intro-duration-ms") {
        cfg.intro_duration = Duration::from_millis(v);
    }
    cfg
}

fn parse_attr<T: std::str::FromStr>(el: &web::HtmlElement, name: &str) -> Option<T> {
    el.get_attribute(name)?.parse().ok()
}
