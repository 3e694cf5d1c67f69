//! Per-frame driver: drains staged input, steps both animation systems and
//! commits their output to the DOM and the GPU.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::{sections, PressureAnimator, StarScene, StepOutcome};
use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;
use crate::glyphs::{DomProbe, GlyphRow};
use crate::hero::HeroText;
use crate::render;
use crate::staged::StagedInput;

pub struct FrameContext {
    pub window: web::Window,
    pub document: web::Document,
    pub staged: Rc<RefCell<StagedInput>>,

    pub animator: PressureAnimator,
    pub row: Option<GlyphRow>,

    pub scene: StarScene,
    pub gpu: Option<render::GpuState<'static>>,
    pub canvas: Option<web::HtmlCanvasElement>,

    pub hero: HeroText,
    pub hero_container: Option<web::Element>,

    pub sections_dirty: bool,
    pub current_section: usize,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        let staged = self.staged.borrow_mut().drain();

        if let Some(ratio) = staged.intersection {
            if self.animator.observe_intersection(ratio, now) {
                if let Some(row) = &self.row {
                    row.fade_in();
                }
            }
        }
        if staged.layout_dirty {
            self.animator.invalidate_geometry();
            self.sections_dirty = true;
            self.hero.refresh_bounds();
        }
        if staged.scroll_dirty {
            self.sections_dirty = true;
            self.hero.refresh_bounds();
        }
        if let Some([x, y]) = staged.pointer {
            self.animator.stage_pointer(glam::Vec2::new(x, y));
        }
        if let Some(x) = staged.reveal_pointer {
            self.hero.reveal_pointer(x);
        }
        if let Some(hovering) = staged.reveal_hover {
            self.hero.reveal_hover(hovering);
        }

        let scroll = dom::scroll_offset(&self.window);

        if self.sections_dirty {
            self.resolve_sections(scroll.y);
            self.sections_dirty = false;
        }

        if let Some(row) = &self.row {
            let mut probe = DomProbe::new(&self.window, row);
            if self.animator.step(now, scroll, &mut probe) == StepOutcome::Updated {
                row.apply_weights(self.animator.glyphs());
            }
        }

        self.hero.sync(now, dt_sec);

        self.scene.advance(dt_sec);
        if let (Some(gpu), Some(canvas)) = (&mut self.gpu, &self.canvas) {
            dom::sync_canvas_backing_size(canvas);
            gpu.resize_if_needed(canvas.width(), canvas.height());
            if let Err(e) = gpu.render(&self.scene) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    fn resolve_sections(&mut self, scroll_y: f32) {
        // A missing hero anchor collapses section 0 to nothing; the walk over
        // the remaining markers still works.
        let hero_bottom = self
            .hero_container
            .as_ref()
            .map(|el| dom::absolute_bounds(&self.window, el).bottom())
            .unwrap_or(0.0);
        let markers = dom::section_marker_bounds(&self.window, &self.document);
        let spans = sections::build_spans(hero_bottom, &markers);
        let viewport_h = dom::viewport_height(&self.window);

        let index = sections::resolve_section(&spans, scroll_y, viewport_h);
        if index != self.current_section {
            self.current_section = index;
            self.scene.retarget_camera(index);
        }
    }
}

/// Start the requestAnimationFrame chain. The chain checks `alive` before
/// every frame: once the controller drops it, no further state is touched and
/// the chain stops rescheduling itself.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>, alive: Rc<Cell<bool>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !alive.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        if let Some(w) = web::window() {
            let _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        let _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
