//! Event wiring with explicit teardown.
//!
//! Every listener, timer and observer is held by a binding object that
//! detaches in `Drop`, so dropping the controller silences the whole input
//! surface at once. Handlers only stage values into [`StagedInput`]; the
//! frame callback commits them.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::staged::StagedInput;

/// A DOM event listener that unhooks itself when dropped.
pub struct EventBinding {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl EventBinding {
    pub fn listen(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// A one-shot timer cleared when dropped, so pending delays cannot outlive
/// the controller and mutate detached state.
pub struct TimerHandle {
    window: web::Window,
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl TimerHandle {
    pub fn once(window: &web::Window, delay_ms: i32, handler: impl FnMut() + 'static) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok()?;
        Some(Self {
            window: window.clone(),
            id,
            _closure: closure,
        })
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.id);
    }
}

/// IntersectionObserver watching the pressure container; disconnects on drop.
pub struct ObserverBinding {
    observer: web::IntersectionObserver,
    _closure: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl ObserverBinding {
    pub fn observe(
        target: &web::Element,
        threshold: f64,
        staged: Rc<RefCell<StagedInput>>,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: web::IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        staged
                            .borrow_mut()
                            .stage_intersection(entry.intersection_ratio());
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let options = web::IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
                .ok()?;
        observer.observe(target);
        Some(Self {
            observer,
            _closure: closure,
        })
    }
}

impl Drop for ObserverBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Global input surface: pointer position, scroll, resize.
pub fn wire_window_inputs(
    window: &web::Window,
    staged: &Rc<RefCell<StagedInput>>,
) -> Vec<EventBinding> {
    let target: &web::EventTarget = window.as_ref();
    let mut bindings = Vec::new();

    {
        let staged = staged.clone();
        bindings.push(EventBinding::listen(target, "pointermove", move |ev| {
            let ev: web::PointerEvent = ev.unchecked_into();
            staged
                .borrow_mut()
                .stage_pointer(ev.client_x() as f32, ev.client_y() as f32);
        }));
    }
    {
        let staged = staged.clone();
        bindings.push(EventBinding::listen(target, "scroll", move |_| {
            staged.borrow_mut().stage_scroll();
        }));
    }
    {
        let staged = staged.clone();
        bindings.push(EventBinding::listen(target, "resize", move |_| {
            staged.borrow_mut().stage_layout();
        }));
    }
    bindings
}

/// Reveal-block pointer surface on its own container element.
pub fn wire_reveal_inputs(
    el: &web::HtmlElement,
    staged: &Rc<RefCell<StagedInput>>,
) -> Vec<EventBinding> {
    let target: &web::EventTarget = el.as_ref();
    let mut bindings = Vec::new();

    {
        let staged = staged.clone();
        bindings.push(EventBinding::listen(target, "pointermove", move |ev| {
            let ev: web::PointerEvent = ev.unchecked_into();
            staged.borrow_mut().stage_reveal_pointer(ev.client_x() as f32);
        }));
    }
    {
        let staged = staged.clone();
        bindings.push(EventBinding::listen(target, "pointerenter", move |_| {
            staged.borrow_mut().stage_reveal_hover(true);
        }));
    }
    {
        let staged = staged.clone();
        bindings.push(EventBinding::listen(target, "pointerleave", move |_| {
            staged.borrow_mut().stage_reveal_hover(false);
        }));
    }
    bindings
}
