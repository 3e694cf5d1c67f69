use folio_core::Rect;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn element_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn scroll_offset(window: &web::Window) -> Vec2 {
    let x = window.scroll_x().unwrap_or(0.0);
    let y = window.scroll_y().unwrap_or(0.0);
    Vec2::new(x as f32, y as f32)
}

#[inline]
pub fn viewport_height(window: &web::Window) -> f32 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32
}

/// Absolute page-space bounds of an element: client rect plus scroll offset.
pub fn absolute_bounds(window: &web::Window, el: &web::Element) -> Rect {
    let rect = el.get_bounding_client_rect();
    let scroll = scroll_offset(window);
    Rect::new(
        rect.left() as f32 + scroll.x,
        rect.top() as f32 + scroll.y,
        rect.width() as f32,
        rect.height() as f32,
    )
}

/// Page-space bounds of every `<section>` marker, in document order. Missing
/// or non-element nodes are skipped.
pub fn section_marker_bounds(window: &web::Window, document: &web::Document) -> Vec<Rect> {
    let mut out = Vec::new();
    if let Ok(list) = document.query_selector_all("section") {
        for i in 0..list.length() {
            if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                out.push(absolute_bounds(window, &el));
            }
        }
    }
    out
}

/// Keep the canvas backing store sized to its CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        if w_px != canvas.width() || h_px != canvas.height() {
            canvas.set_width(w_px.max(1));
            canvas.set_height(h_px.max(1));
        }
    }
}

/// Set an inline style property, ignoring failures (a detached element is not
/// worth aborting a frame over).
#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}
