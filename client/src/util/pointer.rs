//! Pointer event mapping: screen points and the tile under the pointer.
//!
//! Tiles carry `data-ring` / `data-tile` attributes in the rendered SVG; the
//! host resolves an event target to the nearest tagged ancestor.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use wheel::input::TileRef;

#[cfg(feature = "csr")]
use wasm_bindgen::JsCast;
#[cfg(feature = "csr")]
use wheel::camera::Point;

/// Build a tile reference from the two data attributes.
pub fn tile_ref_from_attrs(ring: Option<&str>, tile: Option<&str>) -> Option<TileRef> {
    let ring_id = ring?.trim().parse().ok()?;
    let tile_id = tile?.trim().parse().ok()?;
    Some(TileRef::new(ring_id, tile_id))
}

/// The tile whose wedge contains the event target, if any.
#[cfg(feature = "csr")]
pub fn tile_at_target(ev: &web_sys::Event) -> Option<TileRef> {
    let element = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let tagged = element.closest("[data-tile]").ok()??;
    let ring = tagged.get_attribute("data-ring");
    let tile = tagged.get_attribute("data-tile");
    tile_ref_from_attrs(ring.as_deref(), tile.as_deref())
}

/// Pointer position in client (viewport) coordinates.
#[cfg(feature = "csr")]
pub fn pointer_point(ev: &leptos::ev::PointerEvent) -> Point {
    Point::new(f64::from(ev.client_x()), f64::from(ev.client_y()))
}

/// Center of `element` in client coordinates.
#[cfg(feature = "csr")]
pub fn element_center(element: &web_sys::Element) -> Point {
    let rect = element.get_bounding_client_rect();
    Point::new(rect.x() + rect.width() * 0.5, rect.y() + rect.height() * 0.5)
}
