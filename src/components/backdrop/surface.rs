use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::error::BackdropError;
use super::paint::Painter;
use super::types::{Pointer, Viewport};

/// Pixel-addressable area a backdrop paints into.
pub trait Surface {
	/// Sets the backing store size. Called on start and on every resize.
	fn resize(&mut self, viewport: Viewport);

	fn painter(&mut self) -> &mut dyn Painter;
}

/// A `<canvas>` and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, BackdropError> {
		let ctx = canvas
			.get_context("2d")?
			.ok_or(BackdropError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| BackdropError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn resize(&mut self, viewport: Viewport) {
		self.canvas.set_width(viewport.width as u32);
		self.canvas.set_height(viewport.height as u32);
	}

	fn painter(&mut self) -> &mut dyn Painter {
		&mut self.ctx
	}
}

/// Inner size of the browser window. Unreadable dimensions count as zero.
pub fn window_viewport(window: &Window) -> Viewport {
	let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	Viewport::new(read(window.inner_width()), read(window.inner_height()))
}

/// Maps a client-space point onto the canvas backing store. `rect` is the
/// canvas's on-screen `(left, top, width, height)` and `backing` its pixel
/// size; an axis with no on-screen extent is left unscaled.
pub fn client_to_surface(
	client: (f64, f64),
	rect: (f64, f64, f64, f64),
	backing: (f64, f64),
) -> Pointer {
	let (left, top, width, height) = rect;
	let scale = |pixels: f64, css: f64| if css > 0.0 { pixels / css } else { 1.0 };
	Pointer {
		x: (client.0 - left) * scale(backing.0, width),
		y: (client.1 - top) * scale(backing.1, height),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pointer_matches_css_size_when_unscaled() {
		let p = client_to_surface((150.0, 80.0), (50.0, 30.0, 800.0, 600.0), (800.0, 600.0));
		assert_eq!((p.x, p.y), (100.0, 50.0));
	}

	#[test]
	fn pointer_scales_into_backing_pixels() {
		// canvas stretched to 400x300 on screen over an 800x600 backing store
		let p = client_to_surface((200.0, 150.0), (0.0, 0.0, 400.0, 300.0), (800.0, 600.0));
		assert_eq!((p.x, p.y), (400.0, 300.0));
		let p = client_to_surface((400.0, 300.0), (0.0, 0.0, 400.0, 300.0), (800.0, 600.0));
		assert_eq!((p.x, p.y), (800.0, 600.0));
	}

	#[test]
	fn collapsed_rect_leaves_axis_unscaled() {
		let p = client_to_surface((10.0, 20.0), (0.0, 0.0, 0.0, 300.0), (800.0, 600.0));
		assert_eq!((p.x, p.y), (10.0, 40.0));
	}
}
