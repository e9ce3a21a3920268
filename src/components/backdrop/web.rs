//! Browser host: `requestAnimationFrame` scheduling and DOM listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Document, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::driver::{AnimationDriver, Backdrop, FrameHandle, FrameHost, HostEvent};
use super::error::BackdropError;
use super::surface::{CanvasSurface, client_to_surface, window_viewport};
use super::types::Viewport;

type WebDriver<B> = AnimationDriver<WebHost, CanvasSurface, B>;

#[derive(Default)]
struct Callbacks {
	frame: Option<Closure<dyn FnMut(f64)>>,
	resize: Option<Closure<dyn FnMut()>>,
	pointer: Option<Closure<dyn FnMut(MouseEvent)>>,
	visibility: Option<Closure<dyn FnMut()>>,
}

impl Callbacks {
	fn listener(&self, event: HostEvent) -> Option<&Function> {
		let value: &JsValue = match event {
			HostEvent::Resize => self.resize.as_ref()?.as_ref(),
			HostEvent::PointerMove => self.pointer.as_ref()?.as_ref(),
			HostEvent::VisibilityChange => self.visibility.as_ref()?.as_ref(),
		};
		Some(value.unchecked_ref())
	}
}

pub struct WebHost {
	window: Window,
	document: Document,
	callbacks: Rc<RefCell<Callbacks>>,
}

impl WebHost {
	fn target(&self, event: HostEvent) -> (&EventTarget, &'static str) {
		let window: &EventTarget = &self.window;
		let document: &EventTarget = &self.document;
		match event {
			HostEvent::Resize => (window, "resize"),
			HostEvent::PointerMove => (window, "mousemove"),
			HostEvent::VisibilityChange => (document, "visibilitychange"),
		}
	}
}

impl FrameHost for WebHost {
	fn viewport(&self) -> Viewport {
		window_viewport(&self.window)
	}

	fn request_frame(&mut self) -> Result<FrameHandle, BackdropError> {
		let callbacks = self.callbacks.borrow();
		let cb = callbacks
			.frame
			.as_ref()
			.ok_or_else(|| BackdropError::Js("frame callback not installed".into()))?;
		let id = self.window.request_animation_frame(cb.as_ref().unchecked_ref())?;
		Ok(FrameHandle(id))
	}

	fn cancel_frame(&mut self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}

	fn listen(&mut self, event: HostEvent) -> Result<(), BackdropError> {
		let callbacks = self.callbacks.borrow();
		let listener = callbacks
			.listener(event)
			.ok_or_else(|| BackdropError::Js(format!("{event:?} callback not installed")))?;
		let (target, name) = self.target(event);
		target.add_event_listener_with_callback(name, listener)?;
		Ok(())
	}

	fn unlisten(&mut self, event: HostEvent) {
		let callbacks = self.callbacks.borrow();
		if let Some(listener) = callbacks.listener(event) {
			let (target, name) = self.target(event);
			let _ = target.remove_event_listener_with_callback(name, listener);
		}
	}
}

/// A running backdrop. Dropping it stops the loop and detaches its listeners.
pub struct Mounted<B: Backdrop> {
	driver: Rc<RefCell<WebDriver<B>>>,
}

impl<B: Backdrop> Drop for Mounted<B> {
	fn drop(&mut self) {
		match self.driver.try_borrow_mut() {
			Ok(mut driver) => driver.stop(),
			Err(_) => log::warn!("backdrop unmounted while busy"),
		}
	}
}

fn with_driver<D>(weak: &Weak<RefCell<D>>, f: impl FnOnce(&mut D)) {
	let Some(driver) = weak.upgrade() else {
		return;
	};
	match driver.try_borrow_mut() {
		Ok(mut driver) => f(&mut driver),
		Err(_) => log::trace!("backdrop busy, event skipped"),
	};
}

/// Starts `backdrop` on `canvas`, sized to the window.
pub fn mount<B: Backdrop + 'static>(
	canvas: HtmlCanvasElement,
	backdrop: B,
) -> Result<Mounted<B>, BackdropError> {
	let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
	let document = window.document().ok_or(BackdropError::NoDocument)?;
	let surface = CanvasSurface::acquire(canvas.clone())?;

	let callbacks = Rc::new(RefCell::new(Callbacks::default()));
	let host = WebHost {
		window,
		document: document.clone(),
		callbacks: callbacks.clone(),
	};
	let driver = Rc::new(RefCell::new(AnimationDriver::new(host, surface, backdrop)));

	{
		let mut cbs = callbacks.borrow_mut();
		let weak = Rc::downgrade(&driver);
		cbs.frame = Some(Closure::new(move |now: f64| {
			with_driver(&weak, |d: &mut WebDriver<B>| d.on_frame(now));
		}));
		let weak = Rc::downgrade(&driver);
		cbs.resize = Some(Closure::new(move || {
			with_driver(&weak, |d: &mut WebDriver<B>| d.on_resize());
		}));
		let weak = Rc::downgrade(&driver);
		cbs.pointer = Some(Closure::new(move |ev: MouseEvent| {
			let rect = canvas.get_bounding_client_rect();
			let pointer = client_to_surface(
				(ev.client_x() as f64, ev.client_y() as f64),
				(rect.left(), rect.top(), rect.width(), rect.height()),
				(canvas.width() as f64, canvas.height() as f64),
			);
			with_driver(&weak, |d: &mut WebDriver<B>| d.on_pointer(pointer));
		}));
		let weak = Rc::downgrade(&driver);
		cbs.visibility = Some(Closure::new(move || {
			let hidden = document.hidden();
			with_driver(&weak, |d: &mut WebDriver<B>| d.on_visibility(hidden));
		}));
	}

	driver.borrow_mut().start()?;
	Ok(Mounted { driver })
}
