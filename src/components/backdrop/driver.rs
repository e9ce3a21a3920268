//! Start/stop lifecycle and the per-frame loop.
//!
//! The driver owns the scene, the surface and the host handle for one mounted
//! backdrop. It holds at most one pending frame request and remembers every
//! listener it attached, so [`AnimationDriver::stop`] (also run on drop) can
//! release all of them.

use super::error::BackdropError;
use super::paint::Painter;
use super::surface::Surface;
use super::types::{Pointer, Viewport};

/// Host events a driver can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
	Resize,
	PointerMove,
	VisibilityChange,
}

/// Opaque id of a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

/// Scheduling and event plumbing of the environment the backdrop lives in.
pub trait FrameHost {
	fn viewport(&self) -> Viewport;

	/// Asks for one callback at the next display refresh.
	fn request_frame(&mut self) -> Result<FrameHandle, BackdropError>;

	fn cancel_frame(&mut self, handle: FrameHandle);

	fn listen(&mut self, event: HostEvent) -> Result<(), BackdropError>;

	fn unlisten(&mut self, event: HostEvent);
}

/// A scene plus the stepper that advances and paints it.
pub trait Backdrop {
	/// The surface changed size; rebuild whatever depends on it.
	fn resize(&mut self, viewport: Viewport);

	fn tracks_pointer(&self) -> bool {
		false
	}

	fn pointer_moved(&mut self, _pointer: Pointer) {}

	/// Forget the previous frame time, e.g. after a pause.
	fn reset_clock(&mut self) {}

	/// Advances one frame stamped `now_ms` and paints it.
	fn frame(&mut self, now_ms: f64, painter: &mut dyn Painter);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
	Stopped,
	Running,
	/// Host is hidden; no frames are scheduled until it becomes visible.
	Paused,
}

pub struct AnimationDriver<H, S, B>
where
	H: FrameHost,
	S: Surface,
	B: Backdrop,
{
	host: H,
	surface: S,
	backdrop: B,
	state: DriverState,
	pending: Option<FrameHandle>,
	listening: Vec<HostEvent>,
}

impl<H, S, B> AnimationDriver<H, S, B>
where
	H: FrameHost,
	S: Surface,
	B: Backdrop,
{
	pub fn new(host: H, surface: S, backdrop: B) -> Self {
		Self {
			host,
			surface,
			backdrop,
			state: DriverState::Stopped,
			pending: None,
			listening: Vec::new(),
		}
	}

	/// Attaches listeners, sizes the surface, builds the scene and schedules
	/// the first frame. On failure everything attached so far is released.
	pub fn start(&mut self) -> Result<(), BackdropError> {
		if self.state != DriverState::Stopped {
			return Ok(());
		}

		let mut events = vec![HostEvent::Resize, HostEvent::VisibilityChange];
		if self.backdrop.tracks_pointer() {
			events.push(HostEvent::PointerMove);
		}
		for event in events {
			if let Err(e) = self.host.listen(event) {
				self.stop();
				return Err(e);
			}
			self.listening.push(event);
		}

		self.resize();
		self.state = DriverState::Running;
		if let Err(e) = self.schedule() {
			self.stop();
			return Err(e);
		}
		log::debug!("backdrop running, listening for {:?}", self.listening);
		Ok(())
	}

	fn schedule(&mut self) -> Result<(), BackdropError> {
		if self.pending.is_none() {
			self.pending = Some(self.host.request_frame()?);
		}
		Ok(())
	}

	fn resize(&mut self) {
		let viewport = self.host.viewport();
		log::debug!("backdrop resized to {}x{}", viewport.width, viewport.height);
		self.surface.resize(viewport);
		self.backdrop.resize(viewport);
	}

	/// Frame callback from the host.
	pub fn on_frame(&mut self, now_ms: f64) {
		self.pending = None;
		if self.state != DriverState::Running {
			return;
		}
		self.backdrop.frame(now_ms, self.surface.painter());
		if let Err(e) = self.schedule() {
			log::warn!("backdrop stopping, cannot schedule frame: {e}");
			self.stop();
		}
	}

	pub fn on_resize(&mut self) {
		if self.state != DriverState::Stopped {
			self.resize();
		}
	}

	pub fn on_pointer(&mut self, pointer: Pointer) {
		if self.state != DriverState::Stopped {
			self.backdrop.pointer_moved(pointer);
		}
	}

	pub fn on_visibility(&mut self, hidden: bool) {
		match (self.state, hidden) {
			(DriverState::Running, true) => {
				if let Some(handle) = self.pending.take() {
					self.host.cancel_frame(handle);
				}
				self.state = DriverState::Paused;
				log::debug!("backdrop paused");
			}
			(DriverState::Paused, false) => {
				self.state = DriverState::Running;
				self.backdrop.reset_clock();
				if let Err(e) = self.schedule() {
					log::warn!("backdrop stopping, cannot resume: {e}");
					self.stop();
				} else {
					log::debug!("backdrop resumed");
				}
			}
			_ => {}
		}
	}

	/// Cancels the pending frame and detaches every listener. Idempotent.
	pub fn stop(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.host.cancel_frame(handle);
		}
		for event in self.listening.drain(..) {
			self.host.unlisten(event);
		}
		if self.state != DriverState::Stopped {
			log::debug!("backdrop stopped");
		}
		self.state = DriverState::Stopped;
	}
}

impl<H, S, B> Drop for AnimationDriver<H, S, B>
where
	H: FrameHost,
	S: Surface,
	B: Backdrop,
{
	fn drop(&mut self) {
		self.stop();
	}
}
