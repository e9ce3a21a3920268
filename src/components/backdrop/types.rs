use std::fmt;

/// Straight (non-premultiplied) RGBA color as understood by canvas style strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in [0, 1].
	pub a: f64,
}

impl Rgba {
	/// Fully transparent black.
	pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

	/// Builds a color from channels and alpha.
	pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same hue with the alpha multiplied by `k` and kept within [0, 1].
	pub fn scaled(self, k: f64) -> Self {
		Self {
			a: (self.a * k).clamp(0.0, 1.0),
			..self
		}
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// Inner dimensions of the host viewport, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn area(&self) -> f64 {
		self.width * self.height
	}
}

/// Last pointer position reported by the host, in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

/// One ambient light. Rebuilt every frame, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightSource {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub color: Rgba,
}

/// A point mass in the network scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub radius: f64,
	pub pulse_phase: f64,
}

impl Node {
	pub fn distance_to(&self, other: &Node) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}
}

/// Fixed pairing of two nodes made at initialization. `from < to` always holds.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub from: usize,
	pub to: usize,
	/// `1 - d / link_distance` at creation time.
	pub strength: f64,
}

/// Marker travelling along a connection.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowParticle {
	/// Position along the connection in [0, 1].
	pub progress: f64,
	pub connection: usize,
	pub speed: f64,
}
