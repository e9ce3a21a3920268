//! Aurora-like ambient scene: three faint lights wandering on Lissajous paths.

use rand::Rng;

use super::config::{AmbientConfig, REFERENCE_FRAME_MS, TimeMode};
use super::driver::Backdrop;
use super::paint::Painter;
use super::render;
use super::types::{LightSource, Rgba, Viewport};

/// Per-light trajectory: base position as a fraction of the viewport plus a
/// trig wobble on each axis.
struct Orbit {
	base: (f64, f64),
	x_wave: Wave,
	y_wave: Wave,
	radius: f64,
	color: Rgba,
}

#[derive(Clone, Copy)]
enum Wave {
	Sin { freq: f64, amp: f64 },
	Cos { freq: f64, amp: f64 },
}

impl Wave {
	fn at(self, t: f64) -> f64 {
		match self {
			Wave::Sin { freq, amp } => (freq * t).sin() * amp,
			Wave::Cos { freq, amp } => (freq * t).cos() * amp,
		}
	}
}

const ORBITS: [Orbit; 3] = [
	// blue
	Orbit {
		base: (0.8, 0.2),
		x_wave: Wave::Sin { freq: 0.5, amp: 100.0 },
		y_wave: Wave::Cos { freq: 0.3, amp: 50.0 },
		radius: 600.0,
		color: Rgba::new(59, 130, 246, 0.04),
	},
	// white
	Orbit {
		base: (0.2, 0.8),
		x_wave: Wave::Cos { freq: 0.4, amp: 80.0 },
		y_wave: Wave::Sin { freq: 0.6, amp: 60.0 },
		radius: 500.0,
		color: Rgba::new(255, 255, 255, 0.02),
	},
	// gray
	Orbit {
		base: (0.5, 0.5),
		x_wave: Wave::Sin { freq: 0.3, amp: 120.0 },
		y_wave: Wave::Cos { freq: 0.5, amp: 80.0 },
		radius: 700.0,
		color: Rgba::new(100, 100, 100, 0.03),
	},
];

pub struct AmbientScene<R> {
	pub config: AmbientConfig,
	pub viewport: Viewport,
	/// Animation phase.
	pub t: f64,
	last_frame_ms: Option<f64>,
	rng: R,
}

impl<R: Rng> AmbientScene<R> {
	pub fn new(config: AmbientConfig, rng: R) -> Self {
		Self {
			config,
			viewport: Viewport::default(),
			t: 0.0,
			last_frame_ms: None,
			rng,
		}
	}

	/// Moves the phase forward for a frame stamped `now_ms`.
	pub fn advance(&mut self, now_ms: f64) {
		let frames = match (self.config.time_mode, self.last_frame_ms) {
			(TimeMode::PerFrame, _) | (TimeMode::WallClock, None) => 1.0,
			(TimeMode::WallClock, Some(prev)) => {
				(now_ms - prev).clamp(0.0, self.config.max_frame_gap_ms) / REFERENCE_FRAME_MS
			}
		};
		self.last_frame_ms = Some(now_ms);
		self.t += self.config.time_step * frames;
	}

	/// Light positions for the current phase.
	pub fn lights(&self) -> [LightSource; 3] {
		let Viewport { width, height } = self.viewport;
		ORBITS.map(|orbit| LightSource {
			x: width * orbit.base.0 + orbit.x_wave.at(self.t),
			y: height * orbit.base.1 + orbit.y_wave.at(self.t),
			radius: orbit.radius,
			color: orbit.color,
		})
	}
}

impl<R: Rng> Backdrop for AmbientScene<R> {
	fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
	}

	fn reset_clock(&mut self) {
		self.last_frame_ms = None;
	}

	fn frame(&mut self, now_ms: f64, painter: &mut dyn Painter) {
		self.advance(now_ms);
		let lights = self.lights();
		render::ambient(&self.config, self.viewport, &lights, painter, &mut self.rng);
	}
}
