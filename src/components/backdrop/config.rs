//! Tuning knobs for both backdrop variants.
//!
//! Defaults reproduce the look the site shipped with; pages override them
//! through the component props.

use super::types::Rgba;

/// How the ambient phase advances between frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeMode {
	/// Fixed increment per frame. Speed follows the display refresh rate.
	PerFrame,
	/// Increment scaled by elapsed time relative to a 60 Hz frame.
	#[default]
	WallClock,
}

/// Reference frame length for [`TimeMode::WallClock`].
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// Look and timing of the aurora backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientConfig {
	/// Opaque fill painted under the lights.
	pub background: Rgba,
	/// Phase increment per reference frame.
	pub time_step: f64,
	/// Whether `time_step` is per frame or per reference frame of wall time.
	pub time_mode: TimeMode,
	/// Longest gap honoured in wall clock mode, so a resumed tab doesn't jump.
	pub max_frame_gap_ms: f64,
	/// Peak-to-peak noise added to each RGB channel. Zero disables grain.
	pub grain_amplitude: f64,
}

impl Default for AmbientConfig {
	fn default() -> Self {
		Self {
			background: Rgba::new(5, 5, 5, 1.0),
			time_step: 0.002,
			time_mode: TimeMode::default(),
			max_frame_gap_ms: 100.0,
			grain_amplitude: 4.0,
		}
	}
}

/// Physics and look of the node network backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConfig {
	/// Upper bound on node count regardless of surface area.
	pub max_nodes: usize,
	/// Surface area (px²) that earns one node.
	pub area_per_node: f64,
	/// Pairs closer than this at init become connections.
	pub link_distance: f64,
	/// Connections fade to nothing at this live distance.
	pub fade_distance: f64,
	/// Only the first `flow_pool` connections carry flow particles.
	pub flow_pool: usize,
	/// Range of per-frame progress for flow particles.
	pub flow_speed: (f64, f64),
	/// Initial velocity is drawn from `±initial_speed / 2` per axis.
	pub initial_speed: f64,
	/// Range of node core radii.
	pub node_radius: (f64, f64),
	/// Range within which the pointer pulls on nodes.
	pub pointer_radius: f64,
	/// Impulse per frame along the unit vector toward the pointer. Negative repels.
	pub pointer_force: f64,
	/// Velocity factor applied on a wall hit (sign flips the component).
	pub bounce: f64,
	/// Velocity factor applied every frame.
	pub friction: f64,
	/// Angular speed of the glow pulse, in radians per second.
	pub pulse_rate: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			max_nodes: 80,
			area_per_node: 25_000.0,
			link_distance: 200.0,
			fade_distance: 250.0,
			flow_pool: 30,
			flow_speed: (0.005, 0.015),
			initial_speed: 0.3,
			node_radius: (2.0, 5.0),
			pointer_radius: 200.0,
			pointer_force: 0.02,
			bounce: -0.8,
			friction: 0.99,
			pulse_rate: 2.0,
		}
	}
}
