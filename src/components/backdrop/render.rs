use rand::RngCore;

use super::config::AmbientConfig;
use super::network::NetworkScene;
use super::paint::Painter;
use super::types::{LightSource, Rgba, Viewport};

const VIOLET: Rgba = Rgba::new(139, 92, 246, 1.0);
const CYAN: Rgba = Rgba::new(6, 182, 212, 1.0);
const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);
const FLOW_RADIUS: f64 = 8.0;

pub fn ambient(
	config: &AmbientConfig,
	viewport: Viewport,
	lights: &[LightSource],
	painter: &mut dyn Painter,
	rng: &mut dyn RngCore,
) {
	let Viewport { width, height } = viewport;
	painter.fill_rect(0.0, 0.0, width, height, config.background);
	for light in lights {
		painter.radial_wash(
			light.x,
			light.y,
			light.radius,
			&[(0.0, light.color), (1.0, Rgba::TRANSPARENT)],
			width,
			height,
		);
	}
	if config.grain_amplitude > 0.0 {
		painter.grain(config.grain_amplitude, rng);
	}
}

/// Glow intensity in [0, 1] for a node phase at `time_s` seconds.
pub fn pulse(time_s: f64, rate: f64, phase: f64) -> f64 {
	(time_s * rate + phase).sin() * 0.5 + 0.5
}

/// Live fade of a connection: 1 when the nodes touch, 0 at `fade_distance`.
pub fn link_strength(distance: f64, fade_distance: f64) -> f64 {
	(1.0 - distance / fade_distance).max(0.0)
}

pub fn network<R>(scene: &NetworkScene<R>, time_s: f64, painter: &mut dyn Painter) {
	let cfg = &scene.config;
	painter.clear(scene.viewport.width, scene.viewport.height);

	for node in &scene.nodes {
		let p = pulse(time_s, cfg.pulse_rate, node.pulse_phase);
		let glow_radius = node.radius * (2.0 + p);
		painter.radial_disc(
			node.x,
			node.y,
			glow_radius * 3.0,
			&[
				(0.0, VIOLET.scaled(0.4 * p)),
				(0.5, CYAN.scaled(0.2 * p)),
				(1.0, Rgba::TRANSPARENT),
			],
		);
		painter.radial_disc(
			node.x,
			node.y,
			node.radius,
			&[(0.0, WHITE), (0.5, VIOLET), (1.0, CYAN)],
		);
	}

	for conn in &scene.connections {
		let (Some(from), Some(to)) = (scene.nodes.get(conn.from), scene.nodes.get(conn.to)) else {
			continue;
		};
		let strength = link_strength(from.distance_to(to), cfg.fade_distance);
		if strength <= 0.0 {
			continue;
		}
		painter.gradient_line(
			(from.x, from.y),
			(to.x, to.y),
			strength * 2.0,
			&[
				(0.0, VIOLET.scaled(strength * 0.5)),
				(0.5, CYAN.scaled(strength * 0.3)),
				(1.0, VIOLET.scaled(strength * 0.5)),
			],
		);
	}

	for flow in &scene.flows {
		let Some((x, y)) = scene.flow_position(flow) else {
			continue;
		};
		painter.radial_disc(
			x,
			y,
			FLOW_RADIUS,
			&[
				(0.0, WHITE.scaled(0.9)),
				(0.3, CYAN.scaled(0.6)),
				(1.0, VIOLET.scaled(0.0)),
			],
		);
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::components::backdrop::config::NetworkConfig;
	use crate::components::backdrop::paint::recording::{Command, Recorder};
	use crate::components::backdrop::types::{Connection, FlowParticle, Node};

	fn node(x: f64, y: f64) -> Node {
		Node { x, y, vx: 0.0, vy: 0.0, radius: 3.0, pulse_phase: 0.0 }
	}

	#[test]
	fn ambient_draws_fill_lights_then_grain() {
		let mut painter = Recorder::default();
		let mut rng = StdRng::seed_from_u64(0);
		let light = LightSource { x: 1.0, y: 2.0, radius: 600.0, color: Rgba::new(59, 130, 246, 0.04) };
		let config = AmbientConfig::default();
		ambient(&config, Viewport::new(10.0, 10.0), &[light; 3], &mut painter, &mut rng);
		assert_eq!(painter.commands.len(), 5);
		assert_eq!(painter.commands[0], Command::Rect(config.background));
		assert_eq!(painter.commands[1], Command::Wash { x: 1.0, y: 2.0, radius: 600.0 });
		assert_eq!(painter.commands[4], Command::Grain(4.0));

		let mut painter = Recorder::default();
		let quiet = AmbientConfig { grain_amplitude: 0.0, ..config };
		ambient(&quiet, Viewport::new(10.0, 10.0), &[light], &mut painter, &mut rng);
		assert!(!painter.commands.iter().any(|c| matches!(c, Command::Grain(_))));
	}

	#[test]
	fn pulse_stays_in_unit_range() {
		for i in 0..1000 {
			let p = pulse(i as f64 * 0.037, 2.0, 1.3);
			assert!((0.0..=1.0).contains(&p));
		}
	}

	#[test]
	fn link_strength_fades_out_at_distance() {
		assert_eq!(link_strength(0.0, 250.0), 1.0);
		assert_eq!(link_strength(125.0, 250.0), 0.5);
		assert_eq!(link_strength(250.0, 250.0), 0.0);
		assert_eq!(link_strength(400.0, 250.0), 0.0);
	}

	#[test]
	fn far_apart_connections_are_not_drawn() {
		let mut scene = NetworkScene::new(NetworkConfig::default(), StdRng::seed_from_u64(0));
		scene.viewport = Viewport::new(1000.0, 1000.0);
		scene.nodes = vec![node(0.0, 0.0), node(100.0, 0.0), node(900.0, 0.0)];
		scene.connections = vec![
			Connection { from: 0, to: 1, strength: 0.5 },
			Connection { from: 1, to: 2, strength: 0.1 },
		];
		let mut painter = Recorder::default();
		network(&scene, 0.0, &mut painter);
		let lines: Vec<_> = painter
			.commands
			.iter()
			.filter_map(|c| match c {
				Command::Line { from, to, width } => Some((*from, *to, *width)),
				_ => None,
			})
			.collect();
		assert_eq!(lines.len(), 1);
		assert_eq!(lines[0].0, (0.0, 0.0));
		assert_eq!(lines[0].1, (100.0, 0.0));
		assert!((lines[0].2 - 2.0 * 0.6).abs() < 1e-12);
	}

	#[test]
	fn flow_particles_drawn_at_interpolated_position() {
		let mut scene = NetworkScene::new(NetworkConfig::default(), StdRng::seed_from_u64(0));
		scene.viewport = Viewport::new(1000.0, 1000.0);
		scene.nodes = vec![node(0.0, 0.0), node(100.0, 100.0)];
		scene.connections = vec![Connection { from: 0, to: 1, strength: 0.3 }];
		scene.flows = vec![FlowParticle { progress: 0.5, connection: 0, speed: 0.01 }];
		let mut painter = Recorder::default();
		network(&scene, 0.0, &mut painter);
		assert_eq!(painter.commands[0], Command::Clear);
		let last = painter.commands.last().cloned();
		assert!(matches!(
			last,
			Some(Command::Disc { x, y, radius, .. }) if x == 50.0 && y == 50.0 && radius == FLOW_RADIUS
		));
	}

	#[test]
	fn glow_scales_with_pulse() {
		let mut scene = NetworkScene::new(NetworkConfig::default(), StdRng::seed_from_u64(0));
		scene.viewport = Viewport::new(100.0, 100.0);
		scene.nodes = vec![node(50.0, 50.0)];
		let mut painter = Recorder::default();
		// sin(pi/2) -> full pulse
		network(&scene, std::f64::consts::FRAC_PI_4, &mut painter);
		match &painter.commands[1] {
			Command::Disc { radius, stops, .. } => {
				assert!((radius - 3.0 * 3.0 * 3.0).abs() < 1e-9);
				assert!((stops[0].1.a - 0.4).abs() < 1e-9);
			}
			other => panic!("expected glow disc, got {other:?}"),
		}
		assert!(matches!(painter.commands[2], Command::Disc { radius, .. } if radius == 3.0));
	}
}
