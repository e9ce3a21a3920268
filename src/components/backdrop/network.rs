//! Particle network: drifting nodes, proximity links fixed at init, and flow
//! particles that travel along the links.

use std::f64::consts::TAU;

use rand::Rng;

use super::config::NetworkConfig;
use super::driver::Backdrop;
use super::paint::Painter;
use super::render;
use super::types::{Connection, FlowParticle, Node, Pointer, Viewport};

pub struct NetworkScene<R> {
	pub config: NetworkConfig,
	pub viewport: Viewport,
	pub nodes: Vec<Node>,
	pub connections: Vec<Connection>,
	pub flows: Vec<FlowParticle>,
	pub pointer: Option<Pointer>,
	rng: R,
}

impl<R: Rng> NetworkScene<R> {
	pub fn new(config: NetworkConfig, rng: R) -> Self {
		Self {
			config,
			viewport: Viewport::default(),
			nodes: Vec::new(),
			connections: Vec::new(),
			flows: Vec::new(),
			pointer: None,
			rng,
		}
	}

	/// Node count for a surface: one per `area_per_node`, never above the cap.
	/// A non-positive `area_per_node` puts no area limit on a non-empty surface.
	pub fn node_count(config: &NetworkConfig, viewport: Viewport) -> usize {
		let area = viewport.area();
		if area.is_nan() || area <= 0.0 {
			return 0;
		}
		if config.area_per_node <= 0.0 {
			return config.max_nodes;
		}
		let by_area = (area / config.area_per_node).floor();
		if by_area.is_infinite() {
			config.max_nodes
		} else {
			(by_area as usize).min(config.max_nodes)
		}
	}

	/// Discards the scene and builds a new one for `viewport`.
	pub fn reinitialize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		let count = Self::node_count(&self.config, viewport);
		let cfg = &self.config;
		let rng = &mut self.rng;

		let half = cfg.initial_speed.abs() / 2.0;
		self.nodes = (0..count)
			.map(|_| Node {
				x: sample(rng, 0.0, viewport.width),
				y: sample(rng, 0.0, viewport.height),
				vx: sample(rng, -half, half),
				vy: sample(rng, -half, half),
				radius: sample(rng, cfg.node_radius.0, cfg.node_radius.1),
				pulse_phase: rng.gen_range(0.0..TAU),
			})
			.collect();

		self.connections.clear();
		for i in 0..self.nodes.len() {
			for j in (i + 1)..self.nodes.len() {
				let dist = self.nodes[i].distance_to(&self.nodes[j]);
				if dist < cfg.link_distance {
					self.connections.push(Connection {
						from: i,
						to: j,
						strength: 1.0 - dist / cfg.link_distance,
					});
				}
			}
		}

		let pool = self.connections.len().min(cfg.flow_pool);
		self.flows = (0..pool)
			.map(|connection| FlowParticle {
				progress: rng.gen_range(0.0..1.0),
				connection,
				speed: sample(rng, cfg.flow_speed.0, cfg.flow_speed.1),
			})
			.collect();

		log::debug!(
			"network scene {}x{}: {} nodes, {} connections, {} flows",
			viewport.width,
			viewport.height,
			self.nodes.len(),
			self.connections.len(),
			self.flows.len()
		);
	}

	/// Advances physics and flow particles by one frame.
	pub fn step(&mut self) {
		let cfg = &self.config;
		let Viewport { width, height } = self.viewport;

		for node in &mut self.nodes {
			if let Some(pointer) = self.pointer {
				let (dx, dy) = (pointer.x - node.x, pointer.y - node.y);
				let dist = dx.hypot(dy);
				if dist > 0.0 && dist < cfg.pointer_radius {
					node.vx += dx / dist * cfg.pointer_force;
					node.vy += dy / dist * cfg.pointer_force;
				}
			}

			node.x += node.vx;
			node.y += node.vy;

			if node.x < 0.0 || node.x > width {
				node.vx *= cfg.bounce;
			}
			if node.y < 0.0 || node.y > height {
				node.vy *= cfg.bounce;
			}
			node.x = node.x.clamp(0.0, width);
			node.y = node.y.clamp(0.0, height);

			node.vx *= cfg.friction;
			node.vy *= cfg.friction;
		}

		let pool = self.flow_pool();
		for flow in &mut self.flows {
			flow.progress += flow.speed;
			if flow.progress > 1.0 {
				flow.progress = 0.0;
				flow.connection = next_connection(&mut self.rng, flow.connection, pool);
			}
		}
	}
}

impl<R> NetworkScene<R> {
	/// Connections eligible to carry flow particles.
	pub fn flow_pool(&self) -> usize {
		self.connections.len().min(self.config.flow_pool)
	}

	/// Render position of a flow particle, if its connection still exists.
	pub fn flow_position(&self, flow: &FlowParticle) -> Option<(f64, f64)> {
		let conn = self.connections.get(flow.connection)?;
		let (from, to) = (self.nodes.get(conn.from)?, self.nodes.get(conn.to)?);
		Some((
			from.x + (to.x - from.x) * flow.progress,
			from.y + (to.y - from.y) * flow.progress,
		))
	}
}

/// Uniform draw from `lo..hi`; collapses to `lo` when the range is empty.
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
	if lo < hi { rng.gen_range(lo..hi) } else { lo }
}

/// Uniform pick from `0..pool` that differs from `current` whenever it can.
fn next_connection<R: Rng + ?Sized>(rng: &mut R, current: usize, pool: usize) -> usize {
	match pool {
		0 | 1 => 0,
		_ if current >= pool => rng.gen_range(0..pool),
		_ => {
			let pick = rng.gen_range(0..pool - 1);
			if pick >= current { pick + 1 } else { pick }
		}
	}
}

impl<R: Rng> Backdrop for NetworkScene<R> {
	fn resize(&mut self, viewport: Viewport) {
		self.reinitialize(viewport);
	}

	fn tracks_pointer(&self) -> bool {
		true
	}

	fn pointer_moved(&mut self, pointer: Pointer) {
		self.pointer = Some(pointer);
	}

	fn frame(&mut self, now_ms: f64, painter: &mut dyn Painter) {
		self.step();
		render::network(self, now_ms / 1000.0, painter);
	}
}
