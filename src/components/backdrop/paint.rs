//! Draw commands issued by the frame stepper, and the 2D canvas that
//! executes them.

use std::f64::consts::TAU;

use rand::{Rng, RngCore};
use wasm_bindgen::Clamped;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, ImageData};

use super::types::Rgba;

/// Gradient color stop: offset in [0, 1] and color.
pub type Stop = (f64, Rgba);

pub trait Painter {
	fn clear(&mut self, width: f64, height: f64);

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba);

	/// Fills the whole `width` x `height` area with a radial gradient
	/// centred on (`x`, `y`) reaching `radius`.
	fn radial_wash(&mut self, x: f64, y: f64, radius: f64, stops: &[Stop], width: f64, height: f64);

	/// Fills a disc of `radius` with a radial gradient from its centre.
	fn radial_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[Stop]);

	/// Strokes a straight line with a gradient running from start to end.
	fn gradient_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, stops: &[Stop]);

	/// Adds per-pixel luminance noise to what has been drawn so far.
	fn grain(&mut self, amplitude: f64, rng: &mut dyn RngCore);
}

/// Adds uniform noise in `[-amplitude / 2, amplitude / 2)` to the RGB
/// channels of RGBA pixel data. Alpha is left alone; results saturate.
pub fn apply_grain(data: &mut [u8], amplitude: f64, rng: &mut dyn RngCore) {
	if amplitude <= 0.0 {
		return;
	}
	for px in data.chunks_exact_mut(4) {
		let noise = (rng.gen_range(0.0..1.0) - 0.5) * amplitude;
		for channel in &mut px[..3] {
			*channel = (f64::from(*channel) + noise).round().clamp(0.0, 255.0) as u8;
		}
	}
}

fn add_stops(gradient: &CanvasGradient, stops: &[Stop]) {
	for (offset, color) in stops {
		let _ = gradient.add_color_stop(*offset as f32, &color.to_string());
	}
}

impl Painter for CanvasRenderingContext2d {
	fn clear(&mut self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
		self.set_fill_style_str(&color.to_string());
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn radial_wash(&mut self, x: f64, y: f64, radius: f64, stops: &[Stop], width: f64, height: f64) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		add_stops(&gradient, stops);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		CanvasRenderingContext2d::fill_rect(self, 0.0, 0.0, width, height);
	}

	fn radial_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[Stop]) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		add_stops(&gradient, stops);
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}

	fn gradient_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, stops: &[Stop]) {
		let gradient = self.create_linear_gradient(from.0, from.1, to.0, to.1);
		add_stops(&gradient, stops);
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		#[allow(deprecated)]
		self.set_stroke_style(&gradient);
		self.set_line_width(width);
		self.stroke();
	}

	fn grain(&mut self, amplitude: f64, rng: &mut dyn RngCore) {
		let Some(canvas) = self.canvas() else {
			return;
		};
		let (w, h) = (canvas.width(), canvas.height());
		if amplitude <= 0.0 || w == 0 || h == 0 {
			return;
		}
		let Ok(image) = self.get_image_data(0.0, 0.0, w as f64, h as f64) else {
			return;
		};
		let Clamped(mut data) = image.data();
		apply_grain(&mut data, amplitude, rng);
		if let Ok(noisy) = ImageData::new_with_u8_clamped_array_and_sh(Clamped(data.as_slice()), w, h) {
			let _ = self.put_image_data(&noisy, 0.0, 0.0);
		}
	}
}

/// Painter that records commands instead of drawing them.
#[cfg(test)]
pub mod recording {
	use rand::RngCore;

	use super::{Painter, Stop};
	use crate::components::backdrop::types::Rgba;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Command {
		Clear,
		Rect(Rgba),
		Wash { x: f64, y: f64, radius: f64 },
		Disc { x: f64, y: f64, radius: f64, stops: Vec<Stop> },
		Line { from: (f64, f64), to: (f64, f64), width: f64 },
		Grain(f64),
	}

	#[derive(Default)]
	pub struct Recorder {
		pub commands: Vec<Command>,
	}

	impl Painter for Recorder {
		fn clear(&mut self, _: f64, _: f64) {
			self.commands.push(Command::Clear);
		}

		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, color: Rgba) {
			self.commands.push(Command::Rect(color));
		}

		fn radial_wash(&mut self, x: f64, y: f64, radius: f64, _: &[Stop], _: f64, _: f64) {
			self.commands.push(Command::Wash { x, y, radius });
		}

		fn radial_disc(&mut self, x: f64, y: f64, radius: f64, stops: &[Stop]) {
			self.commands.push(Command::Disc { x, y, radius, stops: stops.to_vec() });
		}

		fn gradient_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, _: &[Stop]) {
			self.commands.push(Command::Line { from, to, width });
		}

		fn grain(&mut self, amplitude: f64, _: &mut dyn RngCore) {
			self.commands.push(Command::Grain(amplitude));
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	#[test]
	fn grain_leaves_alpha_and_stays_in_range() {
		let mut rng = StdRng::seed_from_u64(1);
		let mut data = vec![0, 128, 255, 77, 255, 0, 1, 200];
		apply_grain(&mut data, 4.0, &mut rng);
		assert_eq!((data[3], data[7]), (77, 200));
		assert!(data[0] <= 2);
		assert!((126..=130).contains(&data[1]));
		assert!(data[2] >= 253);
	}

	#[test]
	fn grain_applies_one_offset_per_pixel() {
		let mut rng = StdRng::seed_from_u64(2);
		let mut data = [100u8; 4 * 64];
		apply_grain(&mut data, 4.0, &mut rng);
		for px in data.chunks_exact(4) {
			assert_eq!(px[0], px[1]);
			assert_eq!(px[1], px[2]);
			assert_eq!(px[3], 100);
		}
	}

	#[test]
	fn zero_amplitude_is_a_no_op() {
		let mut rng = StdRng::seed_from_u64(3);
		let mut data = [9u8; 8];
		apply_grain(&mut data, 0.0, &mut rng);
		assert_eq!(data, [9u8; 8]);
	}
}
