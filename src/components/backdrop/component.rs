use leptos::html::Canvas;
use leptos::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_sys::HtmlCanvasElement;

use super::ambient::AmbientScene;
use super::config::{AmbientConfig, NetworkConfig};
use super::driver::Backdrop;
use super::network::NetworkScene;
use super::web::{Mounted, mount};

/// Mounts a fresh backdrop once the canvas exists and stops it on cleanup.
fn drive<B, F>(canvas_ref: NodeRef<Canvas>, make: F)
where
	B: Backdrop + 'static,
	F: Fn() -> B + 'static,
{
	let mounted = StoredValue::new_local(None::<Mounted<B>>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		// a re-run replaces the previous instance, which must let go first
		mounted.update_value(|slot| *slot = None);
		match mount(canvas.clone(), make()) {
			Ok(running) => {
				let _ = web_sys::HtmlElement::style(&canvas).set_property("opacity", "1");
				mounted.update_value(|slot| *slot = Some(running));
			}
			Err(e) => log::debug!("backdrop disabled: {e}"),
		}
	});

	on_cleanup(move || {
		mounted.try_update_value(|slot| *slot = None);
	});
}

/// Slow aurora wash fixed behind the whole page.
#[component]
pub fn AmbientBackdrop(
	/// Overrides the default look and timing.
	#[prop(optional)]
	config: Option<AmbientConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let config = config.unwrap_or_default();
	drive(canvas_ref, move || {
		AmbientScene::new(config.clone(), StdRng::from_entropy())
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="ambient-backdrop"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -1; pointer-events: none; opacity: 1;"
		/>
	}
}

/// Drifting node network that leans toward the pointer. Fills its
/// positioned parent and fades in once running.
#[component]
pub fn NetworkBackdrop(
	/// Node cap. Defaults to 80.
	#[prop(optional)]
	count: Option<usize>,
	/// Full tuning; `count` still wins for the node cap when both are given.
	#[prop(optional)]
	config: Option<NetworkConfig>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let mut config = config.unwrap_or_default();
	if let Some(count) = count {
		config.max_nodes = count;
	}
	drive(canvas_ref, move || {
		NetworkScene::new(config.clone(), StdRng::from_entropy())
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-backdrop"
			aria-hidden="true"
			style="position: absolute; inset: 0; z-index: 0; opacity: 0; transition: opacity 2s ease;"
		/>
	}
}
