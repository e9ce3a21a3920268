use leptos::prelude::*;

use crate::components::backdrop::NetworkBackdrop;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<section class="hero" style="position: relative; min-height: 100vh; overflow: hidden;">
			<NetworkBackdrop count=80 />
			<div class="hero-overlay" style="position: relative; z-index: 1;">
				<h1>"Ambient Backdrop"</h1>
				<p class="subtitle">"Move the pointer over the network. Nodes drift toward it."</p>
			</div>
		</section>
	}
}
