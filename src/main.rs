// the binary only mounts the library app
#![allow(unused_crate_dependencies)]

use ambient_backdrop::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App);
}
