mod ambient;
mod component;
mod config;
mod driver;
mod error;
mod network;
mod paint;
mod render;
mod surface;
mod types;
mod web;

pub use component::{AmbientBackdrop, NetworkBackdrop};
pub use config::{AmbientConfig, NetworkConfig, TimeMode};
pub use types::Rgba;
