use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can keep a backdrop from running. None of it is shown to
/// the user; the owning component logs it and leaves the canvas idle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackdropError {
	#[error("no global window")]
	NoWindow,
	#[error("window has no document")]
	NoDocument,
	#[error("2d drawing context unavailable")]
	ContextUnavailable,
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for BackdropError {
	fn from(value: JsValue) -> Self {
		BackdropError::Js(format!("{value:?}"))
	}
}
