//! Browser half of public forms: progressive enhancement that turns
//! the server-rendered blocks into in-place async forms.
//!
//! The server marks each block with a wrapper element whose id is the
//! block's container id plus `_public_form`. Calling `initialize`
//! (exported to JavaScript under the same name) binds every form under
//! that wrapper: submits stop navigating, travel through fetch, and
//! the response markup replaces the wrapper's content. The wrapper's
//! `ajax-form-send`, `ajax-form-success` and `ajax-form-failure`
//! classes expose the round-trip to CSS, at most one at a time.
//!
//! Everything except the DOM wiring is target-independent and tested
//! natively; browser tests cover the wiring itself.

pub mod binder;
pub mod dom;
pub mod error;
pub mod inject;
pub mod logging;
pub mod submit;
pub mod transport;

pub use binder::{SubmitOutcome, run_submit};
pub use error::{BindError, TransportError};
pub use inject::{InjectPolicy, InjectionPlan, plan_injection};
pub use public_forms_core::{
	CLASS_FAILURE, CLASS_SEND, CLASS_SUCCESS, SubmitPhase, wrapper_id,
};
pub use submit::{FormSubmission, SubmitMethod};
pub use transport::{Transport, TransportResponse};

#[cfg(target_arch = "wasm32")]
pub use binder::{BindOptions, FormBinding, bind_form, initialize};
#[cfg(target_arch = "wasm32")]
pub use transport::FetchTransport;
#[cfg(any(test, feature = "testing"))]
pub use transport::ScriptedTransport;

/// JavaScript entry point: binds every form under the container's
/// wrapper with the default fetch transport and script-stripping
/// injection.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(js_name = initialize)]
pub fn initialize_container(container_id: &str) -> Result<(), wasm_bindgen::JsValue> {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	let document = dom::document().map_err(js_error)?;
	let bindings = binder::initialize(&document, container_id, &binder::BindOptions::default())
		.map_err(js_error)?;
	crate::debug_log!("bound {} public form(s) for {container_id}", bindings.len());
	Ok(())
}

#[cfg(target_arch = "wasm32")]
fn js_error(error: BindError) -> wasm_bindgen::JsValue {
	wasm_bindgen::JsValue::from_str(&error.to_string())
}
